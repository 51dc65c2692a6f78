#![forbid(unsafe_code)]

//! Motion and accessibility event types.
//!
//! [`MotionEvent`] is the shape both pointer ledgers consume: the masked
//! action, the index of the pointer that changed, and the per-pointer
//! coordinates, plus event time, gesture down time and edge flags.
//!
//! # Design Notes
//!
//! - Timestamps are milliseconds on the platform's monotonic input clock.
//! - A `MotionEvent` is validated once at construction (non-empty pointer
//!   list, in-bounds action index, no repeated ids), so the ledgers can
//!   resolve the changed pointer without a failure path.
//! - Raw codes follow the platform encoding: the low byte of a packed action
//!   is the masked action, the next byte the pointer index.

use bitflags::bitflags;

use crate::error::{Result, TouchError};
use crate::pointer::{MAX_POINTER_COUNT, PointerId, PointerIdBits};

/// Mask selecting the action kind from a packed action.
pub const ACTION_MASK: u32 = 0x00ff;
/// Mask selecting the pointer index from a packed action.
pub const ACTION_POINTER_INDEX_MASK: u32 = 0xff00;
/// Shift applied to the pointer index in a packed action.
pub const ACTION_POINTER_INDEX_SHIFT: u32 = 8;

/// The masked action of a motion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionAction {
    /// First pointer went down.
    Down,
    /// Last pointer went up.
    Up,
    /// One or more pointers moved.
    Move,
    /// The gesture was aborted.
    Cancel,
    /// Touch landed outside the target bounds.
    Outside,
    /// A non-first pointer went down.
    PointerDown,
    /// A non-last pointer went up.
    PointerUp,
    /// Hovering pointer moved.
    HoverMove,
    /// Scroll axis changed.
    Scroll,
    /// Pointer started hovering.
    HoverEnter,
    /// Pointer stopped hovering.
    HoverExit,
    /// A button was pressed.
    ButtonPress,
    /// A button was released.
    ButtonRelease,
}

impl MotionAction {
    /// Decode a masked action code.
    pub fn from_masked(code: u32) -> Result<Self> {
        Ok(match code {
            0 => Self::Down,
            1 => Self::Up,
            2 => Self::Move,
            3 => Self::Cancel,
            4 => Self::Outside,
            5 => Self::PointerDown,
            6 => Self::PointerUp,
            7 => Self::HoverMove,
            8 => Self::Scroll,
            9 => Self::HoverEnter,
            10 => Self::HoverExit,
            11 => Self::ButtonPress,
            12 => Self::ButtonRelease,
            _ => return Err(TouchError::UnknownAction { code }),
        })
    }

    /// The masked action code.
    #[must_use]
    pub const fn as_masked(self) -> u32 {
        match self {
            Self::Down => 0,
            Self::Up => 1,
            Self::Move => 2,
            Self::Cancel => 3,
            Self::Outside => 4,
            Self::PointerDown => 5,
            Self::PointerUp => 6,
            Self::HoverMove => 7,
            Self::Scroll => 8,
            Self::HoverEnter => 9,
            Self::HoverExit => 10,
            Self::ButtonPress => 11,
            Self::ButtonRelease => 12,
        }
    }

    /// `Down` or `PointerDown`.
    #[inline]
    #[must_use]
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Down | Self::PointerDown)
    }

    /// `Up` or `PointerUp`.
    #[inline]
    #[must_use]
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up | Self::PointerUp)
    }

    /// `HoverEnter`, `HoverMove` or `HoverExit`.
    #[inline]
    #[must_use]
    pub const fn is_hover(self) -> bool {
        matches!(self, Self::HoverEnter | Self::HoverMove | Self::HoverExit)
    }
}

bitflags! {
    /// Screen edges a touch was reported against.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EdgeFlags: u32 {
        /// Touch hit the top edge.
        const TOP    = 0b0001;
        /// Touch hit the bottom edge.
        const BOTTOM = 0b0010;
        /// Touch hit the left edge.
        const LEFT   = 0b0100;
        /// Touch hit the right edge.
        const RIGHT  = 0b1000;
    }
}

/// Location of one pointer inside a motion event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerCoords {
    pub id: PointerId,
    pub x: f32,
    pub y: f32,
}

impl PointerCoords {
    #[must_use]
    pub const fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// A touch or hover event as seen by the accessibility layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    action: MotionAction,
    action_index: usize,
    pointers: Vec<PointerCoords>,
    event_time: u64,
    down_time: u64,
    edge_flags: EdgeFlags,
}

impl MotionEvent {
    /// Build an event, validating the pointer list against the action index.
    pub fn new(
        action: MotionAction,
        action_index: usize,
        pointers: Vec<PointerCoords>,
        event_time: u64,
        down_time: u64,
    ) -> Result<Self> {
        if pointers.is_empty() {
            return Err(TouchError::NoPointers);
        }
        if pointers.len() > MAX_POINTER_COUNT {
            return Err(TouchError::TooManyPointers {
                count: pointers.len(),
            });
        }
        if action_index >= pointers.len() {
            return Err(TouchError::ActionIndexOutOfBounds {
                index: action_index,
                count: pointers.len(),
            });
        }
        let mut seen = PointerIdBits::EMPTY;
        for p in &pointers {
            if seen.contains(p.id) {
                return Err(TouchError::DuplicatePointerId { id: p.id.get() });
            }
            seen.insert(p.id);
        }

        Ok(Self {
            action,
            action_index,
            pointers,
            event_time,
            down_time,
            edge_flags: EdgeFlags::empty(),
        })
    }

    /// Build an event from a packed platform action (`index << 8 | masked`).
    pub fn from_raw_action(
        raw_action: u32,
        pointers: Vec<PointerCoords>,
        event_time: u64,
        down_time: u64,
    ) -> Result<Self> {
        let action = MotionAction::from_masked(raw_action & ACTION_MASK)?;
        let index =
            ((raw_action & ACTION_POINTER_INDEX_MASK) >> ACTION_POINTER_INDEX_SHIFT) as usize;
        Self::new(action, index, pointers, event_time, down_time)
    }

    /// Single-pointer event; the pointer is at index 0.
    #[must_use]
    pub fn single(
        action: MotionAction,
        id: PointerId,
        x: f32,
        y: f32,
        event_time: u64,
        down_time: u64,
    ) -> Self {
        Self {
            action,
            action_index: 0,
            pointers: vec![PointerCoords::new(id, x, y)],
            event_time,
            down_time,
            edge_flags: EdgeFlags::empty(),
        }
    }

    /// Set the edge flags.
    #[must_use]
    pub fn with_edge_flags(mut self, edge_flags: EdgeFlags) -> Self {
        self.edge_flags = edge_flags;
        self
    }

    #[inline]
    #[must_use]
    pub fn action(&self) -> MotionAction {
        self.action
    }

    /// Index of the pointer this action refers to.
    #[inline]
    #[must_use]
    pub fn action_index(&self) -> usize {
        self.action_index
    }

    /// The packed platform action (`index << 8 | masked`).
    #[must_use]
    pub fn raw_action(&self) -> u32 {
        ((self.action_index as u32) << ACTION_POINTER_INDEX_SHIFT) | self.action.as_masked()
    }

    #[inline]
    #[must_use]
    pub fn pointers(&self) -> &[PointerCoords] {
        &self.pointers
    }

    #[inline]
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Pointer id at `index`, if any.
    #[must_use]
    pub fn pointer_id(&self, index: usize) -> Option<PointerId> {
        self.pointers.get(index).map(|p| p.id)
    }

    /// The pointer the action refers to.
    #[must_use]
    pub fn action_pointer(&self) -> &PointerCoords {
        // In bounds: checked by every constructor.
        &self.pointers[self.action_index]
    }

    /// Id of the pointer the action refers to.
    #[inline]
    #[must_use]
    pub fn action_pointer_id(&self) -> PointerId {
        self.action_pointer().id
    }

    /// X of the first pointer.
    #[inline]
    #[must_use]
    pub fn x(&self) -> f32 {
        self.pointers[0].x
    }

    /// Y of the first pointer.
    #[inline]
    #[must_use]
    pub fn y(&self) -> f32 {
        self.pointers[0].y
    }

    /// When this event happened.
    #[inline]
    #[must_use]
    pub fn event_time(&self) -> u64 {
        self.event_time
    }

    /// When the first pointer of the enclosing gesture went down.
    #[inline]
    #[must_use]
    pub fn down_time(&self) -> u64 {
        self.down_time
    }

    #[inline]
    #[must_use]
    pub fn edge_flags(&self) -> EdgeFlags {
        self.edge_flags
    }
}

/// Accessibility event types relevant to touch exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibilityEventType {
    ViewHoverEnter,
    ViewHoverExit,
    TouchExplorationGestureStart,
    TouchExplorationGestureEnd,
    GestureDetectionStart,
    GestureDetectionEnd,
    TouchInteractionStart,
    TouchInteractionEnd,
    /// Any type this crate does not act on, with its raw code.
    Other(u32),
}

impl AccessibilityEventType {
    /// Decode a raw event type code. Unrecognized codes map to `Other`.
    #[must_use]
    pub const fn from_raw(code: u32) -> Self {
        match code {
            0x0000_0080 => Self::ViewHoverEnter,
            0x0000_0100 => Self::ViewHoverExit,
            0x0000_0200 => Self::TouchExplorationGestureStart,
            0x0000_0400 => Self::TouchExplorationGestureEnd,
            0x0004_0000 => Self::GestureDetectionStart,
            0x0008_0000 => Self::GestureDetectionEnd,
            0x0010_0000 => Self::TouchInteractionStart,
            0x0020_0000 => Self::TouchInteractionEnd,
            other => Self::Other(other),
        }
    }

    /// The raw event type code.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        match self {
            Self::ViewHoverEnter => 0x0000_0080,
            Self::ViewHoverExit => 0x0000_0100,
            Self::TouchExplorationGestureStart => 0x0000_0200,
            Self::TouchExplorationGestureEnd => 0x0000_0400,
            Self::GestureDetectionStart => 0x0004_0000,
            Self::GestureDetectionEnd => 0x0008_0000,
            Self::TouchInteractionStart => 0x0010_0000,
            Self::TouchInteractionEnd => 0x0020_0000,
            Self::Other(code) => code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: u32) -> PointerId {
        PointerId::new(id).unwrap()
    }

    fn coords(id: u32, x: f32, y: f32) -> PointerCoords {
        PointerCoords::new(pid(id), x, y)
    }

    #[test]
    fn masked_action_codes() {
        for code in 0..=12 {
            let action = MotionAction::from_masked(code).unwrap();
            assert_eq!(action.as_masked(), code);
        }
        assert_eq!(
            MotionAction::from_masked(13),
            Err(TouchError::UnknownAction { code: 13 })
        );
    }

    #[test]
    fn action_classes() {
        assert!(MotionAction::Down.is_down());
        assert!(MotionAction::PointerDown.is_down());
        assert!(MotionAction::Up.is_up());
        assert!(MotionAction::PointerUp.is_up());
        assert!(MotionAction::HoverEnter.is_hover());
        assert!(MotionAction::HoverMove.is_hover());
        assert!(MotionAction::HoverExit.is_hover());
        assert!(!MotionAction::Move.is_down());
        assert!(!MotionAction::Cancel.is_up());
        assert!(!MotionAction::Scroll.is_hover());
    }

    #[test]
    fn new_rejects_empty_pointer_list() {
        let err = MotionEvent::new(MotionAction::Down, 0, Vec::new(), 0, 0).unwrap_err();
        assert_eq!(err, TouchError::NoPointers);
    }

    #[test]
    fn new_rejects_out_of_bounds_index() {
        let err = MotionEvent::new(
            MotionAction::PointerDown,
            2,
            vec![coords(0, 0.0, 0.0), coords(1, 1.0, 1.0)],
            10,
            0,
        )
        .unwrap_err();
        assert_eq!(err, TouchError::ActionIndexOutOfBounds { index: 2, count: 2 });
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let err = MotionEvent::new(
            MotionAction::Move,
            0,
            vec![coords(3, 0.0, 0.0), coords(3, 1.0, 1.0)],
            10,
            0,
        )
        .unwrap_err();
        assert_eq!(err, TouchError::DuplicatePointerId { id: 3 });
    }

    #[test]
    fn raw_action_splits_index_and_kind() {
        // POINTER_DOWN for the pointer at index 1.
        let raw = (1 << ACTION_POINTER_INDEX_SHIFT) | 5;
        let event = MotionEvent::from_raw_action(
            raw,
            vec![coords(0, 1.0, 2.0), coords(4, 3.0, 4.0)],
            120,
            100,
        )
        .unwrap();
        assert_eq!(event.action(), MotionAction::PointerDown);
        assert_eq!(event.action_index(), 1);
        assert_eq!(event.action_pointer_id(), pid(4));
        assert_eq!(event.raw_action(), raw);
    }

    #[test]
    fn raw_action_rejects_unknown_kind() {
        let err =
            MotionEvent::from_raw_action(0xff, vec![coords(0, 0.0, 0.0)], 0, 0).unwrap_err();
        assert_eq!(err, TouchError::UnknownAction { code: 0xff });
    }

    #[test]
    fn single_pointer_accessors() {
        let event = MotionEvent::single(MotionAction::Down, pid(2), 5.0, 6.0, 110, 100)
            .with_edge_flags(EdgeFlags::TOP | EdgeFlags::LEFT);
        assert_eq!(event.pointer_count(), 1);
        assert_eq!(event.pointer_id(0), Some(pid(2)));
        assert_eq!(event.pointer_id(1), None);
        assert_eq!(event.x(), 5.0);
        assert_eq!(event.y(), 6.0);
        assert_eq!(event.event_time(), 110);
        assert_eq!(event.down_time(), 100);
        assert!(event.edge_flags().contains(EdgeFlags::TOP));
        assert!(!event.edge_flags().contains(EdgeFlags::RIGHT));
    }

    #[test]
    fn accessibility_event_codes() {
        let start = AccessibilityEventType::from_raw(0x200);
        assert_eq!(start, AccessibilityEventType::TouchExplorationGestureStart);
        assert_eq!(
            AccessibilityEventType::from_raw(0x400),
            AccessibilityEventType::TouchExplorationGestureEnd
        );
        assert_eq!(
            AccessibilityEventType::from_raw(0x1),
            AccessibilityEventType::Other(0x1)
        );
        assert_eq!(AccessibilityEventType::TouchInteractionEnd.as_raw(), 0x0020_0000);
        assert_eq!(AccessibilityEventType::Other(7).as_raw(), 7);
    }
}
