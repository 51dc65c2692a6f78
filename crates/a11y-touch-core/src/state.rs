#![forbid(unsafe_code)]

//! Touch-exploration mode state and the two pointer ledgers it owns.
//!
//! [`TouchState`] is what a touch-exploration dispatcher holds on to. It
//! tracks the current [`TouchMode`], whether a touch-exploration gesture is in
//! progress, and owns a [`ReceivedPointerTracker`] and an
//! [`InjectedPointerTracker`].
//!
//! # State Machine
//!
//! ```text
//!   TouchExploring ◄──► Dragging
//!         ▲   ▲            ▲
//!         │   └─► Delegating ◄─┐
//!         ▼                    │
//!   GestureDetecting ◄─────────┘
//! ```
//!
//! Every mode is reachable from every other mode. The caller decides when to
//! transition; `TouchState` never refuses one.
//!
//! # Invariants
//!
//! 1. Exactly one [`TouchMode`] is active.
//! 2. The exploration flag is independent of the mode: it only follows the
//!    exploration-gesture start/end accessibility events and the direct setter.
//! 3. After `reset()` the mode is `TouchExploring`, the flag is clear and both
//!    ledgers are cleared.
//! 4. Logging never changes what any query returns.

use std::fmt;

use crate::config::TouchStateConfig;
use crate::event::{AccessibilityEventType, MotionEvent};
use crate::injected::InjectedPointerTracker;
use crate::logging::{TARGET_INJECTED, TARGET_RECEIVED, TARGET_STATE};
use crate::received::ReceivedPointerTracker;
use crate::{debug, trace};

/// Interaction mode of the touch explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TouchMode {
    /// Single-finger touch exploration (the default).
    #[default]
    TouchExploring,
    /// A two-finger drag is being forwarded as a single pointer.
    Dragging,
    /// Events are passed through to the view hierarchy.
    Delegating,
    /// A gesture detector is consuming the events.
    GestureDetecting,
}

impl TouchMode {
    /// Symbolic name used in diagnostics.
    #[must_use]
    pub const fn symbolic_name(self) -> &'static str {
        match self {
            Self::TouchExploring => "STATE_TOUCH_EXPLORING",
            Self::Dragging => "STATE_DRAGGING",
            Self::Delegating => "STATE_DELEGATING",
            Self::GestureDetecting => "STATE_GESTURE_DETECTING",
        }
    }
}

impl fmt::Display for TouchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbolic_name())
    }
}

/// Mode state machine plus received/injected pointer ledgers.
#[derive(Debug, Clone)]
pub struct TouchState {
    config: TouchStateConfig,
    mode: TouchMode,
    exploration_in_progress: bool,
    received: ReceivedPointerTracker,
    injected: InjectedPointerTracker,
}

impl Default for TouchState {
    fn default() -> Self {
        Self::new(TouchStateConfig::default())
    }
}

impl TouchState {
    #[must_use]
    pub fn new(config: TouchStateConfig) -> Self {
        Self {
            config,
            mode: TouchMode::TouchExploring,
            exploration_in_progress: false,
            received: ReceivedPointerTracker::new(config.primary_policy),
            injected: InjectedPointerTracker::new(),
        }
    }

    /// Full reset: back to touch exploring, flag cleared, both ledgers cleared.
    pub fn reset(&mut self) {
        self.mode = TouchMode::TouchExploring;
        self.exploration_in_progress = false;
        self.received.clear();
        self.injected.clear();
    }

    /// Feed a touch event received from the platform.
    pub fn on_received_motion_event(&mut self, event: &MotionEvent) {
        self.received.on_motion_event(event);
        if self.config.log_pointer_dumps {
            trace!(target: TARGET_RECEIVED, "Received pointer:\n{}", self.received);
        }
    }

    /// Feed an event the accessibility layer injected downstream.
    pub fn on_injected_motion_event(&mut self, event: &MotionEvent) {
        self.injected.on_motion_event(event);
        if self.config.log_pointer_dumps {
            trace!(target: TARGET_INJECTED, "Injected pointer:\n{}", self.injected);
        }
    }

    /// Track the exploration flag from a dispatched accessibility event.
    ///
    /// Only exploration-gesture start and end have an effect.
    pub fn on_accessibility_event_dispatched(&mut self, event_type: AccessibilityEventType) {
        match event_type {
            AccessibilityEventType::TouchExplorationGestureStart => {
                self.exploration_in_progress = true;
            }
            AccessibilityEventType::TouchExplorationGestureEnd => {
                self.exploration_in_progress = false;
            }
            _ => {}
        }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> TouchMode {
        self.mode
    }

    /// Transition to `mode`. Every transition is allowed.
    pub fn set_mode(&mut self, mode: TouchMode) {
        if self.config.log_transitions {
            debug!(
                target: TARGET_STATE,
                from = self.mode.symbolic_name(),
                to = mode.symbolic_name(),
                "{}->{}",
                self.mode,
                mode
            );
        }
        self.mode = mode;
    }

    #[inline]
    #[must_use]
    pub fn is_touch_exploring(&self) -> bool {
        self.mode == TouchMode::TouchExploring
    }

    pub fn start_touch_exploring(&mut self) {
        self.set_mode(TouchMode::TouchExploring);
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.mode == TouchMode::Dragging
    }

    pub fn start_dragging(&mut self) {
        self.set_mode(TouchMode::Dragging);
    }

    #[inline]
    #[must_use]
    pub fn is_delegating(&self) -> bool {
        self.mode == TouchMode::Delegating
    }

    /// Start handing events to the view hierarchy.
    pub fn start_delegating(&mut self) {
        self.set_mode(TouchMode::Delegating);
    }

    #[inline]
    #[must_use]
    pub fn is_gesture_detecting(&self) -> bool {
        self.mode == TouchMode::GestureDetecting
    }

    pub fn start_gesture_detecting(&mut self) {
        self.set_mode(TouchMode::GestureDetecting);
    }

    #[inline]
    #[must_use]
    pub fn is_touch_exploration_in_progress(&self) -> bool {
        self.exploration_in_progress
    }

    pub fn set_touch_exploration_in_progress(&mut self, in_progress: bool) {
        self.exploration_in_progress = in_progress;
    }

    /// Ledger of pointers as received from the platform.
    #[inline]
    #[must_use]
    pub fn received(&self) -> &ReceivedPointerTracker {
        &self.received
    }

    /// Ledger of pointers injected downstream.
    #[inline]
    #[must_use]
    pub fn injected(&self) -> &InjectedPointerTracker {
        &self.injected
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &TouchStateConfig {
        &self.config
    }
}

impl fmt::Display for TouchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TouchState {{ mode: {}, exploration_in_progress: {} }}",
            self.mode, self.exploration_in_progress
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MotionAction;
    use crate::pointer::PointerId;

    fn pid(id: u32) -> PointerId {
        PointerId::new(id).unwrap()
    }

    const ALL_MODES: [TouchMode; 4] = [
        TouchMode::TouchExploring,
        TouchMode::Dragging,
        TouchMode::Delegating,
        TouchMode::GestureDetecting,
    ];

    #[test]
    fn initial_state() {
        let state = TouchState::default();
        assert!(state.is_touch_exploring());
        assert!(!state.is_touch_exploration_in_progress());
        assert_eq!(state.received().down_count(), 0);
        assert_eq!(state.injected().down_count(), 0);
    }

    #[test]
    fn every_transition_is_allowed() {
        let mut state = TouchState::default();
        for from in ALL_MODES {
            for to in ALL_MODES {
                state.set_mode(from);
                state.set_mode(to);
                assert_eq!(state.mode(), to, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn start_helpers_match_predicates() {
        let mut state = TouchState::default();

        state.start_dragging();
        assert!(state.is_dragging());
        assert!(!state.is_touch_exploring());

        state.start_delegating();
        assert!(state.is_delegating());
        assert!(!state.is_dragging());

        state.start_gesture_detecting();
        assert!(state.is_gesture_detecting());
        assert!(!state.is_delegating());

        state.start_touch_exploring();
        assert!(state.is_touch_exploring());
        assert!(!state.is_gesture_detecting());
    }

    #[test]
    fn exploration_flag_follows_start_and_end() {
        let mut state = TouchState::default();
        state.on_accessibility_event_dispatched(
            AccessibilityEventType::TouchExplorationGestureStart,
        );
        assert!(state.is_touch_exploration_in_progress());

        state.on_accessibility_event_dispatched(AccessibilityEventType::ViewHoverEnter);
        state.on_accessibility_event_dispatched(AccessibilityEventType::TouchInteractionEnd);
        assert!(state.is_touch_exploration_in_progress());

        state
            .on_accessibility_event_dispatched(AccessibilityEventType::TouchExplorationGestureEnd);
        assert!(!state.is_touch_exploration_in_progress());
    }

    #[test]
    fn exploration_flag_is_independent_of_mode() {
        let mut state = TouchState::default();
        state.set_mode(TouchMode::Delegating);
        state.on_accessibility_event_dispatched(
            AccessibilityEventType::TouchExplorationGestureStart,
        );
        assert!(state.is_delegating());
        assert!(state.is_touch_exploration_in_progress());

        state.start_dragging();
        assert!(state.is_touch_exploration_in_progress());
    }

    #[test]
    fn direct_flag_setter() {
        let mut state = TouchState::default();
        state.set_touch_exploration_in_progress(true);
        assert!(state.is_touch_exploration_in_progress());
        state.set_touch_exploration_in_progress(false);
        assert!(!state.is_touch_exploration_in_progress());
    }

    #[test]
    fn events_route_to_their_ledger() {
        let mut state = TouchState::default();
        let down = MotionEvent::single(MotionAction::Down, pid(0), 1.0, 1.0, 100, 100);

        state.on_received_motion_event(&down);
        assert!(state.received().is_down(pid(0)));
        assert!(!state.injected().is_down(pid(0)));

        let hover = MotionEvent::single(MotionAction::HoverEnter, pid(0), 1.0, 1.0, 110, 110);
        state.on_injected_motion_event(&hover);
        assert_eq!(state.injected().last_hover_event(), Some(&hover));
        assert_eq!(state.received().last_received_event(), Some(&down));
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut state = TouchState::default();
        state.start_gesture_detecting();
        state.set_touch_exploration_in_progress(true);
        state.on_received_motion_event(&MotionEvent::single(
            MotionAction::Down,
            pid(4),
            1.0,
            1.0,
            100,
            100,
        ));
        state.on_injected_motion_event(&MotionEvent::single(
            MotionAction::Down,
            pid(4),
            1.0,
            1.0,
            100,
            100,
        ));

        state.reset();

        assert!(state.is_touch_exploring());
        assert!(!state.is_touch_exploration_in_progress());
        assert_eq!(state.received().down_count(), 0);
        assert_eq!(state.received().primary_pointer_id(), None);
        assert_eq!(state.injected().down_count(), 0);
    }

    #[test]
    fn logging_config_does_not_change_behavior() {
        let quiet = TouchState::default();
        let noisy = TouchState::new(
            TouchStateConfig::default()
                .with_log_transitions(true)
                .with_log_pointer_dumps(true),
        );
        for mut state in [quiet, noisy] {
            state.start_dragging();
            state.on_received_motion_event(&MotionEvent::single(
                MotionAction::Down,
                pid(1),
                2.0,
                3.0,
                50,
                50,
            ));
            assert!(state.is_dragging());
            assert_eq!(state.received().primary_pointer_id(), Some(pid(1)));
        }
    }

    #[test]
    fn symbolic_names() {
        assert_eq!(TouchMode::TouchExploring.symbolic_name(), "STATE_TOUCH_EXPLORING");
        assert_eq!(TouchMode::Dragging.to_string(), "STATE_DRAGGING");
        assert_eq!(TouchMode::Delegating.to_string(), "STATE_DELEGATING");
        assert_eq!(
            TouchMode::GestureDetecting.to_string(),
            "STATE_GESTURE_DETECTING"
        );
    }

    #[test]
    fn display_summary() {
        let mut state = TouchState::default();
        state.start_delegating();
        assert_eq!(
            state.to_string(),
            "TouchState { mode: STATE_DELEGATING, exploration_in_progress: false }"
        );
    }
}
