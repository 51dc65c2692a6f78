#![forbid(unsafe_code)]

//! Ledger of pointers as received from the hardware.
//!
//! [`ReceivedPointerTracker`] records where and when each pointer went down
//! and which pointers are currently down. It does not track movement.
//!
//! # Invariants
//!
//! 1. `down_count()` equals the number of ids that went down and have not
//!    gone up since (or since the last `clear()`).
//! 2. A pointer's down-record is zeroed when it goes up, so a reused id never
//!    reports coordinates from an earlier touch.
//! 3. `primary_pointer_id()` is `None` exactly when no pointer is down.
//!
//! # Primary pointer
//!
//! A down writes the primary eagerly according to the configured
//! [`PrimaryPointerPolicy`]. When the primary lifts the cache is dropped and
//! the next query scans the down pointers for the minimum down time (lowest
//! id on ties). Downs are frequent and ups rare, so the scan only runs when
//! the primary actually changes hands.

use std::cell::Cell;
use std::fmt;

use crate::config::PrimaryPointerPolicy;
use crate::event::{EdgeFlags, MotionEvent};
use crate::pointer::{MAX_POINTER_COUNT, PointerId, PointerIdBits};

/// Where and when one pointer went down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct PointerDownInfo {
    x: f32,
    y: f32,
    time: u64,
}

/// Tracks the down state of pointers received from the platform.
///
/// The primary-pointer cache uses interior mutability so queries work through
/// `&self`; the tracker is therefore `!Sync`, matching its single input-thread
/// use. Callers sharing it across threads must add their own locking.
#[derive(Debug, Clone)]
pub struct ReceivedPointerTracker {
    pointers: [PointerDownInfo; MAX_POINTER_COUNT],
    down: PointerIdBits,
    last_down_edge_flags: EdgeFlags,
    /// `None` means "recompute on next query".
    primary: Cell<Option<PointerId>>,
    policy: PrimaryPointerPolicy,
    last_event: Option<MotionEvent>,
}

impl Default for ReceivedPointerTracker {
    fn default() -> Self {
        Self::new(PrimaryPointerPolicy::default())
    }
}

impl ReceivedPointerTracker {
    #[must_use]
    pub fn new(policy: PrimaryPointerPolicy) -> Self {
        Self {
            pointers: [PointerDownInfo::default(); MAX_POINTER_COUNT],
            down: PointerIdBits::EMPTY,
            last_down_edge_flags: EdgeFlags::empty(),
            primary: Cell::new(None),
            policy,
            last_event: None,
        }
    }

    /// Process a received motion event.
    ///
    /// The event always replaces the last-event snapshot. Only down and up
    /// actions touch the ledger itself.
    pub fn on_motion_event(&mut self, event: &MotionEvent) {
        self.last_event = Some(event.clone());

        let action = event.action();
        if action.is_down() {
            self.on_pointer_down(event);
        } else if action.is_up() {
            self.on_pointer_up(event);
        }
    }

    /// Reset to the initial state: nothing down, all down-records zeroed,
    /// no primary pointer.
    ///
    /// The last-event snapshot is kept.
    pub fn clear(&mut self) {
        self.down.clear();
        self.primary.set(None);
        self.pointers = [PointerDownInfo::default(); MAX_POINTER_COUNT];
    }

    /// The most recent event passed to [`on_motion_event`](Self::on_motion_event).
    #[must_use]
    pub fn last_received_event(&self) -> Option<&MotionEvent> {
        self.last_event.as_ref()
    }

    /// Number of pointers currently down.
    #[inline]
    #[must_use]
    pub fn down_count(&self) -> usize {
        self.down.count()
    }

    /// Set of pointers currently down.
    #[inline]
    #[must_use]
    pub fn down_bitset(&self) -> PointerIdBits {
        self.down
    }

    #[inline]
    #[must_use]
    pub fn is_down(&self, id: PointerId) -> bool {
        self.down.contains(id)
    }

    /// X where `id` went down. Zero unless `id` is down.
    #[inline]
    #[must_use]
    pub fn down_x(&self, id: PointerId) -> f32 {
        self.pointers[id.index()].x
    }

    /// Y where `id` went down. Zero unless `id` is down.
    #[inline]
    #[must_use]
    pub fn down_y(&self, id: PointerId) -> f32 {
        self.pointers[id.index()].y
    }

    /// Event time at which `id` went down. Zero unless `id` is down.
    #[inline]
    #[must_use]
    pub fn down_time(&self, id: PointerId) -> u64 {
        self.pointers[id.index()].time
    }

    /// The primary pointer, or `None` if no pointer is down.
    #[must_use]
    pub fn primary_pointer_id(&self) -> Option<PointerId> {
        if let Some(id) = self.primary.get() {
            return Some(id);
        }
        let found = self.find_primary_pointer_id();
        self.primary.set(found);
        found
    }

    /// Edge flags of the last received down.
    #[inline]
    #[must_use]
    pub fn last_down_edge_flags(&self) -> EdgeFlags {
        self.last_down_edge_flags
    }

    #[inline]
    #[must_use]
    pub fn primary_policy(&self) -> PrimaryPointerPolicy {
        self.policy
    }
}

impl ReceivedPointerTracker {
    fn on_pointer_down(&mut self, event: &MotionEvent) {
        let pointer = event.action_pointer();
        let id = pointer.id;
        let was_idle = self.down.is_empty();

        self.last_down_edge_flags = event.edge_flags();
        self.down.insert(id);
        self.pointers[id.index()] = PointerDownInfo {
            x: pointer.x,
            y: pointer.y,
            time: event.event_time(),
        };

        match self.policy {
            PrimaryPointerPolicy::LastDown => self.primary.set(Some(id)),
            // Leave a stale cache stale; the next query rescans.
            PrimaryPointerPolicy::EarliestDown if was_idle => self.primary.set(Some(id)),
            PrimaryPointerPolicy::EarliestDown => {}
        }
    }

    fn on_pointer_up(&mut self, event: &MotionEvent) {
        let id = event.action_pointer_id();
        self.down.remove(id);
        self.pointers[id.index()] = PointerDownInfo::default();
        if self.primary.get() == Some(id) {
            self.primary.set(None);
        }
    }

    fn find_primary_pointer_id(&self) -> Option<PointerId> {
        let mut primary = None;
        let mut min_time = u64::MAX;
        for id in self.down.iter() {
            let time = self.pointers[id.index()].time;
            if primary.is_none() || time < min_time {
                min_time = time;
                primary = Some(id);
            }
        }
        primary
    }
}

impl fmt::Display for ReceivedPointerTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=========================")?;
        writeln!(f, "Down pointers #{} {}", self.down_count(), self.down)?;
        // Peek without filling the cache.
        match self.primary.get().or_else(|| self.find_primary_pointer_id()) {
            Some(id) => writeln!(f, "Primary pointer id [ {id} ]")?,
            None => writeln!(f, "Primary pointer id [ none ]")?,
        }
        write!(f, "=========================")
    }
}
