#![forbid(unsafe_code)]

//! Ledger of pointers injected downstream by the accessibility layer.

use std::fmt;

use crate::event::MotionEvent;
use crate::pointer::{PointerId, PointerIdBits};

/// Tracks the up/down state of each injected pointer. Does not track movement.
#[derive(Debug, Clone, Default)]
pub struct InjectedPointerTracker {
    down: PointerIdBits,
    last_down_event_time: u64,
    last_hover_event: Option<MotionEvent>,
}

impl InjectedPointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an injected motion event.
    pub fn on_motion_event(&mut self, event: &MotionEvent) {
        let action = event.action();
        if action.is_down() {
            let id = event.action_pointer_id();
            if self.down.is_empty() {
                self.last_down_event_time = event.down_time();
            }
            self.down.insert(id);
        } else if action.is_up() {
            let id = event.action_pointer_id();
            self.down.remove(id);
            if self.down.is_empty() {
                self.last_down_event_time = 0;
            }
        } else if action.is_hover() {
            self.last_hover_event = Some(event.clone());
        }
    }

    /// Forget which pointers are down.
    ///
    /// The last down time and the last hover event survive a clear.
    pub fn clear(&mut self) {
        self.down.clear();
    }

    /// Down time of the gesture the first injected pointer started, or zero
    /// when nothing is down.
    #[inline]
    #[must_use]
    pub fn last_down_event_time(&self) -> u64 {
        self.last_down_event_time
    }

    /// Number of injected pointers that are down.
    #[inline]
    #[must_use]
    pub fn down_count(&self) -> usize {
        self.down.count()
    }

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

    #[must_use]
    pub fn last_hover_event(&self) -> Option<&MotionEvent> {
        self.last_hover_event.as_ref()
    }
}

impl fmt::Display for InjectedPointerTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=========================")?;
        writeln!(f, "Down pointers #{} {}", self.down_count(), self.down)?;
        write!(f, "=========================")
    }
}
