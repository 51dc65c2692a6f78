// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: touch-exploration mode state and pointer ledgers.
//!
//! # Role
//! `a11y-touch-core` sits between raw touch input and an accessibility
//! touch explorer. The explorer withholds, delays or synthesizes pointer
//! events before forwarding them, so what the hardware reported and what
//! downstream has seen diverge. This crate keeps both views.
//!
//! # Primary responsibilities
//! - **TouchState**: the current [`TouchMode`](state::TouchMode) plus the
//!   touch-exploration-in-progress flag.
//! - **ReceivedPointerTracker**: down location/time per pointer, the down
//!   set, and the primary pointer, derived from received events.
//! - **InjectedPointerTracker**: down set, gesture down time and the last
//!   hover event, derived from injected events.
//!
//! # How it fits in the system
//! A dispatcher feeds every received event to
//! [`TouchState::on_received_motion_event`](state::TouchState::on_received_motion_event)
//! and every forwarded event to
//! [`TouchState::on_injected_motion_event`](state::TouchState::on_injected_motion_event),
//! then decides on mode transitions from what the ledgers report. Deciding
//! *when* to transition is the dispatcher's job.
//!
//! Everything here runs on the input thread; nothing is `Sync`.

pub mod config;
pub mod error;
pub mod event;
pub mod injected;
pub mod logging;
pub mod pointer;
pub mod received;
pub mod state;

pub use config::{PrimaryPointerPolicy, TouchStateConfig};
pub use error::{Result, TouchError};
pub use event::{AccessibilityEventType, EdgeFlags, MotionAction, MotionEvent, PointerCoords};
pub use injected::InjectedPointerTracker;
pub use pointer::{MAX_POINTER_COUNT, PointerId, PointerIdBits};
pub use received::ReceivedPointerTracker;
pub use state::{TouchMode, TouchState};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
