//! Logging facade.
//!
//! With the `tracing` feature enabled the crate root re-exports the
//! [`tracing`] macros. Without it, the same names resolve to the no-op
//! macros below so call sites stay free of `cfg` attributes.
//!
//! Targets used by this crate:
//!
//! | target                   | level   | content                         |
//! |--------------------------|---------|---------------------------------|
//! | `a11y_touch::state`      | `debug` | mode transitions (`from`, `to`) |
//! | `a11y_touch::received`   | `trace` | received ledger dump            |
//! | `a11y_touch::injected`   | `trace` | injected ledger dump            |

/// Target for mode transitions.
pub const TARGET_STATE: &str = "a11y_touch::state";
/// Target for received-ledger dumps.
pub const TARGET_RECEIVED: &str = "a11y_touch::received";
/// Target for injected-ledger dumps.
pub const TARGET_INJECTED: &str = "a11y_touch::injected";

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! warn {
    ($($arg:tt)*) => {{}};
}
