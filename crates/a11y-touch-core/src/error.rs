use thiserror::Error;

use crate::pointer::MAX_POINTER_COUNT;

pub type Result<T> = std::result::Result<T, TouchError>;

/// Validation failures at the edges of the crate.
///
/// The ledgers and the mode state machine never fail; every value that
/// reaches them has already been checked by one of the constructors that
/// return this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TouchError {
    #[error("pointer id {id} out of range (max {max})", max = MAX_POINTER_COUNT - 1)]
    PointerIdOutOfRange { id: u32 },

    #[error("motion event carries no pointers")]
    NoPointers,

    #[error("motion event carries {count} pointers (max {max})", max = MAX_POINTER_COUNT)]
    TooManyPointers { count: usize },

    #[error("action index {index} out of bounds for {count} pointers")]
    ActionIndexOutOfBounds { index: usize, count: usize },

    #[error("pointer id {id} appears more than once in one motion event")]
    DuplicatePointerId { id: u8 },

    #[error("unknown masked motion action: {code}")]
    UnknownAction { code: u32 },
}
