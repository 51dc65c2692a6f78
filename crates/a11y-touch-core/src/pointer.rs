#![forbid(unsafe_code)]

//! Pointer identity and pointer-id bitsets.
//!
//! Platform pointer ids live in `0..32`. [`PointerId`] makes that bound part
//! of the type, so every bit operation on a [`PointerIdBits`] and every index
//! into a per-pointer table is in range by construction.

use std::fmt;

use crate::error::{Result, TouchError};

/// Number of distinct pointer ids the platform hands out.
pub const MAX_POINTER_COUNT: usize = 32;

/// A pointer id in `0..MAX_POINTER_COUNT`.
///
/// Ids are reused by the platform once a pointer lifts, so anything keyed by
/// a `PointerId` must be cleared when the pointer goes up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointerId(u8);

impl PointerId {
    /// Create a pointer id, rejecting values outside `0..32`.
    pub fn new(id: u32) -> Result<Self> {
        if (id as usize) < MAX_POINTER_COUNT {
            Ok(Self(id as u8))
        } else {
            Err(TouchError::PointerIdOutOfRange { id })
        }
    }

    /// The raw id.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The id as a table index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Single-bit mask for this id.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u32 {
        1 << self.0
    }

    /// Every valid id in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..MAX_POINTER_COUNT as u8).map(Self)
    }
}

impl TryFrom<u32> for PointerId {
    type Error = TouchError;

    fn try_from(id: u32) -> Result<Self> {
        Self::new(id)
    }
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of pointer ids, one bit per id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerIdBits(u32);

impl PointerIdBits {
    /// No pointers.
    pub const EMPTY: Self = Self(0);
    /// Every pointer id.
    pub const ALL: Self = Self(0xFFFF_FFFF);

    /// Wrap a raw bit field.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bit field.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Population count.
    #[inline]
    #[must_use]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, id: PointerId) -> bool {
        self.0 & id.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, id: PointerId) {
        self.0 |= id.bit();
    }

    #[inline]
    pub fn remove(&mut self, id: PointerId) {
        self.0 &= !id.bit();
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Lowest id in the set.
    #[inline]
    #[must_use]
    pub fn first(self) -> Option<PointerId> {
        if self.0 == 0 {
            None
        } else {
            Some(PointerId(self.0.trailing_zeros() as u8))
        }
    }

    /// Ids in the set, ascending.
    #[must_use]
    pub fn iter(self) -> PointerIdIter {
        PointerIdIter { remaining: self.0 }
    }
}

impl IntoIterator for PointerIdBits {
    type Item = PointerId;
    type IntoIter = PointerIdIter;

    fn into_iter(self) -> PointerIdIter {
        self.iter()
    }
}

impl FromIterator<PointerId> for PointerIdBits {
    fn from_iter<I: IntoIterator<Item = PointerId>>(iter: I) -> Self {
        let mut bits = Self::EMPTY;
        for id in iter {
            bits.insert(id);
        }
        bits
    }
}

/// Renders as `[ 0 3 7 ]`.
impl fmt::Display for PointerIdBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for id in self.iter() {
            write!(f, "{id} ")?;
        }
        f.write_str("]")
    }
}

/// Ascending iterator over the ids of a [`PointerIdBits`].
#[derive(Debug, Clone)]
pub struct PointerIdIter {
    remaining: u32,
}

impl Iterator for PointerIdIter {
    type Item = PointerId;

    fn next(&mut self) -> Option<PointerId> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.remaining.trailing_zeros();
        self.remaining &= self.remaining - 1;
        Some(PointerId(id as u8))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for PointerIdIter {}
