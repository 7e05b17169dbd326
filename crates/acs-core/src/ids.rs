//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into dense state arrays via `id.0 as usize`, but callers
//! should prefer the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in dense per-agent storage.  Max ~4.3 billion agents.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a region in the location tree.
    ///
    /// `RegionId::UNIVERSE` (id 0) is the enclosing universe: the root of the
    /// tree and the "no parent" value for top-level regions.
    pub struct RegionId(u32);
}

typed_id! {
    /// Index of a registered activity kind.
    /// Using `u16` keeps state-table strides compact (max 65,535 kinds).
    pub struct ActivityId(u16);
}

typed_id! {
    /// Monotonically increasing stamp on every issued activity request.
    /// Carries no ownership semantics — purely for traceability.
    pub struct DescriptorId(u64);
}

impl RegionId {
    /// The enclosing universe — the root region and "no parent" sentinel.
    pub const UNIVERSE: RegionId = RegionId(0);
}

impl ActivityId {
    /// The reserved "no activity" kind.  Always registered first (id 0).
    pub const NONE: ActivityId = ActivityId(0);
}

impl Default for AgentId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl Default for RegionId {
    /// Regions default to the universe root.
    #[inline(always)]
    fn default() -> Self {
        Self::UNIVERSE
    }
}

impl Default for ActivityId {
    /// Activity kinds default to the "no activity" sentinel.
    #[inline(always)]
    fn default() -> Self {
        Self::NONE
    }
}

impl Default for DescriptorId {
    #[inline(always)]
    fn default() -> Self {
        Self(0)
    }
}
