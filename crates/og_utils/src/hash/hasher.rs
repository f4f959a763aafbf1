//! Hash states used across the workspace.
//!
//! `FixedHashState` wraps `foldhash` with a constant seed, so structural hashes
//! of objects are stable within one build. `NoOpHashState` forwards a `u64`
//! unchanged and only suits keys that are already hashes, like `TypeId`.

use core::fmt::Debug;
use core::hash::{BuildHasher, Hash, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6F67_5F73_6572_6961);

/// The hasher built by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A `foldhash` state with a constant seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use og_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("engine");
/// let b = FixedHashState.hash_one("engine");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// Hashes `value` with [`FixedHashState`].
#[inline]
pub fn fixed_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    FixedHashState.hash_one(value)
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// Passes the last written `u64` through as the hash.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // `TypeId` writes a u64 or u128 in practice; fold anything else in.
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use og_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// 7_u64.hash(&mut hasher);
/// assert_eq!(hasher.finish(), 7);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}
