use ahash::{AHasher, RandomState};
use std::fmt;
use std::hash::BuildHasher;

/// Keyed hash function used by [`SwissTable`](crate::SwissTable) by default.
///
/// The seed is chosen when the hasher is built and never changes afterwards, so hashes are stable
/// for the lifetime of the table that owns it. `new` draws a random seed, which keeps adversarial
/// key sets from forcing long probe chains.
#[derive(Clone)]
pub struct KeyedHasher {
    state: RandomState,
}

impl KeyedHasher {
    pub fn new() -> Self {
        Self {
            state: RandomState::new(),
        }
    }
    /// Deterministic hasher, the same `seed` always yields the same hashes within one build.
    pub fn with_seed(seed: u64) -> Self {
        let k0 = mix64(seed);
        let k1 = mix64(k0);
        let k2 = mix64(k1);
        let k3 = mix64(k2);
        Self {
            state: RandomState::with_seeds(k0, k1, k2, k3),
        }
    }
}

impl Default for KeyedHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildHasher for KeyedHasher {
    type Hasher = AHasher;

    #[inline(always)]
    fn build_hasher(&self) -> AHasher {
        self.state.build_hasher()
    }
}

impl fmt::Debug for KeyedHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedHasher").finish_non_exhaustive()
    }
}

// splitmix64 finalizer, spreads one seed word over the four ahash keys.
#[inline(always)]
fn mix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

#[cfg(test)]
mod tests {
    use super::KeyedHasher;
    use std::hash::BuildHasher;

    #[test]
    fn same_seed_same_hash() {
        let a = KeyedHasher::with_seed(7);
        let b = KeyedHasher::with_seed(7);
        assert_eq!(a.hash_one("swiss"), b.hash_one("swiss"));
        assert_eq!(a.hash_one(42u64), b.hash_one(42u64));
    }

    #[test]
    fn different_seeds_differ() {
        let a = KeyedHasher::with_seed(1);
        let b = KeyedHasher::with_seed(2);
        let differ = (0u64..64).any(|i| a.hash_one(i) != b.hash_one(i));
        assert!(differ);
    }

    #[test]
    fn stable_for_one_instance() {
        let hasher = KeyedHasher::new();
        let first = hasher.hash_one("key");
        for _ in 0..16 {
            assert_eq!(hasher.hash_one("key"), first);
        }
    }
}
