// Basic FNV-1a hash as described:
// https://en.wikipedia.org/wiki/Fowler%E2%80%93Noll%E2%80%93Vo_hash_function
//
// Regex values cache a structural hash computed with this hasher when they
// are constructed. And/Or members are sorted by that hash first, so it must
// not depend on per-process keys. The maps keyed by regexes and symbols
// during compilation use it too.

use std::collections::HashMap as StdHashMap;
use std::hash::{self, BuildHasherDefault};

const PRIME: u64 = 1099511628211;
const INIT: u64 = 14695981039346656037;

pub(crate) type HashMap<K, V> =
    StdHashMap<K, V, BuildHasherDefault<Hasher>>;

#[derive(Debug)]
pub(crate) struct Hasher(u64);

#[cfg(test)]
impl Hasher {
    /// Hash a single value from a fresh state.
    pub(crate) fn one<H: hash::Hash + ?Sized>(value: &H) -> u64 {
        let mut h = Hasher::default();
        value.hash(&mut h);
        hash::Hasher::finish(&h)
    }
}

impl Default for Hasher {
    fn default() -> Hasher {
        Hasher(INIT)
    }
}

impl hash::Hasher for Hasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter() {
            self.0 = self.0 ^ (*byte as u64);
            self.0 = self.0.wrapping_mul(PRIME);
        }
    }
}
