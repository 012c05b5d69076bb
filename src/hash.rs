//! Stable hashing used for report fingerprints.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::types::HashPart;

/// Seed mixed into every report fingerprint.
pub const FINGERPRINT_SEED: u64 = 0x7472_696f_735f_7631;

/// Run `f` against a fresh hasher and return the digest.
pub fn stable_hash_with(f: impl FnOnce(&mut DefaultHasher)) -> u64 {
    let mut hasher = DefaultHasher::new();
    f(&mut hasher);
    hasher.finish()
}

/// Hash a single string under `seed`.
pub fn stable_hash_str(seed: u64, value: &str) -> u64 {
    stable_hash_with(|hasher| {
        seed.hash(hasher);
        value.hash(hasher);
    })
}

/// Order-sensitive digest of a sequence of row fragments.
pub fn fingerprint_parts<'a>(seed: u64, parts: impl IntoIterator<Item = &'a HashPart>) -> u64 {
    stable_hash_with(|hasher| {
        seed.hash(hasher);
        for part in parts {
            stable_hash_str(seed, part).hash(hasher);
        }
    })
}
