use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Identity carried by a keyed scope.
///
/// Positional and textual keys are hashed with a domain tag, so the index `0` and
/// the string `"0"` produce different keys.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(u64);

impl Key {
    fn hashed<T: Hash + ?Sized>(domain: u8, value: &T) -> Self {
        let mut hasher = FxHasher::default();
        domain.hash(&mut hasher);
        value.hash(&mut hasher);
        Self(hasher.finish())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::hashed(0, &index)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::hashed(1, value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::from(value.as_str())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::from(value.as_str())
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:#x})", self.0)
    }
}
