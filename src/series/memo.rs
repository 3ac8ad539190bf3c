use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Recompute-on-dependency-change wrapper for the pure series builders.
///
/// The builders themselves stay plain functions; embedders that rebuild the
/// same view repeatedly key a `Memo` on a hash of the builder inputs (filter
/// query, row count, palette) and skip the rebuild when the key is unchanged.
#[derive(Debug, Default)]
pub struct Memo<V> {
    cache: HashMap<u64, V>,
}

impl<V: Clone> Memo<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    pub fn get_or_build<K: Hash>(&mut self, key: &K, build: impl FnOnce() -> V) -> V {
        let hash = hash_key(key);
        if let Some(cached) = self.cache.get(&hash) {
            return cached.clone();
        }
        let value = build();
        self.cache.insert(hash, value.clone());
        value
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn hash_key<K: Hash>(key: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}
