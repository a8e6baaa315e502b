//! Utility traits for [`ProbingMap`]

use crate::ProbingMap;
use std::hash::Hash;

/// Extension trait providing convenience views over a map's contents
pub trait MapExtensions<K, V> {
    /// Returns the real (non-nil) keys of the map as a `Vec`
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the map as a `Vec`, the nil key's value
    /// included
    fn values(&self) -> Vec<V>;

    /// Returns true if the map contains the given real key
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized;
}

impl<K, V> MapExtensions<K, V> for ProbingMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn keys(&self) -> Vec<K> {
        self.iter().filter_map(|(k, _)| k.cloned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }
}
