//! Insertion-ordered name/value mapping for path parameters and query pairs.
//!
//! Keys are unique: inserting an existing key replaces its value in place and
//! keeps the position of the first insertion, so rendering order is stable.

use std::fmt::Display;

/// Ordered mapping of names to rendered values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParamMap {
    pairs: Vec<(String, String)>,
}

impl ParamMap {
    /// Create a new, empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Insert a pair, overwriting the value of an existing key.
    ///
    /// Returns the previous value when the key was already present.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Display,
    {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    /// Merge another mapping into this one; incoming keys win.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.pairs {
            self.insert(key, value);
        }
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no pairs have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ParamMap
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for ParamMap
where
    K: Into<String>,
    V: Display,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ParamMap;

    #[test]
    fn test_insert_keeps_insertion_order() {
        let mut map = ParamMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("b", "2"), ("a", "1")]);
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut map = ParamMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.insert("a", "x"), Some("1".to_string()));
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("a", "x"), ("b", "2")]);
    }

    #[test]
    fn test_merge_incoming_wins() {
        let mut map: ParamMap = [("userId", "1"), ("page", "2")].into_iter().collect();
        map.merge([("userId", "54298"), ("sort", "asc")].into_iter().collect());
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            vec![("userId", "54298"), ("page", "2"), ("sort", "asc")]
        );
    }
}
