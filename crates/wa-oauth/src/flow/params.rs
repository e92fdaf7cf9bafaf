//! Ordered OAuth parameter sets
//!
//! Signature computation sorts parameters lexicographically while the
//! Authorization header renders them in the order they were added, so the
//! container keeps insertion order and exposes a sorted view instead of
//! committing to one ordering.

use serde::{Deserialize, Serialize};

/// String key-value parameter set with unique keys and preserved insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    entries: Vec<(String, String)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter. An existing key keeps its position; only the
    /// value is replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a parameter, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs in ascending lexicographic key order, independent of insertion
    /// order.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse an `&`-joined `key=value` string (token-exchange response body,
    /// redirect fragment, or query string). A segment without `=` becomes a
    /// key with an empty value.
    pub fn parse(input: &str) -> Self {
        let mut params = Self::new();
        for segment in input.split('&').filter(|s| !s.is_empty()) {
            match segment.split_once('=') {
                Some((key, value)) => params.insert(key, value),
                None => params.insert(segment, ""),
            }
        }
        params
    }

    /// Render as `key=value` pairs sorted by key and joined by `&`.
    pub fn to_query_string(&self) -> String {
        self.sorted()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl FromIterator<(String, String)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut params = ParameterSet::new();
        params.insert("zeta", "1");
        params.insert("alpha", "2");
        params.insert("mid", "3");

        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = ParameterSet::new();
        params.insert("a", "1");
        params.insert("b", "2");
        params.insert("a", "updated");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some("updated"));
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_sorted_ignores_insertion_order() {
        let mut params = ParameterSet::new();
        params.insert("oauth_version", "1.0");
        params.insert("oauth_consumer_key", "ck");
        params.insert("oauth_nonce", "n");

        let keys: Vec<&str> = params.sorted().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["oauth_consumer_key", "oauth_nonce", "oauth_version"]);
    }

    #[test]
    fn test_parse_response_body() {
        let params = ParameterSet::parse("oauth_token=T1&oauth_token_secret=S1");
        assert_eq!(params.get("oauth_token"), Some("T1"));
        assert_eq!(params.get("oauth_token_secret"), Some("S1"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_parse_segment_without_value() {
        let params = ParameterSet::parse("flag&key=value");
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("key"), Some("value"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(ParameterSet::parse("").is_empty());
    }

    #[test]
    fn test_remove() {
        let mut params = ParameterSet::parse("a=1&b=2");
        assert_eq!(params.remove("a"), Some("1".to_string()));
        assert_eq!(params.remove("a"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_to_query_string_sorted() {
        let mut params = ParameterSet::new();
        params.insert("b", "2");
        params.insert("a", "1");
        params.insert("c", "3");
        assert_eq!(params.to_query_string(), "a=1&b=2&c=3");
    }
}
