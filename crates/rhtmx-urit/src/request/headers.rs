// File: src/request/headers.rs
// Purpose: Request headers with coercible values

use std::collections::HashMap;

use crate::error::ValueError;

use super::Value;

/// Single-valued request headers, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers {
    entries: Vec<(String, Value)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later pairs replace earlier ones with the same name
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        pairs.into_iter().fold(Self::new(), |mut headers, (name, value)| {
            headers.set(name, value);
            headers
        })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn del(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every header with its value coerced to text
    ///
    /// Fails with [`ValueError::UnknownValueType`] on a null value or one that
    /// has no text form.
    pub fn to_map(&self) -> Result<HashMap<String, String>, ValueError> {
        self.entries
            .iter()
            .map(|(name, value)| Ok((name.clone(), value.to_text()?)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_map() {
        assert!(Headers::new().to_map().unwrap().is_empty());

        let headers = Headers::from_pairs([("foo", 1.23)]);
        let map = headers.to_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["foo"], "1.23");

        let headers = Headers::from_pairs([("foo", Value::Null)]);
        assert_eq!(headers.to_map(), Err(ValueError::UnknownValueType));

        let headers = Headers::from_pairs([("foo", Value::lazy(|| None))]);
        assert_eq!(headers.to_map().unwrap_err().to_string(), "unknown value type");
    }

    #[test]
    fn test_get_set() {
        let mut headers = Headers::from_pairs([("foo", 1)]);
        assert_eq!(headers.get("foo"), Some(&Value::Int(1)));
        headers.set("foo", 2);
        assert_eq!(headers.get("foo"), Some(&Value::Int(2)));
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("bar"), None);
    }

    #[test]
    fn test_has_del() {
        let mut headers = Headers::from_pairs([("foo", 1)]);
        let copy = headers.clone();
        assert!(headers.has("foo"));
        headers.del("foo");
        assert!(!headers.has("foo"));
        assert!(!headers.has("bar"));
        assert!(copy.has("foo"));
    }
}
