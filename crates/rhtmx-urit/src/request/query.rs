// File: src/request/query.rs
// Purpose: Multi-valued query parameters rendered into a query string

use crate::error::ValueError;

use super::Value;

/// Ordered, multi-valued query parameters
///
/// Rendered sorted by name unless sorting is switched off, in which case names
/// keep the order they were first added in.
///
/// # Examples
///
/// ```
/// use rhtmx_urit::QueryParams;
///
/// let params = QueryParams::from_pairs([("foo", 1), ("baz", 2), ("bar", 3)]);
/// assert_eq!(params.query_string().unwrap(), "?bar=3&baz=2&foo=1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    params: Vec<(String, Vec<Value>)>,
    sorted: bool,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            params: Vec::new(),
            sorted: true,
        }
    }
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        pairs.into_iter().fold(Self::new(), |mut params, (name, value)| {
            params.add(name, value);
            params
        })
    }

    /// Builder form of [`QueryParams::set_sorted`]
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn set_sorted(&mut self, sorted: bool) {
        self.sorted = sorted;
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    fn values(&self, name: &str) -> Option<&Vec<Value>> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// First value for a name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.get_index(name, 0)
    }

    /// Value at an index among a name's values (negative counts from the end)
    pub fn get_index(&self, name: &str, index: isize) -> Option<&Value> {
        let values = self.values(name)?;
        let i = if index < 0 {
            values.len().checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        values.get(i)
    }

    /// Replaces every value for a name with a single value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        self.del(&name);
        self.params.push((name, vec![value.into()]));
    }

    /// Appends a value for a name
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value.into()),
            None => self.params.push((name, vec![value.into()])),
        }
    }

    pub fn del(&mut self, name: &str) {
        self.params.retain(|(n, _)| n != name);
    }

    pub fn has(&self, name: &str) -> bool {
        self.values(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Renders `?name=value&...`, or an empty string when there are no parameters
    ///
    /// Names and values are percent-encoded; a null value renders its name alone.
    pub fn query_string(&self) -> Result<String, ValueError> {
        if self.params.is_empty() {
            return Ok(String::new());
        }

        let mut entries: Vec<&(String, Vec<Value>)> = self.params.iter().collect();
        if self.sorted {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
        }

        let mut pairs = Vec::new();
        for (name, values) in entries {
            let name = urlencoding::encode(name);
            for value in values {
                match value.coerce()? {
                    Some(text) => pairs.push(format!("{}={}", name, urlencoding::encode(&text))),
                    None => pairs.push(name.to_string()),
                }
            }
        }
        Ok(format!("?{}", pairs.join("&")))
    }
}
