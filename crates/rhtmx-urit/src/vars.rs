//! Path variable store
//!
//! An ordered, multi-valued collection of variable values. Values are kept in
//! insertion order and indexed by name, so they can be looked up positionally
//! across the whole collection or by name and occurrence. Negative indices
//! count back from the end (`-1` is the last value).
//!
//! A store is either positional or named. Adding a value of the other kind
//! fails with a [`VarsError`]; reads never fail, they just find nothing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::VarsError;

/// Kind of variables held by a store or declared by a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarsType {
    /// Unnamed (`?`) variables, addressed by position only
    Positions,
    /// Named (`{name}`, `:name`) variables
    Names,
}

/// A single extracted or supplied variable value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathVar {
    /// Variable name (empty for positional variables)
    pub name: String,
    /// 0-based index within the values sharing this name
    pub named_position: usize,
    /// 0-based index within the whole collection
    pub position: usize,
    pub value: String,
}

/// Lookup key for [`PathVars::get`]
///
/// Built from an integer (position), a `&str` (first value for a name) or a
/// `(&str, integer)` pair (a name plus an index into its values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarRef<'a> {
    Position(isize),
    Name(&'a str),
    NameAt(&'a str, isize),
}

impl From<isize> for VarRef<'_> {
    fn from(position: isize) -> Self {
        VarRef::Position(position)
    }
}

impl From<i32> for VarRef<'_> {
    fn from(position: i32) -> Self {
        VarRef::Position(position as isize)
    }
}

impl<'a> From<&'a str> for VarRef<'a> {
    fn from(name: &'a str) -> Self {
        VarRef::Name(name)
    }
}

impl<'a> From<(&'a str, isize)> for VarRef<'a> {
    fn from((name, position): (&'a str, isize)) -> Self {
        VarRef::NameAt(name, position)
    }
}

impl<'a> From<(&'a str, i32)> for VarRef<'a> {
    fn from((name, position): (&'a str, i32)) -> Self {
        VarRef::NameAt(name, position as isize)
    }
}

/// Resolves a possibly negative index against a length
fn resolve_index(len: usize, index: isize) -> Option<usize> {
    if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        let index = index as usize;
        (index < len).then_some(index)
    }
}

/// Ordered, multi-valued variable store
///
/// # Examples
///
/// ```
/// use rhtmx_urit::PathVars;
///
/// let vars = PathVars::named(&["foo", "a", "bar", "b", "bar", "c"]);
/// assert_eq!(vars.get_positional(-1), Some("c"));
/// assert_eq!(vars.get_named("bar", 1), Some("c"));
/// assert_eq!(vars.get_named_first("bar"), Some("b"));
/// assert_eq!(vars.get("foo"), Some("a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathVars {
    all: Vec<PathVar>,
    /// name → indices into `all`
    named: HashMap<String, Vec<usize>>,
    vars_type: VarsType,
}

impl PathVars {
    /// Creates an empty store of the given kind
    pub fn new(vars_type: VarsType) -> Self {
        Self {
            all: Vec::new(),
            named: HashMap::new(),
            vars_type,
        }
    }

    /// Creates a positional store from the values supplied
    pub fn positional<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vars = Self::new(VarsType::Positions);
        for value in values {
            vars.push(String::new(), value.into());
        }
        vars
    }

    /// Creates a named store from `(name, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut vars = Self::new(VarsType::Names);
        for (name, value) in pairs {
            vars.push(name.into(), value.into());
        }
        vars
    }

    /// Creates a named store from alternating names and values
    ///
    /// Fails with [`VarsError::OddNamesAndValues`] when a name has no value.
    pub fn try_named<S: AsRef<str>>(names_and_values: &[S]) -> Result<Self, VarsError> {
        if names_and_values.len() % 2 != 0 {
            return Err(VarsError::OddNamesAndValues);
        }
        Ok(Self::from_pairs(names_and_values.chunks(2).map(|pair| {
            (pair[0].as_ref().to_string(), pair[1].as_ref().to_string())
        })))
    }

    /// Same as [`PathVars::try_named`], for call sites that know the input is well formed
    ///
    /// # Panics
    ///
    /// Panics if `names_and_values` has an odd length.
    pub fn named<S: AsRef<str>>(names_and_values: &[S]) -> Self {
        match Self::try_named(names_and_values) {
            Ok(vars) => vars,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn vars_type(&self) -> VarsType {
        self.vars_type
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// All values in insertion order
    pub fn all(&self) -> &[PathVar] {
        &self.all
    }

    /// Removes every value, keeping the store's kind
    pub fn clear(&mut self) {
        self.all.clear();
        self.named.clear();
    }

    /// Value at a position across the whole store (negative counts from the end)
    pub fn get_positional(&self, position: isize) -> Option<&str> {
        resolve_index(self.all.len(), position).map(|i| self.all[i].value.as_str())
    }

    /// Value at an index among the values for `name` (negative counts from the end)
    pub fn get_named(&self, name: &str, position: isize) -> Option<&str> {
        let indices = self.named.get(name)?;
        resolve_index(indices.len(), position).map(|i| self.all[indices[i]].value.as_str())
    }

    pub fn get_named_first(&self, name: &str) -> Option<&str> {
        self.get_named(name, 0)
    }

    pub fn get_named_last(&self, name: &str) -> Option<&str> {
        self.get_named(name, -1)
    }

    /// Looks up a value by position, by name, or by name and index
    pub fn get<'a>(&self, var: impl Into<VarRef<'a>>) -> Option<&str> {
        match var.into() {
            VarRef::Position(position) => self.get_positional(position),
            VarRef::Name(name) => self.get_named_first(name),
            VarRef::NameAt(name, position) => self.get_named(name, position),
        }
    }

    /// Appends a named value; fails on a positional store
    pub fn add_named_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), VarsError> {
        if self.vars_type != VarsType::Names {
            return Err(VarsError::NotNamed);
        }
        self.push(name.into(), value.into());
        Ok(())
    }

    /// Appends a positional value; fails on a named store
    pub fn add_positional_value(&mut self, value: impl Into<String>) -> Result<(), VarsError> {
        if self.vars_type != VarsType::Positions {
            return Err(VarsError::NotPositional);
        }
        self.push(String::new(), value.into());
        Ok(())
    }

    fn push(&mut self, name: String, value: String) {
        let position = self.all.len();
        let named_position = if name.is_empty() {
            0
        } else {
            let indices = self.named.entry(name.clone()).or_default();
            indices.push(position);
            indices.len() - 1
        };
        self.all.push(PathVar {
            name,
            named_position,
            position,
            value,
        });
    }
}

impl Default for PathVars {
    fn default() -> Self {
        Self::new(VarsType::Names)
    }
}
