//! Match options
//!
//! Two independent extension points consulted while matching:
//!
//! - [`FixedMatchOption`] decides whether a path segment is acceptable for a
//!   fixed (literal) template part.
//! - [`VarMatchOption`] validates, and may transform, the value captured for a
//!   variable part.
//!
//! Options are held as ordered lists; the first option that accepts wins.
//! Lists are de-duplicated by identity (the same `Arc`), so binding an option at
//! construction and passing it again per call has no extra effect.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::vars::PathVars;

/// Decides whether an actual path segment matches an expected literal
pub trait FixedMatchOption: Send + Sync {
    fn matches(&self, value: &str, expected: &str, path_pos: usize, vars: &PathVars) -> bool;
}

/// Everything a [`VarMatchOption`] can see about a captured variable value
#[derive(Debug, Clone, Copy)]
pub struct VarCandidate<'a> {
    /// The captured segment (or sub-segment) text
    pub value: &'a str,
    /// Number of values collected so far in this match
    pub position: usize,
    /// Variable name (empty for positional variables)
    pub name: &'a str,
    /// The variable's anchored pattern, if it declared one
    pub regex: Option<&'a Regex>,
    /// The pattern source as written in the template (un-anchored)
    pub regex_source: &'a str,
    /// Index of the path segment being matched
    pub path_pos: usize,
    pub vars: &'a PathVars,
}

/// Validates and optionally transforms a captured variable value
pub trait VarMatchOption: Send + Sync {
    /// Whether this option has an opinion about the candidate at all
    fn applicable(&self, candidate: &VarCandidate<'_>) -> bool;

    /// Accepts the candidate, returning the (possibly transformed) value, or rejects it
    fn matches(&self, candidate: &VarCandidate<'_>) -> Option<String>;
}

/// Fixed match option accepting segments that differ from the literal only by case
///
/// # Examples
///
/// ```
/// use rhtmx_urit::{MatchOption, Template};
///
/// let template = Template::new("/foo/?/bar").unwrap();
/// assert!(template.matches("Foo/123/Bar").is_none());
/// assert!(template
///     .matches_with("Foo/123/Bar", &[MatchOption::case_insensitive_fixed()])
///     .is_some());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseInsensitiveFixed;

impl FixedMatchOption for CaseInsensitiveFixed {
    fn matches(&self, value: &str, expected: &str, _path_pos: usize, _vars: &PathVars) -> bool {
        if value.eq_ignore_ascii_case(expected) {
            return true;
        }
        !(value.is_ascii() && expected.is_ascii()) && value.to_lowercase() == expected.to_lowercase()
    }
}

static CASE_INSENSITIVE_FIXED: Lazy<Arc<CaseInsensitiveFixed>> =
    Lazy::new(|| Arc::new(CaseInsensitiveFixed));

/// A single option of either kind, as passed to template constructors and match calls
#[derive(Clone)]
pub enum MatchOption {
    Fixed(Arc<dyn FixedMatchOption>),
    Var(Arc<dyn VarMatchOption>),
}

impl MatchOption {
    pub fn fixed(option: impl FixedMatchOption + 'static) -> Self {
        MatchOption::Fixed(Arc::new(option))
    }

    pub fn var(option: impl VarMatchOption + 'static) -> Self {
        MatchOption::Var(Arc::new(option))
    }

    /// The shared case-insensitive fixed option
    ///
    /// Always the same instance, so it is never added twice to a list.
    pub fn case_insensitive_fixed() -> Self {
        MatchOption::Fixed(CASE_INSENSITIVE_FIXED.clone())
    }
}

impl fmt::Debug for MatchOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOption::Fixed(option) => write!(f, "Fixed({:p})", Arc::as_ptr(option)),
            MatchOption::Var(option) => write!(f, "Var({:p})", Arc::as_ptr(option)),
        }
    }
}

/// Outcome of consulting the var options for one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarCheck {
    /// No option was applicable
    NotApplicable,
    /// An applicable option accepted, yielding this value
    Accepted(String),
    /// At least one option was applicable and all of them declined
    Rejected,
}

/// Ordered, identity de-duplicated fixed and var option lists
#[derive(Clone, Default)]
pub struct MatchOptions {
    fixed: Vec<Arc<dyn FixedMatchOption>>,
    vars: Vec<Arc<dyn VarMatchOption>>,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds option lists, dropping repeats of the same instance
    pub fn from_options<'a, I>(options: I) -> Self
    where
        I: IntoIterator<Item = &'a MatchOption>,
    {
        options.into_iter().fold(Self::new(), |mut acc, option| {
            acc.push(option);
            acc
        })
    }

    /// Appends an option unless the same instance is already present
    pub fn push(&mut self, option: &MatchOption) {
        match option {
            MatchOption::Fixed(f) => {
                if !self.fixed.iter().any(|o| Arc::ptr_eq(o, f)) {
                    self.fixed.push(Arc::clone(f));
                }
            }
            MatchOption::Var(v) => {
                if !self.vars.iter().any(|o| Arc::ptr_eq(o, v)) {
                    self.vars.push(Arc::clone(v));
                }
            }
        }
    }

    /// Returns these options followed by any call-time options not already present
    pub fn merged(&self, extra: &[MatchOption]) -> Self {
        extra.iter().fold(self.clone(), |mut acc, option| {
            acc.push(option);
            acc
        })
    }

    pub fn fixed_count(&self) -> usize {
        self.fixed.len()
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.vars.is_empty()
    }

    /// Back to `MatchOption` values, fixed options first
    pub fn to_options(&self) -> Vec<MatchOption> {
        self.fixed
            .iter()
            .cloned()
            .map(MatchOption::Fixed)
            .chain(self.vars.iter().cloned().map(MatchOption::Var))
            .collect()
    }

    /// Whether a segment satisfies a fixed literal
    ///
    /// With no fixed options the segment must equal the literal exactly.
    /// Otherwise the options decide, and the first one that accepts wins.
    pub fn check_fixed(&self, value: &str, expected: &str, path_pos: usize, vars: &PathVars) -> bool {
        if self.fixed.is_empty() {
            return value == expected;
        }
        self.fixed
            .iter()
            .any(|option| option.matches(value, expected, path_pos, vars))
    }

    /// Consults applicable var options in order; the first acceptance wins
    pub fn check_var(&self, candidate: &VarCandidate<'_>) -> VarCheck {
        let mut applicable = false;
        for option in self.vars.iter().filter(|o| o.applicable(candidate)) {
            applicable = true;
            if let Some(value) = option.matches(candidate) {
                return VarCheck::Accepted(value);
            }
        }
        if applicable {
            VarCheck::Rejected
        } else {
            VarCheck::NotApplicable
        }
    }
}

impl fmt::Debug for MatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchOptions")
            .field("fixed", &self.fixed.len())
            .field("vars", &self.vars.len())
            .finish()
    }
}
