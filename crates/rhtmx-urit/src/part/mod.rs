//! Path parts
//!
//! A compiled template is a sequence of [`PathPart`]s, one per path segment.
//! Each part knows how to match a segment, render itself back to text from a
//! set of variable values, and print its canonical template form.

use regex::Regex;

use crate::error::{GenerationError, ParseError};
use crate::options::{MatchOptions, VarCandidate, VarCheck};
use crate::tracker::PositionsTracker;
use crate::vars::PathVars;

mod composite;

pub use composite::{CompositePart, CompositePiece};

/// Anchors a pattern at both ends unless it already is
///
/// # Examples
///
/// ```
/// use rhtmx_urit::part::add_anchors;
///
/// assert_eq!(add_anchors("[a-z]*"), "^[a-z]*$");
/// assert_eq!(add_anchors("^[a-z]*$"), "^[a-z]*$");
/// ```
pub fn add_anchors(source: &str) -> String {
    let head = if source.starts_with('^') { "" } else { "^" };
    let tail = if source.ends_with('$') { "" } else { "$" };
    format!("{}{}{}", head, source, tail)
}

/// Removes a leading `^` and a trailing `$`
pub fn strip_anchors(source: &str) -> &str {
    let source = source.strip_prefix('^').unwrap_or(source);
    source.strip_suffix('$').unwrap_or(source)
}

// ============================================================================
// Variable part
// ============================================================================

/// A variable declaration: `?`, `:name`, `{name}` or `{name:regex}`
#[derive(Debug, Clone)]
pub struct VarPart {
    name: String,
    regex: Option<Regex>,
    regex_source: String,
}

impl VarPart {
    /// A variable with no pattern; an empty name makes it positional
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regex: None,
            regex_source: String::new(),
        }
    }

    /// A named variable constrained by a pattern
    ///
    /// The source is trimmed and anchored before compiling.
    pub fn with_regex(name: impl Into<String>, source: &str) -> Result<Self, regex::Error> {
        let source = source.trim();
        let regex = if source.is_empty() {
            None
        } else {
            Some(Regex::new(&add_anchors(source))?)
        };
        Ok(Self {
            name: name.into(),
            regex,
            regex_source: source.to_string(),
        })
    }

    /// Parses the interior of a `{...}` declaration
    ///
    /// `position` is the character position of the opening bracket; errors
    /// are reported relative to it.
    pub(crate) fn parse_declaration(interior: &str, position: usize) -> Result<Self, ParseError> {
        let Some((name, source)) = interior.split_once(':') else {
            let name = interior.trim();
            if name.is_empty() {
                return Err(ParseError::empty_var_name(position));
            }
            return Ok(Self::new(name));
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::empty_var_name(position));
        }
        let colon_at = interior.chars().take_while(|c| *c != ':').count();
        Self::with_regex(name, source).map_err(|err| ParseError::bad_regex(position + colon_at, err))
    }

    /// Name of the variable; empty for a positional variable
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_positional(&self) -> bool {
        self.name.is_empty()
    }

    /// The anchored, compiled pattern
    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    /// The pattern as written (trimmed, not anchored); empty when there is none
    pub fn regex_source(&self) -> &str {
        &self.regex_source
    }

    /// Canonical template text for this variable
    pub fn canonical(&self, strip_regex: bool) -> String {
        if self.is_positional() {
            "?".to_string()
        } else if strip_regex || self.regex_source.is_empty() {
            format!("{{{}}}", self.name)
        } else {
            format!("{{{}:{}}}", self.name, self.regex_source)
        }
    }

    /// Runs the var options over a candidate value
    ///
    /// `pattern_ok` is the result of the variable's own pattern; it stands only
    /// when no option is applicable.
    fn accept(
        &self,
        value: &str,
        pattern_ok: bool,
        path_pos: usize,
        vars: &PathVars,
        options: &MatchOptions,
    ) -> VarCheck {
        let candidate = VarCandidate {
            value,
            position: vars.len(),
            name: &self.name,
            regex: self.regex.as_ref(),
            regex_source: &self.regex_source,
            path_pos,
            vars,
        };
        match options.check_var(&candidate) {
            VarCheck::NotApplicable if pattern_ok => VarCheck::Accepted(value.to_string()),
            VarCheck::NotApplicable => VarCheck::Rejected,
            outcome => outcome,
        }
    }

    /// Adds a matched value to the store under this variable's kind
    fn record(&self, vars: &mut PathVars, value: String) -> bool {
        let added = if self.is_positional() {
            vars.add_positional_value(value)
        } else {
            vars.add_named_value(self.name.as_str(), value)
        };
        match added {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(name = %self.name, %err, "matched value rejected by store");
                false
            }
        }
    }
}

// ============================================================================
// Path part
// ============================================================================

/// One compiled path segment
#[derive(Debug, Clone)]
pub enum PathPart {
    /// Literal text
    Fixed(String),
    /// A whole-segment variable
    Var(VarPart),
    /// Literal text and variables fused into one segment
    Composite(CompositePart),
}

impl PathPart {
    pub fn is_fixed(&self) -> bool {
        matches!(self, PathPart::Fixed(_))
    }

    /// The literal value of a fixed part
    pub fn fixed_value(&self) -> Option<&str> {
        match self {
            PathPart::Fixed(value) => Some(value),
            _ => None,
        }
    }

    /// The variable of a whole-segment variable part
    pub fn var(&self) -> Option<&VarPart> {
        match self {
            PathPart::Var(var) => Some(var),
            _ => None,
        }
    }

    pub fn composite(&self) -> Option<&CompositePart> {
        match self {
            PathPart::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    /// Every variable declared by this part, in order
    pub fn vars(&self) -> Vec<&VarPart> {
        match self {
            PathPart::Fixed(_) => Vec::new(),
            PathPart::Var(var) => vec![var],
            PathPart::Composite(composite) => composite.vars().collect(),
        }
    }

    /// Matches one path segment, recording any variable values
    pub fn matches(
        &self,
        segment: &str,
        path_pos: usize,
        vars: &mut PathVars,
        options: &MatchOptions,
    ) -> bool {
        match self {
            PathPart::Fixed(expected) => options.check_fixed(segment, expected, path_pos, vars),
            PathPart::Var(var) => {
                let pattern_ok = var.regex.as_ref().map_or(true, |rx| rx.is_match(segment));
                match var.accept(segment, pattern_ok, path_pos, vars, options) {
                    VarCheck::Accepted(value) => var.record(vars, value),
                    _ => false,
                }
            }
            PathPart::Composite(composite) => composite.matches(segment, path_pos, vars, options),
        }
    }

    /// Renders the segment text (without its leading separator)
    pub(crate) fn render(&self, tracker: &mut PositionsTracker<'_>) -> Result<String, GenerationError> {
        match self {
            PathPart::Fixed(value) => Ok(value.clone()),
            PathPart::Var(var) => tracker.next_value(var),
            PathPart::Composite(composite) => composite.render(tracker),
        }
    }

    /// Canonical template text for this segment
    pub fn canonical(&self, strip_regex: bool) -> String {
        match self {
            PathPart::Fixed(value) => value.clone(),
            PathPart::Var(var) => var.canonical(strip_regex),
            PathPart::Composite(composite) => composite.canonical(strip_regex),
        }
    }
}
