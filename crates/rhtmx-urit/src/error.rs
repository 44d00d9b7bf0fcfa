//! Error types for template parsing, path generation, variable stores and
//! request assembly.
//!
//! Every failure is a distinct, inspectable type. Matching never errors: a
//! path that does not fit a template simply yields `None`.

use thiserror::Error;

use crate::splitter::SplitError;

const EMPTY_TEMPLATE: &str = "template empty";
const EMPTY_SEGMENT: &str = "path parts cannot be empty";
const EMPTY_VAR_NAME: &str = "path var name cannot be empty";
const BAD_REGEX: &str = "path var regexp problem";
const MIXED_VAR_KINDS: &str = "template cannot contain both positional and named path variables";

/// What went wrong while parsing a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Template text was empty or whitespace only
    EmptyTemplate,
    /// A path segment between two separators was empty
    EmptySegment,
    /// A variable was declared without a name (`{}`, `{:[a-z]*}`, `:`)
    EmptyVarName,
    /// A variable's regular expression failed to compile
    BadRegex,
    /// The template mixes positional (`?`) and named variables
    MixedVarKinds,
    /// A bracket or quote was left unclosed, or closed without being opened
    Unbalanced,
}

/// Underlying cause wrapped by a [`ParseError`]
#[derive(Debug, Clone, Error)]
pub enum ParseCause {
    #[error(transparent)]
    Regex(#[from] regex::Error),
    #[error(transparent)]
    Split(#[from] SplitError),
}

/// Template parse failure
///
/// Carries the kind of failure, a human-readable message, the 0-based
/// character position in the template text and, where there is one, the
/// wrapped cause.
///
/// # Examples
///
/// ```
/// use rhtmx_urit::{ParseErrorKind, Template};
///
/// let err = Template::new("/foo//bar").unwrap_err();
/// assert_eq!(err.kind(), ParseErrorKind::EmptySegment);
/// assert_eq!(err.position(), 5);
/// assert_eq!(err.to_string(), "path parts cannot be empty");
/// ```
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseError {
    kind: ParseErrorKind,
    message: String,
    position: usize,
    #[source]
    source: Option<ParseCause>,
}

impl ParseError {
    pub fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        position: usize,
        source: Option<ParseCause>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
            source,
        }
    }

    pub(crate) fn empty_template() -> Self {
        Self::new(ParseErrorKind::EmptyTemplate, EMPTY_TEMPLATE, 0, None)
    }

    pub(crate) fn empty_segment(position: usize) -> Self {
        Self::new(ParseErrorKind::EmptySegment, EMPTY_SEGMENT, position, None)
    }

    pub(crate) fn empty_var_name(position: usize) -> Self {
        Self::new(ParseErrorKind::EmptyVarName, EMPTY_VAR_NAME, position, None)
    }

    pub(crate) fn bad_regex(position: usize, err: regex::Error) -> Self {
        Self::new(
            ParseErrorKind::BadRegex,
            BAD_REGEX,
            position,
            Some(ParseCause::Regex(err)),
        )
    }

    pub(crate) fn mixed_var_kinds() -> Self {
        Self::new(ParseErrorKind::MixedVarKinds, MIXED_VAR_KINDS, 0, None)
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 0-based character position in the template text
    pub fn position(&self) -> usize {
        self.position
    }
}

impl From<SplitError> for ParseError {
    fn from(err: SplitError) -> Self {
        Self::new(
            ParseErrorKind::Unbalanced,
            err.to_string(),
            err.position(),
            Some(ParseCause::Split(err)),
        )
    }
}

/// A value could not be coerced into its string form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("unknown value type")]
    UnknownValueType,
}

/// Path generation failure (`path_from`, `resolve_to`, `request_from`)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No value supplied for a positional slot (1-based)
    #[error("no var for varPosition {position}")]
    NoPositionalVar { position: usize },

    /// No value supplied at all for a named variable
    #[error("no var for '{name}'")]
    NoNamedVar { name: String },

    /// Not enough values supplied for a repeated named variable (1-based occurrence)
    #[error("no var for '{name}' (varPosition {position})")]
    NoNamedVarAt { name: String, position: usize },

    /// A supplied value failed its variable's pattern during a checked generation
    #[error("no match path var '{name}'")]
    NoMatch { name: String },

    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Variable store misuse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarsError {
    #[error("cannot add named var to non-names vars")]
    NotNamed,

    #[error("cannot add positional var to non-positionals vars")]
    NotPositional,

    #[error("must be a value for each name")]
    OddNamesAndValues,
}

/// Request assembly failure
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    InvalidMethod(#[from] http::method::InvalidMethod),

    #[error(transparent)]
    Http(#[from] http::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_error_display_is_message() {
        let err = ParseError::new(ParseErrorKind::EmptySegment, "fooey", 16, None);
        assert_eq!(err.to_string(), "fooey");
        assert_eq!(err.position(), 16);
        assert!(err.source().is_none());
    }

    #[test]
    fn test_parse_error_wraps_regex_error() {
        let regex_err = regex::Regex::new("[").unwrap_err();
        let err = ParseError::bad_regex(8, regex_err);
        assert_eq!(err.kind(), ParseErrorKind::BadRegex);
        assert_eq!(err.to_string(), "path var regexp problem");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_parse_error_from_split_error() {
        let err: ParseError = SplitError::Unclosed { ch: '{', position: 5 }.into();
        assert_eq!(err.kind(), ParseErrorKind::Unbalanced);
        assert_eq!(err.to_string(), "unclosed '{' at position 5");
        assert_eq!(err.position(), 5);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_generation_error_messages() {
        assert_eq!(
            GenerationError::NoPositionalVar { position: 3 }.to_string(),
            "no var for varPosition 3"
        );
        assert_eq!(
            GenerationError::NoNamedVar { name: "bar".into() }.to_string(),
            "no var for 'bar'"
        );
        assert_eq!(
            GenerationError::NoNamedVarAt { name: "bar".into(), position: 2 }.to_string(),
            "no var for 'bar' (varPosition 2)"
        );
        assert_eq!(
            GenerationError::from(ValueError::UnknownValueType).to_string(),
            "unknown value type"
        );
    }
}
