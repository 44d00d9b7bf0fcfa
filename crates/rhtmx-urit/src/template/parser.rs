//! Template parsing
//!
//! Pure functional parser that turns split template segments into path parts.
//! Segments are folded through a `ParseState` accumulator which also keeps the
//! variable index and enforces that positional and named variables never mix.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::part::{CompositePart, CompositePiece, PathPart, VarPart};
use crate::splitter::{split_template, Segment, SubPartKind};

/// Accumulator for fold-based parsing
///
/// Also used to rebuild templates after composition and resolution, so the
/// single-kind rule is checked in one place.
#[derive(Debug, Default)]
pub(super) struct ParseState {
    pub(super) parts: Vec<PathPart>,
    pub(super) named_vars: HashMap<String, Vec<VarPart>>,
    pub(super) positional_count: usize,
}

impl ParseState {
    /// Registers a variable, failing as soon as both kinds have been seen
    fn with_var(mut self, var: &VarPart) -> Result<Self, ParseError> {
        if var.is_positional() {
            self.positional_count += 1;
        } else {
            self.named_vars
                .entry(var.name().to_string())
                .or_default()
                .push(var.clone());
        }

        if self.positional_count > 0 && !self.named_vars.is_empty() {
            return Err(ParseError::mixed_var_kinds());
        }
        Ok(self)
    }

    /// Appends a part and registers its variables
    pub(super) fn with_part(self, part: PathPart) -> Result<Self, ParseError> {
        let mut state = part
            .vars()
            .into_iter()
            .try_fold(self, |state, var| state.with_var(var))?;
        state.parts.push(part);
        Ok(state)
    }
}

/// Classifies a single segment into a path part (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Positional var**: a plain segment `?` (or `?name`, a shorthand named var)
/// 2. **Shorthand named var**: a plain segment `:name`
/// 3. **Fixed**: any other plain segment
/// 4. **Regions**: `{...}` regions become variables, quoted regions become
///    literals with escapes resolved, other text stays literal. A single region
///    collapses to its own part, all-literal regions collapse to one fixed part,
///    anything else is a composite.
fn classify_segment(segment: &Segment) -> Result<PathPart, ParseError> {
    if segment.is_plain() {
        let text = segment.text.as_str();
        if let Some(name) = text.strip_prefix('?') {
            return Ok(PathPart::Var(VarPart::new(name.trim())));
        }
        if let Some(name) = text.strip_prefix(':') {
            let name = name.trim();
            if name.is_empty() {
                return Err(ParseError::empty_var_name(segment.position));
            }
            return Ok(PathPart::Var(VarPart::new(name)));
        }
        return Ok(PathPart::Fixed(text.to_string()));
    }

    let mut pieces = segment
        .sub_parts
        .iter()
        .map(|sp| match sp.kind {
            SubPartKind::Brackets('{') => {
                VarPart::parse_declaration(sp.inner(), sp.position).map(CompositePiece::Var)
            }
            SubPartKind::Quotes(_) => Ok(CompositePiece::Fixed(sp.unescaped())),
            _ => Ok(CompositePiece::Fixed(sp.text.clone())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if pieces.len() == 1 {
        return Ok(match pieces.remove(0) {
            CompositePiece::Fixed(value) => PathPart::Fixed(value),
            CompositePiece::Var(var) => PathPart::Var(var),
        });
    }
    if pieces.iter().all(|p| p.var().is_none()) {
        let value = pieces.iter().filter_map(CompositePiece::fixed_value).collect();
        return Ok(PathPart::Fixed(value));
    }
    Ok(PathPart::Composite(CompositePart::new(pieces)))
}

/// Parses slash-prefixed template text (pure function)
///
/// Uses functional composition:
/// - `split_template` - bracket and quote aware segmenting
/// - `try_fold` - accumulate state through ParseState, stopping at the first error
/// - `classify_segment` - pure transformation for each segment
pub(super) fn parse_template(text: &str) -> Result<ParseState, ParseError> {
    split_template(text)?
        .iter()
        .try_fold(ParseState::default(), |state, segment| {
            state.with_part(classify_segment(segment)?)
        })
}
