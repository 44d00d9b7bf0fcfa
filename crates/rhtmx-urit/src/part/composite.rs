//! Composite segments such as `--{foo}-{bar:[0-9]+}--`
//!
//! A composite matches atomically through one combined pattern. Literal pieces
//! are embedded escaped, variable pieces become named capture groups; the group
//! index of each variable piece is worked out once, alongside the pattern.

use once_cell::sync::OnceCell;
use regex::Regex;

use super::{add_anchors, strip_anchors, VarPart};
use crate::error::GenerationError;
use crate::options::{MatchOptions, VarCheck};
use crate::tracker::PositionsTracker;
use crate::vars::PathVars;

const GROUP_PREFIX: &str = "vsp";

/// One piece of a composite segment
#[derive(Debug, Clone)]
pub enum CompositePiece {
    Fixed(String),
    Var(VarPart),
}

impl CompositePiece {
    pub fn fixed_value(&self) -> Option<&str> {
        match self {
            CompositePiece::Fixed(value) => Some(value),
            CompositePiece::Var(_) => None,
        }
    }

    pub fn var(&self) -> Option<&VarPart> {
        match self {
            CompositePiece::Fixed(_) => None,
            CompositePiece::Var(var) => Some(var),
        }
    }
}

/// Combined pattern plus, for each piece, the capture group holding its value
#[derive(Debug, Clone)]
struct OverallRegex {
    regex: Regex,
    groups: Vec<Option<usize>>,
}

/// Literal text and variables sharing one path segment
#[derive(Debug, Clone)]
pub struct CompositePart {
    pieces: Vec<CompositePiece>,
    overall: OnceCell<Option<OverallRegex>>,
}

impl CompositePart {
    pub fn new(pieces: Vec<CompositePiece>) -> Self {
        Self {
            pieces,
            overall: OnceCell::new(),
        }
    }

    pub fn pieces(&self) -> &[CompositePiece] {
        &self.pieces
    }

    pub fn vars(&self) -> impl Iterator<Item = &VarPart> {
        self.pieces.iter().filter_map(CompositePiece::var)
    }

    /// The combined, anchored pattern; built on first use
    ///
    /// `None` if the pieces do not form a valid pattern, in which case the
    /// segment never matches.
    pub fn overall_regex(&self) -> Option<&Regex> {
        self.overall().map(|overall| &overall.regex)
    }

    fn overall(&self) -> Option<&OverallRegex> {
        self.overall
            .get_or_init(|| {
                let source = self.combined_source();
                match Regex::new(&source) {
                    Ok(regex) => {
                        let groups = group_indices(&regex, self.pieces.len());
                        Some(OverallRegex { regex, groups })
                    }
                    Err(err) => {
                        tracing::warn!(%source, %err, "composite segment pattern failed to compile");
                        None
                    }
                }
            })
            .as_ref()
    }

    fn combined_source(&self) -> String {
        let body: String = self
            .pieces
            .iter()
            .enumerate()
            .map(|(i, piece)| match piece {
                CompositePiece::Fixed(value) => regex::escape(value),
                CompositePiece::Var(var) if var.regex_source().is_empty() => {
                    format!("(?P<{}{}>.*)", GROUP_PREFIX, i)
                }
                CompositePiece::Var(var) => {
                    format!("(?P<{}{}>{})", GROUP_PREFIX, i, strip_anchors(var.regex_source()))
                }
            })
            .collect();
        add_anchors(&body)
    }

    /// Matches the whole segment, then hands each captured value to the var options
    ///
    /// A value declined by an applicable option is left out of the store; the
    /// segment itself still matches.
    pub(crate) fn matches(
        &self,
        segment: &str,
        path_pos: usize,
        vars: &mut PathVars,
        options: &MatchOptions,
    ) -> bool {
        let Some(overall) = self.overall() else {
            return false;
        };
        let Some(captures) = overall.regex.captures(segment) else {
            return false;
        };

        for (i, piece) in self.pieces.iter().enumerate() {
            let CompositePiece::Var(var) = piece else {
                continue;
            };
            let value = overall.groups[i]
                .and_then(|group| captures.get(group))
                .map_or("", |m| m.as_str());
            match var.accept(value, true, path_pos, vars, options) {
                VarCheck::Accepted(value) => {
                    if !var.record(vars, value) {
                        return false;
                    }
                }
                _ => {
                    tracing::trace!(name = %var.name(), value, "composite value declined by option");
                }
            }
        }
        true
    }

    pub(crate) fn render(&self, tracker: &mut PositionsTracker<'_>) -> Result<String, GenerationError> {
        self.pieces.iter().try_fold(String::new(), |mut out, piece| {
            match piece {
                CompositePiece::Fixed(value) => out.push_str(value),
                CompositePiece::Var(var) => out.push_str(&tracker.next_value(var)?),
            }
            Ok::<_, GenerationError>(out)
        })
    }

    pub fn canonical(&self, strip_regex: bool) -> String {
        self.pieces
            .iter()
            .map(|piece| match piece {
                CompositePiece::Fixed(value) => value.clone(),
                CompositePiece::Var(var) => var.canonical(strip_regex),
            })
            .collect()
    }
}

/// Maps piece index to capture group index via the `vsp{i}` group names
fn group_indices(regex: &Regex, pieces: usize) -> Vec<Option<usize>> {
    let mut groups = vec![None; pieces];
    for (group, name) in regex.capture_names().enumerate() {
        let piece = name
            .and_then(|n| n.strip_prefix(GROUP_PREFIX))
            .and_then(|n| n.parse::<usize>().ok());
        if let Some(slot) = piece.and_then(|p| groups.get_mut(p)) {
            *slot = Some(group);
        }
    }
    groups
}
