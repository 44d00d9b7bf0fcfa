//! Value tracker used while generating or resolving paths
//!
//! In positional mode every variable pulls the next value from one running
//! index. In named mode each name keeps its own counter, so repeated uses of
//! a name pull successive values supplied under that name.

use std::collections::HashMap;

use crate::error::GenerationError;
use crate::part::VarPart;
use crate::vars::PathVars;

pub(crate) struct PositionsTracker<'a> {
    vars: &'a PathVars,
    positional: bool,
    position: usize,
    named_positions: HashMap<String, usize>,
    check_regex: bool,
}

impl<'a> PositionsTracker<'a> {
    pub(crate) fn new(vars: &'a PathVars, positional: bool) -> Self {
        Self {
            vars,
            positional,
            position: 0,
            named_positions: HashMap::new(),
            check_regex: false,
        }
    }

    /// Requires every pulled value to satisfy its variable's pattern
    pub(crate) fn with_regex_check(mut self, check_regex: bool) -> Self {
        self.check_regex = check_regex;
        self
    }

    /// Pulls the next value for a variable, advancing the relevant counter
    pub(crate) fn next_value(&mut self, var: &VarPart) -> Result<String, GenerationError> {
        let vars = self.vars;
        let value = if self.positional {
            let value = vars
                .get_positional(self.position as isize)
                .ok_or(GenerationError::NoPositionalVar {
                    position: self.position + 1,
                })?;
            self.position += 1;
            value
        } else {
            let np = self.named_positions.get(var.name()).copied().unwrap_or(0);
            let value = match vars.get_named(var.name(), np as isize) {
                Some(value) => value,
                None if np == 0 => {
                    return Err(GenerationError::NoNamedVar {
                        name: var.name().to_string(),
                    })
                }
                None => {
                    return Err(GenerationError::NoNamedVarAt {
                        name: var.name().to_string(),
                        position: np + 1,
                    })
                }
            };
            self.named_positions.insert(var.name().to_string(), np + 1);
            value
        };

        if self.check_regex {
            if let Some(rx) = var.regex() {
                if !rx.is_match(value) {
                    return Err(GenerationError::NoMatch {
                        name: var.name().to_string(),
                    });
                }
            }
        }
        Ok(value.to_string())
    }
}
