pub mod generate;
pub mod matches;
pub mod resolve;
pub mod vars;

use anyhow::{bail, Result};
use rhtmx_urit::{PathVars, Template, VarsType};

/// Builds a variable store from command line values
///
/// Positional templates take bare values in order; named templates take
/// `name=value` pairs (a name may repeat).
pub fn path_vars(template: &Template, values: &[String]) -> Result<PathVars> {
    if template.vars_type() == VarsType::Positions {
        return Ok(PathVars::positional(values.iter().cloned()));
    }

    let pairs = values
        .iter()
        .map(|value| match value.split_once('=') {
            Some((name, value)) => Ok((name.trim(), value)),
            None => bail!("Expected name=value, got {:?}", value),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(PathVars::from_pairs(pairs))
}
