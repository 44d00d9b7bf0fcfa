use anyhow::{Context, Result};
use colored::Colorize;
use rhtmx_urit::Template;

use super::path_vars;

pub fn execute(template: &Template, values: &[String]) -> Result<()> {
    let vars = path_vars(template, values)?;
    let resolved = template
        .resolve_to(&vars)
        .with_context(|| format!("Cannot resolve {}", template))?;

    let remaining = resolved.positional_count() + resolved.named_count();
    println!("{}", resolved.source());
    if remaining > 0 {
        eprintln!("{}", format!("{} variable(s) left unresolved", remaining).yellow());
    }
    Ok(())
}
