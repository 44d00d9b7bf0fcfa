use anyhow::{bail, Context, Result};
use rhtmx_urit::{Host, PathFromOptions, QueryParams, Template};

use super::path_vars;

pub fn execute(
    template: &Template,
    values: &[String],
    host: Option<Host>,
    query: &[String],
    check: bool,
) -> Result<()> {
    let vars = path_vars(template, values)?;

    let mut options = PathFromOptions::new();
    if let Some(host) = host {
        options = options.with_host(host);
    }
    if !query.is_empty() {
        options = options.with_query(query_params(query)?);
    }
    if check {
        options = options.with_regex_check();
    }

    let path = template
        .path_from_with(&vars, &options)
        .with_context(|| format!("Cannot generate a path from {}", template))?;
    println!("{}", path);
    Ok(())
}

/// Parses `name=value` query arguments; a bare `name` adds a valueless parameter
fn query_params(args: &[String]) -> Result<QueryParams> {
    let mut params = QueryParams::new();
    for arg in args {
        match arg.split_once('=') {
            Some(("", _)) => bail!("Query parameter without a name: {:?}", arg),
            Some((name, value)) => params.add(name, value),
            None => params.add(arg.as_str(), rhtmx_urit::Value::Null),
        }
    }
    Ok(params)
}
