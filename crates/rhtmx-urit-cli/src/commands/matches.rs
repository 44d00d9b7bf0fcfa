use anyhow::Result;
use colored::Colorize;
use rhtmx_urit::{PathVars, Template};

/// Matches each path and prints the extracted variables
///
/// Returns whether every path matched.
pub fn execute(template: &Template, paths: &[String], json: bool) -> Result<bool> {
    let mut all_matched = true;

    for path in paths {
        match template.matches(path) {
            Some(vars) if json => {
                println!("{}", serde_json::to_string(vars.all())?);
            }
            Some(vars) => {
                println!("{} {}", "✓".green(), path.bold());
                print_vars(&vars);
            }
            None => {
                all_matched = false;
                if json {
                    println!("null");
                } else {
                    println!("{} {}", "✗".red(), path.bold());
                }
            }
        }
    }

    Ok(all_matched)
}

fn print_vars(vars: &PathVars) {
    for var in vars.all() {
        let label = if var.name.is_empty() {
            format!("[{}]", var.position)
        } else {
            var.name.clone()
        };
        println!("  {} = {}", label.cyan(), var.value);
    }
}
