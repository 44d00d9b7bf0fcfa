use anyhow::Result;
use colored::Colorize;
use rhtmx_urit::Template;

pub fn execute(template: &Template, json: bool) -> Result<()> {
    let vars = template.vars();
    if json {
        println!("{}", serde_json::to_string_pretty(&vars)?);
        return Ok(());
    }

    println!("{}", template.template(true).bold());
    println!("Kind: {:?}", template.vars_type());
    for var in &vars {
        let name = if var.name.is_empty() { "?" } else { var.name.as_str() };
        println!(
            "  {} {} (occurrence {})",
            format!("#{}", var.position).dimmed(),
            name.cyan(),
            var.named_position
        );
    }
    Ok(())
}
