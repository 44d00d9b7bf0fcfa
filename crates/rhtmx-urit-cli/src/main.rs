mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rhtmx_urit::Host;
use tracing_subscriber::EnvFilter;

use config::{Config, DEFAULT_CONFIG};

#[derive(Parser)]
#[command(name = "urit")]
#[command(version, about = "URI path templates - match, generate and resolve paths", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match paths against a template and print the extracted variables
    Match {
        /// Template text, or @alias from the config file
        template: String,

        /// Paths (or absolute URLs) to match
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print variables as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a path from variable values
    Generate {
        /// Template text, or @alias from the config file
        template: String,

        /// Values: name=value for named templates, bare values for positional ones
        values: Vec<String>,

        /// Host to prefix (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Query parameter as name=value (repeatable)
        #[arg(short, long)]
        query: Vec<String>,

        /// Check each value against its variable's pattern
        #[arg(long)]
        check: bool,
    },

    /// Fold values into a template, leaving the rest as variables
    Resolve {
        /// Template text, or @alias from the config file
        template: String,

        /// Values: name=value for named templates, bare values for positional ones
        values: Vec<String>,
    },

    /// List the variables a template declares
    Vars {
        /// Template text, or @alias from the config file
        template: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Match {
            template,
            paths,
            json,
        } => {
            let template = config.compile(&template)?;
            return commands::matches::execute(&template, &paths, json);
        }
        Commands::Generate {
            template,
            values,
            host,
            query,
            check,
        } => {
            let template = config.compile(&template)?;
            let host = host.map(Host::new).or_else(|| config.host());
            commands::generate::execute(&template, &values, host, &query, check)?;
        }
        Commands::Resolve { template, values } => {
            let template = config.compile(&template)?;
            commands::resolve::execute(&template, &values)?;
        }
        Commands::Vars { template, json } => {
            let template = config.compile(&template)?;
            commands::vars::execute(&template, json)?;
        }
    }

    Ok(true)
}

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(2)
        }
    }
}
