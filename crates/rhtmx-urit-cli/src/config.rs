// File: src/config.rs
// Purpose: Configuration parsing from urit.toml

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rhtmx_urit::{Host, MatchOption, Template};
use serde::{Deserialize, Serialize};

/// Default configuration file name
pub const DEFAULT_CONFIG: &str = "urit.toml";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Named templates, referenced on the command line as `@name`
    #[serde(default)]
    pub templates: BTreeMap<String, String>,

    #[serde(default)]
    pub request: RequestConfig,
}

/// Matching configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchingConfig {
    /// Whether fixed segments match regardless of case (default: false)
    #[serde(default)]
    pub case_insensitive: bool,
}

/// Generation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RequestConfig {
    /// Host prefixed to generated paths (e.g., "https://www.example.com")
    #[serde(default)]
    pub host: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            tracing::debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        tracing::debug!(?path, templates = config.templates.len(), "config loaded");
        Ok(config)
    }

    /// Match options bound to every template the CLI compiles
    pub fn match_options(&self) -> Vec<MatchOption> {
        if self.matching.case_insensitive {
            vec![MatchOption::case_insensitive_fixed()]
        } else {
            Vec::new()
        }
    }

    pub fn host(&self) -> Option<Host> {
        self.request.host.as_deref().map(Host::new)
    }

    /// Template text for an argument, looking up `@alias` references
    pub fn template_text<'a>(&'a self, arg: &'a str) -> Result<&'a str> {
        match arg.strip_prefix('@') {
            Some(alias) => match self.templates.get(alias) {
                Some(text) => Ok(text.as_str()),
                None => bail!("Unknown template alias: @{}", alias),
            },
            None => Ok(arg),
        }
    }

    /// Compiles the template an argument names
    pub fn compile(&self, arg: &str) -> Result<Template> {
        let text = self.template_text(arg)?;
        Template::with_options(text, &self.match_options()).map_err(|err| {
            let position = err.position();
            anyhow::Error::new(err).context(format!(
                "Invalid template {:?} (at position {})",
                text, position
            ))
        })
    }
}
