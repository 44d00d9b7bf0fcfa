// File: src/request/host.rs
// Purpose: Host prefix for generated paths and requests

use std::fmt;

/// The address generated paths are prefixed with, e.g. `https://www.example.com`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Host {
    address: String,
}

impl Host {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Joins the address and a path without doubling the separator
    pub(crate) fn prefix(&self, path: &str) -> String {
        format!("{}{}", self.address.trim_end_matches('/'), path)
    }
}

impl From<&str> for Host {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host() {
        let host = Host::new("www.example.com");
        assert_eq!(host.address(), "www.example.com");
        assert_eq!(host.to_string(), "www.example.com");
    }

    #[test]
    fn test_prefix() {
        assert_eq!(Host::from("https://example.com/").prefix("/foo"), "https://example.com/foo");
        assert_eq!(Host::from("https://example.com").prefix("/foo"), "https://example.com/foo");
    }
}
