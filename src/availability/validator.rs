//! Label, TLD and full-domain validation

use crate::error::{Result, TypoForgeError};
use crate::invalid_input;
use regex::Regex;

/// Validator for the pieces a lookup is built from
#[derive(Debug, Clone, Default)]
pub struct DomainValidator;

impl DomainValidator {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a label: trimmed and lowercased
    pub fn normalize(&self, input: &str) -> String {
        input.trim().to_lowercase()
    }

    /// Validate a bare label (no TLD) and return its normalized form
    pub fn validate_label(&self, label: &str) -> Result<String> {
        let label = self.normalize(label);

        if label.is_empty() {
            return Err(TypoForgeError::invalid_input("Domain label cannot be empty"));
        }

        if label.contains('.') {
            return Err(TypoForgeError::invalid_input(format!(
                "Label '{}' must not contain a dot, pass the TLD separately",
                label
            )));
        }

        if label.chars().any(char::is_whitespace) {
            return Err(TypoForgeError::invalid_input(format!(
                "Label '{}' must not contain whitespace",
                label
            )));
        }

        Ok(label)
    }

    /// Validate a TLD, accepting an optional leading dot (`.com` or `com`)
    pub fn validate_tld(&self, tld: &str) -> Result<String> {
        let tld = self.normalize(tld);
        let tld = tld.strip_prefix('.').unwrap_or(&tld).to_string();

        if tld.is_empty() {
            return Err(TypoForgeError::invalid_input("TLD cannot be empty"));
        }

        let tld_regex = Regex::new(r"^[a-z][a-z0-9-]*(\.[a-z][a-z0-9-]*)*$")
            .map_err(|e| TypoForgeError::internal(e.to_string()))?;

        if !tld_regex.is_match(&tld) {
            return Err(invalid_input!("Invalid TLD format: {}", tld));
        }

        Ok(tld)
    }

    /// Check that a cache key / service argument looks like `label.tld`
    pub fn validate_full_domain(&self, domain: &str) -> Result<()> {
        match domain.split_once('.') {
            Some((label, tld))
                if !label.is_empty()
                    && !tld.is_empty()
                    && !tld.starts_with('.')
                    && !tld.ends_with('.')
                    && !domain.chars().any(char::is_whitespace) =>
            {
                Ok(())
            }
            _ => Err(TypoForgeError::invalid_input(format!(
                "'{}' is not a label.tld domain",
                domain
            ))),
        }
    }

    /// Join a label and TLD into the full domain
    pub fn full_domain(&self, label: &str, tld: &str) -> String {
        format!("{}.{}", label, tld)
    }
}

/// Utility functions for domain input
pub mod utils {
    /// Parse a newline-delimited label list; blank lines and `#` comments are skipped
    pub fn parse_label_list(input: &str) -> Vec<String> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect()
    }
}
