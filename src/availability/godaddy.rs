//! GoDaddy availability client
//!
//! Uses `GET /v1/domains/available?domain=<fqdn>` with `sso-key` authentication.

use async_trait::async_trait;
use reqwest::Client;
use std::env;
use std::time::Duration;

use super::AvailabilityService;
use crate::config_error;
use crate::error::{Result, TypoForgeError};
use crate::types::AvailabilityResult;

/// GoDaddy API host to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoDaddyEnvironment {
    #[default]
    Production,
    /// Operational Test Environment (sandbox)
    Ote,
}

impl GoDaddyEnvironment {
    pub fn base_url(self) -> &'static str {
        match self {
            GoDaddyEnvironment::Production => "https://api.godaddy.com",
            GoDaddyEnvironment::Ote => "https://api.ote-godaddy.com",
        }
    }

    fn key_vars(self) -> (&'static str, &'static str) {
        match self {
            GoDaddyEnvironment::Production => ("GODADDY_API_KEY", "GODADDY_API_SECRET"),
            GoDaddyEnvironment::Ote => ("OTE_GODADDY_API_KEY", "OTE_GODADDY_API_SECRET"),
        }
    }
}

impl std::str::FromStr for GoDaddyEnvironment {
    type Err = TypoForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "production" | "prod" => Ok(Self::Production),
            "ote" | "test" => Ok(Self::Ote),
            other => Err(TypoForgeError::config(format!(
                "Unknown GoDaddy environment '{}', expected 'production' or 'ote'",
                other
            ))),
        }
    }
}

/// GoDaddy credentials and endpoint
#[derive(Debug, Clone)]
pub struct GoDaddyConfig {
    pub api_key: String,
    pub api_secret: String,
    pub environment: GoDaddyEnvironment,
    /// Overrides the environment host, e.g. for a proxy
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for GoDaddyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            environment: GoDaddyEnvironment::Production,
            base_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl GoDaddyConfig {
    /// Read credentials from the environment (`.env` is loaded by [`crate::init`]).
    ///
    /// `GODADDY_ENVIRONMENT` picks the host and which key pair is read:
    /// `GODADDY_API_KEY`/`GODADDY_API_SECRET` for production,
    /// `OTE_GODADDY_API_KEY`/`OTE_GODADDY_API_SECRET` for OTE.
    /// `GODADDY_BASE_URL` overrides the host.
    pub fn from_env() -> Result<Self> {
        let environment: GoDaddyEnvironment = env::var("GODADDY_ENVIRONMENT")
            .unwrap_or_default()
            .parse()?;
        let (key_var, secret_var) = environment.key_vars();

        let api_key = env::var(key_var)
            .map_err(|_| config_error!("{} is not set", key_var))?;
        let api_secret = env::var(secret_var)
            .map_err(|_| config_error!("{} is not set", secret_var))?;

        Ok(Self {
            api_key,
            api_secret,
            environment,
            base_url: env::var("GODADDY_BASE_URL").ok().filter(|u| !u.is_empty()),
            ..Default::default()
        })
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }
}

/// Registrar search page for a domain
pub fn search_link(domain: &str) -> String {
    format!("https://www.godaddy.com/domainsearch/find?domainToCheck={}", domain)
}

/// Registrar appraisal page for a domain
pub fn appraisal_link(domain: &str) -> String {
    format!(
        "https://www.godaddy.com/domain-value-appraisal/appraisal/?domainToCheck={}",
        domain
    )
}

/// Availability client for the GoDaddy domains API
pub struct GoDaddyClient {
    client: Client,
    base_url: String,
    authorization: String,
}

impl GoDaddyClient {
    pub fn new(config: &GoDaddyConfig) -> Result<Self> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(TypoForgeError::config(
                "GoDaddy API key and secret are required for availability checks",
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("typo-forge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TypoForgeError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            base_url: config.effective_base_url().to_string(),
            authorization: format!("sso-key {}:{}", config.api_key, config.api_secret),
        })
    }

    fn availability_url(&self) -> String {
        format!("{}/v1/domains/available", self.base_url)
    }
}

#[async_trait]
impl AvailabilityService for GoDaddyClient {
    async fn check(&self, domain: &str) -> Result<AvailabilityResult> {
        let url = self.availability_url();

        let response = self
            .client
            .get(&url)
            .query(&[("domain", domain)])
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(domain = %domain, status = status.as_u16(), body = %body, "GoDaddy API error");
            return Err(TypoForgeError::external_service(status.as_u16(), body));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn name(&self) -> &'static str {
        "godaddy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("".parse::<GoDaddyEnvironment>().unwrap(), GoDaddyEnvironment::Production);
        assert_eq!("OTE".parse::<GoDaddyEnvironment>().unwrap(), GoDaddyEnvironment::Ote);
        assert!("staging".parse::<GoDaddyEnvironment>().is_err());
    }

    #[test]
    fn test_base_url_override() {
        let config = GoDaddyConfig {
            base_url: Some("http://127.0.0.1:8080/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_base_url(), "http://127.0.0.1:8080");

        let config = GoDaddyConfig {
            environment: GoDaddyEnvironment::Ote,
            ..Default::default()
        };
        assert_eq!(config.effective_base_url(), "https://api.ote-godaddy.com");
    }

    #[test]
    fn test_client_requires_credentials() {
        assert!(matches!(
            GoDaddyClient::new(&GoDaddyConfig::default()),
            Err(TypoForgeError::Config { .. })
        ));
    }

    #[test]
    fn test_links() {
        assert!(search_link("tset.com").ends_with("domainToCheck=tset.com"));
        assert!(appraisal_link("tset.com").contains("appraisal"));
    }
}
