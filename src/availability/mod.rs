//! Domain availability lookups: the registrar seam, its GoDaddy implementation,
//! and the persistent result cache that gates calls to it.

pub mod cache;
pub mod godaddy;
pub mod validator;

// Re-export main functionality
pub use cache::{AvailabilityCache, CacheStats, LookupSource};
pub use godaddy::{GoDaddyClient, GoDaddyConfig, GoDaddyEnvironment};
pub use validator::DomainValidator;

use crate::error::Result;
use crate::types::AvailabilityResult;
use async_trait::async_trait;

/// An external registrar that answers availability for one domain per call
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    /// Check a fully-qualified domain.
    ///
    /// A non-success registrar answer is reported as
    /// [`crate::TypoForgeError::ExternalService`].
    async fn check(&self, domain: &str) -> Result<AvailabilityResult>;

    /// Get the service name
    fn name(&self) -> &'static str;
}
