//! Typo Forge - typo-domain generation and availability checking
//!
//! Generates typo variants of a domain label, classified by rarity code, and
//! checks each one against a registrar through a persistent availability cache.

pub mod availability;
pub mod error;
pub mod logging;
pub mod types;
pub mod typo;

// Re-export commonly used types
pub use error::{Result, TypoForgeError};
pub use types::{AvailabilityResult, AvailabilityStatus, DomainReport, LookupConfig};

// Re-export main functionality
pub use availability::{
    AvailabilityCache, AvailabilityService, CacheStats, GoDaddyClient, GoDaddyConfig,
};
pub use typo::{AvailabilityStream, RarityCode, TypoPipeline};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
