//! Core types and structures for typo-forge

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use crate::typo::RarityCode;

/// Registrar prices are expressed in millionths of the currency unit.
pub const PRICE_MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Domain availability status derived from a registrar answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Taken,
    Unknown,
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "AVAILABLE"),
            AvailabilityStatus::Taken => write!(f, "NOT AVAILABLE"),
            AvailabilityStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Availability answer for one fully-qualified domain.
///
/// Every field is optional: the empty object is the "unknown" result returned
/// when availability checking is disabled. Fields the registrar sends that are
/// not modelled here are kept in `metadata`, so the cache file stores the raw
/// response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    /// Price in micro-units of `currency`, exactly as the registrar reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitive: Option<bool>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl AvailabilityResult {
    /// The empty result used when no check was performed
    pub fn unknown() -> Self {
        Self::default()
    }

    /// True when the result carries no information at all
    pub fn is_unknown(&self) -> bool {
        self.available.is_none()
    }

    pub fn status(&self) -> AvailabilityStatus {
        match self.available {
            Some(true) => AvailabilityStatus::Available,
            Some(false) => AvailabilityStatus::Taken,
            None => AvailabilityStatus::Unknown,
        }
    }

    /// Decimal price in `currency` units
    pub fn price_amount(&self) -> Option<f64> {
        self.price.map(|micros| micros as f64 / PRICE_MICROS_PER_UNIT)
    }
}

/// One item of an availability stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainReport {
    /// Fully-qualified domain (`label.tld`)
    pub domain: String,
    /// Rarity code of the mutation that produced the label; absent in batch mode
    pub code: Option<RarityCode>,
    pub availability: AvailabilityResult,
    /// Whether the answer was served from the cache
    pub from_cache: bool,
}

impl DomainReport {
    pub fn status(&self) -> AvailabilityStatus {
        self.availability.status()
    }
}

/// Configuration for cache-aware availability lookups.
///
/// Built once per run and handed to [`crate::availability::AvailabilityCache::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Call the availability service on cache misses
    pub check_availability: bool,
    /// Serve lookups from stored entries
    pub use_cache: bool,
    /// Rewrite the cache file after every stored result
    pub persist_cache: bool,
    /// Pause after each network call, to respect the registrar rate limit
    pub rate_limit_delay: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            check_availability: false,
            use_cache: false,
            persist_cache: false,
            rate_limit_delay: Duration::from_secs(1),
        }
    }
}

impl LookupConfig {
    /// Cache reads and persistence toggled together, as the `--cached` flag does
    pub fn cached(check_availability: bool, cached: bool) -> Self {
        Self {
            check_availability,
            use_cache: cached,
            persist_cache: cached,
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }
}
