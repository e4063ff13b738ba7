//! Persistent availability cache
//!
//! The cache maps a full domain (`label.tld`) to the last answer the registrar
//! gave for it. Entries carry no timestamp; clearing the whole cache before a
//! run is the only way to force fresh answers.
//!
//! The snapshot file is rewritten in full on every stored result. Two processes
//! sharing one file are not coordinated: the last writer wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use super::validator::DomainValidator;
use super::AvailabilityService;
use crate::error::{Result, TypoForgeError};
use crate::types::{AvailabilityResult, LookupConfig};

/// Where a lookup answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    /// Served from a stored entry, no network call
    Cache,
    /// Fetched from the availability service and stored
    Service,
    /// Checking disabled; nothing was fetched
    Skipped,
}

/// Counters for the run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub network_calls: u64,
    pub stored: u64,
}

/// Availability cache in front of an [`AvailabilityService`]
pub struct AvailabilityCache {
    path: PathBuf,
    entries: HashMap<String, AvailabilityResult>,
    config: LookupConfig,
    service: Option<Arc<dyn AvailabilityService>>,
    validator: DomainValidator,
    stats: CacheStats,
    lookups_started: bool,
}

impl AvailabilityCache {
    /// Open the cache stored at `path`.
    ///
    /// A missing file is an empty cache. A file that is not a JSON object of
    /// results fails with [`TypoForgeError::MalformedCache`].
    pub fn open(
        path: impl Into<PathBuf>,
        config: LookupConfig,
        service: Option<Arc<dyn AvailabilityService>>,
    ) -> Result<Self> {
        let path = path.into();

        if config.check_availability && service.is_none() {
            return Err(TypoForgeError::config(
                "Availability checking is enabled but no availability service is configured",
            ));
        }

        let validator = DomainValidator::new();
        let entries = load_snapshot(&path, &validator)?;

        tracing::debug!(
            path = %path.display(),
            entries = entries.len(),
            check_availability = config.check_availability,
            use_cache = config.use_cache,
            persist_cache = config.persist_cache,
            "Availability cache opened"
        );

        Ok(Self {
            path,
            entries,
            config,
            service,
            validator,
            stats: CacheStats::default(),
            lookups_started: false,
        })
    }

    /// Get default cache file path
    pub fn default_path() -> PathBuf {
        PathBuf::from(".typo-forge/cache.json")
    }

    /// Look up one full domain, consulting the service on a miss
    pub async fn lookup(&mut self, domain: &str) -> Result<AvailabilityResult> {
        self.resolve(domain).await.map(|(result, _)| result)
    }

    /// Look up one full domain and report where the answer came from.
    ///
    /// A miss resolved by the service is stored, persisted when persistence is
    /// enabled, and followed by the configured rate-limit delay. Service errors
    /// are returned as-is and nothing is stored.
    pub async fn resolve(&mut self, domain: &str) -> Result<(AvailabilityResult, LookupSource)> {
        self.validator.validate_full_domain(domain)?;
        self.lookups_started = true;

        if self.config.use_cache {
            if let Some(hit) = self.entries.get(domain) {
                self.stats.hits += 1;
                tracing::debug!(domain = %domain, "Cache hit");
                return Ok((hit.clone(), LookupSource::Cache));
            }
        }

        self.stats.misses += 1;

        if !self.config.check_availability {
            return Ok((AvailabilityResult::unknown(), LookupSource::Skipped));
        }

        let service = self
            .service
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| TypoForgeError::config("No availability service configured"))?;

        self.stats.network_calls += 1;
        let start_time = Instant::now();

        let result = match service.check(domain).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    domain = %domain,
                    service = service.name(),
                    error = %e,
                    "Availability check failed"
                );
                return Err(e);
            }
        };

        tracing::info!(
            domain = %domain,
            service = service.name(),
            available = ?result.available,
            duration_ms = %start_time.elapsed().as_millis(),
            "Availability checked"
        );

        self.entries.insert(domain.to_string(), result.clone());
        self.stats.stored += 1;

        if self.config.persist_cache {
            self.save()?;
        }

        if !self.config.rate_limit_delay.is_zero() {
            tokio::time::sleep(self.config.rate_limit_delay).await;
        }

        Ok((result, LookupSource::Service))
    }

    /// Overwrite the snapshot at `path` with an empty object without reading it,
    /// so a malformed file can be recovered.
    pub fn reset(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        save_snapshot(path, &HashMap::new())?;
        tracing::info!(path = %path.display(), "Availability cache reset");
        Ok(())
    }

    /// Drop every entry and rewrite the cache file as an empty object.
    ///
    /// Only allowed before the first lookup of this run.
    pub fn clear(&mut self) -> Result<()> {
        if self.lookups_started {
            return Err(TypoForgeError::invalid_input(
                "The cache can only be cleared before the first lookup",
            ));
        }

        let dropped = self.entries.len();
        self.entries.clear();
        self.save()?;

        tracing::info!(path = %self.path.display(), dropped, "Availability cache cleared");
        Ok(())
    }

    /// Write the snapshot if persistence is enabled
    pub fn flush(&self) -> Result<()> {
        if self.config.persist_cache {
            self.save()?;
        }
        Ok(())
    }

    /// Flush and release the cache
    pub fn close(self) -> Result<()> {
        self.flush()
    }

    fn save(&self) -> Result<()> {
        save_snapshot(&self.path, &self.entries)
    }

    pub fn get(&self, domain: &str) -> Option<&AvailabilityResult> {
        self.entries.get(domain)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.entries.contains_key(domain)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load_snapshot(
    path: &Path,
    validator: &DomainValidator,
) -> Result<HashMap<String, AvailabilityResult>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => {
            return Err(TypoForgeError::io(
                e.to_string(),
                Some(path.to_string_lossy().to_string()),
            ))
        }
    };

    let entries: HashMap<String, AvailabilityResult> = serde_json::from_str(&content)
        .map_err(|e| TypoForgeError::malformed_cache(path.to_string_lossy(), e.to_string()))?;

    if let Some(bad) = entries
        .keys()
        .find(|key| validator.validate_full_domain(key).is_err())
    {
        return Err(TypoForgeError::malformed_cache(
            path.to_string_lossy(),
            format!("'{}' is not a label.tld key", bad),
        ));
    }

    Ok(entries)
}

/// Write the whole snapshot through a sibling temp file, so a crash leaves
/// either the previous or the new snapshot on disk.
fn save_snapshot(path: &Path, entries: &HashMap<String, AvailabilityResult>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            TypoForgeError::io(e.to_string(), Some(parent.to_string_lossy().to_string()))
        })?;
    }

    let content = serde_json::to_string_pretty(entries).map_err(|e| {
        TypoForgeError::internal(format!("Failed to serialize cache: {}", e))
    })?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, content).map_err(|e| {
        TypoForgeError::io(e.to_string(), Some(tmp_path.to_string_lossy().to_string()))
    })?;

    std::fs::rename(&tmp_path, path).map_err(|e| {
        TypoForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
    })
}
