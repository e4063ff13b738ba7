//! Integration tests for typo-forge

use async_trait::async_trait;
use futures::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use typo_forge::{
    availability::{AvailabilityCache, AvailabilityService},
    types::{AvailabilityResult, AvailabilityStatus, LookupConfig},
    typo::{mutations, neighbors, select_codes, RarityCode},
    Result, TypoForgeError, TypoPipeline,
};

/// Registrar stub: `.net` domains are taken, everything else available
#[derive(Default)]
struct StubRegistrar {
    calls: AtomicUsize,
}

#[async_trait]
impl AvailabilityService for StubRegistrar {
    async fn check(&self, domain: &str) -> Result<AvailabilityResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AvailabilityResult {
            domain: Some(domain.to_string()),
            available: Some(!domain.ends_with(".net")),
            price: Some(12_000_000),
            currency: Some("USD".to_string()),
            ..Default::default()
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn checking() -> LookupConfig {
    LookupConfig::cached(true, true).with_delay(Duration::ZERO)
}

#[test]
fn test_mutation_counts() {
    let word = "typo";
    assert_eq!(mutations::one_out(word).len(), 4);
    assert_eq!(mutations::swap_pairs(word).len(), 3);
    assert_eq!(mutations::double_letter(word).len(), 4);

    let table = &neighbors::KEYBOARD_LETTERS;
    let expected: usize = word
        .chars()
        .map(|c| table.neighbors(c).map_or(1, |n| n.len()))
        .sum();
    assert_eq!(mutations::replace_with_neighbor(word, table).len(), expected);
    assert_eq!(mutations::insert_neighbor(word, table).len(), 2 * expected);
}

#[test]
fn test_dispatch_selection() {
    assert_eq!(
        select_codes(Some("B")),
        vec![RarityCode::B1, RarityCode::B2, RarityCode::B3]
    );
    assert_eq!(select_codes(Some("C2")), vec![RarityCode::C2]);
    assert!(select_codes(Some("Z")).is_empty());
}

#[tokio::test]
async fn test_cache_round_trip_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("cache.json");

    let first = Arc::new(StubRegistrar::default());
    let mut cache = AvailabilityCache::open(&path, checking(), Some(first.clone())).unwrap();
    let stored = cache.lookup("example.net").await.unwrap();
    cache.close().unwrap();
    assert_eq!(first.calls.load(Ordering::SeqCst), 1);

    let second = Arc::new(StubRegistrar::default());
    let mut cache = AvailabilityCache::open(&path, checking(), Some(second.clone())).unwrap();
    let loaded = cache.lookup("example.net").await.unwrap();

    assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    assert_eq!(loaded, stored);
    assert_eq!(loaded.status(), AvailabilityStatus::Taken);
}

#[tokio::test]
async fn test_malformed_cache_fails_at_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let result = AvailabilityCache::open(&path, LookupConfig::default(), None);
    assert!(matches!(result.err(), Some(TypoForgeError::MalformedCache { .. })));
}

#[tokio::test]
async fn test_typo_run_without_checking() {
    let dir = TempDir::new().unwrap();
    let cache =
        AvailabilityCache::open(dir.path().join("cache.json"), LookupConfig::default(), None)
            .unwrap();
    let mut pipeline = TypoPipeline::new(cache);

    let reports = pipeline
        .generate("test", "com", Some("B1"))
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    let domains: Vec<&str> = reports.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(domains, vec!["est.com", "tst.com", "tet.com", "tes.com"]);
    assert!(reports.iter().all(|r| r.availability.is_unknown()));
    assert!(!dir.path().join("cache.json").exists());
}

#[tokio::test]
async fn test_full_run_streams_every_code_in_order() {
    let dir = TempDir::new().unwrap();
    let registrar = Arc::new(StubRegistrar::default());
    let cache =
        AvailabilityCache::open(dir.path().join("cache.json"), checking(), Some(registrar.clone()))
            .unwrap();
    let mut pipeline = TypoPipeline::new(cache);

    let reports: Vec<_> = pipeline
        .generate("ab", "io", None)
        .unwrap()
        .into_stream()
        .map(|r| r.unwrap())
        .collect()
        .await;

    let expected: usize = RarityCode::ALL.iter().map(|c| c.mutate("ab").len()).sum();
    assert_eq!(reports.len(), expected);

    let mut last_index = 0;
    for report in &reports {
        let code = report.code.unwrap();
        let index = RarityCode::ALL.iter().position(|c| *c == code).unwrap();
        assert!(index >= last_index);
        last_index = index;
    }

    // duplicates across codes are served from the cache
    let distinct = pipeline.cache().len();
    assert_eq!(registrar.calls.load(Ordering::SeqCst), distinct);
    assert_eq!(
        reports.iter().filter(|r| r.from_cache).count(),
        reports.len() - distinct
    );
}

#[tokio::test]
async fn test_clear_only_before_lookups() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.json");
    std::fs::write(&path, r#"{"old.com": {"available": false}}"#).unwrap();

    let registrar = Arc::new(StubRegistrar::default());
    let mut cache = AvailabilityCache::open(&path, checking(), Some(registrar)).unwrap();
    assert!(cache.contains("old.com"));

    tokio_test::assert_ok!(cache.clear());
    assert!(cache.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");

    tokio_test::assert_ok!(cache.lookup("new.com").await);
    assert!(matches!(cache.clear(), Err(TypoForgeError::InvalidInput { .. })));
}
