//! Catalog Store Unit Tests
//!
//! Drives the store through its consumer handles:
//! - Shared search across handles
//! - Reads while the load is still pending
//! - Failure leaves the catalog empty
//! - Late completion after teardown

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{oneshot, Mutex};

use crate::core::catalog::{
    CatalogError, CatalogResult, FileSource, LoadOutcome, LoadStatus, Pokemon, PokemonSource,
    PokemonStore, StaticSource,
};
use crate::tests::common::{catalog_json, create_generation_one, create_starters, names};

// =============================================================================
// Test Sources
// =============================================================================

/// Resolves only when the test sends the result through the gate.
struct GatedSource {
    gate: Mutex<Option<oneshot::Receiver<CatalogResult<Vec<Pokemon>>>>>,
}

impl GatedSource {
    fn new() -> (Self, oneshot::Sender<CatalogResult<Vec<Pokemon>>>) {
        let (tx, rx) = oneshot::channel();
        let source = Self {
            gate: Mutex::new(Some(rx)),
        };
        (source, tx)
    }
}

#[async_trait]
impl PokemonSource for GatedSource {
    fn describe(&self) -> String {
        "gated".to_string()
    }

    async fn fetch(&self) -> CatalogResult<Vec<Pokemon>> {
        let rx = self
            .gate
            .lock()
            .await
            .take()
            .ok_or_else(|| CatalogError::Config("gated source fetched twice".to_string()))?;
        rx.await
            .map_err(|_| CatalogError::Config("gate dropped".to_string()))?
    }
}

/// Always fails with a decode error.
struct BrokenSource;

#[async_trait]
impl PokemonSource for BrokenSource {
    fn describe(&self) -> String {
        "broken".to_string()
    }

    async fn fetch(&self) -> CatalogResult<Vec<Pokemon>> {
        let err = serde_json::from_str::<Vec<Pokemon>>("{\"oops\": true}").unwrap_err();
        Err(CatalogError::Parse(err))
    }
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[tokio::test]
async fn test_search_ar_matches_charmander_only() {
    let store = PokemonStore::with_source(StaticSource::new(create_starters()));
    store.initialize().unwrap().await.unwrap();

    // "Bulbasaur" has no "ar" run
    store.set_search("AR");
    let view = store.view();
    assert_eq!(names(view.pokemon()), vec!["Charmander"]);
    assert_eq!(view.search(), "AR");

    store.set_search("a");
    assert_eq!(names(store.view().pokemon()), vec!["Bulbasaur", "Charmander"]);
}

#[tokio::test]
async fn test_empty_search_returns_catalog_in_order() {
    let store = PokemonStore::with_source(StaticSource::new(create_starters()));
    store.initialize().unwrap().await.unwrap();

    let view = store.view();
    assert_eq!(view.pokemon(), create_starters().as_slice());
}

#[tokio::test]
async fn test_full_catalog_pika() {
    let store = PokemonStore::with_source(StaticSource::new(create_generation_one()));
    let outcome = store.initialize().unwrap().await.unwrap();
    assert_eq!(outcome, LoadOutcome::Applied { count: 151 });

    store.set_search("pika");
    let view = store.view();
    assert_eq!(names(view.pokemon()), vec!["Pikachu"]);
    assert_eq!(view.total(), 151);
    assert_eq!(view.get(25).map(|p| p.name.as_str()), Some("Pikachu"));
}

#[tokio::test]
async fn test_full_catalog_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("pokemon.json");
    std::fs::write(&file, catalog_json(&create_generation_one())).unwrap();

    let store = PokemonStore::with_source(FileSource::new(file));
    store.initialize().unwrap().await.unwrap();

    store.set_search("PIKA");
    assert_eq!(names(store.view().pokemon()), vec!["Pikachu"]);
    store.set_search("nidoran");
    assert_eq!(names(store.view().pokemon()), vec!["Nidoran♀", "Nidoran♂"]);
}

#[tokio::test]
async fn test_set_search_twice_is_idempotent() {
    let store = PokemonStore::with_source(StaticSource::new(create_generation_one()));
    store.initialize().unwrap().await.unwrap();

    store.set_search("saur");
    let once = store.view();
    store.set_search("saur");
    let twice = store.view();

    assert_eq!(once.pokemon(), twice.pokemon());
    assert_eq!(names(twice.pokemon()), vec!["Bulbasaur", "Ivysaur", "Venusaur"]);
}

// =============================================================================
// Sharing Tests
// =============================================================================

#[tokio::test]
async fn test_handles_share_search_and_view() {
    let store = PokemonStore::with_source(StaticSource::new(create_generation_one()));
    store.initialize().unwrap().await.unwrap();

    let search_box = store.handle();
    let results_list = store.handle();
    assert!(search_box.same_store(&results_list));

    search_box.set_search("Char");
    assert_eq!(results_list.search(), "Char");
    assert_eq!(
        names(results_list.view().pokemon()),
        vec!["Charmander", "Charmeleon", "Charizard"]
    );
    assert!(search_box.view().same_projection(&results_list.view()));
}

#[tokio::test]
async fn test_separate_stores_are_independent() {
    let first = PokemonStore::with_source(StaticSource::new(create_starters()));
    let second = PokemonStore::with_source(StaticSource::new(create_starters()));

    first.set_search("bulb");
    assert_eq!(second.search(), "");
    assert!(!first.handle().same_store(&second.handle()));
}

// =============================================================================
// Load Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_view_empty_while_load_pending() {
    let (source, gate) = GatedSource::new();
    let store = PokemonStore::with_source(source);
    let handle = store.handle();
    let join = store.initialize().unwrap();

    assert_eq!(handle.load_status(), LoadStatus::Pending);
    handle.set_search("");
    assert!(handle.view().is_empty());
    handle.set_search("bulba");
    assert!(handle.view().is_empty());

    gate.send(Ok(create_starters())).unwrap();
    assert_eq!(join.await.unwrap(), LoadOutcome::Applied { count: 3 });

    // Search typed while pending applies to the loaded records
    assert_eq!(names(handle.view().pokemon()), vec!["Bulbasaur"]);
    assert_eq!(handle.load_status(), LoadStatus::Loaded { count: 3 });
}

#[tokio::test]
async fn test_initialize_runs_once() {
    let store = PokemonStore::with_source(StaticSource::new(create_starters()));
    let first = store.initialize();
    let second = store.initialize();
    assert!(first.is_some());
    assert!(second.is_none());
    first.unwrap().await.unwrap();
    assert_eq!(store.view().len(), 3);
}

#[tokio::test]
async fn test_failed_load_keeps_catalog_empty() {
    let store = PokemonStore::with_source(BrokenSource);
    let outcome = store.initialize().unwrap().await.unwrap();
    assert!(matches!(outcome, LoadOutcome::Failed { .. }));

    store.set_search("");
    assert!(store.view().is_empty());

    match store.load_status() {
        LoadStatus::Failed { reason } => assert!(reason.contains("Malformed catalog payload")),
        other => panic!("unexpected status {other:?}"),
    }
}

#[tokio::test]
async fn test_gated_failure_after_pending() {
    let (source, gate) = GatedSource::new();
    let store = PokemonStore::with_source(source);
    let join = store.initialize().unwrap();

    gate.send(Err(CatalogError::Status {
        url: "http://localhost/pokemon.json".to_string(),
        status: 503,
    }))
    .unwrap();

    let outcome = join.await.unwrap();
    assert!(matches!(outcome, LoadOutcome::Failed { ref reason } if reason.contains("503")));
    assert!(store.view().is_empty());
}

#[tokio::test]
async fn test_late_completion_after_teardown_is_discarded() {
    let (source, gate) = GatedSource::new();
    let store = PokemonStore::with_source(source);
    let handle = store.handle();
    let join = store.initialize().unwrap();

    drop(store);
    gate.send(Ok(create_starters())).unwrap();

    assert_eq!(join.await.unwrap(), LoadOutcome::Discarded);
    assert!(handle.view().is_empty());
}

#[tokio::test]
async fn test_late_completion_with_no_handles_left() {
    let (source, gate) = GatedSource::new();
    let store = PokemonStore::new(Arc::new(source));
    let join = store.initialize().unwrap();

    drop(store);
    gate.send(Ok(create_generation_one())).unwrap();

    assert_eq!(join.await.unwrap(), LoadOutcome::Discarded);
}
