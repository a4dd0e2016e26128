//! Catalog Store
//!
//! Single in-memory holder of the creature list and the current search string.
//!
//! The owning [`PokemonStore`] is built once per session and issues the
//! one-shot load. Consumers get a [`CatalogHandle`]: the filtered view plus the
//! search setter, never the underlying fields. Every handle refers to the same
//! state, so a search typed through one is what all the others read.
//!
//! The load task only keeps a weak reference to the store. Dropping the
//! `PokemonStore` tears the context down and any late completion is discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::error::CatalogResult;
use super::filter::filter_by_name;
use super::source::PokemonSource;
use super::types::{LoadOutcome, LoadStatus, Pokemon};

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Default)]
struct CatalogState {
    records: Arc<Vec<Pokemon>>,
    search: String,
    /// Bumped each time `records` is replaced
    revision: u64,
    status: LoadStatus,
}

/// Last computed projection and the inputs it was computed from.
struct CachedView {
    revision: u64,
    search: String,
    pokemon: Arc<Vec<Pokemon>>,
}

struct StoreInner {
    state: RwLock<CatalogState>,
    view_cache: Mutex<Option<CachedView>>,
    source: Arc<dyn PokemonSource>,
    load_issued: AtomicBool,
    torn_down: AtomicBool,
}

impl StoreInner {
    fn read_state(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<CachedView>> {
        self.view_cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn view(&self) -> CatalogView {
        let state = self.read_state();
        let mut cache = self.lock_cache();

        if let Some(cached) = cache.as_ref() {
            if cached.revision == state.revision && cached.search == state.search {
                return CatalogView {
                    pokemon: Arc::clone(&cached.pokemon),
                    search: state.search.clone(),
                    total: state.records.len(),
                };
            }
        }

        let pokemon = if state.search.is_empty() {
            Arc::clone(&state.records)
        } else {
            Arc::new(filter_by_name(&state.records, &state.search))
        };
        debug!(
            revision = state.revision,
            search = %state.search,
            matched = pokemon.len(),
            "Recomputed filtered view"
        );

        *cache = Some(CachedView {
            revision: state.revision,
            search: state.search.clone(),
            pokemon: Arc::clone(&pokemon),
        });

        CatalogView {
            pokemon,
            search: state.search.clone(),
            total: state.records.len(),
        }
    }

    fn set_search(&self, search: String) {
        let mut state = self.write_state();
        debug!(search = %search, "Search updated");
        state.search = search;
    }

    fn complete_load(&self, result: CatalogResult<Vec<Pokemon>>, source: &str) -> LoadOutcome {
        let mut state = self.write_state();
        if self.torn_down.load(Ordering::SeqCst) {
            debug!(source, "Catalog load resolved after teardown, discarding");
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(records) => {
                let count = records.len();
                state.records = Arc::new(records);
                state.revision += 1;
                state.status = LoadStatus::Loaded { count };
                info!(source, count, "Catalog loaded");
                LoadOutcome::Applied { count }
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(source, error = %e, "Catalog load failed, catalog stays empty");
                state.status = LoadStatus::Failed {
                    reason: reason.clone(),
                };
                LoadOutcome::Failed { reason }
            }
        }
    }

    /// The load task went away without resolving.
    fn abandon_load(&self) {
        let mut state = self.write_state();
        if self.torn_down.load(Ordering::SeqCst) || state.status != LoadStatus::Pending {
            return;
        }
        warn!("Catalog load task dropped before completing, catalog stays empty");
        state.status = LoadStatus::Failed {
            reason: ABANDONED_REASON.to_string(),
        };
    }
}

const ABANDONED_REASON: &str = "load task dropped before completing";

// ============================================================================
// View
// ============================================================================

/// Read-only projection handed to consumers.
#[derive(Debug, Clone)]
pub struct CatalogView {
    pokemon: Arc<Vec<Pokemon>>,
    search: String,
    total: usize,
}

impl CatalogView {
    /// Records matching the search, in catalog order.
    pub fn pokemon(&self) -> &[Pokemon] {
        &self.pokemon
    }

    /// The search string this view was derived from.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Size of the unfiltered catalog.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pokemon> {
        self.pokemon.iter()
    }

    /// Lookup by identity among the matching records.
    pub fn get(&self, id: i64) -> Option<&Pokemon> {
        self.pokemon.iter().find(|p| p.id == id)
    }

    /// True when both views share one computed projection.
    pub fn same_projection(&self, other: &CatalogView) -> bool {
        Arc::ptr_eq(&self.pokemon, &other.pokemon)
    }
}

impl<'a> IntoIterator for &'a CatalogView {
    type Item = &'a Pokemon;
    type IntoIter = std::slice::Iter<'a, Pokemon>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Consumer Handle
// ============================================================================

/// What a consumer gets: the view and the search setter.
#[derive(Clone)]
pub struct CatalogHandle {
    inner: Arc<StoreInner>,
}

impl CatalogHandle {
    /// Current filtered view. Recomputed only when the records or the
    /// search changed since the last read.
    pub fn view(&self) -> CatalogView {
        self.inner.view()
    }

    pub fn search(&self) -> String {
        self.inner.read_state().search.clone()
    }

    /// Replace the search string verbatim.
    pub fn set_search(&self, search: impl Into<String>) {
        self.inner.set_search(search.into());
    }

    pub fn load_status(&self) -> LoadStatus {
        self.inner.read_state().status.clone()
    }

    /// True when both handles refer to the same store.
    pub fn same_store(&self, other: &CatalogHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// ============================================================================
// Owning Store
// ============================================================================

/// The session's catalog store.
///
/// Not `Clone`: there is one owner. Dropping it tears the context down.
pub struct PokemonStore {
    handle: CatalogHandle,
}

impl PokemonStore {
    pub fn new(source: Arc<dyn PokemonSource>) -> Self {
        let inner = StoreInner {
            state: RwLock::new(CatalogState::default()),
            view_cache: Mutex::new(None),
            source,
            load_issued: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
        };
        Self {
            handle: CatalogHandle {
                inner: Arc::new(inner),
            },
        }
    }

    pub fn with_source<S: PokemonSource + 'static>(source: S) -> Self {
        Self::new(Arc::new(source))
    }

    /// Handle to pass to a consumer.
    pub fn handle(&self) -> CatalogHandle {
        self.handle.clone()
    }

    /// Spawn the one-shot load on the current tokio runtime.
    ///
    /// Returns `None` when the load was already issued, or when called outside
    /// a runtime (the load stays available in that case).
    pub fn initialize(&self) -> Option<JoinHandle<LoadOutcome>> {
        if tokio::runtime::Handle::try_current().is_err() {
            warn!("initialize called outside a tokio runtime, load not issued");
            return None;
        }
        let task = self.load_task()?;
        Some(tokio::spawn(task.run()))
    }

    /// Take the one-shot load future without spawning it.
    ///
    /// Only the first call per store returns `Some`, and that call uses up the
    /// store's single load. Dropping the returned task (or aborting the future
    /// running it) before it resolves marks the load as
    /// [`LoadStatus::Failed`]; the store does not issue another.
    pub fn load_task(&self) -> Option<LoadTask> {
        let inner = &self.handle.inner;
        if inner.load_issued.swap(true, Ordering::SeqCst) {
            warn!("Catalog load already issued, ignoring");
            return None;
        }

        inner.write_state().status = LoadStatus::Pending;
        debug!(source = %inner.source.describe(), "Catalog load issued");

        Some(LoadTask {
            store: Arc::downgrade(inner),
            source: Arc::clone(&inner.source),
            armed: true,
        })
    }

    pub fn view(&self) -> CatalogView {
        self.handle.view()
    }

    pub fn search(&self) -> String {
        self.handle.search()
    }

    pub fn set_search(&self, search: impl Into<String>) {
        self.handle.set_search(search);
    }

    pub fn load_status(&self) -> LoadStatus {
        self.handle.load_status()
    }
}

impl Drop for PokemonStore {
    fn drop(&mut self) {
        let inner = &self.handle.inner;
        // Under the write lock so a concurrent completion sees either the
        // live store or the flag, never half of each.
        let _state = inner.write_state();
        inner.torn_down.store(true, Ordering::SeqCst);
    }
}

// ============================================================================
// Load Task
// ============================================================================

/// The one-shot fetch-and-apply future.
pub struct LoadTask {
    store: Weak<StoreInner>,
    source: Arc<dyn PokemonSource>,
    /// Cleared once the fetch has resolved
    armed: bool,
}

impl LoadTask {
    pub async fn run(mut self) -> LoadOutcome {
        let description = self.source.describe();
        let result = self.source.fetch().await;
        self.armed = false;

        let Some(inner) = self.store.upgrade() else {
            debug!(source = %description, "Catalog store dropped before load resolved");
            return LoadOutcome::Discarded;
        };
        inner.complete_load(result, &description)
    }
}

impl Drop for LoadTask {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(inner) = self.store.upgrade() {
            inner.abandon_load();
        }
    }
}
