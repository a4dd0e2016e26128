//! Pokemon Catalog
//!
//! Loads the creature list once from a data source, keeps it in memory, and
//! serves a case-insensitive name filter over it.
//!
//! # Overview
//!
//! - **Records**: [`Pokemon`], deserialized from the `/pokemon.json` array
//! - **Sources**: [`PokemonSource`] with HTTP, file, and static implementations
//! - **Store**: [`PokemonStore`] owns the state and issues the one-shot load
//! - **Consumers**: [`CatalogHandle`] exposes [`CatalogView`] and the search setter
//!
//! # Data Flow
//!
//! ```text
//!   PokemonSource --(load once)--> PokemonStore { records, search }
//!                                        |
//!                               filter_by_name(records, search)
//!                                        |
//!                                        v
//!                          CatalogHandle::view() / set_search()
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use pokedex::core::catalog::{HttpSource, PokemonStore};
//!
//! let store = PokemonStore::with_source(HttpSource::new("http://localhost:8080")?);
//! store.initialize();
//!
//! let handle = store.handle();
//! handle.set_search("pika");
//! for pokemon in &handle.view() {
//!     println!("#{} {}", pokemon.id, pokemon.name);
//! }
//! ```

pub mod error;
pub mod filter;
pub mod source;
pub mod store;
pub mod types;

pub use error::{CatalogError, CatalogResult};
pub use filter::filter_by_name;
pub use source::{FileSource, HttpSource, PokemonSource, StaticSource, DEFAULT_CATALOG_PATH};
pub use store::{CatalogHandle, CatalogView, LoadTask, PokemonStore};
pub use types::{LoadOutcome, LoadStatus, Pokemon};
