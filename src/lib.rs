//! Pokedex - catalog store for the creature list
//!
//! Core library that loads the catalog once from its data source and serves a
//! shared, name-filtered view to the rendering layer.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
