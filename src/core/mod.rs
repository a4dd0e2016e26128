pub mod logging;

// Catalog store: one-shot load, shared search, filtered view
pub mod catalog;
