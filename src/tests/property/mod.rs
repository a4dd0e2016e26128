//! Property-based tests for the Pokedex catalog
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `filter_props`: Tests for the name filter
//!   - Output is an ordered subset of the input
//!   - Empty search returns everything
//!   - Case-insensitive
//!   - Substring, not prefix
//!   - Idempotent
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```
