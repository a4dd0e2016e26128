//! Crate-internal test suite
//!
//! - `common`: record fixtures, including the full generation-one catalogue
//! - `unit`: store behaviour through the consumer handle
//! - `property`: filter invariants with proptest

mod property;
mod unit;
