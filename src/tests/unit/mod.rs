//! Unit tests driven through the public store API.

mod catalog_store_tests;
