//! HTTP handlers for the catalog and its schema lifecycle.

pub mod admin;
pub mod catalog;
pub use catalog::*;
