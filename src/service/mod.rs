//! CatalogService: validated creates and filtered lists.

mod catalog;
mod validation;
pub use catalog::{ArtistFilter, CatalogService, ReleaseFilter};
pub use validation::RequestValidator;
