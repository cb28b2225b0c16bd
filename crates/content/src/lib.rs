#![forbid(unsafe_code)]

pub mod builtin;
pub mod json;
pub mod repository;

pub use builtin::{BuiltinCatalog, DEFAULT_CHECKOUT_URL, default_catalog};
pub use json::{JsonFileCatalog, parse_catalog, to_json_pretty};
pub use repository::{CatalogSource, ContentError, InMemoryCatalogSource, source_for};
