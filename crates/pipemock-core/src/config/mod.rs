//! Loading routes and collections from YAML, JSON and JSONC files.

pub mod error;
pub mod parser;

pub use error::ConfigError;
pub use parser::{load_collections, load_routes};
