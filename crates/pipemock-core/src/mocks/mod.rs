//! Mocks management module.
//!
//! - [`MocksManager`]: stores routes and collections, resolves inheritance
//! - [`MocksController`]: holds the active routes and answers requests

pub mod controller;
pub mod manager;
pub mod response;

pub use controller::{MocksController, Request};
pub use manager::{ActiveRoute, MocksManager, ResolveError};
pub use response::MockResponse;
