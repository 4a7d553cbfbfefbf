//! Core domain types for routes, presets, variants and task records.

pub mod collection;
pub mod preset;
pub mod route;
pub mod task;
pub mod variant;
