//! Built-in mock scenarios.

pub mod tasks;
