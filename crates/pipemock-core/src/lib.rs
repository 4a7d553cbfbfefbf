//! Core library for pipemock.
//!
//! Routes, presets and variants describe canned HTTP exchanges; collections
//! group them into scenarios. [`mocks::MocksController`] replays the active
//! scenario for incoming requests, and [`fixtures::tasks`] ships the task
//! pipeline scenario out of the box.

pub mod config;
pub mod expression;
pub mod fixtures;
pub mod matching;
pub mod mocks;
pub mod paging;
pub mod types;
