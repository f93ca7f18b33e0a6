//! Data model and persistence for goalpath.
//!
//! - [`models`]: goals, tasks, and their enumerated fields.
//! - [`store`]: the [`store::StateStore`] port plus an in-memory implementation.
//! - [`file_store`]: the JSON-file implementation used by the CLI.
//! - [`queries`]: pure filtering, ordering, and progress helpers.

pub mod config;
pub mod file_store;
pub mod models;
pub mod queries;
pub mod store;
