//! Read-side helpers over the persisted goal and task collections.

pub mod goals;
pub mod tasks;
