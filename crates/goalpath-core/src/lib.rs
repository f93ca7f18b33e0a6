//! Planning engine for goalpath.
//!
//! - [`calendar`]: date arithmetic shared by the generators and views.
//! - [`plan`]: dated task generation, regeneration, and strategy acceptance.
//! - [`strategy`]: the four relative-day strategy generators.
//! - [`analysis`]: plan-service boundary, response validation, and fallback.
//! - [`board`]: the session state store over an injected persistence port.

pub mod analysis;
pub mod board;
pub mod calendar;
pub mod plan;
pub mod strategy;
