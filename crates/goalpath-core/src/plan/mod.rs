//! Plan management: calendar generation, regeneration, strategy acceptance.

pub mod accept;
pub mod generate;
pub mod options;

pub use accept::{GoalDetails, accept_strategy};
pub use generate::{MILESTONE_ORDER_OFFSET, PlanError, available_dates, generate_plan, update_plan};
pub use options::GenerationOptions;
