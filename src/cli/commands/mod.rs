//! Command implementation modules

pub mod migrate;
pub mod plan;
pub mod variables;

pub use migrate::{run_migrate, MigrateParams};
pub use plan::{run_plan_validate, validate_plan, PlanValidation};
pub use variables::{format_variables, run_variables_list};
