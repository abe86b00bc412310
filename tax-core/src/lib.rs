pub mod calculations;
pub mod models;

pub use calculations::{
    ScenarioComposer, ScenarioError, compose_scenario, company_tax, flat_rate_tax, fund_tax,
    individual_tax,
};
pub use models::*;
