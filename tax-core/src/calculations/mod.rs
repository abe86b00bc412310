//! Tax calculations for individuals, companies and superannuation funds.
//!
//! Every function here is pure: inputs in, rounded amounts out.

pub mod common;
pub mod flat_rate;
pub mod individual;
pub mod scenario;

pub use flat_rate::{FlatRateCalculator, company_tax, flat_rate_tax, fund_tax};
pub use individual::{IndividualTaxCalculator, individual_tax};
pub use scenario::{ScenarioComposer, ScenarioError, compose_scenario};
