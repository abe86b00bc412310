//! CSV loaders for bracket tables and batches of split scenarios.

mod loader;
mod scenario_loader;

pub use loader::{TaxBracketLoader, TaxBracketLoaderError, TaxBracketRecord};
pub use scenario_loader::{NamedScenario, ScenarioLoadError, ScenarioLoader};
