pub mod app;
pub mod config;
pub mod logging;
pub mod report;
pub mod utils;

pub use app::{BatchOutput, illustrative_scenarios, render_scenarios};
pub use config::{CliConfig, ConfigError};
pub use report::{OutputFormat, ScenarioReport, render_reports};
