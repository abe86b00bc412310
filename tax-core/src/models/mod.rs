mod entity_kind;
mod scenario;
mod tax_bracket;
mod tax_year_config;

pub use entity_kind::EntityKind;
pub use scenario::{
    InputRangeError, MAX_AMOUNT, MAX_RATE, ScenarioInput, ScenarioResult, check_amount, check_rate,
};
pub use tax_bracket::{BracketSchedule, BracketScheduleError, TaxBracket};
pub use tax_year_config::TaxYearConfig;
