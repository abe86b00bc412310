//! Integration tests that load the on-disk fixtures and feed them through
//! the calculators.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::{
    BracketSchedule, ScenarioComposer, ScenarioError, TaxYearConfig,
    calculations::IndividualTaxCalculator,
};
use tax_data::{ScenarioLoader, TaxBracketLoader};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_bracket_fixture_matches_builtin_schedule() {
    let schedule = TaxBracketLoader::load_from_file(&fixture("resident_brackets_2025_26.csv"))
        .expect("fixture should load");

    assert_eq!(schedule, BracketSchedule::resident_2025_26());
}

#[test]
fn test_loaded_schedule_drives_individual_tax() {
    let schedule = TaxBracketLoader::load_from_file(&fixture("resident_brackets_2025_26.csv"))
        .expect("fixture should load");
    let calculator = IndividualTaxCalculator::new(&schedule, dec!(0.02));

    assert_eq!(calculator.calculate(dec!(60000)), dec!(9988.00));
    assert_eq!(calculator.calculate(dec!(190000)), dec!(55438.00));
}

#[test]
fn test_scenario_fixture_loads_in_order() {
    let scenarios =
        ScenarioLoader::load_from_file(&fixture("scenarios.csv")).expect("fixture should load");

    assert_eq!(scenarios.len(), 3);
    assert_eq!(scenarios[0].name, "moderate split");
    assert_eq!(scenarios[1].input.company_rate, Some(dec!(0.25)));
    assert_eq!(scenarios[2].name, "under-allocated");
}

#[test]
fn test_scenario_fixture_composes() {
    let scenarios =
        ScenarioLoader::load_from_file(&fixture("scenarios.csv")).expect("fixture should load");
    let config = TaxYearConfig::default();
    let composer = ScenarioComposer::new(&config);

    let results: Vec<_> = scenarios.iter().map(|s| composer.compose(&s.input)).collect();

    assert_eq!(results[0].as_ref().map(|r| r.total_tax), Ok(dec!(41988.00)));
    assert_eq!(results[1].as_ref().map(|r| r.total_tax), Ok(dec!(78288.00)));
    assert_eq!(
        results[2],
        Err(ScenarioError::AllocationMismatch {
            allocated: dec!(199000),
            requested: dec!(200000),
        })
    );
}

#[test]
fn test_missing_scenario_file_is_error() {
    assert!(ScenarioLoader::load_from_file(Path::new("/no/such/scenarios.csv")).is_err());
}
