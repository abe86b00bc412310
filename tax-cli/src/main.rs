use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use tax_cli::utils::{parse_decimal, parse_rate};
use tax_cli::{OutputFormat, app, logging};
use tax_core::ScenarioInput;
use tax_data::{NamedScenario, ScenarioLoader};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Split an income across an individual, a company and a self-managed super
/// fund, and compare the combined tax with taxing it all as individual income.
#[derive(Debug, Parser)]
#[command(name = "tax-split", version, about)]
struct Cli {
    /// TOML file with rates, tolerance and an optional bracket table.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Bracket table CSV (`min_income,max_income,rate`); overrides the config.
    #[arg(long, global = true)]
    brackets: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    /// Log filter, e.g. `debug` or `tax_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compose a single split.
    Split(SplitArgs),

    /// Compose every split in a CSV file.
    Batch {
        /// CSV with `name,total_income,individual_amount,company_amount,fund_amount[,company_rate]`.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the two sample splits.
    Examples,

    /// Individual tax (including the Medicare levy) on one income.
    Tax {
        #[arg(long, value_parser = parse_decimal)]
        income: Decimal,
    },
}

#[derive(Debug, Args)]
struct SplitArgs {
    /// Total income being split. Accepts `200,000`.
    #[arg(long, value_parser = parse_decimal)]
    total: Decimal,

    #[arg(long, value_parser = parse_decimal)]
    individual: Decimal,

    #[arg(long, value_parser = parse_decimal)]
    company: Decimal,

    #[arg(long, value_parser = parse_decimal)]
    fund: Decimal,

    /// Company rate as a fraction; defaults to the configured rate.
    #[arg(long, value_parser = parse_rate)]
    company_rate: Option<Decimal>,
}

impl From<SplitArgs> for NamedScenario {
    fn from(args: SplitArgs) -> Self {
        NamedScenario {
            name: "split".to_string(),
            input: ScenarioInput {
                total_income: args.total,
                individual_amount: args.individual,
                company_amount: args.company,
                fund_amount: args.fund,
                company_rate: args.company_rate,
            },
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging();
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = app::build_config(cli.config.as_deref(), cli.brackets.as_deref())?;
    debug!(financial_year = %config.financial_year, "configuration ready");

    let scenarios = match cli.command {
        Command::Tax { income } => {
            print!(
                "{}",
                app::render_individual_tax(&config, income, cli.output)?
            );
            return Ok(());
        }
        Command::Split(args) => vec![NamedScenario::from(args)],
        Command::Batch { file } => ScenarioLoader::load_from_file(&file)
            .with_context(|| format!("failed to load scenarios: {}", file.display()))?,
        Command::Examples => app::illustrative_scenarios(),
    };

    let output = app::render_scenarios(&config, &scenarios, cli.output)?;
    print!("{}", output.rendered);
    if cli.output == OutputFormat::Json {
        println!();
    }

    if output.failed > 0 {
        anyhow::bail!(
            "{} of {} scenarios failed",
            output.failed,
            scenarios.len()
        );
    }

    Ok(())
}
