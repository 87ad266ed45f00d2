pub mod commands;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use btm_advisor_core::config::{AppConfig, ConfigOverrides, LogFormat};
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(
    name = "btm-advisor",
    about = "Behind-the-meter battery commercial advisor",
    long_about = "Turn a customer profile into a recommended ownership, operating model and contract structure for a behind-the-meter battery in Belgium.",
    after_help = "Examples:\n  btm-advisor recommend --region flanders --segment sme --financing own --operations handsoff --value-stream peakshaving\n  btm-advisor recommend --profile customer.json --format json\n  btm-advisor catalog --region wallonia\n  btm-advisor doctor --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a btm-advisor.toml config file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Recommend a commercial structure for a customer profile")]
    Recommend(commands::recommend::RecommendArgs),
    #[command(about = "Print the reference catalog, or the value streams offered in a region")]
    Catalog {
        #[arg(long, help = "Only list value streams available in this region")]
        region: Option<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, catalog integrity and the summary template")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    // Commands report config failures themselves; logging just stays off.
    if let Ok(config) = commands::load_config(config_path, ConfigOverrides::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Recommend(args) => commands::recommend::run(&args, config_path),
        Command::Catalog { region } => commands::catalog::run(region.as_deref()),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(config_path) }
        }
        Command::Doctor { json } => {
            let report = commands::doctor::run(config_path, json);
            commands::CommandResult {
                exit_code: if report.passed { 0 } else { 1 },
                output: report.output,
            }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(config: &AppConfig) {
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::WARN);

    let builder =
        tracing_subscriber::fmt().with_target(false).with_max_level(log_level).with_writer(io::stderr);
    let result = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if let Err(error) = result {
        eprintln!("logging already initialized: {error}");
    }
}
