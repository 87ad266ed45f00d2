use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use btm_advisor_core::config::{ConfigOverrides, OutputFormat};
use btm_advisor_core::{
    recommend, validate_profile, ApplicationError, Catalog, CustomerProfile, ProfileSelection,
    Recommendation, SummaryRenderer,
};
use clap::Args;
use serde::Serialize;
use tracing::info;

use super::{load_config, CommandResult};

const COMMAND: &str = "recommend";

#[derive(Debug, Clone, Default, Args)]
pub struct RecommendArgs {
    #[arg(long, help = "Region id (flanders, wallonia, brussels)")]
    pub region: Option<String>,
    #[arg(long, help = "Customer segment id (sme, midmarket, large)")]
    pub segment: Option<String>,
    #[arg(
        long,
        value_delimiter = ',',
        help = "On-site generation ids, repeatable or comma separated; `none` clears"
    )]
    pub generation: Vec<String>,
    #[arg(long, help = "Financing preference id (own, thirdparty, flexible)")]
    pub financing: Option<String>,
    #[arg(long, help = "Operations preference id (handsoff, oversight, active)")]
    pub operations: Option<String>,
    #[arg(
        long = "value-stream",
        value_delimiter = ',',
        help = "Value stream ids, repeatable or comma separated; must be offered in the region. At least one is required before a recommendation is shown"
    )]
    pub value_streams: Vec<String>,
    #[arg(
        long,
        conflicts_with_all = ["region", "segment", "generation", "financing", "operations", "value_streams"],
        help = "Read the customer profile from a JSON file instead of flags"
    )]
    pub profile: Option<PathBuf>,
    #[arg(long, help = "Output format: text or json (defaults to [output] format)")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
struct RecommendPayload<'a> {
    command: &'static str,
    status: &'static str,
    profile: &'a CustomerProfile,
    recommendation: &'a Recommendation,
}

pub fn run(args: &RecommendArgs, config_path: Option<&Path>) -> CommandResult {
    let overrides = ConfigOverrides { output_format: args.format, ..ConfigOverrides::default() };
    let config = match load_config(config_path, overrides) {
        Ok(config) => config,
        Err(error) => return CommandResult::from_error(COMMAND, &error),
    };

    let catalog = Catalog::standard();
    let profile = match &args.profile {
        Some(path) => match read_profile(path) {
            Ok(profile) => profile,
            Err(error) => {
                return CommandResult::from_error(
                    COMMAND,
                    &ApplicationError::Input(format!("{error:#}")),
                )
            }
        },
        None => match select_from_flags(args) {
            Ok(profile) => profile,
            Err(error) => return CommandResult::from_error(COMMAND, &error),
        },
    };

    let validation = validate_profile(catalog, &profile);
    if !validation.valid {
        let details = validation
            .violations
            .iter()
            .map(|violation| match &violation.suggestion {
                Some(suggestion) => {
                    format!("{}: {} ({suggestion})", violation.code, violation.message)
                }
                None => format!("{}: {}", violation.code, violation.message),
            })
            .collect();
        return CommandResult::failure_with_details(
            COMMAND,
            "profile_validation",
            "customer profile has invalid selections",
            details,
            2,
        );
    }

    let missing = missing_selections(&profile);
    let recommendation = match recommend(&profile) {
        Some(recommendation) if missing.is_empty() => recommendation,
        _ => {
            info!(
                event_name = "cli.recommend.incomplete",
                missing = ?missing,
                "recommendation deferred until required selections are made"
            );
            return CommandResult::incomplete(COMMAND, &missing);
        }
    };

    info!(
        event_name = "cli.recommend.completed",
        contract_type = recommendation.contract_type.id.as_str(),
        risk_score = recommendation.risk_score,
        warning_count = recommendation.warnings.len(),
        output_format = config.output.format.as_str(),
        "recommendation produced"
    );

    match config.output.format {
        OutputFormat::Json => {
            let payload = RecommendPayload {
                command: COMMAND,
                status: "ok",
                profile: &profile,
                recommendation: &recommendation,
            };
            match serde_json::to_string_pretty(&payload) {
                Ok(output) => CommandResult { exit_code: 0, output },
                Err(error) => CommandResult::from_error(
                    COMMAND,
                    &ApplicationError::Rendering(error.to_string()),
                ),
            }
        }
        OutputFormat::Text => {
            let rendered = SummaryRenderer::new()
                .and_then(|renderer| renderer.render(catalog, &profile, &recommendation));
            match rendered {
                Ok(summary) => CommandResult { exit_code: 0, output: summary.trim_end().to_owned() },
                Err(error) => CommandResult::from_error(COMMAND, &error),
            }
        }
    }
}

/// The engine only needs region, financing and operations, but an operator
/// gets no recommendation until at least one value stream is picked too.
fn missing_selections(profile: &CustomerProfile) -> Vec<&'static str> {
    let mut missing = profile.missing_fields();
    if profile.value_streams.is_empty() {
        missing.push("value_streams");
    }
    missing
}

fn read_profile(path: &Path) -> anyhow::Result<CustomerProfile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read profile file `{}`", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("could not parse profile file `{}`", path.display()))
}

/// Flags go through the same collector an interactive operator would use,
/// region first so value streams can be checked against it.
fn select_from_flags(args: &RecommendArgs) -> Result<CustomerProfile, ApplicationError> {
    let mut selection = ProfileSelection::default();

    if let Some(region) = &args.region {
        selection.select_region(region)?;
    }
    if let Some(segment) = &args.segment {
        selection.select_segment(segment)?;
    }
    for asset in &args.generation {
        selection.add_generation(asset)?;
    }
    if let Some(financing) = &args.financing {
        selection.select_financing(financing)?;
    }
    if let Some(operations) = &args.operations {
        selection.select_operations(operations)?;
    }
    for stream in &args.value_streams {
        selection.add_value_stream(stream)?;
    }

    Ok(selection.snapshot())
}
