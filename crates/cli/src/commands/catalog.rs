use btm_advisor_core::{ApplicationError, Catalog, ProfileSelection, RegionId};
use serde::Serialize;

use super::CommandResult;

const COMMAND: &str = "catalog";

#[derive(Debug, Serialize)]
struct AvailableStream<'a> {
    id: &'a str,
    name: &'a str,
    status: &'a str,
    capability: &'a str,
    requires_generation: bool,
}

#[derive(Debug, Serialize)]
struct RegionStreams<'a> {
    region: &'a str,
    value_streams: Vec<AvailableStream<'a>>,
}

/// Whole catalog as JSON, or just what an operator may pick once `region` is
/// chosen.
pub fn run(region: Option<&str>) -> CommandResult {
    let catalog = Catalog::standard();

    let rendered = match region {
        None => serde_json::to_string_pretty(catalog),
        Some(region) => {
            let mut selection = ProfileSelection::new(catalog);
            if let Err(error) = selection.select_region(region) {
                return CommandResult::from_error(COMMAND, &ApplicationError::from(error));
            }

            let region_id = RegionId::new(region.trim());
            let value_streams = selection
                .available_value_streams()
                .into_iter()
                .map(|stream| AvailableStream {
                    id: stream.id.as_str(),
                    name: &stream.name,
                    status: stream
                        .status_in(&region_id)
                        .map_or("unknown", |status| status.as_str()),
                    capability: stream.capability.as_str(),
                    requires_generation: stream.requires_generation,
                })
                .collect();

            serde_json::to_string_pretty(&RegionStreams { region: region.trim(), value_streams })
        }
    };

    match rendered {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => {
            CommandResult::from_error(COMMAND, &ApplicationError::Rendering(error.to_string()))
        }
    }
}
