pub mod catalog;
pub mod config;
pub mod doctor;
pub mod recommend;

use std::path::{Path, PathBuf};

use btm_advisor_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use btm_advisor_core::ApplicationError;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl CommandResult {
    /// Not an error: the operator simply has not chosen everything yet.
    pub fn incomplete(command: &str, missing: &[&str]) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "incomplete".to_string(),
            error_class: None,
            message: format!("missing required selections: {}", missing.join(", ")),
            details: missing.iter().map(|field| field.to_string()).collect(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        Self::failure_with_details(command, error_class, message, Vec::new(), exit_code)
    }

    pub fn failure_with_details(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        details: Vec<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            details,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        Self::failure(
            command,
            error.error_class(),
            format!("{} ({error})", error.user_message()),
            error.exit_code(),
        )
    }
}

pub fn load_config(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<AppConfig, ApplicationError> {
    AppConfig::load(LoadOptions {
        config_path: config_path.map(PathBuf::from),
        require_file: config_path.is_some(),
        overrides,
    })
    .map_err(|error| ApplicationError::Configuration(error.to_string()))
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
