use std::env;
use std::fs;
use std::path::Path;

use btm_advisor_core::config::{resolve_config_path, ConfigOverrides};
use toml::Value;

use super::load_config;

pub fn run(config_path: Option<&Path>) -> String {
    let config = match load_config(config_path, ConfigOverrides::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(config_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let file_label = config_file_path.as_deref().map(|path| path.display().to_string());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            &["BTM_ADVISOR_LOGGING_LEVEL", "BTM_ADVISOR_LOG_LEVEL"],
            config_file_doc.as_ref(),
            file_label.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        config.logging.format.as_str(),
        field_source(
            "logging.format",
            &["BTM_ADVISOR_LOGGING_FORMAT", "BTM_ADVISOR_LOG_FORMAT"],
            config_file_doc.as_ref(),
            file_label.as_deref(),
        ),
    ));
    lines.push(render_line(
        "output.format",
        config.output.format.as_str(),
        field_source(
            "output.format",
            &["BTM_ADVISOR_OUTPUT_FORMAT"],
            config_file_doc.as_ref(),
            file_label.as_deref(),
        ),
    ));

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

/// First env key that is set wins, matching the alias order `load` uses.
fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_label: Option<&str>,
) -> String {
    let set_env_key = env_keys
        .iter()
        .find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()));
    if let Some(env_key) = set_env_key {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            return format!("file ({})", config_file_label.unwrap_or("config file"));
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
