use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use btm_advisor_cli::commands::recommend::RecommendArgs;
use btm_advisor_cli::commands::{catalog, config, doctor, recommend};
use serde_json::Value;
use tempfile::TempDir;

fn flanders_sme() -> RecommendArgs {
    RecommendArgs {
        region: Some("flanders".to_string()),
        segment: Some("sme".to_string()),
        financing: Some("own".to_string()),
        operations: Some("handsoff".to_string()),
        value_streams: vec!["peakshaving".to_string()],
        ..RecommendArgs::default()
    }
}

#[test]
fn recommend_renders_text_summary_by_default() {
    with_env(&[], || {
        let result = recommend::run(&flanders_sme(), None);
        assert_eq!(result.exit_code, 0, "expected successful recommendation");

        assert!(result.output.starts_with("BTM BATTERY ADVISOR - RECOMMENDATION SUMMARY"));
        assert!(result.output.contains("- Contract Type: Tolling Agreement"));
        assert!(result.output.contains("- Capability Status: DIRECT"));
        assert!(!result.output.contains("WARNINGS"));
    });
}

#[test]
fn recommend_emits_json_when_configured_by_env() {
    with_env(&[("BTM_ADVISOR_OUTPUT_FORMAT", "json")], || {
        let args = RecommendArgs {
            region: Some("wallonia".to_string()),
            segment: Some("large".to_string()),
            generation: vec!["pv".to_string()],
            financing: Some("flexible".to_string()),
            operations: Some("active".to_string()),
            value_streams: vec!["tou".to_string(), "ancillary".to_string()],
            ..RecommendArgs::default()
        };

        let result = recommend::run(&args, None);
        assert_eq!(result.exit_code, 0, "expected successful recommendation");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "recommend");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["recommendation"]["contract_type"]["id"], "fixedFee");
        assert_eq!(payload["recommendation"]["capability_status"], "partnership");
        assert_eq!(payload["recommendation"]["risk_score"], 5);
        assert_eq!(payload["profile"]["region"], "wallonia");
    });
}

#[test]
fn recommend_reports_missing_selections_as_incomplete() {
    with_env(&[], || {
        let args = RecommendArgs {
            region: Some("brussels".to_string()),
            ..RecommendArgs::default()
        };

        let result = recommend::run(&args, None);
        assert_eq!(result.exit_code, 0, "incomplete profiles are not failures");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "incomplete");
        assert_eq!(
            payload["details"],
            serde_json::json!(["financing", "operations", "value_streams"])
        );
    });
}

#[test]
fn recommend_waits_for_a_value_stream() {
    with_env(&[], || {
        let args = RecommendArgs { value_streams: Vec::new(), ..flanders_sme() };

        let result = recommend::run(&args, None);
        assert_eq!(result.exit_code, 0, "incomplete profiles are not failures");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "incomplete");
        assert_eq!(payload["details"], serde_json::json!(["value_streams"]));
        assert_eq!(payload["message"], "missing required selections: value_streams");
    });
}

#[test]
fn recommend_rejects_value_stream_not_offered_in_region() {
    with_env(&[], || {
        let args = RecommendArgs {
            value_streams: vec!["tou".to_string()],
            ..flanders_sme()
        };

        let result = recommend::run(&args, None);
        assert_eq!(result.exit_code, 2, "expected profile validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "profile_validation");
        let message = payload["message"].as_str().unwrap_or_default();
        assert!(message.contains("`tou`"), "message should name the stream: {message}");
    });
}

#[test]
fn recommend_validates_profile_files() {
    with_env(&[], || {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("customer.json");
        fs::write(
            &path,
            r#"{
  "region": "flanders",
  "generation": ["none"],
  "financing": "own",
  "operations": "handsoff",
  "value_streams": ["tou"]
}"#,
        )
        .expect("write profile");

        let args = RecommendArgs { profile: Some(path), ..RecommendArgs::default() };
        let result = recommend::run(&args, None);
        assert_eq!(result.exit_code, 2, "expected profile validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "profile_validation");
        let details: Vec<&str> = payload["details"]
            .as_array()
            .map(|details| details.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        assert!(details.iter().any(|detail| detail.starts_with("EXCLUSIVE_GENERATION_NONE")));
        assert!(details.iter().any(|detail| detail.starts_with("VALUE_STREAM_UNAVAILABLE")));
    });
}

#[test]
fn recommend_accepts_valid_profile_files() {
    with_env(&[("BTM_ADVISOR_OUTPUT_FORMAT", "json")], || {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("customer.json");
        fs::write(
            &path,
            r#"{"region":"brussels","segment":"midmarket","financing":"thirdparty","operations":"handsoff","value_streams":["selfconsumption"]}"#,
        )
        .expect("write profile");

        let args = RecommendArgs { profile: Some(path), ..RecommendArgs::default() };
        let result = recommend::run(&args, None);
        assert_eq!(result.exit_code, 0, "expected successful recommendation");

        let payload = parse_payload(&result.output);
        let codes: Vec<&str> = payload["recommendation"]["warnings"]
            .as_array()
            .map(|warnings| warnings.iter().filter_map(|w| w["code"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(codes, vec!["brussels_without_generation", "self_consumption_without_generation"]);
    });
}

#[test]
fn recommend_reports_unreadable_profile_as_input_error() {
    with_env(&[], || {
        let dir = TempDir::new().expect("tempdir");
        let args = RecommendArgs {
            profile: Some(dir.path().join("missing.json")),
            ..RecommendArgs::default()
        };

        let result = recommend::run(&args, None);
        assert_eq!(result.exit_code, 3, "expected input failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "input");
        let message = payload["message"].as_str().unwrap_or_default();
        assert!(message.contains("missing.json"));
    });
}

#[test]
fn recommend_fails_when_explicit_config_is_missing() {
    with_env(&[], || {
        let dir = TempDir::new().expect("tempdir");
        let missing = dir.path().join("btm-advisor.toml");

        let result = recommend::run(&flanders_sme(), Some(missing.as_path()));
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn catalog_lists_streams_available_in_region() {
    let result = catalog::run(Some("brussels"));
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["region"], "brussels");
    let ids: Vec<&str> = payload["value_streams"]
        .as_array()
        .map(|streams| streams.iter().filter_map(|s| s["id"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ids.len(), 5);
    assert!(!ids.contains(&"tou"));
    assert_eq!(payload["value_streams"][0]["status"], "minor");
}

#[test]
fn catalog_rejects_unknown_region() {
    let result = catalog::run(Some("atlantis"));
    assert_eq!(result.exit_code, 2);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "catalog");
    assert_eq!(payload["error_class"], "profile_validation");
}

#[test]
fn catalog_without_region_dumps_reference_data() {
    let result = catalog::run(None);
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["regions"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["contract_types"].as_array().map(Vec::len), Some(5));
}

#[test]
fn config_attributes_sources() {
    with_env(&[("BTM_ADVISOR_LOG_LEVEL", "info")], || {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("btm-advisor.toml");
        fs::write(&path, "[output]\nformat = \"json\"\n").expect("write config");

        let output = config::run(Some(path.as_path()));

        assert!(output.contains("- logging.level = info (source: env (BTM_ADVISOR_LOG_LEVEL))"));
        assert!(output.contains("- logging.format = compact (source: default)"));
        assert!(output.contains(&format!("- output.format = json (source: file ({}))", path.display())));
    });
}

#[test]
fn doctor_passes_with_default_config() {
    with_env(&[], || {
        let report = doctor::run(None, true);
        assert!(report.passed, "expected doctor to pass: {}", report.output);

        let payload = parse_payload(&report.output);
        assert_eq!(payload["overall_status"], "pass");
        let names: Vec<&str> = payload["checks"]
            .as_array()
            .map(|checks| checks.iter().filter_map(|c| c["name"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["config_validation", "catalog_integrity", "summary_template"]);
    });
}

#[test]
fn doctor_flags_invalid_config() {
    with_env(&[("BTM_ADVISOR_LOGGING_LEVEL", "chatty")], || {
        let report = doctor::run(None, false);
        assert!(!report.passed);
        assert!(report.output.starts_with("doctor: one or more readiness checks failed"));
        assert!(report.output.contains("- [fail] config_validation:"));
        assert!(report.output.contains("- [ok] catalog_integrity:"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "BTM_ADVISOR_LOGGING_LEVEL",
        "BTM_ADVISOR_LOGGING_FORMAT",
        "BTM_ADVISOR_LOG_LEVEL",
        "BTM_ADVISOR_LOG_FORMAT",
        "BTM_ADVISOR_OUTPUT_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
