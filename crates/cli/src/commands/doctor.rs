use std::path::Path;

use btm_advisor_core::config::ConfigOverrides;
use btm_advisor_core::{Catalog, SummaryRenderer};
use serde::Serialize;

use super::load_config;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    fn passed(&self) -> bool {
        self.overall_status == CheckStatus::Pass
    }
}

pub struct DoctorOutput {
    pub passed: bool,
    pub output: String,
}

pub fn run(config_path: Option<&Path>, json_output: bool) -> DoctorOutput {
    let report = build_report(config_path);
    let passed = report.passed();

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
        return DoctorOutput { passed, output };
    }

    DoctorOutput { passed, output: render_human(&report) }
}

fn build_report(config_path: Option<&Path>) -> DoctorReport {
    let checks = vec![
        check_config(config_path),
        check_catalog_integrity(Catalog::standard()),
        check_summary_template(),
    ];

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_config(config_path: Option<&Path>) -> DoctorCheck {
    match load_config(config_path, ConfigOverrides::default()) {
        Ok(config) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Pass,
            details: format!(
                "configuration loaded (log level `{}`, output `{}`)",
                config.logging.level,
                config.output.format.as_str()
            ),
        },
        Err(error) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_catalog_integrity(catalog: &Catalog) -> DoctorCheck {
    let issues = catalog.verify();
    if issues.is_empty() {
        return DoctorCheck {
            name: "catalog_integrity",
            status: CheckStatus::Pass,
            details: format!(
                "{} regions, {} value streams, {} contract types verified",
                catalog.regions().len(),
                catalog.value_streams().len(),
                catalog.contract_types().len()
            ),
        };
    }

    let details = issues
        .iter()
        .map(|issue| format!("{}: {}", issue.code, issue.message))
        .collect::<Vec<_>>()
        .join("; ");
    DoctorCheck { name: "catalog_integrity", status: CheckStatus::Fail, details }
}

fn check_summary_template() -> DoctorCheck {
    match SummaryRenderer::new() {
        Ok(_) => DoctorCheck {
            name: "summary_template",
            status: CheckStatus::Pass,
            details: "embedded summary template parsed".to_string(),
        },
        Err(error) => DoctorCheck {
            name: "summary_template",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
