use serde::{Deserialize, Serialize};

use crate::domain::reference::{Capability, ContractType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningLevel {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationWarning {
    pub code: String,
    pub level: WarningLevel,
    pub message: String,
}

impl RecommendationWarning {
    pub fn info(code: &str, message: &str) -> Self {
        Self { code: code.to_owned(), level: WarningLevel::Info, message: message.to_owned() }
    }

    pub fn warning(code: &str, message: &str) -> Self {
        Self { code: code.to_owned(), level: WarningLevel::Warning, message: message.to_owned() }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self { code: code.to_owned(), level: WarningLevel::Error, message: message.to_owned() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStepSection {
    pub category: String,
    pub items: Vec<String>,
}

/// Engine output. Discarded and rebuilt whenever the profile changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub ownership: String,
    pub operating_model: String,
    pub contract_type: ContractType,
    pub capability_status: Capability,
    pub risk_score: i32,
    pub warnings: Vec<RecommendationWarning>,
    pub justification: Vec<String>,
    pub next_steps: Vec<NextStepSection>,
}

impl Recommendation {
    pub fn has_errors(&self) -> bool {
        self.warnings.iter().any(|warning| warning.level == WarningLevel::Error)
    }

    pub fn warnings_at(&self, level: WarningLevel) -> impl Iterator<Item = &RecommendationWarning> {
        self.warnings.iter().filter(move |warning| warning.level == level)
    }

    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|warning| warning.code == code)
    }
}
