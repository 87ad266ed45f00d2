use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown {kind} `{id}`")]
    UnknownIdentifier { kind: &'static str, id: String },
    #[error("value stream `{stream}` is not available in region `{region}`")]
    ValueStreamUnavailable { stream: String, region: String },
    #[error("a region must be selected before value streams")]
    RegionRequired,
}

impl DomainError {
    pub fn unknown(kind: &'static str, id: impl Into<String>) -> Self {
        Self::UnknownIdentifier { kind, id: id.into() }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid input: {0}")]
    Input(String),
    #[error("rendering failure: {0}")]
    Rendering(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable machine-readable class for command payloads.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "profile_validation",
            Self::Input(_) => "input",
            Self::Rendering(_) => "rendering",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Domain(_) | Self::Configuration(_) => 2,
            Self::Input(_) => 3,
            Self::Rendering(_) => 4,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) | Self::Input(_) => {
                "The customer profile could not be processed. Check the selections and try again."
            }
            Self::Rendering(_) => "The recommendation could not be rendered.",
            Self::Configuration(_) => "The advisor configuration is invalid.",
        }
    }
}
