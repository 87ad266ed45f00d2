use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

identifier!(RegionId);
identifier!(SegmentId);
identifier!(
    /// `none` is reserved for "no on-site generation" and never enters a profile.
    GenerationAssetId
);
identifier!(FinancingId);
identifier!(OperationsId);
identifier!(ValueStreamId);
identifier!(ContractTypeId);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub primary_value: String,
    pub description: String,
    pub notes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub id: SegmentId,
    pub name: String,
    /// Grid connection size band.
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationAsset {
    pub id: GenerationAssetId,
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Higher,
    Medium,
    Lower,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingOption {
    pub id: FinancingId,
    pub name: String,
    pub description: String,
    pub risk_level: RiskLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationsOption {
    pub id: OperationsId,
    pub name: String,
    pub description: String,
    pub complexity: Complexity,
}

/// Who can deliver a value stream: the supplier alone, the supplier under
/// conditions, or only through a partner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Direct,
    Conditional,
    Partnership,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Conditional => "conditional",
            Self::Partnership => "partnership",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionAvailability {
    Primary,
    Secondary,
    Minor,
    Available,
    Unavailable,
}

impl RegionAvailability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Minor => "minor",
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }

    pub fn is_offered(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueStream {
    pub id: ValueStreamId,
    pub name: String,
    pub description: String,
    pub capability: Capability,
    pub regions: BTreeMap<RegionId, RegionAvailability>,
    #[serde(default)]
    pub requires_generation: bool,
}

impl ValueStream {
    pub fn status_in(&self, region: &RegionId) -> Option<RegionAvailability> {
        self.regions.get(region).copied()
    }

    /// A stream without a status for the region is not offered there.
    pub fn is_offered_in(&self, region: &RegionId) -> bool {
        self.status_in(region).is_some_and(|status| status.is_offered())
    }

    pub fn is_unavailable_in(&self, region: &RegionId) -> bool {
        self.status_in(region) == Some(RegionAvailability::Unavailable)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractType {
    pub id: ContractTypeId,
    pub name: String,
    pub description: String,
    /// 1 (lowest) to 5 (highest) risk borne by the customer.
    pub customer_risk: u8,
    /// 1 (lowest) to 5 (highest) risk borne by the supplier.
    pub supplier_risk: u8,
    pub key_terms: Vec<String>,
}

/// The five contract archetypes, ordered by increasing customer risk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractTier {
    Tolling,
    FloorShare,
    RevenueShareFloor,
    RevenueShare,
    FixedFee,
}

impl ContractTier {
    pub const ALL: [ContractTier; 5] = [
        Self::Tolling,
        Self::FloorShare,
        Self::RevenueShareFloor,
        Self::RevenueShare,
        Self::FixedFee,
    ];

    /// Total partition of the integer risk score.
    pub fn from_risk_score(score: i32) -> Self {
        match score {
            i32::MIN..=1 => Self::Tolling,
            2 => Self::FloorShare,
            3 => Self::RevenueShareFloor,
            4 => Self::RevenueShare,
            _ => Self::FixedFee,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Tolling => 0,
            Self::FloorShare => 1,
            Self::RevenueShareFloor => 2,
            Self::RevenueShare => 3,
            Self::FixedFee => 4,
        }
    }

    pub fn contract_id(&self) -> &'static str {
        match self {
            Self::Tolling => "tolling",
            Self::FloorShare => "floorShare",
            Self::RevenueShareFloor => "revenueShareFloor",
            Self::RevenueShare => "revenueShare",
            Self::FixedFee => "fixedFee",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.contract_id() == value.trim())
    }
}
