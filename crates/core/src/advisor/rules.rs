use crate::advisor::facts::{FinancingChoice, OperationsChoice, ProfileFacts, SegmentTier};
use crate::domain::recommendation::RecommendationWarning;
use crate::domain::reference::{Capability, ContractTier};

/// A chosen label plus the sentence that justifies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleOutcome {
    pub label: &'static str,
    pub justification: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapabilityAssessment {
    pub status: Capability,
    pub advisory: Option<RecommendationWarning>,
}

pub const ANCILLARY_PARTNERSHIP: &str = "ancillary_partnership";
pub const WHOLESALE_MARKET_ACCESS: &str = "wholesale_market_access";

pub fn ownership(facts: &ProfileFacts) -> RuleOutcome {
    match facts.financing {
        FinancingChoice::Own => RuleOutcome {
            label: "Customer-Owned",
            justification: "Customer owns the asset, capturing depreciation benefits and maintaining full control.",
        },
        FinancingChoice::ThirdParty => RuleOutcome {
            label: "Third-Party Owned (EaaS)",
            justification: "Third-party ownership keeps the asset off balance sheet with predictable costs.",
        },
        FinancingChoice::Flexible => RuleOutcome {
            label: "Flexible / Lease",
            justification: "Lease structure provides flexibility to decide on ownership later.",
        },
    }
}

/// Ancillary services win over wholesale; the two never both apply.
pub fn capability(facts: &ProfileFacts) -> CapabilityAssessment {
    if facts.has_ancillary() {
        return CapabilityAssessment {
            status: Capability::Partnership,
            advisory: Some(RecommendationWarning::info(
                ANCILLARY_PARTNERSHIP,
                "Ancillary services (FCR/aFRR/mFRR) require aggregator partnership — we facilitate this connection.",
            )),
        };
    }

    if facts.has_wholesale() && facts.operations == OperationsChoice::Active {
        return CapabilityAssessment {
            status: Capability::Conditional,
            advisory: Some(RecommendationWarning::info(
                WHOLESALE_MARKET_ACCESS,
                "Wholesale arbitrage for self-operating customers requires market access or pass-through contract structure.",
            )),
        };
    }

    CapabilityAssessment { status: Capability::Direct, advisory: None }
}

pub fn operating_model(facts: &ProfileFacts) -> RuleOutcome {
    match (facts.operations, facts.has_ancillary()) {
        (OperationsChoice::HandsOff, false) => RuleOutcome {
            label: "Supplier-Managed",
            justification: "Hands-off operation with supplier handling all optimization within capability scope.",
        },
        (OperationsChoice::HandsOff, true) => RuleOutcome {
            label: "Aggregator-Managed (via Partnership)",
            justification: "Full-stack value including ancillary services requires specialized aggregator partnership.",
        },
        (OperationsChoice::Oversight, false) => RuleOutcome {
            label: "Supplier-Managed with Oversight",
            justification: "Supplier operates with regular reporting and customer input on priorities.",
        },
        (OperationsChoice::Oversight, true) => RuleOutcome {
            label: "Hybrid (Supplier + Aggregator)",
            justification: "Combined management model with oversight: supplier handles BTM, aggregator handles ancillary.",
        },
        (OperationsChoice::Active, false) => RuleOutcome {
            label: "Self-Operate / Minimal Service",
            justification: "Customer controls dispatch with optional optimization platform/support.",
        },
        (OperationsChoice::Active, true) => RuleOutcome {
            label: "Co-Pilot (Customer + Aggregator)",
            justification: "Customer maintains active involvement alongside aggregator for ancillary services.",
        },
    }
}

/// Inferred risk appetite. Unbounded; [`ContractTier::from_risk_score`]
/// partitions every value.
pub fn risk_score(facts: &ProfileFacts) -> i32 {
    let financing = match facts.financing {
        FinancingChoice::Own => 2,
        FinancingChoice::Flexible => 1,
        FinancingChoice::ThirdParty => 0,
    };
    let operations = match facts.operations {
        OperationsChoice::Active => 2,
        OperationsChoice::Oversight => 1,
        OperationsChoice::HandsOff => 0,
    };
    // Counted once even when both market streams are selected.
    let market_exposure = i32::from(facts.has_ancillary() || facts.has_wholesale());
    let segment = match facts.segment {
        SegmentTier::Large => 1,
        SegmentTier::Sme => -1,
        SegmentTier::MidMarket | SegmentTier::Unspecified => 0,
    };

    financing + operations + market_exposure + segment
}

pub fn contract_tier(facts: &ProfileFacts) -> ContractTier {
    ContractTier::from_risk_score(risk_score(facts))
}
