use crate::advisor::catalog::ids;
use crate::advisor::facts::{FinancingChoice, OperationsChoice, ProfileFacts, SegmentTier};
use crate::domain::recommendation::RecommendationWarning;

pub const WALLONIA_TOU_PENDING: &str = "wallonia_tou_pending";
pub const BRUSSELS_WITHOUT_GENERATION: &str = "brussels_without_generation";
pub const SME_SELF_OPERATION: &str = "sme_self_operation";
pub const THIRD_PARTY_SELF_OPERATION: &str = "third_party_self_operation";
pub const SELF_CONSUMPTION_WITHOUT_GENERATION: &str = "self_consumption_without_generation";

/// Regional, segment, financing and generation checks, in reporting order.
/// None of these block the recommendation.
pub fn collect(facts: &ProfileFacts) -> Vec<RecommendationWarning> {
    let mut warnings = Vec::new();

    if facts.in_region(ids::WALLONIA) && facts.has_stream(ids::TOU) {
        warnings.push(RecommendationWarning::warning(
            WALLONIA_TOU_PENDING,
            "ToU grid arbitrage available from January 2026 — plan for future value or focus on other streams initially.",
        ));
    }

    if facts.in_region(ids::BRUSSELS) && !facts.has_generation {
        warnings.push(RecommendationWarning::warning(
            BRUSSELS_WITHOUT_GENERATION,
            "Limited value proposition in Brussels without on-site generation — primary BTM value requires PV, wind, or cogeneration.",
        ));
    }

    if facts.segment == SegmentTier::Sme && facts.operations == OperationsChoice::Active {
        warnings.push(RecommendationWarning::warning(
            SME_SELF_OPERATION,
            "Active self-operation may be complex for SME customers — consider managed service to reduce operational burden.",
        ));
    }

    if facts.financing == FinancingChoice::ThirdParty
        && facts.operations == OperationsChoice::Active
    {
        warnings.push(RecommendationWarning::warning(
            THIRD_PARTY_SELF_OPERATION,
            "Third-party ownership with self-operation is unusual — clarify dispatch authority and responsibilities.",
        ));
    }

    if facts.has_stream(ids::SELF_CONSUMPTION) && !facts.has_generation {
        warnings.push(RecommendationWarning::error(
            SELF_CONSUMPTION_WITHOUT_GENERATION,
            "Self-consumption requires on-site generation (PV, wind, or cogeneration).",
        ));
    }

    warnings
}
