use crate::advisor::catalog::ids;
use crate::advisor::facts::{FinancingChoice, ProfileFacts, SegmentTier};
use crate::domain::recommendation::NextStepSection;

pub const DATA_TO_REQUEST: &str = "Data to Request";
pub const INTERNAL_ACTIONS: &str = "Internal Actions";
pub const CUSTOMER_DISCUSSION: &str = "Customer Discussion Points";

/// Fixed candidate lists; conditional items are dropped, never shown disabled.
pub fn build(facts: &ProfileFacts) -> Vec<NextStepSection> {
    vec![
        section(
            DATA_TO_REQUEST,
            [
                Some("Load profile data (15-minute intervals, 12 months ideal)"),
                Some("Current peak demand (kW) and annual consumption (MWh)"),
                facts
                    .in_region(ids::FLANDERS)
                    .then_some("Fluvius capacity tariff invoice / My Fluvius data"),
                facts.has_generation.then_some("Generation profile data (if available)"),
                Some("Grid connection details and any constraints"),
            ],
        ),
        section(
            INTERNAL_ACTIONS,
            [
                facts
                    .has_ancillary()
                    .then_some("Engage aggregator partner for prequalification discussion"),
                Some("Prepare indicative business case with available data"),
                Some("Technical review: assess metering requirements"),
                (facts.segment == SegmentTier::Large)
                    .then_some("Involve commercial/legal for contract structuring"),
            ],
        ),
        section(
            CUSTOMER_DISCUSSION,
            [
                Some("Confirm investment timeline and decision process"),
                Some("Understand priority: cost reduction vs. revenue generation"),
                Some("Clarify operational involvement appetite"),
                (facts.financing == FinancingChoice::Flexible)
                    .then_some("Explore ownership preference drivers"),
                Some("Discuss any existing flexibility contracts or aggregator relationships"),
            ],
        ),
    ]
}

fn section<const N: usize>(category: &str, candidates: [Option<&str>; N]) -> NextStepSection {
    NextStepSection {
        category: category.to_owned(),
        items: candidates.into_iter().flatten().map(str::to_owned).collect(),
    }
}
