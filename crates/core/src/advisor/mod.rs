pub mod catalog;
pub mod facts;
pub mod intake;
pub mod next_steps;
pub mod rules;
pub mod summary;
pub mod warnings;

use tracing::debug;

use crate::domain::{profile::CustomerProfile, recommendation::Recommendation};

use self::{catalog::Catalog, facts::ProfileFacts};

pub trait AdvisorEngine: Send + Sync {
    /// `None` means the profile is not complete yet, not that it is invalid.
    fn recommend(&self, profile: &CustomerProfile) -> Option<Recommendation>;
}

/// Rule-based engine over the process-wide catalog. Holds no state between
/// calls.
#[derive(Clone, Copy, Debug)]
pub struct DeterministicAdvisor {
    catalog: &'static Catalog,
}

impl DeterministicAdvisor {
    pub fn new(catalog: &'static Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }
}

impl Default for DeterministicAdvisor {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}

impl AdvisorEngine for DeterministicAdvisor {
    fn recommend(&self, profile: &CustomerProfile) -> Option<Recommendation> {
        recommend_with_catalog(self.catalog, profile)
    }
}

pub fn recommend(profile: &CustomerProfile) -> Option<Recommendation> {
    recommend_with_catalog(Catalog::standard(), profile)
}

fn recommend_with_catalog(catalog: &Catalog, profile: &CustomerProfile) -> Option<Recommendation> {
    let Some(facts) = ProfileFacts::derive(catalog, profile) else {
        debug!(
            event_name = "advisor.recommend.incomplete",
            missing = ?profile.missing_fields(),
            "profile is missing required selections"
        );
        return None;
    };

    let ownership = rules::ownership(&facts);
    let capability = rules::capability(&facts);
    let operating_model = rules::operating_model(&facts);
    let risk_score = rules::risk_score(&facts);
    let tier = rules::contract_tier(&facts);

    let warnings: Vec<_> =
        capability.advisory.into_iter().chain(warnings::collect(&facts)).collect();

    debug!(
        event_name = "advisor.recommend.evaluated",
        region = %facts.region,
        risk_score,
        contract_tier = tier.contract_id(),
        capability = capability.status.as_str(),
        warning_count = warnings.len(),
        "recommendation derived"
    );

    Some(Recommendation {
        ownership: ownership.label.to_owned(),
        operating_model: operating_model.label.to_owned(),
        contract_type: catalog.contract_for_tier(tier).clone(),
        capability_status: capability.status,
        risk_score,
        warnings,
        justification: vec![
            ownership.justification.to_owned(),
            operating_model.justification.to_owned(),
        ],
        next_steps: next_steps::build(&facts),
    })
}
