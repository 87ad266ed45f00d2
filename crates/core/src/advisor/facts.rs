use std::collections::BTreeSet;

use crate::advisor::catalog::{ids, Catalog};
use crate::domain::profile::CustomerProfile;
use crate::domain::reference::{RegionId, ValueStreamId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinancingChoice {
    Own,
    ThirdParty,
    /// Also the fallback for financing ids outside the catalog.
    Flexible,
}

impl FinancingChoice {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            ids::OWN => Self::Own,
            ids::THIRD_PARTY => Self::ThirdParty,
            _ => Self::Flexible,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationsChoice {
    HandsOff,
    Oversight,
    /// Also the fallback for operations ids outside the catalog.
    Active,
}

impl OperationsChoice {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            ids::HANDS_OFF => Self::HandsOff,
            ids::OVERSIGHT => Self::Oversight,
            _ => Self::Active,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentTier {
    Sme,
    MidMarket,
    Large,
    Unspecified,
}

impl SegmentTier {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(ids::SME) => Self::Sme,
            Some(ids::MIDMARKET) => Self::MidMarket,
            Some(ids::LARGE) => Self::Large,
            _ => Self::Unspecified,
        }
    }
}

/// Everything the rules need, derived once from a complete profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileFacts {
    pub region: RegionId,
    pub segment: SegmentTier,
    pub financing: FinancingChoice,
    pub operations: OperationsChoice,
    pub has_generation: bool,
    /// Selected streams minus any the catalog marks unavailable in `region`.
    pub value_streams: BTreeSet<ValueStreamId>,
}

impl ProfileFacts {
    /// `None` when region, financing or operations is still unset.
    pub fn derive(catalog: &Catalog, profile: &CustomerProfile) -> Option<Self> {
        let region = profile.region.clone()?;
        let financing = FinancingChoice::parse(profile.financing.as_ref()?.as_str());
        let operations = OperationsChoice::parse(profile.operations.as_ref()?.as_str());

        let value_streams = profile
            .value_streams
            .iter()
            .filter(|stream| {
                catalog
                    .value_stream(stream)
                    .map_or(true, |entry| !entry.is_unavailable_in(&region))
            })
            .cloned()
            .collect();

        Some(Self {
            segment: SegmentTier::parse(profile.segment.as_ref().map(|id| id.as_str())),
            financing,
            operations,
            has_generation: profile.has_generation(),
            value_streams,
            region,
        })
    }

    pub fn in_region(&self, region: &str) -> bool {
        self.region.as_str() == region
    }

    pub fn has_stream(&self, stream: &str) -> bool {
        self.value_streams.iter().any(|selected| selected.as_str() == stream)
    }

    pub fn has_ancillary(&self) -> bool {
        self.has_stream(ids::ANCILLARY)
    }

    pub fn has_wholesale(&self) -> bool {
        self.has_stream(ids::WHOLESALE)
    }
}

#[cfg(test)]
mod tests {
    use super::{FinancingChoice, OperationsChoice, ProfileFacts, SegmentTier};
    use crate::advisor::catalog::Catalog;
    use crate::domain::profile::CustomerProfile;

    #[test]
    fn unknown_choices_fall_into_explicit_default_branches() {
        assert_eq!(FinancingChoice::parse("ppa"), FinancingChoice::Flexible);
        assert_eq!(FinancingChoice::parse("own"), FinancingChoice::Own);
        assert_eq!(OperationsChoice::parse("outsourced"), OperationsChoice::Active);
        assert_eq!(OperationsChoice::parse("oversight"), OperationsChoice::Oversight);
        assert_eq!(SegmentTier::parse(Some("enterprise")), SegmentTier::Unspecified);
        assert_eq!(SegmentTier::parse(None), SegmentTier::Unspecified);
    }

    #[test]
    fn derive_requires_region_financing_and_operations() {
        let catalog = Catalog::standard();
        let partial = CustomerProfile::new().with_region("flanders").with_financing("own");
        assert!(ProfileFacts::derive(catalog, &partial).is_none());

        let complete = partial.with_operations("handsoff");
        assert!(ProfileFacts::derive(catalog, &complete).is_some());
    }

    #[test]
    fn streams_marked_unavailable_in_region_are_ignored() {
        let profile = CustomerProfile::new()
            .with_region("flanders")
            .with_financing("own")
            .with_operations("active")
            .with_value_stream("tou")
            .with_value_stream("wholesale")
            .with_value_stream("demand-response");

        let facts = ProfileFacts::derive(Catalog::standard(), &profile).expect("complete profile");

        assert!(!facts.has_stream("tou"));
        assert!(facts.has_wholesale());
        assert!(facts.has_stream("demand-response"));
    }
}
