use serde::{Deserialize, Serialize};

use crate::advisor::catalog::{ids, Catalog};
use crate::domain::profile::CustomerProfile;
use crate::domain::reference::{
    FinancingId, GenerationAssetId, OperationsId, RegionId, SegmentId, ValueStream, ValueStreamId,
};
use crate::errors::DomainError;

/// Collector state behind the operator's selections.
///
/// Enforces the selection contract (one region, `none` exclusive with other
/// generation assets, value streams limited to the chosen region) and hands
/// out immutable [`CustomerProfile`] snapshots for evaluation.
#[derive(Clone, Debug)]
pub struct ProfileSelection {
    catalog: &'static Catalog,
    profile: CustomerProfile,
}

impl Default for ProfileSelection {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}

impl ProfileSelection {
    pub fn new(catalog: &'static Catalog) -> Self {
        Self { catalog, profile: CustomerProfile::default() }
    }

    /// Changing region clears the value streams, since the region decides
    /// which streams are offered at all.
    pub fn select_region(&mut self, region: &str) -> Result<(), DomainError> {
        let id = RegionId::new(region.trim());
        if self.catalog.region(&id).is_none() {
            return Err(DomainError::unknown("region", region));
        }

        if self.profile.region.as_ref() != Some(&id) {
            self.profile.value_streams.clear();
        }
        self.profile.region = Some(id);
        Ok(())
    }

    pub fn select_segment(&mut self, segment: &str) -> Result<(), DomainError> {
        let id = SegmentId::new(segment.trim());
        if self.catalog.segment(&id).is_none() {
            return Err(DomainError::unknown("segment", segment));
        }
        self.profile.segment = Some(id);
        Ok(())
    }

    pub fn clear_segment(&mut self) {
        self.profile.segment = None;
    }

    /// Adds an asset; `none` empties the set instead.
    pub fn add_generation(&mut self, asset: &str) -> Result<(), DomainError> {
        let id = self.generation_id(asset)?;
        match id {
            None => self.profile.generation.clear(),
            Some(id) => {
                self.profile.generation.insert(id);
            }
        }
        Ok(())
    }

    pub fn toggle_generation(&mut self, asset: &str) -> Result<(), DomainError> {
        match self.generation_id(asset)? {
            None => self.profile.generation.clear(),
            Some(id) => {
                if !self.profile.generation.remove(&id) {
                    self.profile.generation.insert(id);
                }
            }
        }
        Ok(())
    }

    pub fn select_financing(&mut self, financing: &str) -> Result<(), DomainError> {
        let id = FinancingId::new(financing.trim());
        if self.catalog.financing_option(&id).is_none() {
            return Err(DomainError::unknown("financing option", financing));
        }
        self.profile.financing = Some(id);
        Ok(())
    }

    pub fn select_operations(&mut self, operations: &str) -> Result<(), DomainError> {
        let id = OperationsId::new(operations.trim());
        if self.catalog.operations_option(&id).is_none() {
            return Err(DomainError::unknown("operations option", operations));
        }
        self.profile.operations = Some(id);
        Ok(())
    }

    pub fn add_value_stream(&mut self, stream: &str) -> Result<(), DomainError> {
        let id = self.offered_stream_id(stream)?;
        self.profile.value_streams.insert(id);
        Ok(())
    }

    pub fn toggle_value_stream(&mut self, stream: &str) -> Result<(), DomainError> {
        let id = self.offered_stream_id(stream)?;
        if !self.profile.value_streams.remove(&id) {
            self.profile.value_streams.insert(id);
        }
        Ok(())
    }

    /// Streams the operator may currently pick; empty until a region is set.
    pub fn available_value_streams(&self) -> Vec<&'static ValueStream> {
        match &self.profile.region {
            Some(region) => self.catalog.available_value_streams(region),
            None => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> CustomerProfile {
        self.profile.clone()
    }

    fn generation_id(&self, asset: &str) -> Result<Option<GenerationAssetId>, DomainError> {
        let trimmed = asset.trim();
        if trimmed == ids::NO_GENERATION {
            return Ok(None);
        }
        let id = GenerationAssetId::new(trimmed);
        if self.catalog.generation_asset(&id).is_none() {
            return Err(DomainError::unknown("generation asset", asset));
        }
        Ok(Some(id))
    }

    fn offered_stream_id(&self, stream: &str) -> Result<ValueStreamId, DomainError> {
        let region = self.profile.region.as_ref().ok_or(DomainError::RegionRequired)?;
        let id = ValueStreamId::new(stream.trim());
        let entry =
            self.catalog.value_stream(&id).ok_or_else(|| DomainError::unknown("value stream", stream))?;
        if !entry.is_offered_in(region) {
            return Err(DomainError::ValueStreamUnavailable {
                stream: id.to_string(),
                region: region.to_string(),
            });
        }
        Ok(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeViolation {
    pub code: String,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeResult {
    pub valid: bool,
    pub violations: Vec<IntakeViolation>,
}

impl Default for IntakeResult {
    fn default() -> Self {
        Self { valid: true, violations: Vec::new() }
    }
}

impl IntakeResult {
    fn push(&mut self, code: &str, message: String, suggestion: Option<String>) {
        self.violations.push(IntakeViolation { code: code.to_string(), message, suggestion });
    }
}

/// Checks a profile that bypassed [`ProfileSelection`], e.g. one read from a
/// file. Unset fields are not violations; completeness is the engine's call.
pub fn validate_profile(catalog: &Catalog, profile: &CustomerProfile) -> IntakeResult {
    let mut result = IntakeResult::default();

    if let Some(region) = &profile.region {
        if catalog.region(region).is_none() {
            result.push(
                "UNKNOWN_REGION",
                format!("Unknown region: {region}"),
                Some(suggest(catalog.regions().iter().map(|r| r.id.as_str()))),
            );
        }
    }

    if let Some(segment) = &profile.segment {
        if catalog.segment(segment).is_none() {
            result.push(
                "UNKNOWN_SEGMENT",
                format!("Unknown customer segment: {segment}"),
                Some(suggest(catalog.segments().iter().map(|s| s.id.as_str()))),
            );
        }
    }

    for asset in &profile.generation {
        if asset.as_str() == ids::NO_GENERATION {
            result.push(
                "EXCLUSIVE_GENERATION_NONE",
                "Generation asset `none` cannot be combined with a generation list".to_string(),
                Some("Use an empty generation list for sites without generation".to_string()),
            );
        } else if catalog.generation_asset(asset).is_none() {
            result.push(
                "UNKNOWN_GENERATION_ASSET",
                format!("Unknown generation asset: {asset}"),
                Some(suggest(
                    catalog
                        .generation_assets()
                        .iter()
                        .map(|a| a.id.as_str())
                        .filter(|id| *id != ids::NO_GENERATION),
                )),
            );
        }
    }

    if let Some(financing) = &profile.financing {
        if catalog.financing_option(financing).is_none() {
            result.push(
                "UNKNOWN_FINANCING",
                format!("Unknown financing option: {financing}"),
                Some(suggest(catalog.financing_options().iter().map(|o| o.id.as_str()))),
            );
        }
    }

    if let Some(operations) = &profile.operations {
        if catalog.operations_option(operations).is_none() {
            result.push(
                "UNKNOWN_OPERATIONS",
                format!("Unknown operations option: {operations}"),
                Some(suggest(catalog.operations_options().iter().map(|o| o.id.as_str()))),
            );
        }
    }

    let known_region = profile.region.as_ref().filter(|region| catalog.region(region).is_some());
    if profile.region.is_none() && !profile.value_streams.is_empty() {
        result.push(
            "VALUE_STREAM_WITHOUT_REGION",
            "Value streams were selected before a region".to_string(),
            Some("Choose a region first; it decides which value streams are offered".to_string()),
        );
    }

    for stream in &profile.value_streams {
        let Some(entry) = catalog.value_stream(stream) else {
            result.push(
                "UNKNOWN_VALUE_STREAM",
                format!("Unknown value stream: {stream}"),
                Some(suggest(catalog.value_streams().iter().map(|s| s.id.as_str()))),
            );
            continue;
        };

        if let Some(region) = known_region {
            if !entry.is_offered_in(region) {
                result.push(
                    "VALUE_STREAM_UNAVAILABLE",
                    format!("Value stream {stream} is not available in {region}"),
                    Some(suggest(
                        catalog.available_value_streams(region).iter().map(|s| s.id.as_str()),
                    )),
                );
            }
        }
    }

    if !result.violations.is_empty() {
        result.valid = false;
    }

    result
}

fn suggest<'a>(options: impl Iterator<Item = &'a str>) -> String {
    format!("Use one of: {}", options.collect::<Vec<_>>().join(", "))
}

#[cfg(test)]
mod tests {
    use super::{validate_profile, ProfileSelection};
    use crate::advisor::catalog::Catalog;
    use crate::domain::profile::CustomerProfile;
    use crate::errors::DomainError;

    #[test]
    fn changing_region_resets_value_streams() {
        let mut selection = ProfileSelection::default();
        selection.select_region("wallonia").expect("known region");
        selection.add_value_stream("tou").expect("tou is offered in wallonia");
        selection.add_value_stream("peakshaving").expect("peak shaving is offered");

        selection.select_region("wallonia").expect("same region");
        assert_eq!(selection.snapshot().value_streams.len(), 2);

        selection.select_region("flanders").expect("known region");
        assert!(selection.snapshot().value_streams.is_empty());
    }

    #[test]
    fn value_streams_are_limited_to_the_chosen_region() {
        let mut selection = ProfileSelection::default();
        assert_eq!(selection.add_value_stream("peakshaving"), Err(DomainError::RegionRequired));
        assert!(selection.available_value_streams().is_empty());

        selection.select_region("brussels").expect("known region");
        assert_eq!(
            selection.toggle_value_stream("tou"),
            Err(DomainError::ValueStreamUnavailable {
                stream: "tou".to_owned(),
                region: "brussels".to_owned(),
            })
        );
        assert!(matches!(
            selection.toggle_value_stream("capacity-market"),
            Err(DomainError::UnknownIdentifier { kind: "value stream", .. })
        ));
        assert_eq!(selection.available_value_streams().len(), 5);
    }

    #[test]
    fn none_generation_clears_and_toggles_flip_membership() {
        let mut selection = ProfileSelection::default();
        selection.toggle_generation("pv").expect("known asset");
        selection.toggle_generation("wind").expect("known asset");
        assert_eq!(selection.snapshot().generation.len(), 2);

        selection.toggle_generation("pv").expect("known asset");
        assert_eq!(selection.snapshot().generation.len(), 1);

        selection.add_generation("none").expect("none is always accepted");
        assert!(!selection.snapshot().has_generation());

        assert!(selection.add_generation("fuel-cell").is_err());
    }

    #[test]
    fn snapshots_are_detached_from_later_selections() {
        let mut selection = ProfileSelection::default();
        selection.select_region("flanders").expect("known region");
        selection.select_financing("own").expect("known financing");
        selection.select_operations("handsoff").expect("known operations");
        let before = selection.snapshot();

        selection.select_segment("large").expect("known segment");
        selection.clear_segment();
        selection.select_segment("sme").expect("known segment");

        assert!(before.segment.is_none());
        assert_eq!(selection.snapshot().segment.map(|id| id.to_string()), Some("sme".to_owned()));
        assert!(selection.select_financing("ppa").is_err());
        assert!(selection.select_operations("outsourced").is_err());
    }

    #[test]
    fn validate_profile_reports_every_violation() {
        let profile = CustomerProfile::new()
            .with_region("flanders")
            .with_segment("enterprise")
            .with_generation("none")
            .with_generation("pv")
            .with_financing("ppa")
            .with_operations("handsoff")
            .with_value_stream("tou")
            .with_value_stream("capacity-market");

        let result = validate_profile(Catalog::standard(), &profile);

        assert!(!result.valid);
        let codes: Vec<&str> = result.violations.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                "UNKNOWN_SEGMENT",
                "EXCLUSIVE_GENERATION_NONE",
                "UNKNOWN_FINANCING",
                "UNKNOWN_VALUE_STREAM",
                "VALUE_STREAM_UNAVAILABLE",
            ]
        );
    }

    #[test]
    fn validate_profile_accepts_partial_profiles() {
        let profile = CustomerProfile::new().with_region("brussels").with_value_stream("ancillary");
        assert!(validate_profile(Catalog::standard(), &profile).valid);

        let orphan = CustomerProfile::new().with_value_stream("ancillary");
        let result = validate_profile(Catalog::standard(), &orphan);
        assert_eq!(result.violations[0].code, "VALUE_STREAM_WITHOUT_REGION");
    }
}
