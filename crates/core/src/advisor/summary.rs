//! Plain-text export of a profile and its recommendation, meant for copying
//! into emails or CRM notes.

use serde::Serialize;
use tera::{Context, Tera};

use crate::advisor::catalog::Catalog;
use crate::domain::profile::CustomerProfile;
use crate::domain::recommendation::{NextStepSection, Recommendation};
use crate::errors::ApplicationError;

const SUMMARY_TEMPLATE: &str = "summary.txt";
const NOT_SPECIFIED: &str = "Not specified";
const NONE: &str = "None";

#[derive(Debug, Serialize)]
struct ProfileView<'a> {
    region: &'a str,
    segment: &'a str,
    generation: String,
    financing: &'a str,
    operations: &'a str,
    value_streams: String,
}

#[derive(Debug, Serialize)]
struct RecommendationView<'a> {
    ownership: &'a str,
    operating_model: &'a str,
    contract_name: &'a str,
    capability: &'static str,
    key_terms: &'a [String],
    customer_risk: u8,
    supplier_risk: u8,
}

#[derive(Debug, Serialize)]
struct SummaryView<'a> {
    profile: ProfileView<'a>,
    recommendation: RecommendationView<'a>,
    warnings: Vec<&'a str>,
    next_steps: &'a [NextStepSection],
}

pub struct SummaryRenderer {
    tera: Tera,
}

impl SummaryRenderer {
    pub fn new() -> Result<Self, ApplicationError> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            SUMMARY_TEMPLATE,
            include_str!("../../templates/summary.txt.tera"),
        )
        .map_err(|error| ApplicationError::Rendering(error.to_string()))?;
        Ok(Self { tera })
    }

    pub fn render(
        &self,
        catalog: &Catalog,
        profile: &CustomerProfile,
        recommendation: &Recommendation,
    ) -> Result<String, ApplicationError> {
        let view = SummaryView {
            profile: profile_view(catalog, profile),
            recommendation: RecommendationView {
                ownership: &recommendation.ownership,
                operating_model: &recommendation.operating_model,
                contract_name: &recommendation.contract_type.name,
                capability: recommendation.capability_status.as_str(),
                key_terms: &recommendation.contract_type.key_terms,
                customer_risk: recommendation.contract_type.customer_risk,
                supplier_risk: recommendation.contract_type.supplier_risk,
            },
            warnings: recommendation.warnings.iter().map(|w| w.message.as_str()).collect(),
            next_steps: &recommendation.next_steps,
        };

        let context = Context::from_serialize(&view)
            .map_err(|error| ApplicationError::Rendering(error.to_string()))?;
        let rendered = self
            .tera
            .render(SUMMARY_TEMPLATE, &context)
            .map_err(|error| ApplicationError::Rendering(error.to_string()))?;

        let mut summary = rendered.trim_end().to_owned();
        summary.push('\n');
        Ok(summary)
    }
}

/// Set-valued selections are listed in catalog order, unknown ids last.
fn profile_view<'a>(catalog: &'a Catalog, profile: &'a CustomerProfile) -> ProfileView<'a> {
    ProfileView {
        region: profile.region.as_ref().map_or(NOT_SPECIFIED, |id| catalog.region_label(id)),
        segment: profile.segment.as_ref().map_or(NOT_SPECIFIED, |id| catalog.segment_label(id)),
        generation: joined(
            catalog
                .generation_assets()
                .iter()
                .filter(|asset| profile.generation.contains(&asset.id))
                .map(|asset| asset.name.as_str())
                .chain(
                    profile
                        .generation
                        .iter()
                        .filter(|id| catalog.generation_asset(id).is_none())
                        .map(|id| id.as_str()),
                ),
        ),
        financing: profile
            .financing
            .as_ref()
            .map_or(NOT_SPECIFIED, |id| catalog.financing_label(id)),
        operations: profile
            .operations
            .as_ref()
            .map_or(NOT_SPECIFIED, |id| catalog.operations_label(id)),
        value_streams: joined(
            catalog
                .value_streams()
                .iter()
                .filter(|stream| profile.value_streams.contains(&stream.id))
                .map(|stream| stream.name.as_str())
                .chain(
                    profile
                        .value_streams
                        .iter()
                        .filter(|id| catalog.value_stream(id).is_none())
                        .map(|id| id.as_str()),
                ),
        ),
    }
}

fn joined<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    let labels: Vec<&str> = labels.collect();
    if labels.is_empty() {
        NONE.to_owned()
    } else {
        labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::SummaryRenderer;
    use crate::advisor::catalog::Catalog;
    use crate::advisor::recommend;
    use crate::domain::profile::CustomerProfile;

    fn render(profile: &CustomerProfile) -> String {
        let recommendation = recommend(profile).expect("complete profile");
        SummaryRenderer::new()
            .expect("embedded template parses")
            .render(Catalog::standard(), profile, &recommendation)
            .expect("summary renders")
    }

    #[test]
    fn summary_lists_profile_and_recommendation_sections_in_order() {
        let profile = CustomerProfile::new()
            .with_region("wallonia")
            .with_segment("large")
            .with_generation("pv")
            .with_financing("flexible")
            .with_operations("active")
            .with_value_stream("tou")
            .with_value_stream("ancillary");

        let summary = render(&profile);

        assert!(summary.starts_with("BTM BATTERY ADVISOR - RECOMMENDATION SUMMARY\n"));
        assert!(summary.contains("- Region: Wallonia\n"));
        assert!(summary.contains("- On-site Generation: Solar PV\n"));
        assert!(summary.contains("- Contract Type: Fixed Service Fee\n"));
        assert!(summary.contains("- Capability Status: PARTNERSHIP\n"));
        assert!(summary.contains("\nWARNINGS\n• "));
        assert!(summary.ends_with('\n') && !summary.ends_with("\n\n"));

        let headings = [
            "CUSTOMER PROFILE",
            "RECOMMENDATION\n",
            "CONTRACT KEY TERMS",
            "RISK PROFILE",
            "WARNINGS",
            "NEXT STEPS",
        ];
        let positions: Vec<usize> = headings
            .iter()
            .map(|heading| summary.find(heading).expect("heading present"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{summary}");
    }

    #[test]
    fn summary_without_warnings_omits_the_section() {
        let profile = CustomerProfile::new()
            .with_region("flanders")
            .with_segment("sme")
            .with_financing("own")
            .with_operations("handsoff")
            .with_value_stream("peakshaving");

        let summary = render(&profile);

        assert!(!summary.contains("WARNINGS"));
        assert!(summary.contains("- On-site Generation: None\n"));
        assert!(summary.contains("- Customer Risk: 1/5\n- Supplier Risk: 5/5\n\nNEXT STEPS\n"));
        assert!(summary.contains("Data to Request:\n  • Load profile data"));
        assert!(summary.contains("\n\nInternal Actions:\n"));
    }

    #[test]
    fn selections_are_listed_in_catalog_order() {
        let profile = CustomerProfile::new()
            .with_region("wallonia")
            .with_generation("wind")
            .with_generation("cogen")
            .with_generation("pv")
            .with_financing("own")
            .with_operations("oversight")
            .with_value_stream("tou")
            .with_value_stream("ancillary")
            .with_value_stream("peakshaving")
            .with_value_stream("capacity-market");

        let summary = render(&profile);

        assert!(summary.contains("- On-site Generation: Solar PV, Wind, Cogeneration\n"));
        assert!(summary.contains(
            "- Value Streams: Peak Shaving, ToU Grid Arbitrage, Ancillary Services (FCR/aFRR/mFRR), capacity-market\n"
        ));
    }

    #[test]
    fn unknown_identifiers_render_as_raw_ids() {
        let profile = CustomerProfile::new()
            .with_region("atlantis")
            .with_financing("ppa")
            .with_operations("handsoff");

        let summary = render(&profile);

        assert!(summary.contains("- Region: atlantis\n"));
        assert!(summary.contains("- Segment: Not specified\n"));
        assert!(summary.contains("- Financing: ppa\n"));
        assert!(summary.contains("- Value Streams: None\n"));
    }
}
