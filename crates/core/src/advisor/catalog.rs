use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use serde::Serialize;

use crate::domain::reference::{
    Capability, Complexity, ContractTier, ContractType, ContractTypeId, CustomerSegment,
    FinancingId, FinancingOption, GenerationAsset, GenerationAssetId, OperationsId,
    OperationsOption, Region, RegionAvailability, RegionId, RiskLevel, SegmentId, ValueStream,
    ValueStreamId,
};

/// Identifiers the recommendation rules key off.
pub mod ids {
    pub const FLANDERS: &str = "flanders";
    pub const WALLONIA: &str = "wallonia";
    pub const BRUSSELS: &str = "brussels";

    pub const SME: &str = "sme";
    pub const MIDMARKET: &str = "midmarket";
    pub const LARGE: &str = "large";

    pub const NO_GENERATION: &str = "none";
    pub const PV: &str = "pv";
    pub const WIND: &str = "wind";
    pub const COGEN: &str = "cogen";

    pub const OWN: &str = "own";
    pub const THIRD_PARTY: &str = "thirdparty";
    pub const FLEXIBLE: &str = "flexible";

    pub const HANDS_OFF: &str = "handsoff";
    pub const OVERSIGHT: &str = "oversight";
    pub const ACTIVE: &str = "active";

    pub const PEAK_SHAVING: &str = "peakshaving";
    pub const TOU: &str = "tou";
    pub const SELF_CONSUMPTION: &str = "selfconsumption";
    pub const WHOLESALE: &str = "wholesale";
    pub const IMBALANCE: &str = "imbalance";
    pub const ANCILLARY: &str = "ancillary";
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogIssue {
    pub code: String,
    pub message: String,
}

/// Read-only reference data. Built once per process, never mutated.
#[derive(Debug, Serialize)]
pub struct Catalog {
    regions: Vec<Region>,
    segments: Vec<CustomerSegment>,
    generation_assets: Vec<GenerationAsset>,
    financing_options: Vec<FinancingOption>,
    operations_options: Vec<OperationsOption>,
    value_streams: Vec<ValueStream>,
    contract_types: [ContractType; 5],
}

static STANDARD_CATALOG: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    pub fn standard() -> &'static Catalog {
        STANDARD_CATALOG.get_or_init(build_standard_catalog)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn segments(&self) -> &[CustomerSegment] {
        &self.segments
    }

    pub fn generation_assets(&self) -> &[GenerationAsset] {
        &self.generation_assets
    }

    pub fn financing_options(&self) -> &[FinancingOption] {
        &self.financing_options
    }

    pub fn operations_options(&self) -> &[OperationsOption] {
        &self.operations_options
    }

    pub fn value_streams(&self) -> &[ValueStream] {
        &self.value_streams
    }

    pub fn contract_types(&self) -> &[ContractType] {
        &self.contract_types
    }

    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.regions.iter().find(|region| &region.id == id)
    }

    pub fn segment(&self, id: &SegmentId) -> Option<&CustomerSegment> {
        self.segments.iter().find(|segment| &segment.id == id)
    }

    pub fn generation_asset(&self, id: &GenerationAssetId) -> Option<&GenerationAsset> {
        self.generation_assets.iter().find(|asset| &asset.id == id)
    }

    pub fn financing_option(&self, id: &FinancingId) -> Option<&FinancingOption> {
        self.financing_options.iter().find(|option| &option.id == id)
    }

    pub fn operations_option(&self, id: &OperationsId) -> Option<&OperationsOption> {
        self.operations_options.iter().find(|option| &option.id == id)
    }

    pub fn value_stream(&self, id: &ValueStreamId) -> Option<&ValueStream> {
        self.value_streams.iter().find(|stream| &stream.id == id)
    }

    pub fn contract_type(&self, id: &ContractTypeId) -> Option<&ContractType> {
        self.contract_types.iter().find(|contract| &contract.id == id)
    }

    pub fn contract_for_tier(&self, tier: ContractTier) -> &ContractType {
        &self.contract_types[tier.index()]
    }

    /// Value streams an operator may pick once `region` is chosen.
    pub fn available_value_streams(&self, region: &RegionId) -> Vec<&ValueStream> {
        self.value_streams.iter().filter(|stream| stream.is_offered_in(region)).collect()
    }

    pub fn region_label<'a>(&'a self, id: &'a RegionId) -> &'a str {
        self.region(id).map_or(id.as_str(), |region| region.name.as_str())
    }

    pub fn segment_label<'a>(&'a self, id: &'a SegmentId) -> &'a str {
        self.segment(id).map_or(id.as_str(), |segment| segment.name.as_str())
    }

    pub fn generation_label<'a>(&'a self, id: &'a GenerationAssetId) -> &'a str {
        self.generation_asset(id).map_or(id.as_str(), |asset| asset.name.as_str())
    }

    pub fn financing_label<'a>(&'a self, id: &'a FinancingId) -> &'a str {
        self.financing_option(id).map_or(id.as_str(), |option| option.name.as_str())
    }

    pub fn operations_label<'a>(&'a self, id: &'a OperationsId) -> &'a str {
        self.operations_option(id).map_or(id.as_str(), |option| option.name.as_str())
    }

    pub fn value_stream_label<'a>(&'a self, id: &'a ValueStreamId) -> &'a str {
        self.value_stream(id).map_or(id.as_str(), |stream| stream.name.as_str())
    }

    /// Structural checks on the reference data. An empty list means the
    /// catalog is internally consistent.
    pub fn verify(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        check_unique("region", self.regions.iter().map(|r| r.id.as_str()), &mut issues);
        check_unique("segment", self.segments.iter().map(|s| s.id.as_str()), &mut issues);
        check_unique(
            "generation_asset",
            self.generation_assets.iter().map(|a| a.id.as_str()),
            &mut issues,
        );
        check_unique(
            "financing",
            self.financing_options.iter().map(|o| o.id.as_str()),
            &mut issues,
        );
        check_unique(
            "operations",
            self.operations_options.iter().map(|o| o.id.as_str()),
            &mut issues,
        );
        check_unique(
            "value_stream",
            self.value_streams.iter().map(|s| s.id.as_str()),
            &mut issues,
        );

        for stream in &self.value_streams {
            for region in &self.regions {
                if stream.status_in(&region.id).is_none() {
                    issues.push(CatalogIssue {
                        code: "MISSING_REGION_STATUS".to_string(),
                        message: format!(
                            "value stream `{}` has no availability status for region `{}`",
                            stream.id, region.id
                        ),
                    });
                }
            }
        }

        for tier in ContractTier::ALL {
            let contract = self.contract_for_tier(tier);
            if contract.id.as_str() != tier.contract_id() {
                issues.push(CatalogIssue {
                    code: "CONTRACT_TIER_MISMATCH".to_string(),
                    message: format!(
                        "contract slot {:?} holds `{}`, expected `{}`",
                        tier,
                        contract.id,
                        tier.contract_id()
                    ),
                });
            }
            for (party, score) in
                [("customer", contract.customer_risk), ("supplier", contract.supplier_risk)]
            {
                if !(1..=5).contains(&score) {
                    issues.push(CatalogIssue {
                        code: "RISK_OUT_OF_RANGE".to_string(),
                        message: format!(
                            "contract `{}` {party} risk {score} is outside 1..=5",
                            contract.id
                        ),
                    });
                }
            }
        }

        for pair in self.contract_types.windows(2) {
            let (lower, higher) = (&pair[0], &pair[1]);
            if higher.customer_risk <= lower.customer_risk
                || higher.supplier_risk >= lower.supplier_risk
            {
                issues.push(CatalogIssue {
                    code: "CONTRACT_RISK_ORDER".to_string(),
                    message: format!(
                        "contract `{}` must carry more customer risk and less supplier risk than `{}`",
                        higher.id, lower.id
                    ),
                });
            }
        }

        issues
    }
}

fn check_unique<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<CatalogIssue>,
) {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(CatalogIssue {
                code: "DUPLICATE_ID".to_string(),
                message: format!("duplicate {kind} id `{id}`"),
            });
        }
    }
}

fn availability(
    flanders: RegionAvailability,
    wallonia: RegionAvailability,
    brussels: RegionAvailability,
) -> BTreeMap<RegionId, RegionAvailability> {
    BTreeMap::from([
        (RegionId::from(ids::FLANDERS), flanders),
        (RegionId::from(ids::WALLONIA), wallonia),
        (RegionId::from(ids::BRUSSELS), brussels),
    ])
}

fn terms(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

fn build_standard_catalog() -> Catalog {
    use RegionAvailability::{Available, Minor, Primary, Secondary, Unavailable};

    let regions = vec![
        Region {
            id: RegionId::from(ids::FLANDERS),
            name: "Flanders".to_owned(),
            primary_value: "Peak shaving (capacity tariff)".to_owned(),
            description: "Capacity-based grid tariff since Jan 2023".to_owned(),
            notes: Vec::new(),
        },
        Region {
            id: RegionId::from(ids::WALLONIA),
            name: "Wallonia".to_owned(),
            primary_value: "ToU arbitrage (from 2026)".to_owned(),
            description: "5 time-slot dynamic tariffs from January 2026".to_owned(),
            notes: vec!["ToU arbitrage available from January 2026".to_owned()],
        },
        Region {
            id: RegionId::from(ids::BRUSSELS),
            name: "Brussels".to_owned(),
            primary_value: "Self-consumption".to_owned(),
            description: "Limited ToU differentiation; focus on self-consumption".to_owned(),
            notes: Vec::new(),
        },
    ];

    let segments = vec![
        CustomerSegment {
            id: SegmentId::from(ids::SME),
            name: "SME".to_owned(),
            description: "< 1 MW connection".to_owned(),
        },
        CustomerSegment {
            id: SegmentId::from(ids::MIDMARKET),
            name: "Mid-Market Industrial".to_owned(),
            description: "1-10 MW connection".to_owned(),
        },
        CustomerSegment {
            id: SegmentId::from(ids::LARGE),
            name: "Large Industrial".to_owned(),
            description: "> 10 MW connection".to_owned(),
        },
    ];

    let generation_assets = [
        (ids::NO_GENERATION, "None"),
        (ids::PV, "Solar PV"),
        (ids::WIND, "Wind"),
        (ids::COGEN, "Cogeneration"),
    ]
    .into_iter()
    .map(|(id, name)| GenerationAsset { id: GenerationAssetId::from(id), name: name.to_owned() })
    .collect();

    let financing_options = vec![
        FinancingOption {
            id: FinancingId::from(ids::OWN),
            name: "Customer Owns".to_owned(),
            description: "Capex investment, full control, capture depreciation".to_owned(),
            risk_level: RiskLevel::Higher,
        },
        FinancingOption {
            id: FinancingId::from(ids::THIRD_PARTY),
            name: "Third-Party Owns".to_owned(),
            description: "Off balance sheet, pay for service/output".to_owned(),
            risk_level: RiskLevel::Lower,
        },
        FinancingOption {
            id: FinancingId::from(ids::FLEXIBLE),
            name: "Flexible / Lease".to_owned(),
            description: "Decide later, purchase option possible".to_owned(),
            risk_level: RiskLevel::Medium,
        },
    ];

    let operations_options = vec![
        OperationsOption {
            id: OperationsId::from(ids::HANDS_OFF),
            name: "Fully Hands-Off".to_owned(),
            description: "Partner handles everything".to_owned(),
            complexity: Complexity::Low,
        },
        OperationsOption {
            id: OperationsId::from(ids::OVERSIGHT),
            name: "Oversight & Input".to_owned(),
            description: "Partner operates, customer reviews and influences".to_owned(),
            complexity: Complexity::Medium,
        },
        OperationsOption {
            id: OperationsId::from(ids::ACTIVE),
            name: "Active / Self-Manage".to_owned(),
            description: "Customer controls dispatch".to_owned(),
            complexity: Complexity::High,
        },
    ];

    let value_streams = vec![
        ValueStream {
            id: ValueStreamId::from(ids::PEAK_SHAVING),
            name: "Peak Shaving".to_owned(),
            description: "Reduce capacity tariff / demand charges".to_owned(),
            capability: Capability::Direct,
            regions: availability(Primary, Secondary, Minor),
            requires_generation: false,
        },
        ValueStream {
            id: ValueStreamId::from(ids::TOU),
            name: "ToU Grid Arbitrage".to_owned(),
            description: "Charge low-tariff hours, discharge high-tariff".to_owned(),
            capability: Capability::Direct,
            regions: availability(Unavailable, Primary, Unavailable),
            requires_generation: false,
        },
        ValueStream {
            id: ValueStreamId::from(ids::SELF_CONSUMPTION),
            name: "Self-Consumption".to_owned(),
            description: "Store on-site generation for later use".to_owned(),
            capability: Capability::Direct,
            regions: availability(Available, Available, Primary),
            requires_generation: true,
        },
        ValueStream {
            id: ValueStreamId::from(ids::WHOLESALE),
            name: "Wholesale Arbitrage".to_owned(),
            description: "Day-ahead / intraday price optimization".to_owned(),
            capability: Capability::Conditional,
            regions: availability(Available, Available, Available),
            requires_generation: false,
        },
        ValueStream {
            id: ValueStreamId::from(ids::IMBALANCE),
            name: "Imbalance Optimization".to_owned(),
            description: "Position for system imbalance via BRP".to_owned(),
            capability: Capability::Direct,
            regions: availability(Available, Available, Available),
            requires_generation: false,
        },
        ValueStream {
            id: ValueStreamId::from(ids::ANCILLARY),
            name: "Ancillary Services (FCR/aFRR/mFRR)".to_owned(),
            description: "Frequency regulation & balancing reserves".to_owned(),
            capability: Capability::Partnership,
            regions: availability(Available, Available, Available),
            requires_generation: false,
        },
    ];

    let contract_types = [
        ContractType {
            id: ContractTypeId::from(ContractTier::Tolling.contract_id()),
            name: "Tolling Agreement".to_owned(),
            description: "Fixed capacity payment (€/kW/year). Partner takes all market risk."
                .to_owned(),
            customer_risk: 1,
            supplier_risk: 5,
            key_terms: terms(&[
                "Fixed capacity payment (€/kW/year)",
                "Variable O&M payment (€/MWh throughput)",
                "Availability guarantees with liquidated damages",
                "Partner has full dispatch authority",
                "Round-trip efficiency guarantees",
            ]),
        },
        ContractType {
            id: ContractTypeId::from(ContractTier::FloorShare.contract_id()),
            name: "Floor + Upside Share".to_owned(),
            description: "Guaranteed minimum return plus share of revenues above floor."
                .to_owned(),
            customer_risk: 2,
            supplier_risk: 4,
            key_terms: terms(&[
                "Guaranteed floor payment (€/kW/year)",
                "Revenue share above floor (e.g., 70/30)",
                "Clear definition of included revenue streams",
                "Annual reconciliation mechanism",
                "Performance benchmarking clause",
            ]),
        },
        ContractType {
            id: ContractTypeId::from(ContractTier::RevenueShareFloor.contract_id()),
            name: "Revenue Share with Floor".to_owned(),
            description: "Protected downside with participation in market upside.".to_owned(),
            customer_risk: 3,
            supplier_risk: 3,
            key_terms: terms(&[
                "Base revenue share ratio (e.g., 60/40)",
                "Minimum floor protection",
                "Quarterly or monthly settlement",
                "Audit rights for optimization performance",
                "Defined value stream inclusion",
            ]),
        },
        ContractType {
            id: ContractTypeId::from(ContractTier::RevenueShare.contract_id()),
            name: "Pure Revenue Share".to_owned(),
            description: "Direct percentage split of all revenues. Full alignment of interests."
                .to_owned(),
            customer_risk: 4,
            supplier_risk: 2,
            key_terms: terms(&[
                "Revenue split ratio (e.g., 70/30 or 80/20)",
                "Gross vs. net revenue definition",
                "Cost pass-through mechanisms",
                "Performance KPIs and reporting",
                "Benchmark comparison rights",
            ]),
        },
        ContractType {
            id: ContractTypeId::from(ContractTier::FixedFee.contract_id()),
            name: "Fixed Service Fee".to_owned(),
            description:
                "Customer keeps 100% of revenues, pays fixed fee for optimization service."
                    .to_owned(),
            customer_risk: 5,
            supplier_risk: 1,
            key_terms: terms(&[
                "Fixed monthly/annual service fee",
                "All revenues pass through to customer",
                "Service level agreements (SLAs)",
                "Performance guarantees",
                "Liability caps for underperformance",
            ]),
        },
    ];

    Catalog {
        regions,
        segments,
        generation_assets,
        financing_options,
        operations_options,
        value_streams,
        contract_types,
    }
}

#[cfg(test)]
mod tests {
    use super::{ids, Catalog};
    use crate::domain::reference::{
        ContractTier, ContractTypeId, FinancingId, RegionId, SegmentId, ValueStreamId,
    };

    #[test]
    fn standard_catalog_verifies_clean() {
        assert!(Catalog::standard().verify().is_empty());
    }

    #[test]
    fn lookups_return_none_for_unknown_identifiers() {
        let catalog = Catalog::standard();
        assert!(catalog.region(&RegionId::new("atlantis")).is_none());
        assert!(catalog.segment(&SegmentId::new("enterprise")).is_none());
        assert!(catalog.financing_option(&FinancingId::new("ppa")).is_none());
        assert!(catalog.value_stream(&ValueStreamId::new("capacity-market")).is_none());
        assert!(catalog.contract_type(&ContractTypeId::new("lease")).is_none());

        assert_eq!(catalog.region_label(&RegionId::new("atlantis")), "atlantis");
        assert_eq!(catalog.region_label(&RegionId::new(ids::WALLONIA)), "Wallonia");
    }

    #[test]
    fn available_value_streams_excludes_unavailable_entries() {
        let catalog = Catalog::standard();

        let flanders: Vec<&str> = catalog
            .available_value_streams(&RegionId::new(ids::FLANDERS))
            .iter()
            .map(|stream| stream.id.as_str())
            .collect();
        assert_eq!(
            flanders,
            vec!["peakshaving", "selfconsumption", "wholesale", "imbalance", "ancillary"]
        );

        let wallonia = catalog.available_value_streams(&RegionId::new(ids::WALLONIA));
        assert_eq!(wallonia.len(), 6);

        assert!(catalog.available_value_streams(&RegionId::new("atlantis")).is_empty());
    }

    #[test]
    fn contract_tiers_are_ordered_by_customer_risk() {
        let catalog = Catalog::standard();
        let pairs: Vec<(u8, u8)> = ContractTier::ALL
            .iter()
            .map(|tier| {
                let contract = catalog.contract_for_tier(*tier);
                (contract.customer_risk, contract.supplier_risk)
            })
            .collect();

        assert_eq!(pairs, vec![(1, 5), (2, 4), (3, 3), (4, 2), (5, 1)]);
        assert!(catalog.contract_types().iter().all(|contract| contract.key_terms.len() == 5));
    }
}
