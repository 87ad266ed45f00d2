use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::reference::{
    FinancingId, GenerationAssetId, OperationsId, RegionId, SegmentId, ValueStreamId,
};

/// Immutable snapshot of what the operator has selected so far.
///
/// Built fresh for every evaluation; the engine never holds on to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerProfile {
    pub region: Option<RegionId>,
    pub segment: Option<SegmentId>,
    pub generation: BTreeSet<GenerationAssetId>,
    pub financing: Option<FinancingId>,
    pub operations: Option<OperationsId>,
    pub value_streams: BTreeSet<ValueStreamId>,
}

impl CustomerProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(RegionId::new(region));
        self
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(SegmentId::new(segment));
        self
    }

    pub fn with_generation(mut self, asset: impl Into<String>) -> Self {
        self.generation.insert(GenerationAssetId::new(asset));
        self
    }

    pub fn with_financing(mut self, financing: impl Into<String>) -> Self {
        self.financing = Some(FinancingId::new(financing));
        self
    }

    pub fn with_operations(mut self, operations: impl Into<String>) -> Self {
        self.operations = Some(OperationsId::new(operations));
        self
    }

    pub fn with_value_stream(mut self, stream: impl Into<String>) -> Self {
        self.value_streams.insert(ValueStreamId::new(stream));
        self
    }

    /// Required fields that are still unset, in collection order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.region.is_none() {
            missing.push("region");
        }
        if self.financing.is_none() {
            missing.push("financing");
        }
        if self.operations.is_none() {
            missing.push("operations");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn has_generation(&self) -> bool {
        !self.generation.is_empty()
    }

    pub fn has_value_stream(&self, stream: &str) -> bool {
        self.value_streams.iter().any(|selected| selected.as_str() == stream)
    }
}
