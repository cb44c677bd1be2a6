use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StrategyError;

/// Cost in nanoseconds of a single multiplication, squaring and inversion
/// in GF(p^2).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCosts {
    pub M: u64,
    pub S: u64,
    pub I: u64,
}

impl FieldCosts {
    pub const fn new(M: u64, S: u64, I: u64) -> Self {
        Self { M, S, I }
    }

    /// Multiply every constant by the same factor. The optimal plan is
    /// unchanged, only the total cost scales.
    pub const fn scale(&self, factor: u64) -> Self {
        Self {
            M: self.M * factor,
            S: self.S * factor,
            I: self.I * factor,
        }
    }
}

// Measured with `measure_field_costs` on the fields in `crate::fields`.
// 254-bit characteristic, chains of length 124 and 126
pub const THETA_254_COSTS: FieldCosts = FieldCosts::new(74, 52, 3314);
// 381-bit characteristic, chains of length 206 and 208
pub const THETA_381_COSTS: FieldCosts = FieldCosts::new(188, 153, 5939);
// 1293-bit FESTA characteristic, chains of length 630 and 632
pub const FESTA_COSTS: FieldCosts = FieldCosts::new(2717, 2265, 54_823);

/// Field costs keyed by a caller chosen bucket, conventionally the length of
/// the chain the costs were calibrated for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostTable {
    buckets: BTreeMap<usize, FieldCosts>,
}

impl CostTable {
    /// An empty table, every lookup fails until buckets are inserted.
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, bucket: usize, costs: FieldCosts) -> Option<FieldCosts> {
        self.buckets.insert(bucket, costs)
    }

    pub fn with_bucket(mut self, bucket: usize, costs: FieldCosts) -> Self {
        self.buckets.insert(bucket, costs);
        self
    }

    pub fn get(&self, bucket: usize) -> Result<&FieldCosts, StrategyError> {
        self.buckets
            .get(&bucket)
            .ok_or(StrategyError::MissingCostBucket(bucket))
    }

    pub fn buckets(&self) -> impl Iterator<Item = (usize, &FieldCosts)> {
        self.buckets.iter().map(|(bucket, costs)| (*bucket, costs))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Parse a table of the form `{"126": {"M": 74, "S": 52, "I": 3314}, ...}`.
    pub fn from_json(json: &str) -> Result<Self, StrategyError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StrategyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self::new()
            .with_bucket(124, THETA_254_COSTS)
            .with_bucket(126, THETA_254_COSTS)
            .with_bucket(206, THETA_381_COSTS)
            .with_bucket(208, THETA_381_COSTS)
            .with_bucket(630, FESTA_COSTS)
            .with_bucket(632, FESTA_COSTS)
    }
}
