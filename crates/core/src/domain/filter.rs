use crate::domain::record::StockRecord;
use serde::{Deserialize, Serialize};

pub const MAX_CONFIDENCE: u8 = 100;

/// Current filter selections. Empty strings mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub min_confidence: u8,
}

impl FilterState {
    pub fn new(sector: impl Into<String>, recommendation: impl Into<String>, min_confidence: u8) -> Self {
        let mut out = Self {
            sector: sector.into(),
            recommendation: recommendation.into(),
            min_confidence: 0,
        };
        out.set_min_confidence(min_confidence);
        out
    }

    pub fn set_min_confidence(&mut self, value: u8) {
        self.min_confidence = value.min(MAX_CONFIDENCE);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.sector.is_empty() && self.recommendation.is_empty() && self.min_confidence == 0
    }
}

/// All active conditions must hold. Matching is exact and case-sensitive.
pub fn matches(record: &StockRecord, filter: &FilterState) -> bool {
    if !filter.sector.is_empty() && record.sector != filter.sector {
        return false;
    }

    if !filter.recommendation.is_empty() && record.recommendation != filter.recommendation {
        return false;
    }

    record.confidence >= f64::from(filter.min_confidence)
}
