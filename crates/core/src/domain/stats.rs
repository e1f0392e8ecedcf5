use crate::domain::record::StockRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const STRONG_BUY: &str = "Strong Buy";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub strong_buy_count: usize,
    pub avg_confidence: f64,
}

/// Headline numbers over the full record set. Active filters never apply here.
pub fn aggregate<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a StockRecord>,
{
    let mut total = 0_usize;
    let mut strong_buy_count = 0_usize;
    let mut sum = 0.0_f64;
    let mut reported = 0_usize;

    for r in records {
        total += 1;
        if r.recommendation == STRONG_BUY {
            strong_buy_count += 1;
        }
        if r.confidence_reported {
            sum += r.confidence;
            reported += 1;
        }
    }

    let avg_confidence = if reported > 0 {
        round_to_tenth(sum / reported as f64)
    } else {
        0.0
    };

    Summary {
        total,
        strong_buy_count,
        avg_confidence,
    }
}

/// Distinct non-empty sectors in sorted order, for populating a sector picker.
pub fn distinct_sectors<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a StockRecord>,
{
    records
        .into_iter()
        .map(|r| r.sector.as_str())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn round_to_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
