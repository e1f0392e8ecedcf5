use crate::domain::columns::{RecommendationKind, SectorIcon};
use crate::domain::view::StockRow;
use serde::{Deserialize, Serialize};

/// Everything the per-stock detail view shows. Absent values are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDetail {
    pub symbol: String,
    pub sector: Option<String>,
    pub sector_icon: SectorIcon,
    pub recommendation: String,
    pub recommendation_kind: RecommendationKind,
    /// Confidence rounded to a whole percent.
    pub confidence_percent: i64,
    pub current_price: Option<f64>,
    pub avg_target_price: Option<f64>,
    pub high_price: Option<f64>,
    pub low_price: Option<f64>,
    pub price_potential_percent: Option<f64>,
}

impl StockDetail {
    pub fn from_row(row: &StockRow) -> Self {
        let r = &row.record;
        let positive = |v: f64| (v > 0.0).then_some(v);

        Self {
            symbol: r.symbol.clone(),
            sector: Some(r.sector.clone()).filter(|s| !s.is_empty()),
            sector_icon: SectorIcon::for_sector(&r.sector),
            recommendation: r.recommendation.clone(),
            recommendation_kind: RecommendationKind::for_display(&r.recommendation),
            confidence_percent: r.confidence.round() as i64,
            current_price: positive(r.current_price),
            avg_target_price: positive(row.metrics.avg_target_price),
            high_price: positive(r.high_price),
            low_price: positive(r.low_price),
            price_potential_percent: Some(row.metrics.price_potential_percent)
                .filter(|v| *v != 0.0),
        }
    }

    pub fn is_upside(&self) -> bool {
        self.price_potential_percent.is_some_and(|v| v > 0.0)
    }
}
