use crate::domain::view::StockRow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Table columns in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Symbol,
    Sector,
    Recommendation,
    Confidence,
    CurrentPrice,
    AvgTargetPrice,
    PricePotential,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Symbol,
        Column::Sector,
        Column::Recommendation,
        Column::Confidence,
        Column::CurrentPrice,
        Column::AvgTargetPrice,
        Column::PricePotential,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Column::Symbol => "symbol",
            Column::Sector => "sector",
            Column::Recommendation => "recommendation",
            Column::Confidence => "confidence",
            Column::CurrentPrice => "current_price",
            Column::AvgTargetPrice => "avg_target_price",
            Column::PricePotential => "price_potential",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Symbol => "Symbol",
            Column::Sector => "Sector",
            Column::Recommendation => "Recommendation",
            Column::Confidence => "Confidence",
            Column::CurrentPrice => "Current Price",
            Column::AvgTargetPrice => "Avg Target",
            Column::PricePotential => "Potential",
        }
    }

    /// Raw cell value used for ordering and search.
    pub fn value(self, row: &StockRow) -> CellValue<'_> {
        let r = &row.record;
        match self {
            Column::Symbol => CellValue::Text(&r.symbol),
            Column::Sector => CellValue::Text(&r.sector),
            Column::Recommendation => CellValue::Text(&r.recommendation),
            Column::Confidence => CellValue::Number(r.confidence),
            Column::CurrentPrice => CellValue::Number(r.current_price),
            Column::AvgTargetPrice => CellValue::Number(row.metrics.avg_target_price),
            Column::PricePotential => CellValue::Number(row.metrics.price_potential_percent),
        }
    }

    pub fn format(self, row: &StockRow) -> String {
        let r = &row.record;
        match self {
            Column::Symbol => r.symbol.clone(),
            Column::Sector => r.sector.clone(),
            Column::Recommendation => r.recommendation.clone(),
            Column::Confidence => format_confidence(r.confidence),
            Column::CurrentPrice => format_price(r.current_price),
            Column::AvgTargetPrice => format_price(row.metrics.avg_target_price),
            Column::PricePotential => format_potential(row.metrics.price_potential_percent),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl CellValue<'_> {
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            // Columns never mix kinds; keep the order total anyway.
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
        }
    }
}

pub const NOT_AVAILABLE: &str = "N/A";

pub fn format_price(v: f64) -> String {
    if v > 0.0 {
        format!("${v:.2}")
    } else {
        NOT_AVAILABLE.to_string()
    }
}

pub fn format_confidence(v: f64) -> String {
    format!("{}%", v.round() as i64)
}

/// `+x.x%` for upside, `-x.x%` for downside, N/A when there is no potential.
pub fn format_potential(pct: f64) -> String {
    if pct == 0.0 {
        return NOT_AVAILABLE.to_string();
    }
    let sign = if pct > 0.0 { '+' } else { '-' };
    format!("{sign}{:.1}%", pct.abs())
}

/// Badge kind for a recommendation label. Unknown labels render as Hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    StrongBuy,
    ModerateBuy,
    Hold,
    ModerateSell,
    StrongSell,
}

impl RecommendationKind {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Strong Buy" => Some(Self::StrongBuy),
            "Moderate Buy" => Some(Self::ModerateBuy),
            "Hold" => Some(Self::Hold),
            "Moderate Sell" => Some(Self::ModerateSell),
            "Strong Sell" => Some(Self::StrongSell),
            _ => None,
        }
    }

    pub fn for_display(label: &str) -> Self {
        Self::from_label(label).unwrap_or(Self::Hold)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::ModerateBuy => "Moderate Buy",
            Self::Hold => "Hold",
            Self::ModerateSell => "Moderate Sell",
            Self::StrongSell => "Strong Sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorIcon {
    Microchip,
    Heartbeat,
    University,
    Bolt,
    Hammer,
    Industry,
    ShoppingCart,
    Plug,
    Building,
    Phone,
    ChartLine,
}

const SECTOR_ICONS: [(&str, SectorIcon); 10] = [
    ("technology", SectorIcon::Microchip),
    ("healthcare", SectorIcon::Heartbeat),
    ("financial", SectorIcon::University),
    ("energy", SectorIcon::Bolt),
    ("materials", SectorIcon::Hammer),
    ("industrials", SectorIcon::Industry),
    ("consumer", SectorIcon::ShoppingCart),
    ("utilities", SectorIcon::Plug),
    ("real estate", SectorIcon::Building),
    ("telecommunications", SectorIcon::Phone),
];

impl SectorIcon {
    /// First sector keyword contained in the name wins; anything else gets the generic chart.
    pub fn for_sector(sector: &str) -> Self {
        let lower = sector.to_lowercase();
        SECTOR_ICONS
            .iter()
            .find(|(key, _)| lower.contains(key))
            .map(|(_, icon)| *icon)
            .unwrap_or(SectorIcon::ChartLine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::StockRecord;

    fn row(high: f64, low: f64, current: f64) -> StockRow {
        StockRow::new(StockRecord {
            symbol: "WES".to_string(),
            sector: "Consumer Discretionary".to_string(),
            recommendation: "Moderate Buy".to_string(),
            confidence: 72.6,
            confidence_reported: true,
            current_price: current,
            high_price: high,
            low_price: low,
            generated_date: None,
        })
    }

    #[test]
    fn keys_round_trip_for_every_column() {
        for c in Column::ALL {
            assert_eq!(Column::from_key(c.key()), Some(c));
        }
        assert_eq!(Column::from_key("bogus"), None);
    }

    #[test]
    fn formats_cells_for_display() {
        let r = row(12.0, 0.0, 10.0);
        assert_eq!(Column::Symbol.format(&r), "WES");
        assert_eq!(Column::Confidence.format(&r), "73%");
        assert_eq!(Column::CurrentPrice.format(&r), "$10.00");
        assert_eq!(Column::AvgTargetPrice.format(&r), "$12.00");
        assert_eq!(Column::PricePotential.format(&r), "+20.0%");

        let r = row(0.0, 0.0, 0.0);
        assert_eq!(Column::CurrentPrice.format(&r), "N/A");
        assert_eq!(Column::AvgTargetPrice.format(&r), "N/A");
        assert_eq!(Column::PricePotential.format(&r), "N/A");
    }

    #[test]
    fn downside_is_shown_with_minus_sign() {
        assert_eq!(format_potential(-12.345), "-12.3%");
    }

    #[test]
    fn numeric_cells_compare_numerically() {
        let a = CellValue::Number(9.0);
        let b = CellValue::Number(10.0);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(CellValue::Text("b").compare(&CellValue::Text("a")), Ordering::Greater);
    }

    #[test]
    fn unknown_recommendation_displays_as_hold() {
        assert_eq!(RecommendationKind::for_display("Strong Sell"), RecommendationKind::StrongSell);
        assert_eq!(RecommendationKind::for_display("Accumulate"), RecommendationKind::Hold);
        assert_eq!(RecommendationKind::from_label("Accumulate"), None);
    }

    #[test]
    fn sector_icon_matches_by_substring() {
        assert_eq!(SectorIcon::for_sector("Information Technology"), SectorIcon::Microchip);
        assert_eq!(SectorIcon::for_sector("REAL ESTATE"), SectorIcon::Building);
        assert_eq!(SectorIcon::for_sector("Crypto"), SectorIcon::ChartLine);
        assert_eq!(SectorIcon::for_sector(""), SectorIcon::ChartLine);
    }
}
