use crate::domain::columns::{CellValue, Column};
use crate::domain::filter::{matches, FilterState};
use crate::domain::metrics::{derive_metrics, DerivedMetrics};
use crate::domain::record::StockRecord;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const MAX_PAGE_SIZE: usize = 500;

/// A record with its derived metrics attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRow {
    #[serde(flatten)]
    pub record: StockRecord,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl StockRow {
    pub fn new(record: StockRecord) -> Self {
        let metrics = derive_metrics(&record);
        Self { record, metrics }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: Column,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: Column::Confidence,
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub filter: FilterState,
    pub search: Option<String>,
    pub sort: SortSpec,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            search: None,
            sort: SortSpec::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub total: usize,
    pub filtered: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub rows: Vec<StockRow>,
}

/// Filter, search, sort and slice `rows` into one page.
pub fn build_view(rows: &[StockRow], query: &ViewQuery) -> Page {
    let needle = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut visible: Vec<&StockRow> = rows
        .iter()
        .filter(|row| matches(&row.record, &query.filter))
        .filter(|row| needle.as_deref().map_or(true, |n| matches_search(row, n)))
        .collect();

    let SortSpec { column, direction } = query.sort;
    visible.sort_by(|a, b| {
        let ord = CellValue::compare(&column.value(a), &column.value(b));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    let page_size = query.page_size.clamp(1, MAX_PAGE_SIZE);
    let page = query.page.max(1);
    let filtered = visible.len();
    let page_count = filtered.div_ceil(page_size);

    let page_rows = visible
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    Page {
        total: rows.len(),
        filtered,
        page,
        page_size,
        page_count,
        rows: page_rows,
    }
}

fn matches_search(row: &StockRow, needle: &str) -> bool {
    Column::ALL
        .iter()
        .any(|c| c.format(row).to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(symbol: &str, sector: &str, recommendation: &str, confidence: f64) -> StockRow {
        StockRow::new(StockRecord {
            symbol: symbol.to_string(),
            sector: sector.to_string(),
            recommendation: recommendation.to_string(),
            confidence,
            confidence_reported: true,
            current_price: 10.0,
            high_price: 12.0,
            low_price: 8.0,
            generated_date: None,
        })
    }

    fn sample() -> Vec<StockRow> {
        vec![
            row("BHP", "Materials", "Strong Buy", 80.0),
            row("CBA", "Financials", "Hold", 55.0),
            row("CSL", "Healthcare", "Moderate Buy", 91.0),
            row("WDS", "Energy", "Moderate Sell", 40.0),
            row("RIO", "Materials", "Hold", 65.0),
        ]
    }

    fn symbols(page: &Page) -> Vec<&str> {
        page.rows.iter().map(|r| r.record.symbol.as_str()).collect()
    }

    #[test]
    fn default_view_sorts_by_confidence_descending() {
        let page = build_view(&sample(), &ViewQuery::default());
        assert_eq!(symbols(&page), vec!["CSL", "BHP", "RIO", "CBA", "WDS"]);
        assert_eq!(page.total, 5);
        assert_eq!(page.filtered, 5);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(page.page_count, 1);
    }

    #[test]
    fn filter_narrows_rows_but_total_stays_full() {
        let query = ViewQuery {
            filter: FilterState::new("Materials", "", 70),
            ..ViewQuery::default()
        };
        let page = build_view(&sample(), &query);
        assert_eq!(symbols(&page), vec!["BHP"]);
        assert_eq!(page.total, 5);
        assert_eq!(page.filtered, 1);
    }

    #[test]
    fn search_is_case_insensitive_across_columns() {
        let query = ViewQuery {
            search: Some("  hold ".to_string()),
            ..ViewQuery::default()
        };
        assert_eq!(symbols(&build_view(&sample(), &query)), vec!["RIO", "CBA"]);

        let query = ViewQuery {
            search: Some("csl".to_string()),
            ..ViewQuery::default()
        };
        assert_eq!(symbols(&build_view(&sample(), &query)), vec!["CSL"]);

        let query = ViewQuery {
            search: Some("   ".to_string()),
            ..ViewQuery::default()
        };
        assert_eq!(build_view(&sample(), &query).filtered, 5);
    }

    #[test]
    fn sorts_text_columns_ascending() {
        let query = ViewQuery {
            sort: SortSpec {
                column: Column::Symbol,
                direction: SortDirection::Asc,
            },
            ..ViewQuery::default()
        };
        let page = build_view(&sample(), &query);
        assert_eq!(symbols(&page), vec!["BHP", "CBA", "CSL", "RIO", "WDS"]);
    }

    #[test]
    fn paginates_and_tolerates_pages_past_the_end() {
        let mut query = ViewQuery {
            page_size: 2,
            page: 2,
            ..ViewQuery::default()
        };
        let page = build_view(&sample(), &query);
        assert_eq!(symbols(&page), vec!["RIO", "CBA"]);
        assert_eq!(page.page_count, 3);

        query.page = 9;
        let page = build_view(&sample(), &query);
        assert!(page.rows.is_empty());
        assert_eq!(page.filtered, 5);

        query.page = 0;
        query.page_size = 0;
        let page = build_view(&sample(), &query);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(symbols(&page), vec!["CSL"]);
    }

    #[test]
    fn parses_sort_direction() {
        assert_eq!(SortDirection::from_key("ASC"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::from_key("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::from_key("up"), None);
    }

    #[test]
    fn row_serializes_flat() {
        let v = serde_json::to_value(row("BHP", "Materials", "Strong Buy", 80.0)).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj["symbol"], "BHP");
        assert_eq!(obj["avg_target_price"], 10.0);
        assert_eq!(obj["price_potential_percent"], 0.0);
        assert!(!obj.contains_key("record"));
        assert!(!obj.contains_key("metrics"));

        let back: StockRow = serde_json::from_value(v).unwrap();
        assert_eq!(back.record.symbol, "BHP");
    }
}
