use crate::domain::detail::StockDetail;
use crate::domain::record::{normalize, StockRecord};
use crate::domain::stats::{aggregate, distinct_sectors, Summary};
use crate::domain::view::{build_view, Page, StockRow, ViewQuery};
use crate::error::LoadError;
use crate::ingest::source::RowSource;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Load metadata without the rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetMeta {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub generated_date: Option<String>,
    pub records: usize,
}

/// The full, immutable record set loaded from one source.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    /// "Generated Date" of the first record, passed through untouched.
    pub generated_date: Option<String>,
    rows: Vec<StockRow>,
}

impl Dataset {
    /// Rejects an empty record set; that is the one load failure callers must surface.
    pub fn from_records(
        source: impl Into<String>,
        records: Vec<StockRecord>,
    ) -> Result<Self, LoadError> {
        let source = source.into();
        if records.is_empty() {
            return Err(LoadError::EmptyDataset {
                source_name: source,
            });
        }

        let generated_date = records.first().and_then(|r| r.generated_date.clone());
        let rows = records.into_iter().map(StockRow::new).collect();

        Ok(Self {
            source,
            loaded_at: Utc::now(),
            generated_date,
            rows,
        })
    }

    pub fn meta(&self) -> DatasetMeta {
        DatasetMeta {
            source: self.source.clone(),
            loaded_at: self.loaded_at,
            generated_date: self.generated_date.clone(),
            records: self.rows.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &StockRecord> {
        self.rows.iter().map(|r| &r.record)
    }

    /// First row whose symbol matches exactly.
    pub fn find(&self, symbol: &str) -> Option<&StockRow> {
        self.rows.iter().find(|r| r.record.symbol == symbol)
    }

    pub fn detail(&self, symbol: &str) -> Option<StockDetail> {
        self.find(symbol).map(StockDetail::from_row)
    }

    pub fn summary(&self) -> Summary {
        aggregate(self.records())
    }

    pub fn sectors(&self) -> Vec<String> {
        distinct_sectors(self.records())
    }

    pub fn view(&self, query: &ViewQuery) -> Page {
        build_view(&self.rows, query)
    }
}

/// Fetches rows from `source`, normalizes them and drops rows without a symbol.
pub async fn load_dataset(source: &dyn RowSource) -> Result<Dataset, LoadError> {
    let name = source.name();
    let raw_rows = source.fetch_rows().await?;
    let rows_read = raw_rows.len();

    let records: Vec<StockRecord> = raw_rows.iter().filter_map(normalize).collect();
    let dropped = rows_read - records.len();
    if dropped > 0 {
        tracing::debug!(source = %name, dropped, "dropped rows without a stock symbol");
    }

    let unreported = records.iter().filter(|r| !r.confidence_reported).count();
    let dataset = Dataset::from_records(name, records)?;

    tracing::info!(
        source = %dataset.source,
        rows_read,
        records = dataset.len(),
        unreported_confidence = unreported,
        "loaded stock dataset"
    );

    Ok(dataset)
}
