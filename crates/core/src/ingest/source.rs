use crate::domain::record::RawRow;
use crate::error::LoadError;
use crate::ingest::parse::parse_rows;
use std::path::PathBuf;

/// Where raw rows come from. The pipeline only sees already-parsed rows.
#[async_trait::async_trait]
pub trait RowSource: Send + Sync {
    fn name(&self) -> String;

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, LoadError>;
}

#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl RowSource for CsvFileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, LoadError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_rows(&text)
    }
}

/// CSV text held in memory, e.g. an embedded sample or a request body.
#[derive(Debug, Clone)]
pub struct CsvTextSource {
    name: String,
    text: String,
}

impl CsvTextSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait::async_trait]
impl RowSource for CsvTextSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, LoadError> {
        parse_rows(&self.text)
    }
}
