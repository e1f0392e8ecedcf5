use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Every row was dropped during normalization, or the file had none.
    #[error("no valid stock data found in {source_name}")]
    EmptyDataset { source_name: String },
}

impl LoadError {
    pub fn is_empty_dataset(&self) -> bool {
        matches!(self, LoadError::EmptyDataset { .. })
    }
}
