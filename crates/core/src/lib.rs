pub mod dashboard;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod ingest;

pub use dataset::{load_dataset, Dataset};
pub use error::LoadError;

pub mod config {
    use crate::domain::view::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
    use anyhow::Context;
    use std::path::PathBuf;

    pub const DEFAULT_CSV_PATH: &str = "stock_recommendations.csv";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub csv_path: PathBuf,
        pub sentry_dsn: Option<String>,
        pub default_page_size: usize,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let csv_path = lookup("STOCK_CSV_PATH")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CSV_PATH.to_string());

            let default_page_size = match lookup("DEFAULT_PAGE_SIZE") {
                Some(s) => s
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("DEFAULT_PAGE_SIZE must be a number (got {s:?})"))?,
                None => DEFAULT_PAGE_SIZE,
            };
            anyhow::ensure!(
                (1..=MAX_PAGE_SIZE).contains(&default_page_size),
                "DEFAULT_PAGE_SIZE must be 1..={MAX_PAGE_SIZE} (got {default_page_size})"
            );

            Ok(Self {
                csv_path: PathBuf::from(csv_path),
                sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.is_empty()),
                default_page_size,
            })
        }
    }

}
