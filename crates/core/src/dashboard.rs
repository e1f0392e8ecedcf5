use crate::dataset::Dataset;
use crate::domain::detail::StockDetail;
use crate::domain::filter::FilterState;
use crate::domain::stats::Summary;
use crate::domain::view::{Page, SortSpec, ViewQuery, DEFAULT_PAGE_SIZE};

/// Owns the loaded dataset and the one piece of mutable UI state: the filter.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    filter: FilterState,
    search: Option<String>,
    sort: SortSpec,
    page_size: usize,
}

impl Dashboard {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            filter: FilterState::default(),
            search: None,
            sort: SortSpec::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_sector(&mut self, sector: impl Into<String>) {
        self.filter.sector = sector.into();
    }

    pub fn set_recommendation(&mut self, recommendation: impl Into<String>) {
        self.filter.recommendation = recommendation.into();
    }

    pub fn set_min_confidence(&mut self, min_confidence: u8) {
        self.filter.set_min_confidence(min_confidence);
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.search = search;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    /// Query for `page` under the current selections.
    pub fn query(&self, page: usize) -> ViewQuery {
        ViewQuery {
            filter: self.filter.clone(),
            search: self.search.clone(),
            sort: self.sort,
            page,
            page_size: self.page_size,
        }
    }

    pub fn view(&self, page: usize) -> Page {
        self.dataset.view(&self.query(page))
    }

    /// Always over the full dataset, whatever the filter says.
    pub fn summary(&self) -> Summary {
        self.dataset.summary()
    }

    pub fn sectors(&self) -> Vec<String> {
        self.dataset.sectors()
    }

    pub fn detail(&self, symbol: &str) -> Option<StockDetail> {
        self.dataset.detail(symbol)
    }
}
