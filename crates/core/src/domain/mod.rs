pub mod columns;
pub mod detail;
pub mod filter;
pub mod metrics;
pub mod record;
pub mod stats;
pub mod view;
