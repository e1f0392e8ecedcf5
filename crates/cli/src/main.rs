use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockboard_core::dashboard::Dashboard;
use stockboard_core::domain::columns::Column;
use stockboard_core::domain::view::{SortDirection, SortSpec};
use stockboard_core::ingest::source::CsvFileSource;

mod render;

#[derive(Debug, Parser)]
#[command(name = "stockboard")]
struct Args {
    /// CSV of stock recommendations. Defaults to STOCK_CSV_PATH.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Only show this sector (exact match).
    #[arg(long)]
    sector: Option<String>,

    /// Only show this recommendation, e.g. "Strong Buy".
    #[arg(long)]
    recommendation: Option<String>,

    /// Minimum confidence level in percent.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_confidence: u8,

    /// Case-insensitive text search across all columns.
    #[arg(long)]
    search: Option<String>,

    /// Column to sort by.
    #[arg(long, default_value = "confidence", value_parser = parse_column)]
    sort: Column,

    /// Sort ascending instead of descending.
    #[arg(long)]
    asc: bool,

    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page. Defaults to DEFAULT_PAGE_SIZE.
    #[arg(long)]
    page_size: Option<usize>,

    /// Show the detail view for one symbol instead of the table.
    #[arg(long)]
    symbol: Option<String>,

    /// Print summary statistics for the whole file.
    #[arg(long)]
    summary: bool,

    /// List the sectors present in the file.
    #[arg(long)]
    sectors: bool,

    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn parse_column(s: &str) -> Result<Column, String> {
    Column::from_key(s).ok_or_else(|| {
        let keys: Vec<&str> = Column::ALL.iter().map(|c| c.key()).collect();
        format!("unknown column {s:?} (expected one of: {})", keys.join(", "))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let settings = stockboard_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    if let Err(err) = run(args, &settings).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "stockboard run failed");
        return Err(err);
    }
    Ok(())
}

async fn run(args: Args, settings: &stockboard_core::config::Settings) -> anyhow::Result<()> {
    let csv_path = args.csv.clone().unwrap_or_else(|| settings.csv_path.clone());
    let source = CsvFileSource::new(&csv_path);
    let dataset = stockboard_core::load_dataset(&source)
        .await
        .with_context(|| format!("failed to load stock data from {}", csv_path.display()))?;

    let mut dashboard = Dashboard::new(dataset)
        .with_page_size(args.page_size.unwrap_or(settings.default_page_size));

    if let Some(symbol) = args.symbol.as_deref() {
        let detail = dashboard
            .detail(symbol)
            .with_context(|| format!("no stock with symbol {symbol:?}"))?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&detail)?);
        } else {
            print!("{}", render::render_detail(&detail));
        }
        return Ok(());
    }

    if args.summary {
        let summary = dashboard.summary();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print!(
                "{}",
                render::render_summary(&summary, &dashboard.dataset().meta())
            );
        }
        return Ok(());
    }

    if args.sectors {
        let sectors = dashboard.sectors();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&sectors)?);
        } else {
            for s in sectors {
                println!("{s}");
            }
        }
        return Ok(());
    }

    if let Some(sector) = args.sector {
        dashboard.set_sector(sector);
    }
    if let Some(recommendation) = args.recommendation {
        dashboard.set_recommendation(recommendation);
    }
    dashboard.set_min_confidence(args.min_confidence);
    dashboard.set_search(args.search);
    dashboard.set_sort(SortSpec {
        column: args.sort,
        direction: if args.asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
    });

    let page = dashboard.view(args.page);
    tracing::debug!(
        filtered = page.filtered,
        total = page.total,
        page = page.page,
        "built table view"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", render::render_table(&page));
    }

    Ok(())
}

fn init_sentry(settings: &stockboard_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
