use stockboard_core::dataset::DatasetMeta;
use stockboard_core::domain::columns::{format_potential, format_price, Column, NOT_AVAILABLE};
use stockboard_core::domain::detail::StockDetail;
use stockboard_core::domain::stats::Summary;
use stockboard_core::domain::view::Page;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Plain-text table built from the column descriptors, with a paging footer.
pub fn render_table(page: &Page) -> String {
    let mut builder = Builder::default();
    builder.push_record(Column::ALL.iter().map(|c| c.title().to_string()));
    for row in &page.rows {
        builder.push_record(Column::ALL.iter().map(|c| c.format(row)));
    }

    let mut table = builder.build();
    table.with(Style::psql());

    format!(
        "{table}\nShowing {} of {} stocks (page {} of {}, {} total)\n",
        page.rows.len(),
        page.filtered,
        page.page,
        page.page_count.max(1),
        page.total
    )
}

pub fn render_summary(summary: &Summary, meta: &DatasetMeta) -> String {
    let mut out = String::new();
    out.push_str(&format!("Source:          {}\n", meta.source));
    if let Some(d) = &meta.generated_date {
        out.push_str(&format!("Generated:       {d}\n"));
    }
    out.push_str(&format!("Total stocks:    {}\n", summary.total));
    out.push_str(&format!("Strong buys:     {}\n", summary.strong_buy_count));
    out.push_str(&format!("Avg confidence:  {:.1}%\n", summary.avg_confidence));
    out
}

pub fn render_detail(d: &StockDetail) -> String {
    let price = |v: Option<f64>| v.map(format_price).unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut out = String::new();
    out.push_str(&format!("Symbol:          {}\n", d.symbol));
    out.push_str(&format!(
        "Sector:          {}\n",
        d.sector.as_deref().unwrap_or(NOT_AVAILABLE)
    ));
    let badge = d.recommendation_kind.label();
    if badge == d.recommendation {
        out.push_str(&format!("Recommendation:  {}\n", d.recommendation));
    } else {
        out.push_str(&format!("Recommendation:  {} ({badge})\n", d.recommendation));
    }
    out.push_str(&format!("Confidence:      {}%\n", d.confidence_percent));
    out.push_str(&format!("Current price:   {}\n", price(d.current_price)));
    out.push_str(&format!("Avg target:      {}\n", price(d.avg_target_price)));
    let potential = format_potential(d.price_potential_percent.unwrap_or(0.0));
    match d.price_potential_percent {
        Some(_) if d.is_upside() => out.push_str(&format!("Potential:       {potential} (up)\n")),
        Some(_) => out.push_str(&format!("Potential:       {potential} (down)\n")),
        None => out.push_str(&format!("Potential:       {potential}\n")),
    }
    out.push_str(&format!("Target high:     {}\n", price(d.high_price)));
    out.push_str(&format!("Target low:      {}\n", price(d.low_price)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockboard_core::domain::record::StockRecord;
    use stockboard_core::domain::view::{build_view, StockRow, ViewQuery};

    fn rows() -> Vec<StockRow> {
        vec![
            StockRow::new(StockRecord {
                symbol: "BHP".to_string(),
                sector: "Materials".to_string(),
                recommendation: "Strong Buy".to_string(),
                confidence: 80.0,
                confidence_reported: true,
                current_price: 40.0,
                high_price: 50.0,
                low_price: 0.0,
                generated_date: None,
            }),
            StockRow::new(StockRecord {
                symbol: "XYZ".to_string(),
                sector: String::new(),
                recommendation: "Hold".to_string(),
                confidence: 0.0,
                confidence_reported: false,
                current_price: 0.0,
                high_price: 0.0,
                low_price: 0.0,
                generated_date: None,
            }),
        ]
    }

    #[test]
    fn table_has_header_rows_and_footer() {
        let page = build_view(&rows(), &ViewQuery::default());
        let text = render_table(&page);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Symbol"));
        assert!(lines[0].contains("Confidence"));
        assert!(lines[1].contains("---"));
        assert!(lines[2].contains("BHP"));
        assert!(lines[2].contains("$40.00"));
        assert!(lines[2].contains("+25.0%"));
        assert!(lines[3].contains("XYZ"));
        assert!(lines[3].contains("N/A"));
        assert_eq!(lines[4], "Showing 2 of 2 stocks (page 1 of 1, 2 total)");
    }

    #[test]
    fn detail_shows_missing_values_as_na() {
        let d = StockDetail::from_row(&rows()[1]);
        let text = render_detail(&d);
        assert!(text.contains("Sector:          N/A"));
        assert!(text.contains("Current price:   N/A"));
        assert!(text.contains("Potential:       N/A\n"));
        assert!(text.contains("Recommendation:  Hold\n"));
    }

    #[test]
    fn detail_marks_direction_and_badge() {
        let d = StockDetail::from_row(&rows()[0]);
        let text = render_detail(&d);
        assert!(text.contains("Recommendation:  Strong Buy\n"));
        assert!(text.contains("Potential:       +25.0% (up)"));

        let mut row = rows()[0].clone();
        row.record.recommendation = "Accumulate".to_string();
        row.record.high_price = 20.0;
        let d = StockDetail::from_row(&StockRow::new(row.record));
        let text = render_detail(&d);
        assert!(text.contains("Recommendation:  Accumulate (Hold)"));
        assert!(text.contains("(down)"));
    }
}
