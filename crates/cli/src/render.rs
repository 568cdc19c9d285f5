use stratos_core::display::cards::{AnalysisCard, PortfolioTotals};
use stratos_core::display::tables::{
    alert_rows, holding_rows, ALERT_COLUMNS, HOLDING_COLUMNS, STOCK_COLUMNS,
};
use stratos_core::models::alert::{Alert, AlertCheck};
use stratos_core::models::portfolio::PortfolioSummary;
use stratos_core::views::portfolio::{PortfolioDisplay, EMPTY_PORTFOLIO_MESSAGE};
use stratos_core::views::alerts::EMPTY_ALERTS_MESSAGE;
use stratos_core::views::screener::ResultsPanel;
use stratos_core::views::{Notification, NotificationLevel};

/// Left-aligned plain-text table sized to its widest cell.
pub fn print_table<const N: usize>(headers: [&str; N], rows: &[[&str; N]]) {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    print_line(&headers, &widths);
    let rule = widths.map(|w| "-".repeat(w));
    print_line(&rule.each_ref().map(String::as_str), &widths);
    for row in rows {
        print_line(row, &widths);
    }
}

fn print_line(cells: &[&str], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect();
    println!("{}", padded.join("  ").trim_end());
}

pub fn print_results(panel: &ResultsPanel) {
    println!("{}", panel.heading);
    if let Some(summary) = &panel.filters_summary {
        println!("Filters applied: {summary}");
    }
    println!();
    match panel.empty_message {
        Some(message) => println!("{message}"),
        None => {
            let rows: Vec<[&str; 8]> = panel.rows.iter().map(|r| r.cells()).collect();
            print_table(STOCK_COLUMNS, &rows);
        }
    }
}

pub fn print_analysis(card: &AnalysisCard) {
    println!("{}", card.title);
    println!(
        "{}  (confidence {}, {} risk)",
        card.recommendation, card.confidence, card.risk_level
    );
    if let Some(target) = &card.target_price {
        println!("Target price: {target}");
    }
    if !card.summary.is_empty() {
        println!();
        println!("{}", card.summary);
    }
    for (title, items) in [("Pros", &card.pros), ("Cons", &card.cons)] {
        if items.is_empty() {
            continue;
        }
        println!();
        println!("{title}:");
        for item in items {
            println!("  - {item}");
        }
    }
}

pub fn print_portfolio(display: PortfolioDisplay<'_>) {
    match display {
        PortfolioDisplay::Loading => println!("Loading portfolio..."),
        PortfolioDisplay::Error(message) => println!("Error: {message}"),
        PortfolioDisplay::Empty => println!("{EMPTY_PORTFOLIO_MESSAGE}"),
        PortfolioDisplay::Holdings(summary) => print_holdings(summary),
    }
}

fn print_holdings(summary: &PortfolioSummary) {
    let totals = PortfolioTotals::from(summary);
    println!("Total Value:     {}", totals.total_value);
    println!("Total Cost:      {}", totals.total_cost);
    println!(
        "Total Gain/Loss: {} ({})",
        totals.total_gain_loss, totals.total_gain_loss_percent
    );
    println!();

    let rows = holding_rows(&summary.holdings);
    let ids: Vec<String> = rows.iter().map(|r| r.id.to_string()).collect();
    let cells: Vec<[&str; 8]> = rows
        .iter()
        .zip(ids.iter())
        .map(|(row, id)| {
            let [a, b, c, d, e, f, g] = row.cells();
            [id.as_str(), a, b, c, d, e, f, g]
        })
        .collect();
    let [a, b, c, d, e, f, g] = HOLDING_COLUMNS;
    print_table(["ID", a, b, c, d, e, f, g], &cells);
}

pub fn print_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("{EMPTY_ALERTS_MESSAGE}");
        return;
    }
    let rows = alert_rows(alerts);
    let ids: Vec<String> = rows.iter().map(|r| r.id.to_string()).collect();
    let cells: Vec<[&str; 5]> = rows
        .iter()
        .zip(ids.iter())
        .map(|(row, id)| {
            let [a, b, c, d] = row.cells();
            [id.as_str(), a, b, c, d]
        })
        .collect();
    let [a, b, c, d] = ALERT_COLUMNS;
    print_table(["ID", a, b, c, d], &cells);
}

pub fn print_checks<'a>(checks: impl Iterator<Item = &'a AlertCheck>) {
    let mut any = false;
    for check in checks {
        any = true;
        println!("* {}", check.message);
    }
    if !any {
        println!("No alerts triggered.");
    }
}

/// Errors go to stderr, everything else to stdout.
pub fn print_notifications(notifications: &[Notification]) {
    for n in notifications {
        match n.level {
            NotificationLevel::Error => eprintln!("{}", n.message),
            NotificationLevel::Success | NotificationLevel::Info => println!("{}", n.message),
        }
    }
}
