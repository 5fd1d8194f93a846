//! List and months command handlers.

use crate::args::ListArgs;
use crate::commands::{plural, Out};
use crate::view::{distinct_months, MonthFilter, View};
use crate::{Config, Result};
use tracing::debug;

/// Derives the view for the requested month from all stored transactions and renders it.
///
/// The structured output is the full `View`: the month choices, the filtered transactions, the
/// totals and the chart spans.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<View>> {
    let store = config.transactions().await?;
    let view = View::derive(store.transactions(), args.month());
    if let MonthFilter::Month(month) = args.month() {
        if !view.months.contains(month) {
            debug!("No transactions have been recorded for {month}");
        }
    }
    let message = render(&view, config.currency_symbol());
    Ok(Out::new(message, view))
}

/// Returns the month filter choices, `all` first.
pub async fn months(config: Config) -> Result<Out<Vec<String>>> {
    let store = config.transactions().await?;
    let months = distinct_months(store.transactions());
    Ok(Out::new(months.join("\n"), months))
}

/// Renders the view as lines of text: a heading, one line per transaction, the totals, the chart
/// slices and the month choices.
pub fn render(view: &View, symbol: &str) -> String {
    let count = view.records.len();
    let mut lines = vec![format!(
        "{count} transaction{} for {}",
        plural(count),
        match &view.filter {
            MonthFilter::All => "all months".to_string(),
            MonthFilter::Month(m) => m.clone(),
        }
    )];

    for t in &view.records {
        let category = if t.category().is_empty() {
            String::new()
        } else {
            format!(" [{}]", t.category())
        };
        lines.push(format!(
            "  {}{}  {}{}  {}  (id {})",
            t.r#type().sign(),
            t.amount().display_with(symbol),
            t.text(),
            category,
            t.month(),
            t.id()
        ));
    }

    let totals = &view.totals;
    lines.push(format!(
        "Income: {}  Expense: {}  Balance: {}",
        totals.income.display_with(symbol),
        totals.expense.display_with(symbol),
        totals.balance.display_with(symbol)
    ));

    if view.chart.is_empty() {
        lines.push("Chart: nothing to show".to_string());
    } else {
        let slices: Vec<String> = view
            .chart
            .slices()
            .iter()
            .map(|s| {
                format!(
                    "{} {:.1}% ({:.3} to {:.3} rad)",
                    s.label,
                    s.percent(),
                    s.start,
                    s.end
                )
            })
            .collect();
        lines.push(format!("Chart: {}", slices.join(", ")));
    }

    lines.push(format!("Months: {}", view.months.join(", ")));
    lines.join("\n")
}
