//! Derives everything that is shown about the transactions: the month filter choices, the
//! filtered records, their totals and the chart.
//!
//! These are pure functions of the stored records and the selected filter. They are recomputed in
//! full whenever either changes; nothing is cached between calls.

use crate::chart::{self, Spans};
use crate::model::{Amount, Transaction, TransactionType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The filter value that selects every month.
pub const ALL: &str = "all";

/// Selects which transactions are shown.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub enum MonthFilter {
    #[default]
    All,
    /// A `YYYY-MM` key, compared literally.
    Month(String),
}

impl FromStr for MonthFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL {
            MonthFilter::All
        } else {
            MonthFilter::Month(s.to_string())
        })
    }
}

impl Display for MonthFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MonthFilter::All => f.write_str(ALL),
            MonthFilter::Month(m) => f.write_str(m),
        }
    }
}

impl Serialize for MonthFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Income and expense sums over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub income: Amount,
    pub expense: Amount,
    pub balance: Amount,
}

/// The filter choices: `"all"` followed by each distinct month in the order it was first seen.
pub fn distinct_months(records: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut months = vec![ALL.to_string()];
    for t in records {
        if seen.insert(t.month()) {
            months.push(t.month().to_string());
        }
    }
    months
}

/// The records matching `filter`, in their original order.
pub fn filter_by_month(records: &[Transaction], filter: &MonthFilter) -> Vec<Transaction> {
    match filter {
        MonthFilter::All => records.to_vec(),
        MonthFilter::Month(month) => records
            .iter()
            .filter(|t| t.month() == month)
            .cloned()
            .collect(),
    }
}

/// Sums income and expense. Transactions of any other type count toward neither.
pub fn aggregate(records: &[Transaction]) -> Totals {
    let sum = |kind: TransactionType| -> Amount {
        records
            .iter()
            .filter(|t| *t.r#type() == kind)
            .map(Transaction::amount)
            .sum()
    };
    let income = sum(TransactionType::Income);
    let expense = sum(TransactionType::Expense);
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Everything needed to show the transactions for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub filter: MonthFilter,
    pub months: Vec<String>,
    pub records: Vec<Transaction>,
    pub totals: Totals,
    pub chart: Spans,
}

impl View {
    /// Derives the view from scratch. The month list always comes from all records, the totals
    /// and chart only from the filtered ones.
    pub fn derive(records: &[Transaction], filter: &MonthFilter) -> Self {
        let months = distinct_months(records);
        let filtered = filter_by_month(records, filter);
        let totals = aggregate(&filtered);
        let chart = chart::project(totals.income, totals.expense);
        Self {
            filter: filter.clone(),
            months,
            records: filtered,
            totals,
            chart,
        }
    }
}
