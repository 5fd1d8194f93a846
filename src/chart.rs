//! Projects income and expense totals onto a two-slice pie chart.
//!
//! Only the angles are computed here. Drawing them is left to whoever renders the chart, using
//! the fixed `PIE` geometry.

use crate::model::Amount;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Where and how the pie is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pie {
    pub center: (f64, f64),
    pub radius: f64,
    pub income_color: &'static str,
    pub expense_color: &'static str,
}

pub const PIE: Pie = Pie {
    center: (150.0, 70.0),
    radius: 60.0,
    income_color: "#16a34a",
    expense_color: "#dc2626",
};

/// The angular share of each slice, in radians. Both are zero when there is nothing to draw,
/// otherwise they sum to a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Spans {
    pub income_span: f64,
    pub expense_span: f64,
}

/// A single arc, from `start` to `end` radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slice {
    pub label: SliceLabel,
    pub start: f64,
    pub end: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceLabel {
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(SliceLabel);

/// Computes the spans for `income` and `expense`. Both spans always lie in `[0, TAU]`.
///
/// A zero total, or one too large to be finite, produces an empty chart. A negative or NaN input
/// can only come from hand-edited stored data and is drawn as an empty slice.
pub fn project(income: Amount, expense: Amount) -> Spans {
    // f64::max returns the other operand for NaN.
    let income = income.value().max(0.0);
    let expense = expense.value().max(0.0);
    let total = income + expense;
    if total == 0.0 || !total.is_finite() {
        return Spans::default();
    }
    Spans {
        income_span: TAU * (income / total),
        expense_span: TAU * (expense / total),
    }
}

impl Spans {
    pub fn is_empty(&self) -> bool {
        self.income_span == 0.0 && self.expense_span == 0.0
    }

    /// The contiguous arcs, income starting at angle zero and expense immediately following.
    pub fn slices(&self) -> [Slice; 2] {
        [
            Slice {
                label: SliceLabel::Income,
                start: 0.0,
                end: self.income_span,
                color: PIE.income_color,
            },
            Slice {
                label: SliceLabel::Expense,
                start: self.income_span,
                end: self.income_span + self.expense_span,
                color: PIE.expense_color,
            },
        ]
    }
}

impl Slice {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// The share of the full turn, from 0 to 100.
    pub fn percent(&self) -> f64 {
        self.span() / TAU * 100.0
    }
}
