//! These structs provide the CLI interface for the budget CLI.

use crate::config::DEFAULT_CURRENCY;
use crate::export::DEFAULT_REPORT;
use crate::model::{Amount, NewTransaction, TransactionType};
use crate::view::MonthFilter;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// budget: A command-line tool for tracking income and expenses.
///
/// Transactions are kept in a local data directory. They can be listed for a single month or for
/// all months together with income, expense and balance totals and the share each takes of a pie
/// chart, and exported to a CSV report.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. By default the data directory is $HOME/budget,
    /// pass --budget-home or set BUDGET_HOME to put it somewhere else.
    Init(InitArgs),
    /// Record a new income or expense.
    Add(AddArgs),
    /// Remove a transaction by its id. Removing an id that does not exist does nothing.
    Remove(RemoveArgs),
    /// Show transactions, totals and the income/expense chart, optionally for one month.
    List(ListArgs),
    /// Show the month filter choices: "all" followed by each month in the order first recorded.
    Months,
    /// Write every transaction to a CSV report.
    Export(ExportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where budget data and configuration is held. Defaults to ~/budget
    #[arg(long, env = "BUDGET_HOME", default_value_t = default_budget_home())]
    budget_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn budget_home(&self) -> &DisplayPath {
        &self.budget_home
    }
}

/// Args for the `budget init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The symbol shown in front of amounts.
    #[arg(long, default_value = DEFAULT_CURRENCY)]
    currency: String,
}

impl InitArgs {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

/// The transaction types that can be entered from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Kind {
    #[default]
    Income,
    Expense,
}

impl From<Kind> for TransactionType {
    fn from(value: Kind) -> Self {
        match value {
            Kind::Income => TransactionType::Income,
            Kind::Expense => TransactionType::Expense,
        }
    }
}

/// Args for the `budget add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// A description of the transaction, e.g. "Salary".
    #[arg(long)]
    text: String,

    /// The amount in currency units, e.g. 1000 or 12.50.
    #[arg(long)]
    amount: Amount,

    /// Whether this is income or an expense.
    #[arg(long = "type", value_enum, default_value_t = Kind::Income)]
    kind: Kind,

    /// A free-form category, e.g. "Housing".
    #[arg(long, default_value = "")]
    category: String,

    /// The month the transaction belongs to, as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<String>,
}

impl AddArgs {
    pub fn new(
        text: impl Into<String>,
        amount: impl Into<Amount>,
        kind: Kind,
        category: impl Into<String>,
        month: Option<String>,
    ) -> Self {
        Self {
            text: text.into(),
            amount: amount.into(),
            kind,
            category: category.into(),
            month,
        }
    }

    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }

    /// Builds the transaction to add, using `default_month` when no month was given.
    pub fn to_new_transaction(&self, default_month: &str) -> NewTransaction {
        NewTransaction::new(
            self.text.clone(),
            self.amount,
            self.kind.into(),
            self.category.clone(),
            self.month().unwrap_or(default_month),
        )
    }
}

/// Args for the `budget remove` command.
#[derive(Debug, Parser, Clone)]
pub struct RemoveArgs {
    /// The id of the transaction to remove, as shown by `budget list`.
    id: i64,
}

impl RemoveArgs {
    pub fn new(id: i64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

/// Args for the `budget list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Either "all" or a month as YYYY-MM.
    #[arg(long, default_value = "all")]
    month: MonthFilter,
}

impl ListArgs {
    pub fn new(month: MonthFilter) -> Self {
        Self { month }
    }

    pub fn month(&self) -> &MonthFilter {
        &self.month
    }
}

/// Args for the `budget export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// Where to write the report.
    #[arg(long, short, default_value = DEFAULT_REPORT)]
    output: PathBuf,
}

impl ExportArgs {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

fn default_budget_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("budget"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --budget-home or BUDGET_HOME instead of relying on the default \
                budget home directory.",
            );
            PathBuf::from("budget")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
