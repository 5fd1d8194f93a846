use crate::error::{Field, ValidationError};
use crate::model::Amount;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub(super) const INCOME_STR: &str = "income";
pub(super) const EXPENSE_STR: &str = "expense";

/// Whether a transaction adds to or subtracts from the balance.
///
/// Stored data may contain a type string that is neither `income` nor `expense`. Such values are
/// kept verbatim in `Other` so that they survive a save, and they are left out of all totals.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TransactionType {
    Income,
    Expense,
    Other(String),
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Income => INCOME_STR,
            TransactionType::Expense => EXPENSE_STR,
            TransactionType::Other(s) => s.as_str(),
        }
    }

    /// The sign shown next to the amount when listing the transaction.
    pub fn sign(&self) -> char {
        match self {
            TransactionType::Income => '+',
            _ => '-',
        }
    }
}

impl Default for TransactionType {
    /// A record stored without a type counts as neither income nor expense.
    fn default() -> Self {
        TransactionType::Other(String::new())
    }
}

impl FromStr for TransactionType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            INCOME_STR => TransactionType::Income,
            EXPENSE_STR => TransactionType::Expense,
            other => TransactionType::Other(other.to_string()),
        })
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TransactionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // Infallible
        Ok(TransactionType::from_str(&s).unwrap_or_default())
    }
}

/// A single recorded income or expense entry.
///
/// Serializes to the stored form:
/// ```json
/// {"id":1714550400000,"text":"Salary","amount":1000.0,"type":"income","category":"Job","month":"2024-05"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: i64,
    text: String,
    amount: Amount,
    #[serde(default)]
    r#type: TransactionType,
    #[serde(default)]
    category: String,
    month: String,
}

impl Transaction {
    /// Builds a transaction from already validated input. Use `TransactionStore::add` to admit a
    /// `NewTransaction`, which validates it and assigns the id.
    pub(crate) fn new(id: i64, new: NewTransaction) -> Self {
        Self {
            id,
            text: new.text.trim().to_string(),
            amount: new.amount,
            r#type: new.r#type,
            category: new.category,
            month: new.month,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn r#type(&self) -> &TransactionType {
        &self.r#type
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn month(&self) -> &str {
        &self.month
    }
}

/// The user-supplied part of a transaction, before it has been validated and given an id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewTransaction {
    pub text: String,
    pub amount: Amount,
    pub r#type: TransactionType,
    pub category: String,
    pub month: String,
}

impl NewTransaction {
    pub fn new(
        text: impl Into<String>,
        amount: impl Into<Amount>,
        r#type: TransactionType,
        category: impl Into<String>,
        month: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            amount: amount.into(),
            r#type,
            category: category.into(),
            month: month.into(),
        }
    }

    /// Checks the required fields. Every failing field is reported, not just the first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut invalid = Vec::new();
        if self.text.trim().is_empty() {
            invalid.push(Field::Text);
        }
        if !self.amount.is_valid() {
            invalid.push(Field::Amount);
        }
        if self.month.is_empty() {
            invalid.push(Field::Month);
        }
        match ValidationError::new(invalid) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salary() -> NewTransaction {
        NewTransaction::new("Salary", 1000.0, TransactionType::Income, "Job", "2024-05")
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!(
            TransactionType::from_str("income").unwrap(),
            TransactionType::Income
        );
        assert_eq!(
            TransactionType::from_str("expense").unwrap(),
            TransactionType::Expense
        );
        assert_eq!(
            TransactionType::from_str("transfer").unwrap(),
            TransactionType::Other("transfer".to_string())
        );
    }

    #[test]
    fn test_type_sign() {
        assert_eq!(TransactionType::Income.sign(), '+');
        assert_eq!(TransactionType::Expense.sign(), '-');
    }

    #[test]
    fn test_validate_ok() {
        assert!(salary().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_field() {
        let new = NewTransaction::new("   ", 0.0, TransactionType::Expense, "", "");
        let e = new.validate().unwrap_err();
        assert_eq!(e.fields(), &[Field::Text, Field::Amount, Field::Month]);
    }

    #[test]
    fn test_validate_nan_amount() {
        let mut new = salary();
        new.amount = Amount::new(f64::NAN);
        assert_eq!(new.validate().unwrap_err().fields(), &[Field::Amount]);
    }

    #[test]
    fn test_validate_negative_amount() {
        let mut new = salary();
        new.r#type = TransactionType::Expense;
        new.amount = Amount::new(-50.0);
        assert_eq!(new.validate().unwrap_err().fields(), &[Field::Amount]);
    }

    #[test]
    fn test_validate_category_is_optional() {
        let mut new = salary();
        new.category = String::new();
        assert!(new.validate().is_ok());
    }

    #[test]
    fn test_new_trims_text() {
        let mut new = salary();
        new.text = "  Salary  ".to_string();
        let t = Transaction::new(7, new);
        assert_eq!(t.text(), "Salary");
        assert_eq!(t.id(), 7);
    }

    #[test]
    fn test_serialized_field_names() {
        let t = Transaction::new(1714550400000, salary());
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["id"], 1714550400000_i64);
        assert_eq!(value["text"], "Salary");
        assert_eq!(value["amount"], 1000.0);
        assert_eq!(value["type"], "income");
        assert_eq!(value["category"], "Job");
        assert_eq!(value["month"], "2024-05");
    }

    #[test]
    fn test_deserialize_browser_record() {
        let json = r#"{"id":1714550400123,"text":"Rent","amount":400,"type":"expense","category":"Housing","month":"2024-05"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.amount().value(), 400.0);
        assert_eq!(t.r#type(), &TransactionType::Expense);
    }

    #[test]
    fn test_deserialize_unknown_and_missing_type() {
        let json = r#"{"id":1,"text":"Move","amount":5,"type":"transfer","category":"","month":"2024-05"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.r#type(), &TransactionType::Other("transfer".to_string()));
        assert_eq!(serde_json::to_value(&t).unwrap()["type"], "transfer");

        let json = r#"{"id":2,"text":"Gift","amount":5,"month":"2024-05"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.r#type(), &TransactionType::default());
        assert_eq!(t.category(), "");
    }
}
