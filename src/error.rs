use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// A field of a new transaction that is required for it to be admitted to the store.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Text,
    Amount,
    Month,
}

serde_plain::derive_display_from_serialize!(Field);
serde_plain::derive_fromstr_from_deserialize!(Field);

/// Returned when a new transaction is missing one or more required fields. Nothing is written to
/// the store when this occurs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValidationError {
    fields: Vec<Field>,
}

impl ValidationError {
    /// Returns `None` when `fields` is empty, i.e. when nothing failed validation.
    pub fn new(fields: Vec<Field>) -> Option<Self> {
        if fields.is_empty() {
            None
        } else {
            Some(Self { fields })
        }
    }

    /// The fields that were missing or invalid, in form order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.fields.iter().map(|field| field.to_string()).collect();
        write!(f, "Fill all fields, missing or invalid: {}", names.join(", "))
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_is_not_an_error() {
        assert!(ValidationError::new(Vec::new()).is_none());
    }

    #[test]
    fn test_message_names_fields() {
        let e = ValidationError::new(vec![Field::Text, Field::Month]).unwrap();
        assert_eq!(
            e.to_string(),
            "Fill all fields, missing or invalid: text, month"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let e: Error = ValidationError::new(vec![Field::Amount]).unwrap().into();
        let v = e.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(v.fields(), &[Field::Amount]);
    }
}
