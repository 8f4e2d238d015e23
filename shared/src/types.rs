//! Common wire types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A numeric form value that may arrive as a JSON number or as free text
/// using either a comma or a dot as the decimal separator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(Decimal),
    Text(String),
}

impl NumericInput {
    /// True for the empty string, which forms submit for untouched inputs.
    pub fn is_empty(&self) -> bool {
        matches!(self, NumericInput::Text(t) if t.is_empty())
    }

    /// Normalize to a decimal, accepting "29,50" as well as "29.50".
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            NumericInput::Number(n) => Some(*n),
            NumericInput::Text(t) => t.trim().replace(',', ".").parse::<Decimal>().ok(),
        }
    }
}

impl From<Decimal> for NumericInput {
    fn from(value: Decimal) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}
