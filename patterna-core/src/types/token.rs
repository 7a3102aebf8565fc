//! Token types shared with the tokenizer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag of a token
///
/// Atomic tags come straight from the tokenizer; compound tags are assigned
/// by the type resolver after vocabulary lookups. `Gap` is reserved for the
/// placeholders inserted during alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenType {
    Alpha,
    Digit,
    Alphanum,
    Punctuation,
    Space,
    Gap,
    Month,
    Weekday,
    Datetime,
    State,
    Country,
    County,
    Business,
    Street,
    /// Secondary unit designator (APT, SUITE, FL, ...)
    SecondaryUnit,
}

impl TokenType {
    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap)
    }

    /// Space and punctuation share one bucket when comparing shapes: the exact
    /// separator character does not change the structure of a value.
    pub fn is_punctuation_class(&self) -> bool {
        matches!(self, Self::Space | Self::Punctuation)
    }

    /// Atomic types that a generalized `Alphanum` subsumes.
    pub fn is_alpha_or_digit(&self) -> bool {
        matches!(self, Self::Alpha | Self::Digit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "ALPHA",
            Self::Digit => "DIGIT",
            Self::Alphanum => "ALPHANUM",
            Self::Punctuation => "PUNC",
            Self::Space => "SPACE",
            Self::Gap => "GAP",
            Self::Month => "MONTH",
            Self::Weekday => "WEEKDAY",
            Self::Datetime => "DATETIME",
            Self::State => "STATE",
            Self::Country => "COUNTRY",
            Self::County => "COUNTY",
            Self::Business => "BUSINESS",
            Self::Street => "STREET",
            Self::SecondaryUnit => "SUD",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed token of a tokenized value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub text: String,
    /// Index of the input row this token was produced from
    pub row_index: usize,
}

impl Token {
    pub fn new(token_type: TokenType, text: impl Into<String>, row_index: usize) -> Self {
        Self {
            token_type,
            text: text.into(),
            row_index,
        }
    }

    /// Gap placeholder for the given row. Gaps carry no text.
    pub fn gap(row_index: usize) -> Self {
        Self {
            token_type: TokenType::Gap,
            text: String::new(),
            row_index,
        }
    }

    pub fn is_gap(&self) -> bool {
        self.token_type.is_gap()
    }

    /// Number of characters in the token text
    pub fn size(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_gap() {
            write!(f, "_GAP_")
        } else {
            write!(f, "_{}_({:?})", self.token_type, self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_factory() {
        let gap = Token::gap(7);
        assert!(gap.is_gap());
        assert_eq!(gap.row_index, 7);
        assert!(gap.text.is_empty());
        assert_eq!(gap.size(), 0);
    }

    #[test]
    fn test_punctuation_bucket() {
        assert!(TokenType::Space.is_punctuation_class());
        assert!(TokenType::Punctuation.is_punctuation_class());
        assert!(!TokenType::Alpha.is_punctuation_class());
        assert!(!TokenType::Gap.is_punctuation_class());
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenType::Digit, "125", 0);
        assert_eq!(token.to_string(), "_DIGIT_(\"125\")");
        assert_eq!(Token::gap(0).to_string(), "_GAP_");
        assert_eq!(TokenType::SecondaryUnit.to_string(), "SUD");
    }
}
