//! Phone number normalization.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A normalized phone number in `+` prefixed international form.
///
/// Input may carry the punctuation a person types into a phone field
/// (`+1 (555) 123-4567`, `555 123 4567`); parsing strips it down to the
/// digits and prefixes a `+`. Numbers without a country code are assumed
/// to be North American and get a `+1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parses and normalizes a phone number.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPhoneNumber` if the input contains
    /// characters other than digits and phone punctuation, or if the
    /// digit count falls outside 10..=15.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidPhoneNumber("empty".to_string()));
        }

        let mut digits = String::new();
        for (i, c) in trimmed.chars().enumerate() {
            match c {
                '0'..='9' => digits.push(c),
                '+' if i == 0 => {}
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => {
                    return Err(DomainError::InvalidPhoneNumber(trimmed.to_string()));
                }
            }
        }

        if !(10..=15).contains(&digits.len()) {
            return Err(DomainError::InvalidPhoneNumber(trimmed.to_string()));
        }

        // A bare national number gets the default country code.
        let normalized = if trimmed.starts_with('+') || digits.len() > 10 {
            format!("+{digits}")
        } else {
            format!("+1{digits}")
        };

        Ok(Self(normalized))
    }

    /// Returns the normalized form, e.g. `+15551234567`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last few digits for display next to a masked number.
    #[must_use]
    pub fn last_digits(&self, count: usize) -> &str {
        let digits = &self.0[1..];
        let start = digits.len().saturating_sub(count);
        &digits[start..]
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_e164_passthrough() {
        let phone = PhoneNumber::parse("+15551234567").unwrap();
        assert_eq!(phone.as_str(), "+15551234567");
    }

    #[test]
    fn test_parse_formatted_input() {
        let phone = PhoneNumber::parse("+1 (555) 123-4567").unwrap();
        assert_eq!(phone.as_str(), "+15551234567");
    }

    #[test]
    fn test_parse_bare_national_number() {
        let phone = PhoneNumber::parse("5551234567").unwrap();
        assert_eq!(phone.as_str(), "+15551234567");
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert!(PhoneNumber::parse("555-CALL-NOW").is_err());
    }

    #[test]
    fn test_parse_rejects_short_numbers() {
        assert!(PhoneNumber::parse("12345").is_err());
        assert!(PhoneNumber::parse("").is_err());
    }

    #[test]
    fn test_last_digits() {
        let phone = PhoneNumber::parse("+15551234567").unwrap();
        assert_eq!(phone.last_digits(4), "4567");
    }
}
