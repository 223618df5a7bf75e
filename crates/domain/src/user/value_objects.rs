//! Validated scalars for the user record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// User lifecycle status. Deactivation is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Activated,
    #[default]
    Deactivated,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Activated => f.write_str("ACTIVATED"),
            UserStatus::Deactivated => f.write_str("DEACTIVATED"),
        }
    }
}

/// Email address with a local part and a dotted domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::new("email cannot be empty"));
        }
        let Some((local, host)) = value.split_once('@') else {
            return Err(ValidationError::new("invalid email format"));
        };
        if local.is_empty() || host.is_empty() || !host.contains('.') || host.ends_with('.') {
            return Err(ValidationError::new("invalid email format"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Phone number. Whitespace is stripped; the sanitized value must be 8 to 20
/// characters of digits, dashes and parentheses, with an optional leading `+`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::new("phone number cannot be empty"));
        }
        let sanitized: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        let rest = sanitized.strip_prefix('+').unwrap_or(&sanitized);
        let valid_chars = rest
            .chars()
            .all(|c| c.is_ascii_digit() || c == '-' || c == '(' || c == ')');
        if !valid_chars || !(8..=20).contains(&rest.chars().count()) {
            return Err(ValidationError::new("invalid phone number format"));
        }
        Ok(Self(sanitized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_requires_local_part_and_dotted_domain() {
        assert!(Email::parse("ada@example.com").is_ok());
        assert!(Email::parse("").is_err());
        assert!(Email::parse("ada").is_err());
        assert!(Email::parse("@example.com").is_err());
        assert!(Email::parse("ada@example").is_err());
        assert!(Email::parse("ada@example.").is_err());
    }

    #[test]
    fn phone_strips_whitespace_and_bounds_length() {
        assert_eq!(
            PhoneNumber::parse("+1 555 010 1234").unwrap().as_str(),
            "+15550101234"
        );
        assert!(PhoneNumber::parse("(555) 010-1234").is_ok());
        assert!(PhoneNumber::parse("1234567").is_err());
        assert!(PhoneNumber::parse("call-me-maybe").is_err());
        assert!(PhoneNumber::parse("").is_err());
    }

    #[test]
    fn decode_re_validates() {
        let result: Result<Email, _> = serde_json::from_str(r#""not-an-email""#);
        assert!(result.is_err());
        let ok: Email = serde_json::from_str(r#""ada@example.com""#).unwrap();
        assert_eq!(ok.as_str(), "ada@example.com");
    }
}
