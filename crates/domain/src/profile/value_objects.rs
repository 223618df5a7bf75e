//! Validated scalars for the profile record.
//!
//! Apart from the display name, every profile scalar may be empty: an empty
//! value means "not provided" and is distinct from absence of the fact.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! string_scalar {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

/// Profile display name. Non-blank, trimmed, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::new("display name cannot be empty"));
        }
        if value.chars().count() > 100 {
            return Err(ValidationError::new(
                "display name cannot exceed 100 characters",
            ));
        }
        Ok(Self(value.trim().to_string()))
    }
}

string_scalar!(DisplayName);

/// Avatar image location: empty (no avatar), an absolute URL, or a relative
/// path starting with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AvatarUrl(String);

impl AvatarUrl {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Ok(Self::empty());
        }
        let absolute = value
            .split_once("://")
            .is_some_and(|(scheme, rest)| !scheme.is_empty() && !rest.is_empty());
        if !absolute && !value.starts_with('/') {
            return Err(ValidationError::new("invalid avatar URL format"));
        }
        Ok(Self(value))
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

string_scalar!(AvatarUrl);

/// Free-form biography, at most 1000 characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Biography(String);

impl Biography {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.chars().count() > 1000 {
            return Err(ValidationError::new(
                "biography cannot exceed 1000 characters",
            ));
        }
        Ok(Self(value))
    }
}

string_scalar!(Biography);

/// Job title, at most 100 characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobTitle(String);

impl JobTitle {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.chars().count() > 100 {
            return Err(ValidationError::new(
                "job title cannot exceed 100 characters",
            ));
        }
        Ok(Self(value.trim().to_string()))
    }
}

string_scalar!(JobTitle);

/// Department name, at most 100 characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Department(String);

impl Department {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.chars().count() > 100 {
            return Err(ValidationError::new(
                "department cannot exceed 100 characters",
            ));
        }
        Ok(Self(value.trim().to_string()))
    }
}

string_scalar!(Department);

/// Location, at most 200 characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location(String);

impl Location {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.chars().count() > 200 {
            return Err(ValidationError::new(
                "location cannot exceed 200 characters",
            ));
        }
        Ok(Self(value.trim().to_string()))
    }
}

string_scalar!(Location);
