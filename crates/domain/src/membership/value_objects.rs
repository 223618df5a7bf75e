//! Validated scalars for the membership record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A member's role inside a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberRole {
    /// Manages every aspect of the tenant, members included.
    #[serde(rename = "TENANT_ADMIN")]
    Admin,
    /// Manages most aspects of the tenant except critical settings.
    #[serde(rename = "TENANT_MANAGER")]
    Manager,
    /// Regular member.
    #[serde(rename = "TENANT_USER")]
    Member,
    /// Cross-tenant operator role.
    #[serde(rename = "SYSTEM_ADMIN")]
    SystemAdmin,
}

impl MemberRole {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TENANT_ADMIN" => Ok(MemberRole::Admin),
            "TENANT_MANAGER" => Ok(MemberRole::Manager),
            "TENANT_USER" => Ok(MemberRole::Member),
            "SYSTEM_ADMIN" => Ok(MemberRole::SystemAdmin),
            other => Err(ValidationError::new(format!("unknown member role: {other}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "TENANT_ADMIN",
            MemberRole::Manager => "TENANT_MANAGER",
            MemberRole::Member => "TENANT_USER",
            MemberRole::SystemAdmin => "SYSTEM_ADMIN",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_and_serialize_by_wire_name() {
        assert_eq!(MemberRole::parse("tenant_admin").unwrap(), MemberRole::Admin);
        assert!(MemberRole::parse("OVERLORD").is_err());
        assert_eq!(
            serde_json::to_string(&MemberRole::Manager).unwrap(),
            r#""TENANT_MANAGER""#
        );
    }
}
