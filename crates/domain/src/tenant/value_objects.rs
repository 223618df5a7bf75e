//! Validated scalars for the tenant record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Tenant display name. Non-blank, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantName(String);

impl TenantName {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::new("tenant name cannot be empty"));
        }
        if value.chars().count() > 100 {
            return Err(ValidationError::new(
                "tenant name cannot exceed 100 characters",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TenantName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TenantName> for String {
    fn from(name: TenantName) -> Self {
        name.0
    }
}

impl fmt::Display for TenantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a tenant is a personal workspace or an organization.
///
/// Personal tenants hold exactly one member, who is always an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantKind {
    Person,
    Organization,
}

impl fmt::Display for TenantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenantKind::Person => f.write_str("PERSON"),
            TenantKind::Organization => f.write_str("ORGANIZATION"),
        }
    }
}

/// Tenant lifecycle status. New tenants start active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantStatus {
    Active,
    #[default]
    Inactive,
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenantStatus::Active => f.write_str("ACTIVE"),
            TenantStatus::Inactive => f.write_str("INACTIVE"),
        }
    }
}

/// Subscription tiers, ordered by capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanTier {
    Free,
    Basic,
    Professional,
    Enterprise,
}

/// A tenant's subscription plan.
///
/// The plan caps how many active members the tenant may hold and gates
/// feature flags. Serialized as the bare tier name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubscriptionPlan {
    tier: PlanTier,
}

impl SubscriptionPlan {
    pub fn new(tier: PlanTier) -> Self {
        Self { tier }
    }

    pub fn free() -> Self {
        Self::new(PlanTier::Free)
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FREE" => Ok(Self::new(PlanTier::Free)),
            "BASIC" => Ok(Self::new(PlanTier::Basic)),
            "PROFESSIONAL" => Ok(Self::new(PlanTier::Professional)),
            "ENTERPRISE" => Ok(Self::new(PlanTier::Enterprise)),
            other => Err(ValidationError::new(format!(
                "unknown subscription plan: {other}"
            ))),
        }
    }

    pub fn tier(&self) -> PlanTier {
        self.tier
    }

    /// Maximum number of active members under this plan.
    pub fn max_members(&self) -> usize {
        match self.tier {
            PlanTier::Free => 3,
            PlanTier::Basic => 10,
            PlanTier::Professional => 50,
            PlanTier::Enterprise => 1000,
        }
    }

    pub fn has_advanced_features(&self) -> bool {
        matches!(self.tier, PlanTier::Professional | PlanTier::Enterprise)
    }

    pub fn has_priority_support(&self) -> bool {
        matches!(self.tier, PlanTier::Enterprise)
    }
}

impl Default for SubscriptionPlan {
    fn default() -> Self {
        Self::free()
    }
}

impl TryFrom<String> for SubscriptionPlan {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SubscriptionPlan> for String {
    fn from(plan: SubscriptionPlan) -> Self {
        plan.to_string()
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tier {
            PlanTier::Free => f.write_str("FREE"),
            PlanTier::Basic => f.write_str("BASIC"),
            PlanTier::Professional => f.write_str("PROFESSIONAL"),
            PlanTier::Enterprise => f.write_str("ENTERPRISE"),
        }
    }
}
