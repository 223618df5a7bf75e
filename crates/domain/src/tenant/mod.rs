//! Tenant record: a billing/organizational boundary owning users.

mod aggregate;
mod events;
mod service;
mod value_objects;

pub use aggregate::Tenant;
pub use events::TenantEvent;
pub use service::{CreateTenant, TenantFieldUpdate, TenantService};
pub use value_objects::{PlanTier, SubscriptionPlan, TenantKind, TenantName, TenantStatus};
