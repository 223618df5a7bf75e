//! Tenant state machine.

use chrono::{DateTime, Utc};
use common::{AggregateId, AggregateKind};
use event_store::Version;

use crate::aggregate::Aggregate;
use crate::error::DomainError;

use super::events::{TenantEvent, subscription_period_from};
use super::value_objects::{SubscriptionPlan, TenantKind, TenantName, TenantStatus};

/// A tenant: the billing and organizational boundary that owns users.
///
/// The `Default` value is the empty fold seed. Mutations take `&self` and
/// return a new value with the fact applied and buffered; the receiver is
/// never changed, so a failed command leaves nothing to roll back.
#[derive(Debug, Clone, Default)]
pub struct Tenant {
    id: Option<AggregateId>,
    version: Version,
    name: Option<TenantName>,
    kind: Option<TenantKind>,
    status: TenantStatus,
    description: String,
    plan: SubscriptionPlan,
    subscription_starts_at: Option<DateTime<Utc>>,
    subscription_ends_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    pending: Vec<TenantEvent>,
}

impl Tenant {
    /// Creates a new tenant with a fresh identity.
    ///
    /// The tenant starts active, on the given plan (free when omitted), with
    /// a full subscription period ahead of it.
    pub fn create(
        name: impl Into<String>,
        kind: TenantKind,
        description: impl Into<String>,
        plan: Option<SubscriptionPlan>,
    ) -> Result<Self, DomainError> {
        let name = TenantName::parse(name)?;
        let event = TenantEvent::created(
            AggregateId::new(),
            name,
            kind,
            description.into(),
            plan.unwrap_or_default(),
        );
        Ok(Self::default().record(event))
    }

    pub fn rename(&self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.ensure_created()?;
        let name = TenantName::parse(name)?;
        if self.name.as_ref() == Some(&name) {
            return Err(DomainError::no_change("name"));
        }
        Ok(self.record(TenantEvent::name_changed(name)))
    }

    pub fn change_description(&self, description: impl Into<String>) -> Result<Self, DomainError> {
        self.ensure_created()?;
        let description = description.into();
        if self.description == description {
            return Err(DomainError::no_change("description"));
        }
        Ok(self.record(TenantEvent::description_changed(description)))
    }

    pub fn activate(&self) -> Result<Self, DomainError> {
        self.change_status(TenantStatus::Active)
    }

    pub fn deactivate(&self) -> Result<Self, DomainError> {
        self.change_status(TenantStatus::Inactive)
    }

    fn change_status(&self, status: TenantStatus) -> Result<Self, DomainError> {
        self.ensure_created()?;
        if self.status == status {
            return Err(DomainError::no_change("status"));
        }
        Ok(self.record(TenantEvent::status_changed(status)))
    }

    /// Switches the subscription plan.
    ///
    /// An unexpired period is kept; an expired one restarts from now. Asking
    /// for the current plan while the period is still running changes nothing
    /// and is rejected.
    pub fn change_subscription(&self, plan: SubscriptionPlan) -> Result<Self, DomainError> {
        self.ensure_created()?;
        let now = Utc::now();
        let running = self.subscription_ends_at.is_some_and(|ends| now < ends);
        if self.plan == plan && running {
            return Err(DomainError::no_change("subscription plan"));
        }
        let ends_at = match self.subscription_ends_at {
            Some(ends) if now < ends => ends,
            _ => subscription_period_from(now),
        };
        Ok(self.record(TenantEvent::subscription_changed(plan, ends_at)))
    }

    pub fn name(&self) -> Option<&TenantName> {
        self.name.as_ref()
    }

    pub fn tenant_kind(&self) -> Option<TenantKind> {
        self.kind
    }

    pub fn status(&self) -> TenantStatus {
        self.status
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn plan(&self) -> SubscriptionPlan {
        self.plan
    }

    pub fn subscription_ends_at(&self) -> Option<DateTime<Utc>> {
        self.subscription_ends_at
    }

    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }

    /// True for single-member personal workspaces.
    pub fn is_person(&self) -> bool {
        self.kind == Some(TenantKind::Person)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn ensure_created(&self) -> Result<(), DomainError> {
        if self.id.is_none() {
            return Err(DomainError::NotYetCreated);
        }
        Ok(())
    }

    fn record(&self, event: TenantEvent) -> Self {
        let mut next = self.clone();
        next.apply(&event);
        next.pending.push(event);
        next
    }
}

impl Aggregate for Tenant {
    type Event = TenantEvent;

    fn kind() -> AggregateKind {
        AggregateKind::Tenant
    }

    fn id(&self) -> Option<AggregateId> {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: &TenantEvent) {
        match event {
            TenantEvent::Created {
                id,
                name,
                status,
                kind,
                description,
                plan,
                occurred_at,
            } => {
                self.id = Some(*id);
                self.name = Some(name.clone());
                self.status = *status;
                self.kind = Some(*kind);
                self.description = description.clone();
                self.plan = *plan;
                self.subscription_starts_at = Some(*occurred_at);
                self.subscription_ends_at = Some(subscription_period_from(*occurred_at));
                self.created_at = Some(*occurred_at);
                self.updated_at = Some(*occurred_at);
            }
            TenantEvent::NameChanged { name, occurred_at } => {
                self.name = Some(name.clone());
                self.updated_at = Some(*occurred_at);
            }
            TenantEvent::DescriptionChanged {
                description,
                occurred_at,
            } => {
                self.description = description.clone();
                self.updated_at = Some(*occurred_at);
            }
            TenantEvent::StatusChanged {
                status,
                occurred_at,
            } => {
                self.status = *status;
                self.updated_at = Some(*occurred_at);
            }
            TenantEvent::SubscriptionChanged {
                plan,
                starts_at,
                ends_at,
                occurred_at,
            } => {
                self.plan = *plan;
                self.subscription_starts_at = Some(*starts_at);
                self.subscription_ends_at = Some(*ends_at);
                self.updated_at = Some(*occurred_at);
            }
        }
    }

    fn uncommitted(&self) -> &[TenantEvent] {
        &self.pending
    }

    fn clear_uncommitted(&mut self) {
        self.pending.clear();
    }
}
