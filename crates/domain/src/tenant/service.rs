//! Command handlers for the tenant record.

use chrono::{DateTime, Utc};
use common::AggregateId;
use event_store::EventStore;
use publisher::EventPublisher;

use crate::error::DomainError;
use crate::repository::EventSourcedRepository;

use super::aggregate::Tenant;
use super::value_objects::{SubscriptionPlan, TenantKind, TenantStatus};

/// Command to create a tenant. `plan` is a tier name; free when omitted.
#[derive(Debug, Clone)]
pub struct CreateTenant {
    pub name: String,
    pub kind: TenantKind,
    pub description: String,
    pub plan: Option<String>,
}

/// One updatable tenant field.
///
/// Each variant maps to exactly one mutation on the record; there is no
/// dynamic field dispatch, so an unsupported field cannot be requested.
#[derive(Debug, Clone)]
pub enum TenantFieldUpdate {
    Name(String),
    Description(String),
    Status(TenantStatus),
    Subscription(String),
}

/// Tenant command handler: loads, mutates, persists.
pub struct TenantService<S, P>
where
    S: EventStore,
    P: EventPublisher,
{
    repository: EventSourcedRepository<S, P, Tenant>,
}

impl<S, P> TenantService<S, P>
where
    S: EventStore,
    P: EventPublisher,
{
    pub fn new(store: S, publisher: P) -> Self {
        Self {
            repository: EventSourcedRepository::new(store, publisher),
        }
    }

    #[tracing::instrument(skip_all, fields(name = %command.name))]
    pub async fn create(&self, command: CreateTenant) -> Result<Tenant, DomainError> {
        let plan = command
            .plan
            .as_deref()
            .map(SubscriptionPlan::parse)
            .transpose()?;
        let tenant = Tenant::create(command.name, command.kind, command.description, plan)?;
        self.repository.save(tenant).await
    }

    #[tracing::instrument(skip_all, fields(tenant = %id))]
    pub async fn update(
        &self,
        id: AggregateId,
        update: TenantFieldUpdate,
    ) -> Result<Tenant, DomainError> {
        let tenant = self.repository.get(id).await?;
        let changed = match update {
            TenantFieldUpdate::Name(name) => tenant.rename(name)?,
            TenantFieldUpdate::Description(description) => {
                tenant.change_description(description)?
            }
            TenantFieldUpdate::Status(TenantStatus::Active) => tenant.activate()?,
            TenantFieldUpdate::Status(TenantStatus::Inactive) => tenant.deactivate()?,
            TenantFieldUpdate::Subscription(plan) => {
                tenant.change_subscription(SubscriptionPlan::parse(&plan)?)?
            }
        };
        self.repository.save(changed).await
    }

    pub async fn get(&self, id: AggregateId) -> Result<Tenant, DomainError> {
        self.repository.get(id).await
    }

    /// The tenant as it was at a past instant.
    pub async fn get_at(&self, id: AggregateId, at: DateTime<Utc>) -> Result<Tenant, DomainError> {
        self.repository.get_at(id, at).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregate;
    use event_store::{InMemoryEventStore, Version};
    use publisher::InMemoryPublisher;

    fn service() -> (TenantService<InMemoryEventStore, InMemoryPublisher>, InMemoryPublisher) {
        let publisher = InMemoryPublisher::new();
        (
            TenantService::new(InMemoryEventStore::new(), publisher.clone()),
            publisher,
        )
    }

    fn create_acme() -> CreateTenant {
        CreateTenant {
            name: "Acme".to_string(),
            kind: TenantKind::Organization,
            description: "widgets".to_string(),
            plan: Some("BASIC".to_string()),
        }
    }

    #[tokio::test]
    async fn create_persists_and_forwards() {
        let (service, publisher) = service();
        let tenant = service.create(create_acme()).await.unwrap();

        assert_eq!(tenant.version(), Version::first());
        assert!(tenant.uncommitted().is_empty());
        let messages = publisher.messages_for("tenant-events").await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].envelope.event_type, "tenant.created");
        assert_eq!(messages[0].key, tenant.id().unwrap().to_string());
    }

    #[tokio::test]
    async fn create_rejects_unknown_plan() {
        let (service, _) = service();
        let result = service
            .create(CreateTenant {
                plan: Some("PLATINUM".to_string()),
                ..create_acme()
            })
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn update_loads_mutates_and_persists() {
        let (service, _) = service();
        let tenant = service.create(create_acme()).await.unwrap();
        let id = tenant.id().unwrap();

        let renamed = service
            .update(id, TenantFieldUpdate::Name("Globex".to_string()))
            .await
            .unwrap();
        assert_eq!(renamed.name().unwrap().as_str(), "Globex");
        assert_eq!(renamed.version(), Version::new(2));

        let reloaded = service.get(id).await.unwrap();
        assert_eq!(reloaded.name().unwrap().as_str(), "Globex");
    }

    #[tokio::test]
    async fn no_op_update_appends_nothing() {
        let (service, publisher) = service();
        let tenant = service.create(create_acme()).await.unwrap();
        let id = tenant.id().unwrap();

        let result = service
            .update(id, TenantFieldUpdate::Name("Acme".to_string()))
            .await;
        assert!(matches!(result, Err(DomainError::Invariant(_))));
        assert_eq!(publisher.message_count().await, 1);
        assert_eq!(service.get(id).await.unwrap().version(), Version::first());
    }

    #[tokio::test]
    async fn update_of_missing_tenant_is_not_found() {
        let (service, _) = service();
        let result = service
            .update(
                AggregateId::new(),
                TenantFieldUpdate::Description("x".to_string()),
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
