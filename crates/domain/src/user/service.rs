//! Command handlers for the user record.

use chrono::{DateTime, Utc};
use common::AggregateId;
use event_store::EventStore;
use publisher::EventPublisher;

use crate::error::DomainError;
use crate::repository::EventSourcedRepository;

use super::aggregate::User;

/// Command to create a user inside a tenant.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub tenant_id: AggregateId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// One updatable user field.
#[derive(Debug, Clone)]
pub enum UserFieldUpdate {
    Name(String),
    Email(String),
    Phone(String),
}

/// User command handler.
pub struct UserService<S, P>
where
    S: EventStore,
    P: EventPublisher,
{
    repository: EventSourcedRepository<S, P, User>,
}

impl<S, P> UserService<S, P>
where
    S: EventStore,
    P: EventPublisher,
{
    pub fn new(store: S, publisher: P) -> Self {
        Self {
            repository: EventSourcedRepository::new(store, publisher),
        }
    }

    #[tracing::instrument(skip_all, fields(tenant = %command.tenant_id))]
    pub async fn create(&self, command: CreateUser) -> Result<User, DomainError> {
        let user = User::create(
            command.tenant_id,
            command.name,
            command.email,
            command.phone,
        )?;
        self.repository.save(user).await
    }

    #[tracing::instrument(skip_all, fields(user = %id))]
    pub async fn update(
        &self,
        id: AggregateId,
        update: UserFieldUpdate,
    ) -> Result<User, DomainError> {
        let user = self.repository.get(id).await?;
        let changed = match update {
            UserFieldUpdate::Name(name) => user.change_name(name)?,
            UserFieldUpdate::Email(email) => user.change_email(email)?,
            UserFieldUpdate::Phone(phone) => user.change_phone(phone)?,
        };
        self.repository.save(changed).await
    }

    #[tracing::instrument(skip_all, fields(user = %id))]
    pub async fn deactivate(&self, id: AggregateId) -> Result<User, DomainError> {
        let user = self.repository.get(id).await?;
        self.repository.save(user.deactivate()?).await
    }

    pub async fn get(&self, id: AggregateId) -> Result<User, DomainError> {
        self.repository.get(id).await
    }

    /// The user as they were at a past instant.
    pub async fn get_at(&self, id: AggregateId, at: DateTime<Utc>) -> Result<User, DomainError> {
        self.repository.get_at(id, at).await
    }
}
