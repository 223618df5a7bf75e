//! Command handlers for the profile record.

use chrono::{DateTime, Utc};
use common::AggregateId;
use event_store::EventStore;
use publisher::EventPublisher;

use crate::error::DomainError;
use crate::repository::EventSourcedRepository;

use super::aggregate::UserProfile;

/// Command to create a profile for an existing user.
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub user_id: AggregateId,
    pub tenant_id: AggregateId,
    pub display_name: String,
}

/// One updatable profile field. Job title and department travel together.
#[derive(Debug, Clone)]
pub enum ProfileFieldUpdate {
    DisplayName(String),
    Avatar(String),
    Biography(String),
    JobInfo { title: String, department: String },
    Location(String),
}

/// Profile command handler.
pub struct ProfileService<S, P>
where
    S: EventStore,
    P: EventPublisher,
{
    repository: EventSourcedRepository<S, P, UserProfile>,
}

impl<S, P> ProfileService<S, P>
where
    S: EventStore,
    P: EventPublisher,
{
    pub fn new(store: S, publisher: P) -> Self {
        Self {
            repository: EventSourcedRepository::new(store, publisher),
        }
    }

    #[tracing::instrument(skip_all, fields(user = %command.user_id))]
    pub async fn create(&self, command: CreateProfile) -> Result<UserProfile, DomainError> {
        let profile =
            UserProfile::create(command.user_id, command.tenant_id, command.display_name)?;
        self.repository.save(profile).await
    }

    #[tracing::instrument(skip_all, fields(user = %user_id))]
    pub async fn update(
        &self,
        user_id: AggregateId,
        update: ProfileFieldUpdate,
    ) -> Result<UserProfile, DomainError> {
        let profile = self.repository.get(user_id).await?;
        let changed = match update {
            ProfileFieldUpdate::DisplayName(name) => profile.change_display_name(name)?,
            ProfileFieldUpdate::Avatar(avatar) => profile.change_avatar(avatar)?,
            ProfileFieldUpdate::Biography(biography) => profile.change_biography(biography)?,
            ProfileFieldUpdate::JobInfo { title, department } => {
                profile.change_job_info(title, department)?
            }
            ProfileFieldUpdate::Location(location) => profile.change_location(location)?,
        };
        self.repository.save(changed).await
    }

    /// The profile keyed by the user's identity.
    pub async fn get(&self, user_id: AggregateId) -> Result<UserProfile, DomainError> {
        self.repository.get(user_id).await
    }

    /// The profile as it was at a past instant.
    pub async fn get_at(
        &self,
        user_id: AggregateId,
        at: DateTime<Utc>,
    ) -> Result<UserProfile, DomainError> {
        self.repository.get_at(user_id, at).await
    }
}
