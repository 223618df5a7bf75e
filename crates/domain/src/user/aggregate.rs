//! User state machine.

use chrono::{DateTime, Utc};
use common::{AggregateId, AggregateKind};
use event_store::Version;

use crate::aggregate::Aggregate;
use crate::error::{DomainError, ValidationError};

use super::events::UserEvent;
use super::value_objects::{Email, PhoneNumber, UserStatus};

/// A user account inside a tenant.
///
/// Deactivation is terminal: there is no fact that reactivates a user.
#[derive(Debug, Clone, Default)]
pub struct User {
    id: Option<AggregateId>,
    version: Version,
    tenant_id: Option<AggregateId>,
    status: UserStatus,
    name: String,
    email: Option<Email>,
    phone: Option<PhoneNumber>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    pending: Vec<UserEvent>,
}

impl User {
    /// Creates a new activated user with a fresh identity.
    pub fn create(
        tenant_id: AggregateId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = parse_name(name)?;
        let email = Email::parse(email)?;
        let phone = PhoneNumber::parse(phone)?;
        let event = UserEvent::created(AggregateId::new(), tenant_id, name, email, phone);
        Ok(Self::default().record(event))
    }

    pub fn change_name(&self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.ensure_created()?;
        let name = parse_name(name)?;
        if self.name == name {
            return Err(DomainError::no_change("name"));
        }
        Ok(self.record(UserEvent::name_changed(name)))
    }

    pub fn change_email(&self, email: impl Into<String>) -> Result<Self, DomainError> {
        self.ensure_created()?;
        let email = Email::parse(email)?;
        if self.email.as_ref() == Some(&email) {
            return Err(DomainError::no_change("email"));
        }
        Ok(self.record(UserEvent::email_changed(email)))
    }

    pub fn change_phone(&self, phone: impl Into<String>) -> Result<Self, DomainError> {
        self.ensure_created()?;
        let phone = PhoneNumber::parse(phone)?;
        if self.phone.as_ref() == Some(&phone) {
            return Err(DomainError::no_change("phone number"));
        }
        Ok(self.record(UserEvent::phone_changed(phone)))
    }

    pub fn deactivate(&self) -> Result<Self, DomainError> {
        self.ensure_created()?;
        if self.status == UserStatus::Deactivated {
            return Err(DomainError::Invariant(
                "user is already deactivated".to_string(),
            ));
        }
        Ok(self.record(UserEvent::deactivated()))
    }

    pub fn tenant_id(&self) -> Option<AggregateId> {
        self.tenant_id
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Activated
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

    fn record(&self, event: UserEvent) -> Self {
        let mut next = self.clone();
        next.apply(&event);
        next.pending.push(event);
        next
    }
}

fn parse_name(name: impl Into<String>) -> Result<String, ValidationError> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(ValidationError::new("user name cannot be empty"));
    }
    Ok(name)
}

impl Aggregate for User {
    type Event = UserEvent;

    fn kind() -> AggregateKind {
        AggregateKind::User
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

    fn apply(&mut self, event: &UserEvent) {
        match event {
            UserEvent::Created {
                id,
                tenant_id,
                status,
                name,
                email,
                phone,
                occurred_at,
            } => {
                self.id = Some(*id);
                self.tenant_id = Some(*tenant_id);
                self.status = *status;
                self.name = name.clone();
                self.email = Some(email.clone());
                self.phone = Some(phone.clone());
                self.created_at = Some(*occurred_at);
                self.updated_at = Some(*occurred_at);
            }
            UserEvent::NameChanged { name, occurred_at } => {
                self.name = name.clone();
                self.updated_at = Some(*occurred_at);
            }
            UserEvent::EmailChanged { email, occurred_at } => {
                self.email = Some(email.clone());
                self.updated_at = Some(*occurred_at);
            }
            UserEvent::PhoneChanged { phone, occurred_at } => {
                self.phone = Some(phone.clone());
                self.updated_at = Some(*occurred_at);
            }
            UserEvent::Deactivated { occurred_at } => {
                self.status = UserStatus::Deactivated;
                self.updated_at = Some(*occurred_at);
            }
        }
    }

    fn uncommitted(&self) -> &[UserEvent] {
        &self.pending
    }

    fn clear_uncommitted(&mut self) {
        self.pending.clear();
    }
}
