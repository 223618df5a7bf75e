//! Facts produced by the user record.

use chrono::{DateTime, Utc};
use common::AggregateId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::value_objects::{Email, PhoneNumber, UserStatus};

/// The closed set of user facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserEvent {
    #[serde(rename = "user.created")]
    Created {
        id: AggregateId,
        tenant_id: AggregateId,
        status: UserStatus,
        name: String,
        email: Email,
        phone: PhoneNumber,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "user.name.changed")]
    NameChanged {
        name: String,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "user.email.changed")]
    EmailChanged {
        email: Email,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "user.phone.changed")]
    PhoneChanged {
        phone: PhoneNumber,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "user.deactivated")]
    Deactivated { occurred_at: DateTime<Utc> },
}

impl UserEvent {
    pub fn created(
        id: AggregateId,
        tenant_id: AggregateId,
        name: String,
        email: Email,
        phone: PhoneNumber,
    ) -> Self {
        UserEvent::Created {
            id,
            tenant_id,
            status: UserStatus::Activated,
            name,
            email,
            phone,
            occurred_at: Utc::now(),
        }
    }

    pub fn name_changed(name: String) -> Self {
        UserEvent::NameChanged {
            name,
            occurred_at: Utc::now(),
        }
    }

    pub fn email_changed(email: Email) -> Self {
        UserEvent::EmailChanged {
            email,
            occurred_at: Utc::now(),
        }
    }

    pub fn phone_changed(phone: PhoneNumber) -> Self {
        UserEvent::PhoneChanged {
            phone,
            occurred_at: Utc::now(),
        }
    }

    pub fn deactivated() -> Self {
        UserEvent::Deactivated {
            occurred_at: Utc::now(),
        }
    }
}

impl DomainEvent for UserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            UserEvent::Created { .. } => "user.created",
            UserEvent::NameChanged { .. } => "user.name.changed",
            UserEvent::EmailChanged { .. } => "user.email.changed",
            UserEvent::PhoneChanged { .. } => "user.phone.changed",
            UserEvent::Deactivated { .. } => "user.deactivated",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            UserEvent::Created { occurred_at, .. }
            | UserEvent::NameChanged { occurred_at, .. }
            | UserEvent::EmailChanged { occurred_at, .. }
            | UserEvent::PhoneChanged { occurred_at, .. }
            | UserEvent::Deactivated { occurred_at } => *occurred_at,
        }
    }
}
