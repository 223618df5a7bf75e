//! Facts produced by the membership record.

use chrono::{DateTime, Utc};
use common::AggregateId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::value_objects::MemberRole;

/// The closed set of membership facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MembershipEvent {
    #[serde(rename = "member.added")]
    Added {
        id: AggregateId,
        tenant_id: AggregateId,
        user_id: AggregateId,
        role: MemberRole,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "member.role.changed")]
    RoleChanged {
        role: MemberRole,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "member.deactivated")]
    Deactivated { occurred_at: DateTime<Utc> },
}

impl MembershipEvent {
    pub fn added(tenant_id: AggregateId, user_id: AggregateId, role: MemberRole) -> Self {
        MembershipEvent::Added {
            id: AggregateId::new(),
            tenant_id,
            user_id,
            role,
            occurred_at: Utc::now(),
        }
    }

    pub fn role_changed(role: MemberRole) -> Self {
        MembershipEvent::RoleChanged {
            role,
            occurred_at: Utc::now(),
        }
    }

    pub fn deactivated() -> Self {
        MembershipEvent::Deactivated {
            occurred_at: Utc::now(),
        }
    }
}

impl DomainEvent for MembershipEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MembershipEvent::Added { .. } => "member.added",
            MembershipEvent::RoleChanged { .. } => "member.role.changed",
            MembershipEvent::Deactivated { .. } => "member.deactivated",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            MembershipEvent::Added { occurred_at, .. }
            | MembershipEvent::RoleChanged { occurred_at, .. }
            | MembershipEvent::Deactivated { occurred_at } => *occurred_at,
        }
    }
}
