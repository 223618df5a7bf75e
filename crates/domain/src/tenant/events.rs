//! Facts produced by the tenant record.

use chrono::{DateTime, Duration, Utc};
use common::AggregateId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::value_objects::{SubscriptionPlan, TenantKind, TenantName, TenantStatus};

/// Length of one subscription period.
pub(crate) const SUBSCRIPTION_PERIOD_DAYS: i64 = 365;

/// The closed set of tenant facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TenantEvent {
    #[serde(rename = "tenant.created")]
    Created {
        id: AggregateId,
        name: TenantName,
        status: TenantStatus,
        kind: TenantKind,
        description: String,
        plan: SubscriptionPlan,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "tenant.name.changed")]
    NameChanged {
        name: TenantName,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "tenant.description.changed")]
    DescriptionChanged {
        description: String,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "tenant.status.changed")]
    StatusChanged {
        status: TenantStatus,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "tenant.subscription.changed")]
    SubscriptionChanged {
        plan: SubscriptionPlan,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        occurred_at: DateTime<Utc>,
    },
}

impl TenantEvent {
    pub fn created(
        id: AggregateId,
        name: TenantName,
        kind: TenantKind,
        description: String,
        plan: SubscriptionPlan,
    ) -> Self {
        TenantEvent::Created {
            id,
            name,
            status: TenantStatus::Active,
            kind,
            description,
            plan,
            occurred_at: Utc::now(),
        }
    }

    pub fn name_changed(name: TenantName) -> Self {
        TenantEvent::NameChanged {
            name,
            occurred_at: Utc::now(),
        }
    }

    pub fn description_changed(description: String) -> Self {
        TenantEvent::DescriptionChanged {
            description,
            occurred_at: Utc::now(),
        }
    }

    pub fn status_changed(status: TenantStatus) -> Self {
        TenantEvent::StatusChanged {
            status,
            occurred_at: Utc::now(),
        }
    }

    pub fn subscription_changed(plan: SubscriptionPlan, ends_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        TenantEvent::SubscriptionChanged {
            plan,
            starts_at: now,
            ends_at,
            occurred_at: now,
        }
    }
}

impl DomainEvent for TenantEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TenantEvent::Created { .. } => "tenant.created",
            TenantEvent::NameChanged { .. } => "tenant.name.changed",
            TenantEvent::DescriptionChanged { .. } => "tenant.description.changed",
            TenantEvent::StatusChanged { .. } => "tenant.status.changed",
            TenantEvent::SubscriptionChanged { .. } => "tenant.subscription.changed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            TenantEvent::Created { occurred_at, .. }
            | TenantEvent::NameChanged { occurred_at, .. }
            | TenantEvent::DescriptionChanged { occurred_at, .. }
            | TenantEvent::StatusChanged { occurred_at, .. }
            | TenantEvent::SubscriptionChanged { occurred_at, .. } => *occurred_at,
        }
    }
}

pub(crate) fn subscription_period_from(start: DateTime<Utc>) -> DateTime<Utc> {
    start + Duration::days(SUBSCRIPTION_PERIOD_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_use_dotted_past_tense_names() {
        let event = TenantEvent::name_changed(TenantName::parse("Acme").unwrap());
        assert_eq!(event.event_type(), "tenant.name.changed");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"tenant.name.changed""#));
    }

    #[test]
    fn created_fact_starts_active() {
        let event = TenantEvent::created(
            AggregateId::new(),
            TenantName::parse("Acme").unwrap(),
            TenantKind::Organization,
            String::new(),
            SubscriptionPlan::free(),
        );
        match event {
            TenantEvent::Created { status, .. } => assert_eq!(status, TenantStatus::Active),
            other => panic!("unexpected fact: {other:?}"),
        }
    }
}
