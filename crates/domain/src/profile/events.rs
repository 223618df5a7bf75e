//! Facts produced by the profile record.

use chrono::{DateTime, Utc};
use common::AggregateId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::value_objects::{AvatarUrl, Biography, Department, DisplayName, JobTitle, Location};

/// The closed set of profile facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProfileEvent {
    #[serde(rename = "profile.created")]
    Created {
        id: AggregateId,
        user_id: AggregateId,
        tenant_id: AggregateId,
        display_name: DisplayName,
        avatar: AvatarUrl,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "profile.display-name.changed")]
    DisplayNameChanged {
        display_name: DisplayName,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "profile.avatar.changed")]
    AvatarChanged {
        avatar: AvatarUrl,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "profile.biography.changed")]
    BiographyChanged {
        biography: Biography,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "profile.job-info.changed")]
    JobInfoChanged {
        job_title: JobTitle,
        department: Department,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename = "profile.location.changed")]
    LocationChanged {
        location: Location,
        occurred_at: DateTime<Utc>,
    },
}

impl ProfileEvent {
    pub fn created(user_id: AggregateId, tenant_id: AggregateId, display_name: DisplayName) -> Self {
        ProfileEvent::Created {
            id: user_id,
            user_id,
            tenant_id,
            display_name,
            avatar: AvatarUrl::empty(),
            occurred_at: Utc::now(),
        }
    }

    pub fn display_name_changed(display_name: DisplayName) -> Self {
        ProfileEvent::DisplayNameChanged {
            display_name,
            occurred_at: Utc::now(),
        }
    }

    pub fn avatar_changed(avatar: AvatarUrl) -> Self {
        ProfileEvent::AvatarChanged {
            avatar,
            occurred_at: Utc::now(),
        }
    }

    pub fn biography_changed(biography: Biography) -> Self {
        ProfileEvent::BiographyChanged {
            biography,
            occurred_at: Utc::now(),
        }
    }

    pub fn job_info_changed(job_title: JobTitle, department: Department) -> Self {
        ProfileEvent::JobInfoChanged {
            job_title,
            department,
            occurred_at: Utc::now(),
        }
    }

    pub fn location_changed(location: Location) -> Self {
        ProfileEvent::LocationChanged {
            location,
            occurred_at: Utc::now(),
        }
    }
}

impl DomainEvent for ProfileEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProfileEvent::Created { .. } => "profile.created",
            ProfileEvent::DisplayNameChanged { .. } => "profile.display-name.changed",
            ProfileEvent::AvatarChanged { .. } => "profile.avatar.changed",
            ProfileEvent::BiographyChanged { .. } => "profile.biography.changed",
            ProfileEvent::JobInfoChanged { .. } => "profile.job-info.changed",
            ProfileEvent::LocationChanged { .. } => "profile.location.changed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProfileEvent::Created { occurred_at, .. }
            | ProfileEvent::DisplayNameChanged { occurred_at, .. }
            | ProfileEvent::AvatarChanged { occurred_at, .. }
            | ProfileEvent::BiographyChanged { occurred_at, .. }
            | ProfileEvent::JobInfoChanged { occurred_at, .. }
            | ProfileEvent::LocationChanged { occurred_at, .. } => *occurred_at,
        }
    }
}
