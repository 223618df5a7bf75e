//! Profile state machine.

use chrono::{DateTime, Utc};
use common::{AggregateId, AggregateKind};
use event_store::Version;

use crate::aggregate::Aggregate;
use crate::error::DomainError;

use super::events::ProfileEvent;
use super::value_objects::{AvatarUrl, Biography, Department, DisplayName, JobTitle, Location};

/// Presentation and directory data for one user.
///
/// The profile's stream identity equals the user's, so loading a profile
/// needs nothing but the user id. Profiles have no deactivation: they live
/// as long as their stream does.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    id: Option<AggregateId>,
    version: Version,
    user_id: Option<AggregateId>,
    tenant_id: Option<AggregateId>,
    display_name: Option<DisplayName>,
    avatar: AvatarUrl,
    biography: Biography,
    job_title: JobTitle,
    department: Department,
    location: Location,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    pending: Vec<ProfileEvent>,
}

impl UserProfile {
    /// Creates a profile for a user, with an empty avatar.
    pub fn create(
        user_id: AggregateId,
        tenant_id: AggregateId,
        display_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let display_name = DisplayName::parse(display_name)?;
        let event = ProfileEvent::created(user_id, tenant_id, display_name);
        Ok(Self::default().record(event))
    }

    pub fn change_display_name(&self, display_name: impl Into<String>) -> Result<Self, DomainError> {
        self.ensure_created()?;
        let display_name = DisplayName::parse(display_name)?;
        if self.display_name.as_ref() == Some(&display_name) {
            return Err(DomainError::no_change("display name"));
        }
        Ok(self.record(ProfileEvent::display_name_changed(display_name)))
    }

    pub fn change_avatar(&self, avatar: impl Into<String>) -> Result<Self, DomainError> {
        self.ensure_created()?;
        let avatar = AvatarUrl::parse(avatar)?;
        if self.avatar == avatar {
            return Err(DomainError::no_change("avatar URL"));
        }
        Ok(self.record(ProfileEvent::avatar_changed(avatar)))
    }

    pub fn change_biography(&self, biography: impl Into<String>) -> Result<Self, DomainError> {
        self.ensure_created()?;
        let biography = Biography::parse(biography)?;
        if self.biography == biography {
            return Err(DomainError::no_change("biography"));
        }
        Ok(self.record(ProfileEvent::biography_changed(biography)))
    }

    /// Changes job title and department together.
    ///
    /// Rejected only when *both* values equal the current ones; changing
    /// either alone is a real change and produces one fact carrying both.
    pub fn change_job_info(
        &self,
        job_title: impl Into<String>,
        department: impl Into<String>,
    ) -> Result<Self, DomainError> {
        self.ensure_created()?;
        let job_title = JobTitle::parse(job_title)?;
        let department = Department::parse(department)?;
        if self.job_title == job_title && self.department == department {
            return Err(DomainError::no_change("job info"));
        }
        Ok(self.record(ProfileEvent::job_info_changed(job_title, department)))
    }

    pub fn change_location(&self, location: impl Into<String>) -> Result<Self, DomainError> {
        self.ensure_created()?;
        let location = Location::parse(location)?;
        if self.location == location {
            return Err(DomainError::no_change("location"));
        }
        Ok(self.record(ProfileEvent::location_changed(location)))
    }

    pub fn user_id(&self) -> Option<AggregateId> {
        self.user_id
    }

    pub fn tenant_id(&self) -> Option<AggregateId> {
        self.tenant_id
    }

    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    pub fn avatar(&self) -> &AvatarUrl {
        &self.avatar
    }

    pub fn biography(&self) -> &Biography {
        &self.biography
    }

    pub fn job_title(&self) -> &JobTitle {
        &self.job_title
    }

    pub fn department(&self) -> &Department {
        &self.department
    }

    pub fn location(&self) -> &Location {
        &self.location
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

    fn record(&self, event: ProfileEvent) -> Self {
        let mut next = self.clone();
        next.apply(&event);
        next.pending.push(event);
        next
    }
}

impl Aggregate for UserProfile {
    type Event = ProfileEvent;

    fn kind() -> AggregateKind {
        AggregateKind::UserProfile
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

    fn apply(&mut self, event: &ProfileEvent) {
        match event {
            ProfileEvent::Created {
                id,
                user_id,
                tenant_id,
                display_name,
                avatar,
                occurred_at,
            } => {
                self.id = Some(*id);
                self.user_id = Some(*user_id);
                self.tenant_id = Some(*tenant_id);
                self.display_name = Some(display_name.clone());
                self.avatar = avatar.clone();
                self.created_at = Some(*occurred_at);
                self.updated_at = Some(*occurred_at);
            }
            ProfileEvent::DisplayNameChanged {
                display_name,
                occurred_at,
            } => {
                self.display_name = Some(display_name.clone());
                self.updated_at = Some(*occurred_at);
            }
            ProfileEvent::AvatarChanged {
                avatar,
                occurred_at,
            } => {
                self.avatar = avatar.clone();
                self.updated_at = Some(*occurred_at);
            }
            ProfileEvent::BiographyChanged {
                biography,
                occurred_at,
            } => {
                self.biography = biography.clone();
                self.updated_at = Some(*occurred_at);
            }
            ProfileEvent::JobInfoChanged {
                job_title,
                department,
                occurred_at,
            } => {
                self.job_title = job_title.clone();
                self.department = department.clone();
                self.updated_at = Some(*occurred_at);
            }
            ProfileEvent::LocationChanged {
                location,
                occurred_at,
            } => {
                self.location = location.clone();
                self.updated_at = Some(*occurred_at);
            }
        }
    }

    fn uncommitted(&self) -> &[ProfileEvent] {
        &self.pending
    }

    fn clear_uncommitted(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile::create(AggregateId::new(), AggregateId::new(), "Ada").unwrap()
    }

    #[test]
    fn profile_identity_is_the_user_identity() {
        let user_id = AggregateId::new();
        let profile = UserProfile::create(user_id, AggregateId::new(), "Ada").unwrap();
        assert_eq!(profile.id(), Some(user_id));
        assert_eq!(profile.user_id(), Some(user_id));
        assert!(profile.avatar().is_empty());
    }

    #[test]
    fn job_info_rejected_only_when_both_unchanged() {
        let profile = profile()
            .change_job_info("Engineer", "Platform")
            .unwrap();

        assert!(matches!(
            profile.change_job_info("Engineer", "Platform"),
            Err(DomainError::Invariant(_))
        ));
        let title_only = profile.change_job_info("Staff Engineer", "Platform").unwrap();
        assert_eq!(title_only.job_title().as_str(), "Staff Engineer");
        let department_only = profile.change_job_info("Engineer", "Infra").unwrap();
        assert_eq!(department_only.department().as_str(), "Infra");
    }

    #[test]
    fn clearing_an_optional_field_is_a_change() {
        let profile = profile().change_biography("Pioneer of computing").unwrap();
        let cleared = profile.change_biography("").unwrap();
        assert!(cleared.biography().is_empty());
        assert!(matches!(
            cleared.change_biography(""),
            Err(DomainError::Invariant(_))
        ));
    }

    #[test]
    fn avatar_change_validates_format() {
        let profile = profile();
        assert!(matches!(
            profile.change_avatar("not a url"),
            Err(DomainError::Validation(_))
        ));
        let changed = profile.change_avatar("/avatars/ada.png").unwrap();
        assert_eq!(changed.avatar().as_str(), "/avatars/ada.png");
    }

    #[test]
    fn mutation_before_creation_is_rejected() {
        assert!(matches!(
            UserProfile::default().change_location("Berlin"),
            Err(DomainError::NotYetCreated)
        ));
    }
}
