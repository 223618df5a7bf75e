use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for one record (aggregate instance).
///
/// Assigned exactly once, by the record's creation event, and immutable
/// afterwards. Equality between records is equality of this identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(Uuid);

impl AggregateId {
    /// Creates a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AggregateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AggregateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AggregateId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<AggregateId> for Uuid {
    fn from(id: AggregateId) -> Self {
        id.0
    }
}

/// The closed set of record kinds persisted by this core.
///
/// Each kind owns an independent collection of event streams and a dedicated
/// outbound topic. Adding a kind is a compile-enforced change everywhere this
/// enum is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateKind {
    Tenant,
    User,
    UserProfile,
    TenantUser,
}

impl AggregateKind {
    /// Stable name used for stream collections and envelope routing.
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateKind::Tenant => "Tenant",
            AggregateKind::User => "User",
            AggregateKind::UserProfile => "UserProfile",
            AggregateKind::TenantUser => "TenantUser",
        }
    }

    /// Outbound topic committed facts of this kind are forwarded to.
    pub fn topic(&self) -> &'static str {
        match self {
            AggregateKind::Tenant => "tenant-events",
            AggregateKind::User => "user-events",
            AggregateKind::UserProfile => "user-profile-events",
            AggregateKind::TenantUser => "tenant-user-events",
        }
    }
}

impl std::fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_id_new_creates_unique_ids() {
        let id1 = AggregateId::new();
        let id2 = AggregateId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn aggregate_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = AggregateId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn aggregate_id_serialization_roundtrip() {
        let id = AggregateId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: AggregateId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn kind_topics_are_distinct() {
        let kinds = [
            AggregateKind::Tenant,
            AggregateKind::User,
            AggregateKind::UserProfile,
            AggregateKind::TenantUser,
        ];
        for a in &kinds {
            for b in &kinds {
                if a != b {
                    assert_ne!(a.topic(), b.topic());
                }
            }
        }
    }
}
