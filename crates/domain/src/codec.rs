//! Codec between domain facts and wire envelopes.
//!
//! Encoding serializes the fact to the envelope body and stamps the
//! discriminator tag and occurrence timestamp. Decoding dispatches on the tag
//! embedded in the body, reconstructing value objects through their
//! validating parsers; unknown extra body fields are ignored for forward
//! compatibility, while an unrecognized tag or an invalid scalar fails with a
//! serialization error. That failure is fatal for the record's
//! reconstruction: skipping a fact would corrupt every state folded after it.

use common::AggregateId;
use event_store::{EventEnvelope, Version};

use crate::aggregate::{Aggregate, DomainEvent};
use crate::error::DomainError;

/// Encodes one fact into its wire envelope at the given stream position.
pub fn encode<A: Aggregate>(
    id: AggregateId,
    sequence: Version,
    event: &A::Event,
) -> Result<EventEnvelope, DomainError> {
    let body = serde_json::to_string(event)?;
    Ok(EventEnvelope::new(
        id,
        A::kind(),
        event.event_type(),
        sequence,
        event.occurred_at(),
        body,
    ))
}

/// Decodes the fact carried by an envelope.
pub fn decode<A: Aggregate>(envelope: &EventEnvelope) -> Result<A::Event, DomainError> {
    let event: A::Event = serde_json::from_str(&envelope.body)?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenant::{Tenant, TenantKind};

    #[test]
    fn encode_stamps_tag_and_timestamp() {
        let tenant = Tenant::create("Acme", TenantKind::Organization, "", None).unwrap();
        let event = tenant.uncommitted()[0].clone();
        let envelope = encode::<Tenant>(tenant.id().unwrap(), Version::first(), &event).unwrap();

        assert_eq!(envelope.event_type, "tenant.created");
        assert_eq!(envelope.occurred_at, event.occurred_at());
        assert!(envelope.body.contains("tenant.created"));
    }

    #[test]
    fn decode_round_trips_every_fact() {
        let tenant = Tenant::create("Acme", TenantKind::Organization, "", None).unwrap();
        let event = tenant.uncommitted()[0].clone();
        let envelope = encode::<Tenant>(tenant.id().unwrap(), Version::first(), &event).unwrap();

        let decoded = decode::<Tenant>(&envelope).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn decode_round_trips_other_record_kinds() {
        use crate::membership::{MemberRole, Membership};
        use crate::profile::UserProfile;
        use crate::user::User;

        let user = User::create(AggregateId::new(), "Ada", "ada@example.com", "+15550101234")
            .unwrap()
            .change_email("lovelace@example.com")
            .unwrap();
        for event in user.uncommitted() {
            let envelope =
                encode::<User>(user.id().unwrap(), Version::first(), event).unwrap();
            assert_eq!(&decode::<User>(&envelope).unwrap(), event);
        }

        let profile = UserProfile::create(AggregateId::new(), AggregateId::new(), "Ada")
            .unwrap()
            .change_job_info("Engineer", "Platform")
            .unwrap()
            .change_location("London")
            .unwrap();
        for event in profile.uncommitted() {
            let envelope =
                encode::<UserProfile>(profile.id().unwrap(), Version::first(), event).unwrap();
            assert_eq!(&decode::<UserProfile>(&envelope).unwrap(), event);
        }

        let tenant = Tenant::create("Acme", TenantKind::Organization, "", None).unwrap();
        let membership =
            Membership::add(&tenant, AggregateId::new(), MemberRole::Manager, 0).unwrap();
        let event = &membership.uncommitted()[0];
        let envelope =
            encode::<Membership>(membership.id().unwrap(), Version::first(), event).unwrap();
        assert_eq!(&decode::<Membership>(&envelope).unwrap(), event);
    }

    #[test]
    fn unknown_tag_is_a_serialization_error() {
        let envelope = EventEnvelope::new(
            AggregateId::new(),
            common::AggregateKind::Tenant,
            "tenant.exploded",
            Version::first(),
            chrono::Utc::now(),
            r#"{"type":"tenant.exploded"}"#,
        );
        let result = decode::<Tenant>(&envelope);
        assert!(matches!(result, Err(DomainError::Serialization(_))));
    }

    #[test]
    fn unknown_extra_fields_are_ignored() {
        let tenant = Tenant::create("Acme", TenantKind::Organization, "", None).unwrap();
        let event = tenant.uncommitted()[0].clone();
        let envelope = encode::<Tenant>(tenant.id().unwrap(), Version::first(), &event).unwrap();

        let mut body: serde_json::Value = serde_json::from_str(&envelope.body).unwrap();
        body["added_in_v2"] = serde_json::json!("ignored");
        let widened = EventEnvelope {
            body: body.to_string(),
            ..envelope
        };

        let decoded = decode::<Tenant>(&widened).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn invalid_scalar_fails_decode() {
        let tenant = Tenant::create("Acme", TenantKind::Organization, "", None).unwrap();
        let event = tenant.uncommitted()[0].clone();
        let envelope = encode::<Tenant>(tenant.id().unwrap(), Version::first(), &event).unwrap();

        // Blank out the validated name scalar; the parse constructor rejects it.
        let mut body: serde_json::Value = serde_json::from_str(&envelope.body).unwrap();
        body["name"] = serde_json::json!("");
        let corrupted = EventEnvelope {
            body: body.to_string(),
            ..envelope
        };

        let result = decode::<Tenant>(&corrupted);
        assert!(matches!(result, Err(DomainError::Serialization(_))));
    }
}
