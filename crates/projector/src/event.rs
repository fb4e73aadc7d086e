//! Wire-level event and enrichment payload types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Broker topic carrying answer events.
pub const ANSWERS_TOPIC: &str = "answers";

/// The single event-type tag this projector recognizes. Everything else
/// is ignored (forward compatibility by ignoring, not an error).
pub const ANSWER_POSTED: &str = "AnswerPosted";

/// An answer event as published by the upstream writer service.
///
/// Carries the author as an opaque user identifier; the display name is
/// resolved during enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceEvent {
    pub id: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub discussion: String,
}

/// A user profile fetched from the users query service.
///
/// Transient: fetched on demand for every event, never persisted or
/// cached locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub member_since: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_event_decodes_camel_case_body() {
        let body = r#"{"id":"a1","content":"hi","author":"u1","createdAt":"2024-01-01T00:00:00Z","discussion":"d1"}"#;
        let event: SourceEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.id, "a1");
        assert_eq!(event.author, "u1");
        assert_eq!(event.created_at, "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(event.discussion, "d1");
    }

    #[test]
    fn source_event_rejects_missing_fields() {
        let body = r#"{"id":"a1","content":"hi"}"#;
        assert!(serde_json::from_str::<SourceEvent>(body).is_err());
    }

    #[test]
    fn user_profile_tolerates_absent_member_since() {
        let body = r#"{"id":"u1","firstName":"Ada","lastName":"Lovelace"}"#;
        let profile: UserProfile = serde_json::from_str(body).unwrap();
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.last_name, "Lovelace");
        assert!(profile.member_since.is_none());
    }

    #[test]
    fn user_profile_decodes_member_since() {
        let body =
            r#"{"id":"u1","firstName":"Ada","lastName":"Lovelace","memberSince":"2020-06-01T12:00:00Z"}"#;
        let profile: UserProfile = serde_json::from_str(body).unwrap();
        assert!(profile.member_since.is_some());
    }
}
