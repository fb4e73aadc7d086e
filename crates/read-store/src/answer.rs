//! The denormalized answer record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A read-optimized answer record with the author's display name embedded.
///
/// `id` equals the identifier of the source event the record was projected
/// from and acts as the primary key, so duplicate event deliveries surface
/// as duplicate-key insert failures rather than second copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenormalizedAnswer {
    pub id: String,
    pub content: String,
    /// Author display name, e.g. `"Ada Lovelace"` — not the user identifier.
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub discussion: String,
}
