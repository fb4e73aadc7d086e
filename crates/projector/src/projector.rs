//! The decode → filter → enrich → persist pipeline.

use std::str::FromStr;
use std::sync::Arc;

use read_store::{AnswerStore, DenormalizedAnswer};

use crate::Result;
use crate::enrichment::EnrichmentClient;
use crate::event::{ANSWER_POSTED, SourceEvent};

/// Policy for composing the author display name from profile name parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayNameFormat {
    /// `"<first> <last>"` with a single space, no trimming. Empty name
    /// parts yield a leading or trailing space; this matches the historic
    /// behavior of the service.
    #[default]
    Literal,
    /// Whitespace-trimmed variant that collapses empty parts.
    Trimmed,
}

impl DisplayNameFormat {
    /// Renders a display name from the profile's name parts.
    pub fn render(self, first_name: &str, last_name: &str) -> String {
        match self {
            Self::Literal => format!("{first_name} {last_name}"),
            Self::Trimmed => {
                format!("{} {}", first_name.trim(), last_name.trim())
                    .trim()
                    .to_string()
            }
        }
    }
}

impl FromStr for DisplayNameFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "literal" => Ok(Self::Literal),
            "trimmed" => Ok(Self::Trimmed),
            other => Err(format!("unknown display name format {other:?}")),
        }
    }
}

/// Outcome of projecting one broker message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projected {
    /// The message was an `AnswerPosted` event and its denormalized record
    /// was inserted.
    Stored { id: String },
    /// The message carried a tag this projector does not recognize and was
    /// skipped without error.
    Ignored { event_type: String },
}

/// Projects broker messages into denormalized answer records.
///
/// The pipeline is a single linear attempt with early exit at every
/// stage; no side effect precedes the final insert, so no rollback is
/// ever needed.
pub struct Projector {
    enrichment: EnrichmentClient,
    store: Arc<dyn AnswerStore>,
    name_format: DisplayNameFormat,
}

impl Projector {
    /// Creates a projector over the given enrichment client and store.
    pub fn new(
        enrichment: EnrichmentClient,
        store: Arc<dyn AnswerStore>,
        name_format: DisplayNameFormat,
    ) -> Self {
        Self {
            enrichment,
            store,
            name_format,
        }
    }

    /// Runs one message through the pipeline.
    #[tracing::instrument(skip(self, raw), fields(bytes = raw.len()))]
    pub async fn project(&self, raw: &[u8]) -> Result<Projected> {
        let (event_type, body) = envelope::decode(raw)?;

        if event_type != ANSWER_POSTED {
            return Ok(Projected::Ignored {
                event_type: event_type.to_string(),
            });
        }

        let event: SourceEvent = serde_json::from_slice(body)?;
        let profile = self.enrichment.fetch_user(&event.author).await?;

        let answer = DenormalizedAnswer {
            id: event.id,
            content: event.content,
            author: self
                .name_format
                .render(&profile.first_name, &profile.last_name),
            created_at: event.created_at,
            discussion: event.discussion,
        };

        let id = answer.id.clone();
        self.store.insert(answer).await?;

        Ok(Projected::Stored { id })
    }
}
