//! Event ingestion and denormalization pipeline.
//!
//! This crate implements the consumer half of the CQRS split: it decodes
//! broker messages, filters them by event type, enriches `AnswerPosted`
//! events with author profile data from the users service, and persists
//! the resulting denormalized record.
//!
//! - [`Projector`] — the decode → filter → enrich → persist pipeline
//! - [`EnrichmentClient`] — profile lookups against the users service
//! - [`MessageSource`] — seam behind which the broker client lives
//! - [`MessageProcessor`] — sequential consumption loop with dead-letter
//!   publication
//!
//! Every failure during projection is terminal for its message: the
//! message is logged, dead-lettered, and dropped. Nothing is negatively
//! acknowledged to the source, so effective delivery is at-most-once from
//! the read model's perspective.

pub mod dead_letter;
pub mod enrichment;
pub mod error;
pub mod event;
pub mod processor;
pub mod projector;
pub mod source;

pub use dead_letter::{DeadLetter, DeadLetterSink, InMemoryDeadLetterSink, LogDeadLetterSink};
pub use enrichment::{EnrichmentClient, EnrichmentError};
pub use error::{ProjectError, Result};
pub use event::{ANSWERS_TOPIC, ANSWER_POSTED, SourceEvent, UserProfile};
pub use processor::MessageProcessor;
pub use projector::{DisplayNameFormat, Projected, Projector};
pub use source::{ChannelSource, MessageSource, MessageStream, SourceError, channel};
