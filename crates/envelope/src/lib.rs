//! Codec for the broker message envelope.
//!
//! Messages on the wire are framed as a 2-byte ASCII decimal length `L`,
//! followed by an `L`-byte event-type tag, followed by the event body:
//!
//! ```text
//! 12AnswerPosted{"id":"a1",...}
//! ^^            ^
//! ||            +-- opaque body (UTF-8 JSON in practice)
//! |+-- event-type tag, L bytes
//! +-- L as two ASCII digits
//! ```
//!
//! The 2-digit prefix caps the tag length at [`MAX_TAG_LEN`]; tags of
//! 100 bytes or more cannot be represented in this format.

use thiserror::Error;

/// Longest event-type tag the 2-digit length prefix can express.
pub const MAX_TAG_LEN: usize = 99;

/// Errors produced while encoding or decoding an envelope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The message is shorter than the 2-byte length prefix.
    #[error("message of {0} bytes is shorter than the 2-byte length prefix")]
    Truncated(usize),

    /// The first 2 bytes are not an ASCII decimal integer.
    #[error("length prefix {0:?} is not an ASCII decimal integer")]
    InvalidPrefix(String),

    /// The declared tag length runs past the end of the message.
    #[error("declared tag length {declared} exceeds the {available} bytes after the prefix")]
    TagOverrun { declared: usize, available: usize },

    /// The event-type tag is not valid UTF-8.
    #[error("event-type tag is not valid UTF-8")]
    InvalidTag,

    /// The tag is too long for the 2-digit length prefix.
    #[error("tag of {0} bytes exceeds the maximum representable length of {MAX_TAG_LEN}")]
    TagTooLong(usize),
}

/// Splits a raw broker message into its event-type tag and body.
///
/// The body is returned as-is; interpreting it is the caller's concern.
pub fn decode(raw: &[u8]) -> Result<(&str, &[u8]), EnvelopeError> {
    if raw.len() < 2 {
        return Err(EnvelopeError::Truncated(raw.len()));
    }

    let prefix = std::str::from_utf8(&raw[..2])
        .map_err(|_| EnvelopeError::InvalidPrefix(format!("{:?}", &raw[..2])))?;
    let tag_len: usize = prefix
        .parse()
        .map_err(|_| EnvelopeError::InvalidPrefix(prefix.to_string()))?;

    let rest = &raw[2..];
    if tag_len > rest.len() {
        return Err(EnvelopeError::TagOverrun {
            declared: tag_len,
            available: rest.len(),
        });
    }

    let tag = std::str::from_utf8(&rest[..tag_len]).map_err(|_| EnvelopeError::InvalidTag)?;
    Ok((tag, &rest[tag_len..]))
}

/// Frames an event-type tag and body into a wire message.
///
/// Fails with [`EnvelopeError::TagTooLong`] when the tag does not fit the
/// 2-digit length prefix.
pub fn encode(tag: &str, body: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    if tag.len() > MAX_TAG_LEN {
        return Err(EnvelopeError::TagTooLong(tag.len()));
    }

    let mut message = Vec::with_capacity(2 + tag.len() + body.len());
    message.extend_from_slice(format!("{:02}", tag.len()).as_bytes());
    message.extend_from_slice(tag.as_bytes());
    message.extend_from_slice(body);
    Ok(message)
}
