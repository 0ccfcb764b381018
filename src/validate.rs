//! Admission checks for candidate input files.
//!
//! The validator gates every registry mutation: a candidate batch is admitted
//! whole or rejected whole, so a partial add can never leave the registry in a
//! surprising state. Checks only look at declared metadata; document content
//! is not parsed until a run decodes it.

use crate::config::{Limits, PDF_MEDIA_TYPE};
use crate::error::ValidationError;
use crate::registry::{InputDocument, InputId};

/// An uploaded file before admission: name, declared type, raw bytes.
#[derive(Debug, Clone)]
pub struct RawFile {
    /// Display name (usually the original filename).
    pub name: String,

    /// Declared media type.
    pub media_type: String,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl RawFile {
    /// Convenience constructor for a file that declares itself a PDF.
    pub fn pdf(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: PDF_MEDIA_TYPE.to_string(),
            bytes,
        }
    }
}

/// Validator enforcing type, size, and count limits on candidate batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    limits: Limits,
}

impl Validator {
    /// Create a validator with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    /// The limits this validator enforces.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Check a candidate batch against the limits and admit it whole.
    ///
    /// `current_count` is the number of inputs already in the registry.
    /// On success every candidate becomes an [`InputDocument`] with a fresh
    /// stable id, in batch order.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule; no candidate is admitted in that case:
    /// - [`ValidationError::WrongType`] if any declared type is not PDF
    /// - [`ValidationError::TooLarge`] if any file exceeds the size cap
    /// - [`ValidationError::TooManyFiles`] if the batch would exceed the
    ///   input count cap
    pub fn validate(
        &self,
        candidates: Vec<RawFile>,
        current_count: usize,
    ) -> Result<Vec<InputDocument>, ValidationError> {
        if current_count + candidates.len() > self.limits.max_inputs {
            return Err(ValidationError::TooManyFiles {
                current: current_count,
                adding: candidates.len(),
                max: self.limits.max_inputs,
            });
        }

        for candidate in &candidates {
            if candidate.media_type != PDF_MEDIA_TYPE {
                return Err(ValidationError::WrongType {
                    name: candidate.name.clone(),
                    media_type: candidate.media_type.clone(),
                });
            }

            let size = candidate.bytes.len() as u64;
            if size > self.limits.max_file_bytes {
                return Err(ValidationError::TooLarge {
                    name: candidate.name.clone(),
                    size,
                    limit: self.limits.max_file_bytes,
                });
            }
        }

        Ok(candidates
            .into_iter()
            .map(|candidate| InputDocument {
                id: InputId::next(),
                name: candidate.name,
                media_type: candidate.media_type,
                bytes: candidate.bytes,
            })
            .collect())
    }
}
