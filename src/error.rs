//! Error types for pdfsuite.
//!
//! Each layer surfaces its own error enum: validation and registry errors are
//! rejected synchronously and leave state unchanged, composition errors come
//! back from a run, and [`SessionError`] is the umbrella the session hands to
//! callers. The session is the only layer that turns these into user-facing
//! messages.

use crate::compose::InputFailure;

/// Result type alias for pdfsuite operations.
pub type Result<T, E = SessionError> = std::result::Result<T, E>;

/// Rejection of a candidate batch before it enters the registry.
///
/// Validation is batch-atomic: one bad candidate rejects the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A candidate's declared media type is not `application/pdf`.
    #[error("not a PDF file: {name} (declared type: {media_type})")]
    WrongType {
        /// Display name of the offending candidate.
        name: String,
        /// The media type the candidate declared.
        media_type: String,
    },

    /// A candidate exceeds the per-file size limit.
    #[error("file too large: {name} ({size} bytes, limit {limit})")]
    TooLarge {
        /// Display name of the offending candidate.
        name: String,
        /// Size of the candidate in bytes.
        size: u64,
        /// Configured per-file limit in bytes.
        limit: u64,
    },

    /// Admitting the batch would exceed the input count limit.
    #[error("too many files: {current} loaded + {adding} new exceeds limit of {max}")]
    TooManyFiles {
        /// Number of inputs already in the registry.
        current: usize,
        /// Number of candidates in the batch.
        adding: usize,
        /// Configured maximum input count.
        max: usize,
    },
}

/// Failed mutation of the input registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A reorder index does not refer to a held input.
    #[error("index {index} out of bounds for {len} input(s)")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of inputs currently held.
        len: usize,
    },
}

/// Failure of a composition run.
///
/// Per-input decode/copy failures during a merge are accumulated as data in
/// [`CompositionResult`](crate::compose::CompositionResult) rather than
/// surfaced here; the variants below are fatal to their run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    /// Merge requires at least two inputs.
    #[error("merge requires at least two input documents, got {count}")]
    InsufficientInputs {
        /// Number of inputs that were supplied.
        count: usize,
    },

    /// A single-input operation received no input, several inputs, or an
    /// undecodable one.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What made the input unusable.
        reason: String,
    },

    /// An extraction range that cannot be satisfied.
    #[error("invalid page range {start}..{end} for a {total_pages}-page document")]
    InvalidRange {
        /// Requested first page (1-based).
        start: u32,
        /// Requested last page (1-based, inclusive).
        end: u32,
        /// Total pages in the decoded input.
        total_pages: u32,
    },

    /// A decode or page-copy step failed for one input of a merge.
    ///
    /// Merge accumulation stores these as [`InputFailure`] values;
    /// [`InputFailure::as_error`] produces this variant for callers that
    /// render a single failure.
    #[error("failed to process input #{position} ({name}): {reason}")]
    DecodeOrCopyFailure {
        /// 1-based position of the input at the time of the run.
        position: usize,
        /// Original filename of the input.
        name: String,
        /// Underlying failure detail.
        reason: String,
    },
}

/// Failure while packaging outputs into retrievable artifacts.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    /// The archive collaborator failed to build the bundle.
    #[error("failed to build archive: {0}")]
    Archive(String),

    /// Packaging was asked to wrap an empty output set.
    #[error("no outputs to package")]
    NoOutputs,
}

/// Umbrella error returned by [`Session`](crate::session::Session) operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A run is already in flight; concurrent submissions are rejected, not
    /// queued.
    #[error("a run is already in progress")]
    Busy,

    /// A merge run completed with per-input failures and was discarded.
    ///
    /// The destination document is never emitted partially merged; the caller
    /// must fix or remove the failed inputs and re-run.
    #[error("merge aborted: {} input(s) failed", failures.len())]
    RunFailed {
        /// One entry per failed input, in registry order at run time.
        failures: Vec<InputFailure>,
    },

    /// Candidate batch rejected before entering the registry.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Registry mutation rejected.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The composition run itself failed.
    #[error(transparent)]
    Composition(#[from] CompositionError),

    /// Outputs could not be packaged into artifacts.
    #[error(transparent)]
    Package(#[from] PackageError),
}
