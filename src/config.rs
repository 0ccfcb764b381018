//! Limits and defaults for input admission.
//!
//! The validator applies these when a candidate batch arrives; nothing else in
//! the crate reads them. Defaults mirror the hosted tool: up to 100 inputs of
//! 100 MiB each.

/// Media type every candidate must declare.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Media type of the archive artifact produced for split runs.
pub const ZIP_MEDIA_TYPE: &str = "application/zip";

/// Configurable admission limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of inputs held at once.
    pub max_inputs: usize,

    /// Maximum size of a single input file in bytes.
    pub max_file_bytes: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_inputs: 100,
            max_file_bytes: 100 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Limits with a custom input count cap.
    pub fn with_max_inputs(mut self, max_inputs: usize) -> Self {
        self.max_inputs = max_inputs;
        self
    }

    /// Limits with a custom per-file size cap.
    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }
}
