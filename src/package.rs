//! Packaging of output documents into retrievable artifacts.
//!
//! Merge and extract runs yield one downloadable PDF; a split run bundles its
//! per-page outputs into a single ZIP archive, entries in output order so
//! identical inputs produce identical archives.

use std::io::{Cursor, Write};

use crate::compose::{OperationSpec, OutputDocument};
use crate::config::{PDF_MEDIA_TYPE, ZIP_MEDIA_TYPE};
use crate::error::PackageError;

/// Archive filename used for split runs.
pub const SPLIT_ARCHIVE_NAME: &str = "split-pages.zip";

/// A retrievable binary artifact.
///
/// The artifact owns a transient buffer that must be released on every exit
/// path: when superseded by a new run, on session clear, or on drop. The name
/// is a label the user may edit freely; it is never re-validated.
#[derive(Debug)]
pub struct Artifact {
    name: String,
    media_type: &'static str,
    bytes: Vec<u8>,
}

impl Artifact {
    fn new(name: String, media_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            name,
            media_type,
            bytes,
        }
    }

    /// Current filename label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the artifact. The label is data, not a format claim.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Declared media type of the payload.
    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    /// The payload. Empty once released.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether [`Artifact::release`] has already reclaimed the payload.
    pub fn is_released(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reclaim the underlying buffer. Idempotent.
    pub fn release(&mut self) {
        self.bytes = Vec::new();
    }
}

impl Drop for Artifact {
    fn drop(&mut self) {
        self.release();
    }
}

/// Turn a run's outputs into artifacts.
///
/// Single-output operations produce one PDF artifact under the output's
/// suggested name. Split-all bundles every output into one ZIP artifact.
///
/// # Errors
///
/// - [`PackageError::NoOutputs`] when the output set is empty
/// - [`PackageError::Archive`] when the archive collaborator fails
pub fn package(
    outputs: Vec<OutputDocument>,
    spec: &OperationSpec,
) -> Result<Vec<Artifact>, PackageError> {
    if outputs.is_empty() {
        return Err(PackageError::NoOutputs);
    }

    match spec {
        OperationSpec::Merge | OperationSpec::ExtractRange { .. } => Ok(outputs
            .into_iter()
            .map(|output| Artifact::new(output.name, PDF_MEDIA_TYPE, output.bytes))
            .collect()),
        OperationSpec::SplitAll => {
            let archive = build_archive(&outputs)?;
            Ok(vec![Artifact::new(
                SPLIT_ARCHIVE_NAME.to_string(),
                ZIP_MEDIA_TYPE,
                archive,
            )])
        }
    }
}

/// Bundle outputs into a ZIP buffer, entries in output order.
fn build_archive(outputs: &[OutputDocument]) -> Result<Vec<u8>, PackageError> {
    let mut buffer = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
        let options = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        for output in outputs {
            zip.start_file(output.name.clone(), options)
                .map_err(|e| PackageError::Archive(format!("failed to add entry: {e}")))?;
            zip.write_all(&output.bytes)
                .map_err(|e| PackageError::Archive(format!("failed to write entry: {e}")))?;
        }

        zip.finish()
            .map_err(|e| PackageError::Archive(format!("failed to finalize archive: {e}")))?;
    }
    Ok(buffer)
}
