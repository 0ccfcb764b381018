//! Session controller: orchestrates validation, the registry, the engine,
//! and packaging for one user session.
//!
//! The session is the single writer of the registry and the only layer that
//! translates structured errors into user-facing reports. Artifacts from a
//! previous run are released when a new run supersedes them, on
//! [`Session::clear`], and when the session itself is dropped.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsuite::compose::OperationSpec;
//! use pdfsuite::session::Session;
//! use pdfsuite::validate::RawFile;
//!
//! # async fn example(a: Vec<u8>, b: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new();
//! session.add_files(vec![RawFile::pdf("a.pdf", a), RawFile::pdf("b.pdf", b)])?;
//! session.submit(OperationSpec::Merge).await?;
//! for artifact in session.artifacts() {
//!     println!("{} ({} bytes)", artifact.name(), artifact.size_bytes());
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::compose::{Engine, InputFailure, OperationSpec};
use crate::config::Limits;
use crate::error::{Result, SessionError};
use crate::package::{self, Artifact};
use crate::registry::{InputId, InputRegistry};
use crate::validate::{RawFile, Validator};

/// Read-only view of one pending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSummary {
    /// Stable id of the input.
    pub id: InputId,

    /// Original filename.
    pub name: String,

    /// Current 1-based position in the registry.
    pub position: usize,

    /// Whether the last run recorded a failure against this input.
    pub has_error: bool,
}

/// Per-session run state.
pub struct Session {
    validator: Validator,
    engine: Engine,
    registry: InputRegistry,
    failures: Vec<InputFailure>,
    artifacts: Vec<Artifact>,
    processing: Arc<AtomicBool>,
}

/// Clears the processing flag on every exit path out of a run.
struct ProcessingGuard(Arc<AtomicBool>);

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Session {
    /// Create a session with default limits.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create a session with custom admission limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            validator: Validator::with_limits(limits),
            engine: Engine::new(),
            registry: InputRegistry::new(),
            failures: Vec::new(),
            artifacts: Vec::new(),
            processing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Validate a candidate batch and admit it into the registry.
    ///
    /// Batch-atomic: on error nothing is admitted and the registry is
    /// unchanged. Returns the ids assigned to the admitted inputs, in batch
    /// order.
    pub fn add_files(&mut self, candidates: Vec<RawFile>) -> Result<Vec<InputId>> {
        let admitted = self.validator.validate(candidates, self.registry.len())?;
        let ids = admitted.iter().map(|input| input.id).collect();
        self.registry.add(admitted);
        Ok(ids)
    }

    /// Run one operation over the current inputs.
    ///
    /// Rejected with [`SessionError::Busy`] while another run is in flight;
    /// concurrent submissions are never queued. Mid-run cancellation is not
    /// supported: once a run starts it finishes or fails on its own.
    ///
    /// On success the previous run's artifacts are released and replaced. A
    /// merge where any input failed produces no artifacts and returns
    /// [`SessionError::RunFailed`] carrying every per-input failure; the
    /// failures also stay queryable through [`Session::failures`] and
    /// [`Session::inputs`], keyed by input id so later reorders keep them
    /// attached to the right file.
    pub async fn submit(&mut self, spec: OperationSpec) -> Result<()> {
        if self.processing.swap(true, Ordering::SeqCst) {
            return Err(SessionError::Busy);
        }
        let _guard = ProcessingGuard(Arc::clone(&self.processing));

        self.failures.clear();

        let snapshot = self.registry.snapshot().to_vec();
        let result = self.engine.run(&snapshot, &spec).await?;

        if !result.input_failures.is_empty() {
            self.failures = result.input_failures;
            return Err(SessionError::RunFailed {
                failures: self.failures.clone(),
            });
        }

        let new_artifacts = package::package(result.outputs, &spec)?;

        self.release_artifacts();
        self.artifacts = new_artifacts;
        Ok(())
    }

    /// Release all artifacts and reset every piece of run state. Idempotent.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.failures.clear();
        self.release_artifacts();
    }

    /// Remove an input by id; a no-op if absent. Any failure recorded against
    /// it is dropped with it.
    pub fn remove_input(&mut self, id: InputId) {
        if self.registry.remove(id) {
            self.failures.retain(|failure| failure.id != id);
        }
    }

    /// Move the input at `from` to position `to`.
    ///
    /// Failure state is keyed by id, so it follows the file, not the slot.
    pub fn reorder_input(&mut self, from: usize, to: usize) -> Result<()> {
        self.registry.reorder(from, to)?;
        Ok(())
    }

    /// Summaries of the current inputs, in registry order.
    pub fn inputs(&self) -> Vec<InputSummary> {
        self.registry
            .snapshot()
            .iter()
            .enumerate()
            .map(|(idx, input)| InputSummary {
                id: input.id,
                name: input.name.clone(),
                position: idx + 1,
                has_error: self.failures.iter().any(|f| f.id == input.id),
            })
            .collect()
    }

    /// Whether a run is currently in flight.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    /// Artifacts of the last successful run.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Mutable access to the artifacts, e.g. to rename one before download.
    pub fn artifacts_mut(&mut self) -> &mut [Artifact] {
        &mut self.artifacts
    }

    /// Per-input failures recorded by the last run.
    pub fn failures(&self) -> &[InputFailure] {
        &self.failures
    }

    /// The admission limits in force.
    pub fn limits(&self) -> Limits {
        self.validator.limits()
    }

    fn release_artifacts(&mut self) {
        for artifact in &mut self.artifacts {
            artifact.release();
        }
        self.artifacts.clear();
    }

    #[cfg(test)]
    fn set_processing_for_test(&self, value: bool) {
        self.processing.store(value, Ordering::SeqCst);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
