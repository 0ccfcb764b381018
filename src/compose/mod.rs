//! Document composition and partition engine.
//!
//! One parameterized engine drives all three operations — merge, split-all,
//! and extract-range — instead of three near-duplicate code paths. The engine
//! works purely on in-memory inputs and outputs; file handling belongs to the
//! caller.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsuite::compose::{Engine, OperationSpec};
//! use pdfsuite::registry::InputDocument;
//!
//! # async fn example(inputs: Vec<InputDocument>) -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::new();
//! let result = engine.run(&inputs, &OperationSpec::Merge).await?;
//! println!("{} output document(s)", result.outputs.len());
//! # Ok(())
//! # }
//! ```

pub mod pages;

use serde::Serialize;

use crate::error::CompositionError;
use crate::registry::{InputDocument, InputId};

/// The operation a run performs over the current inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationSpec {
    /// Concatenate all inputs into one document, in registry order.
    Merge,

    /// Split the single input into one document per page.
    SplitAll,

    /// Extract pages `start..=end` (1-based, inclusive) of the single input
    /// into one document.
    ExtractRange {
        /// First page to keep.
        start: u32,
        /// Last page to keep.
        end: u32,
    },
}

/// A produced document: serialized bytes plus a suggested filename.
///
/// Created by the engine, never mutated afterwards; the packaging layer turns
/// it into a retrievable artifact.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    /// Deterministic suggested filename.
    pub name: String,

    /// Serialized PDF bytes.
    pub bytes: Vec<u8>,
}

/// One input that failed to decode or copy during a merge run.
///
/// Keyed by stable input id so the failure stays attached to the right file
/// if the user reorders inputs afterwards; `position` and `name` record where
/// the input sat when the run happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputFailure {
    /// Stable id of the failed input.
    pub id: InputId,

    /// 1-based position of the input at run time.
    pub position: usize,

    /// Original filename of the input.
    pub name: String,

    /// Underlying failure detail.
    pub reason: String,
}

impl InputFailure {
    /// The taxonomy form of this failure, for callers that render errors
    /// rather than inspect accumulated run data.
    pub fn as_error(&self) -> CompositionError {
        CompositionError::DecodeOrCopyFailure {
            position: self.position,
            name: self.name.clone(),
            reason: self.reason.clone(),
        }
    }
}

/// Outcome of a composition run.
#[derive(Debug, Default)]
pub struct CompositionResult {
    /// Produced documents, in output order. Empty when any input of a merge
    /// failed: the engine never emits a partially merged document.
    pub outputs: Vec<OutputDocument>,

    /// One entry per failed input, in registry order at run time.
    pub input_failures: Vec<InputFailure>,
}

impl CompositionResult {
    /// Whether the run produced usable outputs.
    pub fn succeeded(&self) -> bool {
        self.input_failures.is_empty() && !self.outputs.is_empty()
    }
}

/// The composition engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine;

impl Engine {
    /// Create an engine.
    pub fn new() -> Self {
        Self
    }

    /// Execute one operation over an ordered input snapshot.
    ///
    /// For merge, per-input decode/copy failures are accumulated in the
    /// result and do not halt later inputs; any failure discards the
    /// destination. For split-all and extract-range there is a single input,
    /// so the first error is fatal to the run.
    ///
    /// # Errors
    ///
    /// - [`CompositionError::InsufficientInputs`] for a merge with fewer than
    ///   two inputs
    /// - [`CompositionError::InvalidInput`] when a single-input operation has
    ///   no usable input
    /// - [`CompositionError::InvalidRange`] when an extraction range does not
    ///   fit the document
    pub async fn run(
        &self,
        inputs: &[InputDocument],
        spec: &OperationSpec,
    ) -> Result<CompositionResult, CompositionError> {
        match *spec {
            OperationSpec::Merge => self.merge(inputs).await,
            OperationSpec::SplitAll => self.split_all(inputs).await,
            OperationSpec::ExtractRange { start, end } => {
                self.extract_range(inputs, start, end).await
            }
        }
    }

    async fn merge(&self, inputs: &[InputDocument]) -> Result<CompositionResult, CompositionError> {
        if inputs.len() < 2 {
            return Err(CompositionError::InsufficientInputs {
                count: inputs.len(),
            });
        }

        let mut failures: Vec<InputFailure> = Vec::new();
        let mut decoded = Vec::new();

        for (idx, input) in inputs.iter().enumerate() {
            match pages::decode(&input.bytes) {
                Ok(doc) => decoded.push((idx, input, doc)),
                Err(e) => failures.push(InputFailure {
                    id: input.id,
                    position: idx + 1,
                    name: input.name.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        // Copy phase. The destination starts from the first decodable input;
        // a copy failure is recorded against its input and later inputs are
        // still attempted, so one run reports every bad file at once.
        let mut merged: Option<(lopdf::Document, u32)> = None;
        for (idx, input, doc) in decoded {
            match &mut merged {
                None => {
                    let max_id = doc.max_id;
                    merged = Some((doc, max_id));
                }
                Some((dest, max_id)) => {
                    if let Err(e) = pages::append_document(dest, max_id, doc) {
                        failures.push(InputFailure {
                            id: input.id,
                            position: idx + 1,
                            name: input.name.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        if !failures.is_empty() {
            failures.sort_by_key(|f| f.position);
            return Ok(CompositionResult {
                outputs: Vec::new(),
                input_failures: failures,
            });
        }

        let (mut dest, _) = merged.ok_or_else(|| CompositionError::InvalidInput {
            reason: "no decodable inputs".into(),
        })?;

        let bytes = pages::serialize(&mut dest).map_err(|e| CompositionError::InvalidInput {
            reason: format!("failed to serialize merged document: {e}"),
        })?;

        Ok(CompositionResult {
            outputs: vec![OutputDocument {
                name: "merged.pdf".into(),
                bytes,
            }],
            input_failures: Vec::new(),
        })
    }

    async fn split_all(
        &self,
        inputs: &[InputDocument],
    ) -> Result<CompositionResult, CompositionError> {
        let (source, _) = self.single_decoded_input(inputs)?;
        let total = pages::page_count(&source);

        let mut outputs = Vec::with_capacity(total as usize);
        for page_num in 1..=total {
            let mut single = pages::extract_range(&source, page_num, page_num).map_err(|e| {
                CompositionError::InvalidInput {
                    reason: format!("failed to split page {page_num}: {e}"),
                }
            })?;
            let bytes =
                pages::serialize(&mut single).map_err(|e| CompositionError::InvalidInput {
                    reason: format!("failed to serialize page {page_num}: {e}"),
                })?;
            outputs.push(OutputDocument {
                name: format!("split-file-{page_num}.pdf"),
                bytes,
            });
        }

        Ok(CompositionResult {
            outputs,
            input_failures: Vec::new(),
        })
    }

    async fn extract_range(
        &self,
        inputs: &[InputDocument],
        start: u32,
        end: u32,
    ) -> Result<CompositionResult, CompositionError> {
        let (source, _) = self.single_decoded_input(inputs)?;
        let total = pages::page_count(&source);

        if start < 1 || end < start || end > total {
            return Err(CompositionError::InvalidRange {
                start,
                end,
                total_pages: total,
            });
        }

        let mut carved = pages::extract_range(&source, start, end).map_err(|e| {
            CompositionError::InvalidInput {
                reason: format!("failed to extract pages {start}..{end}: {e}"),
            }
        })?;
        let bytes = pages::serialize(&mut carved).map_err(|e| CompositionError::InvalidInput {
            reason: format!("failed to serialize extracted document: {e}"),
        })?;

        Ok(CompositionResult {
            outputs: vec![OutputDocument {
                name: format!("split-file-{start}-{end}.pdf"),
                bytes,
            }],
            input_failures: Vec::new(),
        })
    }

    /// The single input required by split/extract, decoded.
    fn single_decoded_input<'a>(
        &self,
        inputs: &'a [InputDocument],
    ) -> Result<(lopdf::Document, &'a InputDocument), CompositionError> {
        let [input] = inputs else {
            return Err(CompositionError::InvalidInput {
                reason: format!("operation requires exactly one input, got {}", inputs.len()),
            });
        };

        let doc = pages::decode(&input.bytes).map_err(|e| CompositionError::InvalidInput {
            reason: format!("{}: {e}", input.name),
        })?;

        Ok((doc, input))
    }
}
