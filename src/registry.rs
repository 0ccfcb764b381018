//! Ordered registry of pending input documents.
//!
//! Order is significant for merge runs (it defines page concatenation order);
//! split and extract operate on a single input. Every input carries a stable
//! [`InputId`] so that error state recorded against a file survives reordering
//! untouched.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::RegistryError;

static NEXT_INPUT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of an input, independent of its position in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct InputId(u64);

impl InputId {
    /// Allocate a fresh id from the process-wide counter.
    pub fn next() -> Self {
        Self(NEXT_INPUT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Build an id from a raw value.
    ///
    /// Intended for tests and deserialization; ids minted this way are not
    /// guaranteed unique against [`InputId::next`].
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// An admitted input document: opaque bytes plus metadata.
///
/// Created by the validator on admission, owned by the registry until the
/// batch is cleared or the input removed, and never mutated.
#[derive(Debug, Clone)]
pub struct InputDocument {
    /// Stable identity, kept across reorders.
    pub id: InputId,

    /// Original filename, used in error reports and output naming.
    pub name: String,

    /// Declared media type.
    pub media_type: String,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl InputDocument {
    /// Size of the underlying file in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Ordered sequence of admitted inputs.
#[derive(Debug, Default)]
pub struct InputRegistry {
    inputs: Vec<InputDocument>,
}

impl InputRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append validated inputs in arrival order.
    ///
    /// Count and type constraints are the validator's job; the registry only
    /// stores what it is given.
    pub fn add(&mut self, validated: Vec<InputDocument>) {
        self.inputs.extend(validated);
    }

    /// Remove the input with the given id.
    ///
    /// Idempotent: removing an absent id is a no-op. Returns whether an input
    /// was actually removed.
    pub fn remove(&mut self, id: InputId) -> bool {
        let before = self.inputs.len();
        self.inputs.retain(|input| input.id != id);
        self.inputs.len() != before
    }

    /// Move the input at `from` to position `to`; everything else shifts.
    ///
    /// Out-of-range indices fail with [`RegistryError::IndexOutOfBounds`] and
    /// leave the registry unchanged.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), RegistryError> {
        let len = self.inputs.len();
        for index in [from, to] {
            if index >= len {
                return Err(RegistryError::IndexOutOfBounds { index, len });
            }
        }

        let moved = self.inputs.remove(from);
        self.inputs.insert(to, moved);
        Ok(())
    }

    /// Drop all inputs.
    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    /// The current ordered inputs.
    pub fn snapshot(&self) -> &[InputDocument] {
        &self.inputs
    }

    /// Number of inputs held.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Current 0-based position of an input, if present.
    pub fn position_of(&self, id: InputId) -> Option<usize> {
        self.inputs.iter().position(|input| input.id == id)
    }
}
