//! pdfsuite - Merge, split, and extract PDF documents entirely in memory.
//!
//! The crate is built around a composition engine that runs one of three
//! operations over an ordered set of in-memory inputs:
//!
//! - **Merge**: concatenate N PDFs into one, in input order
//! - **SplitAll**: split one PDF into per-page files, bundled as a ZIP archive
//! - **ExtractRange**: copy a contiguous page range into a new PDF
//!
//! Inputs are validated before they enter the registry (type, size, count),
//! keep a stable identity across reorders, and fail in isolation: one corrupt
//! file in a merge batch is reported by position and name without aborting
//! the decoding of the others.
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
//! session.add_files(vec![
//!     RawFile::pdf("report.pdf", a),
//!     RawFile::pdf("appendix.pdf", b),
//! ])?;
//!
//! session.submit(OperationSpec::Merge).await?;
//!
//! let merged = &session.artifacts()[0];
//! println!("{}: {} bytes", merged.name(), merged.size_bytes());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod output;
pub mod package;
pub mod registry;
pub mod session;
pub mod validate;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use error::{Result, SessionError};
pub use session::Session;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
