//! Command-line shell over the session controller.
//!
//! The CLI is the crate's binary-source I/O layer: it reads input files fully
//! into memory, feeds them to a [`Session`], and writes the resulting
//! artifacts back to disk. The library boundary itself never sees a path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;

use crate::compose::{InputFailure, OperationSpec};
use crate::error::SessionError;
use crate::output::{OutputFormatter, format_file_size};
use crate::session::Session;
use crate::validate::RawFile;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "pdfsuite", version)]
#[command(about = "Merge, split, and extract PDF documents", long_about = None)]
pub struct Cli {
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,

    /// Suppress non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show detailed progress information.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit a machine-readable JSON report on stdout.
    #[arg(long, global = true)]
    pub json: bool,
}

/// The three supported operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge two or more PDFs into one, in argument order.
    Merge {
        /// Input PDF files, in merge order.
        #[arg(required = true, num_args = 2..)]
        inputs: Vec<PathBuf>,

        /// Path for the merged document.
        #[arg(short, long, default_value = "merged.pdf")]
        output: PathBuf,
    },

    /// Split one PDF into per-page files, bundled as a ZIP archive.
    Split {
        /// Input PDF file.
        input: PathBuf,

        /// Path for the archive.
        #[arg(short, long, default_value = "split-pages.zip")]
        output: PathBuf,
    },

    /// Extract a contiguous page range into a new PDF.
    Extract {
        /// Input PDF file.
        input: PathBuf,

        /// First page to keep (1-based).
        #[arg(short, long)]
        start: u32,

        /// Last page to keep (inclusive).
        #[arg(short, long)]
        end: u32,

        /// Output path; defaults to split-file-<start>-<end>.pdf.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Command {
    fn spec(&self) -> OperationSpec {
        match *self {
            Command::Merge { .. } => OperationSpec::Merge,
            Command::Split { .. } => OperationSpec::SplitAll,
            Command::Extract { start, end, .. } => OperationSpec::ExtractRange { start, end },
        }
    }

    fn input_paths(&self) -> Vec<&Path> {
        match self {
            Command::Merge { inputs, .. } => inputs.iter().map(PathBuf::as_path).collect(),
            Command::Split { input, .. } | Command::Extract { input, .. } => {
                vec![input.as_path()]
            }
        }
    }

    fn output_path(&self) -> PathBuf {
        match self {
            Command::Merge { output, .. } | Command::Split { output, .. } => output.clone(),
            Command::Extract {
                start, end, output, ..
            } => output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("split-file-{start}-{end}.pdf"))),
        }
    }
}

/// JSON report emitted with `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
    ok: bool,
    artifacts: Vec<ArtifactInfo>,
    failures: Vec<InputFailure>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactInfo {
    name: String,
    media_type: String,
    size_bytes: u64,
    path: PathBuf,
}

/// Parse arguments and execute the requested operation.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let formatter = OutputFormatter::new(cli.quiet || cli.json, cli.verbose);

    let spec = cli.command.spec();
    let output_path = cli.command.output_path();

    let paths: Vec<PathBuf> = cli
        .command
        .input_paths()
        .into_iter()
        .map(Path::to_path_buf)
        .collect();
    let candidates = load_candidates(paths, &formatter).await?;

    let mut session = Session::new();
    session
        .add_files(candidates)
        .context("inputs were rejected")?;

    formatter.info(&format!(
        "processing {} input file(s)...",
        session.inputs().len()
    ));

    if let Err(err) = session.submit(spec).await {
        return report_failure(&formatter, cli.json, err);
    }

    let artifact = &mut session.artifacts_mut()[0];
    artifact.set_name(file_name(&output_path));
    tokio::fs::write(&output_path, artifact.bytes())
        .await
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    formatter.success(&format!(
        "wrote {} ({})",
        output_path.display(),
        format_file_size(artifact.size_bytes())
    ));

    if cli.json {
        let report = RunReport {
            ok: true,
            artifacts: vec![ArtifactInfo {
                name: artifact.name().to_string(),
                media_type: artifact.media_type().to_string(),
                size_bytes: artifact.size_bytes(),
                path: output_path,
            }],
            failures: Vec::new(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

const READ_WORKERS: usize = 4;

/// Read all input files into memory, a few concurrently, preserving argument
/// order in the returned batch.
async fn load_candidates(
    paths: Vec<PathBuf>,
    formatter: &OutputFormatter,
) -> Result<Vec<RawFile>> {
    let loaded: Vec<(PathBuf, Vec<u8>)> = stream::iter(paths)
        .map(|path| async move {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok::<_, anyhow::Error>((path, bytes))
        })
        .buffered(READ_WORKERS)
        .try_collect()
        .await?;

    let mut candidates = Vec::with_capacity(loaded.len());
    for (path, bytes) in loaded {
        let media_type = media_type_for(&path);
        if media_type != crate::config::PDF_MEDIA_TYPE {
            formatter.warning(&format!("{} does not look like a PDF file", path.display()));
        }
        formatter.debug(&format!(
            "read {} ({})",
            path.display(),
            format_file_size(bytes.len() as u64)
        ));
        candidates.push(RawFile {
            name: file_name(&path),
            media_type: media_type.to_string(),
            bytes,
        });
    }
    Ok(candidates)
}

fn report_failure(formatter: &OutputFormatter, json: bool, err: SessionError) -> Result<()> {
    if let SessionError::RunFailed { failures } = err {
        for failure in &failures {
            formatter.error(&failure.as_error().to_string());
        }
        if json {
            let report = RunReport {
                ok: false,
                artifacts: Vec::new(),
                failures,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            bail!("merge aborted; no output was written");
        }
        bail!("merge aborted; fix or remove the failed inputs and re-run");
    }

    formatter.error(&err.to_string());
    Err(err.into())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn media_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => crate::config::PDF_MEDIA_TYPE,
        _ => "application/octet-stream",
    }
}
