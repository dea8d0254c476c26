//! Document compilation — turns LaTeX markup into a PDF via an external
//! compiler binary.
//!
//! The [`DocumentCompiler`] trait is the seam: callers never care which
//! typesetting tool sits behind it, so alternate backends (tectonic, a pure
//! library renderer) can be swapped in without touching the handlers.

pub mod pdflatex;

use std::path::PathBuf;

use async_trait::async_trait;

/// Base name shared by the source, output, and log files of one compilation:
/// `resume.tex` in, `resume.pdf` out, `resume.log` from the tool.
pub const OUTPUT_BASENAME: &str = "resume";

/// Outcome of one compilation request. Exactly one variant is populated;
/// every failure mode (missing tool, compile error, unexpected I/O fault,
/// timeout) is normalized to `Failure` with human-readable diagnostics.
#[derive(Debug)]
pub enum CompileOutcome {
    Success {
        /// Path to the produced PDF, inside `workspace`.
        pdf_path: PathBuf,
        /// The kept workspace directory. The caller owns its disposal.
        workspace: PathBuf,
    },
    Failure {
        diagnostics: String,
    },
}

/// A markup-to-PDF compiler backend.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    /// Compiles `markup` into a PDF inside a fresh, isolated workspace.
    ///
    /// Never panics and never returns an `Err` to the caller: all faults are
    /// folded into [`CompileOutcome::Failure`]. On success the workspace
    /// directory survives (it holds the PDF) and the caller is responsible
    /// for deleting it once the document is no longer needed.
    async fn compile(&self, markup: &str) -> CompileOutcome;
}
