//! `pdflatex` backend for [`DocumentCompiler`].
//!
//! Success is decided solely by the presence of `resume.pdf` in the
//! workspace after the run — pdflatex exits non-zero for recoverable
//! warnings and can exit zero without producing output, so the exit code
//! is deliberately ignored.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::compiler::{CompileOutcome, DocumentCompiler, OUTPUT_BASENAME};

const TEX_PROGRAM: &str = "pdflatex";

/// Side artifacts pdflatex leaves next to the output; purged on every run.
const AUX_EXTENSIONS: &[&str] = &["aux", "log", "out"];

/// Package-manager install recipes, tried in priority order. First manager
/// found on PATH wins; each step of its recipe must succeed.
const INSTALL_RECIPES: &[(&str, &[&[&str]])] = &[
    (
        "apt-get",
        &[
            &["apt-get", "update"],
            &[
                "apt-get",
                "install",
                "-y",
                "texlive-latex-base",
                "texlive-latex-extra",
            ],
        ],
    ),
    ("dnf", &[&["dnf", "install", "-y", "texlive-scheme-basic"]]),
    (
        "pacman",
        &[&["pacman", "-S", "--noconfirm", "texlive-core"]],
    ),
];

/// Compiles LaTeX with the `pdflatex` binary found on PATH.
#[derive(Clone)]
pub struct PdflatexCompiler {
    /// Executable to invoke. `pdflatex` in production; tests point this at
    /// stub scripts to exercise the pipeline without a TeX distribution.
    program: String,
    auto_install: bool,
    timeout: Duration,
}

impl PdflatexCompiler {
    pub fn new(auto_install: bool, timeout: Duration) -> Self {
        Self {
            program: TEX_PROGRAM.to_string(),
            auto_install,
            timeout,
        }
    }

    pub fn with_program(program: impl Into<String>, auto_install: bool, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            auto_install,
            timeout,
        }
    }

    /// Checks the tool is on PATH, attempting a one-shot install if allowed.
    /// Resolved fresh on every request; availability is not cached.
    async fn ensure_tool(&self) -> bool {
        if which::which(&self.program).is_ok() {
            return true;
        }
        if !self.auto_install {
            return false;
        }
        warn!("{} not found, attempting best-effort install", self.program);
        if !attempt_install().await {
            return false;
        }
        which::which(&self.program).is_ok()
    }

    /// The fallible pipeline body. Any `Err` is converted to a `Failure`
    /// diagnostic by [`DocumentCompiler::compile`].
    async fn try_compile(&self, markup: &str) -> anyhow::Result<CompileOutcome> {
        if !self.ensure_tool().await {
            return Ok(CompileOutcome::Failure {
                diagnostics: format!(
                    "LaTeX ({}) is not installed and could not be installed automatically. \
                     Please install a LaTeX distribution and try again.",
                    self.program
                ),
            });
        }

        let workspace = TempDir::new()?;
        let ws = workspace.path();
        let source_path = ws.join(format!("{OUTPUT_BASENAME}.tex"));
        let pdf_path = ws.join(format!("{OUTPUT_BASENAME}.pdf"));

        tokio::fs::write(&source_path, markup).await?;

        debug!("Invoking {} in {}", self.program, ws.display());
        let invocation = Command::new(&self.program)
            .arg("-interaction=nonstopmode")
            .arg("-output-directory")
            .arg(ws)
            .arg(format!("{OUTPUT_BASENAME}.tex"))
            .current_dir(ws)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, invocation).await {
            Ok(result) => result?,
            Err(_) => {
                return Ok(CompileOutcome::Failure {
                    diagnostics: format!(
                        "LaTeX compilation timed out after {}s",
                        self.timeout.as_secs()
                    ),
                });
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        // Exit code is ignored on purpose: only the PDF's existence counts.
        if tokio::fs::metadata(&pdf_path).await.is_err() {
            let log = read_tool_log(ws).await;
            return Ok(CompileOutcome::Failure {
                diagnostics: build_diagnostics(&stderr, &log),
            });
        }

        purge_auxiliary(ws).await;

        // The workspace holds the PDF, so it must outlive this call. The
        // caller deletes it when disposing of the document.
        let kept = workspace.keep();
        info!("Compiled PDF at {}", pdf_path.display());
        Ok(CompileOutcome::Success {
            pdf_path: kept.join(format!("{OUTPUT_BASENAME}.pdf")),
            workspace: kept,
        })
    }
}

#[async_trait]
impl DocumentCompiler for PdflatexCompiler {
    async fn compile(&self, markup: &str) -> CompileOutcome {
        match self.try_compile(markup).await {
            Ok(outcome) => outcome,
            Err(e) => CompileOutcome::Failure {
                diagnostics: format!("An error occurred during PDF generation: {e}"),
            },
        }
    }
}

/// Reads the compiler's own log artifact, if it wrote one.
async fn read_tool_log(workspace: &Path) -> String {
    tokio::fs::read_to_string(workspace.join(format!("{OUTPUT_BASENAME}.log")))
        .await
        .unwrap_or_default()
}

/// Concatenates stderr and the tool log into one diagnostic string.
fn build_diagnostics(stderr: &str, log: &str) -> String {
    let mut msg = String::from("Failed to generate PDF. LaTeX compilation failed.\n\n");
    if !stderr.is_empty() {
        msg.push_str(&format!("Error output:\n{stderr}\n\n"));
    }
    if !log.is_empty() {
        msg.push_str(&format!("LaTeX log:\n{log}"));
    }
    msg
}

/// Removes the transient source file and known auxiliary artifacts from a
/// workspace. Idempotent: missing files are not an error.
pub async fn purge_auxiliary(workspace: &Path) {
    let mut targets: Vec<PathBuf> = vec![workspace.join(format!("{OUTPUT_BASENAME}.tex"))];
    targets.extend(
        AUX_EXTENSIONS
            .iter()
            .map(|ext| workspace.join(format!("{OUTPUT_BASENAME}.{ext}"))),
    );

    for path in targets {
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {e}", path.display()),
        }
    }
}

/// Runs the install recipe of the first known package manager on PATH.
/// Returns false when no manager is present or any step fails.
async fn attempt_install() -> bool {
    let Some((manager, steps)) = INSTALL_RECIPES
        .iter()
        .find(|(manager, _)| which::which(manager).is_ok())
    else {
        warn!("No known package manager found; cannot install LaTeX");
        return false;
    };

    info!("Installing LaTeX via {manager}");
    for step in steps.iter() {
        let status = Command::new(step[0])
            .args(&step[1..])
            .stdin(Stdio::null())
            .status()
            .await;
        match status {
            Ok(s) if s.success() => {}
            Ok(s) => {
                warn!("{manager} step {:?} exited with {s}", step);
                return false;
            }
            Err(e) => {
                warn!("{manager} step {:?} failed to spawn: {e}", step);
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::os::unix::fs::PermissionsExt;

    /// Writes an executable stub script standing in for pdflatex. The stub
    /// sees the real argument shape: `-interaction=nonstopmode
    /// -output-directory <ws> resume.tex`, so `$3` is the workspace.
    fn write_stub(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-pdflatex");
        let script = format!("#!/bin/sh\n{body}\n");
        std::fs::write(&path, script).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn stub_compiler(program: &Path) -> PdflatexCompiler {
        PdflatexCompiler::with_program(
            program.to_str().unwrap(),
            false,
            Duration::from_secs(10),
        )
    }

    #[tokio::test]
    async fn test_success_keeps_pdf_and_purges_transients() {
        let stub_dir = TempDir::new().unwrap();
        let stub = write_stub(
            stub_dir.path(),
            "printf '%%PDF-1.4 stub' > \"$3/resume.pdf\"\nprintf 'aux' > \"$3/resume.aux\"",
        );
        let compiler = stub_compiler(&stub);

        let outcome = compiler.compile("\\documentclass{article}").await;
        let CompileOutcome::Success {
            pdf_path,
            workspace,
        } = outcome
        else {
            panic!("expected success");
        };

        let pdf = std::fs::read(&pdf_path).unwrap();
        assert!(!pdf.is_empty());
        assert!(pdf_path.ends_with("resume.pdf"));

        // Transient files are gone, only the PDF remains.
        assert!(!workspace.join("resume.tex").exists());
        assert!(!workspace.join("resume.aux").exists());
        assert!(!workspace.join("resume.log").exists());
        assert!(!workspace.join("resume.out").exists());

        std::fs::remove_dir_all(&workspace).unwrap();
    }

    #[tokio::test]
    async fn test_failure_concatenates_stderr_and_log() {
        let stub_dir = TempDir::new().unwrap();
        let stub = write_stub(
            stub_dir.path(),
            "echo '! LaTeX Error: File bogus.cls not found.' >&2\n\
             printf 'Error: missing class' > \"$3/resume.log\"\n\
             exit 1",
        );
        let compiler = stub_compiler(&stub);

        let outcome = compiler.compile("\\documentclass{bogus}").await;
        let CompileOutcome::Failure { diagnostics } = outcome else {
            panic!("expected failure");
        };

        assert!(diagnostics.contains("LaTeX Error"));
        assert!(diagnostics.contains("Error: missing class"));
    }

    #[tokio::test]
    async fn test_exit_code_is_ignored_when_pdf_exists() {
        let stub_dir = TempDir::new().unwrap();
        let stub = write_stub(
            stub_dir.path(),
            "printf '%%PDF-1.4' > \"$3/resume.pdf\"\nexit 1",
        );
        let compiler = stub_compiler(&stub);

        let outcome = compiler.compile("\\documentclass{article}").await;
        let CompileOutcome::Success { workspace, .. } = outcome else {
            panic!("expected success despite non-zero exit");
        };
        std::fs::remove_dir_all(&workspace).unwrap();
    }

    #[tokio::test]
    async fn test_missing_tool_fails_without_compiling() {
        let compiler = PdflatexCompiler::with_program(
            "githire-no-such-compiler",
            false,
            Duration::from_secs(1),
        );

        let outcome = compiler.compile("\\documentclass{article}").await;
        let CompileOutcome::Failure { diagnostics } = outcome else {
            panic!("expected failure");
        };
        assert!(diagnostics.contains("not installed"));
    }

    #[tokio::test]
    async fn test_timeout_is_a_failure() {
        let stub_dir = TempDir::new().unwrap();
        let stub = write_stub(stub_dir.path(), "sleep 5");
        let compiler = PdflatexCompiler::with_program(
            stub.to_str().unwrap(),
            false,
            Duration::from_millis(200),
        );

        let outcome = compiler.compile("\\documentclass{article}").await;
        let CompileOutcome::Failure { diagnostics } = outcome else {
            panic!("expected failure");
        };
        assert!(diagnostics.contains("timed out"));
    }

    #[tokio::test]
    async fn test_concurrent_compiles_use_isolated_workspaces() {
        let stub_dir = TempDir::new().unwrap();
        // Echo the source back as the "PDF" so cross-contamination would show.
        let stub = write_stub(stub_dir.path(), "cat \"$3/resume.tex\" > \"$3/resume.pdf\"");
        let compiler = stub_compiler(&stub);

        let (a, b) = tokio::join!(compiler.compile("alpha"), compiler.compile("beta"));

        let CompileOutcome::Success {
            pdf_path: path_a,
            workspace: ws_a,
        } = a
        else {
            panic!("expected success for alpha");
        };
        let CompileOutcome::Success {
            pdf_path: path_b,
            workspace: ws_b,
        } = b
        else {
            panic!("expected success for beta");
        };

        assert_ne!(ws_a, ws_b);
        assert_eq!(std::fs::read_to_string(&path_a).unwrap(), "alpha");
        assert_eq!(std::fs::read_to_string(&path_b).unwrap(), "beta");

        std::fs::remove_dir_all(&ws_a).unwrap();
        std::fs::remove_dir_all(&ws_b).unwrap();
    }

    #[tokio::test]
    async fn test_purge_auxiliary_is_idempotent() {
        let ws = TempDir::new().unwrap();
        std::fs::write(ws.path().join("resume.aux"), "aux").unwrap();

        purge_auxiliary(ws.path()).await;
        // Second pass on an already-clean workspace must not error.
        purge_auxiliary(ws.path()).await;

        assert!(!ws.path().join("resume.aux").exists());
    }
}
