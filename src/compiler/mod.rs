// src/compiler/mod.rs

pub mod diagnostics;
pub mod invoker;
pub mod workspace;

use crate::config::CompilerConfig;
use crate::errors::Result;

use diagnostics::{Diagnostic, ErrorCategory, classify};
use invoker::EngineRun;
use workspace::ScratchWorkspace;

/// Result of one compilation request: rendered bytes or a categorized
/// diagnostic, never both and never neither.
#[derive(Debug)]
pub enum CompileOutcome {
    Success(Vec<u8>),
    Failure(Diagnostic),
}

/// Compiles LaTeX source into PDF via an external typesetting engine.
///
/// Holds only injected configuration. Every call is request-scoped: the
/// only state shared between concurrent calls is the scratch root on disk,
/// and isolation there rests on per-request workspace names.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    config: CompilerConfig,
}

impl LatexCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Renders `source` into PDF bytes.
    ///
    /// Returns `Err` only when the scratch root itself is unusable
    /// (`LatexError::Resource`); every other failure, including engine
    /// spawn errors and timeouts, is reported as `CompileOutcome::Failure`.
    /// Callers should expect a multi-second blocking engine run and keep
    /// this off latency-sensitive paths.
    pub async fn compile(&self, source: &str) -> Result<CompileOutcome> {
        let workspace = ScratchWorkspace::allocate(&self.config.scratch_root)?;

        log::info!(
            "Compiling {} bytes of LaTeX source in workspace {}",
            source.len(),
            workspace.basename()
        );

        // The workspace guard removes every artifact when it drops, so each
        // early return below still leaves the scratch root clean.
        let run = match invoker::run(&self.config, &workspace, source).await {
            Ok(run) => run,
            Err(e) => {
                log::error!("Engine invocation failed: {}", e);
                return Ok(CompileOutcome::Failure(Diagnostic {
                    category: ErrorCategory::UnknownFailure,
                    message: format!("Failed to invoke the typesetting engine: {}", e),
                }));
            }
        };

        Ok(extract(&workspace, &run).await)
    }
}

/// Decides success by the presence of the output file, not the exit code:
/// the engine exits non-zero on recoverable warnings while still producing
/// a usable PDF. A timed-out run never yields output, even if a partial PDF
/// landed on disk before the kill.
async fn extract(workspace: &ScratchWorkspace, run: &EngineRun) -> CompileOutcome {
    if run.timed_out {
        return CompileOutcome::Failure(classify(run, None));
    }

    match tokio::fs::read(workspace.pdf_path()).await {
        Ok(bytes) => {
            log::info!(
                "Workspace {} produced a {}-byte PDF (engine exit code {:?})",
                workspace.basename(),
                bytes.len(),
                run.exit_code
            );
            CompileOutcome::Success(bytes)
        }
        Err(_) => {
            let log_text = tokio::fs::read_to_string(workspace.log_path()).await.ok();
            CompileOutcome::Failure(classify(run, log_text.as_deref()))
        }
    }
}
