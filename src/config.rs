// src/config.rs
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{LatexError, Result};

/// Configuration for the typesetting-engine subprocess.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Root directory for per-request scratch workspaces. Created lazily on
    /// the first allocation.
    pub scratch_root: PathBuf,
    /// Engine executable, resolved through PATH when not absolute.
    pub engine_bin: String,
    /// Execution budget for one engine run; the process group is killed when
    /// it is exceeded.
    pub timeout: Duration,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            scratch_root: std::env::temp_dir().join("texserve"),
            engine_bin: "pdflatex".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// High-level application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Upper bound on the source length accepted via the GET query form.
    pub max_source_len: usize,
    pub compiler: CompilerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| LatexError::Config(format!("PORT must be a port number, got '{}'", raw)))?,
            Err(_) => 3000,
        };

        let max_source_len = match std::env::var("LATEX_MAX_SOURCE_LEN") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| {
                LatexError::Config(format!("LATEX_MAX_SOURCE_LEN must be a byte count, got '{}'", raw))
            })?,
            Err(_) => 10_000,
        };

        let mut compiler = CompilerConfig::default();

        if let Ok(dir) = std::env::var("LATEX_SCRATCH_DIR") {
            compiler.scratch_root = PathBuf::from(dir);
        }
        if let Ok(bin) = std::env::var("LATEX_ENGINE_BIN") {
            compiler.engine_bin = bin;
        }
        if let Ok(raw) = std::env::var("LATEX_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                LatexError::Config(format!("LATEX_TIMEOUT_SECS must be a number of seconds, got '{}'", raw))
            })?;
            if secs == 0 {
                return Err(LatexError::Config(
                    "LATEX_TIMEOUT_SECS must be at least 1".to_string(),
                ));
            }
            compiler.timeout = Duration::from_secs(secs);
        }

        Ok(AppConfig { port, max_source_len, compiler })
    }
}
