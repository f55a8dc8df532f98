// src/compiler/workspace.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{LatexError, Result};

/// Extensions of every artifact pdflatex is known to leave behind for one
/// input file.
const ARTIFACT_EXTENSIONS: &[&str] = &["tex", "pdf", "log", "aux", "dvi", "out", "toc"];

/// An isolated, uniquely named working area for one compilation request.
///
/// The workspace owns every file created under its base name and removes
/// them when dropped, so cleanup runs on every exit path, including early
/// returns and unwinding.
#[derive(Debug)]
pub struct ScratchWorkspace {
    root: PathBuf,
    basename: String,
}

impl ScratchWorkspace {
    /// Reserves a unique base name under `root`, creating `root` if absent.
    /// No files are written; the name is only reserved.
    pub fn allocate(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|e| {
            LatexError::Resource(format!(
                "cannot create scratch root {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            basename: unique_basename("latex"),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn tex_path(&self) -> PathBuf {
        self.artifact("tex")
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.artifact("pdf")
    }

    pub fn log_path(&self) -> PathBuf {
        self.artifact("log")
    }

    fn artifact(&self, ext: &str) -> PathBuf {
        self.root.join(format!("{}.{}", self.basename, ext))
    }

    /// Best-effort removal of every known artifact. Missing files are not an
    /// error; other failures are logged and never surfaced to the caller.
    pub fn remove_artifacts(&self) {
        for ext in ARTIFACT_EXTENSIONS {
            let path = self.artifact(ext);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => log::warn!("Failed to remove scratch file {}: {}", path.display(), e),
            }
        }
    }
}

impl Drop for ScratchWorkspace {
    fn drop(&mut self) {
        self.remove_artifacts();
    }
}

/// Base name built from a coarse timestamp and a bounded random suffix.
/// Collision between two requests in the same millisecond tick is improbable
/// but not ruled out; the original service accepted the same risk.
fn unique_basename(prefix: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let random = uuid::Uuid::new_v4().as_u128() % 10_000;
    format!("{}_{}_{}", prefix, timestamp, random)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_creates_root_and_reserves_name() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("scratch");

        let workspace = ScratchWorkspace::allocate(&root).unwrap();

        assert!(root.is_dir());
        assert!(workspace.basename().starts_with("latex_"));
        assert_eq!(workspace.tex_path().parent().unwrap(), root);
        // Allocation reserves a name only; nothing is written yet.
        assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn test_allocate_fails_on_unusable_root() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let result = ScratchWorkspace::allocate(&blocker.join("scratch"));

        assert!(matches!(result, Err(LatexError::Resource(_))));
    }

    #[test]
    fn test_two_allocations_do_not_share_a_basename() {
        let tmp = tempfile::tempdir().unwrap();

        let a = ScratchWorkspace::allocate(tmp.path()).unwrap();
        let b = ScratchWorkspace::allocate(tmp.path()).unwrap();

        assert_ne!(a.basename(), b.basename());
    }

    #[test]
    fn test_drop_removes_all_artifacts() {
        let tmp = tempfile::tempdir().unwrap();

        {
            let workspace = ScratchWorkspace::allocate(tmp.path()).unwrap();
            fs::write(workspace.tex_path(), b"\\documentclass{article}").unwrap();
            fs::write(workspace.pdf_path(), b"%PDF-1.4").unwrap();
            fs::write(workspace.log_path(), b"This is pdfTeX").unwrap();
        }

        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_cleanup_tolerates_missing_files() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = ScratchWorkspace::allocate(tmp.path()).unwrap();

        // Nothing was ever written; removal must not fail or panic.
        workspace.remove_artifacts();
    }
}
