//! Locating a headless browser on the search path.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Browser executables probed for PDF export, in priority order.
pub const DEFAULT_CANDIDATES: &[&str] = &["chromium", "chromium-browser", "google-chrome", "chrome"];

/// Finds the first available rendering engine among a list of candidate
/// program names.
///
/// The search path is explicit so discovery can be exercised against a
/// fake directory list instead of the process environment.
///
/// # Example
///
/// ```no_run
/// use vitae::export::EngineLocator;
///
/// let engine = EngineLocator::from_env().find_available_engine()?;
/// println!("Using {}", engine.display());
/// # Ok::<(), vitae::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct EngineLocator {
    candidates: Vec<String>,
    search_path: Vec<PathBuf>,
}

impl EngineLocator {
    /// Create a locator over an explicit list of directories.
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            search_path,
        }
    }

    /// Create a locator over the process `PATH`.
    pub fn from_env() -> Self {
        Self::new(search_path_from(std::env::var_os("PATH")))
    }

    /// Replace the candidate program names.
    pub fn with_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Candidate program names, in probe order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Directories searched, in order.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Return the path of the first candidate found.
    ///
    /// Candidates are tried in order; for each candidate every directory is
    /// checked before moving on to the next name.
    ///
    /// # Errors
    ///
    /// [`Error::EngineNotFound`] listing the probed names.
    pub fn find_available_engine(&self) -> Result<PathBuf> {
        for name in &self.candidates {
            if let Some(path) = self.find_program(name) {
                log::debug!("Found rendering engine '{}' at {}", name, path.display());
                return Ok(path);
            }
            log::debug!("Rendering engine '{}' not on search path", name);
        }

        Err(Error::EngineNotFound {
            candidates: self.candidates.clone(),
        })
    }

    fn find_program(&self, name: &str) -> Option<PathBuf> {
        let file_name = program_file_name(name);
        self.search_path
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| is_executable(candidate))
    }
}

impl Default for EngineLocator {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Split a `PATH`-style value into directories, dropping empty entries.
pub fn search_path_from(value: Option<OsString>) -> Vec<PathBuf> {
    value
        .map(|v| {
            std::env::split_paths(&v)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn program_file_name(name: &str) -> String {
    let suffix = std::env::consts::EXE_SUFFIX;
    if suffix.is_empty() || name.ends_with(suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
