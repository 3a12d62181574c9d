//! Template handle type.

use std::path::{Path, PathBuf};

/// A loaded template, ready to be bound once.
///
/// Holds the main template's source, its sibling templates (for includes
/// and inheritance), and the directory relative resources resolve against.
#[derive(Debug, Clone)]
pub struct TemplateHandle {
    name: String,
    source: String,
    base_dir: PathBuf,
    siblings: Vec<(String, String)>,
}

impl TemplateHandle {
    /// Create a handle for a single template with no siblings.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            base_dir: base_dir.into(),
            siblings: Vec::new(),
        }
    }

    /// Attach sibling templates as `(name, source)` pairs.
    pub fn with_siblings(mut self, siblings: Vec<(String, String)>) -> Self {
        self.siblings = siblings;
        self
    }

    /// Template name (its file name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Template source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Absolute directory containing the template.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Sibling templates registered alongside the main one.
    pub fn siblings(&self) -> &[(String, String)] {
        &self.siblings
    }

    /// Directory holding the template's stylesheets and images.
    pub fn resources_dir(&self, dir_name: &str) -> PathBuf {
        self.base_dir.join(dir_name)
    }
}
