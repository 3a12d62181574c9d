//! Profile document types.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Fallback used for the PDF title and author when the profile has no name.
const UNTITLED: &str = "Resume";

/// A parsed profile document.
///
/// The tree is kept as-is: only syntactic validity is checked when loading,
/// and whatever the template dereferences is the template's business.
/// A handful of well-known top-level fields (`name`, `title`, `meta`) have
/// typed accessors because the exporter needs them for PDF metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDocument {
    /// Path the document was read from
    source: PathBuf,

    /// Top-level mapping
    data: Map<String, Value>,
}

impl ProfileDocument {
    /// Create a profile from an already parsed mapping.
    pub fn new(source: impl Into<PathBuf>, data: Map<String, Value>) -> Self {
        Self {
            source: source.into(),
            data,
        }
    }

    /// Path the document was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// File stem of the source path, used to name default outputs.
    pub fn stem(&self) -> String {
        output_stem(&self.source)
    }

    /// Top-level mapping.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Get a top-level value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Look up a value by a path of mapping keys (e.g. `["meta", "keywords"]`).
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.data.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        Some(current)
    }

    /// Get a scalar as text. Numbers and booleans are stringified;
    /// blank strings count as missing.
    pub fn text(&self, path: &[&str]) -> Option<String> {
        let text = match self.lookup(path)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            // A list of keywords is common enough to accept.
            Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// Person's name.
    pub fn name(&self) -> Option<String> {
        self.text(&["name"])
    }

    /// Professional title / headline.
    pub fn title(&self) -> Option<String> {
        self.text(&["title"])
    }

    /// Number of entries in a collection section (list or mapping).
    ///
    /// Missing or scalar sections count as zero.
    pub fn section_len(&self, key: &str) -> usize {
        match self.data.get(key) {
            Some(Value::Array(items)) => items.len(),
            Some(Value::Object(map)) => map.len(),
            _ => 0,
        }
    }

    /// Document information to embed in an exported PDF.
    pub fn document_info(&self) -> DocumentInfo {
        let name = self.name().unwrap_or_else(|| UNTITLED.to_string());
        let title = self.title().unwrap_or_else(|| UNTITLED.to_string());
        let heading = format!("{} - {}", name, title);

        DocumentInfo {
            subject: self
                .text(&["meta", "description"])
                .unwrap_or_else(|| heading.clone()),
            keywords: self.text(&["meta", "keywords"]).unwrap_or_default(),
            title: heading,
            author: name,
            creator: format!(
                "{} {} (headless browser)",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ),
        }
    }

    /// Consume the profile, returning the top-level mapping.
    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }
}

/// File stem of a profile path, or `resume` when it has none.
pub(crate) fn output_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string())
}

/// PDF document-information entries derived from a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    /// `<name> - <title>`
    pub title: String,

    /// Person's name
    pub author: String,

    /// SEO description, or the title when absent
    pub subject: String,

    /// SEO keywords (may be empty)
    pub keywords: String,

    /// Producing application
    pub creator: String,
}
