//! Rendering options and configuration.

use serde::{Deserialize, Serialize};

/// Default name of the directory next to the template holding its assets.
pub const DEFAULT_RESOURCES_DIR: &str = "resources";

/// Options for binding a profile into a template.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// HTML-escape every substituted value
    pub autoescape: bool,

    /// Directory (relative to the template) exposed as `resources_path`
    pub resources_dir: String,

    /// Page geometry exposed to the template as `page`
    pub page: PageLayout,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable HTML auto-escaping.
    pub fn with_autoescape(mut self, autoescape: bool) -> Self {
        self.autoescape = autoescape;
        self
    }

    /// Set the resources directory name.
    pub fn with_resources_dir(mut self, dir: impl Into<String>) -> Self {
        self.resources_dir = dir.into();
        self
    }

    /// Set the page layout.
    pub fn with_page(mut self, page: PageLayout) -> Self {
        self.page = page;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            autoescape: false,
            resources_dir: DEFAULT_RESOURCES_DIR.to_string(),
            page: PageLayout::default(),
        }
    }
}

/// Fixed page geometry for print output.
///
/// Values are CSS: `size` goes into `@page { size: ... }` and `margin`
/// into `@page { margin: ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    /// CSS page size (e.g. "A4", "letter")
    pub size: String,

    /// CSS page margin
    pub margin: String,
}

impl PageLayout {
    /// ISO A4 with no margins.
    pub fn a4() -> Self {
        Self {
            size: "A4".to_string(),
            margin: "0".to_string(),
        }
    }

    /// US Letter with no margins.
    pub fn letter() -> Self {
        Self {
            size: "letter".to_string(),
            margin: "0".to_string(),
        }
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}
