//! # vitae
//!
//! Resume generation from YAML profiles and Jinja-style HTML templates.
//!
//! A run has three stages, executed in order:
//!
//! 1. **Load** a YAML profile and a template ([`load_profile`], [`load_template`])
//! 2. **Render** the profile through the template ([`render()`])
//! 3. **Export** the markup to HTML and optionally to PDF via a headless
//!    browser ([`export::export`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use vitae::{PdfOutput, Vitae};
//!
//! fn main() -> vitae::Result<()> {
//!     let report = Vitae::new()
//!         .with_output("out/cv.html")
//!         .with_pdf(PdfOutput::Default)
//!         .generate("templates/cv.html", "data/jane.yaml")?;
//!
//!     println!("HTML: {}", report.html.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Templates
//!
//! Templates use [Tera](https://keats.github.io/tera/) syntax. Every
//! top-level profile key is a variable; `resources_path` (a `file://` URI of
//! the template's `resources/` directory) and `page` (`page.size`,
//! `page.margin`) are added. Referencing an undefined variable is an
//! error; guard optional sections with `{% if section %}`.

pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result, Stage};
pub use export::{ExportOptions, ExportReport, ExportTarget, PdfOutput};
pub use loader::{load_profile, load_template, parse_profile_str};
pub use model::{DocumentInfo, ProfileDocument, TemplateHandle};
pub use render::{PageLayout, RenderOptions};

use std::path::{Path, PathBuf};

/// Render a profile through a template with default options.
pub fn render(profile: &ProfileDocument, template: &TemplateHandle) -> Result<String> {
    render::render(profile, template, &RenderOptions::default())
}

/// Load a template and a profile from disk and render them.
///
/// # Example
///
/// ```no_run
/// let html = vitae::render_files("templates/cv.html", "data/jane.yaml")?;
/// std::fs::write("cv.html", html)?;
/// # Ok::<(), vitae::Error>(())
/// ```
pub fn render_files<T: AsRef<Path>, D: AsRef<Path>>(template: T, data: D) -> Result<String> {
    let profile = load_profile(data)?;
    let template = load_template(template)?;
    render(&profile, &template)
}

/// Builder running the whole load, render and export pipeline.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use vitae::{ExportOptions, PdfOutput, Vitae};
///
/// let report = Vitae::new()
///     .with_autoescape(true)
///     .with_pdf(PdfOutput::Path("cv.pdf".into()))
///     .with_export_options(ExportOptions::new().with_timeout(Some(Duration::from_secs(30))))
///     .generate("templates/cv.html", "data/jane.yaml")?;
/// assert!(report.pdf.is_some());
/// # Ok::<(), vitae::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Vitae {
    render_options: RenderOptions,
    export_options: ExportOptions,
    output: Option<PathBuf>,
    pdf: Option<PdfOutput>,
}

impl Vitae {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the HTML to this path instead of the scratch directory.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Also export a PDF.
    pub fn with_pdf(mut self, pdf: PdfOutput) -> Self {
        self.pdf = Some(pdf);
        self
    }

    /// Enable HTML auto-escaping.
    pub fn with_autoescape(mut self, autoescape: bool) -> Self {
        self.render_options = self.render_options.with_autoescape(autoescape);
        self
    }

    /// Set the page layout exposed to templates.
    pub fn with_page(mut self, page: PageLayout) -> Self {
        self.render_options = self.render_options.with_page(page);
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Replace the export options.
    pub fn with_export_options(mut self, options: ExportOptions) -> Self {
        self.export_options = options;
        self
    }

    /// Output paths this builder would use for `data`.
    pub fn target(&self, data: &Path) -> ExportTarget {
        ExportTarget::resolve(
            data,
            self.output.as_deref(),
            self.pdf.as_ref(),
            &self.export_options,
        )
    }

    /// Run the pipeline.
    ///
    /// If PDF export fails, the HTML file has already been written and is
    /// left in place.
    pub fn generate<T: AsRef<Path>, D: AsRef<Path>>(
        &self,
        template: T,
        data: D,
    ) -> Result<ExportReport> {
        let data = data.as_ref();
        let profile = load_profile(data)?;
        let template = load_template(template)?;
        let markup = render::render(&profile, &template, &self.render_options)?;

        let target = self.target(data);
        export::export(&markup, &profile, &target, &self.export_options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vitae_builder_default() {
        let builder = Vitae::default();
        assert!(builder.output.is_none());
        assert!(builder.pdf.is_none());
        assert!(!builder.render_options.autoescape);
    }

    #[test]
    fn test_vitae_builder_chained() {
        let builder = Vitae::new()
            .with_output("cv.html")
            .with_pdf(PdfOutput::Default)
            .with_autoescape(true)
            .with_page(PageLayout::letter());

        assert_eq!(builder.output, Some(PathBuf::from("cv.html")));
        assert_eq!(builder.pdf, Some(PdfOutput::Default));
        assert!(builder.render_options.autoescape);
        assert_eq!(builder.render_options.page.size, "letter");
    }

    #[test]
    fn test_vitae_target() {
        let builder = Vitae::new()
            .with_export_options(ExportOptions::new().with_export_dir("pdfs"))
            .with_pdf(PdfOutput::Default)
            .with_output("site/index.html");

        let target = builder.target(Path::new("people/ada.yaml"));
        assert_eq!(target.html, PathBuf::from("site/index.html"));
        assert_eq!(target.pdf, Some(PathBuf::from("pdfs/ada.pdf")));
    }

    #[test]
    fn test_render_files_missing_data() {
        let result = render_files("missing.html", "/nonexistent/data.yaml");
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
