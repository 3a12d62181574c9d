//! Output placement and PDF export.
//!
//! Export happens in two steps. [`ExportTarget::resolve`] works out where
//! the HTML and PDF go without touching the filesystem. [`export`] then
//! creates the directories, writes the HTML, and (if requested) has a
//! headless browser print it to PDF.
//!
//! Failures are terminal and never retried. The HTML file is written
//! before the PDF step starts and is left in place if the PDF step fails.

mod browser;
mod engine;
mod metadata;

pub use browser::{HeadlessBrowser, PdfRenderer};
pub use engine::{search_path_from, EngineLocator, DEFAULT_CANDIDATES};
pub use metadata::stamp_document_info;

use crate::error::{Error, Result};
use crate::model::{output_stem, ProfileDocument};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default directory for PDFs when `--pdf` is given without a path.
pub const DEFAULT_EXPORT_DIR: &str = "export";

/// Directory under the system temp dir for HTML without `-o`.
pub const SCRATCH_DIR_NAME: &str = "cv_generation";

/// Default limit on a single browser run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Options for exporting rendered markup.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory for default-named PDFs
    pub export_dir: PathBuf,

    /// Directory for HTML output when no explicit path is given
    pub scratch_dir: PathBuf,

    /// Explicit engine executable; skips discovery
    pub engine: Option<PathBuf>,

    /// Program names probed during discovery
    pub candidates: Vec<String>,

    /// Directories probed during discovery (`None` = process `PATH`)
    pub search_path: Option<Vec<PathBuf>>,

    /// Limit on the browser run (`None` = wait indefinitely)
    pub timeout: Option<Duration>,

    /// Write profile metadata into the PDF
    pub embed_metadata: bool,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default PDF directory.
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Set the scratch directory for default HTML output.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Use a specific engine executable instead of probing.
    pub fn with_engine(mut self, engine: impl Into<PathBuf>) -> Self {
        self.engine = Some(engine.into());
        self
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

    /// Probe these directories instead of `PATH`.
    pub fn with_search_path(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_path = Some(dirs);
        self
    }

    /// Set the browser timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable PDF metadata stamping.
    pub fn with_metadata(mut self, embed: bool) -> Self {
        self.embed_metadata = embed;
        self
    }

    /// Build the locator used when no explicit engine is set.
    pub fn locator(&self) -> EngineLocator {
        let locator = match &self.search_path {
            Some(dirs) => EngineLocator::new(dirs.clone()),
            None => EngineLocator::from_env(),
        };
        locator.with_candidates(self.candidates.iter().cloned())
    }

    /// The explicit engine, or the first one found on the search path.
    pub fn resolve_engine(&self) -> Result<PathBuf> {
        match &self.engine {
            Some(engine) => Ok(engine.clone()),
            None => self.locator().find_available_engine(),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            scratch_dir: std::env::temp_dir().join(SCRATCH_DIR_NAME),
            engine: None,
            candidates: DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            search_path: None,
            timeout: Some(DEFAULT_TIMEOUT),
            embed_metadata: true,
        }
    }
}

/// Where a requested PDF should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfOutput {
    /// `<export-dir>/<data-stem>.pdf`
    Default,
    /// Exactly this path
    Path(PathBuf),
}

impl From<Option<PathBuf>> for PdfOutput {
    fn from(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => PdfOutput::Path(path),
            None => PdfOutput::Default,
        }
    }
}

/// Resolved output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    /// HTML output path
    pub html: PathBuf,

    /// PDF output path, if export was requested
    pub pdf: Option<PathBuf>,
}

impl ExportTarget {
    /// Compute output paths from the data path and the requested outputs.
    ///
    /// This is a pure function of its arguments; nothing is created.
    ///
    /// # Example
    ///
    /// ```
    /// use std::path::{Path, PathBuf};
    /// use vitae::export::{ExportOptions, ExportTarget, PdfOutput};
    ///
    /// let options = ExportOptions::new()
    ///     .with_export_dir("out")
    ///     .with_scratch_dir("/tmp/cv");
    /// let target = ExportTarget::resolve(
    ///     Path::new("data/jane.yaml"),
    ///     None,
    ///     Some(&PdfOutput::Default),
    ///     &options,
    /// );
    /// assert_eq!(target.html, PathBuf::from("/tmp/cv/jane.html"));
    /// assert_eq!(target.pdf, Some(PathBuf::from("out/jane.pdf")));
    /// ```
    pub fn resolve(
        data: &Path,
        output: Option<&Path>,
        pdf: Option<&PdfOutput>,
        options: &ExportOptions,
    ) -> Self {
        let stem = output_stem(data);

        let html = match output {
            Some(path) => path.to_path_buf(),
            None => options.scratch_dir.join(format!("{}.html", stem)),
        };

        let pdf = pdf.map(|request| match request {
            PdfOutput::Path(path) => path.clone(),
            PdfOutput::Default => options.export_dir.join(format!("{}.pdf", stem)),
        });

        Self { html, pdf }
    }

    /// Create the parent directories of every output path.
    pub fn prepare(&self) -> Result<()> {
        create_parent(&self.html)?;
        if let Some(pdf) = &self.pdf {
            create_parent(pdf)?;
        }
        Ok(())
    }
}

/// Report of what a run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// HTML file written
    pub html: PathBuf,

    /// PDF file written, if requested
    pub pdf: Option<PathBuf>,
}

/// Write rendered markup, overwriting any existing file.
pub fn write_html(path: &Path, markup: &str) -> Result<()> {
    create_parent(path)?;
    fs::write(path, markup).map_err(|e| Error::write(path, e))?;
    log::info!("Wrote {} bytes of HTML to {}", markup.len(), path.display());
    Ok(())
}

/// Convert an HTML file to PDF with the configured (or discovered) engine.
pub fn export_pdf(
    html: &Path,
    pdf: &Path,
    profile: &ProfileDocument,
    options: &ExportOptions,
) -> Result<()> {
    let engine = options.resolve_engine()?;
    let browser = HeadlessBrowser::new(engine).with_timeout(options.timeout);
    export_pdf_with(&browser, html, pdf, profile, options)
}

/// Convert an HTML file to PDF with a specific renderer.
///
/// Metadata stamping problems are logged and do not fail the export.
pub fn export_pdf_with(
    renderer: &dyn PdfRenderer,
    html: &Path,
    pdf: &Path,
    profile: &ProfileDocument,
    options: &ExportOptions,
) -> Result<()> {
    create_parent(pdf)?;
    log::info!(
        "Printing {} to {} with {}",
        html.display(),
        pdf.display(),
        renderer.name()
    );
    renderer.render_pdf(html, pdf)?;

    if options.embed_metadata {
        if let Err(e) = stamp_document_info(pdf, &profile.document_info()) {
            log::warn!("Could not add PDF metadata to {}: {}", pdf.display(), e);
        }
    }

    Ok(())
}

/// Write the HTML and, if the target asks for it, the PDF.
pub fn export(
    markup: &str,
    profile: &ProfileDocument,
    target: &ExportTarget,
    options: &ExportOptions,
) -> Result<ExportReport> {
    target.prepare()?;
    write_html(&target.html, markup)?;

    if let Some(pdf) = &target.pdf {
        export_pdf(&target.html, pdf, profile, options)?;
    }

    Ok(ExportReport {
        html: target.html.clone(),
        pdf: target.pdf.clone(),
    })
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| Error::write(dir, e))
        }
        _ => Ok(()),
    }
}
