//! Printing HTML to PDF with a headless browser subprocess.

use crate::error::{Error, Result};
use crate::render::file_uri;
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running engine is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Converts an HTML file into a PDF file.
///
/// Implement this trait to plug in a different rendering backend.
pub trait PdfRenderer {
    /// Name of the renderer, used in diagnostics.
    fn name(&self) -> &str;

    /// Render `html` to a PDF at `pdf`, overwriting it.
    fn render_pdf(&self, html: &Path, pdf: &Path) -> Result<()>;
}

/// A Chromium-family browser run in headless print mode.
///
/// Page geometry comes from the document's CSS `@page` rule; the browser
/// is told to suppress its own header and footer so nothing is added
/// around it.
#[derive(Debug, Clone)]
pub struct HeadlessBrowser {
    executable: PathBuf,
    name: String,
    timeout: Option<Duration>,
}

impl HeadlessBrowser {
    /// Create a browser runner for an executable.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        let executable = executable.into();
        let name = executable
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| executable.display().to_string());
        Self {
            executable,
            name,
            timeout: None,
        }
    }

    /// Kill the browser if it runs longer than `timeout`.
    ///
    /// `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Executable path.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Configured timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Command-line arguments for printing `html` to `pdf`.
    ///
    /// Both paths must be absolute.
    pub fn print_args(html: &Path, pdf: &Path) -> Vec<OsString> {
        let mut print_to = OsString::from("--print-to-pdf=");
        print_to.push(pdf.as_os_str());

        vec![
            "--headless".into(),
            "--disable-gpu".into(),
            "--no-sandbox".into(),
            "--no-pdf-header-footer".into(),
            "--print-to-pdf-no-header".into(),
            "--run-all-compositor-stages-before-draw".into(),
            print_to,
            file_uri(html).into(),
        ]
    }

    fn failure(&self, message: impl Into<String>) -> Error {
        Error::ExportFailed {
            engine: self.executable.clone(),
            message: message.into(),
        }
    }
}

impl PdfRenderer for HeadlessBrowser {
    fn name(&self) -> &str {
        &self.name
    }

    fn render_pdf(&self, html: &Path, pdf: &Path) -> Result<()> {
        let html = absolute(html)?;
        let pdf = absolute(pdf)?;
        remove_stale(&pdf)?;
        let args = Self::print_args(&html, &pdf);
        log::info!("Running {} {:?}", self.executable.display(), args);

        let mut child = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(format!("could not start engine: {}", e)))?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match wait_with_timeout(&mut child, self.timeout)? {
            Some(status) => status,
            None => {
                // Readers are left detached: the engine's own children may
                // still hold the pipes open.
                let secs = self.timeout.map(|t| t.as_secs_f64()).unwrap_or_default();
                return Err(self.failure(format!("timed out after {:.1}s", secs)));
            }
        };

        let stdout = stdout.map(collect).unwrap_or_default();
        let stderr = stderr.map(collect).unwrap_or_default();
        log::debug!("{} exited with {}", self.name, status);

        if !status.success() {
            let diagnostic = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(self.failure(format!("{}: {}", status, diagnostic)));
        }

        let written = pdf.metadata().map(|m| m.len()).unwrap_or(0);
        if written == 0 {
            return Err(self.failure(format!(
                "engine exited successfully but wrote no PDF to {}",
                pdf.display()
            )));
        }

        Ok(())
    }
}

/// Delete a PDF left at `pdf` by an earlier run, so that only the engine's
/// own output counts as written.
fn remove_stale(pdf: &Path) -> Result<()> {
    match std::fs::remove_file(pdf) {
        Ok(()) => {
            log::debug!("Removed previous {}", pdf.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::write(pdf, e)),
    }
}

/// Wait for `child`, killing it once `timeout` elapses.
///
/// Returns `None` if the child was killed.
fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            log::warn!("Rendering engine exceeded {:?}, killing it", timeout);
            // The child may have exited between try_wait and kill.
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: thread::JoinHandle<Vec<u8>>) -> String {
    handle
        .join()
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}

/// Make a path absolute against the current directory without touching the
/// filesystem.
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
