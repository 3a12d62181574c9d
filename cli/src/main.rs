//! vitae CLI - render YAML resumes to HTML and PDF

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use vitae::export::{self, ExportOptions, ExportTarget, PdfOutput};
use vitae::{load_profile, load_template, RenderOptions};

#[derive(Parser)]
#[command(name = "vitae")]
#[command(version)]
#[command(about = "Generate HTML resumes from YAML data and templates", long_about = None)]
#[command(after_help = "Examples:
  vitae -t template.html -d resume.yaml -o output.html
  vitae -t template.html -d resume.yaml -o output.html --pdf output.pdf
  vitae -t template.html -d resume.yaml --pdf")]
struct Cli {
    /// Path to HTML template file
    #[arg(short, long, value_name = "FILE")]
    template: PathBuf,

    /// Path to YAML data file
    #[arg(short, long, value_name = "FILE")]
    data: PathBuf,

    /// Path to output HTML file (default: temp folder)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Generate PDF (requires Chromium or Chrome); optionally specify the output path
    /// (default: <export-dir>/<data-name>.pdf)
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pdf: Option<Option<PathBuf>>,

    /// Directory for PDFs written without an explicit path
    #[arg(long, value_name = "DIR", env = "VITAE_EXPORT_DIR", default_value = export::DEFAULT_EXPORT_DIR)]
    export_dir: PathBuf,

    /// Browser executable to use instead of searching PATH
    #[arg(long, value_name = "EXE", env = "VITAE_BROWSER")]
    browser: Option<PathBuf>,

    /// Seconds to wait for the browser (0 = no limit)
    #[arg(long, value_name = "SECS", env = "VITAE_PDF_TIMEOUT", default_value_t = export::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Do not write profile metadata into the PDF
    #[arg(long, env = "VITAE_NO_METADATA")]
    no_metadata: bool,

    /// HTML-escape values from the data file
    #[arg(long)]
    autoescape: bool,
}

impl Cli {
    fn export_options(&self) -> ExportOptions {
        let timeout = (self.timeout > 0).then(|| Duration::from_secs(self.timeout));
        let mut options = ExportOptions::new()
            .with_export_dir(&self.export_dir)
            .with_timeout(timeout)
            .with_metadata(!self.no_metadata);
        if let Some(browser) = &self.browser {
            options = options.with_engine(browser);
        }
        options
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions::new().with_autoescape(self.autoescape)
    }

    fn pdf_output(&self) -> Option<PdfOutput> {
        self.pdf.clone().map(PdfOutput::from)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{} [{}]: {}", "Error".red().bold(), e.stage(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> vitae::Result<()> {
    let profile = load_profile(&cli.data)?;
    let template = load_template(&cli.template)?;
    log::info!(
        "Rendering {} for {} ({} experience, {} education entries)",
        template.name(),
        profile.name().unwrap_or_else(|| profile.stem()),
        profile.section_len("experience"),
        profile.section_len("education"),
    );

    let markup = vitae::render::render(&profile, &template, &cli.render_options())?;

    let options = cli.export_options();
    let pdf = cli.pdf_output();
    let target = ExportTarget::resolve(&cli.data, cli.output.as_deref(), pdf.as_ref(), &options);
    target.prepare()?;

    export::write_html(&target.html, &markup)?;
    println!("{} {}", "HTML saved to:".green(), target.html.display());

    if let Some(pdf_path) = &target.pdf {
        cmd_pdf(&target.html, pdf_path, &profile, &options)?;
    }

    Ok(())
}

fn cmd_pdf(
    html: &Path,
    pdf: &Path,
    profile: &vitae::ProfileDocument,
    options: &ExportOptions,
) -> vitae::Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Converting to PDF...");

    let result = export::export_pdf(html, pdf, profile, options);
    pb.finish_and_clear();
    result?;

    println!("{} {}", "PDF saved to:".green(), pdf.display());
    Ok(())
}
