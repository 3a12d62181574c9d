//! End-to-end tests for the vitae binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../tests/fixtures")
}

/// Run the binary with a controlled environment.
fn vitae(args: &[&str], path_dirs: &[&Path], cwd: &Path) -> Output {
    let path = std::env::join_paths(path_dirs).unwrap();
    Command::new(env!("CARGO_BIN_EXE_vitae"))
        .args(args)
        .current_dir(cwd)
        .env("PATH", path)
        .env_remove("VITAE_BROWSER")
        .env_remove("VITAE_EXPORT_DIR")
        .env_remove("VITAE_PDF_TIMEOUT")
        .env_remove("VITAE_NO_METADATA")
        .output()
        .unwrap()
}

fn template() -> String {
    fixtures().join("templates/resume.html").display().to_string()
}

fn data() -> String {
    fixtures().join("jane_doe.yaml").display().to_string()
}

#[test]
fn test_renders_to_explicit_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("custom.html");
    let output = vitae(
        &["-t", &template(), "-d", &data(), "-o", &out.display().to_string()],
        &[],
        dir.path(),
    );

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("HTML saved to:"));
    assert!(fs::read_to_string(&out).unwrap().contains("<h1>Jane Doe</h1>"));
}

#[test]
fn test_missing_data_file_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = vitae(
        &["--template", &template(), "--data", "missing.yaml"],
        &[],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[load]"));
    assert!(stderr.contains("missing.yaml"));
}

#[test]
fn test_unreadable_data_reports_load_stage() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("profiles.yaml");
    fs::create_dir(&data_dir).unwrap();
    let output = vitae(
        &["-t", &template(), "-d", &data_dir.display().to_string()],
        &[],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[load]"), "stderr: {}", stderr);
    assert!(stderr.contains("profiles.yaml"));
}

#[test]
fn test_required_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let output = vitae(&["-d", &data()], &[], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--template"));
}

#[test]
fn test_pdf_without_engine_keeps_html() {
    let dir = tempfile::tempdir().unwrap();
    let empty = tempfile::tempdir().unwrap();
    let out = dir.path().join("cv.html");
    let output = vitae(
        &[
            "-t",
            &template(),
            "-d",
            &data(),
            "-o",
            &out.display().to_string(),
            "--pdf",
        ],
        &[empty.path()],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[export]"));
    assert!(stderr.contains("chromium, chromium-browser, google-chrome, chrome"));
    assert!(out.is_file());
    assert!(!dir.path().join("export/jane_doe.pdf").exists());
}

#[cfg(unix)]
fn write_fake_browser(dir: &Path, name: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    let script = r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    --print-to-pdf=*) out="${arg#--print-to-pdf=}" ;;
  esac
done
printf '%%PDF-1.4\n%%fake\n' > "$out"
"#;
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn test_pdf_default_location() {
    let dir = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    write_fake_browser(bin.path(), "chromium-browser");

    let output = vitae(
        &["-t", &template(), "-d", &data(), "--pdf"],
        &[bin.path()],
        dir.path(),
    );

    assert!(output.status.success(), "{:?}", output);
    let pdf = dir.path().join("export/jane_doe.pdf");
    assert!(fs::metadata(&pdf).unwrap().len() > 0);
    assert!(String::from_utf8_lossy(&output.stdout).contains("PDF saved to:"));
}

#[cfg(unix)]
#[test]
fn test_pdf_explicit_path_and_browser_override() {
    let dir = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    let browser = write_fake_browser(bin.path(), "custom-browser");
    let pdf = dir.path().join("nested/out.pdf");

    let output = vitae(
        &[
            "-t",
            &template(),
            "-d",
            &data(),
            "--pdf",
            &pdf.display().to_string(),
            "--browser",
            &browser.display().to_string(),
            "--no-metadata",
        ],
        &[],
        dir.path(),
    );

    assert!(output.status.success(), "{:?}", output);
    assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF-1.4"));
    assert!(!dir.path().join("export").exists());
}
