//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn resume_template() -> PathBuf {
    fixtures().join("templates/resume.html")
}

pub fn jane_yaml() -> PathBuf {
    fixtures().join("jane_doe.yaml")
}

pub fn minimal_yaml() -> PathBuf {
    fixtures().join("minimal.yaml")
}

/// Write an executable shell script named `name` into `dir`.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A fake browser that copies `pdf_source` to the `--print-to-pdf=` target.
#[cfg(unix)]
pub fn fake_browser(dir: &Path, name: &str, pdf_source: &Path) -> PathBuf {
    let body = format!(
        r#"out=""
for arg in "$@"; do
  case "$arg" in
    --print-to-pdf=*) out="${{arg#--print-to-pdf=}}" ;;
  esac
done
[ -n "$out" ] || exit 64
cp "{}" "$out""#,
        pdf_source.display()
    );
    write_script(dir, name, &body)
}

/// A fake browser that fails with a diagnostic.
#[cfg(unix)]
pub fn failing_browser(dir: &Path, name: &str) -> PathBuf {
    write_script(dir, name, "echo 'GPU process crashed' >&2\nexit 3")
}

/// A fake browser that never finishes on its own.
#[cfg(unix)]
pub fn hanging_browser(dir: &Path, name: &str) -> PathBuf {
    write_script(dir, name, "exec sleep 30")
}

/// A fake browser that succeeds without writing anything.
#[cfg(unix)]
pub fn silent_browser(dir: &Path, name: &str) -> PathBuf {
    write_script(dir, name, "exit 0")
}
