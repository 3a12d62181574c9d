//! Loading profile documents and templates from disk.
//!
//! The loader only checks that inputs exist and are syntactically valid.
//! Whether a profile carries the fields a template needs is decided at
//! binding time.

use crate::error::{Error, Result};
use crate::model::{ProfileDocument, TemplateHandle};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read and parse a YAML profile document.
///
/// # Errors
///
/// * [`Error::NotFound`] if `path` does not exist
/// * [`Error::Parse`] if the content is not valid YAML or its top level is
///   not a mapping
/// * [`Error::Read`] if the file exists but cannot be read
///
/// # Example
///
/// ```no_run
/// let profile = vitae::load_profile("resume.yaml")?;
/// println!("{:?}", profile.name());
/// # Ok::<(), vitae::Error>(())
/// ```
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<ProfileDocument> {
    let path = path.as_ref();
    let text = read_input(path)?;
    let profile = parse_profile_str(&text, path)?;
    log::debug!(
        "Loaded profile {} ({} top-level keys)",
        path.display(),
        profile.data().len()
    );
    Ok(profile)
}

/// Parse a YAML profile from a string.
///
/// `source` is only used for error messages and default output names.
/// An empty document yields an empty profile.
pub fn parse_profile_str(text: &str, source: impl Into<PathBuf>) -> Result<ProfileDocument> {
    let source = source.into();
    let parse_error = |message: String| Error::Parse {
        path: source.clone(),
        message,
    };

    let value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;

    let data = match value {
        serde_yaml::Value::Null => Map::new(),
        serde_yaml::Value::Mapping(_) => match serde_yaml::from_value::<Value>(value) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(parse_error("top level must be a mapping".into())),
            Err(e) => return Err(parse_error(e.to_string())),
        },
        _ => return Err(parse_error("top level must be a mapping".into())),
    };

    Ok(ProfileDocument::new(source, data))
}

/// Read a template and the sibling templates next to it.
///
/// Siblings are the files in the same directory sharing the template's
/// extension; they are made available to `include`, `extends` and `import`
/// by file name. Siblings that are not valid UTF-8 are skipped.
///
/// # Errors
///
/// * [`Error::NotFound`] if `path` is not an existing file
/// * [`Error::Parse`] if the template is not valid UTF-8
/// * [`Error::Read`] if the template or its directory cannot be read
pub fn load_template<P: AsRef<Path>>(path: P) -> Result<TemplateHandle> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    let source = read_input(path)?;
    let absolute = path.canonicalize().map_err(|e| Error::read(path, e))?;
    let base_dir = absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));
    let name = file_name(&absolute);

    let siblings = read_siblings(&absolute, &base_dir)?;
    log::debug!(
        "Loaded template {} with {} sibling template(s) from {}",
        name,
        siblings.len(),
        base_dir.display()
    );

    Ok(TemplateHandle::new(name, source, base_dir).with_siblings(siblings))
}

fn read_siblings(template: &Path, dir: &Path) -> Result<Vec<(String, String)>> {
    let extension = match template.extension() {
        Some(ext) => ext.to_string_lossy().to_lowercase(),
        None => return Ok(Vec::new()),
    };

    let mut siblings = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::read(dir, e))? {
        let path = entry.map_err(|e| Error::read(dir, e))?.path();
        if path == template || !path.is_file() {
            continue;
        }
        let same_ext = path
            .extension()
            .is_some_and(|e| e.to_string_lossy().to_lowercase() == extension);
        if !same_ext {
            continue;
        }

        match fs::read_to_string(&path) {
            Ok(source) => siblings.push((file_name(&path), source)),
            Err(e) => log::warn!("Skipping sibling template {}: {}", path.display(), e),
        }
    }

    // read_dir order is platform-dependent
    siblings.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(siblings)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::InvalidData => Error::Parse {
            path: path.to_path_buf(),
            message: "file is not valid UTF-8".into(),
        },
        _ => Error::read(path, e),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
