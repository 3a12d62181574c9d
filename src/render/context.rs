//! Template context construction.

use super::RenderOptions;
use crate::model::{ProfileDocument, TemplateHandle};
use serde_json::{Map, Value};
use std::path::Path;
use url::Url;

/// Key holding the URI of the template's resources directory.
pub const RESOURCES_PATH_KEY: &str = "resources_path";

/// Key holding the page layout.
pub const PAGE_KEY: &str = "page";

/// Build the data tree the template is rendered against.
///
/// The profile's top-level keys become template variables. On top of
/// those, `resources_path` is always set (a profile value is replaced) and
/// `page` is set unless the profile already defines it.
pub fn build_context(
    profile: &ProfileDocument,
    template: &TemplateHandle,
    options: &RenderOptions,
) -> Map<String, Value> {
    let mut data = profile.data().clone();

    let resources = template.resources_dir(&options.resources_dir);
    data.insert(
        RESOURCES_PATH_KEY.to_string(),
        Value::String(file_uri(&resources)),
    );

    if !data.contains_key(PAGE_KEY) {
        // PageLayout only holds strings
        let page = serde_json::to_value(&options.page).unwrap_or(Value::Null);
        data.insert(PAGE_KEY.to_string(), page);
    }

    data
}

/// `file://` URI for a path, falling back to the plain path when it is
/// relative.
pub fn file_uri(path: &Path) -> String {
    match Url::from_file_path(path) {
        Ok(url) => url.to_string(),
        Err(()) => path.to_string_lossy().into_owned(),
    }
}
