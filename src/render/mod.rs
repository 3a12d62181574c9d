//! Binding profiles into templates.
//!
//! Control flow (`if`, `for`, `include`, ...) is evaluated entirely by Tera;
//! this module only assembles the context and maps failures to
//! [`Error::Binding`].
//!
//! Undefined variables are errors. Conditionals on missing keys evaluate
//! false, so `{% if languages %}...{% endif %}` renders nothing when the
//! profile has no languages.

mod context;
mod options;

pub use context::{build_context, file_uri, PAGE_KEY, RESOURCES_PATH_KEY};
pub use options::{PageLayout, RenderOptions, DEFAULT_RESOURCES_DIR};

use crate::error::{Error, Result};
use crate::model::{ProfileDocument, TemplateHandle};
use serde_json::Value;
use tera::{Context, Tera};

/// Render a profile through a template, producing the final markup.
///
/// Rendering is pure: the template and its siblings are already in memory,
/// and the same inputs always produce the same output.
///
/// # Example
///
/// ```
/// use vitae::model::TemplateHandle;
/// use vitae::render::{render, RenderOptions};
///
/// let profile = vitae::parse_profile_str("name: Jane", "jane.yaml")?;
/// let template = TemplateHandle::new("cv.html", "<h1>{{ name }}</h1>", "/tmp");
/// let html = render(&profile, &template, &RenderOptions::default())?;
/// assert_eq!(html, "<h1>Jane</h1>");
/// # Ok::<(), vitae::Error>(())
/// ```
pub fn render(
    profile: &ProfileDocument,
    template: &TemplateHandle,
    options: &RenderOptions,
) -> Result<String> {
    let tera = build_engine(template, options)?;

    let data = build_context(profile, template, options);
    let context = Context::from_value(Value::Object(data))
        .map_err(|e| Error::binding(template.name(), e))?;

    let markup = tera
        .render(template.name(), &context)
        .map_err(|e| Error::binding(template.name(), e))?;

    log::debug!("Rendered {} ({} bytes)", template.name(), markup.len());
    Ok(markup)
}

fn build_engine(template: &TemplateHandle, options: &RenderOptions) -> Result<Tera> {
    let mut tera = Tera::default();
    if options.autoescape {
        tera.autoescape_on(vec![""]);
    } else {
        tera.autoescape_on(vec![]);
    }

    // Siblings first so inheritance chains resolve when the main template
    // is registered in the same batch.
    let templates = template
        .siblings()
        .iter()
        .map(|(name, source)| (name.as_str(), source.as_str()))
        .chain(std::iter::once((template.name(), template.source())));

    tera.add_raw_templates(templates)
        .map_err(|e| Error::binding(template.name(), e))?;

    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_profile_str;

    fn render_str(template: &str, yaml: &str) -> Result<String> {
        let profile = parse_profile_str(yaml, "test.yaml")?;
        let handle = TemplateHandle::new("cv.html", template, "/tmp/templates");
        render(&profile, &handle, &RenderOptions::default())
    }

    #[test]
    fn test_render_substitution() {
        let html = render_str("<p>{{ name }} - {{ title }}</p>", "name: Jane\ntitle: Dev\n").unwrap();
        assert_eq!(html, "<p>Jane - Dev</p>");
    }

    #[test]
    fn test_render_iteration_over_mapping() {
        let template =
            "{% for category, items in skills %}{{ category }}: {{ items | join(sep=\", \") }};{% endfor %}";
        let yaml = "skills:\n  Languages: [Rust, Go]\n  Tools: [git]\n";
        let html = render_str(template, yaml).unwrap();
        assert_eq!(html, "Languages: Rust, Go;Tools: git;");
    }

    #[test]
    fn test_render_guarded_missing_section() {
        let template = "A{% if languages %}<ul>{% for l in languages %}<li>{{ l.name }}</li>{% endfor %}</ul>{% endif %}B";
        assert_eq!(render_str(template, "name: Jane\n").unwrap(), "AB");
        assert_eq!(render_str(template, "languages: []\n").unwrap(), "AB");
    }

    #[test]
    fn test_render_missing_field_is_binding_error() {
        let result = render_str("{{ email }}", "name: Jane\n");
        match result {
            Err(Error::Binding { template, message }) => {
                assert_eq!(template, "cv.html");
                assert!(message.contains("email"));
            }
            other => panic!("expected binding error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_invalid_syntax_is_binding_error() {
        let result = render_str("{% for x in %}", "name: Jane\n");
        assert!(matches!(result, Err(Error::Binding { .. })));
    }

    #[test]
    fn test_render_no_autoescape_by_default() {
        let html = render_str("{{ summary }}", "summary: \"<b>bold</b>\"\n").unwrap();
        assert_eq!(html, "<b>bold</b>");
    }

    #[test]
    fn test_render_autoescape() {
        let profile = parse_profile_str("summary: \"<b>x</b>\"", "t.yaml").unwrap();
        let handle = TemplateHandle::new("cv.html", "{{ summary }}", "/tmp");
        let options = RenderOptions::new().with_autoescape(true);
        let html = render(&profile, &handle, &options).unwrap();
        assert_eq!(html, "&lt;b&gt;x&lt;&#x2F;b&gt;");
    }

    #[test]
    fn test_render_with_sibling_include_and_extends() {
        let profile = parse_profile_str("name: Jane", "t.yaml").unwrap();
        let handle = TemplateHandle::new(
            "cv.html",
            "{% extends \"base.html\" %}{% block body %}{% include \"header.html\" %}{% endblock %}",
            "/tmp",
        )
        .with_siblings(vec![
            (
                "base.html".to_string(),
                "<main>{% block body %}{% endblock %}</main>".to_string(),
            ),
            ("header.html".to_string(), "<h1>{{ name }}</h1>".to_string()),
        ]);
        let html = render(&profile, &handle, &RenderOptions::default()).unwrap();
        assert_eq!(html, "<main><h1>Jane</h1></main>");
    }

    #[test]
    fn test_render_page_layout_available() {
        let html = render_str("@page { size: {{ page.size }}; margin: {{ page.margin }}; }", "").unwrap();
        assert_eq!(html, "@page { size: A4; margin: 0; }");
    }

    #[test]
    fn test_render_is_deterministic() {
        let template = "{% for k, v in meta %}{{ k }}={{ v }}\n{% endfor %}";
        let yaml = "meta:\n  keywords: rust\n  description: cv\n  author: jane\n";
        let first = render_str(template, yaml).unwrap();
        let second = render_str(template, yaml).unwrap();
        assert_eq!(first, second);
    }
}
