use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, info, warn};

use crate::errors::WikiError;
use crate::types::Page;
use crate::utils::{escape_html, title_url_segment};

pub const VIEW: &str = "view";
pub const EDIT: &str = "edit";

const DEFAULT_VIEW: &str = r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{{TITLE}}</title>
</head>
<body>
<h1>{{TITLE}}</h1>
<p>[<a href="/edit/{{TITLE_URL}}">edit</a>]</p>
<div>{{BODY}}</div>
</body>
</html>
"#;

const DEFAULT_EDIT: &str = r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Editing {{TITLE}}</title>
</head>
<body>
<h1>Editing {{TITLE}}</h1>
<form action="/save/{{TITLE_URL}}" method="POST">
<div><textarea name="body" rows="20" cols="80">{{BODY}}</textarea></div>
<div><input type="submit" value="Save"></div>
</form>
</body>
</html>
"#;

/// Named HTML templates, loaded once at startup
pub struct TemplateComponent {
    templates: HashMap<String, String>,
}

impl TemplateComponent {
    /// Built-in templates only
    pub fn new() -> Self {
        Self::from_sources([(VIEW, DEFAULT_VIEW), (EDIT, DEFAULT_EDIT)])
    }

    /// Exactly the given `(name, source)` templates, nothing built in
    pub fn from_sources<'a>(sources: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let templates = sources
            .into_iter()
            .map(|(name, source)| (name.to_string(), source.to_string()))
            .collect();
        Self { templates }
    }

    /// Load `view.html` and `edit.html` from `dir`, keeping the built-in
    /// template for any file that cannot be read.
    pub fn load(dir: &Path) -> Self {
        let mut component = Self::new();
        for name in [VIEW, EDIT] {
            let path = dir.join(format!("{name}.html"));
            match fs::read_to_string(&path) {
                Ok(source) => {
                    info!("Loaded template '{}' from {:?}", name, path);
                    component.templates.insert(name.to_string(), source);
                }
                Err(e) => {
                    warn!(
                        "Using built-in '{}' template, could not read {:?}: {}",
                        name, path, e
                    );
                }
            }
        }
        component
    }

    /// Render `page` with the named template into `sink` as one write
    pub fn render(&self, name: &str, page: &Page, sink: &mut dyn Write) -> Result<(), WikiError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| WikiError::TemplateError(format!("no template named {name:?}")))?;
        debug!("Rendering template '{}' for page '{}'", name, page.title);

        // Body last, so text inside it is never treated as a placeholder.
        let html = template
            .replace("{{TITLE_URL}}", &title_url_segment(&page.title))
            .replace("{{TITLE}}", &escape_html(&page.title))
            .replace("{{BODY}}", &escape_html(&String::from_utf8_lossy(&page.body)));

        sink.write_all(html.as_bytes())
            .map_err(|e| WikiError::TemplateError(e.to_string()))
    }
}

impl Default for TemplateComponent {
    fn default() -> Self {
        Self::new()
    }
}
