use std::{fs, path::Path};
use chrono::{Datelike, Utc};
use crate::errors::{AppError, AppResult};

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            // Keeps user text from forming template placeholders
            '{' => out.push_str("&#123;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn load_template(template_dir: &str, name: &str) -> AppResult<String> {
    let path = Path::new(template_dir).join(name);
    fs::read_to_string(&path).map_err(|e| {
        tracing::error!("Failed to read template {}: {}", path.display(), e);
        AppError::Template(e)
    })
}

// Fills the shared layout. Body is trusted markup built by the handlers.
pub fn render_layout(layout: &str, head: &str, body: &str, site_name: &str) -> String {
    layout
        .replace("{{head}}", head)
        .replace("{{site_name}}", &escape_html(site_name))
        .replace("{{year}}", &Utc::now().year().to_string())
        .replace("{{body}}", body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::Head;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_escaped_text_cannot_form_a_placeholder() {
        let escaped = escape_html("{{recent_tasks}}");
        assert_eq!(escaped, "&#123;&#123;recent_tasks}}");

        let page = format!("<p>{}</p>{{{{recent_tasks}}}}", escaped).replace("{{recent_tasks}}", "LIST");
        assert_eq!(page, "<p>&#123;&#123;recent_tasks}}</p>LIST");
    }

    #[test]
    fn test_render_layout() {
        let mut head = Head::new();
        head.set_title("Home");
        let html = render_layout(
            "<head>{{head}}</head><header>{{site_name}}</header><main>{{body}}</main>",
            &head.render(),
            "<p>hi</p>",
            "NanoEdit",
        );

        assert!(html.contains("<title>Home</title>"));
        assert!(html.contains("<header>NanoEdit</header>"));
        assert!(html.contains("<main><p>hi</p></main>"));
    }

    #[test]
    fn test_load_layout_template() {
        let layout = load_template("templates", "layout.html").unwrap();
        assert!(layout.contains("{{head}}"));
        assert!(layout.contains("{{body}}"));
        assert!(load_template("templates", "missing.html").is_err());
    }
}
