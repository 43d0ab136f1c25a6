use std::fmt::Write;
use crate::render::escape_html;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetaKey {
    Name(String),
    Property(String),
}

impl MetaKey {
    pub fn name(name: &str) -> Self {
        MetaKey::Name(name.to_string())
    }

    pub fn property(property: &str) -> Self {
        MetaKey::Property(property.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadScript {
    pub id: String,
    pub src: Option<String>,
    pub content: Option<String>,
    pub script_type: Option<String>,
    pub is_async: bool,
}

impl HeadScript {
    pub fn inline(id: &str, content: String) -> Self {
        Self {
            id: id.to_string(),
            content: Some(content),
            ..Default::default()
        }
    }

    pub fn external(id: &str, src: String) -> Self {
        Self {
            id: id.to_string(),
            src: Some(src),
            is_async: true,
            ..Default::default()
        }
    }
}

/// In-memory model of a document `<head>`.
///
/// Meta tags are unique per key, links per `rel`. Scripts are kept in
/// insertion order and identified by their `id` attribute.
#[derive(Debug, Clone, Default)]
pub struct Head {
    title: String,
    metas: Vec<(MetaKey, String)>,
    links: Vec<(String, String)>,
    scripts: Vec<HeadScript>,
}

impl Head {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn meta(&self, key: &MetaKey) -> Option<&str> {
        self.metas
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, content)| content.as_str())
    }

    // Create-or-update
    pub fn set_meta(&mut self, key: MetaKey, content: &str) {
        match self.metas.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = content.to_string(),
            None => self.metas.push((key, content.to_string())),
        }
    }

    pub fn remove_meta(&mut self, key: &MetaKey) {
        self.metas.retain(|(k, _)| k != key);
    }

    pub fn link(&self, rel: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|(r, _)| r == rel)
            .map(|(_, href)| href.as_str())
    }

    pub fn link_count(&self, rel: &str) -> usize {
        self.links.iter().filter(|(r, _)| r == rel).count()
    }

    pub fn set_link(&mut self, rel: &str, href: &str) {
        match self.links.iter_mut().find(|(r, _)| r == rel) {
            Some((_, existing)) => *existing = href.to_string(),
            None => self.links.push((rel.to_string(), href.to_string())),
        }
    }

    pub fn scripts(&self) -> &[HeadScript] {
        &self.scripts
    }

    pub fn script_count(&self, id: &str) -> usize {
        self.scripts.iter().filter(|s| s.id == id).count()
    }

    pub fn add_script(&mut self, script: HeadScript) {
        self.scripts.push(script);
    }

    /// Removes every script carrying `id`. Returns whether any was removed.
    pub fn remove_script(&mut self, id: &str) -> bool {
        let before = self.scripts.len();
        self.scripts.retain(|s| s.id != id);
        self.scripts.len() != before
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<title>{}</title>", escape_html(&self.title));

        for (key, content) in &self.metas {
            let (attr, value) = match key {
                MetaKey::Name(name) => ("name", name),
                MetaKey::Property(property) => ("property", property),
            };
            let _ = writeln!(
                out,
                r#"<meta {}="{}" content="{}">"#,
                attr,
                escape_html(value),
                escape_html(content)
            );
        }

        for (rel, href) in &self.links {
            let _ = writeln!(
                out,
                r#"<link rel="{}" href="{}">"#,
                escape_html(rel),
                escape_html(href)
            );
        }

        for script in &self.scripts {
            out.push_str(&render_script(script));
            out.push('\n');
        }

        out
    }
}

fn render_script(script: &HeadScript) -> String {
    let mut tag = format!(r#"<script id="{}""#, escape_html(&script.id));
    if let Some(script_type) = &script.script_type {
        let _ = write!(tag, r#" type="{}""#, escape_html(script_type));
    }
    if let Some(src) = &script.src {
        let _ = write!(tag, r#" src="{}""#, escape_html(src));
    }
    if script.is_async {
        tag.push_str(" async");
    }
    tag.push('>');
    if let Some(content) = &script.content {
        // A literal "</" would close the element early
        tag.push_str(&content.replace("</", "<\\/"));
    }
    tag.push_str("</script>");
    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_meta_updates_in_place() {
        let mut head = Head::new();
        head.set_meta(MetaKey::name("description"), "first");
        head.set_meta(MetaKey::property("og:title"), "Title");
        head.set_meta(MetaKey::name("description"), "second");

        assert_eq!(head.meta(&MetaKey::name("description")), Some("second"));
        assert_eq!(head.meta(&MetaKey::property("og:title")), Some("Title"));
        // name and property namespaces are separate
        assert_eq!(head.meta(&MetaKey::property("description")), None);
        assert_eq!(head.render().matches("name=\"description\"").count(), 1);
    }

    #[test]
    fn test_set_link_keeps_one_per_rel() {
        let mut head = Head::new();
        head.set_link("canonical", "https://a.example/");
        head.set_link("canonical", "https://a.example/blog");

        assert_eq!(head.link_count("canonical"), 1);
        assert_eq!(head.link("canonical"), Some("https://a.example/blog"));
    }

    #[test]
    fn test_remove_script() {
        let mut head = Head::new();
        head.add_script(HeadScript::external("loader", "https://cdn.example/a.js".into()));
        head.add_script(HeadScript::inline("data", "{}".into()));

        assert!(head.remove_script("data"));
        assert!(!head.remove_script("data"));
        assert_eq!(head.scripts().len(), 1);
    }

    #[test]
    fn test_render_escapes_and_guards_script_content() {
        let mut head = Head::new();
        head.set_title("Before & After");
        head.set_meta(MetaKey::name("description"), "say \"cheese\"");
        head.add_script(HeadScript {
            id: "data".into(),
            script_type: Some("application/ld+json".into()),
            content: Some(r#"{"name":"</script><b>"}"#.into()),
            ..Default::default()
        });

        let html = head.render();
        assert!(html.contains("<title>Before &amp; After</title>"));
        assert!(html.contains(r#"content="say &quot;cheese&quot;""#));
        assert!(html.contains(r#"<script id="data" type="application/ld+json">"#));
        assert!(html.contains(r#"<\/script><b>"#));
        assert_eq!(html.matches("</script>").count(), 1);
    }
}
