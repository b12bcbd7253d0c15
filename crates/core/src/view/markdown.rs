/// Host-provided Markdown to HTML conversion.
pub trait MarkdownRenderer: Send + Sync {
    fn to_html(&self, text: &str) -> String;
}

/// Converts with `renderer` when one is available, else returns the text verbatim.
pub fn render_markdown(renderer: Option<&dyn MarkdownRenderer>, text: &str) -> String {
    match renderer {
        Some(r) => r.to_html(text),
        None => text.to_string(),
    }
}
