//! Markdown to HTML conversion for CMS rich text
//!
//! CMS rich-text fields arrive as markdown. Conversion here produces the
//! restricted HTML the rich-text parser understands (`<p>`, `<strong>`,
//! `<em>`, `<code>`, `<ul>`/`<ol>`/`<li>`); anything fancier ends up as
//! literal text downstream rather than as structure.

use pulldown_cmark::{html, Options, Parser};

/// Render a markdown string to an HTML fragment.
///
/// No strikethrough: it would emit `<del>`, which the node vocabulary cannot
/// represent, so `~~` sequences stay literal text.
pub fn render(markdown: &str) -> String {
    let options = Options::ENABLE_SMART_PUNCTUATION;
    let parser = Parser::new_ext(markdown, options);

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_with_emphasis() {
        let html = render("hello **bold** and *soft*");
        assert!(html.contains("<p>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>soft</em>"));
    }

    #[test]
    fn test_inline_code() {
        let html = render("run `cargo build` now");
        assert!(html.contains("<code>cargo build</code>"));
    }

    #[test]
    fn test_list() {
        let html = render("- one\n- two\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<li>two</li>"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_strikethrough_stays_literal() {
        let html = render("a ~~gone~~ b");
        assert!(!html.contains("<del>"));
        assert!(html.contains("~~gone~~"));
    }

    #[test]
    fn test_loose_list_survives_rich_text_pipeline() {
        // Blank lines between items are valid CMS input; the paragraph
        // wrappers pulldown adds inside <li> must not leak as literal text.
        let nodes = crate::richtext::parse_fragment(&render("- one\n\n- two\n"));
        let flat = crate::richtext::plain_text(&nodes);
        assert!(!flat.contains("<p>"), "paragraph tags leaked: {flat}");
        assert!(flat.contains("one"));
        assert!(flat.contains("two"));
    }
}
