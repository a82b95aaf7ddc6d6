//! Rich text parsing: restricted HTML fragments -> presentational node trees
//!
//! CMS rich text reaches us as markdown converted to HTML with a small, fixed
//! tag vocabulary. This module turns such a fragment into a tree of data-only
//! nodes so that no raw markup ever reaches an output sink. Anything outside
//! the vocabulary is kept as literal text, never as structure.

/// The fixed vocabulary of structural node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Paragraph,
    Bold,
    Italic,
    Code,
    Underline,
    BulletList,
    OrderedList,
    ListItem,
}

/// A presentational node: plain text or an element of the fixed vocabulary.
///
/// Elements carry no attributes; all input outside the vocabulary ends up in
/// `Text` nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element { kind: NodeKind, children: Vec<Node> },
}

impl Node {
    fn element(kind: NodeKind, children: Vec<Node>) -> Self {
        Node::Element { kind, children }
    }
}

/// Inline formatting tags recognized by the tokenizer.
///
/// `b` and `i` are normalized to the same kinds as `strong` and `em`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineTag {
    Bold,
    Italic,
    Code,
    Underline,
}

impl InlineTag {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "strong" | "b" => Some(InlineTag::Bold),
            "em" | "i" => Some(InlineTag::Italic),
            "code" => Some(InlineTag::Code),
            "u" => Some(InlineTag::Underline),
            _ => None,
        }
    }

    fn kind(self) -> NodeKind {
        match self {
            InlineTag::Bold => NodeKind::Bold,
            InlineTag::Italic => NodeKind::Italic,
            InlineTag::Code => NodeKind::Code,
            InlineTag::Underline => NodeKind::Underline,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Open(InlineTag),
    Close(InlineTag),
}

/// Tokenize a block into text runs and vocabulary open/close tags.
///
/// A candidate tag is `<`, an optional `/`, an ASCII-alphabetic name and `>`.
/// Candidates whose name is outside the vocabulary, or that are malformed
/// (attributes, missing `>`), are emitted as text.
fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut pos = 0;
    let mut text_start = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }

        let mut cursor = pos + 1;
        let closing = cursor < bytes.len() && bytes[cursor] == b'/';
        if closing {
            cursor += 1;
        }
        let name_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_alphabetic() {
            cursor += 1;
        }

        let tag = if cursor > name_start && cursor < bytes.len() && bytes[cursor] == b'>' {
            InlineTag::from_name(&input[name_start..cursor])
        } else {
            None
        };

        match tag {
            Some(tag) => {
                if text_start < pos {
                    tokens.push(Token::Text(&input[text_start..pos]));
                }
                tokens.push(if closing {
                    Token::Close(tag)
                } else {
                    Token::Open(tag)
                });
                pos = cursor + 1;
                text_start = pos;
            }
            None => {
                // Not ours; the `<` stays literal text.
                pos += 1;
            }
        }
    }

    if text_start < bytes.len() {
        tokens.push(Token::Text(&input[text_start..]));
    }

    tokens
}

/// Wrap accumulated text with the currently-open tags, innermost-last-opened,
/// and push the result as one sibling node.
fn flush(buf: &mut String, stack: &[InlineTag], nodes: &mut Vec<Node>) {
    if buf.is_empty() {
        return;
    }
    let mut node = Node::Text(std::mem::take(buf));
    for tag in stack.iter().rev() {
        node = Node::element(tag.kind(), vec![node]);
    }
    nodes.push(node);
}

/// Parse one block of inline content into a flat sequence of sibling nodes.
///
/// Maintains an explicit stack of open formatting tags. A close tag with no
/// matching open is ignored; tags still open at end of block extend to the
/// block's end.
pub fn parse_inline(input: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut stack: Vec<InlineTag> = Vec::new();
    let mut buf = String::new();

    for token in tokenize(input) {
        match token {
            Token::Text(text) => buf.push_str(text),
            Token::Open(tag) => {
                flush(&mut buf, &stack, &mut nodes);
                stack.push(tag);
            }
            Token::Close(tag) => {
                flush(&mut buf, &stack, &mut nodes);
                if let Some(pos) = stack.iter().rposition(|open| *open == tag) {
                    stack.remove(pos);
                }
            }
        }
    }

    flush(&mut buf, &stack, &mut nodes);
    nodes
}

/// Parse a single-paragraph fragment: paragraph wrappers are stripped and the
/// remainder is inline-parsed. Used for short CMS strings (headlines, captions).
pub fn parse_inline_fragment(input: &str) -> Vec<Node> {
    let stripped = input.replace("<p>", "").replace("</p>", "");
    parse_inline(stripped.trim())
}

/// Parse a full rich-text fragment into block nodes.
///
/// Top-level `<ul>`/`<ol>` spans are located first; everything before, between
/// and after them is split on paragraph boundaries. Empty input produces an
/// empty sequence.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        match find_list_open(rest) {
            Some((start, kind)) => {
                push_paragraphs(&rest[..start], &mut nodes);

                let close = match kind {
                    NodeKind::BulletList => "</ul>",
                    _ => "</ol>",
                };
                let body_start = start + 4;
                let (body, after) = match rest[body_start..].find(close) {
                    Some(end) => (
                        &rest[body_start..body_start + end],
                        &rest[body_start + end + close.len()..],
                    ),
                    // Unterminated list runs to end of input.
                    None => (&rest[body_start..], ""),
                };
                nodes.push(parse_list(kind, body));
                rest = after;
            }
            None => {
                push_paragraphs(rest, &mut nodes);
                break;
            }
        }
    }

    nodes
}

/// Find the earliest top-level list opener in `input`.
fn find_list_open(input: &str) -> Option<(usize, NodeKind)> {
    let ul = input.find("<ul>").map(|pos| (pos, NodeKind::BulletList));
    let ol = input.find("<ol>").map(|pos| (pos, NodeKind::OrderedList));
    match (ul, ol) {
        (Some(a), Some(b)) => Some(if a.0 < b.0 { a } else { b }),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Parse the body of a list span into a list node with one node per `<li>`.
fn parse_list(kind: NodeKind, body: &str) -> Node {
    let mut items = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find("<li>") {
        let body_start = start + 4;
        let (item, after) = match rest[body_start..].find("</li>") {
            Some(end) => (
                &rest[body_start..body_start + end],
                &rest[body_start + end + 5..],
            ),
            None => (&rest[body_start..], ""),
        };
        // Loose lists wrap item bodies in paragraph tags; strip them so they
        // cannot leak as literal text.
        items.push(Node::element(
            NodeKind::ListItem,
            parse_inline_fragment(item.trim()),
        ));
        rest = after;
    }

    Node::element(kind, items)
}

/// Split text on `<p>` boundaries and push one paragraph node per block.
/// Stray text outside paragraph tags forms its own block.
fn push_paragraphs(input: &str, nodes: &mut Vec<Node>) {
    let mut rest = input;

    while !rest.is_empty() {
        match rest.find("<p>") {
            Some(start) => {
                push_paragraph_block(&rest[..start], nodes);
                let body_start = start + 3;
                match rest[body_start..].find("</p>") {
                    Some(end) => {
                        push_paragraph_block(&rest[body_start..body_start + end], nodes);
                        rest = &rest[body_start + end + 4..];
                    }
                    None => {
                        // Unterminated paragraph runs to end of input.
                        push_paragraph_block(&rest[body_start..], nodes);
                        rest = "";
                    }
                }
            }
            None => {
                push_paragraph_block(rest, nodes);
                break;
            }
        }
    }
}

fn push_paragraph_block(block: &str, nodes: &mut Vec<Node>) {
    let block = block.trim();
    if block.is_empty() {
        return;
    }
    nodes.push(Node::element(NodeKind::Paragraph, parse_inline(block)));
}

/// Flatten a node sequence to its text content, structure discarded.
pub fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element { children, .. } => collect_text(children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    #[test]
    fn test_plain_paragraph() {
        let nodes = parse_fragment("<p>hello world</p>");
        assert_eq!(
            nodes,
            vec![Node::element(NodeKind::Paragraph, vec![text("hello world")])]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_fragment("").is_empty());
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_bold_segment_only() {
        let nodes = parse_fragment("<p>a <strong>b</strong> c</p>");
        assert_eq!(plain_text(&nodes), "a b c");
        let Node::Element { kind, children } = &nodes[0] else {
            panic!("expected paragraph element");
        };
        assert_eq!(*kind, NodeKind::Paragraph);
        assert_eq!(
            children,
            &vec![
                text("a "),
                Node::element(NodeKind::Bold, vec![text("b")]),
                text(" c"),
            ]
        );
    }

    #[test]
    fn test_nested_formatting_wraps_last_opened_innermost() {
        let nodes = parse_inline("<strong><em>x</em></strong>");
        assert_eq!(
            nodes,
            vec![Node::element(
                NodeKind::Bold,
                vec![Node::element(NodeKind::Italic, vec![text("x")])]
            )]
        );
    }

    #[test]
    fn test_close_without_open_is_ignored() {
        let nodes = parse_inline("</strong>text");
        assert_eq!(nodes, vec![text("text")]);
    }

    #[test]
    fn test_unclosed_tag_extends_to_end_of_block() {
        let nodes = parse_inline("a <em>b c");
        assert_eq!(
            nodes,
            vec![text("a "), Node::element(NodeKind::Italic, vec![text("b c")])]
        );
    }

    #[test]
    fn test_unknown_tags_are_literal_text() {
        let nodes = parse_inline("<script>alert(1)</script>");
        assert_eq!(plain_text(&nodes), "<script>alert(1)</script>");
        assert!(nodes.iter().all(|n| matches!(n, Node::Text(_))));
    }

    #[test]
    fn test_tag_with_attributes_is_literal_text() {
        let nodes = parse_inline(r#"<strong onclick="x()">a</strong>"#);
        assert_eq!(plain_text(&nodes), r#"<strong onclick="x()">a"#);
    }

    #[test]
    fn test_b_and_i_normalize() {
        let nodes = parse_inline("<b>a</b><i>b</i>");
        assert_eq!(
            nodes,
            vec![
                Node::element(NodeKind::Bold, vec![text("a")]),
                Node::element(NodeKind::Italic, vec![text("b")]),
            ]
        );
    }

    #[test]
    fn test_unordered_list() {
        let nodes = parse_fragment("<ul><li>x</li><li>y</li></ul>");
        assert_eq!(
            nodes,
            vec![Node::element(
                NodeKind::BulletList,
                vec![
                    Node::element(NodeKind::ListItem, vec![text("x")]),
                    Node::element(NodeKind::ListItem, vec![text("y")]),
                ]
            )]
        );
    }

    #[test]
    fn test_ordered_list_with_formatting_in_items() {
        let nodes = parse_fragment("<ol><li><strong>one</strong></li></ol>");
        assert_eq!(
            nodes,
            vec![Node::element(
                NodeKind::OrderedList,
                vec![Node::element(
                    NodeKind::ListItem,
                    vec![Node::element(NodeKind::Bold, vec![text("one")])]
                )]
            )]
        );
    }

    #[test]
    fn test_loose_list_items_drop_paragraph_wrappers() {
        // Blank lines between markdown list items wrap each body in <p>.
        let nodes = parse_fragment("<ul>\n<li><p>one</p></li>\n<li><p>two</p></li>\n</ul>");
        assert_eq!(
            nodes,
            vec![Node::element(
                NodeKind::BulletList,
                vec![
                    Node::element(NodeKind::ListItem, vec![text("one")]),
                    Node::element(NodeKind::ListItem, vec![text("two")]),
                ]
            )]
        );
        assert!(!plain_text(&nodes).contains("<p>"));
    }

    #[test]
    fn test_text_around_list() {
        let nodes = parse_fragment("<p>before</p><ul><li>x</li></ul><p>after</p>");
        assert_eq!(nodes.len(), 3);
        assert!(matches!(
            nodes[0],
            Node::Element { kind: NodeKind::Paragraph, .. }
        ));
        assert!(matches!(
            nodes[1],
            Node::Element { kind: NodeKind::BulletList, .. }
        ));
        assert!(matches!(
            nodes[2],
            Node::Element { kind: NodeKind::Paragraph, .. }
        ));
    }

    #[test]
    fn test_multiple_paragraphs() {
        let nodes = parse_fragment("<p>one</p><p>two</p>");
        assert_eq!(nodes.len(), 2);
        assert_eq!(plain_text(&nodes[..1]), "one");
        assert_eq!(plain_text(&nodes[1..]), "two");
    }

    #[test]
    fn test_inline_fragment_strips_paragraph_wrapper() {
        let nodes = parse_inline_fragment("<p>hi <em>there</em></p>");
        assert_eq!(
            nodes,
            vec![text("hi "), Node::element(NodeKind::Italic, vec![text("there")])]
        );
    }

    #[test]
    fn test_code_and_underline() {
        let nodes = parse_inline("run <code>cargo</code> <u>now</u>");
        assert_eq!(
            nodes,
            vec![
                text("run "),
                Node::element(NodeKind::Code, vec![text("cargo")]),
                text(" "),
                Node::element(NodeKind::Underline, vec![text("now")]),
            ]
        );
    }

    #[test]
    fn test_interleaved_close_keeps_remaining_formats() {
        // <strong>a <em>b</strong> c</em> -> "c" stays italic after bold closes
        let nodes = parse_inline("<strong>a <em>b</strong> c</em>");
        assert_eq!(plain_text(&nodes), "a b c");
        assert_eq!(
            nodes[2],
            Node::element(NodeKind::Italic, vec![text(" c")])
        );
    }
}
