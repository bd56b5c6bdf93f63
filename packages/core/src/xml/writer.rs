//! Pretty-printing XML writer.
//!
//! Elements whose children are all elements are written in block form, one
//! child per line, indented by [`INDENT_WIDTH`] per level with the closing
//! tag on its own line. As soon as an element holds any character data its
//! whole subtree is written inline, so text is reproduced exactly.
//!
//! Namespace declarations stored on an element are always written. An extra
//! declaration is synthesized when an element or attribute names a namespace
//! URI that is not bound to its prefix at that point of the output.

use crate::config::INDENT_WIDTH;
use crate::xml::node::Node;
use crate::xml::token::{ElementToken, NamespaceDecl, Token};

/// Declaration emitted by [`XmlWriter::with_declaration`].
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Streaming writer over an in-memory buffer.
#[derive(Debug)]
pub struct XmlWriter {
    out: String,
    indent_width: usize,
    scopes: Vec<Vec<NamespaceDecl>>,
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlWriter {
    /// Writer without an XML declaration.
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent_width: INDENT_WIDTH,
            scopes: Vec::new(),
        }
    }

    /// Writer whose output starts with the XML declaration.
    pub fn with_declaration() -> Self {
        let mut writer = Self::new();
        writer.out.push_str(XML_DECLARATION);
        writer
    }

    /// Override the indentation width.
    #[must_use]
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Treat `decls` as already in scope, as if the output were nested in an
    /// element declaring them.
    #[must_use]
    pub fn with_scope(mut self, decls: Vec<NamespaceDecl>) -> Self {
        self.scopes.push(decls);
        self
    }

    /// Write a complete subtree at the top level.
    pub fn write_node(&mut self, node: &Node) {
        self.write_at(node, 0, false);
    }

    /// Consume the writer and return the output.
    pub fn finish(self) -> String {
        self.out
    }

    fn write_at(&mut self, node: &Node, depth: usize, inline: bool) {
        let el = match node.token() {
            Token::Text(text) => {
                escape_into(&mut self.out, text, false);
                return;
            }
            Token::Element(el) => el,
        };

        let decls = self.declarations_for(el);
        self.out.push('<');
        push_qualified(&mut self.out, &el.name.prefix, &el.name.name);
        for decl in &decls {
            if decl.prefix.is_empty() {
                self.out.push_str(" xmlns=\"");
            } else {
                self.out.push_str(" xmlns:");
                self.out.push_str(&decl.prefix);
                self.out.push_str("=\"");
            }
            escape_into(&mut self.out, &decl.uri, true);
            self.out.push('"');
        }
        for attr in &el.attributes {
            self.out.push(' ');
            push_qualified(&mut self.out, &attr.name.prefix, &attr.name.name);
            self.out.push_str("=\"");
            escape_into(&mut self.out, &attr.value, true);
            self.out.push('"');
        }

        if node.children().is_empty() {
            self.out.push_str("/>");
            return;
        }
        self.out.push('>');

        self.scopes.push(decls);
        let block = !inline && node.children().iter().all(Node::is_element);
        for child in node.children() {
            if block {
                self.newline(depth + 1);
            }
            self.write_at(child, depth + 1, !block);
        }
        if block {
            self.newline(depth);
        }
        self.scopes.pop();

        self.out.push_str("</");
        push_qualified(&mut self.out, &el.name.prefix, &el.name.name);
        self.out.push('>');
    }

    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        for _ in 0..depth * self.indent_width {
            self.out.push(' ');
        }
    }

    /// Declared namespaces of `el` plus any it needs but has not in scope.
    fn declarations_for(&self, el: &ElementToken) -> Vec<NamespaceDecl> {
        let mut decls = el.namespaces.clone();

        if !el.name.uri.is_empty() && !self.is_bound(&decls, &el.name.prefix, &el.name.uri) {
            decls.push(NamespaceDecl::new(
                el.name.prefix.clone(),
                el.name.uri.clone(),
            ));
        }

        for attr in &el.attributes {
            let name = &attr.name;
            if name.prefix.is_empty() || name.prefix == "xml" || name.uri.is_empty() {
                continue;
            }
            if !self.is_bound(&decls, &name.prefix, &name.uri) {
                decls.push(NamespaceDecl::new(name.prefix.clone(), name.uri.clone()));
            }
        }

        decls
    }

    fn is_bound(&self, pending: &[NamespaceDecl], prefix: &str, uri: &str) -> bool {
        let in_scope = pending
            .iter()
            .rev()
            .chain(self.scopes.iter().rev().flat_map(|s| s.iter().rev()))
            .find(|d| d.prefix == prefix);
        in_scope.is_some_and(|d| d.uri == uri)
    }
}

fn push_qualified(out: &mut String, prefix: &str, name: &str) {
    if !prefix.is_empty() {
        out.push_str(prefix);
        out.push(':');
    }
    out.push_str(name);
}

/// Escape character data.
///
/// Well-formed character references and predefined entities are passed
/// through unchanged; any other `&` is escaped.
///
/// The passthrough is not reversible: text that literally contains `&lt;`
/// (read from `&amp;lt;`) is written as `&lt;` and reads back as `<`.
///
/// # Examples
/// ```
/// use sbml_core::xml::escape_text;
///
/// assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_text("&#0168;"), "&#0168;");
/// ```
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text, false);
    out
}

/// Escape an attribute value (quotes and apostrophes included).
///
/// References pass through as in [`escape_text`].
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    escape_into(&mut out, value, true);
    out
}

fn escape_into(out: &mut String, text: &str, quotes: bool) {
    for (i, c) in text.char_indices() {
        match c {
            '&' if starts_with_reference(&text[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            '\'' if quotes => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

/// `s` starts with `&` followed by a complete entity or character reference.
fn starts_with_reference(s: &str) -> bool {
    let Some(rest) = s.strip_prefix('&') else {
        return false;
    };
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];
    match body.strip_prefix('#') {
        Some(num) => match num.strip_prefix('x') {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()),
        },
        None => matches!(body, "amp" | "lt" | "gt" | "quot" | "apos"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::XHTML_NS;
    use crate::xml::token::QName;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_only_element_inline() {
        let node = Node::element("notes").with_child(Node::text("This is a test note"));
        assert_eq!(node.to_xml_string(), "<notes>This is a test note</notes>");
    }

    #[test]
    fn test_element_children_block() {
        let node = Node::element("notes")
            .with_child(
                Node::element("p")
                    .with_namespace("", XHTML_NS)
                    .with_child(Node::text("This is a test note ")),
            )
            .with_child(
                Node::element("p")
                    .with_namespace("", XHTML_NS)
                    .with_child(Node::text("This is more test notes ")),
            );

        let expected = "<notes>\n  \
            <p xmlns=\"http://www.w3.org/1999/xhtml\">This is a test note </p>\n  \
            <p xmlns=\"http://www.w3.org/1999/xhtml\">This is more test notes </p>\n\
            </notes>";
        assert_eq!(node.to_xml_string(), expected);
    }

    #[test]
    fn test_childless_self_closes() {
        let node = Node::element("head");
        assert_eq!(node.to_xml_string(), "<head/>");
    }

    #[test]
    fn test_nested_block_indentation() {
        let node = Node::element("html").with_child(
            Node::element("head").with_child(Node::element("title")),
        );
        assert_eq!(
            node.to_xml_string(),
            "<html>\n  <head>\n    <title/>\n  </head>\n</html>"
        );
    }

    #[test]
    fn test_mixed_content_inline() {
        let node = Node::element("p")
            .with_child(Node::text("a "))
            .with_child(Node::element("b").with_child(Node::text("bold")))
            .with_child(Node::text(" c"));
        assert_eq!(node.to_xml_string(), "<p>a <b>bold</b> c</p>");
    }

    #[test]
    fn test_synthesizes_default_namespace() {
        let node = Node::element("notes").with_child(Node::xhtml("body"));
        assert_eq!(
            node.to_xml_string(),
            "<notes>\n  <body xmlns=\"http://www.w3.org/1999/xhtml\"/>\n</notes>"
        );
    }

    #[test]
    fn test_no_redundant_namespace_inside_scope() {
        let node = Node::xhtml("body")
            .with_namespace("", XHTML_NS)
            .with_child(Node::xhtml("p").with_child(Node::text("x")));
        assert_eq!(
            node.to_xml_string(),
            "<body xmlns=\"http://www.w3.org/1999/xhtml\">\n  <p>x</p>\n</body>"
        );
    }

    #[test]
    fn test_synthesizes_prefix_binding() {
        let node = Node::qualified(QName::with_ns("listOfTransitions", "qual", "urn:qual"));
        assert_eq!(
            node.to_xml_string(),
            "<qual:listOfTransitions xmlns:qual=\"urn:qual\"/>"
        );
    }

    #[test]
    fn test_prefix_bound_by_scope() {
        let mut writer = XmlWriter::new().with_scope(vec![NamespaceDecl::new("qual", "urn:qual")]);
        writer.write_node(&Node::qualified(QName::with_ns(
            "listOfTransitions",
            "qual",
            "urn:qual",
        )));
        assert_eq!(writer.finish(), "<qual:listOfTransitions/>");
    }

    #[test]
    fn test_declaration() {
        let mut writer = XmlWriter::with_declaration();
        writer.write_node(&Node::element("sbml"));
        assert_eq!(
            writer.finish(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<sbml/>"
        );
    }

    #[test]
    fn test_attribute_escaping() {
        assert_eq!(escape_attribute("&"), "&amp;");
        assert_eq!(escape_attribute("'"), "&apos;");
        assert_eq!(escape_attribute(">"), "&gt;");
        assert_eq!(escape_attribute("<"), "&lt;");
        assert_eq!(escape_attribute("\""), "&quot;");
    }

    #[test]
    fn test_character_references_pass_through() {
        assert_eq!(escape_attribute("&#0168;"), "&#0168;");
        assert_eq!(escape_attribute("&#x00a8;"), "&#x00a8;");
        assert_eq!(escape_attribute("&amp;"), "&amp;");
        assert_eq!(escape_attribute("&apos;"), "&apos;");
    }

    #[test]
    fn test_malformed_references_escaped() {
        assert_eq!(escape_attribute("&#01688"), "&amp;#01688");
        assert_eq!(escape_attribute("&#;"), "&amp;#;");
        assert_eq!(escape_attribute("&#00a8;"), "&amp;#00a8;");
        assert_eq!(escape_attribute("&#x;"), "&amp;#x;");
        assert_eq!(escape_attribute("&#xABCD"), "&amp;#xABCD");
    }

    #[test]
    fn test_text_keeps_quotes() {
        assert_eq!(escape_text("say \"hi\""), "say \"hi\"");
    }

    #[test]
    fn test_attribute_written_escaped() {
        let node = Node::element("p").with_attribute("title", "a<b");
        assert_eq!(node.to_xml_string(), "<p title=\"a&lt;b\"/>");
    }

    #[test]
    fn test_literal_reference_text_is_not_reescaped() {
        let node = crate::xml::parse_document("<p>use &amp;lt;</p>").unwrap();
        assert_eq!(node.text_content(), "use &lt;");
        let written = node.to_xml_string();
        assert_eq!(written, "<p>use &lt;</p>");
        let reread = crate::xml::parse_document(&written).unwrap();
        assert_eq!(reread.text_content(), "use <");
        assert_eq!(escape_attribute("&lt;\""), "&lt;&quot;");
    }
}
