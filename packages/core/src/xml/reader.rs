//! Conversion of XML text into owned [`Node`] trees.

use roxmltree::{Document, Node as XmlNode, NodeType};

use crate::config::MAX_TREE_DEPTH;
use crate::error::{Result, SbmlError};
use crate::xml::node::Node;
use crate::xml::token::{ElementToken, Token};
use crate::xml::utils::{declared_namespaces, element_attributes, element_qname, is_blank_text};

const FRAGMENT_WRAPPER: &str = "sbml-core-fragment";

/// Parse a complete document and return its root element.
///
/// # Errors
/// Returns [`SbmlError::Structure`] for malformed XML or nesting deeper
/// than [`MAX_TREE_DEPTH`].
pub fn parse_document(xml: &str) -> Result<Node> {
    check_depth(xml)?;
    let doc = Document::parse(xml)?;
    convert(doc.root_element(), 0)
}

/// Parse zero or more top-level nodes.
///
/// Accepts an optional XML declaration, several sibling elements and bare
/// character data. Whitespace between elements is dropped.
///
/// # Examples
/// ```
/// use sbml_core::xml::parse_fragment;
///
/// let nodes = parse_fragment("<p>a</p><p>b</p>").unwrap();
/// assert_eq!(nodes.len(), 2);
///
/// let text = parse_fragment("This is a test note").unwrap();
/// assert!(text[0].is_text());
/// ```
///
/// # Errors
/// Returns [`SbmlError::Structure`] for malformed XML or nesting deeper
/// than [`MAX_TREE_DEPTH`].
pub fn parse_fragment(xml: &str) -> Result<Vec<Node>> {
    let body = strip_declaration(xml);
    check_depth(body)?;
    let wrapped = format!("<{FRAGMENT_WRAPPER}>{body}</{FRAGMENT_WRAPPER}>");
    let doc = Document::parse(&wrapped)?;
    let nodes = convert_children(doc.root_element(), 0)?;
    Ok(nodes
        .into_iter()
        .filter(|n| !n.characters().is_some_and(|t| t.trim().is_empty()))
        .collect())
}

/// Reject text nested deeper than [`MAX_TREE_DEPTH`] without recursing.
///
/// Counts open and close tags, skipping comments, CDATA sections,
/// processing instructions and declarations. Malformed markup is left for
/// the parser to report.
///
/// # Errors
/// Returns [`SbmlError::Structure`] when nesting exceeds the limit.
pub fn check_depth(xml: &str) -> Result<()> {
    let mut depth = 0usize;
    let mut rest = xml;
    while let Some(start) = rest.find('<') {
        rest = &rest[start..];
        let consumed = if rest.starts_with("<!--") {
            skip_past(rest, "-->")
        } else if rest.starts_with("<![CDATA[") {
            skip_past(rest, "]]>")
        } else if rest.starts_with("<?") {
            skip_past(rest, "?>")
        } else if rest.starts_with("<!") {
            skip_past(rest, ">")
        } else if rest.starts_with("</") {
            depth = depth.saturating_sub(1);
            skip_past(rest, ">")
        } else {
            let end = tag_end(rest);
            if end.is_some_and(|end| !rest[..end].ends_with("/>")) {
                depth += 1;
                if depth > MAX_TREE_DEPTH {
                    return Err(SbmlError::Structure(format!(
                        "element nesting exceeds {MAX_TREE_DEPTH} levels"
                    )));
                }
            }
            end
        };
        match consumed {
            Some(len) => rest = &rest[len..],
            None => break,
        }
    }
    Ok(())
}

fn skip_past(text: &str, terminator: &str) -> Option<usize> {
    text.find(terminator).map(|i| i + terminator.len())
}

/// Length of a start tag up to and including its `>`, ignoring quoted `>`.
fn tag_end(tag: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in tag.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Convert one parsed element (and its subtree) into a [`Node`].
///
/// # Errors
/// Returns [`SbmlError::Structure`] when nesting exceeds [`MAX_TREE_DEPTH`].
pub fn convert(node: XmlNode<'_, '_>, depth: usize) -> Result<Node> {
    if depth > MAX_TREE_DEPTH {
        return Err(SbmlError::Structure(format!(
            "element nesting exceeds {MAX_TREE_DEPTH} levels"
        )));
    }

    match node.node_type() {
        NodeType::Text => Ok(Node::text(node.text().unwrap_or_default())),
        NodeType::Element => {
            let token = ElementToken {
                name: element_qname(node),
                attributes: element_attributes(node),
                namespaces: declared_namespaces(node),
            };
            let mut out = Node::new(Token::Element(token));
            for child in convert_children(node, depth)? {
                out.push_child(child);
            }
            Ok(out)
        }
        other => Err(SbmlError::Structure(format!(
            "cannot convert {other:?} node"
        ))),
    }
}

/// Convert the element and text children of `node`.
///
/// Whitespace-only text survives where it separates inline content: in an
/// element that also holds non-blank text, or when it has no line break.
/// Indentation between block children is dropped.
pub fn convert_children(node: XmlNode<'_, '_>, depth: usize) -> Result<Vec<Node>> {
    let mixed = node.children().any(|c| c.is_text() && !is_blank_text(c));
    node.children()
        .filter(|c| c.is_element() || (c.is_text() && keeps_text(*c, mixed)))
        .map(|c| convert(c, depth + 1))
        .collect()
}

fn keeps_text(node: XmlNode<'_, '_>, mixed: bool) -> bool {
    if !is_blank_text(node) || mixed {
        return true;
    }
    node.text().is_some_and(|t| !t.is_empty() && !t.contains('\n'))
}

fn strip_declaration(xml: &str) -> &str {
    let trimmed = xml.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    xml
}
