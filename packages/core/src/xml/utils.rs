//! Helpers for navigating parsed `roxmltree` documents.

use roxmltree::Node as XmlNode;

use crate::xml::token::{Attribute, NamespaceDecl, QName};

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use sbml_core::xml::get_tag_name;
///
/// let xml = r#"<sbml xmlns:qual="urn:q"><qual:listOfTransitions/></sbml>"#;
/// let doc = Document::parse(xml).unwrap();
/// let list = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(list), "listOfTransitions");
/// ```
pub fn get_tag_name<'a>(node: XmlNode<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
pub fn find_child<'a, 'input>(node: XmlNode<'a, 'input>, tag: &str) -> Option<XmlNode<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Iterator over element children, skipping text, comments and PIs.
pub fn element_children<'a, 'input>(
    node: XmlNode<'a, 'input>,
) -> impl Iterator<Item = XmlNode<'a, 'input>> {
    node.children().filter(XmlNode::is_element)
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: XmlNode<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Check if a node is a text node holding only whitespace.
pub fn is_blank_text(node: XmlNode<'_, '_>) -> bool {
    node.is_text() && node.text().is_none_or(|t| t.trim().is_empty())
}

/// Prefix the element was written with, resolved through its in-scope
/// namespaces. Empty for the default namespace or no namespace.
pub fn element_prefix<'a>(node: XmlNode<'a, '_>) -> &'a str {
    node.tag_name()
        .namespace()
        .and_then(|uri| node.lookup_prefix(uri))
        .unwrap_or("")
}

/// Qualified name of an element.
pub fn element_qname(node: XmlNode<'_, '_>) -> QName {
    QName::with_ns(
        get_tag_name(node),
        element_prefix(node),
        node.tag_name().namespace().unwrap_or(""),
    )
}

/// Attributes of an element, with prefixes resolved.
pub fn element_attributes(node: XmlNode<'_, '_>) -> Vec<Attribute> {
    node.attributes()
        .map(|attr| {
            let uri = attr.namespace().unwrap_or("");
            let prefix = if uri.is_empty() {
                ""
            } else {
                node.lookup_prefix(uri).unwrap_or("")
            };
            Attribute {
                name: QName::with_ns(attr.name(), prefix, uri),
                value: attr.value().to_string(),
            }
        })
        .collect()
}

/// Namespace declarations made on this element itself.
///
/// `roxmltree` reports every namespace in scope; the ones already in scope
/// on the parent element are inherited, not declared here.
pub fn declared_namespaces(node: XmlNode<'_, '_>) -> Vec<NamespaceDecl> {
    let parent = node.parent().filter(XmlNode::is_element);
    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| {
            parent.is_none_or(|p| {
                !p.namespaces()
                    .any(|pns| pns.name() == ns.name() && pns.uri() == ns.uri())
            })
        })
        .map(|ns| NamespaceDecl::new(ns.name().unwrap_or(""), ns.uri()))
        .collect()
}

/// Describe where a node sits, for error context (`<model> > <listOfX>`).
pub fn describe_path(node: XmlNode<'_, '_>) -> String {
    let mut names: Vec<&str> = node
        .ancestors()
        .filter(XmlNode::is_element)
        .map(get_tag_name)
        .collect();
    names.reverse();
    names
        .iter()
        .map(|n| format!("<{n}>"))
        .collect::<Vec<_>>()
        .join(" > ")
}
