//! Owned XML tree node.

use std::fmt;

use crate::config::XHTML_NS;
use crate::error::{Result, SbmlError};
use crate::xml::token::{Attribute, ElementToken, NamespaceDecl, QName, Token};
use crate::xml::writer::XmlWriter;

/// A token plus its ordered children.
///
/// Every node exclusively owns its children, so a tree is never shared and
/// cloning is always a deep copy. Text nodes have no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    token: Token,
    children: Vec<Node>,
}

impl Node {
    /// Wrap a token in a childless node.
    #[must_use]
    pub fn new(token: Token) -> Self {
        Self {
            token,
            children: Vec::new(),
        }
    }

    /// Element with an unqualified name and no namespace.
    #[must_use]
    pub fn element(name: impl Into<String>) -> Self {
        Self::new(Token::element(name))
    }

    /// Element with a qualified name.
    #[must_use]
    pub fn qualified(name: QName) -> Self {
        Self::new(Token::Element(ElementToken::new(name)))
    }

    /// Element in the XHTML namespace, without a namespace declaration.
    #[must_use]
    pub fn xhtml(name: impl Into<String>) -> Self {
        Self::qualified(QName::with_ns(name, "", XHTML_NS))
    }

    /// Text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Token::text(text))
    }

    /// Builder form of [`Node::push_child`].
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder form for a plain attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Token::Element(el) = &mut self.token {
            el.attributes.push(Attribute::new(name, value));
        }
        self
    }

    /// Builder form for a namespaced attribute.
    #[must_use]
    pub fn with_qualified_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
        if let Token::Element(el) = &mut self.token {
            el.attributes.push(Attribute {
                name,
                value: value.into(),
            });
        }
        self
    }

    /// Builder form for a namespace declaration.
    #[must_use]
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        if let Token::Element(el) = &mut self.token {
            el.namespaces.push(NamespaceDecl::new(prefix, uri));
        }
        self
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn token_mut(&mut self) -> &mut Token {
        &mut self.token
    }

    /// Local name, empty for text nodes.
    pub fn name(&self) -> &str {
        self.token.name()
    }

    pub fn uri(&self) -> &str {
        self.token.uri()
    }

    pub fn prefix(&self) -> &str {
        self.token.prefix()
    }

    pub fn is_text(&self) -> bool {
        self.token.is_text()
    }

    pub fn is_element(&self) -> bool {
        self.token.is_element()
    }

    /// Character data of a text node.
    pub fn characters(&self) -> Option<&str> {
        self.token.characters()
    }

    /// Attribute value by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.token.as_element().and_then(|el| el.attribute(name))
    }

    /// Check if this is an element with the given local name.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.is_element() && self.name() == tag
    }

    /// Append a deep copy of `child`.
    pub fn add_child(&mut self, child: &Node) {
        self.children.push(child.clone());
    }

    /// Append `child`, taking ownership.
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Insert `child` before position `index`.
    ///
    /// # Errors
    /// Returns [`SbmlError::Index`] if `index > num_children()`.
    pub fn insert_child(&mut self, index: usize, child: Node) -> Result<()> {
        if index > self.children.len() {
            return Err(SbmlError::Index {
                index,
                len: self.children.len(),
            });
        }
        self.children.insert(index, child);
        Ok(())
    }

    /// Child at position `index`.
    ///
    /// # Errors
    /// Returns [`SbmlError::Index`] if `index >= num_children()`.
    pub fn child(&self, index: usize) -> Result<&Node> {
        self.children.get(index).ok_or(SbmlError::Index {
            index,
            len: self.children.len(),
        })
    }

    pub fn child_mut(&mut self, index: usize) -> Result<&mut Node> {
        let len = self.children.len();
        self.children
            .get_mut(index)
            .ok_or(SbmlError::Index { index, len })
    }

    /// Remove and return the child at `index`.
    pub fn remove_child(&mut self, index: usize) -> Result<Node> {
        if index >= self.children.len() {
            return Err(SbmlError::Index {
                index,
                len: self.children.len(),
            });
        }
        Ok(self.children.remove(index))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Keep only the children for which `keep` returns `true`.
    pub fn retain_children<F>(&mut self, keep: F)
    where
        F: FnMut(&mut Node) -> bool,
    {
        self.children.retain_mut(keep);
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Consume the node and return its children.
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// Iterator over element children only.
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|c| c.is_element())
    }

    /// First child element with the given local name.
    pub fn find_child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.has_tag(tag))
    }

    /// All child elements with the given local name.
    pub fn find_children<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |c| c.has_tag(tag))
    }

    /// Descendant matching a slash-separated path of local names.
    pub fn find_by_path(&self, path: &str) -> Option<&Node> {
        let mut current = self;
        for part in path.split('/') {
            current = current.find_child(part)?;
        }
        Some(current)
    }

    /// Concatenated character data of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.token {
            Token::Text(text) => out.push_str(text),
            Token::Element(_) => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Stream this subtree into `writer`.
    pub fn write(&self, writer: &mut XmlWriter) {
        writer.write_node(self);
    }

    /// Serialize this subtree, pretty-printed, without an XML declaration.
    pub fn to_xml_string(&self) -> String {
        let mut writer = XmlWriter::new();
        self.write(&mut writer);
        writer.finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_string())
    }
}
