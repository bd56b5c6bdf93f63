//! Token types: the payload of every tree node.

use std::fmt;

/// Qualified XML name: local name, namespace prefix and namespace URI.
///
/// An empty URI means "no namespace stated"; such an element inherits
/// whatever default namespace is in scope where it is written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct QName {
    /// Local part of the name (e.g. `p`).
    pub name: String,
    /// Namespace prefix, empty for the default namespace.
    pub prefix: String,
    /// Namespace URI, empty when unspecified.
    pub uri: String,
}

impl QName {
    /// Create an unqualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: String::new(),
            uri: String::new(),
        }
    }

    /// Create a name bound to a namespace.
    #[must_use]
    pub fn with_ns(
        name: impl Into<String>,
        prefix: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }

    /// The name as written in XML (`prefix:name` or `name`).
    #[must_use]
    pub fn qualified(&self) -> String {
        if self.prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}:{}", self.prefix, self.name)
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}:{}", self.prefix, self.name)
        }
    }
}

/// A single attribute of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

impl Attribute {
    /// Create an unqualified attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: QName::new(name),
            value: value.into(),
        }
    }
}

/// A namespace declaration (`xmlns` or `xmlns:prefix`) made on an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceDecl {
    /// Bound prefix, empty for the default namespace.
    pub prefix: String,
    pub uri: String,
}

impl NamespaceDecl {
    #[must_use]
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }

    /// Declaration of the default namespace.
    #[must_use]
    pub fn default_ns(uri: impl Into<String>) -> Self {
        Self::new("", uri)
    }
}

/// Start-tag data of an element token.
#[derive(Debug, Clone, Default)]
pub struct ElementToken {
    pub name: QName,
    pub attributes: Vec<Attribute>,
    pub namespaces: Vec<NamespaceDecl>,
}

impl ElementToken {
    #[must_use]
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    /// Add an unqualified attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Add a namespace declaration.
    #[must_use]
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.push(NamespaceDecl::new(prefix, uri));
        self
    }

    /// Value of the first attribute with the given local name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.name == name)
            .map(|a| a.value.as_str())
    }
}

// Prefixes and declarations are presentation details: two elements are the
// same when local name, namespace URI and attributes agree.
impl PartialEq for ElementToken {
    fn eq(&self, other: &Self) -> bool {
        self.name.name == other.name.name
            && self.name.uri == other.name.uri
            && self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .zip(&other.attributes)
                .all(|(a, b)| {
                    a.name.name == b.name.name && a.name.uri == b.name.uri && a.value == b.value
                })
    }
}

impl Eq for ElementToken {}

/// Tagged node descriptor: an element start tag or character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Element(ElementToken),
    Text(String),
}

impl Token {
    /// Element token with an unqualified name.
    #[must_use]
    pub fn element(name: impl Into<String>) -> Self {
        Token::Element(ElementToken::new(QName::new(name)))
    }

    /// Text token.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Token::Text(text.into())
    }

    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self, Token::Element(_))
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Token::Text(_))
    }

    /// Local name of an element, empty for text.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Token::Element(el) => &el.name.name,
            Token::Text(_) => "",
        }
    }

    /// Namespace URI of an element, empty for text.
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Token::Element(el) => &el.name.uri,
            Token::Text(_) => "",
        }
    }

    /// Namespace prefix of an element, empty for text.
    #[must_use]
    pub fn prefix(&self) -> &str {
        match self {
            Token::Element(el) => &el.name.prefix,
            Token::Text(_) => "",
        }
    }

    /// Character data of a text token.
    #[must_use]
    pub fn characters(&self) -> Option<&str> {
        match self {
            Token::Text(text) => Some(text),
            Token::Element(_) => None,
        }
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&ElementToken> {
        match self {
            Token::Element(el) => Some(el),
            Token::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementToken> {
        match self {
            Token::Element(el) => Some(el),
            Token::Text(_) => None,
        }
    }
}

impl From<ElementToken> for Token {
    fn from(el: ElementToken) -> Self {
        Token::Element(el)
    }
}
