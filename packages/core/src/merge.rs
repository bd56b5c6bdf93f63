//! Structural merge of XHTML-like notes fragments.
//!
//! Appending notes never nests one document inside another. Both fragments
//! are classified as a full `html` document, a bare `body`, or anything
//! else, and the result takes the richest shape of the two:
//!
//! | existing \ incoming | Html | Body | Other |
//! |---|---|---|---|
//! | **Html**  | html | html | html |
//! | **Body**  | html | body | body |
//! | **Other** | html | body | siblings |
//!
//! Body content is always ordered existing first. The `head` of a merged
//! document comes from the existing fragment when it is an `html`, otherwise
//! from the incoming one.

use crate::config::XHTML_NS;
use crate::error::{Result, SbmlError};
use crate::xml::Node;

/// Shape of a notes fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Element named `html`.
    Html,
    /// Element named `body`.
    Body,
    /// Anything else, including bare text.
    Other,
}

/// Classify a single fragment by its element name.
pub fn classify(node: &Node) -> FragmentKind {
    if node.has_tag("html") {
        FragmentKind::Html
    } else if node.has_tag("body") {
        FragmentKind::Body
    } else {
        FragmentKind::Other
    }
}

/// A fragment split into its optional head and its body content.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition<'a> {
    pub kind: FragmentKind,
    pub head: Option<&'a Node>,
    pub body_children: Vec<&'a Node>,
}

/// Split a fragment into head and body content.
pub fn decompose(node: &Node) -> Decomposition<'_> {
    let kind = classify(node);
    match kind {
        FragmentKind::Html => Decomposition {
            kind,
            head: node.find_child("head"),
            body_children: node
                .find_child("body")
                .map(|body| body.children().iter().collect())
                .unwrap_or_default(),
        },
        FragmentKind::Body => Decomposition {
            kind,
            head: None,
            body_children: node.children().iter().collect(),
        },
        FragmentKind::Other => Decomposition {
            kind,
            head: None,
            body_children: vec![node],
        },
    }
}

/// Split the content of a wrapper (the children of `notes`) into head and
/// body content.
///
/// A single child is decomposed as a fragment. Several children are treated
/// as loose body content, which is only valid when none of them is itself an
/// `html` or `body` element.
///
/// # Errors
/// Returns [`SbmlError::Structure`] when `html` or `body` appears next to
/// other top-level content.
pub fn decompose_content(nodes: &[Node]) -> Result<Decomposition<'_>> {
    if let [single] = nodes {
        return Ok(decompose(single));
    }
    if let Some(wrapper) = nodes
        .iter()
        .find(|n| classify(n) != FragmentKind::Other)
    {
        return Err(SbmlError::Structure(format!(
            "<{}> must be the only top-level element of notes",
            wrapper.name()
        )));
    }
    Ok(Decomposition {
        kind: FragmentKind::Other,
        head: None,
        body_children: nodes.iter().collect(),
    })
}

/// Outcome of a merge.
#[derive(Debug, Clone, PartialEq)]
pub enum Merged {
    /// A single `html` or `body` element holding all content.
    Wrapped(Node),
    /// Loose content that becomes direct children of the caller's wrapper.
    Siblings(Vec<Node>),
}

impl Merged {
    /// Top-level nodes of the merged content.
    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            Merged::Wrapped(node) => vec![node],
            Merged::Siblings(nodes) => nodes,
        }
    }
}

/// Merge two single fragments.
///
/// # Examples
/// ```
/// use sbml_core::merge::{merge, Merged};
/// use sbml_core::xml::Node;
///
/// let a = Node::element("p").with_child(Node::text("A"));
/// let b = Node::element("p").with_child(Node::text("B"));
/// assert!(matches!(merge(&a, &b), Merged::Siblings(nodes) if nodes.len() == 2));
/// ```
pub fn merge(existing: &Node, incoming: &Node) -> Merged {
    combine(&decompose(existing), &decompose(incoming))
}

/// Merge the content of two wrappers.
///
/// # Errors
/// Returns [`SbmlError::Structure`] if either side is malformed (see
/// [`decompose_content`]).
pub fn merge_content(existing: &[Node], incoming: &[Node]) -> Result<Merged> {
    let existing = decompose_content(existing)?;
    let incoming = decompose_content(incoming)?;
    Ok(combine(&existing, &incoming))
}

fn combine(existing: &Decomposition<'_>, incoming: &Decomposition<'_>) -> Merged {
    tracing::debug!(
        existing = ?existing.kind,
        incoming = ?incoming.kind,
        "Merging notes fragments"
    );

    match (existing.kind, incoming.kind) {
        (FragmentKind::Html, _) | (_, FragmentKind::Html) => {
            let head_source = if existing.kind == FragmentKind::Html {
                existing.head
            } else {
                incoming.head
            };
            let head = head_source
                .cloned()
                .unwrap_or_else(|| Node::xhtml("head"));
            let body = joined_body(Node::xhtml("body"), existing, incoming);
            Merged::Wrapped(
                Node::xhtml("html")
                    .with_namespace("", XHTML_NS)
                    .with_child(head)
                    .with_child(body),
            )
        }
        (FragmentKind::Body, _) | (_, FragmentKind::Body) => Merged::Wrapped(joined_body(
            Node::xhtml("body").with_namespace("", XHTML_NS),
            existing,
            incoming,
        )),
        (FragmentKind::Other, FragmentKind::Other) => Merged::Siblings(
            existing
                .body_children
                .iter()
                .chain(&incoming.body_children)
                .map(|n| (*n).clone())
                .collect(),
        ),
    }
}

fn joined_body(mut body: Node, existing: &Decomposition<'_>, incoming: &Decomposition<'_>) -> Node {
    for child in existing.body_children.iter().chain(&incoming.body_children) {
        body.add_child(child);
    }
    body
}
