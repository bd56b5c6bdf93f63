//! Per-object notes, annotation and CVTerm storage.

use crate::annotation::cvterm::CvTerm;
use crate::annotation::qualifier::{BiolQualifier, ModelQualifier, Qualifier};
use crate::annotation::rdf::{extract_cv_terms, write_rdf};
use crate::error::{Result, SbmlError};
use crate::merge::merge_content;
use crate::xml::{parse_fragment, Node};

const NOTES: &str = "notes";
const ANNOTATION: &str = "annotation";

/// Notes, annotation and CVTerms of one object.
///
/// Stored notes and annotation are always rooted at their wrapper element
/// (`<notes>` / `<annotation>`) and hold at least one child; setting empty
/// content clears them instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    meta_id: Option<String>,
    notes: Option<Node>,
    annotation: Option<Node>,
    cv_terms: Vec<CvTerm>,
}

/// Children of `node` when it already is the named wrapper, else `node` itself.
fn content_of<'a>(node: &'a Node, wrapper: &str) -> &'a [Node] {
    if node.has_tag(wrapper) {
        node.children()
    } else {
        std::slice::from_ref(node)
    }
}

fn is_empty_content(nodes: &[Node]) -> bool {
    nodes
        .iter()
        .all(|n| n.characters().is_some_and(|t| t.trim().is_empty()))
}

fn wrap(wrapper: &str, nodes: impl IntoIterator<Item = Node>) -> Node {
    nodes.into_iter().fold(Node::element(wrapper), Node::with_child)
}

/// Parse string content, unwrapping a single wrapper element if present.
fn parse_content(text: &str, wrapper: &str) -> Result<Vec<Node>> {
    let mut nodes = parse_fragment(text)?;
    if nodes.len() == 1 && nodes[0].has_tag(wrapper) {
        return Ok(nodes.remove(0).into_children());
    }
    Ok(nodes)
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier that RDF descriptions refer to.
    pub fn meta_id(&self) -> Option<&str> {
        self.meta_id.as_deref()
    }

    pub(crate) fn set_meta_id(&mut self, meta_id: Option<String>) {
        self.meta_id = meta_id;
    }

    // --- notes -----------------------------------------------------------

    pub fn notes(&self) -> Option<&Node> {
        self.notes.as_ref()
    }

    pub fn is_set_notes(&self) -> bool {
        self.notes.is_some()
    }

    /// Replace the notes with a copy of `content`.
    ///
    /// `content` may be the `<notes>` wrapper itself or its content; it is
    /// wrapped when needed. Empty content clears the notes.
    pub fn set_notes(&mut self, content: &Node) {
        self.notes = Self::wrapped_copy(content_of(content, NOTES), NOTES);
    }

    /// Parse `text` and replace the notes with it.
    ///
    /// Plain text without markup is stored as a text child. An empty string
    /// clears the notes.
    ///
    /// # Errors
    /// Returns [`SbmlError::Structure`] if `text` is malformed XML.
    pub fn set_notes_str(&mut self, text: &str) -> Result<()> {
        let nodes = parse_content(text, NOTES)?;
        self.notes = Self::wrapped_copy(&nodes, NOTES);
        Ok(())
    }

    /// Merge `content` into the existing notes (see [`crate::merge`]).
    ///
    /// # Errors
    /// Returns [`SbmlError::Structure`] if the existing notes or `content`
    /// place `html`/`body` next to other top-level content. The notes are
    /// left unchanged in that case.
    pub fn append_notes(&mut self, content: &Node) -> Result<()> {
        self.append_notes_content(content_of(content, NOTES))
    }

    /// String form of [`AnnotationStore::append_notes`].
    pub fn append_notes_str(&mut self, text: &str) -> Result<()> {
        let nodes = parse_content(text, NOTES)?;
        self.append_notes_content(&nodes)
    }

    fn append_notes_content(&mut self, incoming: &[Node]) -> Result<()> {
        if is_empty_content(incoming) {
            return Ok(());
        }
        let Some(existing) = &self.notes else {
            self.notes = Self::wrapped_copy(incoming, NOTES);
            return Ok(());
        };
        let merged = merge_content(existing.children(), incoming)?;
        self.notes = Some(wrap(NOTES, merged.into_nodes()));
        Ok(())
    }

    /// Serialized notes, including the `<notes>` wrapper.
    pub fn notes_string(&self) -> Option<String> {
        self.notes.as_ref().map(Node::to_xml_string)
    }

    pub fn unset_notes(&mut self) {
        self.notes = None;
    }

    // --- annotation ------------------------------------------------------

    /// Stored annotation, without the RDF generated from CVTerms.
    pub fn annotation(&self) -> Option<&Node> {
        self.annotation.as_ref()
    }

    pub fn is_set_annotation(&self) -> bool {
        self.annotation.is_some()
    }

    /// Replace the annotation with a copy of `content`.
    ///
    /// When a metaid is set, CVTerms in RDF about this object are moved into
    /// the term list and replace the current terms.
    pub fn set_annotation(&mut self, content: &Node) {
        let annotation = Self::wrapped_copy(content_of(content, ANNOTATION), ANNOTATION);
        self.replace_annotation(annotation);
    }

    /// Parse `text` and replace the annotation with it.
    pub fn set_annotation_str(&mut self, text: &str) -> Result<()> {
        let nodes = parse_content(text, ANNOTATION)?;
        self.replace_annotation(Self::wrapped_copy(&nodes, ANNOTATION));
        Ok(())
    }

    fn replace_annotation(&mut self, annotation: Option<Node>) {
        let Some(mut annotation) = annotation else {
            self.annotation = None;
            return;
        };
        let terms = self.extract_own_cv_terms(&mut annotation);
        if !terms.is_empty() {
            self.cv_terms.clear();
            for term in &terms {
                self.merge_cv_term(term);
            }
        }
        self.annotation = (annotation.num_children() > 0).then_some(annotation);
    }

    /// Add `content` as extra top-level children of the annotation.
    ///
    /// CVTerms about this object are merged into the term list.
    pub fn append_annotation(&mut self, content: &Node) {
        self.append_annotation_content(content_of(content, ANNOTATION));
    }

    /// String form of [`AnnotationStore::append_annotation`].
    pub fn append_annotation_str(&mut self, text: &str) -> Result<()> {
        let nodes = parse_content(text, ANNOTATION)?;
        self.append_annotation_content(&nodes);
        Ok(())
    }

    fn append_annotation_content(&mut self, incoming: &[Node]) {
        let Some(mut incoming) = Self::wrapped_copy(incoming, ANNOTATION) else {
            return;
        };
        for term in self.extract_own_cv_terms(&mut incoming) {
            self.merge_cv_term(&term);
        }
        match &mut self.annotation {
            Some(existing) => {
                for node in incoming.children() {
                    existing.add_child(node);
                }
            }
            None => self.annotation = (incoming.num_children() > 0).then_some(incoming),
        }
    }

    fn extract_own_cv_terms(&self, annotation: &mut Node) -> Vec<CvTerm> {
        match self.meta_id.as_deref() {
            Some(meta_id) => extract_cv_terms(annotation, Some(meta_id)),
            None => Vec::new(),
        }
    }

    /// Serialized stored annotation, including the `<annotation>` wrapper.
    pub fn annotation_string(&self) -> Option<String> {
        self.annotation.as_ref().map(Node::to_xml_string)
    }

    pub fn unset_annotation(&mut self) {
        self.annotation = None;
    }

    /// Store an annotation read from input, moving the CVTerms describing
    /// this object out of its RDF and into the term list.
    pub fn read_annotation(&mut self, annotation: Node) {
        let mut annotation = annotation;
        for term in extract_cv_terms(&mut annotation, self.meta_id.as_deref()) {
            self.merge_cv_term(&term);
        }
        self.annotation = (annotation.num_children() > 0).then_some(annotation);
    }

    /// Annotation as written: the RDF block for the CVTerms followed by the
    /// stored content.
    pub fn output_annotation(&self) -> Option<Node> {
        let rdf = self
            .meta_id
            .as_deref()
            .and_then(|meta_id| write_rdf(meta_id, &self.cv_terms));

        match (rdf, &self.annotation) {
            (None, None) => None,
            (None, Some(stored)) => Some(stored.clone()),
            (Some(rdf), stored) => {
                let mut out = Node::element(ANNOTATION).with_child(rdf);
                for child in stored.iter().flat_map(|a| a.children()) {
                    out.add_child(child);
                }
                Some(out)
            }
        }
    }

    // --- CVTerms ---------------------------------------------------------

    /// Add a CVTerm, merging it into an existing term with the same
    /// qualifier.
    ///
    /// # Errors
    /// Returns [`SbmlError::Precondition`] if the owner has no metaid.
    pub fn add_cv_term(&mut self, term: &CvTerm) -> Result<()> {
        if self.meta_id.is_none() {
            return Err(SbmlError::Precondition(
                "a metaid must be set before adding CVTerms".to_string(),
            ));
        }
        self.merge_cv_term(term);
        Ok(())
    }

    fn merge_cv_term(&mut self, term: &CvTerm) {
        match self
            .cv_terms
            .iter_mut()
            .find(|t| t.qualifier() == term.qualifier())
        {
            Some(existing) => existing.merge_from(term),
            None => self.cv_terms.push(term.clone()),
        }
    }

    /// All CVTerms, or `None` when there are none.
    pub fn cv_terms(&self) -> Option<&[CvTerm]> {
        (!self.cv_terms.is_empty()).then_some(self.cv_terms.as_slice())
    }

    pub fn num_cv_terms(&self) -> usize {
        self.cv_terms.len()
    }

    /// CVTerm at position `index`.
    pub fn cv_term(&self, index: usize) -> Result<&CvTerm> {
        self.cv_terms.get(index).ok_or(SbmlError::Index {
            index,
            len: self.cv_terms.len(),
        })
    }

    pub fn unset_cv_terms(&mut self) {
        self.cv_terms.clear();
    }

    fn resource_qualifier(&self, uri: &str, kind_matches: fn(Qualifier) -> bool) -> Option<Qualifier> {
        self.cv_terms
            .iter()
            .find(|t| kind_matches(t.qualifier()) && t.has_resource(uri))
            .map(CvTerm::qualifier)
    }

    /// Biological qualifier relating the owner to `uri`.
    ///
    /// # Errors
    /// Returns [`SbmlError::NotFound`] if no biological term holds `uri`.
    pub fn resource_biological_qualifier(&self, uri: &str) -> Result<BiolQualifier> {
        match self.resource_qualifier(uri, |q| matches!(q, Qualifier::Biological(_))) {
            Some(Qualifier::Biological(q)) => Ok(q),
            _ => Err(SbmlError::NotFound(format!(
                "no biological qualifier for resource '{uri}'"
            ))),
        }
    }

    /// Model qualifier relating the owner to `uri`.
    ///
    /// # Errors
    /// Returns [`SbmlError::NotFound`] if no model term holds `uri`.
    pub fn resource_model_qualifier(&self, uri: &str) -> Result<ModelQualifier> {
        match self.resource_qualifier(uri, |q| matches!(q, Qualifier::Model(_))) {
            Some(Qualifier::Model(q)) => Ok(q),
            _ => Err(SbmlError::NotFound(format!(
                "no model qualifier for resource '{uri}'"
            ))),
        }
    }

    fn wrapped_copy(content: &[Node], wrapper: &str) -> Option<Node> {
        if is_empty_content(content) {
            None
        } else {
            Some(wrap(wrapper, content.iter().cloned()))
        }
    }
}
