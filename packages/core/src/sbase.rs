//! Generic SBML object.
//!
//! Every element of the object model, core or package, is represented by
//! one [`SBase`]: a qualified element name, an attribute bag, notes and
//! annotation, ordered child content and the extension slots of the
//! packages enabled on it.

use crate::annotation::{AnnotationStore, CvTerm};
use crate::config::{validate_meta_id, validate_sid};
use crate::error::{Result, SbmlError};
use crate::extension::{EnabledPackage, ExtensionSlot};
use crate::xml::{Attribute, ElementToken, NamespaceDecl, Node, QName, Token};

/// Child content of an object, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// A nested object.
    Object(SBase),
    /// Markup kept as-is, such as MathML `<math>`.
    Verbatim(Node),
}

/// Generic SBML object.
#[derive(Debug, Clone, PartialEq)]
pub struct SBase {
    name: QName,
    level: u32,
    version: u32,
    package_version: u32,
    attributes: Vec<Attribute>,
    namespaces: Vec<NamespaceDecl>,
    annotations: AnnotationStore,
    content: Vec<Content>,
    plugins: Vec<ExtensionSlot>,
}

impl SBase {
    /// Core object without namespace or package version.
    pub fn new(name: impl Into<String>, level: u32, version: u32) -> Self {
        Self {
            name: QName::new(name),
            level,
            version,
            package_version: 0,
            attributes: Vec::new(),
            namespaces: Vec::new(),
            annotations: AnnotationStore::new(),
            content: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Place the element in a namespace.
    #[must_use]
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.name.prefix = prefix.into();
        self.name.uri = uri.into();
        self
    }

    /// Mark the object as belonging to a package version.
    #[must_use]
    pub fn with_package_version(mut self, package_version: u32) -> Self {
        self.package_version = package_version;
        self
    }

    pub fn element_name(&self) -> &str {
        &self.name.name
    }

    pub fn qname(&self) -> &QName {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.name.prefix
    }

    pub fn uri(&self) -> &str {
        &self.name.uri
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Package version, 0 for core objects.
    pub fn package_version(&self) -> u32 {
        self.package_version
    }

    /// Namespace declarations written on this element.
    pub fn namespaces(&self) -> &[NamespaceDecl] {
        &self.namespaces
    }

    pub fn add_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.namespaces.push(NamespaceDecl::new(prefix, uri));
    }

    /// Drop the declarations of `uri` and the attributes in that namespace.
    /// Returns `false` if nothing was declared.
    pub fn remove_namespace(&mut self, uri: &str) -> bool {
        let before = self.namespaces.len();
        self.namespaces.retain(|ns| ns.uri != uri);
        self.attributes.retain(|a| a.name.uri != uri);
        self.namespaces.len() != before
    }

    // --- identifiers and attributes ------------------------------------

    pub fn meta_id(&self) -> Option<&str> {
        self.annotations.meta_id()
    }

    /// Set the `metaid`, the subject CVTerms refer to.
    ///
    /// # Errors
    /// Returns [`SbmlError::InvalidId`] if `meta_id` is not a valid XML ID.
    pub fn set_meta_id(&mut self, meta_id: &str) -> Result<()> {
        validate_meta_id(meta_id)?;
        self.annotations.set_meta_id(Some(meta_id.to_string()));
        Ok(())
    }

    pub fn is_set_meta_id(&self) -> bool {
        self.meta_id().is_some()
    }

    pub fn unset_meta_id(&mut self) {
        self.annotations.set_meta_id(None);
    }

    /// Value of an attribute by local name. `metaid` reads the stored metaid.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        if name == "metaid" {
            return self.meta_id();
        }
        self.attributes
            .iter()
            .find(|a| a.name.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Set an unqualified attribute, replacing an existing value.
    ///
    /// # Errors
    /// Returns [`SbmlError::InvalidId`] for a malformed `metaid`.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.set_qualified_attribute(Attribute::new(name, value))
    }

    /// Set an attribute, replacing one with the same name and namespace.
    ///
    /// An unqualified `metaid` goes through [`SBase::set_meta_id`].
    ///
    /// # Errors
    /// Returns [`SbmlError::InvalidId`] for a malformed `metaid`.
    pub fn set_qualified_attribute(&mut self, attribute: Attribute) -> Result<()> {
        if attribute.name.name == "metaid" && attribute.name.uri.is_empty() {
            return self.set_meta_id(&attribute.value);
        }
        self.put_attribute(attribute);
        Ok(())
    }

    fn put_attribute(&mut self, attribute: Attribute) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.name.name == attribute.name.name && a.name.uri == attribute.name.uri)
        {
            Some(existing) => existing.value = attribute.value,
            None => self.attributes.push(attribute),
        }
    }

    /// Remove an attribute by local name. Returns `false` if it was not set.
    pub fn unset_attribute(&mut self, name: &str) -> bool {
        if name == "metaid" {
            let was_set = self.is_set_meta_id();
            self.unset_meta_id();
            return was_set;
        }
        let before = self.attributes.len();
        self.attributes.retain(|a| a.name.name != name);
        self.attributes.len() != before
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Set the `id` attribute.
    ///
    /// # Errors
    /// Returns [`SbmlError::InvalidId`] if `id` is not a valid SId.
    pub fn set_id(&mut self, id: &str) -> Result<()> {
        validate_sid(id)?;
        self.put_attribute(Attribute::new("id", id));
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.attribute("name")
    }

    pub fn set_name(&mut self, name: &str) {
        self.put_attribute(Attribute::new("name", name));
    }

    // --- notes, annotation and CVTerms ---------------------------------

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut AnnotationStore {
        &mut self.annotations
    }

    /// Add a CVTerm about this object.
    ///
    /// # Errors
    /// Returns [`SbmlError::Precondition`] if no metaid is set.
    pub fn add_cv_term(&mut self, term: &CvTerm) -> Result<()> {
        self.annotations.add_cv_term(term)
    }

    // --- child content ---------------------------------------------------

    fn check_child(&self, child: &SBase) -> Result<()> {
        if child.level != self.level || child.version != self.version {
            return Err(SbmlError::LevelVersionMismatch {
                owner_level: self.level,
                owner_version: self.version,
                level: child.level,
                version: child.version,
            });
        }
        Ok(())
    }

    /// Append a copy of `child`.
    ///
    /// # Errors
    /// Returns [`SbmlError::LevelVersionMismatch`] if `child` has a
    /// different level or version.
    pub fn add_child(&mut self, child: &SBase) -> Result<()> {
        self.check_child(child)?;
        self.content.push(Content::Object(child.clone()));
        Ok(())
    }

    /// Append `child`, taking ownership.
    pub fn push_child(&mut self, child: SBase) -> Result<()> {
        self.check_child(&child)?;
        self.content.push(Content::Object(child));
        Ok(())
    }

    /// Append markup kept verbatim.
    pub fn add_verbatim(&mut self, node: Node) {
        self.content.push(Content::Verbatim(node));
    }

    /// Child content in document order.
    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Child objects in document order.
    pub fn children(&self) -> impl Iterator<Item = &SBase> {
        self.content.iter().filter_map(|c| match c {
            Content::Object(object) => Some(object),
            Content::Verbatim(_) => None,
        })
    }

    fn children_mut(&mut self) -> impl Iterator<Item = &mut SBase> {
        self.content.iter_mut().filter_map(|c| match c {
            Content::Object(object) => Some(object),
            Content::Verbatim(_) => None,
        })
    }

    /// Verbatim markup in document order.
    pub fn verbatim(&self) -> impl Iterator<Item = &Node> {
        self.content.iter().filter_map(|c| match c {
            Content::Verbatim(node) => Some(node),
            Content::Object(_) => None,
        })
    }

    pub fn num_children(&self) -> usize {
        self.children().count()
    }

    /// Child object at position `index`.
    ///
    /// # Errors
    /// Returns [`SbmlError::Index`] if `index` is out of range.
    pub fn child(&self, index: usize) -> Result<&SBase> {
        let len = self.num_children();
        self.children()
            .nth(index)
            .ok_or(SbmlError::Index { index, len })
    }

    pub fn child_mut(&mut self, index: usize) -> Result<&mut SBase> {
        let len = self.num_children();
        self.children_mut()
            .nth(index)
            .ok_or(SbmlError::Index { index, len })
    }

    /// First child object with the given element name.
    pub fn find_child(&self, name: &str) -> Option<&SBase> {
        self.children().find(|c| c.element_name() == name)
    }

    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut SBase> {
        self.children_mut().find(|c| c.element_name() == name)
    }

    /// Child object with the given `id`.
    pub fn child_by_id(&self, id: &str) -> Option<&SBase> {
        self.children().find(|c| c.id() == Some(id))
    }

    /// Remove and return the child object at `index`.
    ///
    /// # Errors
    /// Returns [`SbmlError::Index`] if `index` is out of range.
    pub fn remove_child(&mut self, index: usize) -> Result<SBase> {
        let len = self.num_children();
        let position = self
            .content
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, Content::Object(_)))
            .nth(index)
            .map(|(i, _)| i)
            .ok_or(SbmlError::Index { index, len })?;
        match self.content.remove(position) {
            Content::Object(object) => Ok(object),
            Content::Verbatim(_) => Err(SbmlError::Index { index, len }),
        }
    }

    // --- packages --------------------------------------------------------

    /// Attach the slot of an enabled package.
    ///
    /// Returns `false` if the package extends nothing on this kind of
    /// element. Enabling an already enabled package is a no-op.
    ///
    /// # Errors
    /// Returns [`SbmlError::LevelVersionMismatch`] if the package is defined
    /// for another SBML level/version.
    pub fn enable_package(&mut self, package: &EnabledPackage) -> Result<bool> {
        let descriptor = &package.descriptor;
        if !descriptor.supports(self.level, self.version) {
            return Err(SbmlError::LevelVersionMismatch {
                owner_level: self.level,
                owner_version: self.version,
                level: descriptor.level,
                version: descriptor.version,
            });
        }
        if self.is_package_enabled(&descriptor.uri) {
            return Ok(true);
        }
        match ExtensionSlot::new(
            descriptor.clone(),
            &self.name.name,
            package.element_prefix(),
            self.level,
            self.version,
        ) {
            Some(slot) => {
                self.plugins.push(slot);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Detach a package's slot and its lists. Returns `false` if it was not
    /// enabled.
    pub fn disable_package(&mut self, uri: &str) -> bool {
        let before = self.plugins.len();
        self.plugins.retain(|p| p.uri() != uri);
        self.plugins.len() != before
    }

    pub fn is_package_enabled(&self, uri: &str) -> bool {
        self.plugins.iter().any(|p| p.uri() == uri)
    }

    /// Slot by package name or namespace URI.
    pub fn plugin(&self, package: &str) -> Option<&ExtensionSlot> {
        self.plugins
            .iter()
            .find(|p| p.package_name() == package || p.uri() == package)
    }

    pub fn plugin_mut(&mut self, package: &str) -> Option<&mut ExtensionSlot> {
        self.plugins
            .iter_mut()
            .find(|p| p.package_name() == package || p.uri() == package)
    }

    pub fn plugins(&self) -> &[ExtensionSlot] {
        &self.plugins
    }

    /// Slot claiming an element with this name and namespace.
    pub fn claiming_plugin_mut(&mut self, name: &str, uri: &str) -> Option<&mut ExtensionSlot> {
        self.plugins.iter_mut().find(|p| p.claims(name, uri))
    }

    /// Change the prefix a package is written with, on this object and all
    /// descendants.
    pub fn set_package_prefix(&mut self, uri: &str, prefix: &str) {
        for slot in self.plugins.iter_mut().filter(|p| p.uri() == uri) {
            slot.set_prefix(prefix);
        }
        for child in self.children_mut() {
            child.set_package_prefix(uri, prefix);
        }
    }

    // --- output ----------------------------------------------------------

    /// Serialize to a tree: notes, child content, annotation, then the
    /// lists of every enabled package.
    pub fn to_node(&self) -> Node {
        self.build_node(self.name.clone())
    }

    /// Serialize under a different namespace, keeping the local name.
    pub(crate) fn to_node_as(&self, prefix: &str, uri: &str) -> Node {
        self.build_node(QName::with_ns(self.name.name.as_str(), prefix, uri))
    }

    fn build_node(&self, name: QName) -> Node {
        let mut token = ElementToken::new(name);
        token.namespaces = self.namespaces.clone();
        if let Some(meta_id) = self.meta_id() {
            token.attributes.push(Attribute::new("metaid", meta_id));
        }
        token.attributes.extend(self.attributes.iter().cloned());

        let mut node = Node::new(Token::Element(token));
        if let Some(notes) = self.annotations.notes() {
            node.add_child(notes);
        }
        for content in &self.content {
            match content {
                Content::Object(object) => node.push_child(object.to_node()),
                Content::Verbatim(markup) => node.add_child(markup),
            }
        }
        if let Some(annotation) = self.annotations.output_annotation() {
            node.push_child(annotation);
        }
        for slot in &self.plugins {
            for list in slot.to_nodes() {
                node.push_child(list);
            }
        }
        node
    }

    /// Serialized XML of this object (no declaration).
    pub fn to_xml_string(&self) -> String {
        self.to_node().to_xml_string()
    }
}
