//! Read engine that builds objects from XML using the registry.

use roxmltree::Node;

use super::core::ElementRegistry;
use super::types::ReadContext;
use crate::config::MAX_TREE_DEPTH;
use crate::error::{Result, SbmlError};
use crate::sbase::SBase;
use crate::xml::{
    declared_namespaces, describe_path, element_attributes, element_children, element_qname,
    get_tag_name,
};

/// Engine that builds [`SBase`] trees from parsed XML.
///
/// For every child element of an object the engine first asks the object's
/// extension slots whether the element is one of their lists, then
/// dispatches it to the registered handler. It raises `UnknownElement` for
/// any element claimed by neither.
pub struct ReadEngine {
    registry: ElementRegistry,
}

impl ReadEngine {
    /// Create a new engine with the given registry.
    #[must_use]
    pub fn new(registry: ElementRegistry) -> Self {
        Self { registry }
    }

    /// Get a reference to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Read an element and its subtree into an object.
    ///
    /// Every package in the context is enabled on the new object before its
    /// children are read, so package lists can be attached to it.
    ///
    /// # Errors
    /// * `UnknownElement` if a descendant has no handler and no package
    ///   claims it.
    /// * `DuplicateList` if an object holds two lists of one kind.
    /// * `InvalidId` for a malformed `metaid`.
    /// * `Structure` for nesting deeper than [`MAX_TREE_DEPTH`] or a second
    ///   `notes`/`annotation`.
    pub fn read_object(&self, node: Node<'_, '_>, context: &mut ReadContext<'_>) -> Result<SBase> {
        if context.depth > MAX_TREE_DEPTH {
            return Err(SbmlError::Structure(format!(
                "element nesting exceeds {MAX_TREE_DEPTH} levels at {}",
                describe_path(node)
            )));
        }

        let qname = element_qname(node);
        let mut object = SBase::new(qname.name.as_str(), context.level, context.version)
            .with_namespace(qname.prefix.as_str(), qname.uri.as_str());
        if let Some(package) = context.package_for_uri(&qname.uri) {
            object = object.with_package_version(package.descriptor.package_version);
        }

        for decl in declared_namespaces(node) {
            object.add_namespace(decl.prefix, decl.uri);
        }
        for attribute in element_attributes(node) {
            object.set_qualified_attribute(attribute)?;
        }
        for package in context.packages {
            object.enable_package(package)?;
        }

        context.depth += 1;
        let result = self.read_children(node, &mut object, context);
        context.depth -= 1;
        result?;

        Ok(object)
    }

    /// Read the child elements of `node` into `owner`.
    ///
    /// # Errors
    /// See [`ReadEngine::read_object`].
    pub fn read_children(
        &self,
        node: Node<'_, '_>,
        owner: &mut SBase,
        context: &mut ReadContext<'_>,
    ) -> Result<()> {
        let recurse = |child: Node<'_, '_>, ctx: &mut ReadContext<'_>| self.read_object(child, ctx);

        for child in node.children() {
            if child.is_text() {
                if child.text().is_some_and(|t| !t.trim().is_empty()) {
                    tracing::warn!(
                        owner = %owner.element_name(),
                        "Ignoring character data between child elements"
                    );
                }
                continue;
            }
            if !child.is_element() {
                continue;
            }

            let tag_name = get_tag_name(child);
            let uri = child.tag_name().namespace().unwrap_or_default();

            if owner.plugins().iter().any(|p| p.claims(tag_name, uri)) {
                self.read_list(child, owner, context)?;
                continue;
            }

            if let Some(handler) = self.registry.get_handler(child, context) {
                handler.handle(child, owner, context, &recurse)?;
                continue;
            }

            // No handler - raise error with parent context
            return Err(SbmlError::UnknownElement {
                tag_name: tag_name.to_string(),
                context: Some(format!("<{}>", get_tag_name(node))),
            });
        }

        Ok(())
    }

    /// Read a package list element into the claiming slot of `owner`.
    fn read_list(
        &self,
        node: Node<'_, '_>,
        owner: &mut SBase,
        context: &mut ReadContext<'_>,
    ) -> Result<()> {
        let tag_name = get_tag_name(node);
        let uri = node.tag_name().namespace().unwrap_or_default();

        context.depth += 1;
        let items: Result<Vec<SBase>> = element_children(node)
            .filter(|item| {
                let metadata = matches!(get_tag_name(*item), "notes" | "annotation");
                if metadata {
                    tracing::warn!(list = %tag_name, "Dropping metadata on extension list");
                }
                !metadata
            })
            .map(|item| self.read_object(item, context))
            .collect();
        context.depth -= 1;
        let items = items?;

        let Some(slot) = owner.claiming_plugin_mut(tag_name, uri) else {
            return Err(SbmlError::UnknownElement {
                tag_name: tag_name.to_string(),
                context: Some(format!("<{}>", owner.element_name())),
            });
        };
        let count = items.len();
        let list = slot.create_list(tag_name)?;
        for attribute in element_attributes(node) {
            list.set_attribute(attribute);
        }
        list.extend(items)?;
        tracing::debug!(list = %tag_name, items = count, "Read extension list");
        Ok(())
    }
}
