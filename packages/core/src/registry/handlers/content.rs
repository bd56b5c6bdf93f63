//! Handlers for child content: nested objects and verbatim markup.

use roxmltree::Node;

use crate::config::MATHML_NS;
use crate::error::Result;
use crate::registry::handler::{ElementHandler, RecurseFn};
use crate::registry::types::{ElementType, ReadContext};
use crate::sbase::SBase;
use crate::xml::convert;

/// Handler for MathML `<math>` elements.
///
/// The markup is kept as a raw tree and written back unchanged.
pub struct VerbatimHandler;

impl ElementHandler for VerbatimHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Verbatim
    }

    fn can_handle(&self, node: Node<'_, '_>, _context: &ReadContext<'_>) -> bool {
        node.tag_name().namespace() == Some(MATHML_NS)
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        owner: &mut SBase,
        context: &mut ReadContext<'_>,
        _recurse: &RecurseFn<'a, 'input>,
    ) -> Result<()> {
        owner.add_verbatim(convert(node, context.depth)?);
        Ok(())
    }
}

/// Handler for nested core or package objects.
///
/// Used as the registry fallback: any element in the core namespace or in
/// an enabled package's namespace becomes a generic child object.
pub struct ObjectHandler;

impl ElementHandler for ObjectHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Object
    }

    fn can_handle(&self, node: Node<'_, '_>, context: &ReadContext<'_>) -> bool {
        context.is_known_uri(node.tag_name().namespace().unwrap_or_default())
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        owner: &mut SBase,
        context: &mut ReadContext<'_>,
        recurse: &RecurseFn<'a, 'input>,
    ) -> Result<()> {
        let child = recurse(node, context)?;
        owner.push_child(child)
    }
}
