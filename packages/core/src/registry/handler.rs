//! Element handler trait definition.

use roxmltree::Node;

use super::types::{ElementType, ReadContext};
use crate::error::Result;
use crate::sbase::SBase;

/// Function type for recursive reading of nested objects.
pub type RecurseFn<'a, 'input> = dyn Fn(Node<'a, 'input>, &mut ReadContext<'_>) -> Result<SBase> + 'a;

/// Trait for element handlers.
///
/// Handlers store one child element of an object being read into that
/// object. They receive a `recurse` function to read nested objects.
pub trait ElementHandler: Send + Sync {
    /// Return the type classification of this element.
    fn element_type(&self) -> ElementType;

    /// Check if this handler can process the given element.
    ///
    /// Default implementation always returns true.
    fn can_handle(&self, _node: Node<'_, '_>, _context: &ReadContext<'_>) -> bool {
        true
    }

    /// Read the element into `owner`.
    ///
    /// # Arguments
    /// * `node` - The XML element to process
    /// * `owner` - The object the element belongs to
    /// * `context` - Current read context
    /// * `recurse` - Function to call for nested objects
    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        owner: &mut SBase,
        context: &mut ReadContext<'_>,
        recurse: &RecurseFn<'a, 'input>,
    ) -> Result<()>;
}
