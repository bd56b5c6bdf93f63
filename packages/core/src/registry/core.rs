//! Element registry for mapping tag names to handlers.

use std::collections::{HashMap, HashSet};

use roxmltree::Node;

use super::handler::ElementHandler;
use super::types::ReadContext;
use crate::xml::get_tag_name;

/// Registry mapping element names to handlers.
///
/// Elements without a handler for their tag name go to the fallback
/// handler, if one is set and accepts them.
pub struct ElementRegistry {
    handlers: HashMap<String, Box<dyn ElementHandler>>,
    fallback: Option<Box<dyn ElementHandler>>,
}

impl ElementRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: None,
        }
    }

    /// Register a handler for a specific tag name.
    pub fn register(
        &mut self,
        tag_name: impl Into<String>,
        handler: impl ElementHandler + 'static,
    ) {
        self.handlers.insert(tag_name.into(), Box::new(handler));
    }

    /// Set the handler for tags without a registered handler.
    pub fn set_fallback(&mut self, handler: impl ElementHandler + 'static) {
        self.fallback = Some(Box::new(handler));
    }

    /// Get the appropriate handler for an element.
    ///
    /// Returns `None` if no handler accepts the element.
    pub fn get_handler(
        &self,
        node: Node<'_, '_>,
        context: &ReadContext<'_>,
    ) -> Option<&dyn ElementHandler> {
        let tag_name = get_tag_name(node);

        self.handlers
            .get(tag_name)
            .filter(|h| h.can_handle(node, context))
            .or_else(|| {
                self.fallback
                    .as_ref()
                    .filter(|h| h.can_handle(node, context))
            })
            .map(|h| h.as_ref())
    }

    /// Check if a handler is registered for a tag.
    #[must_use]
    pub fn has_handler(&self, tag_name: &str) -> bool {
        self.handlers.contains_key(tag_name)
    }

    /// Check if a fallback handler is set.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Return set of all registered tag names.
    #[must_use]
    pub fn registered_tags(&self) -> HashSet<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}
