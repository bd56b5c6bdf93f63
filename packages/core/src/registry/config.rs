//! Registry configuration for SBML core content.

use super::core::ElementRegistry;
use super::handlers::{AnnotationHandler, NotesHandler, ObjectHandler, VerbatimHandler};

/// Create a registry configured for SBML core content.
///
/// `notes` and `annotation` go to the annotation store, MathML is kept
/// verbatim, and every other element in a known namespace is read as a
/// nested object.
#[must_use]
pub fn create_core_registry() -> ElementRegistry {
    let mut registry = ElementRegistry::new();

    // Metadata handlers
    registry.register("notes", NotesHandler);
    registry.register("annotation", AnnotationHandler);

    // Verbatim handlers
    registry.register("math", VerbatimHandler);

    registry.set_fallback(ObjectHandler);

    registry
}
