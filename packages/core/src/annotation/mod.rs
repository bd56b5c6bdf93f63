//! Notes, annotations and controlled-vocabulary terms attached to objects.

pub mod cvterm;
pub mod qualifier;
pub mod rdf;
pub mod store;

pub use cvterm::CvTerm;
pub use qualifier::{BiolQualifier, ModelQualifier, Qualifier, QualifierKind};
pub use store::AnnotationStore;
