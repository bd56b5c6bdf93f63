//! SBML core object tree with notes, annotations, CVTerms and namespaced
//! extension packages.
//!
//! This crate reads and writes SBML documents as generic object trees.
//! Every object carries human-readable notes (XHTML), a machine-readable
//! annotation with controlled-vocabulary terms serialized as RDF, and the
//! typed child lists of the extension packages enabled on the document.
//!
//! # Example
//!
//! ```
//! use sbml_core::{BiolQualifier, CvTerm, Document};
//!
//! let mut doc = Document::new(3, 1).unwrap();
//! let model = doc.create_model().unwrap();
//! model.set_meta_id("m1").unwrap();
//! model.annotations_mut().set_notes_str("<p xmlns=\"http://www.w3.org/1999/xhtml\">Toy model</p>").unwrap();
//! model
//!     .add_cv_term(&CvTerm::new(BiolQualifier::Is).with_resource("urn:miriam:taxonomy:9606"))
//!     .unwrap();
//!
//! let xml = doc.to_xml_string();
//! let back = Document::read_str(&xml).unwrap();
//! assert_eq!(back.model().unwrap().annotations().num_cv_terms(), 1);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespace constants and identifier validation
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Owned XML trees, reader and pretty-printing writer
//! - [`merge`]: Structural merge of XHTML notes
//! - [`annotation`]: Notes/annotation storage, CVTerms and their RDF form
//! - [`extension`]: Package descriptors, registry, slots and typed lists
//! - [`registry`]: Extensible element handler system used when reading
//! - [`sbase`]: The generic SBML object
//! - [`document`]: The `<sbml>` root and its model

pub mod annotation;
pub mod config;
pub mod document;
pub mod error;
pub mod extension;
pub mod merge;
pub mod registry;
pub mod sbase;
pub mod xml;

// Re-export commonly used items
pub use annotation::{AnnotationStore, BiolQualifier, CvTerm, ModelQualifier, Qualifier, QualifierKind};
pub use config::{validate_meta_id, validate_sid};
pub use document::Document;
pub use error::{Result, SbmlError};
pub use extension::{EnabledPackage, ExtensionDescriptor, ExtensionRegistry, ExtensionSlot, ListOf};
pub use merge::{merge, FragmentKind, Merged};
pub use sbase::{Content, SBase};
pub use xml::{parse_fragment, Node};
