//! Error types for the SBML core.
//!
//! One error enum covers the whole crate; every fallible operation returns
//! [`Result`]. Errors are reported to the caller of the operation that
//! detected them and are never retried internally.

use thiserror::Error;

/// Main error type for the SBML core library.
#[derive(Debug, Error)]
pub enum SbmlError {
    /// Malformed fragment or malformed XML input.
    #[error("Malformed structure: {0}")]
    Structure(String),

    /// A second top-level extension list of one kind for one owner.
    #[error("Duplicate <{list}> for package '{package}': only one list of this kind is allowed per object")]
    DuplicateList { package: String, list: String },

    /// Child object's level/version disagrees with its owner's.
    #[error("Level/version mismatch: owner is L{owner_level}V{owner_version}, object is L{level}V{version}")]
    LevelVersionMismatch {
        owner_level: u32,
        owner_version: u32,
        level: u32,
        version: u32,
    },

    /// Child object's package version disagrees with its owner's.
    #[error("Package version mismatch for '{package}': owner has version {expected}, object has {actual}")]
    PackageVersionMismatch {
        package: String,
        expected: u32,
        actual: u32,
    },

    /// Operation requires state the owner does not have.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Lookup or removal target does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Out-of-range child or list access.
    #[error("Index {index} out of range (length {len})")]
    Index { index: usize, len: usize },

    /// Element not claimed by the core nor by any enabled package.
    #[error("No handler for element <{tag_name}>{}", .context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default())]
    UnknownElement {
        tag_name: String,
        context: Option<String>,
    },

    /// Identifier does not follow the required syntax.
    #[error("Invalid identifier '{value}': {reason}")]
    InvalidId { value: String, reason: &'static str },

    /// Package descriptor could not be deserialized.
    #[error("Invalid package descriptor: {0}")]
    Descriptor(#[from] serde_yaml_ng::Error),
}

impl From<roxmltree::Error> for SbmlError {
    fn from(err: roxmltree::Error) -> Self {
        SbmlError::Structure(format!("XML parsing failed: {err}"))
    }
}

/// Result type alias for SBML core operations.
pub type Result<T> = std::result::Result<T, SbmlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SbmlError::DuplicateList {
            package: "qual".to_string(),
            list: "listOfTransitions".to_string(),
        };
        assert!(err.to_string().contains("listOfTransitions"));
        assert!(err.to_string().contains("qual"));
    }

    #[test]
    fn test_unknown_element_with_context() {
        let err = SbmlError::UnknownElement {
            tag_name: "foo".to_string(),
            context: Some("<model>".to_string()),
        };
        assert_eq!(err.to_string(), "No handler for element <foo> in <model>");
    }

    #[test]
    fn test_unknown_element_without_context() {
        let err = SbmlError::UnknownElement {
            tag_name: "foo".to_string(),
            context: None,
        };
        assert_eq!(err.to_string(), "No handler for element <foo>");
    }

    #[test]
    fn test_xml_error_maps_to_structure() {
        let err: SbmlError = match roxmltree::Document::parse("<a><b></a>") {
            Err(e) => e.into(),
            Ok(_) => unreachable!("input is malformed"),
        };
        assert!(matches!(err, SbmlError::Structure(_)));
        assert!(err.to_string().starts_with("Malformed structure: XML parsing failed"));
    }

    #[test]
    fn test_level_version_mismatch_display() {
        let err = SbmlError::LevelVersionMismatch {
            owner_level: 3,
            owner_version: 1,
            level: 2,
            version: 4,
        };
        assert_eq!(
            err.to_string(),
            "Level/version mismatch: owner is L3V1, object is L2V4"
        );
    }
}
