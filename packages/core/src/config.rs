//! Configuration constants and validation functions for the SBML core.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, SbmlError};

/// Namespace of the XHTML content carried by `<notes>`.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// RDF syntax namespace used by CVTerm annotations.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Dublin Core terms namespace (model history).
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";

/// vCard namespace (model history creators).
pub const VCARD_NS: &str = "http://www.w3.org/2001/vcard-rdf/3.0#";

/// Namespace of the biological qualifiers (`bqbiol:`).
pub const BQBIOL_NS: &str = "http://biomodels.net/biology-qualifiers/";

/// Namespace of the model qualifiers (`bqmodel:`).
pub const BQMODEL_NS: &str = "http://biomodels.net/model-qualifiers/";

/// MathML namespace.
pub const MATHML_NS: &str = "http://www.w3.org/1998/Math/MathML";

/// Spaces per nesting level in serialized output.
pub const INDENT_WIDTH: usize = 2;

/// Maximum element nesting accepted in input.
///
/// Checked on the raw text before parsing, so it also bounds the XML
/// parser's own recursion on a default thread stack. Real notes and
/// annotations rarely exceed a dozen levels.
pub const MAX_TREE_DEPTH: usize = 64;

/// Default SBML level for newly created objects.
pub const DEFAULT_LEVEL: u32 = 3;

/// Default SBML version for newly created objects.
pub const DEFAULT_VERSION: u32 = 1;

/// XML ID syntax used by `metaid`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static META_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{N}_.\-]*$").expect("valid regex"));

/// SBML SId syntax used by `id`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

/// Validate a `metaid` value (XML ID syntax).
///
/// # Examples
/// ```
/// use sbml_core::config::validate_meta_id;
///
/// assert!(validate_meta_id("_x12345").is_ok());
/// assert!(validate_meta_id("1abc").is_err());
/// ```
pub fn validate_meta_id(meta_id: &str) -> Result<()> {
    if META_ID_PATTERN.is_match(meta_id) {
        Ok(())
    } else {
        Err(SbmlError::InvalidId {
            value: meta_id.to_string(),
            reason: "metaid must follow the XML ID syntax",
        })
    }
}

/// Validate an `id` value (SBML SId syntax).
///
/// # Examples
/// ```
/// use sbml_core::config::validate_sid;
///
/// assert!(validate_sid("mitochondria").is_ok());
/// assert!(validate_sid("not-an-sid").is_err());
/// ```
pub fn validate_sid(sid: &str) -> Result<()> {
    if SID_PATTERN.is_match(sid) {
        Ok(())
    } else {
        Err(SbmlError::InvalidId {
            value: sid.to_string(),
            reason: "id must be a letter or underscore followed by letters, digits or underscores",
        })
    }
}

/// Core namespace URI for an SBML level and version.
///
/// Returns `None` for combinations that were never published.
pub fn core_namespace_uri(level: u32, version: u32) -> Option<&'static str> {
    match (level, version) {
        (1, 1) | (1, 2) => Some("http://www.sbml.org/sbml/level1"),
        (2, 1) => Some("http://www.sbml.org/sbml/level2"),
        (2, 2) => Some("http://www.sbml.org/sbml/level2/version2"),
        (2, 3) => Some("http://www.sbml.org/sbml/level2/version3"),
        (2, 4) => Some("http://www.sbml.org/sbml/level2/version4"),
        (2, 5) => Some("http://www.sbml.org/sbml/level2/version5"),
        (3, 1) => Some("http://www.sbml.org/sbml/level3/version1/core"),
        (3, 2) => Some("http://www.sbml.org/sbml/level3/version2/core"),
        _ => None,
    }
}

/// Level and version announced by a core namespace URI.
///
/// Level 1 URIs map to version 2, the last Level 1 revision.
pub fn level_version_for_uri(uri: &str) -> Option<(u32, u32)> {
    match uri {
        "http://www.sbml.org/sbml/level1" => Some((1, 2)),
        "http://www.sbml.org/sbml/level2" => Some((2, 1)),
        "http://www.sbml.org/sbml/level2/version2" => Some((2, 2)),
        "http://www.sbml.org/sbml/level2/version3" => Some((2, 3)),
        "http://www.sbml.org/sbml/level2/version4" => Some((2, 4)),
        "http://www.sbml.org/sbml/level2/version5" => Some((2, 5)),
        "http://www.sbml.org/sbml/level3/version1/core" => Some((3, 1)),
        "http://www.sbml.org/sbml/level3/version2/core" => Some((3, 2)),
        _ => None,
    }
}

/// Check whether a URI is one of the SBML core namespaces.
pub fn is_core_namespace(uri: &str) -> bool {
    uri.starts_with("http://www.sbml.org/sbml/level")
        && (uri.ends_with("/core") || !uri.contains("/level3/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_meta_id_valid() {
        assert!(validate_meta_id("x12345").is_ok());
        assert!(validate_meta_id("_meta.1-a").is_ok());
        assert!(validate_meta_id("métaid").is_ok());
    }

    #[test]
    fn test_validate_meta_id_invalid() {
        assert!(validate_meta_id("").is_err());
        assert!(validate_meta_id("1abc").is_err());
        assert!(validate_meta_id("has space").is_err());
        assert!(validate_meta_id("-dash").is_err());
    }

    #[test]
    fn test_validate_sid() {
        assert!(validate_sid("A").is_ok());
        assert!(validate_sid("_s1").is_ok());
        assert!(validate_sid("").is_err());
        assert!(validate_sid("s.1").is_err());
        assert!(validate_sid("9lives").is_err());
    }

    #[test]
    fn test_core_namespace_uri() {
        assert_eq!(
            core_namespace_uri(1, 1),
            Some("http://www.sbml.org/sbml/level1")
        );
        assert_eq!(
            core_namespace_uri(1, 2),
            Some("http://www.sbml.org/sbml/level1")
        );
        assert_eq!(
            core_namespace_uri(2, 1),
            Some("http://www.sbml.org/sbml/level2")
        );
        assert_eq!(
            core_namespace_uri(2, 4),
            Some("http://www.sbml.org/sbml/level2/version4")
        );
        assert_eq!(
            core_namespace_uri(3, 1),
            Some("http://www.sbml.org/sbml/level3/version1/core")
        );
        assert_eq!(core_namespace_uri(4, 1), None);
    }

    #[test]
    fn test_level_version_for_uri() {
        assert_eq!(
            level_version_for_uri("http://www.sbml.org/sbml/level3/version1/core"),
            Some((3, 1))
        );
        assert_eq!(
            level_version_for_uri("http://www.sbml.org/sbml/level2/version4"),
            Some((2, 4))
        );
        assert_eq!(level_version_for_uri(XHTML_NS), None);
    }

    #[test]
    fn test_is_core_namespace() {
        assert!(is_core_namespace("http://www.sbml.org/sbml/level2/version4"));
        assert!(is_core_namespace(
            "http://www.sbml.org/sbml/level3/version1/core"
        ));
        assert!(!is_core_namespace(
            "http://www.sbml.org/sbml/level3/version1/qual/version1"
        ));
        assert!(!is_core_namespace(XHTML_NS));
    }
}
