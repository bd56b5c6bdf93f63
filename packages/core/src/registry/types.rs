//! Types for the element registry system.

use std::fmt;

use crate::config::{core_namespace_uri, is_core_namespace};
use crate::extension::EnabledPackage;

/// Classification of element types for processing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// `notes` and `annotation`, stored in the owner's annotation store.
    Metadata,
    /// Markup kept as a raw tree (MathML `math`).
    Verbatim,
    /// Nested core or package objects.
    Object,
}

/// Context passed through read operations.
pub struct ReadContext<'a> {
    /// SBML level of the document being read.
    pub level: u32,

    /// SBML version of the document being read.
    pub version: u32,

    /// Packages enabled on the document.
    pub packages: &'a [EnabledPackage],

    /// Current element nesting depth.
    pub depth: usize,
}

impl<'a> ReadContext<'a> {
    /// Create a new read context.
    #[must_use]
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            level,
            version,
            packages: &[],
            depth: 0,
        }
    }

    /// Set the enabled packages.
    #[must_use]
    pub fn with_packages(mut self, packages: &'a [EnabledPackage]) -> Self {
        self.packages = packages;
        self
    }

    /// Enabled package owning a namespace URI.
    pub fn package_for_uri(&self, uri: &str) -> Option<&'a EnabledPackage> {
        self.packages.iter().find(|p| p.uri() == uri)
    }

    /// Whether `uri` is the core namespace (or no namespace at all).
    pub fn is_core_uri(&self, uri: &str) -> bool {
        uri.is_empty()
            || core_namespace_uri(self.level, self.version) == Some(uri)
            || is_core_namespace(uri)
    }

    /// Whether elements in `uri` can be read as objects.
    pub fn is_known_uri(&self, uri: &str) -> bool {
        self.is_core_uri(uri) || self.package_for_uri(uri).is_some()
    }
}

impl fmt::Debug for ReadContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadContext")
            .field("level", &self.level)
            .field("version", &self.version)
            .field(
                "packages",
                &self.packages.iter().map(EnabledPackage::uri).collect::<Vec<_>>(),
            )
            .field("depth", &self.depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{create_default_registry, QUAL_NS};

    #[test]
    fn test_read_context_new() {
        let ctx = ReadContext::new(3, 1);
        assert_eq!(ctx.level, 3);
        assert_eq!(ctx.version, 1);
        assert!(ctx.packages.is_empty());
        assert_eq!(ctx.depth, 0);
    }

    #[test]
    fn test_known_uris() {
        let packages = vec![EnabledPackage::new(
            create_default_registry().get(QUAL_NS).unwrap(),
        )];
        let ctx = ReadContext::new(3, 1).with_packages(&packages);

        assert!(ctx.is_core_uri(""));
        assert!(ctx.is_core_uri("http://www.sbml.org/sbml/level3/version1/core"));
        assert!(!ctx.is_core_uri(QUAL_NS));
        assert!(ctx.is_known_uri(QUAL_NS));
        assert!(!ctx.is_known_uri("urn:unknown"));
        assert_eq!(ctx.package_for_uri(QUAL_NS).map(|p| p.prefix.as_str()), Some("qual"));
    }
}
