//! Controlled-vocabulary terms.

use crate::annotation::qualifier::{Qualifier, QualifierKind};
use crate::error::{Result, SbmlError};

/// A qualifier together with the resources it relates the owner to.
///
/// Resources are kept in first-seen order without duplicates. Nested terms
/// describe the resources further (hierarchical annotation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvTerm {
    qualifier: Qualifier,
    resources: Vec<String>,
    nested: Vec<CvTerm>,
}

impl CvTerm {
    pub fn new(qualifier: impl Into<Qualifier>) -> Self {
        Self {
            qualifier: qualifier.into(),
            resources: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Builder form of [`CvTerm::add_resource`].
    #[must_use]
    pub fn with_resource(mut self, uri: impl Into<String>) -> Self {
        self.add_resource(uri);
        self
    }

    /// Builder form of [`CvTerm::add_nested`].
    #[must_use]
    pub fn with_nested(mut self, term: CvTerm) -> Self {
        self.add_nested(term);
        self
    }

    pub fn qualifier(&self) -> Qualifier {
        self.qualifier
    }

    pub fn set_qualifier(&mut self, qualifier: impl Into<Qualifier>) {
        self.qualifier = qualifier.into();
    }

    pub fn kind(&self) -> QualifierKind {
        self.qualifier.kind()
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn has_resource(&self, uri: &str) -> bool {
        self.resources.iter().any(|r| r == uri)
    }

    /// Add a resource URI. Returns `false` if it was already present.
    pub fn add_resource(&mut self, uri: impl Into<String>) -> bool {
        let uri = uri.into();
        if self.has_resource(&uri) {
            return false;
        }
        self.resources.push(uri);
        true
    }

    /// Remove a resource URI.
    ///
    /// # Errors
    /// Returns [`SbmlError::NotFound`] if the term does not hold `uri`.
    pub fn remove_resource(&mut self, uri: &str) -> Result<()> {
        let pos = self
            .resources
            .iter()
            .position(|r| r == uri)
            .ok_or_else(|| SbmlError::NotFound(format!("resource '{uri}'")))?;
        self.resources.remove(pos);
        Ok(())
    }

    pub fn nested(&self) -> &[CvTerm] {
        &self.nested
    }

    /// Append a nested term unless an equal one is already present.
    pub fn add_nested(&mut self, term: CvTerm) {
        if !self.nested.contains(&term) {
            self.nested.push(term);
        }
    }

    /// Union `other` into this term: new resources are appended, nested
    /// terms already present are skipped.
    pub fn merge_from(&mut self, other: &CvTerm) {
        for uri in &other.resources {
            self.add_resource(uri.as_str());
        }
        for term in &other.nested {
            self.add_nested(term.clone());
        }
    }
}
