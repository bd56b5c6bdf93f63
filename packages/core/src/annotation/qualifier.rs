//! Controlled-vocabulary qualifiers.
//!
//! Qualifiers come in two independent spaces, biological (`bqbiol:`) and
//! model (`bqmodel:`). Only their storage and RDF element names are modelled
//! here; what a qualifier means is up to the consumer.

use crate::config::{BQBIOL_NS, BQMODEL_NS};

/// Qualifier space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualifierKind {
    Biological,
    Model,
}

impl QualifierKind {
    /// Conventional prefix of the qualifier namespace.
    pub fn prefix(self) -> &'static str {
        match self {
            QualifierKind::Biological => "bqbiol",
            QualifierKind::Model => "bqmodel",
        }
    }

    pub fn namespace(self) -> &'static str {
        match self {
            QualifierKind::Biological => BQBIOL_NS,
            QualifierKind::Model => BQMODEL_NS,
        }
    }

    /// Qualifier space of a namespace URI.
    pub fn from_namespace(uri: &str) -> Option<Self> {
        match uri {
            BQBIOL_NS => Some(QualifierKind::Biological),
            BQMODEL_NS => Some(QualifierKind::Model),
            _ => None,
        }
    }
}

/// Biological qualifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiolQualifier {
    Is,
    HasPart,
    IsPartOf,
    IsVersionOf,
    HasVersion,
    IsHomologTo,
    IsDescribedBy,
    IsEncodedBy,
    Encodes,
    OccursIn,
    HasProperty,
    IsPropertyOf,
    HasTaxon,
    Unknown,
}

const BIOL_NAMES: &[(BiolQualifier, &str)] = &[
    (BiolQualifier::Is, "is"),
    (BiolQualifier::HasPart, "hasPart"),
    (BiolQualifier::IsPartOf, "isPartOf"),
    (BiolQualifier::IsVersionOf, "isVersionOf"),
    (BiolQualifier::HasVersion, "hasVersion"),
    (BiolQualifier::IsHomologTo, "isHomologTo"),
    (BiolQualifier::IsDescribedBy, "isDescribedBy"),
    (BiolQualifier::IsEncodedBy, "isEncodedBy"),
    (BiolQualifier::Encodes, "encodes"),
    (BiolQualifier::OccursIn, "occursIn"),
    (BiolQualifier::HasProperty, "hasProperty"),
    (BiolQualifier::IsPropertyOf, "isPropertyOf"),
    (BiolQualifier::HasTaxon, "hasTaxon"),
];

impl BiolQualifier {
    /// RDF element name, `None` for [`BiolQualifier::Unknown`].
    pub fn element_name(self) -> Option<&'static str> {
        BIOL_NAMES
            .iter()
            .find(|(q, _)| *q == self)
            .map(|(_, name)| *name)
    }

    /// Parse an RDF element name; unrecognized names map to `Unknown`.
    pub fn from_element_name(name: &str) -> Self {
        BIOL_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map_or(BiolQualifier::Unknown, |(q, _)| *q)
    }
}

/// Model qualifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelQualifier {
    Is,
    IsDescribedBy,
    IsDerivedFrom,
    IsInstanceOf,
    HasInstance,
    Unknown,
}

const MODEL_NAMES: &[(ModelQualifier, &str)] = &[
    (ModelQualifier::Is, "is"),
    (ModelQualifier::IsDescribedBy, "isDescribedBy"),
    (ModelQualifier::IsDerivedFrom, "isDerivedFrom"),
    (ModelQualifier::IsInstanceOf, "isInstanceOf"),
    (ModelQualifier::HasInstance, "hasInstance"),
];

impl ModelQualifier {
    /// RDF element name, `None` for [`ModelQualifier::Unknown`].
    pub fn element_name(self) -> Option<&'static str> {
        MODEL_NAMES
            .iter()
            .find(|(q, _)| *q == self)
            .map(|(_, name)| *name)
    }

    /// Parse an RDF element name; unrecognized names map to `Unknown`.
    pub fn from_element_name(name: &str) -> Self {
        MODEL_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map_or(ModelQualifier::Unknown, |(q, _)| *q)
    }
}

/// A qualifier from either space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    Biological(BiolQualifier),
    Model(ModelQualifier),
}

impl Qualifier {
    pub fn kind(self) -> QualifierKind {
        match self {
            Qualifier::Biological(_) => QualifierKind::Biological,
            Qualifier::Model(_) => QualifierKind::Model,
        }
    }

    /// RDF element name, `None` for unknown qualifiers.
    pub fn element_name(self) -> Option<&'static str> {
        match self {
            Qualifier::Biological(q) => q.element_name(),
            Qualifier::Model(q) => q.element_name(),
        }
    }

    /// Qualifier for an RDF element, given its namespace and local name.
    ///
    /// Returns `None` when the namespace is not a qualifier namespace.
    pub fn from_element(uri: &str, name: &str) -> Option<Self> {
        QualifierKind::from_namespace(uri).map(|kind| match kind {
            QualifierKind::Biological => {
                Qualifier::Biological(BiolQualifier::from_element_name(name))
            }
            QualifierKind::Model => Qualifier::Model(ModelQualifier::from_element_name(name)),
        })
    }

    pub fn is_unknown(self) -> bool {
        self.element_name().is_none()
    }
}

impl From<BiolQualifier> for Qualifier {
    fn from(q: BiolQualifier) -> Self {
        Qualifier::Biological(q)
    }
}

impl From<ModelQualifier> for Qualifier {
    fn from(q: ModelQualifier) -> Self {
        Qualifier::Model(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_names_round_trip() {
        for (q, name) in BIOL_NAMES {
            assert_eq!(BiolQualifier::from_element_name(name), *q);
            assert_eq!(q.element_name(), Some(*name));
        }
        for (q, name) in MODEL_NAMES {
            assert_eq!(ModelQualifier::from_element_name(name), *q);
        }
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            BiolQualifier::from_element_name("isSomethingElse"),
            BiolQualifier::Unknown
        );
        assert_eq!(BiolQualifier::Unknown.element_name(), None);
        assert!(Qualifier::Model(ModelQualifier::Unknown).is_unknown());
    }

    #[test]
    fn test_from_element() {
        assert_eq!(
            Qualifier::from_element(BQBIOL_NS, "encodes"),
            Some(Qualifier::Biological(BiolQualifier::Encodes))
        );
        assert_eq!(
            Qualifier::from_element(BQMODEL_NS, "is"),
            Some(Qualifier::Model(ModelQualifier::Is))
        );
        assert_eq!(Qualifier::from_element("urn:other", "is"), None);
    }

    #[test]
    fn test_same_name_different_space() {
        let biol: Qualifier = BiolQualifier::Is.into();
        let model: Qualifier = ModelQualifier::Is.into();
        assert_ne!(biol, model);
        assert_eq!(biol.kind().prefix(), "bqbiol");
        assert_eq!(model.kind().namespace(), BQMODEL_NS);
    }
}
