//! Package descriptors: what a package adds to which core element.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Static description of an extension package.
///
/// # Examples
/// ```
/// use sbml_core::extension::ExtensionDescriptor;
///
/// let yaml = r#"
/// name: qual
/// uri: http://www.sbml.org/sbml/level3/version1/qual/version1
/// default_prefix: qual
/// level: 3
/// version: 1
/// package_version: 1
/// required: true
/// slots:
///   - owner: model
///     lists:
///       - name: listOfTransitions
///         item: transition
/// "#;
/// let descriptor = ExtensionDescriptor::from_yaml(yaml).unwrap();
/// assert_eq!(descriptor.name, "qual");
/// assert!(descriptor.slot_for("model").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    /// Short package name (e.g. `qual`).
    pub name: String,
    /// Namespace URI identifying the package and its version.
    pub uri: String,
    /// Prefix used when the document does not choose one.
    pub default_prefix: String,
    /// SBML level the package extends.
    pub level: u32,
    /// SBML version the package extends.
    pub version: u32,
    /// Version of the package itself.
    pub package_version: u32,
    /// Whether documents using the package must declare it required.
    #[serde(default)]
    pub required: bool,
    /// Child lists the package attaches to core elements.
    #[serde(default)]
    pub slots: Vec<SlotSpec>,
}

/// Lists one package attaches to one kind of owner element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpec {
    /// Element name of the owner (e.g. `model`).
    pub owner: String,
    /// Lists in output order.
    pub lists: Vec<ListSpec>,
}

/// One list kind, e.g. `listOfTransitions` holding `transition` items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSpec {
    pub name: String,
    pub item: String,
}

impl ListSpec {
    pub fn new(name: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: item.into(),
        }
    }
}

impl SlotSpec {
    /// List spec by list element name.
    pub fn list(&self, name: &str) -> Option<&ListSpec> {
        self.lists.iter().find(|l| l.name == name)
    }
}

impl ExtensionDescriptor {
    /// Deserialize a descriptor from YAML.
    ///
    /// # Errors
    /// Returns [`crate::SbmlError::Descriptor`] if the YAML is invalid or
    /// misses required fields.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Serialize the descriptor to YAML.
    ///
    /// # Errors
    /// Returns [`crate::SbmlError::Descriptor`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Slot spec for an owner element name.
    pub fn slot_for(&self, owner: &str) -> Option<&SlotSpec> {
        self.slots.iter().find(|s| s.owner == owner)
    }

    /// Whether the package extends objects of the given SBML level/version.
    pub fn supports(&self, level: u32, version: u32) -> bool {
        self.level == level && self.version == version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SbmlError;

    const GROUPS: &str = r#"
name: groups
uri: http://www.sbml.org/sbml/level3/version1/groups/version1
default_prefix: groups
level: 3
version: 1
package_version: 1
slots:
  - owner: model
    lists:
      - name: listOfGroups
        item: group
"#;

    #[test]
    fn test_from_yaml() {
        let descriptor = ExtensionDescriptor::from_yaml(GROUPS).unwrap();
        assert_eq!(descriptor.default_prefix, "groups");
        assert!(!descriptor.required);
        let slot = descriptor.slot_for("model").unwrap();
        assert_eq!(slot.list("listOfGroups").map(|l| l.item.as_str()), Some("group"));
        assert!(slot.list("listOfTransitions").is_none());
        assert!(descriptor.slot_for("species").is_none());
    }

    #[test]
    fn test_from_yaml_missing_field() {
        let err = ExtensionDescriptor::from_yaml("name: broken\n").unwrap_err();
        assert!(matches!(err, SbmlError::Descriptor(_)));
    }

    #[test]
    fn test_yaml_round_trip() {
        let descriptor = ExtensionDescriptor::from_yaml(GROUPS).unwrap();
        let yaml = descriptor.to_yaml().unwrap();
        assert_eq!(ExtensionDescriptor::from_yaml(&yaml).unwrap(), descriptor);
    }

    #[test]
    fn test_supports() {
        let descriptor = ExtensionDescriptor::from_yaml(GROUPS).unwrap();
        assert!(descriptor.supports(3, 1));
        assert!(!descriptor.supports(2, 4));
    }
}
