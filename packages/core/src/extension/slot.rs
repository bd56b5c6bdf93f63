//! Per-owner extension state: the lists one package attaches to one object.

use std::sync::Arc;

use crate::error::{Result, SbmlError};
use crate::extension::descriptor::{ExtensionDescriptor, ListSpec, SlotSpec};
use crate::extension::list::ListOf;
use crate::sbase::SBase;
use crate::xml::Node;

/// The lists of one package on one owner object.
///
/// Lists move from absent to created (empty) to populated; at most one list
/// of each kind exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionSlot {
    descriptor: Arc<ExtensionDescriptor>,
    owner: String,
    prefix: String,
    level: u32,
    version: u32,
    lists: Vec<ListOf>,
}

impl ExtensionSlot {
    /// Slot for `owner` objects at the given level/version.
    ///
    /// Returns `None` when the package attaches nothing to `owner`.
    pub fn new(
        descriptor: Arc<ExtensionDescriptor>,
        owner: &str,
        prefix: impl Into<String>,
        level: u32,
        version: u32,
    ) -> Option<Self> {
        descriptor.slot_for(owner)?;
        Some(Self {
            owner: owner.to_string(),
            prefix: prefix.into(),
            level,
            version,
            lists: Vec::new(),
            descriptor,
        })
    }

    pub fn descriptor(&self) -> &ExtensionDescriptor {
        &self.descriptor
    }

    pub fn package_name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn uri(&self) -> &str {
        &self.descriptor.uri
    }

    /// Prefix list elements are matched and written with; empty means the
    /// package is written in the default namespace.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    fn spec(&self) -> Option<&SlotSpec> {
        self.descriptor.slot_for(&self.owner)
    }

    fn list_spec(&self, kind: &str) -> Result<&ListSpec> {
        self.spec().and_then(|s| s.list(kind)).ok_or_else(|| {
            SbmlError::NotFound(format!(
                "package '{}' has no <{kind}> on <{}>",
                self.descriptor.name, self.owner
            ))
        })
    }

    /// Whether an element with this name and namespace is one of this
    /// slot's list kinds.
    pub fn claims(&self, name: &str, uri: &str) -> bool {
        uri == self.descriptor.uri && self.list_spec(name).is_ok()
    }

    fn new_list(&self, spec: &ListSpec) -> ListOf {
        ListOf::new(
            spec.name.as_str(),
            spec.item.as_str(),
            self.descriptor.name.as_str(),
            (self.level, self.version, self.descriptor.package_version),
        )
    }

    /// Create the list of the given kind.
    ///
    /// # Errors
    /// * [`SbmlError::DuplicateList`] if the list already exists; the
    ///   existing list is left untouched.
    /// * [`SbmlError::NotFound`] if the package has no such list kind.
    pub fn create_list(&mut self, kind: &str) -> Result<&mut ListOf> {
        if self.lists.iter().any(|l| l.name() == kind) {
            return Err(SbmlError::DuplicateList {
                package: self.descriptor.name.clone(),
                list: kind.to_string(),
            });
        }
        let list = self.new_list(self.list_spec(kind)?);
        tracing::debug!(
            package = %self.descriptor.name,
            list = %kind,
            owner = %self.owner,
            "Created extension list"
        );
        self.lists.push(list);
        let last = self.lists.len() - 1;
        Ok(&mut self.lists[last])
    }

    /// List owning elements named `name` written with `prefix`, created on
    /// first use.
    ///
    /// Returns `None` if the prefix is not this package's or the name is not
    /// one of its list kinds, so the caller can try the next package.
    pub fn dispatch(&mut self, name: &str, prefix: &str) -> Option<&mut ListOf> {
        if prefix != self.prefix || self.list_spec(name).is_err() {
            return None;
        }
        match self.lists.iter().position(|l| l.name() == name) {
            Some(index) => self.lists.get_mut(index),
            None => self.create_list(name).ok(),
        }
    }

    /// Existing list of the given kind.
    pub fn list(&self, kind: &str) -> Option<&ListOf> {
        self.lists.iter().find(|l| l.name() == kind)
    }

    pub fn list_mut(&mut self, kind: &str) -> Option<&mut ListOf> {
        self.lists.iter_mut().find(|l| l.name() == kind)
    }

    /// Append a copy of `child` to the list of the given kind, creating the
    /// list if needed.
    ///
    /// # Errors
    /// See [`ListOf::check`]. Nothing is created or changed on error.
    pub fn add(&mut self, kind: &str, child: &SBase) -> Result<()> {
        if let Some(list) = self.list_mut(kind) {
            return list.append(child);
        }
        let mut list = self.new_list(self.list_spec(kind)?);
        list.append(child)?;
        self.lists.push(list);
        Ok(())
    }

    /// Remove the child at `index` from the list of the given kind.
    ///
    /// # Errors
    /// Returns [`SbmlError::NotFound`] if the list or the position does not
    /// exist.
    pub fn remove(&mut self, kind: &str, index: usize) -> Result<SBase> {
        self.existing_list_mut(kind)?.remove(index)
    }

    /// Remove the child with the given `id` from the list of the given kind.
    ///
    /// # Errors
    /// Returns [`SbmlError::NotFound`] if the list or the id does not exist.
    pub fn remove_by_id(&mut self, kind: &str, id: &str) -> Result<SBase> {
        self.existing_list_mut(kind)?.remove_by_id(id)
    }

    fn existing_list_mut(&mut self, kind: &str) -> Result<&mut ListOf> {
        let package = self.descriptor.name.clone();
        self.list_mut(kind)
            .ok_or_else(|| SbmlError::NotFound(format!("package '{package}' has no <{kind}> list")))
    }

    /// Whether every list is absent or empty.
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(ListOf::is_empty)
    }

    /// Non-empty lists serialized in declaration order.
    pub fn to_nodes(&self) -> Vec<Node> {
        let Some(spec) = self.spec() else {
            return Vec::new();
        };
        spec.lists
            .iter()
            .filter_map(|s| self.list(&s.name))
            .filter(|l| !l.is_empty())
            .map(|l| l.to_node(&self.prefix, &self.descriptor.uri))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::registry::{create_default_registry, QUAL_NS};
    use pretty_assertions::assert_eq;

    fn qual_slot() -> ExtensionSlot {
        let qual = create_default_registry().get(QUAL_NS).unwrap();
        ExtensionSlot::new(qual, "model", "qual", 3, 1).unwrap()
    }

    fn item(name: &str, id: &str) -> SBase {
        let mut item = SBase::new(name, 3, 1).with_package_version(1);
        item.set_id(id).unwrap();
        item
    }

    #[test]
    fn test_no_slot_for_other_owner() {
        let qual = create_default_registry().get(QUAL_NS).unwrap();
        assert!(ExtensionSlot::new(qual, "species", "qual", 3, 1).is_none());
    }

    #[test]
    fn test_create_list_duplicate() {
        let mut slot = qual_slot();
        slot.create_list("listOfTransitions")
            .unwrap()
            .append(&item("transition", "t1"))
            .unwrap();

        let err = slot.create_list("listOfTransitions").unwrap_err();
        assert!(matches!(err, SbmlError::DuplicateList { .. }));
        assert_eq!(slot.list("listOfTransitions").map(ListOf::len), Some(1));
    }

    #[test]
    fn test_create_unknown_list() {
        let mut slot = qual_slot();
        assert!(matches!(
            slot.create_list("listOfGroups"),
            Err(SbmlError::NotFound(_))
        ));
    }

    #[test]
    fn test_dispatch_creates_lazily() {
        let mut slot = qual_slot();
        assert!(slot.list("listOfQualitativeSpecies").is_none());

        let list = slot.dispatch("listOfQualitativeSpecies", "qual").unwrap();
        assert!(list.is_empty());
        assert!(slot.list("listOfQualitativeSpecies").is_some());

        // second dispatch returns the same list
        slot.dispatch("listOfQualitativeSpecies", "qual")
            .unwrap()
            .append(&item("qualitativeSpecies", "s1"))
            .unwrap();
        assert_eq!(slot.list("listOfQualitativeSpecies").map(ListOf::len), Some(1));
    }

    #[test]
    fn test_dispatch_rejects_other_prefix_or_name() {
        let mut slot = qual_slot();
        assert!(slot.dispatch("listOfTransitions", "groups").is_none());
        assert!(slot.dispatch("listOfGroups", "qual").is_none());
        assert!(slot.list("listOfTransitions").is_none());
    }

    #[test]
    fn test_claims() {
        let slot = qual_slot();
        assert!(slot.claims("listOfTransitions", QUAL_NS));
        assert!(!slot.claims("listOfTransitions", "urn:other"));
        assert!(!slot.claims("transition", QUAL_NS));
    }

    #[test]
    fn test_add_validates_before_creating() {
        let mut slot = qual_slot();
        let wrong = SBase::new("transition", 3, 1).with_package_version(2);
        assert!(matches!(
            slot.add("listOfTransitions", &wrong),
            Err(SbmlError::PackageVersionMismatch { .. })
        ));
        assert!(slot.list("listOfTransitions").is_none());

        slot.add("listOfTransitions", &item("transition", "t1")).unwrap();
        slot.add("listOfTransitions", &item("transition", "t2")).unwrap();
        assert_eq!(slot.list("listOfTransitions").map(ListOf::len), Some(2));
    }

    #[test]
    fn test_remove() {
        let mut slot = qual_slot();
        slot.add("listOfTransitions", &item("transition", "t1")).unwrap();

        assert!(matches!(
            slot.remove("listOfQualitativeSpecies", 0),
            Err(SbmlError::NotFound(_))
        ));
        assert!(slot.remove_by_id("listOfTransitions", "nope").is_err());
        assert_eq!(
            slot.remove_by_id("listOfTransitions", "t1").unwrap().id(),
            Some("t1")
        );
        assert!(slot.is_empty());
    }

    #[test]
    fn test_to_nodes_skips_empty_and_keeps_order() {
        let mut slot = qual_slot();
        slot.add("listOfTransitions", &item("transition", "t1")).unwrap();
        slot.create_list("listOfQualitativeSpecies").unwrap();

        let nodes = slot.to_nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name(), "listOfTransitions");
        assert_eq!(nodes[0].prefix(), "qual");

        slot.add("listOfQualitativeSpecies", &item("qualitativeSpecies", "s1"))
            .unwrap();
        let names: Vec<_> = slot.to_nodes().iter().map(|n| n.name().to_string()).collect();
        assert_eq!(names, vec!["listOfQualitativeSpecies", "listOfTransitions"]);
    }

    #[test]
    fn test_default_namespace_prefix() {
        let mut slot = qual_slot();
        slot.set_prefix("");
        slot.add("listOfTransitions", &item("transition", "t1")).unwrap();
        assert_eq!(
            slot.to_nodes()[0].to_xml_string(),
            format!("<listOfTransitions xmlns=\"{QUAL_NS}\">\n  <transition id=\"t1\"/>\n</listOfTransitions>")
        );
        assert!(slot.dispatch("listOfTransitions", "").is_some());
    }
}
