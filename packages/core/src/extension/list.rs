//! Typed, ordered child-object lists (`listOf...`).

use crate::error::{Result, SbmlError};
use crate::sbase::SBase;
use crate::xml::{Attribute, Node, QName};

/// One `listOf...` element and its items.
///
/// Items must carry the list's item element name and the owner's
/// (level, version, package version) triple.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOf {
    name: String,
    item_name: String,
    package: String,
    level: u32,
    version: u32,
    package_version: u32,
    attributes: Vec<Attribute>,
    items: Vec<SBase>,
}

impl ListOf {
    pub fn new(
        name: impl Into<String>,
        item_name: impl Into<String>,
        package: impl Into<String>,
        (level, version, package_version): (u32, u32, u32),
    ) -> Self {
        Self {
            name: name.into(),
            item_name: item_name.into(),
            package: package.into(),
            level,
            version,
            package_version,
            attributes: Vec::new(),
            items: Vec::new(),
        }
    }

    /// List element name, e.g. `listOfTransitions`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element name every item must have.
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Attributes of the list element itself.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of a list attribute by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set a list attribute, replacing one with the same name and namespace.
    pub fn set_attribute(&mut self, attribute: Attribute) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.name.name == attribute.name.name && a.name.uri == attribute.name.uri)
        {
            Some(existing) => existing.value = attribute.value,
            None => self.attributes.push(attribute),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SBase> {
        self.items.iter()
    }

    /// Check that `item` may be stored in this list.
    ///
    /// # Errors
    /// * [`SbmlError::Structure`] if the item has the wrong element name.
    /// * [`SbmlError::LevelVersionMismatch`] if level or version differ.
    /// * [`SbmlError::PackageVersionMismatch`] if the package version differs.
    pub fn check(&self, item: &SBase) -> Result<()> {
        if item.element_name() != self.item_name {
            return Err(SbmlError::Structure(format!(
                "<{}> only holds <{}> items, got <{}>",
                self.name,
                self.item_name,
                item.element_name()
            )));
        }
        if item.level() != self.level || item.version() != self.version {
            return Err(SbmlError::LevelVersionMismatch {
                owner_level: self.level,
                owner_version: self.version,
                level: item.level(),
                version: item.version(),
            });
        }
        if item.package_version() != self.package_version {
            return Err(SbmlError::PackageVersionMismatch {
                package: self.package.clone(),
                expected: self.package_version,
                actual: item.package_version(),
            });
        }
        Ok(())
    }

    /// Append a copy of `item`.
    ///
    /// # Errors
    /// See [`ListOf::check`]; the list is unchanged on error.
    pub fn append(&mut self, item: &SBase) -> Result<()> {
        self.check(item)?;
        self.items.push(item.clone());
        Ok(())
    }

    /// Append `item`, taking ownership.
    pub fn push(&mut self, item: SBase) -> Result<()> {
        self.check(&item)?;
        self.items.push(item);
        Ok(())
    }

    /// Append all `items`, or none of them if any fails the check.
    pub fn extend(&mut self, items: Vec<SBase>) -> Result<()> {
        for item in &items {
            self.check(item)?;
        }
        self.items.extend(items);
        Ok(())
    }

    /// Item at position `index`.
    ///
    /// # Errors
    /// Returns [`SbmlError::Index`] if `index` is out of range.
    pub fn get(&self, index: usize) -> Result<&SBase> {
        self.items.get(index).ok_or(SbmlError::Index {
            index,
            len: self.items.len(),
        })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut SBase> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(SbmlError::Index { index, len })
    }

    /// Item with the given `id` attribute.
    pub fn get_by_id(&self, id: &str) -> Option<&SBase> {
        self.items.iter().find(|item| item.id() == Some(id))
    }

    /// Remove and return the item at `index`.
    ///
    /// # Errors
    /// Returns [`SbmlError::NotFound`] if there is no item at `index`.
    pub fn remove(&mut self, index: usize) -> Result<SBase> {
        if index >= self.items.len() {
            return Err(SbmlError::NotFound(format!(
                "no item at position {index} in <{}>",
                self.name
            )));
        }
        Ok(self.items.remove(index))
    }

    /// Remove and return the item with the given `id`.
    ///
    /// # Errors
    /// Returns [`SbmlError::NotFound`] if no item has that id.
    pub fn remove_by_id(&mut self, id: &str) -> Result<SBase> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == Some(id))
            .ok_or_else(|| SbmlError::NotFound(format!("no item '{id}' in <{}>", self.name)))?;
        Ok(self.items.remove(index))
    }

    /// Serialize the list with its items in the package namespace.
    pub fn to_node(&self, prefix: &str, uri: &str) -> Node {
        let mut node = Node::qualified(QName::with_ns(self.name.as_str(), prefix, uri));
        if let Some(token) = node.token_mut().as_element_mut() {
            token.attributes.extend(self.attributes.iter().cloned());
        }
        for item in &self.items {
            node.push_child(item.to_node_as(prefix, uri));
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transitions() -> ListOf {
        ListOf::new("listOfTransitions", "transition", "qual", (3, 1, 1))
    }

    fn transition(id: &str) -> SBase {
        let mut item = SBase::new("transition", 3, 1).with_package_version(1);
        item.set_id(id).unwrap();
        item
    }

    #[test]
    fn test_append_and_get() {
        let mut list = transitions();
        list.append(&transition("t1")).unwrap();
        list.append(&transition("t2")).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().id(), Some("t2"));
        assert!(matches!(list.get(2), Err(SbmlError::Index { index: 2, len: 2 })));
        assert_eq!(list.get_by_id("t1").map(SBase::element_name), Some("transition"));
        assert!(list.get_by_id("t9").is_none());
    }

    #[test]
    fn test_package_version_mismatch_leaves_list() {
        let mut list = transitions();
        list.append(&transition("t1")).unwrap();

        let wrong = SBase::new("transition", 3, 1).with_package_version(2);
        let err = list.append(&wrong).unwrap_err();
        assert!(matches!(
            err,
            SbmlError::PackageVersionMismatch { expected: 1, actual: 2, .. }
        ));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_level_checked_before_package_version() {
        let mut list = transitions();
        let wrong = SBase::new("transition", 2, 4).with_package_version(2);
        assert!(matches!(
            list.append(&wrong),
            Err(SbmlError::LevelVersionMismatch { level: 2, version: 4, .. })
        ));
    }

    #[test]
    fn test_wrong_item_type() {
        let mut list = transitions();
        let species = SBase::new("qualitativeSpecies", 3, 1).with_package_version(1);
        assert!(matches!(list.append(&species), Err(SbmlError::Structure(_))));
        assert!(list.is_empty());
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut list = transitions();
        let items = vec![transition("t1"), SBase::new("transition", 3, 2).with_package_version(1)];
        assert!(list.extend(items).is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut list = transitions();
        list.append(&transition("t1")).unwrap();
        list.append(&transition("t2")).unwrap();

        assert_eq!(list.remove_by_id("t2").unwrap().id(), Some("t2"));
        assert!(matches!(list.remove_by_id("t2"), Err(SbmlError::NotFound(_))));
        assert_eq!(list.remove(0).unwrap().id(), Some("t1"));
        assert!(matches!(list.remove(0), Err(SbmlError::NotFound(_))));
    }

    #[test]
    fn test_list_attributes() {
        let mut list = transitions();
        list.set_attribute(Attribute::new("metaid", "l1"));
        list.set_attribute(Attribute::new("metaid", "l2"));
        assert_eq!(list.attributes().len(), 1);
        assert_eq!(list.attribute("metaid"), Some("l2"));

        list.append(&transition("t1")).unwrap();
        assert_eq!(list.to_node("", "urn:qual").attribute("metaid"), Some("l2"));
    }

    #[test]
    fn test_to_node() {
        let mut list = transitions();
        list.append(&transition("t1")).unwrap();
        let node = list.to_node("qual", "urn:qual");
        assert_eq!(
            node.to_xml_string(),
            "<qual:listOfTransitions xmlns:qual=\"urn:qual\">\n  \
             <qual:transition id=\"t1\"/>\n</qual:listOfTransitions>"
        );
    }
}
