//! SBML documents: the `<sbml>` root, its enabled packages and one model.

use std::sync::Arc;

use roxmltree::Document as XmlDocument;

use crate::config::{core_namespace_uri, level_version_for_uri};
use crate::error::{Result, SbmlError};
use crate::extension::{global, EnabledPackage, ExtensionDescriptor};
use crate::registry::{create_core_registry, ReadContext, ReadEngine};
use crate::sbase::SBase;
use crate::xml::{check_depth, get_tag_name, Attribute, QName, XmlWriter};

const ROOT: &str = "sbml";
const MODEL: &str = "model";

/// An SBML document.
///
/// The root object carries the core namespace, the `level`/`version`
/// attributes and, for every enabled package, its namespace declaration and
/// `prefix:required` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    level: u32,
    version: u32,
    packages: Vec<EnabledPackage>,
    root: SBase,
}

fn unsupported(level: u32, version: u32) -> SbmlError {
    SbmlError::Precondition(format!("unsupported SBML level {level} version {version}"))
}

impl Document {
    /// Create an empty document.
    ///
    /// # Errors
    /// Returns [`SbmlError::Precondition`] for an unknown level/version.
    pub fn new(level: u32, version: u32) -> Result<Self> {
        let uri = core_namespace_uri(level, version).ok_or_else(|| unsupported(level, version))?;
        let mut root = SBase::new(ROOT, level, version).with_namespace("", uri);
        root.add_namespace("", uri);
        root.set_attribute("level", level.to_string())?;
        root.set_attribute("version", version.to_string())?;
        Ok(Self {
            level,
            version,
            packages: Vec::new(),
            root,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// The `<sbml>` root object.
    pub fn root(&self) -> &SBase {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut SBase {
        &mut self.root
    }

    pub fn packages(&self) -> &[EnabledPackage] {
        &self.packages
    }

    pub fn is_package_enabled(&self, uri: &str) -> bool {
        self.packages.iter().any(|p| p.uri() == uri)
    }

    /// Enable a package known to the process-wide registry.
    ///
    /// # Errors
    /// * [`SbmlError::NotFound`] if `uri` is not registered.
    /// * [`SbmlError::LevelVersionMismatch`] if the package is defined for
    ///   another level/version.
    pub fn enable_package(&mut self, uri: &str) -> Result<()> {
        let descriptor = global()
            .get(uri)
            .ok_or_else(|| SbmlError::NotFound(format!("no package registered for '{uri}'")))?;
        self.enable_package_with(descriptor)
    }

    /// Enable a package from its descriptor. Enabling twice is a no-op.
    ///
    /// # Errors
    /// Returns [`SbmlError::LevelVersionMismatch`] if the package is defined
    /// for another level/version.
    pub fn enable_package_with(&mut self, descriptor: Arc<ExtensionDescriptor>) -> Result<()> {
        if !descriptor.supports(self.level, self.version) {
            return Err(SbmlError::LevelVersionMismatch {
                owner_level: self.level,
                owner_version: self.version,
                level: descriptor.level,
                version: descriptor.version,
            });
        }
        if self.is_package_enabled(&descriptor.uri) {
            return Ok(());
        }

        let package = EnabledPackage::new(descriptor);
        if let Some(model) = self.root.find_child_mut(MODEL) {
            model.enable_package(&package)?;
        }
        self.root
            .add_namespace(package.prefix.as_str(), package.uri());
        self.root.set_qualified_attribute(Attribute {
            name: QName::with_ns("required", package.prefix.as_str(), package.uri()),
            value: package.descriptor.required.to_string(),
        })?;

        tracing::debug!(
            package = %package.descriptor.name,
            uri = %package.uri(),
            "Enabled package"
        );
        self.packages.push(package);
        Ok(())
    }

    /// Disable a package, dropping its lists from the model. Returns `false`
    /// if it was not enabled.
    pub fn disable_package(&mut self, uri: &str) -> bool {
        let before = self.packages.len();
        self.packages.retain(|p| p.uri() != uri);
        if self.packages.len() == before {
            return false;
        }
        self.root.remove_namespace(uri);
        if let Some(model) = self.root.find_child_mut(MODEL) {
            model.disable_package(uri);
        }
        true
    }

    /// Write a package's elements in the default namespace (`xmlns="uri"`)
    /// instead of with its prefix.
    ///
    /// # Errors
    /// Returns [`SbmlError::NotFound`] if the package is not enabled.
    pub fn enable_default_ns(&mut self, uri: &str, flag: bool) -> Result<()> {
        let package = self
            .packages
            .iter_mut()
            .find(|p| p.uri() == uri)
            .ok_or_else(|| SbmlError::NotFound(format!("package '{uri}' is not enabled")))?;
        package.default_ns = flag;
        let prefix = package.element_prefix().to_string();
        self.root.set_package_prefix(uri, &prefix);
        Ok(())
    }

    // --- model -----------------------------------------------------------

    pub fn model(&self) -> Option<&SBase> {
        self.root.find_child(MODEL)
    }

    pub fn model_mut(&mut self) -> Option<&mut SBase> {
        self.root.find_child_mut(MODEL)
    }

    /// Create the document's model with every enabled package attached.
    ///
    /// # Errors
    /// Returns [`SbmlError::Precondition`] if a model already exists.
    pub fn create_model(&mut self) -> Result<&mut SBase> {
        if self.model().is_some() {
            return Err(SbmlError::Precondition(
                "document already has a model".to_string(),
            ));
        }
        let model = SBase::new(MODEL, self.level, self.version);
        self.attach_model(model)
    }

    /// Replace the model with a copy of `model`.
    ///
    /// # Errors
    /// Returns [`SbmlError::LevelVersionMismatch`] if `model` has another
    /// level/version; the current model is kept.
    pub fn set_model(&mut self, model: &SBase) -> Result<()> {
        if model.level() != self.level || model.version() != self.version {
            return Err(SbmlError::LevelVersionMismatch {
                owner_level: self.level,
                owner_version: self.version,
                level: model.level(),
                version: model.version(),
            });
        }
        let found = self.root.children().position(|c| c.element_name() == MODEL);
        if let Some(index) = found {
            self.root.remove_child(index)?;
        }
        self.attach_model(model.clone())?;
        Ok(())
    }

    fn attach_model(&mut self, mut model: SBase) -> Result<&mut SBase> {
        for package in &self.packages {
            model.enable_package(package)?;
            model.set_package_prefix(package.uri(), package.element_prefix());
        }
        self.root.push_child(model)?;
        self.root
            .find_child_mut(MODEL)
            .ok_or_else(|| SbmlError::NotFound("model".to_string()))
    }

    // --- input / output --------------------------------------------------

    /// Read a document from XML text.
    ///
    /// Packages are enabled for every root namespace declaration whose URI
    /// is in the process-wide registry, with the prefix used in the input.
    ///
    /// # Errors
    /// * [`SbmlError::Structure`] for malformed XML, nesting deeper than
    ///   [`MAX_TREE_DEPTH`](crate::config::MAX_TREE_DEPTH), a root other
    ///   than `<sbml>`, missing level/version or more than one model.
    /// * Any error raised while reading the content (see
    ///   [`ReadEngine::read_object`]).
    pub fn read_str(xml: &str) -> Result<Self> {
        check_depth(xml)?;
        let doc = XmlDocument::parse(xml)?;
        let root = doc.root_element();
        if get_tag_name(root) != ROOT {
            return Err(SbmlError::Structure(format!(
                "expected <{ROOT}> root element, found <{}>",
                get_tag_name(root)
            )));
        }

        let (level, version) = read_level_version(root)?;
        if core_namespace_uri(level, version).is_none() {
            return Err(unsupported(level, version));
        }

        let registry = global();
        let mut packages = Vec::new();
        for ns in root.namespaces() {
            let (Some(prefix), Some(descriptor)) = (ns.name(), registry.get(ns.uri())) else {
                continue;
            };
            if !descriptor.supports(level, version) {
                return Err(SbmlError::LevelVersionMismatch {
                    owner_level: level,
                    owner_version: version,
                    level: descriptor.level,
                    version: descriptor.version,
                });
            }
            let mut package = EnabledPackage::new(descriptor);
            package.prefix = prefix.to_string();
            packages.push(package);
        }

        let engine = ReadEngine::new(create_core_registry());
        let mut context = ReadContext::new(level, version).with_packages(&packages);
        let sbml = engine.read_object(root, &mut context)?;

        let models = sbml
            .children()
            .filter(|c| c.element_name() == MODEL)
            .count();
        if models > 1 {
            return Err(SbmlError::Structure(format!(
                "<{ROOT}> holds {models} models, at most one is allowed"
            )));
        }

        tracing::debug!(
            level,
            version,
            packages = packages.len(),
            "Read SBML document"
        );

        Ok(Self {
            level,
            version,
            packages,
            root: sbml,
        })
    }

    /// Serialize with an XML declaration.
    pub fn to_xml_string(&self) -> String {
        let mut writer = XmlWriter::with_declaration();
        writer.write_node(&self.root.to_node());
        writer.finish()
    }
}

fn read_level_version(root: roxmltree::Node<'_, '_>) -> Result<(u32, u32)> {
    let parse = |name: &str| -> Result<Option<u32>> {
        root.attribute(name)
            .map(|v| {
                v.trim().parse::<u32>().map_err(|_| {
                    SbmlError::Structure(format!("<{ROOT}> {name}=\"{v}\" is not a number"))
                })
            })
            .transpose()
    };

    match (parse("level")?, parse("version")?) {
        (Some(level), Some(version)) => Ok((level, version)),
        _ => root
            .tag_name()
            .namespace()
            .and_then(level_version_for_uri)
            .ok_or_else(|| {
                SbmlError::Structure(format!("<{ROOT}> has no level/version"))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{GROUPS_NS, QUAL_NS};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_document() {
        let doc = Document::new(3, 1).unwrap();
        assert_eq!(
            doc.to_xml_string(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <sbml xmlns=\"http://www.sbml.org/sbml/level3/version1/core\" level=\"3\" version=\"1\"/>"
        );
        assert!(matches!(Document::new(9, 9), Err(SbmlError::Precondition(_))));
    }

    #[test]
    fn test_enable_package_declares_namespace() {
        let mut doc = Document::new(3, 1).unwrap();
        doc.enable_package(QUAL_NS).unwrap();
        doc.enable_package(QUAL_NS).unwrap();

        assert_eq!(doc.packages().len(), 1);
        assert_eq!(doc.root().namespaces().len(), 2);
        assert!(doc.to_xml_string().contains(&format!(
            "xmlns:qual=\"{QUAL_NS}\" level=\"3\" version=\"1\" qual:required=\"true\""
        )));
        assert!(matches!(
            doc.enable_package("urn:nothing"),
            Err(SbmlError::NotFound(_))
        ));
    }

    #[test]
    fn test_enable_package_on_wrong_level() {
        let mut doc = Document::new(2, 4).unwrap();
        assert!(matches!(
            doc.enable_package(GROUPS_NS),
            Err(SbmlError::LevelVersionMismatch { .. })
        ));
        assert!(doc.packages().is_empty());
    }

    #[test]
    fn test_model_gets_packages() {
        let mut doc = Document::new(3, 1).unwrap();
        doc.enable_package(QUAL_NS).unwrap();
        doc.create_model().unwrap();
        doc.enable_package(GROUPS_NS).unwrap();

        let model = doc.model().unwrap();
        assert!(model.is_package_enabled(QUAL_NS));
        assert!(model.is_package_enabled(GROUPS_NS));
        assert!(matches!(doc.create_model(), Err(SbmlError::Precondition(_))));

        assert!(doc.disable_package(GROUPS_NS));
        assert!(!doc.model().unwrap().is_package_enabled(GROUPS_NS));
        assert!(!doc.to_xml_string().contains("groups"));
    }

    #[test]
    fn test_set_model_replaces() {
        let mut doc = Document::new(3, 1).unwrap();
        doc.create_model().unwrap();
        let mut model = SBase::new("model", 3, 1);
        model.set_id("replacement").unwrap();
        doc.set_model(&model).unwrap();

        assert_eq!(doc.root().num_children(), 1);
        assert_eq!(doc.model().and_then(SBase::id), Some("replacement"));
        assert!(doc.set_model(&SBase::new("model", 2, 4)).is_err());
        assert_eq!(doc.model().and_then(SBase::id), Some("replacement"));
    }

    #[test]
    fn test_enable_default_ns() {
        let mut doc = Document::new(3, 1).unwrap();
        doc.enable_package(QUAL_NS).unwrap();
        doc.create_model().unwrap();
        doc.enable_default_ns(QUAL_NS, true).unwrap();

        let prefix = doc.model().and_then(|m| m.plugin("qual")).map(|p| p.prefix().to_string());
        assert_eq!(prefix.as_deref(), Some(""));
        assert!(matches!(
            doc.enable_default_ns(GROUPS_NS, true),
            Err(SbmlError::NotFound(_))
        ));
    }

    #[test]
    fn test_read_wrong_root() {
        assert!(matches!(
            Document::read_str("<model/>"),
            Err(SbmlError::Structure(_))
        ));
    }

    #[test]
    fn test_read_level_from_namespace() {
        let doc = Document::read_str(
            r#"<sbml xmlns="http://www.sbml.org/sbml/level2/version4"/>"#,
        )
        .unwrap();
        assert_eq!((doc.level(), doc.version()), (2, 4));
    }

    #[test]
    fn test_read_too_deep() {
        let xml = format!(
            "<sbml level=\"3\" version=\"1\">{}",
            "<model>".repeat(10_000)
        );
        assert!(matches!(
            Document::read_str(&xml),
            Err(SbmlError::Structure(_))
        ));
    }

    #[test]
    fn test_read_two_models() {
        let xml = r#"<sbml xmlns="http://www.sbml.org/sbml/level3/version1/core" level="3" version="1">
  <model/>
  <model/>
</sbml>"#;
        assert!(matches!(
            Document::read_str(xml),
            Err(SbmlError::Structure(_))
        ));
    }
}
