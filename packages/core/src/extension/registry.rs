//! Process-wide registry of known extension packages.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::error::{Result, SbmlError};
use crate::extension::descriptor::{ExtensionDescriptor, ListSpec, SlotSpec};

/// URI of the qualitative models package, L3V1 version 1.
pub const QUAL_NS: &str = "http://www.sbml.org/sbml/level3/version1/qual/version1";

/// URI of the groups package, L3V1 version 1.
pub const GROUPS_NS: &str = "http://www.sbml.org/sbml/level3/version1/groups/version1";

static GLOBAL: OnceLock<ExtensionRegistry> = OnceLock::new();

/// Known packages keyed by namespace URI.
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    packages: HashMap<String, Arc<ExtensionDescriptor>>,
}

impl ExtensionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package.
    ///
    /// # Errors
    /// Returns [`SbmlError::Precondition`] if a package with the same URI is
    /// already registered.
    pub fn register(&mut self, descriptor: ExtensionDescriptor) -> Result<()> {
        if self.packages.contains_key(&descriptor.uri) {
            return Err(SbmlError::Precondition(format!(
                "package namespace '{}' is already registered",
                descriptor.uri
            )));
        }
        tracing::debug!(
            package = %descriptor.name,
            uri = %descriptor.uri,
            "Registered extension package"
        );
        self.packages
            .insert(descriptor.uri.clone(), Arc::new(descriptor));
        Ok(())
    }

    /// Descriptor for a namespace URI.
    pub fn get(&self, uri: &str) -> Option<Arc<ExtensionDescriptor>> {
        self.packages.get(uri).cloned()
    }

    /// Descriptor by package name.
    pub fn by_name(&self, name: &str) -> Option<Arc<ExtensionDescriptor>> {
        self.packages.values().find(|d| d.name == name).cloned()
    }

    #[must_use]
    pub fn is_registered(&self, uri: &str) -> bool {
        self.packages.contains_key(uri)
    }

    /// Registered namespace URIs.
    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Install the process-wide registry.
///
/// Must happen before the first call to [`global`]; afterwards the registry
/// is read-only.
///
/// # Errors
/// Returns [`SbmlError::Precondition`] if a registry is already installed.
pub fn install(registry: ExtensionRegistry) -> Result<()> {
    let count = registry.len();
    GLOBAL.set(registry).map_err(|_| {
        SbmlError::Precondition("extension registry is already installed".to_string())
    })?;
    tracing::debug!(packages = count, "Installed extension registry");
    Ok(())
}

/// The process-wide registry, defaulting to [`create_default_registry`].
pub fn global() -> &'static ExtensionRegistry {
    GLOBAL.get_or_init(create_default_registry)
}

/// Create a registry with the built-in packages (`qual` and `groups`).
#[must_use]
pub fn create_default_registry() -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::new();

    let builtin = [
        ExtensionDescriptor {
            name: "qual".to_string(),
            uri: QUAL_NS.to_string(),
            default_prefix: "qual".to_string(),
            level: 3,
            version: 1,
            package_version: 1,
            required: true,
            slots: vec![SlotSpec {
                owner: "model".to_string(),
                lists: vec![
                    ListSpec::new("listOfQualitativeSpecies", "qualitativeSpecies"),
                    ListSpec::new("listOfTransitions", "transition"),
                ],
            }],
        },
        ExtensionDescriptor {
            name: "groups".to_string(),
            uri: GROUPS_NS.to_string(),
            default_prefix: "groups".to_string(),
            level: 3,
            version: 1,
            package_version: 1,
            required: false,
            slots: vec![SlotSpec {
                owner: "model".to_string(),
                lists: vec![ListSpec::new("listOfGroups", "group")],
            }],
        },
    ];

    for descriptor in builtin {
        if let Err(err) = registry.register(descriptor) {
            tracing::warn!(error = %err, "Skipping built-in package");
        }
    }

    registry
}

/// A package as enabled in one document.
#[derive(Debug, Clone, PartialEq)]
pub struct EnabledPackage {
    pub descriptor: Arc<ExtensionDescriptor>,
    /// Prefix bound to the package URI in the document.
    pub prefix: String,
    /// Write package elements in the default namespace instead of prefixed.
    pub default_ns: bool,
}

impl EnabledPackage {
    /// Enable with the descriptor's default prefix.
    pub fn new(descriptor: Arc<ExtensionDescriptor>) -> Self {
        let prefix = descriptor.default_prefix.clone();
        Self {
            descriptor,
            prefix,
            default_ns: false,
        }
    }

    pub fn uri(&self) -> &str {
        &self.descriptor.uri
    }

    /// Prefix package elements are written with (empty in default-namespace
    /// mode).
    pub fn element_prefix(&self) -> &str {
        if self.default_ns {
            ""
        } else {
            &self.prefix
        }
    }
}
