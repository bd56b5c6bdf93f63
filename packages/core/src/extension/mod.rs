//! Namespace-scoped extension packages.
//!
//! A package is described by an [`ExtensionDescriptor`] and registered once
//! per process in the [`ExtensionRegistry`]. Every object a package extends
//! carries one [`ExtensionSlot`] per enabled package, holding the typed
//! [`ListOf`] children the package attaches to it.

pub mod descriptor;
pub mod list;
pub mod registry;
pub mod slot;

pub use descriptor::{ExtensionDescriptor, ListSpec, SlotSpec};
pub use list::ListOf;
pub use registry::{
    create_default_registry, global, install, EnabledPackage, ExtensionRegistry, GROUPS_NS,
    QUAL_NS,
};
pub use slot::ExtensionSlot;
