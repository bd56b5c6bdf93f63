//! Element registry system for extensible SBML reading.
//!
//! This module provides a registry-based approach to reading SBML content.
//! Element handlers can be registered for specific tag names, with a
//! fallback for generic objects, allowing for extensible and testable
//! reading. Package lists are routed to extension slots before the registry
//! is consulted.

mod config;
mod core;
mod engine;
mod handler;
pub mod handlers;
mod types;

pub use config::create_core_registry;
pub use core::ElementRegistry;
pub use engine::ReadEngine;
pub use handler::{ElementHandler, RecurseFn};
pub use types::{ElementType, ReadContext};
