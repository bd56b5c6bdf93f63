//! Element handlers for SBML object content.

mod content;
mod metadata;

pub use content::*;
pub use metadata::*;
