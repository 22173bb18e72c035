//! Document loading and parsing.
//!
//! This is the retrieval boundary of the application: layout and assignment
//! documents come from JSON files, are shape-checked by serde here, and are
//! handed to the core already parsed. Semantic validation (mapping
//! cross-references, slot shapes) happens in `services::validator`.

pub mod assignments;
pub mod layout;

pub use assignments::load_assignments_file;
pub use layout::{layout_key_for_path, load_layout_file};
