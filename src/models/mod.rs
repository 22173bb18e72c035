//! Data model: layout documents, assignments, and the compiled visual tree.

pub mod assignments;
pub mod compiled;
pub mod layout;

pub use assignments::{AssignmentEntry, Assignments, ScopeDoc};
pub use compiled::{
    CompiledKeyboard, CompiledRegion, DocBlock, DocSection, ElementRef, KeyElement, LayoutChoice,
};
pub use layout::{KeyMapping, LangMap, LangText, LayoutDocument, LayoutGeometry, Region, Slot};
