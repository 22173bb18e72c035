//! keyatlas library
//!
//! Core functionality for the keyatlas terminal keyboard explorer: parsing
//! layout and assignment documents, compiling layouts into a positioned
//! visual tree, resolving localized labels, and routing physical key events
//! to the rendered keys.

// Module declarations
pub mod config;
pub mod constants;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod parser;
pub mod services;
pub mod session;
pub mod tui;
