//! Error taxonomy for layout validation, compilation, and switching.
//!
//! Configuration errors are fatal to the affected layout or language
//! operation, never to the process: the session returns them to the caller
//! and keeps the previously compiled state intact.

use thiserror::Error;

use crate::models::Region;

/// Errors caused by malformed layout or mapping data.
///
/// These indicate a data-authoring bug in the layout documents and carry
/// enough position information to locate the offending slot. `position` is
/// the (row, column) slot index within the region; the function row is a
/// single row 0.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A region slot references a key code absent from the layout's mappings.
    #[error("key code {code} at {region}[{}][{}] has no entry in the layout mappings", .position.0, .position.1)]
    UnknownMappingKey {
        /// The unmapped key code.
        code: u16,
        /// Region containing the offending slot.
        region: Region,
        /// (row, column) slot index within the region.
        position: (usize, usize),
    },

    /// A slot value is neither a recognized spacer nor a key descriptor.
    #[error("unrecognized slot shape at {region}[{}][{}]", .position.0, .position.1)]
    UnknownSlotShape {
        /// Region containing the offending slot.
        region: Region,
        /// (row, column) slot index within the region.
        position: (usize, usize),
    },

    /// A tooltip value is neither absent, a string, nor a language map.
    #[error("tooltip for key code {code} is neither a string nor a language map")]
    InvalidLabelShape {
        /// Key code whose mapping carries the malformed tooltip.
        code: u16,
    },
}

/// Errors raised by session switch operations.
///
/// A failed switch leaves the previously rendered layout and language pair
/// fully intact; the error is surfaced to the user, never swallowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Layout data failed validation or compilation.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A requested language is not a member of the configured language set.
    #[error("language '{lang}' is not in the configured language set")]
    UnsupportedLanguage {
        /// The rejected language code.
        lang: String,
    },

    /// The requested layout key does not name a loaded layout.
    #[error("no layout named '{key}' is loaded")]
    UnknownLayout {
        /// The rejected layout key.
        key: String,
    },
}
