//! Semantic validation of layout documents.
//!
//! Shape-wise parsing already happened in `parser`; this pass checks the
//! cross-references the parser cannot: every key code referenced by a region
//! slot must exist in the layout's mapping table, and every slot must be a
//! recognized spacer or key descriptor. A layout that fails validation must
//! not be compiled; the caller decides whether to keep a previously loaded
//! layout or surface the error.

use crate::error::ConfigurationError;
use crate::models::{LayoutDocument, Region, Slot};

/// Validates a layout document.
///
/// Walks all three regions in structural order and returns the first
/// violation found.
pub fn validate(doc: &LayoutDocument) -> Result<(), ConfigurationError> {
    validate_row(doc, Region::Fun, 0, &doc.layout.fun)?;
    for (row, slots) in doc.layout.main.iter().enumerate() {
        validate_row(doc, Region::Main, row, slots)?;
    }
    for (row, slots) in doc.layout.right.iter().enumerate() {
        validate_row(doc, Region::Right, row, slots)?;
    }
    Ok(())
}

fn validate_row(
    doc: &LayoutDocument,
    region: Region,
    row: usize,
    slots: &[Slot],
) -> Result<(), ConfigurationError> {
    for (col, slot) in slots.iter().enumerate() {
        match slot {
            Slot::Unrecognized(_) => {
                return Err(ConfigurationError::UnknownSlotShape {
                    region,
                    position: (row, col),
                });
            }
            Slot::Gap | Slot::Spacer { .. } => {}
            Slot::Key(_) | Slot::KeyRef { .. } => {
                let code = slot.key_code().unwrap_or_default();
                if doc.mapping(code).is_none() {
                    return Err(ConfigurationError::UnknownMappingKey {
                        code,
                        region,
                        position: (row, col),
                    });
                }
            }
        }
    }
    Ok(())
}
