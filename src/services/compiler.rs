//! Layout-to-visual-tree compilation.
//!
//! The compiler walks a validated layout's three regions in structural order
//! (function row, main block, auxiliary block) and emits positioned key
//! elements, the documentation blocks for keys with assignments, and the
//! layout-selection entries. All localized text is resolved here, through
//! `i18n`, for one primary/fallback pair; a language switch recompiles.
//!
//! Spacer slots never emit elements. Their widths accumulate into a pending
//! margin that becomes the leading offset of the next key element and resets
//! to zero once that element is emitted. The margin counter runs per region.

use tracing::debug;

use crate::constants::{BASE_CELL_H, BASE_CELL_W};
use crate::error::ConfigurationError;
use crate::i18n;
use crate::models::{
    Assignments, CompiledKeyboard, CompiledRegion, DocBlock, DocSection, KeyElement, LayoutChoice,
    LayoutDocument, Region, Slot,
};

/// Compiles one layout into its visual tree.
///
/// `layouts` is the full set of loaded layouts in presentation order; it
/// feeds the layout-selection control. `layout_key` must be the document key
/// of `doc` within that set.
///
/// Fails with `UnknownMappingKey`/`UnknownSlotShape` on data the validator
/// would reject, and with `InvalidLabelShape` when a tooltip is neither a
/// string nor a language map. No partial tree is ever returned.
pub fn compile(
    layout_key: &str,
    doc: &LayoutDocument,
    assignments: &Assignments,
    layouts: &[(String, LayoutDocument)],
    primary: &str,
    fallback: &str,
) -> Result<CompiledKeyboard, ConfigurationError> {
    let mut docs = Vec::new();

    let fun = compile_region(
        Region::Fun,
        std::slice::from_ref(&doc.layout.fun),
        doc,
        assignments,
        primary,
        fallback,
        &mut docs,
    )?;
    let main = compile_region(
        Region::Main,
        &doc.layout.main,
        doc,
        assignments,
        primary,
        fallback,
        &mut docs,
    )?;
    let right = compile_region(
        Region::Right,
        &doc.layout.right,
        doc,
        assignments,
        primary,
        fallback,
        &mut docs,
    )?;

    let title = i18n::resolve_map(&doc.layout.name, primary, fallback)
        .unwrap_or(layout_key)
        .to_string();

    let choices = layouts
        .iter()
        .map(|(key, layout)| LayoutChoice {
            key: key.clone(),
            title: i18n::resolve_map(&layout.layout.name, primary, fallback)
                .unwrap_or(key)
                .to_string(),
        })
        .collect();

    let compiled = CompiledKeyboard::new(
        layout_key.to_string(),
        title,
        doc.layout.part_margin * BASE_CELL_W,
        vec![fun, main, right],
        docs,
        choices,
    );
    debug!(
        layout = layout_key,
        keys = compiled.key_count(),
        docs = compiled.docs.len(),
        "layout compiled"
    );
    Ok(compiled)
}

/// Compiles one region's rows. The pending margin runs across the whole
/// region and resets only when a key element is emitted.
fn compile_region(
    region: Region,
    rows: &[Vec<Slot>],
    doc: &LayoutDocument,
    assignments: &Assignments,
    primary: &str,
    fallback: &str,
    docs: &mut Vec<DocBlock>,
) -> Result<CompiledRegion, ConfigurationError> {
    let mut compiled_rows = Vec::with_capacity(rows.len());
    let mut pending_margin = 0.0_f32;

    for (row_idx, slots) in rows.iter().enumerate() {
        let mut row = Vec::new();
        for (col_idx, slot) in slots.iter().enumerate() {
            match slot {
                Slot::Gap => pending_margin += 1.0,
                Slot::Spacer { width } => pending_margin += width,
                Slot::Key(_) | Slot::KeyRef { .. } => {
                    let code = slot.key_code().unwrap_or_default();
                    let (width, height) = match slot {
                        Slot::KeyRef { width, height, .. } => {
                            (width.unwrap_or(1.0), height.unwrap_or(1.0))
                        }
                        _ => (1.0, 1.0),
                    };
                    let element = compile_key(
                        code,
                        pending_margin,
                        width,
                        height,
                        region,
                        (row_idx, col_idx),
                        doc,
                        assignments,
                        primary,
                        fallback,
                        docs,
                    )?;
                    row.push(element);
                    pending_margin = 0.0;
                }
                Slot::Unrecognized(_) => {
                    return Err(ConfigurationError::UnknownSlotShape {
                        region,
                        position: (row_idx, col_idx),
                    });
                }
            }
        }
        compiled_rows.push(row);
    }

    Ok(CompiledRegion {
        region,
        rows: compiled_rows,
    })
}

#[allow(clippy::too_many_arguments)]
fn compile_key(
    code: u16,
    pending_margin: f32,
    width: f32,
    height: f32,
    region: Region,
    position: (usize, usize),
    doc: &LayoutDocument,
    assignments: &Assignments,
    primary: &str,
    fallback: &str,
    docs: &mut Vec<DocBlock>,
) -> Result<KeyElement, ConfigurationError> {
    let mapping = doc
        .mapping(code)
        .ok_or(ConfigurationError::UnknownMappingKey {
            code,
            region,
            position,
        })?;

    let tooltip = i18n::resolve(mapping.tooltip.as_ref(), primary, fallback, &mapping.label)
        .map_err(|_| ConfigurationError::InvalidLabelShape { code })?;

    let documented = assignments.contains(code);
    if documented {
        docs.push(doc_block(code, &mapping.label, mapping.tooltip.is_some(), &tooltip, assignments));
    }

    Ok(KeyElement {
        code,
        offset_px: pending_margin * BASE_CELL_W,
        width_px: width * BASE_CELL_W,
        height_px: height * BASE_CELL_H,
        label: mapping.label.clone(),
        tooltip,
        documented,
    })
}

fn doc_block(
    code: u16,
    label: &str,
    has_tooltip: bool,
    tooltip: &str,
    assignments: &Assignments,
) -> DocBlock {
    let heading = if has_tooltip {
        format!("{label} - {tooltip}")
    } else {
        label.to_string()
    };

    let sections = assignments
        .get(code)
        .map(|entry| {
            entry
                .scopes
                .iter()
                .map(|(scope, doc)| DocSection {
                    scope: scope.clone(),
                    description: doc.description.clone(),
                    tags: doc.tags.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    DocBlock {
        code,
        heading,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(json: &str) -> LayoutDocument {
        serde_json::from_str(json).unwrap()
    }

    fn assignments(json: &str) -> Assignments {
        serde_json::from_str(json).unwrap()
    }

    fn compile_single(
        doc: &LayoutDocument,
        assignments: &Assignments,
        primary: &str,
        fallback: &str,
    ) -> Result<CompiledKeyboard, ConfigurationError> {
        let layouts = vec![("test".to_string(), doc.clone())];
        compile("test", doc, assignments, &layouts, primary, fallback)
    }

    #[test]
    fn test_one_element_per_key_slot() {
        let doc = layout(
            r#"{
                "layout": {
                    "name": {"en_US": "Test"},
                    "partMargin": 0.5,
                    "fun": [27, null, 112],
                    "main": [[65, 66], [{"width": 1.5}, 67]],
                    "right": [[null]]
                },
                "mappings": {
                    "27": ["Esc"], "112": ["F1"],
                    "65": ["A"], "66": ["B"], "67": ["C"]
                }
            }"#,
        );
        let tree = compile_single(&doc, &Assignments::default(), "en_US", "en_US").unwrap();

        // Five key slots across all regions; spacers emit nothing.
        assert_eq!(tree.key_count(), 5);
        assert_eq!(tree.regions[0].rows[0].len(), 2);
        assert_eq!(tree.regions[1].rows[0].len(), 2);
        assert_eq!(tree.regions[1].rows[1].len(), 1);
        assert!(tree.regions[2].rows[0].is_empty());
    }

    #[test]
    fn test_margin_accumulates_and_resets() {
        // Scenario C: two empty spacers before key 65 → offset 80.
        let doc = layout(
            r#"{
                "layout": {
                    "name": {"en_US": "Test"},
                    "partMargin": 0.5,
                    "fun": [],
                    "main": [[null, null, 65, 66]],
                    "right": []
                },
                "mappings": {"65": ["A"], "66": ["B"]}
            }"#,
        );
        let tree = compile_single(&doc, &Assignments::default(), "en_US", "en_US").unwrap();

        let row = &tree.regions[1].rows[0];
        assert_eq!(row[0].offset_px, 80.0);
        // Margin reset after the first key: the next key sits flush.
        assert_eq!(row[1].offset_px, 0.0);
    }

    #[test]
    fn test_sized_spacers_add_fractional_margin() {
        let doc = layout(
            r#"{
                "layout": {
                    "name": {"en_US": "Test"},
                    "partMargin": 0.5,
                    "fun": [null, {"width": 0.5}, 27],
                    "main": [],
                    "right": []
                },
                "mappings": {"27": ["Esc"]}
            }"#,
        );
        let tree = compile_single(&doc, &Assignments::default(), "en_US", "en_US").unwrap();
        assert_eq!(tree.regions[0].rows[0][0].offset_px, 1.5 * 40.0);
    }

    #[test]
    fn test_key_sizes_scale_base_cell() {
        let doc = layout(
            r#"{
                "layout": {
                    "name": {"en_US": "Test"},
                    "partMargin": 0.5,
                    "fun": [],
                    "main": [[{"key": 13, "width": 2.25, "height": 2}]],
                    "right": []
                },
                "mappings": {"13": ["Enter"]}
            }"#,
        );
        let tree = compile_single(&doc, &Assignments::default(), "en_US", "en_US").unwrap();
        let element = tree.element(13).unwrap();
        assert_eq!(element.width_px, 90.0);
        assert_eq!(element.height_px, 80.0);
    }

    #[test]
    fn test_label_and_tooltip_resolution() {
        // Scenario A: primary de_DE wins over fallback en_US.
        let doc = layout(
            r#"{
                "layout": {
                    "name": {"en_US": "Test"},
                    "partMargin": 0.5,
                    "fun": [],
                    "main": [[65]],
                    "right": []
                },
                "mappings": {"65": ["A", {"en_US": "Key A", "de_DE": "Taste A"}]}
            }"#,
        );
        let tree = compile_single(&doc, &Assignments::default(), "de_DE", "en_US").unwrap();
        let element = tree.element(65).unwrap();
        assert_eq!(element.label, "A");
        assert_eq!(element.tooltip, "Taste A");
    }

    #[test]
    fn test_tooltip_falls_back_to_label() {
        let doc = layout(
            r#"{
                "layout": {
                    "name": {"en_US": "Test"},
                    "partMargin": 0.5,
                    "fun": [],
                    "main": [[65]],
                    "right": []
                },
                "mappings": {"65": ["A", {"fr_FR": "Touche A"}]}
            }"#,
        );
        let tree = compile_single(&doc, &Assignments::default(), "de_DE", "en_US").unwrap();
        assert_eq!(tree.element(65).unwrap().tooltip, "A");
    }

    #[test]
    fn test_malformed_tooltip_aborts_compilation() {
        let doc = layout(
            r#"{
                "layout": {
                    "name": {"en_US": "Test"},
                    "partMargin": 0.5,
                    "fun": [],
                    "main": [[65, 66]],
                    "right": []
                },
                "mappings": {"65": ["A", 42], "66": ["B"]}
            }"#,
        );
        let err = compile_single(&doc, &Assignments::default(), "de_DE", "en_US").unwrap_err();
        assert_eq!(err, ConfigurationError::InvalidLabelShape { code: 65 });
    }

    #[test]
    fn test_documented_keys_emit_blocks_in_scope_order() {
        let doc = layout(
            r#"{
                "layout": {
                    "name": {"en_US": "Test"},
                    "partMargin": 0.5,
                    "fun": [],
                    "main": [[65, 66]],
                    "right": []
                },
                "mappings": {"65": ["A", "Key A"], "66": ["B"]}
            }"#,
        );
        let assignments = assignments(
            r#"{
                "65": {
                    "editor": ["select all", ["selection"]],
                    "shell": ["start of line", ["cursor", "readline"]]
                }
            }"#,
        );
        let tree = compile_single(&doc, &assignments, "en_US", "en_US").unwrap();

        assert!(tree.element(65).unwrap().documented);
        assert!(!tree.element(66).unwrap().documented);
        assert_eq!(tree.docs.len(), 1);

        let block = &tree.docs[0];
        assert_eq!(block.heading, "A - Key A");
        assert_eq!(block.sections.len(), 2);
        assert_eq!(block.sections[0].scope, "editor");
        assert_eq!(block.sections[1].scope, "shell");
        assert_eq!(block.sections[1].tags, vec!["cursor", "readline"]);
        assert_eq!(tree.doc_block(65), Some(0));
    }

    #[test]
    fn test_title_and_choices_resolve_display_names() {
        let doc = layout(
            r#"{
                "layout": {
                    "name": {"de_DE": "ISO Deutsch", "en_US": "German ISO"},
                    "partMargin": 0.5,
                    "fun": [],
                    "main": [],
                    "right": []
                },
                "mappings": {}
            }"#,
        );
        let layouts = vec![("de-iso".to_string(), doc.clone())];
        let tree = compile(
            "de-iso",
            &doc,
            &Assignments::default(),
            &layouts,
            "de_DE",
            "en_US",
        )
        .unwrap();

        assert_eq!(tree.title, "ISO Deutsch");
        assert_eq!(tree.choices.len(), 1);
        assert_eq!(tree.choices[0].key, "de-iso");
        assert_eq!(tree.choices[0].title, "ISO Deutsch");
        assert_eq!(tree.part_margin_px, 20.0);
    }
}
