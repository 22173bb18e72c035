//! Compiled visual tree produced by the layout compiler.
//!
//! A `CompiledKeyboard` is an immutable description of one rendered layout:
//! positioned key elements grouped by region, the parallel documentation
//! list, the layout-selection entries, and the code→element index used by
//! the event router. It is rebuilt in full on every layout or language
//! switch and never patched in place.

use std::collections::HashMap;

use crate::models::Region;

/// One positioned key element.
///
/// Geometry is in abstract pixels (multiples of the base cell); the TUI
/// scales to terminal cells at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyElement {
    /// Physical key code this element is bound to.
    pub code: u16,
    /// Leading margin before this element, accumulated from the spacer
    /// slots immediately preceding it.
    pub offset_px: f32,
    /// Visible width.
    pub width_px: f32,
    /// Visible height.
    pub height_px: f32,
    /// Display label.
    pub label: String,
    /// Resolved tooltip text (falls back to the label).
    pub tooltip: String,
    /// Whether the key has a documentation block.
    pub documented: bool,
}

/// The compiled elements of one region, row by row.
///
/// The function row compiles to a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRegion {
    /// Which structural region this is.
    pub region: Region,
    /// Rows of key elements in emission order.
    pub rows: Vec<Vec<KeyElement>>,
}

/// Index of one element within a compiled tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRef {
    /// Index into `CompiledKeyboard::regions`.
    pub region: usize,
    /// Row index within the region.
    pub row: usize,
    /// Element index within the row.
    pub col: usize,
}

/// Documentation for one scope, rendered under a key's block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSection {
    /// Scope name (e.g. "editor").
    pub scope: String,
    /// Description text.
    pub description: String,
    /// Ordered tags.
    pub tags: Vec<String>,
}

/// The documentation block for one documented key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    /// Key code the block documents.
    pub code: u16,
    /// Block heading: the key label, with the resolved tooltip appended
    /// when one exists.
    pub heading: String,
    /// Scope sections in authored order.
    pub sections: Vec<DocSection>,
}

/// One entry of the layout-selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutChoice {
    /// Stable key of the layout (its document key).
    pub key: String,
    /// Display name resolved for the active language pair.
    pub title: String,
}

/// The complete output of one compiler run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledKeyboard {
    /// Document key of the compiled layout.
    pub layout_key: String,
    /// Resolved display name of the layout.
    pub title: String,
    /// Inter-region spacing in pixels.
    pub part_margin_px: f32,
    /// Regions in fixed structural order: fun, main, right.
    pub regions: Vec<CompiledRegion>,
    /// Documentation blocks in emission order.
    pub docs: Vec<DocBlock>,
    /// Layout-selection entries, one per known layout.
    pub choices: Vec<LayoutChoice>,
    /// code → element position, built once per tree.
    index: HashMap<u16, ElementRef>,
    /// code → position in `docs`.
    doc_index: HashMap<u16, usize>,
}

impl CompiledKeyboard {
    /// Assembles a compiled tree and builds its lookup indexes.
    #[must_use]
    pub fn new(
        layout_key: String,
        title: String,
        part_margin_px: f32,
        regions: Vec<CompiledRegion>,
        docs: Vec<DocBlock>,
        choices: Vec<LayoutChoice>,
    ) -> Self {
        let mut index = HashMap::new();
        for (r, region) in regions.iter().enumerate() {
            for (y, row) in region.rows.iter().enumerate() {
                for (x, element) in row.iter().enumerate() {
                    index.insert(
                        element.code,
                        ElementRef {
                            region: r,
                            row: y,
                            col: x,
                        },
                    );
                }
            }
        }
        let doc_index = docs
            .iter()
            .enumerate()
            .map(|(i, block)| (block.code, i))
            .collect();

        Self {
            layout_key,
            title,
            part_margin_px,
            regions,
            docs,
            choices,
            index,
            doc_index,
        }
    }

    /// Looks up the rendered element for a key code.
    #[must_use]
    pub fn element(&self, code: u16) -> Option<&KeyElement> {
        let r = self.index.get(&code)?;
        self.regions.get(r.region)?.rows.get(r.row)?.get(r.col)
    }

    /// Looks up the position of the element bound to a key code.
    #[must_use]
    pub fn element_ref(&self, code: u16) -> Option<ElementRef> {
        self.index.get(&code).copied()
    }

    /// Index into `docs` of the block documenting `code`, if any.
    #[must_use]
    pub fn doc_block(&self, code: u16) -> Option<usize> {
        self.doc_index.get(&code).copied()
    }

    /// The code → element table, for installing router bindings.
    #[must_use]
    pub fn bindings(&self) -> &HashMap<u16, ElementRef> {
        &self.index
    }

    /// Total number of key elements across all regions.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.regions
            .iter()
            .map(|region| region.rows.iter().map(Vec::len).sum::<usize>())
            .sum()
    }
}
