//! Layout document data structures.
//!
//! A layout document describes one keyboard variant: a localized display
//! name, three slot regions (function row, main block, auxiliary block), and
//! the mapping table from physical key codes to labels and tooltips.
//!
//! # Validation
//!
//! Parsing is shape-tolerant on purpose: slot values and tooltip values that
//! match none of the recognized forms are carried as `Unrecognized` variants
//! instead of failing the parse, so that `services::validator` and the
//! compiler can report them through the error taxonomy with region and
//! position context.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// A per-language string table, keyed by language code (e.g. `en_US`).
pub type LangMap = HashMap<String, String>;

/// One structural group of key slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// The function row (a single ordered sequence of slots).
    Fun,
    /// The main block (rows of slots).
    Main,
    /// The auxiliary block to the right (rows of slots).
    Right,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fun => write!(f, "fun"),
            Self::Main => write!(f, "main"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// One cell position in a region.
///
/// The JSON forms are `null` (empty spacer), `{"width": n}` (sized spacer),
/// a bare key code, or `{"key": code, "width"?: n, "height"?: n}`. Any other
/// shape lands in `Unrecognized` and is rejected by the validator.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// A key descriptor with optional size multipliers.
    KeyRef {
        /// Physical key code.
        key: u16,
        /// Width multiplier of the base cell (default 1).
        width: Option<f32>,
        /// Height multiplier of the base cell (default 1).
        height: Option<f32>,
    },
    /// A sized spacer: adds `width` base cells of pending margin.
    Spacer {
        /// Margin contribution in base cells.
        width: f32,
    },
    /// A bare key code (1×1 key).
    Key(u16),
    /// An empty spacer: adds one base cell of pending margin.
    Gap,
    /// Anything else; preserved for the validator to report.
    Unrecognized(serde_json::Value),
}

impl Slot {
    /// Returns the key code if this slot designates a key.
    #[must_use]
    pub fn key_code(&self) -> Option<u16> {
        match self {
            Self::Key(code) | Self::KeyRef { key: code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Classifies a raw JSON value into a slot shape.
    fn from_value(value: serde_json::Value) -> Self {
        use serde_json::Value;

        if value.is_null() {
            return Self::Gap;
        }
        if value.is_number() {
            return match value.as_u64().and_then(|code| u16::try_from(code).ok()) {
                Some(code) => Self::Key(code),
                None => Self::Unrecognized(value),
            };
        }
        let Value::Object(map) = &value else {
            return Self::Unrecognized(value);
        };

        // The inner Option distinguishes "present but not a number" from
        // "absent"; the former is malformed, never silently ignored.
        let key = map
            .get("key")
            .map(|v| v.as_u64().and_then(|code| u16::try_from(code).ok()));
        let width = map.get("width").map(|v| v.as_f64().map(|size| size as f32));
        let height = map.get("height").map(|v| v.as_f64().map(|size| size as f32));

        match (key, width, height) {
            (Some(Some(key)), width, height)
                if width != Some(None) && height != Some(None) =>
            {
                Self::KeyRef {
                    key,
                    width: width.flatten(),
                    height: height.flatten(),
                }
            }
            // A spacer carries a width, no key, and no height; a height
            // without a key matches no recognized shape.
            (None, Some(Some(width)), None) => Self::Spacer { width },
            _ => Self::Unrecognized(value),
        }
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

/// A label or tooltip value: a plain string applies to every language, a
/// language map is resolved through the primary/fallback chain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LangText {
    /// A single string, used as-is for every language.
    Plain(String),
    /// Per-language strings keyed by language code.
    Localized(LangMap),
    /// Anything else; rejected by the resolver as `InvalidLabelShape`.
    Unrecognized(serde_json::Value),
}

/// One entry in a layout's mapping table: the key's display label and an
/// optional tooltip.
///
/// The JSON form is a 1- or 2-element array: `["label"]` or
/// `["label", tooltip]`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMapping {
    /// Primary label shown on the key cap.
    pub label: String,
    /// Optional tooltip, plain or localized.
    pub tooltip: Option<LangText>,
}

impl KeyMapping {
    /// Creates a mapping with no tooltip.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tooltip: None,
        }
    }

    /// Attaches a tooltip value.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: LangText) -> Self {
        self.tooltip = Some(tooltip);
        self
    }
}

impl<'de> Deserialize<'de> for KeyMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let parts: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
        let mut parts = parts.into_iter();

        let label = match parts.next() {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "mapping label must be a string, got {other}"
                )))
            }
            None => return Err(D::Error::custom("mapping entry must not be empty")),
        };

        // The tooltip keeps whatever shape the document gave it; malformed
        // shapes surface later as InvalidLabelShape with the key code.
        let tooltip = parts.next().map(|value| match value {
            serde_json::Value::String(s) => LangText::Plain(s),
            serde_json::Value::Object(map) => {
                let mut strings = LangMap::new();
                for (k, v) in &map {
                    match v {
                        serde_json::Value::String(s) => {
                            strings.insert(k.clone(), s.clone());
                        }
                        _ => return LangText::Unrecognized(serde_json::Value::Object(map)),
                    }
                }
                LangText::Localized(strings)
            }
            other => LangText::Unrecognized(other),
        });

        if parts.next().is_some() {
            return Err(D::Error::custom(
                "mapping entry must have at most two elements",
            ));
        }

        Ok(Self { label, tooltip })
    }
}

/// The geometric part of a layout document: display name, inter-region
/// spacing, and the three slot regions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutGeometry {
    /// Localized display name.
    pub name: LangMap,
    /// Spacing between structural regions, as a fraction of the base cell.
    #[serde(rename = "partMargin")]
    pub part_margin: f32,
    /// Function row slots.
    pub fun: Vec<Slot>,
    /// Main block rows.
    pub main: Vec<Vec<Slot>>,
    /// Auxiliary block rows.
    pub right: Vec<Vec<Slot>>,
}

/// One complete keyboard variant: geometry plus the key code mapping table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutDocument {
    /// Regions and display name.
    pub layout: LayoutGeometry,
    /// Key code → label/tooltip table.
    pub mappings: HashMap<u16, KeyMapping>,
}

impl LayoutDocument {
    /// Looks up the mapping for a key code.
    #[must_use]
    pub fn mapping(&self, code: u16) -> Option<&KeyMapping> {
        self.mappings.get(&code)
    }
}
