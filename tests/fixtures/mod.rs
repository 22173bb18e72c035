//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test file uses every fixture

use keyatlas::models::{Assignments, LayoutDocument};
use keyatlas::parser::{assignments::parse_assignments_str, layout::parse_layout_str};
use keyatlas::session::KeyboardSession;

/// A compact two-region layout with localized tooltips.
///
/// Key 65 carries a localized tooltip (Scenario A data), key 66 has none,
/// key 13 is a 2.25u wide descriptor.
pub fn compact_layout() -> LayoutDocument {
    parse_layout_str(
        r#"{
            "layout": {
                "name": {"de_DE": "Kompakt", "en_US": "Compact"},
                "partMargin": 0.5,
                "fun": [27, null, 112],
                "main": [
                    [65, 66],
                    [null, null, 67, {"key": 13, "width": 2.25}]
                ],
                "right": [[37, 39]]
            },
            "mappings": {
                "27": ["Esc"],
                "112": ["F1"],
                "65": ["A", {"en_US": "Key A", "de_DE": "Taste A"}],
                "66": ["B"],
                "67": ["C", "Letter C"],
                "13": ["Enter", {"en_US": "Return key", "de_DE": "Eingabetaste"}],
                "37": ["←"],
                "39": ["→"]
            }
        }"#,
    )
    .unwrap()
}

/// A second layout for switch tests; no overlap with key 65.
pub fn alternate_layout() -> LayoutDocument {
    parse_layout_str(
        r#"{
            "layout": {
                "name": {"de_DE": "Alternativ", "en_US": "Alternate"},
                "partMargin": 1.0,
                "fun": [],
                "main": [[81, 87, 69]],
                "right": []
            },
            "mappings": {
                "81": ["Q"],
                "87": ["W"],
                "69": ["E"]
            }
        }"#,
    )
    .unwrap()
}

/// A layout whose main region references an unmapped key code (Scenario E).
pub fn broken_layout() -> LayoutDocument {
    parse_layout_str(
        r#"{
            "layout": {
                "name": {"en_US": "Broken"},
                "partMargin": 0.5,
                "fun": [],
                "main": [[66]],
                "right": []
            },
            "mappings": {}
        }"#,
    )
    .unwrap()
}

/// Assignments documenting keys 65 and 27 (Scenario D data: 66 is absent).
pub fn sample_assignments() -> Assignments {
    parse_assignments_str(
        r#"{
            "65": {"scope1": ["desc", ["tag1"]]},
            "27": {
                "global": ["cancels the dialog", ["cancel"]],
                "vim": ["back to normal mode", ["mode", "normal"]]
            }
        }"#,
    )
    .unwrap()
}

/// The configured language set used across tests.
pub fn langs() -> Vec<String> {
    vec!["de_DE".to_string(), "en_US".to_string()]
}

/// A session over the compact and alternate layouts, primary de_DE.
pub fn session() -> KeyboardSession {
    KeyboardSession::new(
        vec![
            ("compact".to_string(), compact_layout()),
            ("alternate".to_string(), alternate_layout()),
        ],
        sample_assignments(),
        langs(),
        "de_DE",
        "en_US",
    )
    .unwrap()
}
