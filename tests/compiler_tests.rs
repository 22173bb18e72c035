//! Integration tests for layout compilation.

mod fixtures;

use keyatlas::error::ConfigurationError;
use keyatlas::models::{Assignments, Region, Slot};
use keyatlas::parser::layout::parse_layout_str;
use keyatlas::services::{compiler, validator};

use fixtures::{compact_layout, sample_assignments};

#[test]
fn element_count_matches_key_slot_count() {
    let doc = compact_layout();
    let layouts = vec![("compact".to_string(), doc.clone())];
    let tree = compiler::compile(
        "compact",
        &doc,
        &sample_assignments(),
        &layouts,
        "de_DE",
        "en_US",
    )
    .unwrap();

    // Count key-typed slots across all three regions directly from the
    // document and compare with the emitted elements.
    let key_slots = |slots: &[Slot]| slots.iter().filter(|s| s.key_code().is_some()).count();
    let expected = key_slots(&doc.layout.fun)
        + doc.layout.main.iter().map(|row| key_slots(row)).sum::<usize>()
        + doc.layout.right.iter().map(|row| key_slots(row)).sum::<usize>();

    assert_eq!(tree.key_count(), expected);
    assert_eq!(tree.key_count(), 8);
}

#[test]
fn spacers_emit_no_elements_but_accumulate_offset() {
    let doc = compact_layout();
    let layouts = vec![("compact".to_string(), doc.clone())];
    let tree = compiler::compile(
        "compact",
        &doc,
        &Assignments::default(),
        &layouts,
        "de_DE",
        "en_US",
    )
    .unwrap();

    // Scenario C: main row 1 starts with two empty spacers → offset 80.
    let row = &tree.regions[1].rows[1];
    assert_eq!(row[0].code, 67);
    assert_eq!(row[0].offset_px, 80.0);

    // The key after it sits flush: margin was reset.
    assert_eq!(row[1].code, 13);
    assert_eq!(row[1].offset_px, 0.0);
    assert_eq!(row[1].width_px, 2.25 * 40.0);
}

#[test]
fn scenario_a_primary_language_wins() {
    let doc = compact_layout();
    let layouts = vec![("compact".to_string(), doc.clone())];
    let tree = compiler::compile(
        "compact",
        &doc,
        &Assignments::default(),
        &layouts,
        "de_DE",
        "en_US",
    )
    .unwrap();

    let element = tree.element(65).unwrap();
    assert_eq!(element.label, "A");
    assert_eq!(element.tooltip, "Taste A");
}

#[test]
fn fallback_language_is_used_when_primary_missing() {
    let doc = parse_layout_str(
        r#"{
            "layout": {
                "name": {"en_US": "Test"},
                "partMargin": 0.5,
                "fun": [],
                "main": [[65]],
                "right": []
            },
            "mappings": {"65": ["A", {"en_US": "Key A"}]}
        }"#,
    )
    .unwrap();
    let layouts = vec![("test".to_string(), doc.clone())];
    let tree = compiler::compile(
        "test",
        &doc,
        &Assignments::default(),
        &layouts,
        "de_DE",
        "en_US",
    )
    .unwrap();
    assert_eq!(tree.element(65).unwrap().tooltip, "Key A");
}

#[test]
fn documentation_list_parallels_documented_keys() {
    let doc = compact_layout();
    let layouts = vec![("compact".to_string(), doc.clone())];
    let tree = compiler::compile(
        "compact",
        &doc,
        &sample_assignments(),
        &layouts,
        "de_DE",
        "en_US",
    )
    .unwrap();

    // Keys 27 and 65 are documented; emission order follows the regions
    // (fun before main).
    let codes: Vec<u16> = tree.docs.iter().map(|block| block.code).collect();
    assert_eq!(codes, vec![27, 65]);

    assert!(tree.element(27).unwrap().documented);
    assert!(tree.element(65).unwrap().documented);
    assert!(!tree.element(66).unwrap().documented);

    // Scope order inside a block is the authored order.
    let esc_block = &tree.docs[0];
    assert_eq!(esc_block.sections[0].scope, "global");
    assert_eq!(esc_block.sections[1].scope, "vim");

    // A key with a tooltip gets it appended to the block heading.
    let a_block = &tree.docs[1];
    assert_eq!(a_block.heading, "A - Taste A");
}

#[test]
fn elements_are_addressable_by_key_code() {
    let doc = compact_layout();
    let layouts = vec![("compact".to_string(), doc.clone())];
    let tree = compiler::compile(
        "compact",
        &doc,
        &Assignments::default(),
        &layouts,
        "de_DE",
        "en_US",
    )
    .unwrap();

    for code in [27u16, 112, 65, 66, 67, 13, 37, 39] {
        assert!(tree.element(code).is_some(), "element {code} not addressable");
    }
    assert!(tree.element(99).is_none());
}

#[test]
fn malformed_tooltip_yields_no_partial_tree() {
    let doc = parse_layout_str(
        r#"{
            "layout": {
                "name": {"en_US": "Test"},
                "partMargin": 0.5,
                "fun": [],
                "main": [[65, 66]],
                "right": []
            },
            "mappings": {"65": ["A"], "66": ["B", ["not", "valid"]]}
        }"#,
    )
    .unwrap();
    // The document itself validates: codes are mapped, slots recognized.
    assert!(validator::validate(&doc).is_ok());

    let layouts = vec![("test".to_string(), doc.clone())];
    let err = compiler::compile(
        "test",
        &doc,
        &Assignments::default(),
        &layouts,
        "de_DE",
        "en_US",
    )
    .unwrap_err();
    assert_eq!(err, ConfigurationError::InvalidLabelShape { code: 66 });
}

#[test]
fn scenario_e_validation_blocks_compilation() {
    let doc = fixtures::broken_layout();
    let err = validator::validate(&doc).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::UnknownMappingKey {
            code: 66,
            region: Region::Main,
            position: (0, 0),
        }
    );
}

#[test]
fn sample_documents_compile() {
    // The shipped sample data must stay valid.
    let us = keyatlas::parser::load_layout_file(std::path::Path::new("sample/layout-us-ansi.json"))
        .unwrap();
    let de = keyatlas::parser::load_layout_file(std::path::Path::new("sample/layout-de-iso.json"))
        .unwrap();
    let assignments = keyatlas::parser::load_assignments_file(std::path::Path::new(
        "sample/assignments.json",
    ))
    .unwrap();

    validator::validate(&us).unwrap();
    validator::validate(&de).unwrap();

    let layouts = vec![
        ("layout-us-ansi".to_string(), us.clone()),
        ("layout-de-iso".to_string(), de),
    ];
    let tree =
        compiler::compile("layout-us-ansi", &us, &assignments, &layouts, "en_US", "de_DE").unwrap();

    assert!(tree.key_count() > 60);
    assert_eq!(tree.choices.len(), 2);
    assert_eq!(tree.title, "US ANSI (full)");
    // Every documented key in the sample assignments is present on the
    // US layout, so every one of them owns a documentation block.
    assert_eq!(tree.docs.len(), 7);
}
