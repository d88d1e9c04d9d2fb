//! Integration tests for FieldPath.

use fieldnorm::{FieldPath, PathSegment};

#[test]
fn test_path_construction_and_display() {
    assert_eq!(FieldPath::root().to_string(), "");
    assert_eq!(FieldPath::field("title").to_string(), "title");
    assert_eq!(FieldPath::root().push_index(0).to_string(), "[0]");

    let path = FieldPath::field("items")
        .push_key("value")
        .push_index(2)
        .push_key("value")
        .push_key("qty");
    assert_eq!(path.to_string(), "items.value[2].value.qty");
}

#[test]
fn test_row_field_path() {
    let path = FieldPath::field("items").row_field(1, "choice");
    assert_eq!(path.to_string(), "items[1].choice");
    assert_eq!(path.field_code(), Some("items"));
    assert_eq!(path.len(), 3);
}

#[test]
fn test_path_segments_preserved() {
    let path = FieldPath::field("data").push_index(42).push_key("value");

    let segments: Vec<&PathSegment> = path.segments().collect();
    assert_eq!(segments.len(), 3);

    match &segments[0] {
        PathSegment::Key(name) => assert_eq!(name, "data"),
        _ => panic!("Expected Key segment"),
    }

    match &segments[1] {
        PathSegment::Index(idx) => assert_eq!(*idx, 42),
        _ => panic!("Expected Index segment"),
    }
}

#[test]
fn test_path_is_immutable() {
    let base = FieldPath::field("items");

    let row0 = base.push_index(0);
    let row1 = base.push_index(1);
    let value = base.push_key("value");

    assert_eq!(base.to_string(), "items");
    assert_eq!(row0.to_string(), "items[0]");
    assert_eq!(row1.to_string(), "items[1]");
    assert_eq!(value.to_string(), "items.value");
}

#[test]
fn test_path_equality() {
    let a = FieldPath::field("a").push_index(0);
    assert_eq!(a, FieldPath::field("a").push_index(0));
    assert_ne!(a, FieldPath::field("a").push_index(1));
    assert_ne!(a, FieldPath::field("b").push_index(0));
}

#[test]
fn test_root_has_no_field_code() {
    let root = FieldPath::root();
    assert!(root.is_root());
    assert!(root.is_empty());
    assert_eq!(root.field_code(), None);
    assert_eq!(root.push_index(3).field_code(), None);
}
