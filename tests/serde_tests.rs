#![cfg(all(feature = "serde", feature = "eager"))]
//! Serialization tests for Key and EagerCollection.

use collectables::collect;
use collectables::eager::EagerCollection;
use collectables::key::Key;
use rstest::rstest;

// =============================================================================
// Key
// =============================================================================

#[rstest]
#[case(Key::Index(3), "3")]
#[case(Key::from("name"), "\"name\"")]
fn key_serializes_as_number_or_string(#[case] key: Key, #[case] expected: &str) {
    assert_eq!(serde_json::to_string(&key).unwrap(), expected);
}

#[rstest]
#[case("3", Key::Index(3))]
#[case("\"name\"", Key::from("name"))]
#[case("\"7\"", Key::Index(7))]
#[case("\"007\"", Key::from("007"))]
fn key_deserializes(#[case] json: &str, #[case] expected: Key) {
    assert_eq!(serde_json::from_str::<Key>(json).unwrap(), expected);
}

#[rstest]
fn negative_key_is_rejected() {
    assert!(serde_json::from_str::<Key>("-1").is_err());
}

// =============================================================================
// EagerCollection
// =============================================================================

#[rstest]
fn list_serializes_as_array() {
    let collection = collect![1, 2, 3];
    assert_eq!(serde_json::to_string(&collection).unwrap(), "[1,2,3]");
}

#[rstest]
fn labelled_collection_serializes_as_object() {
    let person = collect!["name" => "Fahmi", "country" => "Indonesia"];
    assert_eq!(
        serde_json::to_string(&person).unwrap(),
        r#"{"name":"Fahmi","country":"Indonesia"}"#
    );
}

#[rstest]
fn sparse_indices_serialize_as_object() {
    let mut collection = collect![10, 20, 30];
    collection.forget(1usize);
    assert_eq!(serde_json::to_string(&collection).unwrap(), r#"{"0":10,"2":30}"#);
}

#[rstest]
fn array_deserializes_with_index_keys() {
    let collection: EagerCollection<i32> = serde_json::from_str("[4, 5, 6]").unwrap();
    assert_eq!(collection, collect![4, 5, 6]);
}

#[rstest]
fn object_round_trip_keeps_key_order() {
    let scores = collect!["Gibran" => 80, "Azdy" => 100, "Azkan" => 90];
    let json = serde_json::to_string(&scores).unwrap();
    let restored: EagerCollection<i32> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, scores);
}

#[rstest]
fn sparse_round_trip_restores_indices() {
    let mut collection = collect!["a", "b", "c"];
    collection.forget(0usize);
    let json = serde_json::to_string(&collection).unwrap();
    let restored: EagerCollection<String> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.get(1usize), Some(&"b".to_string()));
    assert_eq!(restored.keys().to_vec(), vec![Key::Index(1), Key::Index(2)]);
}

#[rstest]
fn nested_groups_serialize() {
    let groups = collect!["IT" => collect!["Fahmi", "Azdy"], "HR" => collect!["Hasyim"]];
    assert_eq!(
        serde_json::to_string(&groups).unwrap(),
        r#"{"IT":["Fahmi","Azdy"],"HR":["Hasyim"]}"#
    );
}
