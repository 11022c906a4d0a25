//! Behavioral contract of the three resolver mappings, executed through
//! the in-memory harness against the real template bodies.

use cirrus_schema::{Entity, Operation, ResolverMapping};
use cirrus_test_utils::item_harness;
use pretty_assertions::assert_eq;
use serde_json::json;

fn mapping(op: Operation) -> ResolverMapping {
    ResolverMapping::for_operation(op, &Entity::item())
}

#[test]
fn save_then_all_includes_the_item() {
    let mut harness = item_harness();

    let saved = harness
        .execute(&mapping(Operation::Create), &json!({ "name": "widget" }))
        .unwrap();
    assert_eq!(saved["name"], "widget");
    let id = saved["itemsId"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let all = harness
        .execute(&mapping(Operation::ListAll), &json!({}))
        .unwrap();
    let items = all.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0], json!({ "itemsId": id, "name": "widget" }));
}

#[test]
fn generated_ids_are_previously_unseen() {
    let mut harness = item_harness();
    let mut seen = Vec::new();
    for i in 0..20 {
        let saved = harness
            .execute(&mapping(Operation::Create), &json!({ "name": format!("w{i}") }))
            .unwrap();
        let id = saved["itemsId"].as_str().unwrap().to_string();
        assert!(!seen.contains(&id), "id {id} reused");
        seen.push(id);
    }
    assert_eq!(harness.table().len(), 20);
}

#[test]
fn delete_then_all_excludes_the_item() {
    let mut harness = item_harness();
    let saved = harness
        .execute(&mapping(Operation::Create), &json!({ "name": "widget" }))
        .unwrap();
    let id = saved["itemsId"].clone();

    let deleted = harness
        .execute(&mapping(Operation::Delete), &json!({ "itemsId": id }))
        .unwrap();
    assert_eq!(deleted["name"], "widget");

    let all = harness
        .execute(&mapping(Operation::ListAll), &json!({}))
        .unwrap();
    assert!(all.as_array().unwrap().is_empty());
}

#[test]
fn delete_of_missing_id_succeeds() {
    let mut harness = item_harness();
    let result = harness
        .execute(&mapping(Operation::Delete), &json!({ "itemsId": "never-existed" }))
        .unwrap();
    // Idempotent delete: no error, empty result.
    assert!(result.is_null());
}

#[test]
fn all_on_empty_table_is_empty_list() {
    let mut harness = item_harness();
    let all = harness
        .execute(&mapping(Operation::ListAll), &json!({}))
        .unwrap();
    assert_eq!(all, json!([]));
}

#[test]
fn missing_argument_is_surfaced() {
    let mut harness = item_harness();
    // The schema's `!` enforces this at the query layer in production; the
    // harness reports the unsubstituted reference instead.
    let result = harness.execute(&mapping(Operation::Delete), &json!({}));
    assert!(result.is_err());
}
