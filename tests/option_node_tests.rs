use highchart_rs::core::{JsExpr, OptionKey, OptionNode, OptionValue, Scalar};
use highchart_rs::error::ChartError;
use serde_json::json;

#[test]
fn scalar_value_replaces_previous_children() {
    let mut node = OptionNode::default();
    node.set("text", "Title");
    node.get("style").set("color", "#333");

    node.set_value(42);

    assert_eq!(node.value(), OptionValue::from(42));
    assert!(!node.has("text"));
    assert!(!node.has("style"));
    assert_eq!(node.len(), 0);
    assert!(node.is_terminal());
}

#[test]
fn child_write_clears_previous_scalar() {
    let mut node = OptionNode::new("legacy");
    node.set("enabled", true);

    let value = node.value();
    assert!(value.as_object().is_some());
    assert_ne!(value, OptionValue::from("legacy"));
    assert!(node.scalar().is_none());
}

#[test]
fn child_read_clears_previous_scalar() {
    let mut node = OptionNode::new(1.5);
    let _ = node.get("x");

    assert!(!node.is_terminal());
    assert_eq!(node.value(), OptionValue::from(json!({"x": null})));
}

#[test]
fn get_on_absent_key_creates_empty_child() {
    let mut node = OptionNode::default();
    assert!(!node.has("xAxis"));

    let child = node.get("xAxis");
    assert!(child.is_empty());

    assert!(node.has("xAxis"));
    let value = node.value();
    assert_eq!(value.as_object().expect("object")["xAxis"], OptionValue::NULL);
}

#[test]
fn has_does_not_create_children() {
    let node = OptionNode::default();
    assert!(!node.has("chart"));
    assert!(node.is_empty());
    assert!(node.child("chart").is_none());
}

#[test]
fn push_appends_sequential_children() {
    let mut node = OptionNode::default();
    node.push().set("name", "A");
    node.push_value(json!({"name": "B"}));
    node.push();

    assert_eq!(
        node.value(),
        OptionValue::from(json!([{"name": "A"}, {"name": "B"}, null]))
    );
}

#[test]
fn push_on_terminal_node_turns_it_into_a_list() {
    let mut node = OptionNode::new("scalar");
    node.push_value(1);

    assert_eq!(node.value(), OptionValue::from(json!([1])));
}

#[test]
fn remove_deletes_child_and_is_noop_when_absent() {
    let mut node = OptionNode::new(json!({"a": 1, "b": 2, "c": 3}));

    let removed = node.remove("b").expect("b exists");
    assert_eq!(removed.value(), OptionValue::from(2));
    assert!(node.remove("missing").is_none());
    assert_eq!(node.value(), OptionValue::from(json!({"a": 1, "c": 3})));
}

#[test]
fn removing_all_children_leaves_an_empty_node() {
    let mut node = OptionNode::default();
    node.set("only", 1);
    node.remove("only");

    assert!(node.is_empty());
    assert_eq!(node.value(), OptionValue::NULL);
}

#[test]
fn clone_is_independent_in_both_directions() {
    let mut original = OptionNode::default();
    original.get("series").push().set("name", "A");

    let mut copy = original.clone();
    copy.get("series").get(0).set("name", "B");
    assert_eq!(
        original.value(),
        OptionValue::from(json!({"series": [{"name": "A"}]}))
    );

    original.get("series").get(0).set("name", "C");
    original.set("title", "only in original");
    assert_eq!(
        copy.value(),
        OptionValue::from(json!({"series": [{"name": "B"}]}))
    );
}

#[test]
fn set_value_with_composite_rebuilds_children() {
    let mut node = OptionNode::default();
    node.set("stale", 1);

    node.set_value(json!({"fresh": [1, 2]}));

    assert!(!node.has("stale"));
    assert!(node.get("fresh").has(1));
    assert_eq!(node.value(), OptionValue::from(json!({"fresh": [1, 2]})));
}

#[test]
fn array_input_keys_children_by_position() {
    let node = OptionNode::new(vec!["a", "b"]);

    let keys: Vec<_> = node.keys().cloned().collect();
    assert_eq!(keys, vec![OptionKey::Index(0), OptionKey::Index(1)]);
}

#[test]
fn expressions_are_kept_as_terminal_leaves() {
    let mut node = OptionNode::default();
    node.get("tooltip")
        .set("formatter", JsExpr::new("function(){ return this.y; }"));

    let formatter = node.try_get("tooltip").and_then(|t| t.try_get("formatter"));
    let formatter = formatter.expect("formatter exists");
    assert_eq!(
        formatter.expr().map(JsExpr::expression),
        Some("function(){ return this.y; }")
    );
    assert_eq!(
        formatter.value(),
        OptionValue::Expr(JsExpr::new("function(){ return this.y; }"))
    );
}

#[test]
fn strict_lookup_reports_missing_key() {
    let mut node = OptionNode::default();
    node.set("present", 1);

    assert!(node.try_get("present").is_ok());
    let err = node.try_get("absent").expect_err("absent key must fail");
    assert!(matches!(err, ChartError::KeyNotFound(ref key) if key == "absent"));
    assert!(!node.has("absent"));
}

#[test]
fn index_operators_mirror_builder_calls() {
    let mut node = OptionNode::default();
    node["chart"]["type"] = OptionNode::new("bar");
    node["series"][0]["data"] = OptionNode::new([1, 2]);

    assert_eq!(node["chart"]["type"].scalar(), Some(&Scalar::Str("bar".to_owned())));
    assert_eq!(
        node.value(),
        OptionValue::from(json!({"chart": {"type": "bar"}, "series": [{"data": [1, 2]}]}))
    );
}

#[test]
fn strings_from_legacy_bytes_are_normalized_to_utf8() {
    let mut node = OptionNode::default();
    node.set("title", OptionValue::text_from_bytes(b"Gon\xe7alo"));
    node.set("formatter", JsExpr::from_bytes(b"function(){ return '\xe9'; }"));

    assert_eq!(node["title"].value(), OptionValue::from("Gonçalo"));
    assert_eq!(
        node["formatter"].expr().map(JsExpr::expression),
        Some("function(){ return 'é'; }")
    );
}

#[test]
fn decimal_name_and_index_address_the_same_child() {
    let mut node = OptionNode::default();
    node.set("x", 1);
    node.set(0u64, "by-index");
    node.set("0", "by-name");

    assert_eq!(node.len(), 2);
    assert!(node.has(0u64));
    assert!(node.has("0"));
    assert_eq!(
        node.keys().cloned().collect::<Vec<_>>(),
        vec![OptionKey::Name("x".to_owned()), OptionKey::Index(0)]
    );
    assert_eq!(node.value(), OptionValue::from(json!({"x": 1, "0": "by-name"})));

    assert!(node.remove("0").is_some());
    assert!(!node.has(0u64));
    assert_eq!(node.len(), 1);
}

#[test]
fn decimal_object_keys_continue_the_index_sequence() {
    let mut node = OptionNode::new(json!({"0": "a", "1": "b"}));
    node.push_value("c");

    assert_eq!(node.value(), OptionValue::from(json!(["a", "b", "c"])));
    assert_eq!(node.get("07").value(), OptionValue::NULL);
    assert!(node.has("07"));
    assert!(!node.has(7u64));
}

#[test]
fn append_after_largest_possible_index_does_not_overwrite() {
    let mut node = OptionNode::default();
    node.set(u64::MAX, "first");
    node.push_value("second");
    node.push_value("third");

    assert_eq!(
        node.keys().cloned().collect::<Vec<_>>(),
        vec![
            OptionKey::Index(u64::MAX),
            OptionKey::Name("18446744073709551616".to_owned()),
            OptionKey::Name("18446744073709551617".to_owned()),
        ]
    );
    assert_eq!(node[u64::MAX].value(), OptionValue::from("first"));
    assert_eq!(node.len(), 3);
}
