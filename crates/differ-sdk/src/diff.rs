//! One-call diffing of native data.

use differ_engine::{DiffConfig, Differ, ROOT_KEY};
use differ_normalize::{from_json_str, to_value};
use differ_types::ChangeMap;
use serde::Serialize;
use tracing::debug;

use crate::error::SdkResult;

/// Diff two serializable values with the default configuration.
pub fn diff_serialize<B, A>(before: &B, after: &A) -> SdkResult<ChangeMap>
where
    B: Serialize + ?Sized,
    A: Serialize + ?Sized,
{
    diff_serialize_with(&DiffConfig::default(), ROOT_KEY, before, after)
}

/// Diff two serializable values.
///
/// Both sides are normalized first. If either fails, the error is returned
/// and nothing is diffed. `key` names the root entry for non-container
/// values and selects the identity field of a top-level list.
pub fn diff_serialize_with<B, A>(config: &DiffConfig, key: &str, before: &B, after: &A) -> SdkResult<ChangeMap>
where
    B: Serialize + ?Sized,
    A: Serialize + ?Sized,
{
    let before = to_value(before)?;
    let after = to_value(after)?;
    debug!(key, before = %before.kind(), after = %after.kind(), "normalized inputs");
    Ok(Differ::new(config.clone()).diff_keyed(key, &before, &after))
}

/// Diff two JSON documents with the given configuration.
pub fn diff_json(config: &DiffConfig, before: &str, after: &str) -> SdkResult<ChangeMap> {
    let before = from_json_str(before)?;
    let after = from_json_str(after)?;
    Ok(Differ::new(config.clone()).diff(&before, &after))
}

/// Render a change tree as pretty-printed JSON.
pub fn render_json(changes: &ChangeMap) -> SdkResult<String> {
    Ok(serde_json::to_string_pretty(changes)?)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Arc;
    use std::thread;

    use differ_types::{ChangeKind, ScalarValue, Value};
    use proptest::prelude::*;

    use crate::error::SdkError;

    use super::*;

    #[derive(Clone, Serialize)]
    struct LineItem {
        sku: String,
        qty: u32,
        price_cents: i64,
    }

    #[derive(Clone, Serialize)]
    struct Order {
        id: u64,
        customer: Option<String>,
        status: Status,
        items: Vec<LineItem>,
        notes: BTreeMap<String, String>,
    }

    #[derive(Clone, Copy, Serialize)]
    #[serde(rename_all = "snake_case")]
    enum Status {
        Open,
        Shipped,
    }

    fn item(sku: &str, qty: u32) -> LineItem {
        LineItem {
            sku: sku.to_string(),
            qty,
            price_cents: 250,
        }
    }

    fn order() -> Order {
        Order {
            id: 42,
            customer: Some("ada".to_string()),
            status: Status::Open,
            items: vec![item("A-1", 1), item("B-2", 3)],
            notes: BTreeMap::new(),
        }
    }

    #[test]
    fn identical_structs_have_no_changes() {
        let changes = diff_serialize(&order(), &order()).unwrap();
        assert!(changes.is_empty());
        assert!(!changes.has_changes());
    }

    #[test]
    fn struct_field_changes() {
        let mut after = order();
        after.status = Status::Shipped;
        after.customer = None;
        after.notes.insert("gift".to_string(), "yes".to_string());

        let changes = diff_serialize(&order(), &after).unwrap();
        assert_eq!(changes.len(), 3);

        let status = changes.get("status").unwrap();
        assert_eq!(status.change, ChangeKind::Replaced);
        assert_eq!(status.after, Value::from("shipped"));

        let customer = changes.get("customer").unwrap();
        assert!(customer.is_deleted());
        assert_eq!(customer.before, Value::from("ada"));

        let notes = changes.get("notes").unwrap().children().unwrap();
        assert!(notes.get("gift").unwrap().is_new());
    }

    #[test]
    fn line_items_tracked_by_sku() {
        let mut after = order();
        after.items.insert(0, item("Z-9", 1));
        after.items[2].qty = 4;

        let config = DiffConfig::default().with_identity_key_for("items", "sku");
        let changes = diff_serialize_with(&config, ROOT_KEY, &order(), &after).unwrap();

        let items = changes.get("items").unwrap().children().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.get("0").unwrap().is_new());
        let qty = items.get("2").unwrap().children().unwrap().get("qty").unwrap();
        assert_eq!(qty.before, Value::from(3u32));
        assert_eq!(qty.after, Value::from(4u32));

        let paths: Vec<String> = changes.paths().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["items.0", "items.2.qty"]);
    }

    #[test]
    fn integer_widths_collapse_within_a_class() {
        let changes = diff_serialize(&7u8, &7u64).unwrap();
        assert!(changes.is_empty());

        let changes = diff_serialize(&7i16, &7i64).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn signedness_is_a_change() {
        let changes = diff_serialize(&7u32, &7i32).unwrap();
        let root = changes.get(ROOT_KEY).unwrap();
        assert_eq!(root.before, Value::Scalar(ScalarValue::Unsigned(7)));
        assert_eq!(root.after, Value::Scalar(ScalarValue::Signed(7)));
    }

    #[test]
    fn keyed_scalar_root() {
        let changes = diff_serialize_with(&DiffConfig::default(), "int", &1i64, &2i64).unwrap();
        assert_eq!(changes.len(), 1);
        assert!(changes.get("int").unwrap().is_changed());
    }

    #[test]
    fn type_mismatch_is_not_an_error() {
        let changes = diff_serialize(&5i64, "five").unwrap();
        assert!(changes.has_changes());
        let root = changes.get(ROOT_KEY).unwrap();
        assert_eq!(root.before, Value::from(5i64));
        assert_eq!(root.after, Value::from("five"));
    }

    #[test]
    fn unsupported_input_aborts_before_diffing() {
        let mut bad = HashMap::new();
        bad.insert(vec![1u8], "list keys are not representable");

        let err = diff_serialize(&order(), &bad).unwrap_err();
        assert!(matches!(err, SdkError::Normalize(_)));

        let err = diff_serialize(&u128::MAX, &0u8).unwrap_err();
        assert!(matches!(err, SdkError::Normalize(_)));
    }

    #[test]
    fn json_documents() {
        let config = DiffConfig::default();
        let changes = diff_json(&config, "[1, 2, 3]", "[1, 2, 5, 3]").unwrap();
        assert_eq!(changes.len(), 1);
        assert!(changes.get("2").unwrap().is_new());

        let err = diff_json(&config, "[1,", "[]").unwrap_err();
        assert!(matches!(err, SdkError::Normalize(_)));
    }

    #[test]
    fn render_json_shape() {
        let changes = diff_serialize(&BTreeMap::from([("a", 1i64)]), &BTreeMap::from([("a", 2i64)])).unwrap();
        let rendered = render_json(&changes).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["a"]["change"]["kind"], "replaced");
        assert_eq!(parsed["a"]["before"], 1);
        assert_eq!(parsed["a"]["after"], 2);
    }

    #[test]
    fn render_empty_tree() {
        assert_eq!(render_json(&ChangeMap::new()).unwrap(), "{}");
    }

    #[test]
    fn differ_is_shareable_across_threads() {
        let differ = Arc::new(Differ::default());
        let handles: Vec<_> = (0..4i64)
            .map(|n| {
                let differ = Arc::clone(&differ);
                thread::spawn(move || {
                    let before = Value::from(vec![n, n + 1]);
                    let after = Value::from(vec![n, 99, n + 1]);
                    differ.diff(&before, &after)
                })
            })
            .collect();

        for handle in handles {
            let changes = handle.join().unwrap();
            assert_eq!(changes.len(), 1);
            assert!(changes.get("1").unwrap().is_new());
        }
    }

    proptest! {
        #[test]
        fn map_key_contract(key in "[a-z]{1,6}", value in any::<i64>()) {
            let empty: BTreeMap<String, i64> = BTreeMap::new();
            let single = BTreeMap::from([(key.clone(), value)]);

            let inserted = diff_serialize(&empty, &single).unwrap();
            prop_assert_eq!(inserted.len(), 1);
            let field = inserted.get(&key).unwrap();
            prop_assert!(field.is_new());
            prop_assert_eq!(&field.after, &Value::from(value));

            let deleted = diff_serialize(&single, &empty).unwrap();
            let field = deleted.get(&key).unwrap();
            prop_assert!(field.is_deleted());
            prop_assert_eq!(&field.before, &Value::from(value));
        }

        #[test]
        fn vec_diff_with_itself_is_empty(items in prop::collection::vec(any::<u8>(), 0..40)) {
            let changes = diff_serialize(&items, &items).unwrap();
            prop_assert!(changes.is_empty());
        }
    }
}
