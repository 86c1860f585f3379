//! Property-based tests for recollect-storage using proptest.

use proptest::prelude::*;
use recollect_core::{json, matcher, Record, Selection, Value};
use recollect_storage::{Collection, ReadCollection, RemoveSelector};

fn build(rows: &[(i64, i64, String)]) -> (Collection, Vec<Record>) {
    let records: Vec<Record> = rows
        .iter()
        .map(|(id, age, name)| Record::try_from(json!({"id": id, "age": age, "name": name})).unwrap())
        .collect();
    (Collection::from_records(records.clone(), "id"), records)
}

fn rows() -> impl Strategy<Value = Vec<(i64, i64, String)>> {
    prop::collection::vec((0i64..200, 0i64..100, "[a-e]{0,3}"), 0..80)
}

proptest! {
    /// Test that where and not split a collection into two disjoint parts.
    #[test]
    fn where_not_partition(rows in rows(), bound in 0i64..100) {
        let (collection, _) = build(&rows);
        let spec = Selection::new().with("age", matcher::min(bound));

        let matched = collection.where_(&spec);
        let rest = collection.not(&spec);
        prop_assert_eq!(matched.size() + rest.size(), collection.size());
        for record in matched.records() {
            prop_assert!(!rest.records().contains(&record));
        }
    }

    /// Test that the index and the sequence agree after any mutation mix.
    #[test]
    fn index_consistency(rows in rows(), removals in prop::collection::vec(0i64..200, 0..40)) {
        let (collection, _) = build(&rows);
        prop_assert!(collection.is_consistent());

        collection.remove(RemoveSelector::keys(removals.iter().map(|k| json!(k))));
        prop_assert!(collection.is_consistent());
        for key in &removals {
            prop_assert!(collection.get(*key).is_none());
        }

        collection.sort("name").reverse();
        prop_assert!(collection.is_consistent());

        collection.keep(("age", matcher::max(50)));
        prop_assert!(collection.is_consistent());
    }

    /// Test that re-adding keys leaves exactly one record per key.
    #[test]
    fn unique_keys(rows in rows()) {
        let (collection, _) = build(&rows);
        let mut keys: Vec<i64> = rows.iter().map(|(id, _, _)| *id).collect();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(collection.size(), keys.len());
    }

    /// Test that sort is idempotent and independent of the previous order.
    #[test]
    fn sort_idempotent(rows in rows()) {
        let (collection, _) = build(&rows);
        collection.sort("name");
        let once = collection.records();

        collection.reverse().sort("name");
        prop_assert_eq!(collection.records(), once.clone());

        let names: Vec<Value> = collection.select("name");
        let mut sorted = names.clone();
        sorted.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
        prop_assert_eq!(names, sorted);
    }

    /// Test that get returns the last added handle for every key.
    #[test]
    fn get_identity(rows in rows()) {
        let (collection, records) = build(&rows);
        for (i, record) in records.iter().enumerate() {
            let id = rows[i].0;
            let last = rows.iter().rposition(|(other, _, _)| *other == id);
            if last == Some(i) {
                prop_assert!(collection.get(id).map(|r| r.ptr_eq(record)).unwrap_or(false));
            }
        }
    }

    /// Test that pages cover the collection exactly once.
    #[test]
    fn pages_cover_collection(rows in rows(), page_size in 1usize..20) {
        let (collection, _) = build(&rows);
        let first = collection.page(page_size, 1);
        let mut seen = Vec::new();
        for number in 1..=first.pages {
            seen.extend(collection.page(page_size, number).records);
        }
        prop_assert_eq!(seen, collection.records());
    }
}
