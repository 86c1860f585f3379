//! Views and proxies layered over collections.

mod common;

use common::*;

fn doe_view(people: &Collection) -> View {
    View::new(people, Selection::new().with("last_name", "doe"))
}

#[test]
fn test_view_tracks_source() {
    init_tracing();
    let p = People::new();
    let people = p.collection();
    let does = doe_view(&people);
    assert_eq!(does.records(), vec![p.fred.clone(), p.tim.clone()]);

    let jane = record(json!({"id": 4, "first_name": "jane", "last_name": "doe"}));
    people.add_one(&jane);
    assert_eq!(does.records(), vec![p.fred.clone(), p.tim.clone(), jane]);

    people.remove(&p.fred);
    assert_eq!(does.size(), 2);
    assert!(does.get(2).is_none());
}

#[test]
fn test_view_matches_source_after_batch_with_repeated_keys() {
    let p = People::new();
    let people = p.collection();
    let does = doe_view(&people);

    people.add([
        record(json!({"id": 4, "first_name": "jane", "last_name": "doe"})),
        record(json!({"id": 4, "first_name": "jane", "last_name": "smith"})),
        record(json!({"id": 3, "first_name": "tim", "last_name": "smith"})),
    ]);

    assert_eq!(does.records(), vec![p.fred.clone()]);
    assert_eq!(
        does.records(),
        people.where_(&Selection::new().with("last_name", "doe")).records()
    );
}

#[test]
fn test_view_writes_through() {
    let p = People::new();
    let people = p.collection();
    let does = doe_view(&people);

    does.remove(("first_name", fuzzy("ti")));
    assert_eq!(people.records(), vec![p.john.clone(), p.fred.clone()]);
    assert_eq!(does.records(), vec![p.fred]);

    does.add_one(&record(json!({"id": 9, "last_name": "smith"})));
    assert_eq!(people.size(), 3);
    assert_eq!(does.size(), 1);
}

#[test]
fn test_view_order_is_independent() {
    let p = People::new();
    let people = p.collection();
    let does = doe_view(&people);
    does.reverse();
    assert_eq!(does.records(), vec![p.tim.clone(), p.fred.clone()]);
    assert_eq!(people.records(), p.all());
}

#[test]
fn test_view_listeners_see_synced_changes() {
    let p = People::new();
    let people = p.collection();
    let does = doe_view(&people);
    let (count, counter) = counter();
    does.on(EventKind::Remove, move |event| counter.set(counter.get() + event.records().len()));

    people.remove(RemoveSelector::keys([1, 2, 3]));
    assert_eq!(count.get(), 2);
}

#[test]
fn test_proxy_membership_follows_source() {
    let p = People::new();
    let people = p.collection();
    let selected = Proxy::new(&people);

    selected.add([p.john.clone(), p.tim.clone()]);
    selected.add_one(&record(json!({"id": 99})));
    assert_eq!(selected.records(), vec![p.john.clone(), p.tim.clone()]);

    people.remove(&p.john);
    assert_eq!(selected.records(), vec![p.tim.clone()]);

    selected.empty();
    assert_eq!(people.size(), 2);
}

#[test]
fn test_proxy_cascades() {
    let p = People::new();
    let people = p.collection();
    let selected = Proxy::new(&people);
    let highlighted = Proxy::new(&selected);
    let (count, counter) = counter();
    highlighted.on(EventKind::Remove, move |_| counter.set(counter.get() + 1));

    selected.add(p.all());
    highlighted.add([p.fred.clone()]);

    people.empty();
    assert!(selected.is_empty());
    assert!(highlighted.is_empty());
    assert_eq!(count.get(), 1);
}

#[test]
fn test_proxy_over_view() {
    let p = People::new();
    let people = p.collection();
    let does = doe_view(&people);
    let picked = Proxy::new(&does);

    picked.add(p.all());
    assert_eq!(picked.records(), vec![p.fred.clone(), p.tim.clone()]);

    does.remove(3);
    assert_eq!(picked.records(), vec![p.fred]);
}

#[test]
fn test_dropping_derived_unsubscribes() {
    let p = People::new();
    let people = p.collection();
    {
        let _does = doe_view(&people);
        let _picked = Proxy::new(&people);
        assert!(!people.events().is_empty());
    }
    assert!(people.events().is_empty());
}
