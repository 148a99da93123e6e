//! On-disk behavior of the recency store: entries must survive a process
//! restart, and a schema-version bump must orphan the old namespace.

use munch_data::SearchQuery;
use munch_store::{RecentNamespace, RecentStore};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
struct Visit {
    id: String,
    label: String,
}

fn visit(label: &str) -> Visit {
    Visit {
        id: uuid::Uuid::new_v4().to_string(),
        label: label.to_string(),
    }
}

#[test]
fn entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recent.redb");

    let first = visit("first");
    let second = visit("second");
    {
        let store = RecentStore::open(&path).unwrap();
        let recents: RecentNamespace<Visit> = RecentNamespace::new(store, "visits", 5);
        recents.put(&first.id, &first).unwrap();
        recents.put(&second.id, &second).unwrap();
        assert_eq!(recents.count().unwrap(), 2);
    }

    let store = RecentStore::open(&path).unwrap();
    let recents: RecentNamespace<Visit> = RecentNamespace::new(store, "visits", 5);

    let list = recents.list().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.contains(&first));
    assert!(list.contains(&second));
}

#[test]
fn capacity_bound_holds_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recent.redb");

    {
        let store = RecentStore::open(&path).unwrap();
        let recents: RecentNamespace<Visit> = RecentNamespace::new(store, "visits", 3);
        for label in ["a", "b", "c"] {
            recents.put(label, &visit(label)).unwrap();
        }
    }

    let store = RecentStore::open(&path).unwrap();
    let recents: RecentNamespace<Visit> = RecentNamespace::new(store, "visits", 3);
    recents.put("d", &visit("d")).unwrap();

    assert_eq!(recents.count().unwrap(), 3);
}

#[test]
fn schema_bump_orphans_old_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recent.redb");

    let store = RecentStore::open(&path).unwrap();

    // Entries written under a previous schema version live in a different
    // namespace and never surface through the current one.
    let old: RecentNamespace<SearchQuery> = RecentNamespace::new(
        store.clone(),
        format!("SearchQuery+{}", SearchQuery::SCHEMA_VERSION - 1),
        10,
    );
    let query = SearchQuery {
        query: Some("prata".to_string()),
        ..SearchQuery::default()
    };
    old.put(&query.recent_key(), &query).unwrap();

    let current = RecentNamespace::searches(&store);
    assert!(current.list().unwrap().is_empty());
    assert_eq!(old.count().unwrap(), 1);

    // Clearing the current namespace leaves the orphaned one untouched
    current.clear().unwrap();
    assert_eq!(old.count().unwrap(), 1);
}
