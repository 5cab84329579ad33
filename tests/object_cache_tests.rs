//! Behavioural Tests for the Object Cache Engine
//!
//! Each data-driven test runs over scalars, arrays and objects.

use std::sync::Arc;

use object_cache::{MemoryStore, ObjectCache};
use serde_json::{json, Value};

// == Helper Functions ==

const PREFIX: &str = "localhost.wordpress.wp_";

fn single_site(store: &Arc<MemoryStore>) -> ObjectCache {
    ObjectCache::new(store.clone(), PREFIX, false, 1)
}

fn multisite(store: &Arc<MemoryStore>) -> ObjectCache {
    ObjectCache::new(store.clone(), PREFIX, true, 1)
}

fn new_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new(1000))
}

fn test_data() -> Vec<Value> {
    vec![
        json!("foo"),
        json!(43),
        json!(1.234),
        json!(1.2e3),
        json!(7e-10),
        json!(83),
        json!(-123),
        json!(0x1A),
        json!(["a", "b"]),
        json!({"foo": ["a", "b"]}),
        json!(null),
        json!(false),
        json!(true),
        json!(["foo", "bar"]),
        json!({}),
    ]
}

// == Add ==

#[test]
fn test_add() {
    for data in test_data() {
        let mut cache = single_site(&new_store());

        assert!(cache.add(0, &data, "group", 0));
        assert_eq!(cache.get(0, "group", false), Some(data.clone()));
        assert!(!cache.add(0, &json!("test"), "group", 0));
        assert_eq!(cache.get(0, "group", false), Some(data));
    }
}

#[test]
fn test_add_scenario() {
    let mut cache = single_site(&new_store());

    assert!(cache.add(0, &json!("bar"), "group", 0));
    assert_eq!(cache.get(0, "group", false), Some(json!("bar")));
    assert!(!cache.add(0, &json!("baz"), "group", 0));
    assert_eq!(cache.get(0, "group", false), Some(json!("bar")));
}

#[test]
fn test_close() {
    assert!(single_site(&new_store()).close());
}

// == Counters ==

#[test]
fn test_decr() {
    let mut cache = single_site(&new_store());

    assert!(cache.add("key", &json!(10), "group", 0));
    assert_eq!(cache.decrement("key", 3, "group"), Some(7));
    assert_eq!(cache.decrement("key", 1, "group"), Some(6));
    assert_eq!(cache.get("key", "group", false), Some(json!(6)));
    assert_eq!(cache.decrement("key", 45, "group"), Some(0));
    assert_eq!(cache.get("key", "group", false), Some(json!(0)));
    assert_eq!(cache.decrement("key", 1, "group"), Some(0));
}

#[test]
fn test_incr() {
    let mut cache = single_site(&new_store());

    assert!(cache.add("key", &json!(10), "group", 0));
    assert_eq!(cache.increment("key", 3, "group"), Some(13));
    assert_eq!(cache.increment("key", 1, "group"), Some(14));
    assert_eq!(cache.get("key", "group", false), Some(json!(14)));
    assert_eq!(cache.increment("key", -45, "group"), Some(0));
    assert_eq!(cache.get("key", "group", false), Some(json!(0)));
}

#[test]
fn test_counter_clamp_reaches_shared_store() {
    let store = new_store();
    let mut cache = single_site(&store);

    assert!(cache.add("key", &json!(2), "group", 0));
    assert_eq!(cache.decrement("key", 5, "group"), Some(0));

    let mut fresh = single_site(&store);
    assert_eq!(fresh.get("key", "group", false), Some(json!(0)));
}

// == Delete ==

#[test]
fn test_delete() {
    for data in test_data() {
        let mut cache = single_site(&new_store());

        assert!(!cache.delete(0, "group"));
        assert!(cache.add(0, &data, "group", 0));
        assert!(cache.delete(0, "group"));
        assert_eq!(cache.get(0, "group", false), None);
    }
}

// == Flush ==

#[test]
fn test_flush() {
    for data in test_data() {
        let store = new_store();
        let mut cache = single_site(&store);

        assert!(cache.add(0, &data, "group", 0));
        assert!(cache.flush());
        assert_eq!(cache.get(0, "group", false), None);
        assert!(store.is_empty());
    }
}

#[test]
fn test_reset_flushes() {
    let store = new_store();
    let mut cache = single_site(&store);

    assert!(cache.add("k", &json!(1), "group", 0));
    cache.reset();
    assert_eq!(cache.get("k", "group", false), None);
    assert!(store.is_empty());
}

// == Get ==

#[test]
fn test_get() {
    for data in test_data() {
        let mut cache = single_site(&new_store());

        assert!(cache.add(0, &data, "group", 0));
        assert_eq!(cache.get(0, "group", false), Some(data.clone()));
        assert!(cache.get(0, "group", false).is_some());

        assert_eq!(cache.get("test", "group", false), None);
    }
}

#[test]
fn test_get_force() {
    for data in test_data() {
        let store = new_store();
        let mut cache = single_site(&store);
        assert!(cache.add(0, &data, "group", 0));

        let mut other = single_site(&store);
        assert!(other.set(0, &json!("changed"), "group", 0));

        assert_eq!(cache.get(0, "group", false), Some(data));
        assert_eq!(cache.get(0, "group", true), Some(json!("changed")));
    }
}

// == Replace ==

#[test]
fn test_replace() {
    for data in test_data() {
        let mut cache = single_site(&new_store());

        assert!(cache.add(0, &data, "group", 0));
        assert!(cache.replace(0, &json!("test"), "group", 0));
        assert_eq!(cache.get(0, "group", false), Some(json!("test")));
        assert!(!cache.replace("nokey", &data, "group", 0));
        assert_eq!(cache.get("nokey", "group", false), None);
    }
}

// == Set ==

#[test]
fn test_set() {
    for data in test_data() {
        let mut cache = single_site(&new_store());

        assert!(cache.set(0, &data, "group", 0));
        assert_eq!(cache.get(0, "group", false), Some(data));
    }
}

#[test]
fn test_set_ttl_reaches_shared_store() {
    let store = new_store();
    let mut cache = single_site(&store);

    assert!(cache.set("k", &json!("v"), "group", 1));
    std::thread::sleep(std::time::Duration::from_millis(1100));

    // The local copy lives for the request; the shared copy has expired
    assert_eq!(cache.get("k", "group", false), Some(json!("v")));
    assert_eq!(single_site(&store).get("k", "group", false), None);
}

// == Tenants ==

#[test]
fn test_switch_tenant() {
    for data in test_data() {
        let mut cache = multisite(&new_store());
        cache.switch_tenant(2);

        assert!(cache.add("foo", &data, "group", 0));
        assert_eq!(cache.get("foo", "group", false), Some(data.clone()));
        cache.switch_tenant(3);
        assert_eq!(cache.get("foo", "group", false), None);
        cache.switch_tenant(2);
        assert_eq!(cache.get("foo", "group", false), Some(data));
    }
}

#[test]
fn test_global_groups() {
    for data in test_data() {
        let mut cache = multisite(&new_store());

        cache.register_global_groups("group");
        cache.switch_tenant(2);
        assert!(cache.add("foo", &data, "group", 0));
        assert_eq!(cache.get("foo", "group", false), Some(data.clone()));
        cache.switch_tenant(3);
        assert_eq!(cache.get("foo", "group", false), Some(data.clone()));
        cache.switch_tenant(2);
        assert_eq!(cache.get("foo", "group", false), Some(data));
    }
}

#[test]
fn test_tenants_isolated_in_shared_store() {
    let store = new_store();
    let mut site_two = multisite(&store);
    site_two.switch_tenant(2);
    assert!(site_two.add("foo", &json!("two"), "group", 0));

    let mut site_three = multisite(&store);
    site_three.switch_tenant(3);
    assert!(site_three.add("foo", &json!("three"), "group", 0));

    let mut reader = multisite(&store);
    reader.switch_tenant(2);
    assert_eq!(reader.get("foo", "group", false), Some(json!("two")));
    reader.switch_tenant(3);
    assert_eq!(reader.get("foo", "group", false), Some(json!("three")));
}

// == Non-persistent Groups ==

#[test]
fn test_non_persistent_groups() {
    for data in test_data() {
        let store = new_store();
        let mut cache = single_site(&store);

        cache.register_non_persistent_groups("temp");
        assert!(cache.add("foo", &data, "temp", 0));
        assert_eq!(cache.get("foo", "temp", false), Some(data.clone()));
        assert!(cache.add("foo", &data, "group", 0));
        assert_eq!(cache.get("foo", "group", false), Some(data.clone()));

        // Re-init drops the local cache but keeps the shared store
        let mut cache = single_site(&store);
        cache.register_non_persistent_groups("temp");
        assert_eq!(cache.get("foo", "temp", false), None);
        assert_eq!(cache.get("foo", "group", false), Some(data));
    }
}

#[test]
fn test_non_persistent_group_delete_always_succeeds() {
    let mut cache = single_site(&new_store());
    cache.register_non_persistent_groups(["temp", "counts"]);

    assert!(cache.delete("missing", "temp"));
    assert!(cache.delete("missing", "counts"));
}

// == Groups ==

#[test]
fn test_groups() {
    let mut cache = single_site(&new_store());
    let key = "foo";

    assert!(cache.add(key, &json!("test1"), "group1", 0));
    assert!(cache.add(key, &json!("test2"), "group2", 0));
    assert_eq!(cache.get(key, "group1", false), Some(json!("test1")));
    assert_eq!(cache.get(key, "group2", false), Some(json!("test2")));

    assert!(cache.set(key, &json!("test12"), "group1", 0));
    assert!(cache.set(key, &json!("test22"), "group2", 0));
    assert_eq!(cache.get(key, "group1", false), Some(json!("test12")));
    assert_eq!(cache.get(key, "group2", false), Some(json!("test22")));

    assert!(cache.delete(key, "group2"));
    assert_eq!(cache.get(key, "group2", false), None);
    assert_eq!(cache.get(key, "group1", false), Some(json!("test12")));

    assert!(cache.replace(key, &json!("test13"), "group1", 0));
    assert_eq!(cache.get(key, "group1", false), Some(json!("test13")));
    assert_eq!(cache.get(key, "group2", false), None);
}

#[test]
fn test_stats_counts_local_entries() {
    let mut cache = single_site(&new_store());

    cache.add("a", &json!(1), "group1", 0);
    cache.add("b", &json!(2), "group1", 0);
    cache.add("a", &json!(3), "group2", 0);

    let stats = cache.stats();
    assert_eq!(stats.total_entries, 3);
    assert_eq!(stats.groups.get("group1"), Some(&2));
}
