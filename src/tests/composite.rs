use crate::{Capacities, CompositeTable, TableError};

type Table = CompositeTable<String, String, i32>;

fn put(table: &mut Table, outer: &str, inner: &str, value: i32) -> Option<i32> {
    table.insert(outer.to_owned(), inner.to_owned(), value).unwrap()
}

#[test]
fn empty_table() {
    let table = Table::new();
    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
    assert_eq!(table.outer_len(), 0);
    assert_eq!(table.capacity(), 5);
    assert_eq!(table.keys().count(), 0);
    assert_eq!(table.get("1", "x"), Err(TableError::KeyNotFound));
}

#[test]
fn insert_get_remove_scenario() {
    let mut table = Table::new();
    put(&mut table, "1", "x", 10);
    put(&mut table, "1", "y", 20);
    put(&mut table, "2", "z", 30);

    assert_eq!(table.get("1", "x"), Ok(&10));
    assert_eq!(table.len(), 3);
    assert_eq!(table.outer_len(), 2);

    assert_eq!(table.remove("1", "x"), Ok(10));
    assert_eq!(table.get("1", "y"), Ok(&20));
    assert_eq!(table.get("1", "x"), Err(TableError::KeyNotFound));
    assert_eq!(table.len(), 2);

    assert_eq!(table.remove("1", "y"), Ok(20));
    assert_eq!(table.remove("2", "z"), Ok(30));
    assert_eq!(table.len(), 0);
    assert_eq!(table.keys().count(), 0);
    assert!(table.is_empty());
}

#[test]
fn missing_outer_or_inner_key() {
    let mut table = Table::new();
    put(&mut table, "1", "x", 10);
    assert_eq!(table.get("2", "x"), Err(TableError::KeyNotFound));
    assert_eq!(table.get("1", "y"), Err(TableError::KeyNotFound));
    assert_eq!(table.remove("2", "x"), Err(TableError::KeyNotFound));
    assert_eq!(table.remove("1", "y"), Err(TableError::KeyNotFound));
    assert_eq!(table.len(), 1);
}

#[test]
fn overwrite_keeps_counts() {
    let mut table = Table::new();
    assert_eq!(put(&mut table, "1", "x", 10), None);
    assert_eq!(put(&mut table, "1", "x", 11), Some(10));
    assert_eq!(table.get("1", "x"), Ok(&11));
    assert_eq!(table.len(), 1);
    assert_eq!(table.outer_len(), 1);
}

#[test]
fn get_mut_updates_in_place() {
    let mut table = Table::new();
    put(&mut table, "peak", "k2", 8000);
    *table.get_mut("peak", "k2").unwrap() += 611;
    assert_eq!(table.get("peak", "k2"), Ok(&8611));
    assert_eq!(table.get_mut("peak", "k3"), Err(TableError::KeyNotFound));
}

#[test]
fn contains_checks() {
    let mut table = Table::new();
    put(&mut table, "1", "x", 10);
    assert!(table.contains_key("1", "x"));
    assert!(!table.contains_key("1", "y"));
    assert!(table.contains_outer("1"));
    assert!(!table.contains_outer("2"));
}

#[test]
fn outer_key_vanishes_with_its_last_entry() {
    let mut table = Table::new();
    put(&mut table, "1", "x", 10);
    put(&mut table, "2", "y", 20);
    table.remove("1", "x").unwrap();
    assert!(!table.contains_outer("1"));
    assert_eq!(table.outer_len(), 1);
    let keys: Vec<_> = table.keys().cloned().collect();
    assert_eq!(keys, ["2"]);
}

#[test]
fn iteration_modes() {
    let mut table = Table::new();
    put(&mut table, "1", "x", 10);
    put(&mut table, "1", "y", 20);
    put(&mut table, "2", "z", 30);

    let mut outer: Vec<_> = table.keys().cloned().collect();
    outer.sort();
    assert_eq!(outer, ["1", "2"]);

    let mut inner: Vec<_> = table.inner_keys("1").unwrap().cloned().collect();
    inner.sort();
    assert_eq!(inner, ["x", "y"]);

    let mut values: Vec<_> = table.inner_values("1").unwrap().copied().collect();
    values.sort_unstable();
    assert_eq!(values, [10, 20]);

    let mut all: Vec<_> = table
        .iter()
        .map(|(k1, k2, v)| (k1.as_str(), k2.as_str(), *v))
        .collect();
    all.sort_unstable();
    assert_eq!(all, [("1", "x", 10), ("1", "y", 20), ("2", "z", 30)]);

    let mut every: Vec<_> = table.values().copied().collect();
    every.sort_unstable();
    assert_eq!(every, [10, 20, 30]);

    assert!(matches!(table.inner_keys("3"), Err(TableError::KeyNotFound)));
    assert!(matches!(table.inner_iter("3"), Err(TableError::KeyNotFound)));
}

/// Entries under one outer key come out together.
#[test]
fn iteration_groups_by_outer_key() {
    let mut table = Table::new();
    for outer in ["a", "b", "c"] {
        for inner in ["p", "q", "r", "s"] {
            put(&mut table, outer, inner, 0);
        }
    }
    let order: Vec<_> = table.iter().map(|(k1, _, _)| k1.clone()).collect();
    assert_eq!(order.len(), 12);
    let mut runs = order.clone();
    runs.dedup();
    assert_eq!(runs.len(), 3);
}

#[test]
fn outer_array_grows() {
    let mut table = Table::new();
    for i in 0..100 {
        for j in 0..3 {
            put(&mut table, &format!("outer{i}"), &format!("inner{j}"), i * 10 + j);
        }
    }
    assert_eq!(table.len(), 300);
    assert_eq!(table.outer_len(), 100);
    assert!(table.capacity() >= 200);
    for i in 0..100 {
        for j in 0..3 {
            assert_eq!(table.get(&format!("outer{i}"), &format!("inner{j}")), Ok(&(i * 10 + j)));
        }
    }
}

#[test]
fn inner_tables_grow_independently() {
    let mut table = Table::new();
    for j in 0..50 {
        put(&mut table, "big", &format!("k{j}"), j);
    }
    put(&mut table, "small", "only", -1);

    assert_eq!(table.outer_len(), 2);
    assert_eq!(table.capacity(), 5);
    assert_eq!(table.inner_iter("big").unwrap().count(), 50);
    assert_eq!(table.inner_iter("small").unwrap().count(), 1);
    for j in 0..50 {
        assert_eq!(table.get("big", &format!("k{j}")), Ok(&j));
    }
}

#[test]
fn separate_size_sequences() {
    let outer = Capacities::new(vec![3, 7]).unwrap();
    let inner = Capacities::new(vec![11]).unwrap();
    let mut table: Table = CompositeTable::with_capacities(outer, inner);
    assert_eq!(table.capacity(), 3);
    put(&mut table, "a", "x", 1);
    put(&mut table, "b", "x", 2);
    assert_eq!(table.capacity(), 7);
    for j in 0..9 {
        put(&mut table, "a", &format!("n{j}"), j);
    }
    assert_eq!(table.len(), 11);
    assert_eq!(table.inner_iter("a").unwrap().count(), 10);
}

#[test]
fn remove_everything_then_reuse() {
    let mut table = Table::new();
    let keys: Vec<(String, String)> = (0..40)
        .map(|i| (format!("d{}", i % 7), format!("m{i}")))
        .collect();
    for (i, (k1, k2)) in keys.iter().enumerate() {
        table.insert(k1.clone(), k2.clone(), i as i32).unwrap();
    }
    for (i, (k1, k2)) in keys.iter().enumerate() {
        assert_eq!(table.remove(k1.as_str(), k2.as_str()), Ok(i as i32));
    }
    assert!(table.is_empty());
    assert_eq!(table.outer_len(), 0);
    assert_eq!(table.keys().count(), 0);

    put(&mut table, "again", "x", 1);
    assert_eq!(table.get("again", "x"), Ok(&1));
}
