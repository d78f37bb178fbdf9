use crate::{CompositeTable, FlatTable, RadixTable};

#[test]
fn defaults_are_empty() {
    let flat: FlatTable<String, i32> = FlatTable::default();
    let composite: CompositeTable<String, String, i32> = CompositeTable::default();
    let radix: RadixTable<i32> = RadixTable::default();
    assert!(flat.is_empty());
    assert!(composite.is_empty());
    assert!(radix.is_empty());
}

#[test]
fn debug_format() {
    let mut flat = FlatTable::new();
    flat.insert("k", 1).unwrap();
    let dbg = format!("{flat:?}");
    assert!(dbg.contains("FlatTable"));
    assert!(dbg.contains("len: 1"));
    assert!(dbg.contains("capacity: 5"));

    let composite: CompositeTable<String, String, i32> = CompositeTable::new();
    let dbg = format!("{composite:?}");
    assert!(dbg.contains("CompositeTable"));
    assert!(dbg.contains("outer_len: 0"));

    let radix: RadixTable<i32> = RadixTable::new();
    let dbg = format!("{radix:?}");
    assert!(dbg.contains("RadixTable"));
    assert!(dbg.contains("depth: 0"));
}

#[test]
fn index_existing() {
    let mut flat = FlatTable::new();
    flat.insert(String::from("key"), 42).unwrap();
    assert_eq!(flat["key"], 42);

    let mut radix = RadixTable::new();
    radix.insert("key", 7).unwrap();
    assert_eq!(radix["key"], 7);
}

#[test]
#[should_panic(expected = "key not found")]
fn flat_index_missing_panics() {
    let flat: FlatTable<String, i32> = FlatTable::new();
    let _ = flat["nope"];
}

#[test]
#[should_panic(expected = "key not found")]
fn radix_index_missing_panics() {
    let radix: RadixTable<i32> = RadixTable::new();
    let _ = radix["nope"];
}

#[test]
fn borrowed_iteration() {
    let mut flat = FlatTable::new();
    flat.insert("a", 1).unwrap();
    flat.insert("b", 2).unwrap();
    let mut total = 0;
    for (_, v) in &flat {
        total += v;
    }
    assert_eq!(total, 3);
    let mut keys: Vec<_> = flat.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(flat.values().sum::<i32>(), 3);

    let mut composite = CompositeTable::new();
    composite.insert("o", "a", 1).unwrap();
    composite.insert("o", "b", 2).unwrap();
    let mut count = 0;
    for (k1, _, _) in &composite {
        assert_eq!(*k1, "o");
        count += 1;
    }
    assert_eq!(count, 2);

    let mut radix = RadixTable::new();
    radix.insert("b", 2).unwrap();
    radix.insert("a", 1).unwrap();
    let keys: Vec<&str> = (&radix).into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["a", "b"]);
}

#[test]
fn display_dumps_tree() {
    let mut radix = RadixTable::new();
    radix.insert("hi", 1).unwrap();
    radix.insert("ho", 2).unwrap();
    let dump = radix.to_string();
    assert!(dump.starts_with("[0] h* (2)\n"));
    assert!(dump.contains("    [1] hi = 1\n"));
    assert!(dump.contains("    [7] ho = 2\n"));
}
