use crate::config::DEFAULT_TABLE_SIZES;
use crate::{Capacities, PolynomialHasher, SlotHasher, TableError};

#[test]
fn default_sequence() {
    let caps = Capacities::default();
    assert_eq!(caps.as_slice(), DEFAULT_TABLE_SIZES.as_slice());
    assert_eq!(caps.get(0), 5);
    assert_eq!(caps.last_index(), DEFAULT_TABLE_SIZES.len() - 1);
    assert!(!caps.is_empty());
}

#[test]
fn rejects_empty() {
    assert!(matches!(
        Capacities::new(Vec::new()),
        Err(TableError::InvalidCapacities(_))
    ));
}

#[test]
fn rejects_tiny_sizes() {
    assert!(matches!(
        Capacities::new(vec![1, 5]),
        Err(TableError::InvalidCapacities(_))
    ));
}

#[test]
fn rejects_non_ascending() {
    assert!(matches!(
        Capacities::new(vec![5, 13, 13]),
        Err(TableError::InvalidCapacities(_))
    ));
    assert!(matches!(
        Capacities::new(vec![13, 5]),
        Err(TableError::InvalidCapacities(_))
    ));
}

#[test]
fn clones_compare_equal() {
    let caps = Capacities::new(vec![3, 7, 11]).unwrap();
    let copy = caps.clone();
    assert_eq!(caps, copy);
    assert_eq!(copy.len(), 3);
    assert_eq!(format!("{copy:?}"), "[3, 7, 11]");
}

#[test]
fn error_messages() {
    assert_eq!(TableError::KeyNotFound.to_string(), "key not found");
    assert_eq!(
        TableError::TableFull { capacity: 5 }.to_string(),
        "table full: no free slot among 5 slots"
    );
    let err = Capacities::new(Vec::new()).unwrap_err();
    assert_eq!(err.to_string(), "invalid capacity sequence: sequence is empty");
}

#[test]
fn polynomial_hash_known_values() {
    let hasher = PolynomialHasher::default();
    assert_eq!(hasher.slot("", 5), 0);
    // 'a' = 97
    assert_eq!(hasher.slot("a", 5), 2);
    // 97 % 13 = 6, multiplier becomes 31415 * 31 % 12 = 5, (98 + 5 * 6) % 13 = 11
    assert_eq!(hasher.slot("ab", 13), 11);
}

#[test]
fn polynomial_hash_reduces_large_seed() {
    // u64::MAX % 12 = 3, then 3 * 5 % 12 = 3, (98 + 3 * 6) % 13 = 12
    let large = PolynomialHasher::new(5, u64::MAX);
    assert_eq!(large.slot("ab", 13), 12);
    assert_eq!(large.slot("ab", 13), PolynomialHasher::new(5, 3).slot("ab", 13));
    assert_eq!(
        PolynomialHasher::new(u64::MAX, 7).slot("summit", 97),
        PolynomialHasher::new(u64::MAX % 96, 7).slot("summit", 97)
    );
}

#[test]
fn polynomial_hash_stays_in_range() {
    let hasher = PolynomialHasher::default();
    for capacity in DEFAULT_TABLE_SIZES {
        for i in 0..200 {
            let key = format!("trail-{i}");
            assert!(hasher.slot(key.as_str(), capacity) < capacity);
        }
    }
}

#[test]
fn polynomial_hash_owned_and_borrowed_agree() {
    let hasher = PolynomialHasher::new(37, 101);
    let owned = String::from("summit");
    assert_eq!(hasher.slot(&owned, 97), hasher.slot("summit", 97));
}
