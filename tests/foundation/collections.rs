//! Integration tests for persistent collections

use fixgram_foundation::LtVec;

#[test]
fn push_back_is_persistent() {
    let a: LtVec<i32> = LtVec::new();
    let b = a.push_back(1);
    let c = b.push_back(2);

    assert!(a.is_empty());
    assert_eq!(b.len(), 1);
    assert_eq!(c.len(), 2);
    assert_eq!(c.last(), Some(&2));
}

#[test]
fn push_front_and_concat() {
    let a = LtVec::from(vec![2, 3]).push_front(1);
    let b = LtVec::from(vec![4]);
    let joined = a.concat(&b);

    assert_eq!(joined.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(a.len(), 3);
    assert_eq!(joined.first(), Some(&1));
}

#[test]
fn equality_is_structural() {
    let a: LtVec<i32> = (1..=3).collect();
    let b = LtVec::from(vec![1, 2, 3]);
    assert_eq!(a, b);
    assert_ne!(a, b.push_back(4));
}

#[test]
fn iterate_by_reference_and_value() {
    let v = LtVec::from(vec![String::from("a"), String::from("b")]);
    let borrowed: Vec<&String> = (&v).into_iter().collect();
    assert_eq!(borrowed.len(), 2);

    let owned: Vec<String> = v.into_iter().collect();
    assert_eq!(owned, vec!["a".to_string(), "b".to_string()]);
}
