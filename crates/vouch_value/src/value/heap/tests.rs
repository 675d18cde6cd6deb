use super::*;

#[test]
fn deref_reaches_payload() {
    let h = Heap::new(String::from("duck"));
    assert_eq!(h.len(), 4);
}

#[test]
fn clone_shares_allocation() {
    let h1 = Heap::new(vec![1, 2, 3]);
    let h2 = h1.clone();
    assert!(Heap::ptr_eq(&h1, &h2));
}

#[test]
fn equal_payloads_are_equal_but_distinct() {
    let h1 = Heap::new(vec![1, 2]);
    let h2 = Heap::new(vec![1, 2]);
    assert_eq!(h1, h2);
    assert!(!Heap::ptr_eq(&h1, &h2));
    assert_ne!(h1, Heap::new(vec![2, 1]));
}
