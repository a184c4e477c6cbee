//! Integration tests for node ids

use std::collections::HashSet;

use stepwise_foundation::{NodeId, NodeIdGen};

#[test]
fn ids_are_sequential_from_zero() {
    let mut ids = NodeIdGen::new();
    assert_eq!(ids.next_id(), NodeId(0));
    assert_eq!(ids.next_id(), NodeId(1));
    assert_eq!(ids.issued(), 2);
}

#[test]
fn ids_are_never_reused() {
    let mut ids = NodeIdGen::default();
    let issued: HashSet<NodeId> = (0..100).map(|_| ids.next_id()).collect();
    assert_eq!(issued.len(), 100);
}

#[test]
fn cloned_generators_diverge_independently() {
    let mut a = NodeIdGen::new();
    a.next_id();
    let mut b = a.clone();
    assert_eq!(a.next_id(), b.next_id());
    assert_eq!(a.issued(), 2);
}

#[test]
fn display_uses_hash_prefix() {
    assert_eq!(NodeId(12).to_string(), "#12");
}
