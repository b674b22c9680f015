//! Common test utilities for building response trees and editors.
use rulegraft::prelude::*;
use std::sync::Arc;

/// The behavior table used across tests.
#[allow(dead_code)]
pub fn create_registry() -> BehaviorTable {
    BehaviorTable::builder()
        .with_behavior("wait", 3)
        .with_behavior("say", 4)
        .with_behavior("if", 16)
        .with_behavior("repeat", 20)
        .with_behavior("act on", 21)
        .build()
        .expect("test registry has unique names")
}

#[allow(dead_code)]
pub fn create_editor() -> Editor {
    Editor::new(Arc::new(create_registry()))
}

/// Builds a plain sequence `names[0] -> names[1] -> ...`, all with behavior id 1.
#[allow(dead_code)]
pub fn sequence(names: &[&str]) -> Arc<Response> {
    names
        .iter()
        .rev()
        .fold(None, |next: Option<Arc<Response>>, name| {
            let mut node = Response::new(name, 1);
            node.next = next;
            Some(node.shared())
        })
        .expect("sequence needs at least one name")
}

/// Names along a top-level sequence.
#[allow(dead_code)]
pub fn names(head: Option<&Arc<Response>>) -> Vec<String> {
    std::iter::successors(head, |n| n.next())
        .map(|n| n.name.clone())
        .collect()
}

/// The node at `index` of a top-level sequence.
#[allow(dead_code)]
pub fn nth(head: &Arc<Response>, index: usize) -> Arc<Response> {
    std::iter::successors(Some(head), |n| n.next())
        .nth(index)
        .cloned()
        .expect("index within sequence")
}

/// Puts `replacement` at position `index` of a top-level sequence, the way a rule
/// inspector splices an edit result back into the document.
#[allow(dead_code)]
pub fn splice_at(
    head: &Arc<Response>,
    index: usize,
    replacement: Option<Arc<Response>>,
) -> Option<Arc<Response>> {
    let prefix: Vec<&Arc<Response>> = std::iter::successors(Some(head), |n| n.next())
        .take(index)
        .collect();
    prefix
        .iter()
        .rev()
        .fold(replacement, |next, node| Some(node.relinked(next).shared()))
}
