//! Skew heap: a self-adjusting mergeable min-heap.
//!
//! Nodes are immutable and shared through `Arc`, so every operation builds a
//! new root path and leaves the previous heap (and every recorded snapshot of
//! it) intact. Merging recurses down the right spine of the smaller root and
//! unconditionally swaps children on the way back up.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stepwise_foundation::{Error, ErrorContext, NodeId, NodeIdGen, Result};
use stepwise_trace::{Focus, Trace, TraceRecorder, Traced};

use crate::phase::HeapPhase;
use crate::progress::HeapProgress;

/// Trace of a skew heap operation.
pub type SkewTrace = Trace<HeapPhase, SkewView, HeapProgress>;

/// Result and trace of a skew heap operation.
pub type SkewRun<T> = Traced<T, HeapPhase, SkewView, HeapProgress>;

type SkewRecorder = TraceRecorder<HeapPhase, SkewView, HeapProgress>;

type Tree = Option<Arc<SkewNode>>;

// =============================================================================
// Nodes
// =============================================================================

/// An immutable skew heap node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkewNode {
    id: NodeId,
    value: i64,
    left: Tree,
    right: Tree,
}

impl SkewNode {
    fn leaf(id: NodeId, value: i64) -> Arc<Self> {
        Arc::new(Self {
            id,
            value,
            left: None,
            right: None,
        })
    }

    fn with_children(&self, left: Tree, right: Tree) -> Arc<Self> {
        Arc::new(Self {
            id: self.id,
            value: self.value,
            left,
            right,
        })
    }

    /// Returns the node's stable id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Returns the left child.
    #[must_use]
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Returns the right child.
    #[must_use]
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn is_heap_ordered(&self) -> bool {
        [self.left(), self.right()]
            .into_iter()
            .flatten()
            .all(|child| child.value >= self.value && child.is_heap_ordered())
    }

    fn collect(&self, values: &mut Vec<i64>, ids: &mut Vec<NodeId>) {
        values.push(self.value);
        ids.push(self.id);
        for child in [self.left(), self.right()].into_iter().flatten() {
            child.collect(values, ids);
        }
    }
}

impl fmt::Display for SkewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if self.left.is_none() && self.right.is_none() {
            return Ok(());
        }
        f.write_str("(")?;
        match self.left() {
            Some(left) => write!(f, "{left}")?,
            None => f.write_str("·")?,
        }
        f.write_str(", ")?;
        match self.right() {
            Some(right) => write!(f, "{right}")?,
            None => f.write_str("·")?,
        }
        f.write_str(")")
    }
}

/// Rebuilds `node` with fresh ids from `ids`, preserving shape and values.
fn reissue(node: &SkewNode, ids: &mut NodeIdGen) -> Arc<SkewNode> {
    let id = ids.next_id();
    let left = node.left().map(|n| reissue(n, ids));
    let right = node.right().map(|n| reissue(n, ids));
    Arc::new(SkewNode {
        id,
        value: node.value,
        left,
        right,
    })
}

// =============================================================================
// View
// =============================================================================

/// The trees in play at one snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkewView {
    trees: Vec<Arc<SkewNode>>,
}

impl SkewView {
    fn of(trees: &[&Tree]) -> Self {
        Self {
            trees: trees.iter().filter_map(|t| (*t).clone()).collect(),
        }
    }

    fn single(tree: &Arc<SkewNode>) -> Self {
        Self {
            trees: vec![Arc::clone(tree)],
        }
    }

    /// Returns the trees shown, in order.
    #[must_use]
    pub fn trees(&self) -> &[Arc<SkewNode>] {
        &self.trees
    }

    /// Returns true if no tree is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl fmt::Display for SkewView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.trees.is_empty() {
            return f.write_str("(empty)");
        }
        for (i, tree) in self.trees.iter().enumerate() {
            if i > 0 {
                f.write_str("  |  ")?;
            }
            write!(f, "{tree}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Merge
// =============================================================================

fn node_id(tree: &Tree) -> Option<NodeId> {
    tree.as_ref().map(|n| n.id)
}

/// Merges two trees, recording every comparison, merge, and swap.
fn merge(rec: &mut SkewRecorder, progress: &HeapProgress, a: Tree, b: Tree) -> Result<Tree> {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        (Some(only), None) | (None, Some(only)) => {
            rec.record(
                HeapPhase::Compare,
                &SkewView::single(&only),
                Focus::node(only.id),
                format!("Other side is empty; the tree at {} is the result", only.id),
                progress,
            )?;
            return Ok(Some(only));
        }
        (None, None) => {
            rec.record(
                HeapPhase::Compare,
                &SkewView::default(),
                Focus::none(),
                "Both sides are empty",
                progress,
            )?;
            return Ok(None);
        }
    };

    let (top, other) = if a.value <= b.value { (a, b) } else { (b, a) };
    rec.record(
        HeapPhase::Compare,
        &SkewView {
            trees: vec![Arc::clone(&top), Arc::clone(&other)],
        },
        Focus::node(top.id).with_node(Some(other.id)),
        format!(
            "{} <= {}: {} stays on top",
            top.value, other.value, top.id
        ),
        progress,
    )?;

    let merged_right = merge(rec, progress, Some(other), top.right.clone())?;
    let merged = top.with_children(top.left.clone(), merged_right);
    rec.record(
        HeapPhase::Merge,
        &SkewView::single(&merged),
        Focus::node(merged.id).with_node(node_id(&merged.right)),
        format!("Attach the merged subtree as the right child of {}", merged.id),
        progress,
    )?;

    let swapped = merged.with_children(merged.right.clone(), merged.left.clone());
    rec.record(
        HeapPhase::Swap,
        &SkewView::single(&swapped),
        Focus::node(swapped.id)
            .with_node(node_id(&swapped.left))
            .with_node(node_id(&swapped.right)),
        format!("Swap the children of {}", swapped.id),
        progress,
    )?;

    Ok(Some(swapped))
}

fn empty_failure<T>(operation: &'static str) -> Result<SkewRun<T>> {
    let error = Error::empty_heap().with_context(ErrorContext::new().with_operation(operation));
    let mut rec = SkewRecorder::new(operation);
    let trace = rec.fail(
        &SkewView::default(),
        Focus::none(),
        &error,
        &HeapProgress::default(),
    )?;
    tracing::debug!(operation, "rejected on empty heap");
    Ok(Traced::failed(error, trace))
}

// =============================================================================
// SkewHeap
// =============================================================================

/// A persistent skew min-heap of `i64` values.
///
/// Operations take `&self` and return the new heap inside a [`SkewRun`], so
/// the caller decides when the result becomes authoritative.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkewHeap {
    root: Tree,
    len: usize,
    ids: NodeIdGen,
}

impl SkewHeap {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a heap by inserting `values` in order.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn from_values(values: &[i64]) -> Result<Self> {
        values
            .iter()
            .try_fold(Self::new(), |heap, &value| heap.insert(value)?.outcome)
    }

    /// Returns the number of values.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap holds no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the minimum without recording anything.
    #[must_use]
    pub fn peek(&self) -> Option<i64> {
        self.root.as_ref().map(|n| n.value)
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> Option<&SkewNode> {
        self.root.as_deref()
    }

    /// Returns the values in preorder.
    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.walk().0
    }

    /// Returns the node ids in preorder.
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.walk().1
    }

    /// Returns true if every parent is at most each of its children.
    #[must_use]
    pub fn is_heap_ordered(&self) -> bool {
        self.root().is_none_or(SkewNode::is_heap_ordered)
    }

    /// Returns a view of the whole heap.
    #[must_use]
    pub fn view(&self) -> SkewView {
        SkewView::of(&[&self.root])
    }

    fn walk(&self) -> (Vec<i64>, Vec<NodeId>) {
        let mut values = Vec::with_capacity(self.len);
        let mut ids = Vec::with_capacity(self.len);
        if let Some(root) = self.root() {
            root.collect(&mut values, &mut ids);
        }
        (values, ids)
    }

    fn progress(&self) -> HeapProgress {
        HeapProgress::new(self.len, self.peek())
    }

    /// Inserts `value` by merging a singleton into the heap.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn insert(&self, value: i64) -> Result<SkewRun<Self>> {
        let _span = tracing::debug_span!("skew.insert", value).entered();

        let mut ids = self.ids.clone();
        let leaf = Some(SkewNode::leaf(ids.next_id(), value));
        let progress = HeapProgress::new(
            self.len + 1,
            Some(self.peek().map_or(value, |m| m.min(value))),
        );

        let mut rec = SkewRecorder::new("skew.insert");
        rec.record(
            HeapPhase::Insert,
            &SkewView::of(&[&self.root, &leaf]),
            Focus::none().with_node(node_id(&leaf)),
            format!("Create a singleton for {value} and merge it into the heap"),
            &progress,
        )?;

        let root = merge(&mut rec, &progress, self.root.clone(), leaf)?;
        let heap = Self {
            root,
            len: self.len + 1,
            ids,
        };
        rec.record(
            HeapPhase::Complete,
            &heap.view(),
            Focus::none().with_node(node_id(&heap.root)),
            format!("Inserted {value}; the heap holds {} values", heap.len),
            &heap.progress(),
        )?;

        let trace = rec.finish()?;
        tracing::debug!(steps = trace.len(), "skew insert traced");
        Ok(Traced::ok(heap, trace))
    }

    /// Removes the minimum by merging the root's two subtrees.
    ///
    /// An empty heap yields a one-step `Error` trace with an `EmptyHeap`
    /// outcome.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn extract_min(&self) -> Result<SkewRun<(i64, Self)>> {
        let _span = tracing::debug_span!("skew.extract_min", len = self.len).entered();
        let Some(root) = self.root.clone() else {
            return empty_failure("skew.extract-min");
        };

        let remaining = self.len - 1;
        let progress = HeapProgress::new(remaining, None).with_answer(root.value);
        let mut rec = SkewRecorder::new("skew.extract-min");
        rec.record(
            HeapPhase::Extract,
            &SkewView::single(&root),
            Focus::node(root.id),
            format!(
                "Remove the root {} ({}) and merge its two subtrees",
                root.value, root.id
            ),
            &progress,
        )?;

        let new_root = merge(&mut rec, &progress, root.left.clone(), root.right.clone())?;
        let heap = Self {
            root: new_root,
            len: remaining,
            ids: self.ids.clone(),
        };
        rec.record(
            HeapPhase::Complete,
            &heap.view(),
            Focus::none().with_node(node_id(&heap.root)),
            format!("Extracted {}; {} values remain", root.value, heap.len),
            &heap.progress().with_answer(root.value),
        )?;

        let trace = rec.finish()?;
        tracing::debug!(min = root.value, steps = trace.len(), "skew extract traced");
        Ok(Traced::ok((root.value, heap), trace))
    }

    /// Reports the minimum, which always sits at the root.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn find_min(&self) -> Result<SkewRun<i64>> {
        let Some(root) = self.root.as_ref() else {
            return empty_failure("skew.find-min");
        };

        let progress = self.progress().with_answer(root.value);
        let mut rec = SkewRecorder::new("skew.find-min");
        rec.record(
            HeapPhase::Found,
            &self.view(),
            Focus::node(root.id),
            format!("The minimum {} is at the root {}", root.value, root.id),
            &progress,
        )?;
        rec.record(
            HeapPhase::Complete,
            &self.view(),
            Focus::node(root.id),
            "find-min leaves the heap unchanged",
            &progress,
        )?;

        Ok(Traced::ok(root.value, rec.finish()?))
    }

    /// Merges `other` into this heap.
    ///
    /// The nodes of `other` receive fresh ids so ids stay unique in the
    /// result.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn meld(&self, other: &Self) -> Result<SkewRun<Self>> {
        let _span = tracing::debug_span!("skew.meld", left = self.len, right = other.len).entered();

        let mut ids = self.ids.clone();
        let incoming = other.root().map(|n| reissue(n, &mut ids));
        let len = self.len + other.len;
        let min = match (self.peek(), other.peek()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        let progress = HeapProgress::new(len, min);

        let mut rec = SkewRecorder::new("skew.meld");
        rec.record(
            HeapPhase::Merge,
            &SkewView::of(&[&self.root, &incoming]),
            Focus::none()
                .with_node(node_id(&self.root))
                .with_node(node_id(&incoming)),
            format!(
                "Meld a heap of {} values into a heap of {} values",
                other.len, self.len
            ),
            &progress,
        )?;

        let root = merge(&mut rec, &progress, self.root.clone(), incoming)?;
        let heap = Self { root, len, ids };
        rec.record(
            HeapPhase::Complete,
            &heap.view(),
            Focus::none().with_node(node_id(&heap.root)),
            format!("Melded heap holds {} values", heap.len),
            &heap.progress(),
        )?;

        let trace = rec.finish()?;
        tracing::debug!(steps = trace.len(), "skew meld traced");
        Ok(Traced::ok(heap, trace))
    }

    /// Empties the heap in a single step.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn clear(&self) -> Result<SkewRun<Self>> {
        let heap = Self {
            ids: self.ids.clone(),
            ..Self::default()
        };
        let mut rec = SkewRecorder::new("skew.clear");
        rec.record(
            HeapPhase::Complete,
            &heap.view(),
            Focus::none(),
            format!("Removed all {} values", self.len),
            &heap.progress(),
        )?;
        Ok(Traced::ok(heap, rec.finish()?))
    }
}

impl fmt::Display for SkewHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => write!(f, "{root}"),
            None => f.write_str("(empty)"),
        }
    }
}
