//! Binomial queue: a forest of heap-ordered binomial trees, at most one per
//! rank.
//!
//! Every mutating operation is a binary addition of two forests
//! (`merge_forests`): insertion adds a one-tree forest, extraction adds the
//! removed root's children back, and meld adds another queue. Trees are
//! immutable and shared through `Arc`.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stepwise_foundation::{Error, ErrorContext, NodeId, NodeIdGen, Result};
use stepwise_trace::{Focus, Mark, Trace, TraceRecorder, Traced};

use crate::phase::HeapPhase;
use crate::progress::HeapProgress;

/// Trace of a binomial queue operation.
pub type BinomialTrace = Trace<HeapPhase, BinomialView, HeapProgress>;

/// Result and trace of a binomial queue operation.
pub type BinomialRun<T> = Traced<T, HeapPhase, BinomialView, HeapProgress>;

type BinomialRecorder = TraceRecorder<HeapPhase, BinomialView, HeapProgress>;

/// Forest slot per rank; slot `r` holds a tree of rank `r` or nothing.
type Forest = Vec<Option<Arc<BinomialNode>>>;

// =============================================================================
// Trees
// =============================================================================

/// Root or inner node of a binomial tree.
///
/// A node of rank `r` has exactly `r` children, and child `k` has rank `k`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinomialNode {
    id: NodeId,
    value: i64,
    children: Vec<Arc<BinomialNode>>,
}

impl BinomialNode {
    fn leaf(id: NodeId, value: i64) -> Arc<Self> {
        Arc::new(Self {
            id,
            value,
            children: Vec::new(),
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

    /// Returns the rank, which equals the number of children.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.children.len()
    }

    /// Returns the children in ascending rank order.
    #[must_use]
    pub fn children(&self) -> &[Arc<Self>] {
        &self.children
    }

    /// Returns the number of values in this tree.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|c| c.size()).sum::<usize>()
    }

    fn is_well_formed(&self) -> bool {
        self.children
            .iter()
            .enumerate()
            .all(|(k, c)| c.rank() == k && c.value >= self.value && c.is_well_formed())
    }

    fn collect_ids(&self, ids: &mut Vec<NodeId>) {
        ids.push(self.id);
        for child in &self.children {
            child.collect_ids(ids);
        }
    }
}

impl fmt::Display for BinomialNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if self.children.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}

/// Makes the larger root the newest child of the smaller one.
///
/// Equal roots keep `a` on top.
fn link(a: Arc<BinomialNode>, b: Arc<BinomialNode>) -> (Arc<BinomialNode>, NodeId) {
    let (top, child) = if a.value <= b.value { (a, b) } else { (b, a) };
    let child_id = child.id;
    let mut children = top.children.clone();
    children.push(child);
    let linked = Arc::new(BinomialNode {
        id: top.id,
        value: top.value,
        children,
    });
    (linked, child_id)
}

fn reissue(node: &BinomialNode, ids: &mut NodeIdGen) -> Arc<BinomialNode> {
    let id = ids.next_id();
    let children = node.children.iter().map(|c| reissue(c, ids)).collect();
    Arc::new(BinomialNode {
        id,
        value: node.value,
        children,
    })
}

fn trim(forest: &mut Forest) {
    while matches!(forest.last(), Some(None)) {
        forest.pop();
    }
}

fn forest_size(forest: &[Option<Arc<BinomialNode>>]) -> usize {
    forest.iter().flatten().map(|t| t.size()).sum()
}

fn forest_min(forest: &[Option<Arc<BinomialNode>>]) -> Option<(usize, &Arc<BinomialNode>)> {
    forest
        .iter()
        .enumerate()
        .filter_map(|(rank, slot)| slot.as_ref().map(|t| (rank, t)))
        .min_by_key(|(rank, t)| (t.value, *rank))
}

// =============================================================================
// View
// =============================================================================

/// The forest under construction plus the trees waiting to be placed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinomialView {
    forest: Forest,
    pending: Vec<Arc<BinomialNode>>,
}

impl BinomialView {
    fn new(forest: &[Option<Arc<BinomialNode>>], pending: &[&Arc<BinomialNode>]) -> Self {
        Self {
            forest: forest.to_vec(),
            pending: pending.iter().map(|t| Arc::clone(t)).collect(),
        }
    }

    /// Returns the forest slots, indexed by rank.
    #[must_use]
    pub fn forest(&self) -> &[Option<Arc<BinomialNode>>] {
        &self.forest
    }

    /// Returns trees that are in play but not yet placed.
    #[must_use]
    pub fn pending(&self) -> &[Arc<BinomialNode>] {
        &self.pending
    }
}

fn write_forest(f: &mut fmt::Formatter<'_>, forest: &[Option<Arc<BinomialNode>>]) -> fmt::Result {
    let mut first = true;
    for (rank, slot) in forest.iter().enumerate() {
        if let Some(tree) = slot {
            if !first {
                f.write_str("  ")?;
            }
            write!(f, "B{rank}: {tree}")?;
            first = false;
        }
    }
    if first {
        f.write_str("(empty)")?;
    }
    Ok(())
}

impl fmt::Display for BinomialView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_forest(f, &self.forest)?;
        if !self.pending.is_empty() {
            f.write_str("\npending: ")?;
            for (i, tree) in self.pending.iter().enumerate() {
                if i > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "B{}: {tree}", tree.rank())?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Binary addition
// =============================================================================

/// Adds forest `b` to forest `a` rank by rank, like binary addition.
///
/// At each rank up to three trees meet: `a[r]`, `b[r]`, and the carry from
/// rank `r - 1`. One tree is placed; two are linked into a carry; with three,
/// the carry is placed and the other two are linked into the next carry.
fn merge_forests(
    rec: &mut BinomialRecorder,
    progress: &HeapProgress,
    a: &[Option<Arc<BinomialNode>>],
    b: &[Option<Arc<BinomialNode>>],
) -> Result<Forest> {
    let a_empty = a.iter().all(Option::is_none);
    let b_empty = b.iter().all(Option::is_none);
    if a_empty || b_empty {
        let mut out: Forest = if a_empty { b.to_vec() } else { a.to_vec() };
        trim(&mut out);
        rec.record(
            HeapPhase::Assemble,
            &BinomialView::new(&out, &[]),
            Focus::none(),
            "One forest is empty; the other is the result",
            progress,
        )?;
        return Ok(out);
    }

    let width = a.len().max(b.len());
    let mut out: Forest = Vec::with_capacity(width + 1);
    let mut carry: Option<Arc<BinomialNode>> = None;
    let mut rank = 0;

    while rank < width || carry.is_some() {
        let here = a.get(rank).cloned().flatten();
        let there = b.get(rank).cloned().flatten();
        // With three trees the carry stays at this rank.
        let (placed, pair) = match (here, there, carry.take()) {
            (Some(x), Some(y), Some(c)) => (Some(c), Some((x, y))),
            (Some(x), Some(y), None) | (Some(x), None, Some(y)) | (None, Some(x), Some(y)) => {
                (None, Some((x, y)))
            }
            (single, None, None) | (None, single, None) | (None, None, single) => (single, None),
        };
        out.push(placed);
        let Some((first, second)) = pair else {
            rank += 1;
            continue;
        };
        let (linked, child) = link(first, second);
        rec.record(
            HeapPhase::Link,
            &BinomialView::new(&out, &[&linked]),
            Focus::node(linked.id).with_node(Some(child)).with(Mark::Rank(rank)),
            format!(
                "Link two B{rank} trees: {} becomes the root, {child} its child",
                linked.id
            ),
            progress,
        )?;
        rec.record(
            HeapPhase::Carry,
            &BinomialView::new(&out, &[&linked]),
            Focus::node(linked.id).with(Mark::Rank(rank + 1)),
            format!("Carry the new B{} to rank {}", rank + 1, rank + 1),
            progress,
        )?;
        carry = Some(linked);
        rank += 1;
    }

    trim(&mut out);
    rec.record(
        HeapPhase::Assemble,
        &BinomialView::new(&out, &[]),
        Focus::none(),
        format!("Merged forest has {} trees", out.iter().flatten().count()),
        progress,
    )?;
    Ok(out)
}

fn empty_failure<T>(operation: &'static str) -> Result<BinomialRun<T>> {
    let error = Error::empty_queue().with_context(ErrorContext::new().with_operation(operation));
    let mut rec = BinomialRecorder::new(operation);
    let trace = rec.fail(
        &BinomialView::default(),
        Focus::none(),
        &error,
        &HeapProgress::default(),
    )?;
    tracing::debug!(operation, "rejected on empty queue");
    Ok(Traced::failed(error, trace))
}

// =============================================================================
// BinomialQueue
// =============================================================================

/// A persistent binomial min-queue of `i64` values.
///
/// Like [`SkewHeap`](crate::SkewHeap), operations take `&self` and return the
/// new queue inside a [`BinomialRun`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinomialQueue {
    forest: Forest,
    len: usize,
    ids: NodeIdGen,
}

impl BinomialQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a queue by inserting `values` in order.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn from_values(values: &[i64]) -> Result<Self> {
        values
            .iter()
            .try_fold(Self::new(), |queue, &value| queue.insert(value)?.outcome)
    }

    /// Returns the number of values.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the queue holds no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the forest slots, indexed by rank.
    #[must_use]
    pub fn forest(&self) -> &[Option<Arc<BinomialNode>>] {
        &self.forest
    }

    /// Returns the ranks that hold a tree, ascending.
    #[must_use]
    pub fn ranks(&self) -> Vec<usize> {
        self.forest
            .iter()
            .enumerate()
            .filter_map(|(rank, slot)| slot.as_ref().map(|_| rank))
            .collect()
    }

    /// Returns the minimum without recording anything.
    #[must_use]
    pub fn peek(&self) -> Option<i64> {
        forest_min(&self.forest).map(|(_, t)| t.value)
    }

    /// Returns every node id, tree by tree in preorder.
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.len);
        for tree in self.forest.iter().flatten() {
            tree.collect_ids(&mut ids);
        }
        ids
    }

    /// Returns true if every slot holds a heap-ordered binomial tree of its
    /// rank and the sizes add up to [`len`](Self::len).
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.forest.iter().enumerate().all(|(rank, slot)| {
            slot.as_ref()
                .is_none_or(|t| t.rank() == rank && t.is_well_formed())
        }) && forest_size(&self.forest) == self.len
            && !matches!(self.forest.last(), Some(None))
    }

    /// Returns a view of the whole queue.
    #[must_use]
    pub fn view(&self) -> BinomialView {
        BinomialView::new(&self.forest, &[])
    }

    fn progress(&self) -> HeapProgress {
        HeapProgress::new(self.len, self.peek())
    }

    /// Inserts `value` by adding a single-node forest.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn insert(&self, value: i64) -> Result<BinomialRun<Self>> {
        let _span = tracing::debug_span!("binomial.insert", value).entered();

        let mut ids = self.ids.clone();
        let leaf = BinomialNode::leaf(ids.next_id(), value);
        let progress = HeapProgress::new(
            self.len + 1,
            Some(self.peek().map_or(value, |m| m.min(value))),
        );

        let mut rec = BinomialRecorder::new("binomial.insert");
        rec.record(
            HeapPhase::Insert,
            &BinomialView::new(&self.forest, &[&leaf]),
            Focus::node(leaf.id),
            format!("Create a B0 for {value} and add it to the forest"),
            &progress,
        )?;

        let forest = merge_forests(&mut rec, &progress, &self.forest, &[Some(leaf)])?;
        let queue = Self {
            forest,
            len: self.len + 1,
            ids,
        };
        rec.record(
            HeapPhase::Complete,
            &queue.view(),
            Focus::none(),
            format!("Inserted {value}; the queue holds {} values", queue.len),
            &queue.progress(),
        )?;

        let trace = rec.finish()?;
        tracing::debug!(steps = trace.len(), "binomial insert traced");
        Ok(Traced::ok(queue, trace))
    }

    /// Removes the minimum root and adds its children back as a forest.
    ///
    /// Equal minima resolve to the lowest rank. An empty queue yields a
    /// one-step `Error` trace with an `EmptyQueue` outcome.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn extract_min(&self) -> Result<BinomialRun<(i64, Self)>> {
        let _span = tracing::debug_span!("binomial.extract_min", len = self.len).entered();
        let Some((rank, tree)) = forest_min(&self.forest) else {
            return empty_failure("binomial.extract-min");
        };
        let tree = Arc::clone(tree);

        let remaining = self.len - 1;
        let progress = HeapProgress::new(remaining, None).with_answer(tree.value);
        let mut rec = BinomialRecorder::new("binomial.extract-min");

        let mut rest = self.forest.clone();
        rest[rank] = None;
        trim(&mut rest);
        let children: Forest = tree.children.iter().cloned().map(Some).collect();

        rec.record(
            HeapPhase::Extract,
            &BinomialView::new(&rest, &tree.children.iter().collect::<Vec<_>>()),
            Focus::node(tree.id).with(Mark::Rank(rank)),
            format!(
                "Remove the minimum root {} from B{rank}; its {} children form a new forest",
                tree.value,
                tree.children.len()
            ),
            &progress,
        )?;

        let forest = merge_forests(&mut rec, &progress, &rest, &children)?;
        let queue = Self {
            forest,
            len: remaining,
            ids: self.ids.clone(),
        };
        rec.record(
            HeapPhase::Complete,
            &queue.view(),
            Focus::none(),
            format!("Extracted {}; {} values remain", tree.value, queue.len),
            &queue.progress().with_answer(tree.value),
        )?;

        let trace = rec.finish()?;
        tracing::debug!(min = tree.value, steps = trace.len(), "binomial extract traced");
        Ok(Traced::ok((tree.value, queue), trace))
    }

    /// Scans the roots for the minimum.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn find_min(&self) -> Result<BinomialRun<i64>> {
        let Some((min_rank, min_tree)) = forest_min(&self.forest) else {
            return empty_failure("binomial.find-min");
        };

        let mut rec = BinomialRecorder::new("binomial.find-min");
        let view = self.view();
        let mut best: Option<&Arc<BinomialNode>> = None;
        for (rank, slot) in self.forest.iter().enumerate() {
            let Some(tree) = slot else { continue };
            let narrative = match best {
                None => format!("B{rank} root {} is the first candidate", tree.value),
                Some(b) if tree.value < b.value => {
                    format!("B{rank} root {} < {}: new minimum", tree.value, b.value)
                }
                Some(b) => format!("B{rank} root {} >= {}: keep {}", tree.value, b.value, b.value),
            };
            if best.is_none_or(|b| tree.value < b.value) {
                best = Some(tree);
            }
            let progress = self.progress();
            rec.record(
                HeapPhase::Compare,
                &view,
                Focus::node(tree.id).with(Mark::Rank(rank)),
                narrative,
                &progress,
            )?;
        }

        let progress = self.progress().with_answer(min_tree.value);
        rec.record(
            HeapPhase::Found,
            &view,
            Focus::node(min_tree.id).with(Mark::Rank(min_rank)),
            format!("The minimum {} is the root of B{min_rank}", min_tree.value),
            &progress,
        )?;
        rec.record(
            HeapPhase::Complete,
            &view,
            Focus::node(min_tree.id),
            "find-min leaves the queue unchanged",
            &progress,
        )?;

        Ok(Traced::ok(min_tree.value, rec.finish()?))
    }

    /// Adds every tree of `other` to this queue.
    ///
    /// The nodes of `other` receive fresh ids so ids stay unique in the
    /// result.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn meld(&self, other: &Self) -> Result<BinomialRun<Self>> {
        let _span =
            tracing::debug_span!("binomial.meld", left = self.len, right = other.len).entered();

        let mut ids = self.ids.clone();
        let incoming: Forest = other
            .forest
            .iter()
            .map(|slot| slot.as_ref().map(|t| reissue(t, &mut ids)))
            .collect();
        let len = self.len + other.len;
        let min = match (self.peek(), other.peek()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        let progress = HeapProgress::new(len, min);

        let mut rec = BinomialRecorder::new("binomial.meld");
        rec.record(
            HeapPhase::Merge,
            &BinomialView::new(&self.forest, &incoming.iter().flatten().collect::<Vec<_>>()),
            Focus::none(),
            format!(
                "Meld a queue of {} values into a queue of {} values",
                other.len, self.len
            ),
            &progress,
        )?;

        let forest = merge_forests(&mut rec, &progress, &self.forest, &incoming)?;
        let queue = Self { forest, len, ids };
        rec.record(
            HeapPhase::Complete,
            &queue.view(),
            Focus::none(),
            format!("Melded queue holds {} values", queue.len),
            &queue.progress(),
        )?;

        let trace = rec.finish()?;
        tracing::debug!(steps = trace.len(), "binomial meld traced");
        Ok(Traced::ok(queue, trace))
    }

    /// Empties the queue in a single step.
    ///
    /// # Errors
    ///
    /// Only fails on internal recorder misuse.
    pub fn clear(&self) -> Result<BinomialRun<Self>> {
        let queue = Self {
            ids: self.ids.clone(),
            ..Self::default()
        };
        let mut rec = BinomialRecorder::new("binomial.clear");
        rec.record(
            HeapPhase::Complete,
            &queue.view(),
            Focus::none(),
            format!("Removed all {} values", self.len),
            &queue.progress(),
        )?;
        Ok(Traced::ok(queue, rec.finish()?))
    }
}

impl fmt::Display for BinomialQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_forest(f, &self.forest)
    }
}
