use num::Float;

use crate::monoids::{Identity, Magma, Monoid, NumAdditiveMonoids, NumMaxMonoids, NumMinMonoids};

#[derive(Clone, Debug)]
struct Children<T: Float> {
    left: AggregateNode<T>,
    right: AggregateNode<T>,
}

/// A node covering the inclusive index range `[start, end]` together with the
/// sum, minimum and maximum of the backing array over that range. Either a
/// leaf or a parent of exactly two owned children; a one-child node is not
/// representable.
#[derive(Clone, Debug)]
pub struct AggregateNode<T: Float> {
    start: usize,
    end: usize,
    sum: T,
    min: T,
    max: T,
    children: Option<Box<Children<T>>>,
}

impl<T: Float> AggregateNode<T> {
    fn leaf(index: usize, value: T) -> Self {
        Self {
            start: index,
            end: index,
            sum: value,
            min: value,
            max: value,
            children: None,
        }
    }

    fn parent(left: Self, right: Self) -> Self {
        Self {
            start: left.start,
            end: right.end,
            sum: NumAdditiveMonoids::new().combine(left.sum, right.sum),
            min: NumMinMonoids::new().combine(left.min, right.min),
            max: NumMaxMonoids::new().combine(left.max, right.max),
            children: Some(Box::new(Children { left, right })),
        }
    }

    /// O(n)
    fn build(values: &[T], lo: usize, hi: usize) -> Self {
        if lo == hi {
            return Self::leaf(lo, values[lo]);
        }

        // Floor bisection: the left half owns the extra element of an
        // odd-length range.
        let mid = lo + (hi - lo) / 2;
        let left = Self::build(values, lo, mid);
        let right = Self::build(values, mid + 1, hi);
        Self::parent(left, right)
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn sum(&self) -> T {
        self.sum
    }

    #[inline]
    pub fn min(&self) -> T {
        self.min
    }

    #[inline]
    pub fn max(&self) -> T {
        self.max
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Both children of a parent node, `None` for a leaf.
    pub fn children(&self) -> Option<(&Self, &Self)> {
        self.children.as_deref().map(|c| (&c.left, &c.right))
    }

    /// O(log n)
    fn query<M, R>(&self, qlo: usize, qhi: usize, monoid: &M, read: &R) -> T
    where
        M: Monoid<Elem = T>,
        R: Fn(&Self) -> T,
    {
        if qhi < self.start || self.end < qlo {
            return monoid.id();
        }
        if qlo <= self.start && self.end <= qhi {
            return read(self);
        }
        match self.children.as_deref() {
            Some(c) => monoid.combine(
                c.left.query(qlo, qhi, monoid, read),
                c.right.query(qlo, qhi, monoid, read),
            ),
            // A leaf overlapping the query is always fully contained.
            None => read(self),
        }
    }

    /// O(log n)
    fn assign(&mut self, index: usize, value: T) {
        if self.start == self.end {
            debug_assert_eq!(self.start, index);
            self.sum = value;
            self.min = value;
            self.max = value;
            return;
        }

        // Same bisection as `build`, so the descent reaches the same leaf.
        let mid = self.start + (self.end - self.start) / 2;
        if let Some(c) = self.children.as_deref_mut() {
            if index <= mid {
                c.left.assign(index, value);
            } else {
                c.right.assign(index, value);
            }
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        if let Some(c) = self.children.as_deref() {
            self.sum = NumAdditiveMonoids::new().combine(c.left.sum, c.right.sum);
            self.min = NumMinMonoids::new().combine(c.left.min, c.right.min);
            self.max = NumMaxMonoids::new().combine(c.left.max, c.right.max);
        }
    }

    /// O(n)
    pub fn node_count(&self) -> usize {
        match self.children.as_deref() {
            Some(c) => 1 + c.left.node_count() + c.right.node_count(),
            None => 1,
        }
    }

    /// O(n)
    pub fn leaf_count(&self) -> usize {
        match self.children.as_deref() {
            Some(c) => c.left.leaf_count() + c.right.leaf_count(),
            None => 1,
        }
    }

    /// A lone leaf has height 1.
    pub fn height(&self) -> usize {
        match self.children.as_deref() {
            Some(c) => 1 + c.left.height().max(c.right.height()),
            None => 1,
        }
    }

    /// O(n)
    fn validate(&self, values: &[T]) -> bool {
        match self.children.as_deref() {
            None => {
                self.start == self.end
                    && self.start < values.len()
                    && self.sum == values[self.start]
                    && self.min == values[self.start]
                    && self.max == values[self.start]
            }
            Some(c) => {
                c.left.start == self.start
                    && c.right.end == self.end
                    && c.left.end + 1 == c.right.start
                    && self.sum == NumAdditiveMonoids::new().combine(c.left.sum, c.right.sum)
                    && self.min == NumMinMonoids::new().combine(c.left.min, c.right.min)
                    && self.max == NumMaxMonoids::new().combine(c.left.max, c.right.max)
                    && c.left.validate(values)
                    && c.right.validate(values)
            }
        }
    }
}

/// Counts from one full traversal of the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStatistics {
    pub node_count: usize,
    pub leaf_count: usize,
    pub height: usize,
    pub array_size: usize,
}

/// Range-aggregation tree over a fixed-size numeric array: range sum/min/max
/// queries and point updates in O(log n), plus a rebuild-based range update.
/// Keeps its own authoritative copy of the array; the root is absent exactly
/// when the array is empty.
#[derive(Clone, Debug)]
pub struct RangeAggregateTree<T: Float> {
    values: Vec<T>,
    root: Option<Box<AggregateNode<T>>>,
}

impl<T: Float> RangeAggregateTree<T> {
    /// O(n)
    pub fn new(values: Vec<T>) -> Self {
        let root = Self::build_root(&values);
        Self { values, root }
    }

    fn build_root(values: &[T]) -> Option<Box<AggregateNode<T>>> {
        if values.is_empty() {
            None
        } else {
            Some(Box::new(AggregateNode::build(values, 0, values.len() - 1)))
        }
    }

    /// O(1)
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Current snapshot of the backing array.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn root(&self) -> Option<&AggregateNode<T>> {
        self.root.as_deref()
    }

    fn query_with<M, R>(&self, qlo: usize, qhi: usize, monoid: M, read: R) -> T
    where
        M: Monoid<Elem = T>,
        R: Fn(&AggregateNode<T>) -> T,
    {
        if qlo > qhi {
            return monoid.id();
        }
        match &self.root {
            Some(root) => root.query(qlo, qhi, &monoid, &read),
            None => monoid.id(),
        }
    }

    /// Sum over the intersection of `[qlo, qhi]` with the data; `0` when the
    /// two are disjoint, the range is inverted, or the tree is empty.
    ///
    /// O(log n)
    pub fn query_sum(&self, qlo: usize, qhi: usize) -> T {
        self.query_with(qlo, qhi, NumAdditiveMonoids::new(), |node: &AggregateNode<T>| {
            node.sum
        })
    }

    /// Minimum over the intersection; `+inf` when there is no data to
    /// combine.
    ///
    /// O(log n)
    pub fn query_min(&self, qlo: usize, qhi: usize) -> T {
        self.query_with(qlo, qhi, NumMinMonoids::new(), |node: &AggregateNode<T>| {
            node.min
        })
    }

    /// Maximum over the intersection; `-inf` when there is no data to
    /// combine.
    ///
    /// O(log n)
    pub fn query_max(&self, qlo: usize, qhi: usize) -> T {
        self.query_with(qlo, qhi, NumMaxMonoids::new(), |node: &AggregateNode<T>| {
            node.max
        })
    }

    /// Replaces the value at `index` in the backing array and restores every
    /// ancestor's aggregates on the way back up. An out-of-range index is a
    /// no-op.
    ///
    /// O(log n)
    pub fn update_point(&mut self, index: usize, value: T) {
        if index >= self.values.len() {
            return;
        }
        self.values[index] = value;
        if let Some(root) = &mut self.root {
            root.assign(index, value);
        }
    }

    /// Adds `delta` to every element of `[qlo, qhi]`, clamped to the data,
    /// then rebuilds the whole tree from the backing array. Not lazy
    /// propagation: the contract here is the result, at O(n) cost.
    pub fn update_range(&mut self, qlo: usize, qhi: usize, delta: T) {
        if self.values.is_empty() {
            return;
        }
        let last = self.values.len() - 1;
        for i in qlo..=qhi.min(last) {
            self.values[i] = self.values[i] + delta;
        }
        self.root = Self::build_root(&self.values);
    }

    /// Full-tree traversal. `node_count` is `2n - 1` for `n >= 1`.
    ///
    /// O(n)
    pub fn statistics(&self) -> TreeStatistics {
        match &self.root {
            Some(root) => TreeStatistics {
                node_count: root.node_count(),
                leaf_count: root.leaf_count(),
                height: root.height(),
                array_size: self.values.len(),
            },
            None => TreeStatistics {
                array_size: self.values.len(),
                ..TreeStatistics::default()
            },
        }
    }

    /// Recursively checks the tree against its own backing copy: leaf
    /// aggregates equal the array entry, parent aggregates equal the
    /// combination of their children's, and the leaves partition the index
    /// range with no gaps or overlaps. An absent root is trivially valid.
    /// Diagnostic only; never called by the other operations.
    ///
    /// O(n)
    pub fn validate(&self) -> bool {
        match &self.root {
            Some(root) => {
                root.start == 0 && root.end + 1 == self.values.len() && root.validate(&self.values)
            }
            None => true,
        }
    }

    /// Preorder walk over the nodes, root first.
    pub fn nodes(&self) -> Nodes<'_, T> {
        Nodes {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }
}

impl<T: Float> std::iter::FromIterator<T> for RangeAggregateTree<T> {
    fn from_iter<Iter: IntoIterator<Item = T>>(iter: Iter) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug)]
pub struct Nodes<'a, T: Float> {
    stack: Vec<&'a AggregateNode<T>>,
}

impl<'a, T: Float> Iterator for Nodes<'a, T> {
    type Item = &'a AggregateNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(c) = node.children.as_deref() {
            self.stack.push(&c.right);
            self.stack.push(&c.left);
        }
        Some(node)
    }
}
