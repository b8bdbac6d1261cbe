use std::cmp::min;
use std::fmt::Debug;

type HeapIndex = usize;

/// Children per node.
const HEAP_ARITY: usize = 4usize;

// Nodes are laid out level by level,
//
// ```text
//                 0
//     1       2       3       4
//  5..=8   9..=12  13..=16 17..=20
// ```

#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    debug_assert!(i > 0, "The root has no parent");
    (i - 1) / HEAP_ARITY
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    HEAP_ARITY * i + 1
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    HEAP_ARITY * (i + 1)
}

/// Index of the smallest element of a non-empty slice, preferring the
/// leftmost one on ties.
#[inline(always)]
#[must_use]
fn arg_min<T: Ord>(a: &[T]) -> usize {
    debug_assert!(!a.is_empty());
    let mut best = 0usize;
    for i in 1..a.len() {
        if a[i] < a[best] {
            best = i;
        }
    }
    best
}

/// A d-ary min-heap.
///
/// Elements are never re-ranked in place. Callers that need a better rank
/// for an element push it again and skip the stale copy when it surfaces.
#[derive(Clone, Debug)]
pub struct Heap<N>
where
    N: Debug + Ord,
{
    heap: Vec<N>,
}

impl<N> Heap<N>
where
    N: Debug + Ord,
{
    pub fn new() -> Self {
        Self { heap: vec![] }
    }
    pub fn with_capacity(s: usize) -> Self {
        Self {
            heap: Vec::with_capacity(s),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    pub fn peek(&self) -> Option<&N> {
        self.heap.first()
    }

    /// All the elements, in no particular order.
    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.heap.iter()
    }

    pub fn push(&mut self, n: N) -> HeapIndex {
        self.verify_heap();
        let heap_index = self.heap.len(); // Future heap_index

        self.heap.push(n);
        let heap_index = self.sift_up(heap_index);

        self.verify_heap();
        heap_index
    }

    pub fn pop(&mut self) -> Option<N> {
        self.verify_heap();

        let len = self.heap.len();
        if len <= 1 {
            return self.heap.pop();
        }

        // Move the best element to the back, then fix the new root.
        self.heap.swap(0, len - 1);
        let best = self.heap.pop();
        self.sift_down(0);

        self.verify_heap();
        best
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            debug_assert!(
                self.heap[p] <= self.heap[i],
                "Node[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }

    // Implementation details

    /// Raises a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_up(&mut self, index: usize) -> usize {
        debug_assert!(index < self.heap.len(), "Index out of bounds...");

        let mut pos = index;
        while pos != 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.heap.len();
        debug_assert!(index < len, "Index out of bounds...");

        loop {
            // Find the best child
            let mut child = down_left(index);
            if child >= len {
                break;
            }

            debug_assert_eq!(child + HEAP_ARITY, down_right(index) + 1);
            child += arg_min(&self.heap[child..min(child + HEAP_ARITY, len)]);

            if self.heap[index] <= self.heap[child] {
                break;
            }

            self.heap.swap(index, child);
            index = child;
        }
        index
    }
}

impl<N> Default for Heap<N>
where
    N: Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
