use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// Min-priority queue of `(tentative_distance, vertex)` entries for Dijkstra's frontier
///
/// There is no decrease-key: a vertex whose distance improves is pushed again and the
/// older entry stays behind as a stale entry, to be discarded by the caller when popped.
/// Entries with equal distance pop in ascending vertex order.
#[derive(Debug, Clone)]
pub struct Frontier<P>
where
    P: Ord + Copy + Debug,
{
    /// The underlying binary heap
    heap: BinaryHeap<Reverse<(P, usize)>>,
}

impl<P> Frontier<P>
where
    P: Ord + Copy + Debug,
{
    /// Creates a new empty frontier
    pub fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
        }
    }

    /// Returns true if no entries, stale or not, remain
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of entries, including stale ones
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pushes a vertex with its tentative distance
    pub fn push(&mut self, vertex: usize, distance: P) {
        self.heap.push(Reverse((distance, vertex)));
    }

    /// Removes the entry with the smallest distance
    pub fn pop(&mut self) -> Option<(usize, P)> {
        self.heap.pop().map(|Reverse((distance, vertex))| (vertex, distance))
    }

    /// Returns the entry with the smallest distance without removing it
    pub fn peek(&self) -> Option<(usize, P)> {
        self.heap.peek().map(|Reverse((distance, vertex))| (*vertex, *distance))
    }

    /// Clears the frontier
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<P> Default for Frontier<P>
where
    P: Ord + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
