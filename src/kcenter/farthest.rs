//! bounded farthest point queue.
//!
//! The queue keeps the C pairs (distance, index) with largest distance among all pairs offered.
//! Pairs are totally ordered by distance then by index, so the retained set is the top C of a total order:
//! it does not depend on the order pairs were offered nor on how worker queues were merged.
//! This makes the rayon fold/reduce of worker local queues deterministic.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A structure that can accumulate items and absorb another structure of the same kind.
/// merge must be associative and commutative so that worker local accumulators
/// can be combined in any order by a parallel reduction.
pub trait Mergeable<T> {
    /// accumulate one item
    fn add(&mut self, item: T);
    /// absorb all items of other
    fn merge(&mut self, other: Self);
}

// a (distance, index) pair with a total order
#[derive(Debug, Copy, Clone)]
struct Farthest {
    dist: f64,
    index: usize,
}

impl PartialEq for Farthest {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Farthest {}

impl PartialOrd for Farthest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Farthest {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then(self.index.cmp(&other.index))
    }
}

/// Fixed capacity queue retaining the farthest points seen.
///
/// Internally a min heap, so the smallest retained distance (the threshold) is on top
/// and is the one evicted when a farther point comes in.
#[derive(Debug, Clone)]
pub struct FarthestQueue {
    capacity: usize,
    heap: BinaryHeap<Reverse<Farthest>>,
}

impl FarthestQueue {
    pub fn new(capacity: usize) -> Self {
        FarthestQueue {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// offer a pair. It is admitted if the queue is not full or if it is farther than the current threshold.
    pub fn add(&mut self, dist: f64, index: usize) {
        if self.capacity == 0 {
            return;
        }
        let item = Farthest { dist, index };
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(item));
        } else if let Some(mut top) = self.heap.peek_mut() {
            if item > top.0 {
                // replace the minimum, PeekMut restores heap order on drop
                *top = Reverse(item);
            }
        }
    }

    /// consuming merge, used as the rayon reduce operator
    pub fn merged(mut self, other: FarthestQueue) -> FarthestQueue {
        // fold the smaller queue into the larger
        if self.heap.len() < other.heap.len() {
            let mut other = other;
            Mergeable::merge(&mut other, self);
            return other;
        }
        Mergeable::merge(&mut self, other);
        self
    }

    /// smallest retained distance, None if queue is empty
    pub fn threshold(&self) -> Option<f64> {
        self.heap.peek().map(|top| top.0.dist)
    }

    pub fn get_capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// empties the queue, keeping capacity
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// returns true if index is among retained pairs. O(C)
    pub fn contains(&self, index: usize) -> bool {
        self.heap.iter().any(|item| item.0.index == index)
    }

    /// retained pairs (distance, index) sorted by decreasing distance (ties by decreasing index).
    /// This is the stable view used for sampling among the farthest points, heap storage order is never exposed.
    pub fn get_members(&self) -> Vec<(f64, usize)> {
        let mut members: Vec<Farthest> = self.heap.iter().map(|item| item.0).collect();
        members.sort_unstable_by(|a, b| b.cmp(a));
        members.into_iter().map(|f| (f.dist, f.index)).collect()
    }

    /// consumes the queue, returning pairs sorted by decreasing distance
    pub fn into_members(self) -> Vec<(f64, usize)> {
        // sorted vec of Reverse is in decreasing order of the inner item
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|item| (item.0.dist, item.0.index))
            .collect()
    }
} // end of impl FarthestQueue

impl Mergeable<(f64, usize)> for FarthestQueue {
    fn add(&mut self, item: (f64, usize)) {
        FarthestQueue::add(self, item.0, item.1);
    }

    fn merge(&mut self, other: Self) {
        for item in other.heap.into_iter() {
            FarthestQueue::add(self, item.0.dist, item.0.index);
        }
    }
}

//========================================================
