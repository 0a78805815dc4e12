use super::*;

use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Ordered container of the nodes that are not expanded yet.
///
/// The frontier policy determines which node is popped next.
pub trait Frontier<S, A> {
    /// True if this frontier orders nodes by the priority given in [`Frontier::push`].
    /// The heuristic is never consulted for frontiers that ignore priorities.
    const PRIORITIZED: bool;

    fn new() -> Self;
    /// Push a node with the given priority. Lower priorities are popped first.
    fn push(&mut self, node: SearchNode<S, A>, priority: Cost);
    /// Pop the next node according to the frontier policy.
    fn pop(&mut self) -> Option<SearchNode<S, A>>;
    /// Number of nodes in the frontier, including stale ones.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// LIFO frontier used by depth-first search.
pub struct StackFrontier<S, A>(Vec<SearchNode<S, A>>);

impl<S, A> Frontier<S, A> for StackFrontier<S, A> {
    const PRIORITIZED: bool = false;

    fn new() -> Self {
        StackFrontier(Vec::new())
    }

    #[inline]
    fn push(&mut self, node: SearchNode<S, A>, _priority: Cost) {
        self.0.push(node);
    }

    #[inline]
    fn pop(&mut self) -> Option<SearchNode<S, A>> {
        self.0.pop()
    }

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// FIFO frontier used by breadth-first search.
pub struct QueueFrontier<S, A>(VecDeque<SearchNode<S, A>>);

impl<S, A> Frontier<S, A> for QueueFrontier<S, A> {
    const PRIORITIZED: bool = false;

    fn new() -> Self {
        QueueFrontier(VecDeque::new())
    }

    #[inline]
    fn push(&mut self, node: SearchNode<S, A>, _priority: Cost) {
        self.0.push_back(node);
    }

    #[inline]
    fn pop(&mut self) -> Option<SearchNode<S, A>> {
        self.0.pop_front()
    }

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Private helper for the binary heap in [`PriorityFrontier`].
struct PriorityEntry<S, A> {
    priority: OrderedFloat<Cost>,
    /// Insertion counter, used as tiebreak.
    order: usize,
    node: SearchNode<S, A>,
}

impl<S, A> PartialEq for PriorityEntry<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S, A> Eq for PriorityEntry<S, A> {}

impl<S, A> PartialOrd for PriorityEntry<S, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, A> Ord for PriorityEntry<S, A> {
    /// Reversed so that the max-heap pops the lowest priority, then the earliest insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Min-priority frontier used by uniform cost search and A*.
///
/// Nodes with equal priority are popped in insertion order.
pub struct PriorityFrontier<S, A> {
    heap: BinaryHeap<PriorityEntry<S, A>>,
    pushed: usize,
}

impl<S, A> Frontier<S, A> for PriorityFrontier<S, A> {
    const PRIORITIZED: bool = true;

    fn new() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            pushed: 0,
        }
    }

    fn push(&mut self, node: SearchNode<S, A>, priority: Cost) {
        self.heap.push(PriorityEntry {
            priority: OrderedFloat(priority),
            order: self.pushed,
            node,
        });
        self.pushed += 1;
    }

    #[inline]
    fn pop(&mut self) -> Option<SearchNode<S, A>> {
        self.heap.pop().map(|entry| entry.node)
    }

    #[inline]
    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<F: Frontier<u32, ()>>(mut frontier: F) -> Vec<u32> {
        let mut out = Vec::new();
        while let Some(node) = frontier.pop() {
            out.push(node.state);
        }
        out
    }

    fn fill<F: Frontier<u32, ()>>(items: &[(u32, Cost)]) -> F {
        let mut frontier = F::new();
        for &(state, priority) in items {
            frontier.push(SearchNode::root(state), priority);
        }
        frontier
    }

    const ITEMS: [(u32, Cost); 5] = [(1, 3.0), (2, 1.0), (3, 2.0), (4, 1.0), (5, 0.5)];

    #[test]
    fn stack_is_lifo() {
        let frontier: StackFrontier<u32, ()> = fill(&ITEMS);
        assert_eq!(frontier.len(), 5);
        assert_eq!(drain(frontier), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn queue_is_fifo() {
        let frontier: QueueFrontier<u32, ()> = fill(&ITEMS);
        assert_eq!(drain(frontier), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn priority_ties_in_insertion_order() {
        let frontier: PriorityFrontier<u32, ()> = fill(&ITEMS);
        assert_eq!(drain(frontier), vec![5, 2, 4, 3, 1]);
    }

    #[test]
    fn empty_frontier() {
        let mut frontier: PriorityFrontier<u32, ()> = PriorityFrontier::new();
        assert!(frontier.is_empty());
        assert!(frontier.pop().is_none());
    }
}
