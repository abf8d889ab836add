use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use crate::containers::KeyedVec;
use crate::engine::cp::propagation::PropagatorCost;
use crate::engine::cp::propagation::PropagatorId;
use crate::marrow_assert_moderate;

/// The runnable propagators of a space, with one FIFO queue per cost class.
///
/// [`PropagatorQueue::pop`] always returns a propagator of the cheapest non-empty class, so cheap
/// propagators reach their fixpoint before expensive ones run. A propagator is queued at most
/// once, in the class it reported when it was enqueued.
#[derive(Clone, Debug)]
pub(crate) struct PropagatorQueue {
    queues: Vec<VecDeque<PropagatorId>>,
    is_enqueued: KeyedVec<PropagatorId, bool>,
    num_enqueued: usize,
    present_costs: BinaryHeap<Reverse<u32>>,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        PropagatorQueue {
            queues: vec![VecDeque::new(); PropagatorCost::NUM_CLASSES],
            is_enqueued: KeyedVec::default(),
            num_enqueued: 0,
            present_costs: BinaryHeap::new(),
        }
    }
}

impl PropagatorQueue {
    pub(crate) fn is_empty(&self) -> bool {
        self.num_enqueued == 0
    }

    pub(crate) fn len(&self) -> usize {
        self.num_enqueued
    }

    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, cost: PropagatorCost) {
        self.is_enqueued.accommodate(propagator_id, false);
        if self.is_enqueued[propagator_id] {
            return;
        }

        let class = cost as usize;
        if self.queues[class].is_empty() {
            self.present_costs.push(Reverse(class as u32));
        }

        self.queues[class].push_back(propagator_id);
        self.is_enqueued[propagator_id] = true;
        self.num_enqueued += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let Reverse(cheapest) = *self.present_costs.peek()?;
        let class = cheapest as usize;

        let propagator_id = self.queues[class].pop_front();
        marrow_assert_moderate!(propagator_id.is_some(), "present cost classes are non-empty");

        if self.queues[class].is_empty() {
            let _ = self.present_costs.pop();
        }

        let propagator_id = propagator_id?;
        self.is_enqueued[propagator_id] = false;
        self.num_enqueued -= 1;

        Some(propagator_id)
    }

    pub(crate) fn clear(&mut self) {
        while let Some(Reverse(class)) = self.present_costs.pop() {
            for propagator_id in self.queues[class as usize].drain(..) {
                self.is_enqueued[propagator_id] = false;
            }
        }

        self.num_enqueued = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::PropagatorQueue;
    use crate::engine::cp::propagation::PropagatorCost;
    use crate::engine::cp::propagation::PropagatorId;

    #[test]
    fn cheapest_class_first_then_insertion_order() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(0), PropagatorCost::Linear);
        queue.enqueue_propagator(PropagatorId(1), PropagatorCost::Unary);
        queue.enqueue_propagator(PropagatorId(2), PropagatorCost::Linear);
        queue.enqueue_propagator(PropagatorId(3), PropagatorCost::Binary);
        queue.enqueue_propagator(PropagatorId(4), PropagatorCost::Unary);

        let order = std::iter::from_fn(|| queue.pop()).collect::<Vec<_>>();

        assert_eq!(
            order,
            vec![
                PropagatorId(1),
                PropagatorId(4),
                PropagatorId(3),
                PropagatorId(0),
                PropagatorId(2)
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn propagators_are_queued_once() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(5), PropagatorCost::Ternary);
        queue.enqueue_propagator(PropagatorId(5), PropagatorCost::Ternary);
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.pop(), Some(PropagatorId(5)));
        assert_eq!(queue.pop(), None);

        queue.enqueue_propagator(PropagatorId(5), PropagatorCost::Ternary);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn clearing_allows_requeueing() {
        let mut queue = PropagatorQueue::default();
        queue.enqueue_propagator(PropagatorId(0), PropagatorCost::Quadratic);
        queue.enqueue_propagator(PropagatorId(1), PropagatorCost::Generic);

        queue.clear();
        assert!(queue.is_empty());

        queue.enqueue_propagator(PropagatorId(1), PropagatorCost::Generic);
        assert_eq!(queue.pop(), Some(PropagatorId(1)));
    }
}
