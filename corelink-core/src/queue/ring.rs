//! Ring buffer implementation

use corelink_protocol::StatusEvent;

/// Default queue capacity used by the firmware
pub const QUEUE_CAPACITY: usize = 8;

/// Returned by [`EventQueue::try_enqueue`] when the queue is full
///
/// Hands the rejected event back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull(pub StatusEvent);

/// Fixed-capacity FIFO of status events
///
/// Single producer, single consumer, both in the same execution context.
/// No internal synchronization: the cross-core boundary is the hardware
/// FIFO, not this queue.
#[derive(Debug, Clone)]
pub struct EventQueue<const N: usize = QUEUE_CAPACITY> {
    slots: [StatusEvent; N],
    /// Index of the oldest element
    head: usize,
    /// Number of occupied slots (0..=N)
    len: usize,
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    const NONZERO_CAPACITY: () = assert!(N > 0, "event queue capacity must be at least 1");

    /// Create an empty queue
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_CAPACITY;
        Self {
            slots: [StatusEvent::new(0, 0); N],
            head: 0,
            len: 0,
        }
    }

    /// Reset to empty and clear every slot
    pub fn initialize(&mut self) {
        self.slots.fill(StatusEvent::default());
        self.head = 0;
        self.len = 0;
    }

    /// Append an event at the tail
    ///
    /// Fails without touching the queue when it is full.
    pub fn try_enqueue(&mut self, event: StatusEvent) -> Result<(), QueueFull> {
        if self.len == N {
            return Err(QueueFull(event));
        }
        let tail = (self.head + self.len) % N;
        self.slots[tail] = event;
        self.len += 1;
        Ok(())
    }

    /// Remove and return the oldest event
    pub fn try_dequeue(&mut self) -> Option<StatusEvent> {
        if self.len == 0 {
            return None;
        }
        let event = self.slots[self.head];
        self.slots[self.head] = StatusEvent::default();
        self.head = (self.head + 1) % N;
        self.len -= 1;
        Some(event)
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no events are queued
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the next enqueue would fail
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Fixed capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Iterate queued events from head to tail without consuming them
    pub fn iter(&self) -> impl Iterator<Item = StatusEvent> + '_ {
        (0..self.len).map(move |i| self.slots[(self.head + i) % N])
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;
    use std::vec::Vec;

    fn event(attempt: u16) -> StatusEvent {
        StatusEvent::new(attempt, attempt % 3)
    }

    fn check_capacity<const N: usize>() {
        let mut queue = EventQueue::<N>::new();
        for i in 0..N {
            assert!(queue.try_enqueue(event(i as u16)).is_ok());
        }
        assert!(queue.is_full());

        let before: Vec<_> = queue.iter().collect();
        let overflow = event(0x7777);
        assert_eq!(queue.try_enqueue(overflow), Err(QueueFull(overflow)));

        let after: Vec<_> = queue.iter().collect();
        assert_eq!(before, after);
        assert_eq!(queue.len(), N);
    }

    #[test]
    fn test_capacity_bound() {
        check_capacity::<1>();
        check_capacity::<2>();
        check_capacity::<3>();
        check_capacity::<QUEUE_CAPACITY>();
        check_capacity::<16>();
    }

    #[test]
    fn test_empty_dequeue() {
        let mut queue = EventQueue::<4>::new();
        assert!(queue.is_empty());
        assert_eq!(queue.try_dequeue(), None);
    }

    #[test]
    fn test_wraparound_preserves_order() {
        let mut queue = EventQueue::<3>::new();
        queue.try_enqueue(event(1)).unwrap();
        queue.try_enqueue(event(2)).unwrap();
        assert_eq!(queue.try_dequeue(), Some(event(1)));
        queue.try_enqueue(event(3)).unwrap();
        queue.try_enqueue(event(4)).unwrap();

        assert_eq!(queue.try_dequeue(), Some(event(2)));
        assert_eq!(queue.try_dequeue(), Some(event(3)));
        assert_eq!(queue.try_dequeue(), Some(event(4)));
        assert_eq!(queue.try_dequeue(), None);
    }

    #[test]
    fn test_initialize_resets() {
        let mut queue = EventQueue::<4>::new();
        queue.try_enqueue(event(1)).unwrap();
        queue.try_enqueue(event(2)).unwrap();
        queue.initialize();
        assert!(queue.is_empty());
        assert_eq!(queue.iter().count(), 0);
        assert_eq!(queue.try_dequeue(), None);
    }

    #[test]
    fn test_end_to_end_order() {
        let mut queue = EventQueue::<QUEUE_CAPACITY>::new();
        let sequence = [
            StatusEvent::new(1, 0),
            StatusEvent::new(2, 1),
            StatusEvent::ack_ping(),
        ];
        for e in sequence {
            queue.try_enqueue(e).unwrap();
        }
        for e in sequence {
            assert_eq!(queue.try_dequeue(), Some(e));
        }
    }

    proptest! {
        /// Interleaved operations behave like an unbounded FIFO as long as
        /// the bound is respected
        #[test]
        fn prop_fifo_law(ops in proptest::collection::vec(any::<Option<u16>>(), 0..200)) {
            let mut queue = EventQueue::<5>::new();
            let mut model = VecDeque::new();

            for op in ops {
                match op {
                    Some(attempt) => {
                        let e = event(attempt);
                        let accepted = queue.try_enqueue(e).is_ok();
                        prop_assert_eq!(accepted, model.len() < 5);
                        if accepted {
                            model.push_back(e);
                        }
                    }
                    None => {
                        prop_assert_eq!(queue.try_dequeue(), model.pop_front());
                    }
                }
                prop_assert_eq!(queue.len(), model.len());
                prop_assert!(queue.len() <= queue.capacity());
            }
        }
    }
}
