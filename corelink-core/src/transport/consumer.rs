//! Presentation-core side of the transport

use core::net::Ipv4Addr;

use corelink_protocol::{address_from_word, classify, Inbound, StatusEvent};

use crate::context::StatusContext;
use crate::diagnostics::Diagnostic;
use crate::queue::QueueFull;
use crate::traits::InterCoreFifo;

/// Outcome of one transport poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    /// No word was pending
    Idle,
    /// Address notification processed (bypasses the queue)
    AddressAcquired(Ipv4Addr),
    /// Event appended to the queue
    Enqueued(StatusEvent),
    /// Event dropped
    Rejected(Diagnostic),
}

#[cfg(feature = "defmt")]
impl defmt::Format for TransportEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            TransportEvent::Idle => defmt::write!(f, "Idle"),
            TransportEvent::AddressAcquired(addr) => {
                let [a, b, c, d] = addr.octets();
                defmt::write!(f, "AddressAcquired({}.{}.{}.{})", a, b, c, d)
            }
            TransportEvent::Enqueued(event) => defmt::write!(f, "Enqueued({})", event),
            TransportEvent::Rejected(diagnostic) => defmt::write!(f, "Rejected({})", diagnostic),
        }
    }
}

/// Poll the FIFO once
///
/// Handles at most one logical message: a single status word, or an
/// address header together with its payload word. Never blocks unless an
/// address header has been read, in which case the payload word is
/// guaranteed by the producer to follow.
pub fn drain_transport<F, const N: usize>(
    fifo: &mut F,
    ctx: &mut StatusContext<N>,
) -> TransportEvent
where
    F: InterCoreFifo,
{
    if !fifo.has_data() {
        return TransportEvent::Idle;
    }

    let event = match classify(fifo.pop_blocking()) {
        Inbound::AddressTag => {
            let addr = address_from_word(fifo.pop_blocking());
            ctx.set_address(addr);
            return TransportEvent::AddressAcquired(addr);
        }
        Inbound::Malformed { attempt, status } => {
            let diagnostic = Diagnostic::MalformedEvent { attempt, status };
            ctx.diagnostics.record(&diagnostic);
            return TransportEvent::Rejected(diagnostic);
        }
        Inbound::AckPing(event) | Inbound::Status(event) => event,
    };

    match ctx.queue.try_enqueue(event) {
        Ok(()) => TransportEvent::Enqueued(event),
        Err(QueueFull(event)) => {
            let diagnostic = Diagnostic::QueueFull { event };
            ctx.diagnostics.record(&diagnostic);
            TransportEvent::Rejected(diagnostic)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use corelink_protocol::{address_words, ACK_PING, ADDRESS_TAG};
    use heapless::Deque;
    use proptest::prelude::*;

    /// FIFO backed by a word list
    pub(crate) struct MockFifo {
        pub words: Deque<u32, 32>,
        pub blocking_pops: usize,
    }

    impl MockFifo {
        pub fn new(words: &[u32]) -> Self {
            let mut deque = Deque::new();
            for &w in words {
                deque.push_back(w).unwrap();
            }
            Self {
                words: deque,
                blocking_pops: 0,
            }
        }
    }

    impl InterCoreFifo for MockFifo {
        fn has_data(&mut self) -> bool {
            !self.words.is_empty()
        }

        fn pop_blocking(&mut self) -> u32 {
            self.blocking_pops += 1;
            self.words.pop_front().expect("producer broke the framing contract")
        }
    }

    #[test]
    fn test_idle_when_empty() {
        let mut fifo = MockFifo::new(&[]);
        let mut ctx = StatusContext::<4>::new();
        assert_eq!(drain_transport(&mut fifo, &mut ctx), TransportEvent::Idle);
        assert_eq!(fifo.blocking_pops, 0);
    }

    #[test]
    fn test_status_word_enqueued() {
        let mut fifo = MockFifo::new(&[0x0001_0001]);
        let mut ctx = StatusContext::<4>::new();
        assert_eq!(
            drain_transport(&mut fifo, &mut ctx),
            TransportEvent::Enqueued(StatusEvent::new(1, 1))
        );
        assert_eq!(ctx.queue.len(), 1);
    }

    #[test]
    fn test_address_bypasses_queue() {
        let addr = Ipv4Addr::new(10, 0, 0, 42);
        let [_, payload] = address_words(addr);
        // Arbitrary status half on the tag word
        let mut fifo = MockFifo::new(&[0xFFFE_ABCD, payload]);
        let mut ctx = StatusContext::<4>::new();

        assert_eq!(
            drain_transport(&mut fifo, &mut ctx),
            TransportEvent::AddressAcquired(addr)
        );
        assert_eq!(ctx.last_known_address, u32::from(addr));
        assert!(ctx.address_available);
        assert!(ctx.queue.is_empty());
        assert_eq!(fifo.blocking_pops, 2);
    }

    #[test]
    fn test_address_stops_processing_for_this_cycle() {
        let [tag, payload] = address_words(Ipv4Addr::new(192, 168, 0, 7));
        let mut fifo = MockFifo::new(&[tag, payload, 0x0003_0001]);
        let mut ctx = StatusContext::<4>::new();

        drain_transport(&mut fifo, &mut ctx);
        assert!(ctx.queue.is_empty());
        assert_eq!(fifo.words.len(), 1);

        drain_transport(&mut fifo, &mut ctx);
        assert_eq!(ctx.queue.len(), 1);
    }

    #[test]
    fn test_malformed_rejected() {
        let mut fifo = MockFifo::new(&[StatusEvent::new(5, 9).to_word()]);
        let mut ctx = StatusContext::<4>::new();

        assert_eq!(
            drain_transport(&mut fifo, &mut ctx),
            TransportEvent::Rejected(Diagnostic::MalformedEvent {
                attempt: 5,
                status: 9
            })
        );
        assert!(ctx.queue.is_empty());
        assert_eq!(ctx.diagnostics.malformed, 1);
    }

    #[test]
    fn test_ack_ping_with_out_of_range_status_is_enqueued() {
        let mut fifo = MockFifo::new(&[StatusEvent::new(ACK_PING, 9).to_word()]);
        let mut ctx = StatusContext::<4>::new();

        assert_eq!(
            drain_transport(&mut fifo, &mut ctx),
            TransportEvent::Enqueued(StatusEvent::new(ACK_PING, 9))
        );
        assert_eq!(ctx.diagnostics.malformed, 0);
    }

    #[test]
    fn test_queue_full_drops_and_counts() {
        let mut fifo = MockFifo::new(&[0x0001_0000, 0x0002_0001, 0x0003_0002]);
        let mut ctx = StatusContext::<2>::new();

        drain_transport(&mut fifo, &mut ctx);
        drain_transport(&mut fifo, &mut ctx);
        assert_eq!(
            drain_transport(&mut fifo, &mut ctx),
            TransportEvent::Rejected(Diagnostic::QueueFull {
                event: StatusEvent::new(3, 2)
            })
        );

        assert_eq!(ctx.queue.len(), 2);
        assert_eq!(ctx.diagnostics.queue_full, 1);
        assert_eq!(ctx.queue.try_dequeue(), Some(StatusEvent::new(1, 0)));
        assert_eq!(ctx.queue.try_dequeue(), Some(StatusEvent::new(2, 1)));
    }

    proptest! {
        /// Any status half on the tag word, any address word
        #[test]
        fn prop_address_pair_bypasses_queue(status: u16, addr: u32, queued in 0usize..4) {
            let tag = ((ADDRESS_TAG as u32) << 16) | status as u32;
            let mut fifo = MockFifo::new(&[tag, addr]);
            let mut ctx = StatusContext::<4>::new();
            for attempt in 0..queued {
                ctx.queue.try_enqueue(StatusEvent::new(attempt as u16, 0)).unwrap();
            }

            prop_assert_eq!(
                drain_transport(&mut fifo, &mut ctx),
                TransportEvent::AddressAcquired(Ipv4Addr::from(addr))
            );
            prop_assert_eq!(ctx.last_known_address, addr);
            prop_assert!(ctx.address_available);
            prop_assert_eq!(ctx.queue.len(), queued);
            prop_assert!(fifo.words.is_empty());
        }
    }
}
