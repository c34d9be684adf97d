//! Status reducer
//!
//! Maps each dequeued event to exactly one presentation outcome. Pure
//! apart from the random source used for acknowledgement colours; the
//! side effects are applied by the presenter.

pub mod palette;
pub mod status;

pub use palette::STRONG_PALETTE;
pub use status::StatusOutcome;

use corelink_protocol::StatusEvent;
use rand_core::RngCore;

use crate::traits::Rgb;
use palette::{pick_index, PALETTE_LEN};

/// Result of reducing one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reduction {
    /// Acknowledgement ping: hold a random strong colour
    Ack { palette_index: usize, color: Rgb },
    /// Ordinary status report
    Status(StatusOutcome),
}

/// Reduce one event
///
/// For acknowledgement pings the status half is never consulted.
pub fn reduce<R: RngCore>(event: &StatusEvent, rng: &mut R) -> Reduction {
    if event.is_ack_ping() {
        let palette_index = pick_index(rng, PALETTE_LEN);
        return Reduction::Ack {
            palette_index,
            color: STRONG_PALETTE[palette_index],
        };
    }

    Reduction::Status(event.status_code().into())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use corelink_protocol::ACK_PING;
    use proptest::prelude::*;
    use rand_core::RngCore;

    /// Deterministic generator cycling through a fixed list of outputs
    pub(crate) struct SequenceRng {
        values: &'static [u32],
        next: usize,
    }

    impl SequenceRng {
        pub fn new(values: &'static [u32]) -> Self {
            Self { values, next: 0 }
        }
    }

    impl RngCore for SequenceRng {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            value
        }

        fn next_u64(&mut self) -> u64 {
            ((self.next_u32() as u64) << 32) | self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_status_outcomes() {
        let mut rng = SequenceRng::new(&[0]);
        assert_eq!(
            reduce(&StatusEvent::new(1, 0), &mut rng),
            Reduction::Status(StatusOutcome::Initializing)
        );
        assert_eq!(
            reduce(&StatusEvent::new(2, 1), &mut rng),
            Reduction::Status(StatusOutcome::Connected)
        );
        assert_eq!(
            reduce(&StatusEvent::new(3, 2), &mut rng),
            Reduction::Status(StatusOutcome::Failed)
        );
    }

    #[test]
    fn test_unvalidated_status_is_unknown() {
        let mut rng = SequenceRng::new(&[0]);
        assert_eq!(
            reduce(&StatusEvent::new(5, 9), &mut rng),
            Reduction::Status(StatusOutcome::Unknown)
        );
    }

    #[test]
    fn test_ack_uses_palette() {
        let mut rng = SequenceRng::new(&[4]);
        assert_eq!(
            reduce(&StatusEvent::new(ACK_PING, 1), &mut rng),
            Reduction::Ack {
                palette_index: 4,
                color: STRONG_PALETTE[4]
            }
        );
    }

    proptest! {
        #[test]
        fn prop_valid_status_never_unknown(attempt in any::<u16>(), status in 0u16..=2) {
            prop_assume!(attempt != ACK_PING);
            let mut rng = SequenceRng::new(&[0]);
            let reduction = reduce(&StatusEvent::new(attempt, status), &mut rng);
            prop_assert!(!matches!(reduction, Reduction::Status(StatusOutcome::Unknown)));
            prop_assert!(matches!(reduction, Reduction::Status(_)));
        }

        #[test]
        fn prop_ack_ignores_status(status in any::<u16>(), seed in any::<u32>()) {
            let mut a = SeededRng(seed);
            let mut b = SeededRng(seed);
            let first = reduce(&StatusEvent::new(ACK_PING, status), &mut a);
            let second = reduce(&StatusEvent::new(ACK_PING, 0), &mut b);
            prop_assert_eq!(first, second);
            match first {
                Reduction::Ack { palette_index, .. } => {
                    prop_assert!(palette_index < STRONG_PALETTE.len())
                }
                Reduction::Status(_) => prop_assert!(false, "ack reduced to a status"),
            }
        }
    }

    /// xorshift32 generator for property tests
    pub(crate) struct SeededRng(pub u32);

    impl RngCore for SeededRng {
        fn next_u32(&mut self) -> u32 {
            let mut x = self.0 | 1;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }

        fn next_u64(&mut self) -> u64 {
            ((self.next_u32() as u64) << 32) | self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }
}
