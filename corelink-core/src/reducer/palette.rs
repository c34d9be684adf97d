//! Acknowledgement colour palette

use core::num::NonZeroUsize;

use rand_core::RngCore;

use crate::traits::Rgb;

/// Strong, saturated colours shown after an acknowledgement ping
pub const STRONG_PALETTE: [Rgb; 6] = [
    Rgb::new(Rgb::MAX, 0, 0),       // Red
    Rgb::new(0, Rgb::MAX, 0),       // Green
    Rgb::new(0, 0, Rgb::MAX),       // Blue
    Rgb::new(Rgb::MAX, Rgb::MAX, 0), // Yellow
    Rgb::new(Rgb::MAX, 0, Rgb::MAX), // Magenta
    Rgb::new(0, Rgb::MAX, Rgb::MAX), // Cyan
];

/// Number of palette entries
pub(super) const PALETTE_LEN: NonZeroUsize = match NonZeroUsize::new(STRONG_PALETTE.len()) {
    Some(len) => len,
    None => panic!("empty palette"),
};

/// Pick an index uniformly from `0..len`
///
/// Rejection sampling over 32-bit draws, so there is no modulo bias.
pub(super) fn pick_index<R: RngCore>(rng: &mut R, len: NonZeroUsize) -> usize {
    let len = len.get() as u64;
    // Largest multiple of len not exceeding 2^32
    let zone = (1u64 << 32) - (1u64 << 32) % len;

    loop {
        let draw = rng.next_u32() as u64;
        if draw < zone {
            return (draw % len) as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::tests::{SeededRng, SequenceRng};

    #[test]
    fn test_palette_is_saturated() {
        for color in STRONG_PALETTE {
            for channel in [color.r, color.g, color.b] {
                assert!(channel == 0 || channel == Rgb::MAX);
            }
            assert_ne!(color, Rgb::OFF);
        }
    }

    #[test]
    fn test_biased_tail_is_rejected() {
        // 2^32 % 6 == 4, so the four largest draws are rejected
        let mut rng = SequenceRng::new(&[u32::MAX, u32::MAX - 3, 3]);
        assert_eq!(pick_index(&mut rng, PALETTE_LEN), 3);
    }

    #[test]
    fn test_single_entry() {
        let mut rng = SequenceRng::new(&[u32::MAX]);
        assert_eq!(pick_index(&mut rng, NonZeroUsize::MIN), 0);
    }

    #[test]
    fn test_palette_len() {
        assert_eq!(PALETTE_LEN.get(), STRONG_PALETTE.len());
    }

    #[test]
    fn test_every_index_reachable() {
        let mut rng = SeededRng(0x1234_5678);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let index = pick_index(&mut rng, PALETTE_LEN);
            assert!(index < STRONG_PALETTE.len());
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
