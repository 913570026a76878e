use crate::control::BitMask;
use crate::traits::Control;

const LSB: u64 = 0x0101_0101_0101_0101;
const LOW: u64 = 0x7f7f_7f7f_7f7f_7f7f;
const MSB: u64 = 0x8080_8080_8080_8080;

/// Portable control block: 8 bytes packed into a `u64`, slot 0 in the least significant byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, align(8))]
pub struct Swar([u8; 8]);

impl Swar {
    #[inline(always)]
    fn word(&self) -> u64 {
        u64::from_le_bytes(self.0)
    }
}

impl Control for Swar {
    const WIDTH: usize = 8;

    type Broadcast = u64;

    type Slots<T> = [T; 8];

    #[inline(always)]
    fn empty() -> Self {
        Swar([Self::EMPTY; 8])
    }

    #[inline(always)]
    fn broadcast(h1: u8) -> u64 {
        debug_assert!(h1 < Self::EMPTY);
        h1 as u64 * LSB
    }

    #[inline(always)]
    fn match_byte(&self, needle: u64) -> BitMask {
        // Equal lanes are zero after the xor. Adding 0x7f to the low 7 bits carries into the high
        // bit of every non-zero lane without ever crossing into the next lane.
        let x = self.word() ^ needle;
        let zero = !(((x & LOW) + LOW) | x) & MSB;
        BitMask::new(zero, 3)
    }

    #[inline(always)]
    fn match_empty(&self) -> BitMask {
        BitMask::new(self.word() & MSB, 3)
    }

    #[inline(always)]
    fn match_full(&self) -> BitMask {
        BitMask::new(!self.word() & MSB, 3)
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: u8) {
        self.0[index] = value;
    }

    #[inline(always)]
    fn slots<T>(f: impl FnMut(usize) -> T) -> [T; 8] {
        std::array::from_fn(f)
    }
}
