use crate::control::BitMask;
use crate::traits::Control;

#[cfg(target_arch = "x86")]
use std::arch::x86::{__m128i, _mm_cmpeq_epi8, _mm_load_si128, _mm_movemask_epi8, _mm_set1_epi8};
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::{
    __m128i, _mm_cmpeq_epi8, _mm_load_si128, _mm_movemask_epi8, _mm_set1_epi8,
};

/// Control block matched with SSE2 compares: 16 lanes, one mask bit per slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct Sse2([u8; 16]);

impl Sse2 {
    #[inline(always)]
    fn load(&self) -> __m128i {
        //  Safety:
        //  -   `self.0` is 16 bytes and the struct is 16-byte aligned.
        //  -   SSE2 is enabled for this target.
        unsafe { _mm_load_si128(self.0.as_ptr() as *const __m128i) }
    }
    #[inline(always)]
    fn compare(&self, needle: __m128i) -> u64 {
        //  Safety:
        //  -   SSE2 is enabled for this target.
        let bits = unsafe { _mm_movemask_epi8(_mm_cmpeq_epi8(self.load(), needle)) };
        bits as u16 as u64
    }
}

impl Control for Sse2 {
    const WIDTH: usize = 16;

    type Broadcast = __m128i;

    type Slots<T> = [T; 16];

    #[inline(always)]
    fn empty() -> Self {
        Sse2([Self::EMPTY; 16])
    }

    #[inline(always)]
    fn broadcast(h1: u8) -> __m128i {
        debug_assert!(h1 < Self::EMPTY);
        //  Safety:
        //  -   SSE2 is enabled for this target.
        unsafe { _mm_set1_epi8(h1 as i8) }
    }

    #[inline(always)]
    fn match_byte(&self, needle: __m128i) -> BitMask {
        BitMask::new(self.compare(needle), 0)
    }

    #[inline(always)]
    fn match_empty(&self) -> BitMask {
        //  Safety:
        //  -   SSE2 is enabled for this target.
        let empty = unsafe { _mm_set1_epi8(Self::EMPTY as i8) };
        BitMask::new(self.compare(empty), 0)
    }

    #[inline(always)]
    fn match_full(&self) -> BitMask {
        //  Safety:
        //  -   SSE2 is enabled for this target.
        let high = unsafe { _mm_movemask_epi8(self.load()) };
        BitMask::new(!(high as u16) as u64, 0)
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: u8) {
        self.0[index] = value;
    }

    #[inline(always)]
    fn slots<T>(f: impl FnMut(usize) -> T) -> [T; 16] {
        std::array::from_fn(f)
    }
}
