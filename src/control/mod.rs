pub mod swar;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub mod sse2;

cfg_if::cfg_if! {
    if #[cfg(all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse2",
        not(feature = "swar")
    ))] {
        pub type DefaultControl = sse2::Sse2;
    } else {
        pub type DefaultControl = swar::Swar;
    }
}

/// Set of flagged slots in one group, yielded lowest slot first.
///
/// Each slot owns `1 << shift` bits and is flagged by any bit in that range: the SWAR block uses
/// the high bit of each byte, the SSE2 block one bit per slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitMask {
    bits: u64,
    shift: u32,
}

impl BitMask {
    #[inline(always)]
    pub(crate) fn new(bits: u64, shift: u32) -> Self {
        Self { bits, shift }
    }
    #[inline(always)]
    pub fn any(&self) -> bool {
        self.bits != 0
    }
    #[inline(always)]
    pub fn lowest(&self) -> Option<usize> {
        if self.bits == 0 {
            None
        } else {
            Some((self.bits.trailing_zeros() >> self.shift) as usize)
        }
    }
}

impl Iterator for BitMask {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        let index = self.lowest()?;
        self.bits &= self.bits - 1;
        Some(index)
    }
}
