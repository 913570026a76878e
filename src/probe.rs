/// Triangular probe sequence over group indices.
///
/// Offsets advance by 1, 2, 3, ... so the sequence is `h, h+1, h+3, h+6, h+10, ...` modulo the
/// group count. With a power-of-two group count this visits every group exactly once in the first
/// `mask + 1` positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeSeq {
    mask: usize,
    offset: usize,
    index: usize,
}

impl ProbeSeq {
    /// `mask` is the group count minus one.
    #[inline(always)]
    pub fn start(hash: u64, mask: usize) -> Self {
        debug_assert!(mask.wrapping_add(1).is_power_of_two());
        Self {
            mask,
            offset: hash as usize & mask,
            index: 0,
        }
    }
    #[inline(always)]
    pub fn current(&self) -> usize {
        self.offset
    }
    #[inline(always)]
    pub fn advance(mut self) -> Self {
        self.index += 1;
        self.offset = (self.offset + self.index) & self.mask;
        self
    }
}
