use crate::control::BitMask;

/// Control block of one group: a metadata byte per slot.
///
/// A byte is either [`EMPTY`](Control::EMPTY) or the 7-bit hash residual `h1` of the key stored in
/// that slot. `match_byte` may only be given values in `0..=0x7F`.
pub trait Control: Copy {
    /// Slots per group.
    const WIDTH: usize;
    const EMPTY: u8 = 0x80;

    /// `h1` replicated across every lane, computed once per operation.
    type Broadcast: Copy;

    /// Slot storage of one group, exactly `WIDTH` long.
    type Slots<T>: AsRef<[T]> + AsMut<[T]>;

    /// A control block with every byte set to `EMPTY`.
    fn empty() -> Self;

    fn broadcast(h1: u8) -> Self::Broadcast;

    /// Flags every slot whose byte equals the broadcast value.
    fn match_byte(&self, needle: Self::Broadcast) -> BitMask;

    /// Flags every slot whose byte is `EMPTY`.
    fn match_empty(&self) -> BitMask;

    /// Flags every occupied slot.
    fn match_full(&self) -> BitMask;

    fn set(&mut self, index: usize, value: u8);

    fn slots<T>(f: impl FnMut(usize) -> T) -> Self::Slots<T>;
}
