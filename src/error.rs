/// Errors returned by [`SwissTable`](crate::SwissTable).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A table needs at least one group.
    #[error("capacity must be non-zero")]
    ZeroCapacity,
    /// The group count must be a power of two for the probe sequence to cover every group.
    #[error("capacity {0} is not a power of two")]
    CapacityNotPowerOfTwo(usize),
    /// The capacity does not fill a single group.
    #[error("capacity {capacity} is smaller than one group of {width} slots")]
    CapacityTooSmall { capacity: usize, width: usize },
    /// Every group on the probe sequence is full and the key is absent.
    #[error("table is full: no free slot among {capacity} slots")]
    CapacityExceeded { capacity: usize },
}
