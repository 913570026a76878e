//! Fixed-capacity Swiss table.
//!
//! Slots are clustered into groups, each with a control block holding one metadata byte per slot:
//! `0x80` for an empty slot, or the low 7 bits of the key's hash for an occupied one. Lookups and
//! inserts match a whole control block at once and only compare keys in the flagged slots.
//!
//! The capacity is fixed at construction. There is no growth, deletion, or iteration. Callers
//! must size the table so occupancy stays below 100% (in practice below ~87.5%).

pub mod control;
pub mod error;
pub mod hash;
pub mod hashtable;
pub mod probe;
pub mod traits;

mod table;

pub use control::{BitMask, DefaultControl};
pub use error::Error;
pub use hash::KeyedHasher;
pub use hashtable::SwissTable;
pub use traits::Control;
