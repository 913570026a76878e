use crate::error::Error;
use crate::probe::ProbeSeq;
use crate::traits::Control;
use std::borrow::Borrow;
use std::mem::MaybeUninit;

pub(crate) struct Slot<K, V> {
    pub(crate) key: MaybeUninit<K>,
    pub(crate) val: MaybeUninit<V>,
}

impl<K, V> Slot<K, V> {
    #[inline(always)]
    fn uninit() -> Self {
        Self {
            key: MaybeUninit::uninit(),
            val: MaybeUninit::uninit(),
        }
    }
}

/// Slot `i` is initialized iff control byte `i` is not `EMPTY`.
pub(crate) struct Group<K, V, C: Control> {
    pub(crate) ctrl: C,
    pub(crate) slots: C::Slots<Slot<K, V>>,
}

impl<K, V, C: Control> Group<K, V, C> {
    fn new() -> Self {
        Self {
            ctrl: C::empty(),
            slots: C::slots(|_| Slot::uninit()),
        }
    }
}

/// Splits a hash into the 7-bit control residual and the probe seed.
#[inline(always)]
pub(crate) fn split(hash: u64) -> (u8, u64) {
    ((hash & 0x7f) as u8, hash >> 7)
}

pub(crate) struct RawTable<K, V, C: Control> {
    groups: Box<[Group<K, V, C>]>,
}

impl<K, V, C: Control> RawTable<K, V, C> {
    /// `groups` must be a power of two.
    pub fn new(groups: usize) -> Self {
        debug_assert!(groups.is_power_of_two());
        Self {
            groups: (0..groups).map(|_| Group::new()).collect(),
        }
    }
    pub fn groups(&self) -> usize {
        self.groups.len()
    }
    pub fn capacity(&self) -> usize {
        self.groups.len() * C::WIDTH
    }
    /// Returns the group and slot holding `key`.
    ///
    /// At most every group is visited once, so a full table without `key` yields `None`.
    #[inline(always)]
    fn find<Q>(&self, key: &Q, hash: u64) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let (h1, h2) = split(hash);
        let needle = C::broadcast(h1);
        let mut seq = ProbeSeq::start(h2, self.groups.len() - 1);
        for _ in 0..self.groups.len() {
            let group = &self.groups[seq.current()];
            for i in group.ctrl.match_byte(needle) {
                //  Safety:
                //  -   The control byte of slot `i` is `h1`, so the slot is occupied.
                let stored = unsafe { group.slots.as_ref()[i].key.assume_init_ref() };
                if stored.borrow() == key {
                    return Some((seq.current(), i));
                }
            }
            if group.ctrl.match_empty().any() {
                return None;
            }
            seq = seq.advance();
        }
        None
    }
    pub fn get_with_hash<Q>(&self, key: &Q, hash: u64) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let (g, i) = self.find(key, hash)?;
        //  Safety:
        //  -   `find` only returns occupied slots.
        Some(unsafe { self.groups[g].slots.as_ref()[i].val.assume_init_ref() })
    }
    pub fn get_with_hash_mut<Q>(&mut self, key: &Q, hash: u64) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let (g, i) = self.find(key, hash)?;
        //  Safety:
        //  -   `find` only returns occupied slots.
        Some(unsafe { self.groups[g].slots.as_mut()[i].val.assume_init_mut() })
    }
    /// Inserts or updates `key`, returning the previous value on update.
    ///
    /// Fails with `CapacityExceeded` when no group on the probe sequence has a free slot.
    pub fn insert_with_hash(&mut self, key: K, val: V, hash: u64) -> Result<Option<V>, Error>
    where
        K: Eq,
    {
        let (h1, h2) = split(hash);
        let needle = C::broadcast(h1);
        let mut seq = ProbeSeq::start(h2, self.groups.len() - 1);
        for _ in 0..self.groups.len() {
            let group = &mut self.groups[seq.current()];
            for i in group.ctrl.match_byte(needle) {
                let slot = &mut group.slots.as_mut()[i];
                //  Safety:
                //  -   The control byte of slot `i` is `h1`, so the slot is occupied.
                if unsafe { slot.key.assume_init_ref() } == &key {
                    let old = unsafe { slot.val.assume_init_mut() };
                    return Ok(Some(std::mem::replace(old, val)));
                }
            }
            if let Some(i) = group.ctrl.match_empty().lowest() {
                let slot = &mut group.slots.as_mut()[i];
                slot.key.write(key);
                slot.val.write(val);
                group.ctrl.set(i, h1);
                return Ok(None);
            }
            seq = seq.advance();
        }
        Err(Error::CapacityExceeded {
            capacity: self.capacity(),
        })
    }
}

impl<K, V, C: Control> Drop for RawTable<K, V, C> {
    fn drop(&mut self) {
        if std::mem::needs_drop::<K>() || std::mem::needs_drop::<V>() {
            for group in self.groups.iter_mut() {
                for i in group.ctrl.match_full() {
                    let slot = &mut group.slots.as_mut()[i];
                    //  Safety:
                    //  -   Occupied slots are initialized and are never read again.
                    unsafe {
                        slot.key.assume_init_drop();
                        slot.val.assume_init_drop();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{split, RawTable};
    use crate::control::swar::Swar;
    use crate::error::Error;
    use crate::traits::Control;
    use std::rc::Rc;

    // Builds a hash with the given residual and probe seed.
    fn hash(h1: u8, h2: u64) -> u64 {
        (h2 << 7) | h1 as u64
    }

    #[test]
    fn split_hash() {
        assert_eq!(split(0), (0, 0));
        assert_eq!(split(0x7f), (0x7f, 0));
        assert_eq!(split(0x80), (0, 1));
        assert_eq!(split(hash(0x15, 0xabc)), (0x15, 0xabc));
    }

    #[test]
    fn same_residual_different_groups() {
        let mut table = RawTable::<u64, &str, Swar>::new(8);
        assert_eq!(table.insert_with_hash(1, "one", hash(5, 0)), Ok(None));
        assert_eq!(table.insert_with_hash(2, "two", hash(5, 3)), Ok(None));
        assert_eq!(table.get_with_hash(&1, hash(5, 0)), Some(&"one"));
        assert_eq!(table.get_with_hash(&2, hash(5, 3)), Some(&"two"));
        assert_eq!(table.get_with_hash(&3, hash(5, 0)), None);
    }

    #[test]
    fn same_residual_same_group() {
        let mut table = RawTable::<u64, u64, Swar>::new(8);
        for key in 0..5 {
            assert_eq!(table.insert_with_hash(key, key * 10, hash(9, 2)), Ok(None));
        }
        for key in 0..5 {
            assert_eq!(table.get_with_hash(&key, hash(9, 2)), Some(&(key * 10)));
        }
        assert_eq!(table.get_with_hash(&5, hash(9, 2)), None);
    }

    #[test]
    fn update_in_place() {
        let mut table = RawTable::<u64, u64, Swar>::new(1);
        assert_eq!(table.insert_with_hash(7, 1, hash(1, 0)), Ok(None));
        assert_eq!(table.insert_with_hash(7, 2, hash(1, 0)), Ok(Some(1)));
        *table.get_with_hash_mut(&7, hash(1, 0)).unwrap() += 40;
        assert_eq!(table.get_with_hash(&7, hash(1, 0)), Some(&42));
        assert_eq!(table.groups[0].ctrl.match_full().count(), 1);
    }

    #[test]
    fn overflow_spills_along_probe_sequence() {
        let mut table = RawTable::<u64, u64, Swar>::new(4);
        // Every key starts at group 1; the ninth lands in group 2.
        for key in 0..9 {
            assert_eq!(table.insert_with_hash(key, key, hash(0, 1)), Ok(None));
        }
        assert_eq!(table.groups[1].ctrl.match_full().count(), Swar::WIDTH);
        assert_eq!(table.groups[2].ctrl.match_full().collect::<Vec<_>>(), vec![0]);
        for key in 0..9 {
            assert_eq!(table.get_with_hash(&key, hash(0, 1)), Some(&key));
        }
    }

    #[test]
    fn full_table_is_bounded() {
        let mut table = RawTable::<u64, u64, Swar>::new(4);
        let capacity = table.capacity();
        for key in 0..capacity as u64 {
            assert_eq!(table.insert_with_hash(key, key, hash(3, key)), Ok(None));
        }
        assert_eq!(
            table.insert_with_hash(u64::MAX, 0, hash(3, 0)),
            Err(Error::CapacityExceeded { capacity })
        );
        assert_eq!(table.get_with_hash(&u64::MAX, hash(3, 0)), None);
        // Updates still succeed once full.
        assert_eq!(table.insert_with_hash(0, 100, hash(3, 0)), Ok(Some(0)));
        for key in 1..capacity as u64 {
            assert_eq!(table.get_with_hash(&key, hash(3, key)), Some(&key));
        }
    }

    #[test]
    fn drops_occupied_slots() {
        let token = Rc::new(());
        {
            let mut table = RawTable::<u64, Rc<()>, Swar>::new(2);
            for key in 0..5 {
                table
                    .insert_with_hash(key, token.clone(), hash(key as u8, key))
                    .unwrap();
            }
            table
                .insert_with_hash(0, token.clone(), hash(0, 0))
                .unwrap();
            // The replaced value is returned and dropped here.
            assert_eq!(Rc::strong_count(&token), 6);
        }
        assert_eq!(Rc::strong_count(&token), 1);
    }
}
