//! Entries stored within the heaps and the handles that address them.

/// An immutable key/value pair stored within a heap.
///
/// Entries are created by `insert` and handed back by `min`, `remove_min`
/// and `remove`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    #[inline]
    pub(crate) fn new(key: K, value: V) -> Self {
        Entry {
            key: key,
            value: value,
        }
    }

    /// Returns a reference to the key of this entry.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns a reference to the value of this entry.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Splits this entry into its key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Consumes this entry and returns its value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}

/// A handle to an entry stored within a heap.
///
/// Handles are returned by `insert` and stay valid until their entry
/// leaves the heap, after which every operation using them fails with
/// `Error::StaleHandle`.
///
/// Handles are always local to the heap instance that created them and thus
/// should not be exchanged between different heaps.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: usize,
    serial: u64,
}

impl Handle {
    #[inline]
    pub(crate) fn new(slot: usize, serial: u64) -> Self {
        Handle {
            slot: slot,
            serial: serial,
        }
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self.slot
    }

    #[inline]
    pub(crate) fn serial(self) -> u64 {
        self.serial
    }
}

/// Hands out serial numbers that tell handles to reused arena slots apart.
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct Serials {
    next: u64,
}

impl Serials {
    #[inline]
    pub(crate) fn next(&mut self) -> u64 {
        let serial = self.next;
        self.next += 1;
        serial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_parts() {
        let entry = Entry::new(3, 'c');
        assert_eq!(entry.key(), &3);
        assert_eq!(entry.value(), &'c');
        assert_eq!(entry.clone().into_value(), 'c');
        assert_eq!(entry.into_parts(), (3, 'c'));
    }

    #[test]
    fn serials_are_unique() {
        let mut serials = Serials::default();
        let a = Handle::new(0, serials.next());
        let b = Handle::new(0, serials.next());
        assert_eq!(a.slot(), b.slot());
        assert!(a != b);
        assert_eq!(b.serial(), 1);
    }
}
