//! # Growing Hash Map
//!
//! A small open addressing map from 64-bit element keys to plain values, used by the
//! pattern match vectors and the Damerau-Levenshtein row table.
//!
//! ## Key Features
//! - **Power-of-two capacity**: starts at 8 slots, allocated on the first write.
//! - **Perturbation probing**: `i = (i*5 + perturb + 1) & mask; perturb >>= 5`, so every
//!   bit of the key eventually takes part in the probe sequence.
//! - **Growth at 2/3 load**: the table doubles until it is larger than twice the number of
//!   used slots. Entries are never removed, so there are no tombstones.
//! - **Hybrid variant**: keys below 256 skip hashing entirely and live in a dense array.

/// Capacity of the table after the first insertion.
const MIN_CAPACITY: usize = 8;

/// A slot is either unused or holds a key and its value.
#[derive(Debug, Clone)]
enum Slot<V> {
    Empty,
    Occupied(u64, V),
}

impl<V> Slot<V> {
    fn matches(&self, key: u64) -> bool {
        match self {
            Slot::Empty => true,
            Slot::Occupied(k, _) => *k == key,
        }
    }
}

/// Open addressing map from `u64` keys to values that default to `V::default()`.
#[derive(Debug, Clone)]
pub(crate) struct GrowingHashmap<V> {
    slots: Vec<Slot<V>>,
    used: usize,
}

impl<V> Default for GrowingHashmap<V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            used: 0,
        }
    }
}

impl<V: Clone + Default> GrowingHashmap<V> {
    /// Number of keys stored in the map.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.used
    }

    /// Current number of slots (0 before the first write).
    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the value stored for `key`, or the default value when it is absent.
    pub fn get(&self, key: u64) -> V {
        if self.slots.is_empty() {
            return V::default();
        }

        match &self.slots[self.lookup(key)] {
            Slot::Occupied(_, value) => value.clone(),
            Slot::Empty => V::default(),
        }
    }

    /// Returns a mutable reference to the value for `key`, inserting the default first.
    pub fn get_mut(&mut self, key: u64) -> &mut V {
        if self.slots.is_empty() {
            self.allocate();
        }

        let mut i = self.lookup(key);
        if let Slot::Empty = self.slots[i] {
            // the new entry must fit below the load limit
            if (self.used + 1) * 3 >= self.slots.len() * 2 {
                self.grow((self.used + 1) * 2);
                i = self.lookup(key);
            }
            self.slots[i] = Slot::Occupied(key, V::default());
            self.used += 1;
        }

        match &mut self.slots[i] {
            Slot::Occupied(_, value) => value,
            Slot::Empty => unreachable!("slot was filled above"),
        }
    }

    fn allocate(&mut self) {
        self.slots = vec![Slot::Empty; MIN_CAPACITY];
    }

    /// Finds the slot holding `key` or the empty slot where it belongs.
    fn lookup(&self, key: u64) -> usize {
        let mask = (self.slots.len() - 1) as u64;
        let mut i = key & mask;

        if self.slots[i as usize].matches(key) {
            return i as usize;
        }

        let mut perturb = key;
        loop {
            i = (i.wrapping_mul(5).wrapping_add(perturb).wrapping_add(1)) & mask;
            if self.slots[i as usize].matches(key) {
                return i as usize;
            }
            perturb >>= 5;
        }
    }

    /// Rebuild the table with at least `min_used` slots, re-inserting all entries.
    fn grow(&mut self, min_used: usize) {
        let mut new_size = self.slots.len();
        while new_size <= min_used {
            new_size <<= 1;
        }

        let old_slots = std::mem::replace(&mut self.slots, vec![Slot::Empty; new_size]);
        for slot in old_slots {
            if let Slot::Occupied(key, value) = slot {
                let i = self.lookup(key);
                self.slots[i] = Slot::Occupied(key, value);
            }
        }
    }
}

/// [`GrowingHashmap`] with a dense array in front for keys below 256.
#[derive(Debug, Clone)]
pub(crate) struct HybridGrowingHashmap<V> {
    map: GrowingHashmap<V>,
    extended_ascii: [V; 256],
}

impl<V: Copy + Default> Default for HybridGrowingHashmap<V> {
    fn default() -> Self {
        Self {
            map: GrowingHashmap::default(),
            extended_ascii: [V::default(); 256],
        }
    }
}

impl<V: Copy + Default> HybridGrowingHashmap<V> {
    #[inline]
    pub fn get(&self, key: u64) -> V {
        if key < 256 {
            self.extended_ascii[key as usize]
        } else {
            self.map.get(key)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, key: u64) -> &mut V {
        if key < 256 {
            &mut self.extended_ascii[key as usize]
        } else {
            self.map.get_mut(key)
        }
    }
}
