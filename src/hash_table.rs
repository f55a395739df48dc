//! An open-addressing hash table with linear probing and backward-shift
//! deletion.
//!
//! [`HashTable`] resolves collisions by probing forward from a key's home
//! slot (`hash % capacity`) with wraparound. Removal repairs the probe chain
//! in place by shifting displaced entries back towards their home slots, so
//! the table carries no tombstones and lookups can stop as soon as a chain
//! provably ends.

use alloc::vec::Vec;

use crate::error::Error;

/// Initial slot count for tables created with [`HashTable::new`].
const DEFAULT_CAPACITY: usize = 32;

/// Growth retries before a failed placement is reported as an invariant
/// violation.
const GROW_ATTEMPTS: usize = 3;

/// The hash capability injected into a [`HashTable`] at construction.
///
/// Implementations must be pure and deterministic: equal keys always produce
/// equal hashes, and the function must be defined for every key the table
/// will receive. The table caches each key's hash at insertion and relies on
/// it never changing afterwards.
///
/// The crate ships [`Fnv1a64`](crate::fnv::Fnv1a64) for byte-sequence keys
/// and [`BuildHasherFn`](crate::hash_map::BuildHasherFn) for keys that
/// implement [`core::hash::Hash`].
pub trait HashFn<K: ?Sized> {
    /// Hashes `key` to a 64-bit value.
    fn hash_key(&self, key: &K) -> u64;
}

/// An occupied slot in a [`HashTable`]: a key, its value, and the key's
/// cached hash.
#[derive(Clone, Debug)]
pub struct Entry<K, V> {
    hash: u64,
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Returns the entry's key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the entry's value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns a mutable reference to the entry's value.
    ///
    /// The key is not mutably exposed: a key mutated in place would no
    /// longer match its cached hash.
    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Returns the hash cached for the entry's key at insertion time.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

/// Walks the probe sequence for `hash` through `slots`.
///
/// Returns the slot holding a matching hash, or, when `allow_empty` is set,
/// the first empty slot on the walk (the insertion position). Returns `None`
/// when the walk proves the hash absent: it reached an empty slot without
/// `allow_empty`, it reached an occupant sitting in its own home slot (no
/// chain continues past one, except at the query's own home), or it wrapped
/// the entire array.
fn probe<T>(
    slots: &[Option<T>],
    hash_of: impl Fn(&T) -> u64,
    hash: u64,
    allow_empty: bool,
) -> Option<usize> {
    let capacity = slots.len() as u64;
    let home = (hash % capacity) as usize;
    let mut slot = home;
    loop {
        match &slots[slot] {
            None => return allow_empty.then_some(slot),
            Some(occupant) => {
                let occupant_hash = hash_of(occupant);
                if occupant_hash == hash {
                    return Some(slot);
                }
                // A correctly-homed occupant ends every chain passing through
                // it. Exempt the query's own home slot: the queried key may
                // have been displaced from exactly there.
                if slot != home && (occupant_hash % capacity) as usize == slot {
                    return None;
                }
            }
        }
        slot = (slot + 1) % capacity as usize;
        if slot == home {
            // Wrapped the whole array. Unreachable while the load factor
            // bound holds; treated as a miss rather than looping forever.
            return None;
        }
    }
}

/// An open-addressing hash table with an injected hash function.
///
/// `HashTable<K, V, H>` owns its keys and values and places each entry by
/// `hash % capacity`, probing linearly forward on collision. When an insert
/// would push the occupancy above the configured load factor, the slot array
/// doubles and every entry is re-placed against the new modulus.
///
/// Removal restores the probing invariant without tombstones: starting from
/// the freed slot, displaced entries are shifted back one slot at a time
/// until an empty slot or a correctly-homed entry ends the chain. Every
/// surviving key stays reachable by a pure forward walk from its home slot.
///
/// # Hash equality is key equality
///
/// Entries are compared by their cached 64-bit hash only. If the supplied
/// [`HashFn`] maps two distinct keys to the same hash, the table treats them
/// as the same key: inserting the second overwrites the first, and a lookup
/// for either returns whichever was stored last. Use a hash function that is
/// collision-free over your actual key domain.
///
/// # Concurrency
///
/// The table performs no internal synchronization and assumes a single
/// exclusive owner; this is expressed through the `&mut self` receivers.
/// Layer a lock on top if it must be shared.
///
/// # Example
///
/// ```rust
/// use probe_hash::fnv::Fnv1a64;
/// use probe_hash::hash_table::HashTable;
///
/// let mut table: HashTable<&str, u32, _> = HashTable::new(Fnv1a64, 0.8)?;
///
/// table.insert("hello", 1)?;
/// assert_eq!(table.get(&"hello").map(|e| *e.value()), Some(1));
///
/// table.remove(&"hello");
/// assert!(table.is_empty());
/// # Ok::<(), probe_hash::Error>(())
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, H> {
    hash_fn: H,
    load_factor: f64,
    slots: Vec<Option<Entry<K, V>>>,
    len: usize,
}

impl<K, V, H> HashTable<K, V, H>
where
    H: HashFn<K>,
{
    /// Creates an empty table with the default capacity of 32 slots.
    ///
    /// `hash_fn` is fixed for the table's lifetime. `load_factor` is the
    /// occupancy fraction above which the table grows; higher values save
    /// memory at the cost of longer probe chains.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocFailed`] when the slot array cannot be
    /// allocated.
    ///
    /// # Panics
    ///
    /// Panics when `load_factor` is outside `(0, 1]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::fnv::Fnv1a64;
    /// use probe_hash::hash_table::HashTable;
    ///
    /// let table: HashTable<&str, u32, _> = HashTable::new(Fnv1a64, 0.8)?;
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 32);
    /// # Ok::<(), probe_hash::Error>(())
    /// ```
    pub fn new(hash_fn: H, load_factor: f64) -> Result<Self, Error> {
        Self::with_capacity(DEFAULT_CAPACITY, hash_fn, load_factor)
    }

    /// Creates an empty table with `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocFailed`] when the slot array cannot be
    /// allocated.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero or `load_factor` is outside `(0, 1]`.
    pub fn with_capacity(capacity: usize, hash_fn: H, load_factor: f64) -> Result<Self, Error> {
        assert!(capacity > 0, "capacity must be non-zero");
        assert!(
            load_factor > 0.0 && load_factor <= 1.0,
            "load factor must be in (0, 1]"
        );
        Ok(HashTable {
            hash_fn,
            load_factor,
            slots: Self::allocate(capacity)?,
            len: 0,
        })
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current slot count.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the configured load factor.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the table's hash function.
    #[inline]
    pub fn hash_fn(&self) -> &H {
        &self.hash_fn
    }

    /// Returns the entry for `key`, if present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::fnv::Fnv1a64;
    /// use probe_hash::hash_table::HashTable;
    ///
    /// let mut table = HashTable::new(Fnv1a64, 0.8)?;
    /// table.insert("hello", 1)?;
    ///
    /// let entry = table.get(&"hello").unwrap();
    /// assert_eq!(*entry.key(), "hello");
    /// assert_eq!(*entry.value(), 1);
    /// assert!(table.get(&"absent").is_none());
    /// # Ok::<(), probe_hash::Error>(())
    /// ```
    pub fn get(&self, key: &K) -> Option<&Entry<K, V>> {
        let hash = self.hash_fn.hash_key(key);
        let slot = probe(&self.slots, Entry::hash, hash, false)?;
        self.slots[slot].as_ref()
    }

    /// Returns the entry for `key` with a mutable value, if present.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut Entry<K, V>> {
        let hash = self.hash_fn.hash_key(key);
        let slot = probe(&self.slots, Entry::hash, hash, false)?;
        self.slots[slot].as_mut()
    }

    /// Returns `true` if the table holds an entry for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `key` / `value`, growing the table first when the insert
    /// would push occupancy above the load factor.
    ///
    /// Returns the previous value when an entry with the same hash already
    /// existed (the write is an in-place update), `None` when a new entry
    /// was created.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocFailed`] or [`Error::CapacityOverflow`] when
    /// growth cannot allocate, and [`Error::InvariantViolation`] when no
    /// slot can be found even after bounded retried growth. The latter is
    /// unreachable with a deterministic hash function and indicates prior
    /// misuse; the table's existing entries are left intact, but `key` and
    /// `value` are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::fnv::Fnv1a64;
    /// use probe_hash::hash_table::HashTable;
    ///
    /// let mut table = HashTable::new(Fnv1a64, 0.8)?;
    /// assert_eq!(table.insert("hello", 1)?, None);
    /// assert_eq!(table.insert("hello", 2)?, Some(1));
    /// assert_eq!(table.len(), 1);
    /// # Ok::<(), probe_hash::Error>(())
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        let hash = self.hash_fn.hash_key(&key);
        if self.over_load_limit(self.len + 1) {
            self.grow()?;
        }

        let mut slot = probe(&self.slots, Entry::hash, hash, true);
        let mut retries = 0;
        while slot.is_none() && retries < GROW_ATTEMPTS {
            // The walk ended at a correctly-homed occupant or wrapped the
            // whole array without an opening. Growth changes every home slot
            // and normally creates one.
            self.grow()?;
            slot = probe(&self.slots, Entry::hash, hash, true);
            retries += 1;
        }
        let Some(slot) = slot else {
            return Err(Error::InvariantViolation);
        };

        match self.slots[slot].replace(Entry { hash, key, value }) {
            Some(previous) => Ok(Some(previous.value)),
            None => {
                self.len += 1;
                Ok(None)
            }
        }
    }

    /// Removes the entry for `key`, returning its key and value.
    ///
    /// Returns `None` without side effects when the key is absent. On a hit,
    /// the freed slot starts a chain repair: entries displaced past it are
    /// shifted back one slot at a time until an empty slot or a
    /// correctly-homed entry ends the chain, so every remaining key stays
    /// reachable by forward probing with no tombstones left behind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::fnv::Fnv1a64;
    /// use probe_hash::hash_table::HashTable;
    ///
    /// let mut table = HashTable::new(Fnv1a64, 0.8)?;
    /// table.insert("hello", 1)?;
    ///
    /// assert_eq!(table.remove(&"hello"), Some(("hello", 1)));
    /// assert_eq!(table.remove(&"hello"), None);
    /// # Ok::<(), probe_hash::Error>(())
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash_fn.hash_key(key);
        let slot = probe(&self.slots, Entry::hash, hash, false)?;
        let entry = self.slots[slot].take()?;
        self.len -= 1;
        self.repair_chain(slot);
        Some((entry.key, entry.value))
    }

    /// Removes every entry, keeping the allocated capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.len = 0;
    }

    /// Iterates over the table's entries as `(&key, &value)` pairs.
    ///
    /// The order is unspecified and changes as the table grows.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    #[inline]
    fn over_load_limit(&self, len: usize) -> bool {
        len as f64 > self.load_factor * self.slots.len() as f64
    }

    fn allocate(capacity: usize) -> Result<Vec<Option<Entry<K, V>>>, Error> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| Error::AllocFailed)?;
        slots.resize_with(capacity, || None);
        Ok(slots)
    }

    /// Doubles the slot array and re-places every entry against the new
    /// modulus, reusing the cached hashes.
    ///
    /// The migration is planned against a hash-only image of the new array
    /// first, so the table keeps its current slots untouched until the whole
    /// plan is known to fit; a blocked placement retries with a further
    /// doubling. The visible swap happens once, after planning succeeds.
    fn grow(&mut self) -> Result<(), Error> {
        let mut new_cap = self
            .slots
            .len()
            .checked_mul(2)
            .ok_or(Error::CapacityOverflow)?;

        'attempt: for _ in 0..GROW_ATTEMPTS {
            let mut image: Vec<Option<u64>> = Vec::new();
            image
                .try_reserve_exact(new_cap)
                .map_err(|_| Error::AllocFailed)?;
            image.resize(new_cap, None);

            let mut plan = Vec::new();
            plan.try_reserve_exact(self.len)
                .map_err(|_| Error::AllocFailed)?;

            for entry in self.slots.iter().flatten() {
                match probe(&image, |hash| *hash, entry.hash, true) {
                    Some(slot) => {
                        image[slot] = Some(entry.hash);
                        plan.push(slot);
                    }
                    None => {
                        new_cap = new_cap.checked_mul(2).ok_or(Error::CapacityOverflow)?;
                        continue 'attempt;
                    }
                }
            }

            let mut new_slots = Self::allocate(new_cap)?;
            let entries = self.slots.iter_mut().filter_map(Option::take);
            for (entry, slot) in entries.zip(plan) {
                new_slots[slot] = Some(entry);
            }
            self.slots = new_slots;
            return Ok(());
        }

        Err(Error::InvariantViolation)
    }

    /// Backward-shift repair starting at a freed slot.
    ///
    /// Walks forward from `freed`; any occupant found displaced from its
    /// home slot is moved back into the hole, and the repair continues from
    /// the slot it vacated. An empty slot, a correctly-homed occupant, or a
    /// full wrap ends the chain.
    fn repair_chain(&mut self, freed: usize) {
        let capacity = self.slots.len() as u64;
        let origin = freed;
        let mut freed = freed;
        loop {
            let next = (freed + 1) % capacity as usize;
            if next == origin {
                break;
            }
            let home = match &self.slots[next] {
                None => break,
                Some(entry) => (entry.hash % capacity) as usize,
            };
            if home == next {
                break;
            }
            self.slots[freed] = self.slots[next].take();
            freed = next;
        }
    }

    /// Exposes raw slot placement so tests can assert probe positions.
    #[cfg(test)]
    fn key_at(&self, slot: usize) -> Option<&K> {
        self.slots[slot].as_ref().map(Entry::key)
    }
}

impl<K, V, H> core::fmt::Debug for HashTable<K, V, H>
where
    K: core::fmt::Debug,
    V: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for entry in self.slots.iter().flatten() {
            map.entry(&entry.key, &entry.value);
        }
        map.finish()
    }
}

/// An iterator over a table's `(&key, &value)` pairs in unspecified order.
pub struct Iter<'a, K, V> {
    inner: core::slice::Iter<'a, Option<Entry<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.inner.by_ref() {
            if let Some(entry) = slot {
                return Some((&entry.key, &entry.value));
            }
        }
        None
    }
}
