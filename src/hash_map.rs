use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::error::Error;
use crate::hash_table::HashFn;
use crate::hash_table::HashTable;
use crate::hash_table::Iter;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The default hash builder for [`HashMap`].
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else {
        /// The default hash builder for [`HashMap`].
        ///
        /// Without the `foldhash` feature the map falls back to FNV-1a,
        /// which is deterministic across processes and offers no protection
        /// against hash flooding.
        pub type DefaultHashBuilder = crate::fnv::FnvBuildHasher;
    }
}

/// Occupancy fraction above which the underlying table grows.
const DEFAULT_LOAD_FACTOR: f64 = 0.8;

/// Adapts a [`BuildHasher`] into the [`HashFn`] capability, so keys that
/// implement [`Hash`] can drive a [`HashTable`](crate::hash_table::HashTable).
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildHasherFn<S> {
    build: S,
}

impl<S> BuildHasherFn<S> {
    /// Wraps `build`.
    pub fn new(build: S) -> Self {
        Self { build }
    }
}

impl<K, S> HashFn<K> for BuildHasherFn<S>
where
    K: Hash,
    S: BuildHasher,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self.build.hash_one(key)
    }
}

/// A hash map over the open-addressing [`HashTable`], keyed by the standard
/// [`Hash`] trait with a configurable hasher builder.
///
/// Like the table it wraps, the map compares entries by their 64-bit hash:
/// two keys hashing to the same value are treated as the same key. With the
/// default 64-bit randomized hasher this is the usual practical contract of
/// a hash-keyed container, but it is worth knowing when plugging in a weak
/// or truncated hasher.
///
/// Constructors return `Result` because the backing slot array is allocated
/// up front.
///
/// # Examples
///
/// ```rust
/// use probe_hash::HashMap;
///
/// let mut map: HashMap<&str, u32> = HashMap::new()?;
/// map.insert("hello", 1)?;
///
/// assert_eq!(map.get(&"hello"), Some(&1));
/// assert_eq!(map.remove(&"hello"), Some(1));
/// assert!(map.is_empty());
/// # Ok::<(), probe_hash::Error>(())
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<K, V, BuildHasherFn<S>>,
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash,
    S: BuildHasher + Default,
{
    /// Creates an empty map with the default capacity and hasher builder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocFailed`] when the slot array cannot be
    /// allocated.
    pub fn new() -> Result<Self, Error> {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash,
    S: BuildHasher,
{
    /// Creates an empty map with the given hasher builder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocFailed`] when the slot array cannot be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    /// use probe_hash::fnv::FnvBuildHasher;
    ///
    /// let mut map: HashMap<u64, &str, _> = HashMap::with_hasher(FnvBuildHasher)?;
    /// map.insert(1, "one")?;
    /// assert_eq!(map.get(&1), Some(&"one"));
    /// # Ok::<(), probe_hash::Error>(())
    /// ```
    pub fn with_hasher(hash_builder: S) -> Result<Self, Error> {
        Ok(Self {
            table: HashTable::new(BuildHasherFn::new(hash_builder), DEFAULT_LOAD_FACTOR)?,
        })
    }

    /// Creates an empty map with `capacity` slots and the given hasher
    /// builder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocFailed`] when the slot array cannot be
    /// allocated.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Result<Self, Error> {
        Ok(Self {
            table: HashTable::with_capacity(
                capacity,
                BuildHasherFn::new(hash_builder),
                DEFAULT_LOAD_FACTOR,
            )?,
        })
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the current slot count of the backing table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.table.hash_fn().build
    }

    /// Inserts a key-value pair into the map.
    ///
    /// Returns the previous value when the key (by hash) was already
    /// present, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Propagates the underlying table's growth errors; see
    /// [`HashTable::insert`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    ///
    /// let mut map: HashMap<u32, &str> = HashMap::new()?;
    /// assert_eq!(map.insert(37, "a")?, None);
    /// assert_eq!(map.insert(37, "b")?, Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// # Ok::<(), probe_hash::Error>(())
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        self.table.insert(key, value)
    }

    /// Returns a reference to the value for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table.get(key).map(|entry| entry.value())
    }

    /// Returns a mutable reference to the value for `key`, if present.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.table.get_mut(key).map(|entry| entry.value_mut())
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.table.contains(key)
    }

    /// Removes `key` from the map, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.table.remove(key).map(|(_, value)| value)
    }

    /// Removes all entries, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Iterates over the map's `(&key, &value)` pairs in unspecified order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug + Hash,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}
