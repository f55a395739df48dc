use core::hash::BuildHasher;
use core::hash::Hasher;

use crate::hash_table::HashFn;

/// Initial hash value for the 32-bit FNV variants.
pub const FNV_OFFSET_BASIS_32: u32 = 0x811c_9dc5;
/// Initial hash value for the 64-bit FNV variants.
pub const FNV_OFFSET_BASIS_64: u64 = 0xcbf2_9ce4_8422_2325;
/// Multiplier for the 32-bit FNV variants.
pub const FNV_PRIME_32: u32 = 0x0100_0193;
/// Multiplier for the 64-bit FNV variants.
pub const FNV_PRIME_64: u64 = 0x0000_0100_0000_01b3;

/// Continues a 32-bit FNV-1 hash over `bytes`, starting from `hash`.
///
/// Use this form to hash input that arrives in multiple chunks; seed the
/// first call with [`FNV_OFFSET_BASIS_32`], or use [`fnv1_32`] for a single
/// buffer.
#[inline]
pub fn fnv1_32_incr(hash: u32, bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(hash, |h, &b| h.wrapping_mul(FNV_PRIME_32) ^ u32::from(b))
}

/// Computes the 32-bit FNV-1 hash of `bytes`.
#[inline]
pub fn fnv1_32(bytes: &[u8]) -> u32 {
    fnv1_32_incr(FNV_OFFSET_BASIS_32, bytes)
}

/// Continues a 64-bit FNV-1 hash over `bytes`, starting from `hash`.
///
/// Use this form to hash input that arrives in multiple chunks; seed the
/// first call with [`FNV_OFFSET_BASIS_64`], or use [`fnv1_64`] for a single
/// buffer.
#[inline]
pub fn fnv1_64_incr(hash: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(hash, |h, &b| h.wrapping_mul(FNV_PRIME_64) ^ u64::from(b))
}

/// Computes the 64-bit FNV-1 hash of `bytes`.
#[inline]
pub fn fnv1_64(bytes: &[u8]) -> u64 {
    fnv1_64_incr(FNV_OFFSET_BASIS_64, bytes)
}

/// Continues a 32-bit FNV-1a hash over `bytes`, starting from `hash`.
///
/// FNV-1a xors each byte before multiplying, which gives it better avalanche
/// characteristics than FNV-1. Seed the first call with
/// [`FNV_OFFSET_BASIS_32`], or use [`fnv1a_32`] for a single buffer.
#[inline]
pub fn fnv1a_32_incr(hash: u32, bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(hash, |h, &b| (h ^ u32::from(b)).wrapping_mul(FNV_PRIME_32))
}

/// Computes the 32-bit FNV-1a hash of `bytes`.
#[inline]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    fnv1a_32_incr(FNV_OFFSET_BASIS_32, bytes)
}

/// Continues a 64-bit FNV-1a hash over `bytes`, starting from `hash`.
///
/// FNV-1a xors each byte before multiplying, which gives it better avalanche
/// characteristics than FNV-1. Seed the first call with
/// [`FNV_OFFSET_BASIS_64`], or use [`fnv1a_64`] for a single buffer.
#[inline]
pub fn fnv1a_64_incr(hash: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(hash, |h, &b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME_64))
}

/// Computes the 64-bit FNV-1a hash of `bytes`.
///
/// # Examples
///
/// ```rust
/// use probe_hash::fnv::fnv1a_64;
///
/// assert_eq!(fnv1a_64(b"hello world"), 8618312879776256743);
/// ```
#[inline]
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    fnv1a_64_incr(FNV_OFFSET_BASIS_64, bytes)
}

/// A ready-made [`HashFn`] hashing byte-sequence keys with 64-bit FNV-1a.
///
/// Works for any key type that exposes its bytes via `AsRef<[u8]>`, such as
/// `&str`, `String`, and `Vec<u8>`.
///
/// # Examples
///
/// ```rust
/// use probe_hash::fnv::Fnv1a64;
/// use probe_hash::hash_table::HashTable;
///
/// let mut table: HashTable<String, u32, _> = HashTable::new(Fnv1a64, 0.8)?;
/// table.insert("hello".to_string(), 1)?;
/// assert!(table.contains(&"hello".to_string()));
/// # Ok::<(), probe_hash::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Fnv1a64;

impl<K> HashFn<K> for Fnv1a64
where
    K: AsRef<[u8]>,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        fnv1a_64(key.as_ref())
    }
}

/// A streaming [`Hasher`] built on the incremental 64-bit FNV-1a form.
///
/// The running state starts at [`FNV_OFFSET_BASIS_64`] and folds in every
/// written byte, so hashing a value in one `write` or several produces the
/// same result.
#[derive(Clone, Copy, Debug)]
pub struct Fnv1a64Hasher {
    state: u64,
}

impl Default for Fnv1a64Hasher {
    #[inline]
    fn default() -> Self {
        Fnv1a64Hasher {
            state: FNV_OFFSET_BASIS_64,
        }
    }
}

impl Hasher for Fnv1a64Hasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.state = fnv1a_64_incr(self.state, bytes);
    }
}

/// A [`BuildHasher`] producing [`Fnv1a64Hasher`]s.
///
/// FNV is deterministic across processes, so this builder offers no
/// protection against hash-flooding; prefer the `foldhash` default when
/// keys may be adversarial.
#[derive(Clone, Copy, Debug, Default)]
pub struct FnvBuildHasher;

impl BuildHasher for FnvBuildHasher {
    type Hasher = Fnv1a64Hasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        Fnv1a64Hasher::default()
    }
}
