#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Error values reported by table construction, insertion, and growth.
pub mod error;

/// FNV-1 and FNV-1a byte hashing, 32- and 64-bit variants.
///
/// This module provides the ready-made hash functions shipped with the crate,
/// in both single-buffer and incremental (multi-chunk) forms, along with a
/// streaming [`core::hash::Hasher`] implementation.
pub mod fnv;

/// A hash map keyed by the standard `Hash`/`BuildHasher` traits.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with configurable hashers.
pub mod hash_map;

pub mod hash_table;

pub use error::Error;
pub use hash_map::HashMap;
pub use hash_table::Entry;
pub use hash_table::HashFn;
pub use hash_table::HashTable;
