//! # probemap
//!
//! A minimal associative container: a hash map using open addressing with
//! linear probing, automatic doubling growth, and nothing else.
//!
//! All entries live directly in a single bucket array. A key hashes to its
//! home slot and, on collision, walks forward one slot at a time (wrapping
//! at the end of the array) until it finds its own key or an empty slot.
//! When three quarters of the array is occupied, the array doubles and every
//! entry is rehashed into the new one.
//!
//! The map is single-threaded by design and does not support deletion; see
//! [`ProbingMap`] for the full contract.
//!
//! ## Basic Usage
//!
//! ```rust
//! use probemap::ProbingMap;
//!
//! // Create a new hash map
//! let mut map = ProbingMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//! assert_eq!(map.get("cherry"), None);
//!
//! // Update values; the previous value is handed back
//! assert_eq!(map.insert("apple".to_string(), 10), Some(1));
//! assert_eq!(map.get("apple"), Some(&10));
//! assert_eq!(map.len(), 2);
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use probemap::ProbingMap;
//!
//! // Any positive capacity works; zero falls back to the default of 16.
//! let mut map = ProbingMap::with_capacity(1);
//! for i in 0..5 {
//!     map.insert(i, i * 10);
//! }
//!
//! assert_eq!(map.len(), 5);
//! assert_eq!(map.capacity(), 8);
//! assert_eq!(map.get(&3), Some(&30));
//! ```
//!
//! ## The nil key
//!
//! A single reserved keyless entry is supported alongside the ordinary
//! keys; it probes from slot 0 and otherwise behaves like any other key.
//!
//! ```rust
//! use probemap::ProbingMap;
//!
//! let mut map: ProbingMap<String, i32> = ProbingMap::new();
//! map.insert_nil(42);
//!
//! assert_eq!(map.get_nil(), Some(&42));
//! assert_eq!(map.get("42"), None);
//! ```

/// Module implementing the linear-probing hash map
mod probing_map;
/// Utility traits for the hash map
mod utils;

pub use probing_map::{CapacityExhausted, Iter, ProbingMap};
pub use utils::MapExtensions;
