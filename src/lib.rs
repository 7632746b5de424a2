//! # Probing
//!
//! String-keyed hash tables built two ways, for studying collision handling.
//!
//! This crate provides two fixed-size hash table implementations sharing the djb2 hash:
//!
//! - `ChainingHashTable`: separate chaining, one growable entry list per bucket
//! - `LinearProbingHashTable`: open addressing with linear probing and tombstone deletion,
//!   plus probe-sequence diagnostics
//!
//! Neither table ever resizes. A chaining table degrades to linear scans as its buckets grow;
//! a linear-probing table rejects new keys once every slot holds a live entry.
//!
//! ## Basic Usage
//!
//! ```rust
//! use probing::{ChainingHashTable, LinearProbingHashTable, TableError};
//!
//! let mut chained = ChainingHashTable::new(10)?;
//! chained.set("Ann Archer", "202-555-0101");
//! assert_eq!(chained.get("Ann Archer"), Some("202-555-0101"));
//!
//! let mut probed = LinearProbingHashTable::new(10)?;
//! probed.set("Ann Archer", "202-555-0101")?;
//! probed.delete("Ann Archer");
//! assert!(!probed.contains("Ann Archer"));
//! assert_eq!(probed.get("Ann Archer"), None);
//! # Ok::<(), TableError>(())
//! ```
//!
//! ## Diagnostics
//!
//! ```rust
//! use probing::{LinearProbingHashTable, ProbeOutcome, TableError};
//!
//! let mut table = LinearProbingHashTable::new(8)?;
//! for key in ["alpha", "beta", "gamma"] {
//!     table.set(key, key)?;
//! }
//! table.delete("beta");
//!
//! let trace = table.probe_trace("gamma");
//! assert!(matches!(trace.outcome, ProbeOutcome::Found(_)));
//! println!("{trace}");
//!
//! let map: String = table.occupancy_map().map(|symbol| symbol.as_char()).collect();
//! assert_eq!(map.len(), 8);
//! assert!(table.average_probe_sequence_length().unwrap() >= 1.0);
//! # Ok::<(), TableError>(())
//! ```

/// Module implementing the separate-chaining table
mod chaining_table;
/// Clustering experiment for the linear-probing table
pub mod clustering;
/// Error type shared by the tables
mod error;
/// The djb2 hash function
pub mod hash;
/// Module implementing the linear-probing table with tombstones
mod linear_probing_table;
/// Logger initialisation
pub mod logger;
/// The operation set shared by both tables
mod utils;

pub use chaining_table::ChainingHashTable;
pub use error::TableError;
pub use linear_probing_table::{
    DEFAULT_OCCUPANCY_WIDTH, LinearProbingHashTable, Probe, ProbeOutcome, ProbeStep, ProbeTrace,
    SlotSymbol,
};
pub use utils::{StringTable, from_pairs};
