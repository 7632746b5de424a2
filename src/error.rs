//! Errors reported by the hash tables

use thiserror::Error;

/// Failures reported by table construction, insertion and the clustering experiment.
///
/// A missing key is never an error: lookups return `None`/`false` and deletes are no-ops.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// A table was constructed with zero buckets or slots
    #[error("table capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
    /// Every slot of an open-addressing table holds a live entry and the key is not among them
    #[error("hash table is full: all {capacity} slots hold live entries")]
    CapacityExhausted {
        /// Number of slots in the table, which never grows
        capacity: usize,
    },
    /// A clustering experiment asked for a load factor outside `(0, 1]`
    #[error("load factor must be in (0, 1], got {0}")]
    InvalidLoadFactor(f64),
}
