use std::{fmt, num::NonZeroUsize};

use log::debug;

use crate::{TableError, hash::home_index};

/// A key-value pair stored in a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: String,
}

/// A hash table that resolves collisions by separate chaining.
///
/// The number of buckets is fixed at construction. Each bucket is a vector of entries and
/// grows without bound, so a skewed key set degrades lookups in that bucket to a linear
/// scan; the table is never rehashed.
#[derive(Debug, Clone)]
pub struct ChainingHashTable {
    /// One entry list per bucket
    buckets: Vec<Vec<Entry>>,
    /// Number of buckets, never zero
    num_buckets: NonZeroUsize,
    /// Number of live entries across all buckets
    size: usize,
}

impl ChainingHashTable {
    /// Creates a table with `num_buckets` empty buckets.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidCapacity`] when `num_buckets` is zero.
    pub fn new(num_buckets: usize) -> Result<Self, TableError> {
        let num_buckets =
            NonZeroUsize::new(num_buckets).ok_or(TableError::InvalidCapacity(num_buckets))?;

        Ok(Self { buckets: vec![Vec::new(); num_buckets.get()], num_buckets, size: 0 })
    }

    /// Index of the bucket `key` hashes to
    fn bucket_index(&self, key: &str) -> usize {
        home_index(key, self.num_buckets)
    }

    /// Locates `key`, returning its bucket index and, if present, its position in the bucket
    fn find(&self, key: &str) -> (usize, Option<usize>) {
        let bucket_index = self.bucket_index(key);
        let position = self
            .buckets
            .get(bucket_index)
            .and_then(|bucket| bucket.iter().position(|entry| entry.key == key));

        (bucket_index, position)
    }

    /// Inserts or updates `key`, returning the previous value if the key was present.
    ///
    /// New keys are appended to the end of their bucket.
    pub fn set(&mut self, key: &str, value: &str) -> Option<String> {
        let bucket_index = self.bucket_index(key);
        let bucket = self.buckets.get_mut(bucket_index)?;

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            debug!("updating {key:?} in bucket {bucket_index}");
            return Some(std::mem::replace(&mut entry.value, value.to_owned()));
        }

        bucket.push(Entry { key: key.to_owned(), value: value.to_owned() });
        self.size = self.size.saturating_add(1);
        debug!("inserted {key:?} into bucket {bucket_index} (chain length {})", bucket.len());
        None
    }

    /// Returns the value stored for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let (bucket_index, position) = self.find(key);
        let entry = self.buckets.get(bucket_index)?.get(position?)?;
        Some(entry.value.as_str())
    }

    /// Returns true if `key` is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).1.is_some()
    }

    /// Removes `key` from its bucket, keeping the order of the remaining entries.
    ///
    /// Returns the removed value, or `None` (leaving the table untouched) if the key was absent.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        let (bucket_index, position) = self.find(key);
        let position = position?;
        let bucket = self.buckets.get_mut(bucket_index)?;

        if position >= bucket.len() {
            return None;
        }

        let entry = bucket.remove(position);
        self.size = self.size.saturating_sub(1);
        debug!("deleted {key:?} from bucket {bucket_index}");
        Some(entry.value)
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.num_buckets.get()
    }

    /// Returns the average number of entries per bucket
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.num_buckets.get() as f64
    }

    /// Returns the length of every bucket, in bucket order
    pub fn bucket_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(Vec::len)
    }

    /// Returns an iterator over the live key-value pairs, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.buckets.iter().flatten().map(|entry| (entry.key.as_str(), entry.value.as_str()))
    }

    /// Renders every bucket with its entries
    #[must_use]
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChainingHashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            writeln!(f, "Bucket {index}:")?;
            for entry in bucket {
                writeln!(f, "\t{}: {}", entry.key, entry.value)?;
            }
        }
        Ok(())
    }
}
