//! The operation set shared by both hash table variants

use crate::{ChainingHashTable, LinearProbingHashTable, TableError};

/// String-keyed table operations implemented by every table variant.
///
/// Lets callers load, query and inspect either table through one interface.
pub trait StringTable {
    /// Inserts or updates `key`, returning the previous value if the key was present.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityExhausted`] if the table has no room for a new key.
    fn set(&mut self, key: &str, value: &str) -> Result<Option<String>, TableError>;

    /// Returns the value stored for `key`
    fn get(&self, key: &str) -> Option<&str>;

    /// Removes `key`, returning its value if it was present
    fn delete(&mut self, key: &str) -> Option<String>;

    /// Returns the number of live entries
    fn len(&self) -> usize;

    /// Returns the number of buckets or slots
    fn capacity(&self) -> usize;

    /// Returns the live key-value pairs in storage order
    fn entries(&self) -> Vec<(&str, &str)>;

    /// Returns true if `key` is present
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns true if the table holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the keys of the table as a Vec
    fn keys(&self) -> Vec<String> {
        self.entries().into_iter().map(|(key, _)| key.to_owned()).collect()
    }

    /// Returns the values of the table as a Vec
    fn values(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, value)| value.to_owned()).collect()
    }

    /// Returns the ratio of live entries to buckets or slots
    #[allow(clippy::cast_precision_loss)]
    fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }
}

impl StringTable for ChainingHashTable {
    fn set(&mut self, key: &str, value: &str) -> Result<Option<String>, TableError> {
        Ok(Self::set(self, key, value))
    }

    fn get(&self, key: &str) -> Option<&str> {
        Self::get(self, key)
    }

    fn delete(&mut self, key: &str) -> Option<String> {
        Self::delete(self, key)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    fn entries(&self) -> Vec<(&str, &str)> {
        self.iter().collect()
    }
}

impl StringTable for LinearProbingHashTable {
    fn set(&mut self, key: &str, value: &str) -> Result<Option<String>, TableError> {
        Self::set(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&str> {
        Self::get(self, key)
    }

    fn delete(&mut self, key: &str) -> Option<String> {
        Self::delete(self, key)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    fn entries(&self) -> Vec<(&str, &str)> {
        self.iter().collect()
    }
}

/// Loads every pair of `pairs` into `table`, later pairs overwriting earlier ones.
///
/// # Errors
///
/// Stops at the first pair the table cannot hold and returns
/// [`TableError::CapacityExhausted`]; pairs before it stay loaded.
pub fn from_pairs<T, K, V, I>(mut table: T, pairs: I) -> Result<T, TableError>
where
    T: StringTable,
    K: AsRef<str>,
    V: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    for (key, value) in pairs {
        table.set(key.as_ref(), value.as_ref())?;
    }

    Ok(table)
}
