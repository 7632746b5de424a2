//! Primary clustering experiment for the linear-probing table.
//!
//! Loads a table with random keys up to a target load factor and measures how long probe
//! sequences get. Results are reproducible for a fixed seed, and because keys are generated
//! in the same order for every load factor, a higher load factor always inserts a superset of
//! the keys of a lower one.

use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{DEFAULT_OCCUPANCY_WIDTH, LinearProbingHashTable, TableError};

/// Parameters of a clustering experiment
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringConfig {
    /// Number of slots in the table
    pub capacity: usize,
    /// Fraction of the slots to fill, in `(0, 1]`
    pub load_factor: f64,
    /// Seed for the key generator
    pub seed: u64,
    /// Exclusive upper bound of the random part of each key
    pub key_range: u32,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self { capacity: 1009, load_factor: 0.9, seed: 12345, key_range: 1_000_000 }
    }
}

impl ClusteringConfig {
    /// Sets the number of slots
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the target load factor
    #[must_use]
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Sets the key generator seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of keys needed to reach the target load factor
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn items(&self) -> Result<usize, TableError> {
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(TableError::InvalidLoadFactor(self.load_factor));
        }
        Ok((self.capacity as f64 * self.load_factor).floor() as usize)
    }
}

/// Measurements taken after loading a table
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringReport {
    /// Number of slots in the table
    pub capacity: usize,
    /// Number of keys inserted
    pub items: usize,
    /// Achieved load factor
    pub load_factor: f64,
    /// Mean probe sequence length over the inserted keys
    pub average_probe_length: f64,
    /// Longest probe sequence among the inserted keys
    pub longest_probe: usize,
    /// Occupancy map, [`DEFAULT_OCCUPANCY_WIDTH`] symbols per row
    pub occupancy: String,
}

/// Generates `count` distinct keys of the form `"<i>-<random>"`
fn generate_keys(config: &ClusteringConfig, count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let key_range = config.key_range.max(1);

    (0..count).map(|i| format!("{i}-{}", rng.random_range(0..key_range))).collect()
}

/// Builds a table as described by `config` and measures its clustering.
///
/// An experiment that inserts no keys reports an average probe length of zero.
///
/// # Errors
///
/// Returns [`TableError::InvalidCapacity`] for a zero capacity and
/// [`TableError::InvalidLoadFactor`] for a load factor outside `(0, 1]`.
pub fn run_clustering(config: &ClusteringConfig) -> Result<ClusteringReport, TableError> {
    let items = config.items()?;
    let mut table = LinearProbingHashTable::new(config.capacity)?;

    for key in generate_keys(config, items) {
        table.set(&key, &key)?;
    }

    let report = ClusteringReport {
        capacity: table.capacity(),
        items: table.len(),
        load_factor: table.load_factor(),
        average_probe_length: table.average_probe_sequence_length().unwrap_or(0.0),
        longest_probe: table.longest_probe_sequence().unwrap_or(0),
        occupancy: table.render_occupancy(DEFAULT_OCCUPANCY_WIDTH),
    };
    info!(
        "capacity {} load {:.2}: average probe length {:.3}, longest {}",
        report.capacity, report.load_factor, report.average_probe_length, report.longest_probe
    );

    Ok(report)
}

/// Runs [`run_clustering`] once per load factor, keeping the rest of `config`.
///
/// # Errors
///
/// Fails on the first load factor that [`run_clustering`] rejects.
pub fn sweep(
    config: &ClusteringConfig,
    load_factors: &[f64],
) -> Result<Vec<ClusteringReport>, TableError> {
    load_factors
        .iter()
        .map(|&load_factor| run_clustering(&config.clone().with_load_factor(load_factor)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_experiment() {
        let report = run_clustering(&ClusteringConfig::default()).unwrap();

        assert_eq!(report.capacity, 1009);
        assert_eq!(report.items, 908);
        assert!(report.average_probe_length.is_finite());
        assert!(report.average_probe_length >= 1.0);
        assert!(report.longest_probe >= 1);
        assert_eq!(report.occupancy.lines().count(), 21);
        assert_eq!(report.occupancy.chars().filter(|&c| c == 'O').count(), 908);
    }

    #[test]
    fn test_reproducible_for_a_seed() {
        let config = ClusteringConfig::default().with_capacity(211).with_seed(7);

        assert_eq!(run_clustering(&config).unwrap(), run_clustering(&config).unwrap());
    }

    #[test]
    fn test_probe_length_grows_with_load() {
        let reports = sweep(&ClusteringConfig::default(), &[0.25, 0.5, 0.75, 0.9]).unwrap();

        for pair in reports.windows(2) {
            let [lower, higher] = pair else { unreachable!() };
            assert!(
                higher.average_probe_length > lower.average_probe_length,
                "{} at load {} vs {} at load {}",
                higher.average_probe_length,
                higher.load_factor,
                lower.average_probe_length,
                lower.load_factor
            );
        }
    }

    #[test]
    fn test_full_table() {
        let config = ClusteringConfig::default().with_capacity(31).with_load_factor(1.0);
        let report = run_clustering(&config).unwrap();

        assert_eq!(report.items, 31);
        assert!(!report.occupancy.contains('.'));
    }

    #[test]
    fn test_invalid_load_factor() {
        for load_factor in [0.0, -0.5, 1.5, f64::NAN] {
            let config = ClusteringConfig::default().with_load_factor(load_factor);
            assert!(matches!(run_clustering(&config), Err(TableError::InvalidLoadFactor(_))));
        }
    }

    #[test]
    fn test_invalid_capacity() {
        let config = ClusteringConfig::default().with_capacity(0);
        assert_eq!(run_clustering(&config), Err(TableError::InvalidCapacity(0)));
    }
}
