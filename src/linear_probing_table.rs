use std::{fmt, num::NonZeroUsize};

use log::{debug, trace, warn};

use crate::{TableError, hash::home_index};

/// Number of symbols per row when rendering the occupancy map
pub const DEFAULT_OCCUPANCY_WIDTH: usize = 50;

/// A key-value pair stored in an occupied slot
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: String,
}

/// The state of one slot of the table
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    /// Never written; ends every probe sequence that reaches it
    Empty,
    /// Holds a live entry
    Occupied(Entry),
    /// Tombstone left by a delete; probes continue past it and inserts may reuse it
    Deleted,
}

impl Slot {
    /// Symbol shown for this slot in the occupancy map
    fn symbol(&self) -> SlotSymbol {
        match self {
            Self::Empty => SlotSymbol::Empty,
            Self::Occupied(_) => SlotSymbol::Occupied,
            Self::Deleted => SlotSymbol::Deleted,
        }
    }
}

/// One symbol of the occupancy map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotSymbol {
    /// An empty slot, shown as `.`
    Empty,
    /// A tombstone, shown as `x`
    Deleted,
    /// A live entry, shown as `O`
    Occupied,
}

impl SlotSymbol {
    /// Character used to draw the symbol
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Deleted => 'x',
            Self::Occupied => 'O',
        }
    }
}

impl fmt::Display for SlotSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Result of walking a key's probe sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    /// Slot holding the key, or the slot a new entry for it would take (the earliest
    /// tombstone seen, else the empty slot that ended the walk). `None` when the table is
    /// full and holds no tombstone.
    pub index: Option<usize>,
    /// Number of slots visited before the walk stopped
    pub length: usize,
}

/// How a probe trace ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The key lives in this slot
    Found(usize),
    /// The key is absent; this empty slot ended the walk
    Vacant(usize),
    /// The key is absent; this is the earliest tombstone on the walk
    Tombstone(usize),
    /// The key is absent and there is no slot to put it in
    Full,
}

/// A slot visited while tracing a probe sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeStep {
    /// Index of the visited slot
    pub index: usize,
    /// State of the slot when it was visited
    pub symbol: SlotSymbol,
    /// Key held by the slot, if occupied
    pub key: Option<String>,
}

/// A replay of a key's probe sequence, produced by
/// [`LinearProbingHashTable::probe_trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTrace {
    /// The traced key
    pub key: String,
    /// First slot of the probe sequence
    pub home: usize,
    /// Every slot visited, in order
    pub steps: Vec<ProbeStep>,
    /// Where the walk stopped
    pub outcome: ProbeOutcome,
}

impl ProbeTrace {
    /// Returns the slot the walk settled on, or `None` if the table is full
    #[must_use]
    pub fn terminal_index(&self) -> Option<usize> {
        match self.outcome {
            ProbeOutcome::Found(index) |
            ProbeOutcome::Vacant(index) |
            ProbeOutcome::Tombstone(index) => Some(index),
            ProbeOutcome::Full => None,
        }
    }
}

impl fmt::Display for ProbeTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Probing {} ({})", self.key, self.home)?;
        for step in &self.steps {
            match (&step.symbol, &step.key) {
                (SlotSymbol::Occupied, Some(key)) => writeln!(f, "    {}: {key}", step.index)?,
                (SlotSymbol::Deleted, _) => writeln!(f, "    {}: xxx", step.index)?,
                _ => writeln!(f, "    {}: ---", step.index)?,
            }
        }
        match self.outcome {
            ProbeOutcome::Found(index) => writeln!(f, "    Returning found index {index}"),
            ProbeOutcome::Vacant(index) => writeln!(f, "    Returning empty index {index}"),
            ProbeOutcome::Tombstone(index) => writeln!(f, "    Returning deleted index {index}"),
            ProbeOutcome::Full => writeln!(f, "    Table is full"),
        }
    }
}

/// A fixed-capacity hash table using open addressing with linear probing.
///
/// Deleted entries leave a tombstone behind so that keys inserted further along the same
/// probe sequence stay reachable. Tombstones are never cleared back to empty; a later insert
/// whose probe sequence crosses one reuses the earliest it sees.
///
/// The table never grows. Once every slot holds a live entry, inserting a new key fails with
/// [`TableError::CapacityExhausted`].
#[derive(Debug, Clone)]
pub struct LinearProbingHashTable {
    /// The slots, `capacity` of them
    slots: Vec<Slot>,
    /// Number of slots, never zero
    capacity: NonZeroUsize,
    /// Number of occupied slots
    size: usize,
}

impl LinearProbingHashTable {
    /// Creates a table with `capacity` empty slots.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(TableError::InvalidCapacity(capacity))?;

        Ok(Self { slots: vec![Slot::Empty; capacity.get()], capacity, size: 0 })
    }

    /// Visits the slots of the probe sequence starting at `home`, wrapping around once
    fn probe_sequence(&self, home: usize) -> impl Iterator<Item = (usize, &Slot)> + '_ {
        let slots = self.slots.iter().enumerate();
        slots.clone().skip(home).chain(slots.take(home))
    }

    /// Walks `key`'s probe sequence, reporting every visited slot to `visit`.
    ///
    /// Tombstones never end the walk; the first one seen is remembered and returned in place
    /// of the empty slot (or the exhausted sequence) when the key turns out to be absent.
    fn walk<F>(&self, key: &str, mut visit: F) -> Probe
    where
        F: FnMut(usize, &Slot),
    {
        let home = home_index(key, self.capacity);
        let mut first_deleted = None;

        for (length, (index, slot)) in (1..).zip(self.probe_sequence(home)) {
            visit(index, slot);
            match slot {
                Slot::Empty => {
                    return Probe { index: Some(first_deleted.unwrap_or(index)), length };
                }
                Slot::Deleted => {
                    if first_deleted.is_none() {
                        first_deleted = Some(index);
                    }
                }
                Slot::Occupied(entry) if entry.key == key => {
                    return Probe { index: Some(index), length };
                }
                Slot::Occupied(_) => {}
            }
        }

        Probe { index: first_deleted, length: self.capacity.get() }
    }

    /// Finds the slot holding `key`, or the slot it would be inserted into.
    #[must_use]
    pub fn find(&self, key: &str) -> Probe {
        self.walk(key, |index, slot| trace!("probe {key:?}: slot {index} is {}", slot.symbol()))
    }

    /// Returns the entry stored for `key`, if live
    fn live_entry(&self, key: &str) -> Option<&Entry> {
        match self.slots.get(self.find(key).index?)? {
            Slot::Occupied(entry) => Some(entry),
            Slot::Empty | Slot::Deleted => None,
        }
    }

    /// Inserts or updates `key`, returning the previous value if the key was present.
    ///
    /// A new key takes the earliest tombstone on its probe sequence if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityExhausted`] when the key is absent and every slot holds a
    /// live entry. The table is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<Option<String>, TableError> {
        let probe = self.find(key);
        let capacity = self.capacity.get();
        let Some((index, slot)) =
            probe.index.and_then(|index| self.slots.get_mut(index).map(|slot| (index, slot)))
        else {
            warn!("cannot insert {key:?}: all {capacity} slots are occupied");
            return Err(TableError::CapacityExhausted { capacity });
        };

        if let Slot::Occupied(entry) = slot {
            debug!("updating {key:?} in slot {index}");
            return Ok(Some(std::mem::replace(&mut entry.value, value.to_owned())));
        }

        if *slot == Slot::Deleted {
            debug!("reusing tombstone at slot {index} for {key:?}");
        } else {
            debug!("inserted {key:?} into slot {index} after {} probes", probe.length);
        }
        *slot = Slot::Occupied(Entry { key: key.to_owned(), value: value.to_owned() });
        self.size = self.size.saturating_add(1);
        Ok(None)
    }

    /// Returns the value stored for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.live_entry(key).map(|entry| entry.value.as_str())
    }

    /// Returns true if `key` is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.live_entry(key).is_some()
    }

    /// Replaces `key`'s slot with a tombstone, returning the removed value.
    ///
    /// Does nothing if the key is absent.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        let index = self.find(key).index?;
        let slot = self.slots.get_mut(index)?;

        if !matches!(slot, Slot::Occupied(_)) {
            return None;
        }

        match std::mem::replace(slot, Slot::Deleted) {
            Slot::Occupied(entry) => {
                self.size = self.size.saturating_sub(1);
                debug!("deleted {key:?}, slot {index} is now a tombstone");
                Some(entry.value)
            }
            Slot::Empty | Slot::Deleted => None,
        }
    }

    /// Replays `key`'s probe sequence with the same rules as [`Self::find`], recording the
    /// state of every visited slot.
    #[must_use]
    pub fn probe_trace(&self, key: &str) -> ProbeTrace {
        let mut steps = Vec::new();
        let probe = self.walk(key, |index, slot| {
            let occupant = match slot {
                Slot::Occupied(entry) => Some(entry.key.clone()),
                Slot::Empty | Slot::Deleted => None,
            };
            steps.push(ProbeStep { index, symbol: slot.symbol(), key: occupant });
        });

        let outcome = match probe.index.map(|index| (index, self.slots.get(index))) {
            Some((index, Some(Slot::Occupied(_)))) => ProbeOutcome::Found(index),
            Some((index, Some(Slot::Deleted))) => ProbeOutcome::Tombstone(index),
            Some((index, _)) => ProbeOutcome::Vacant(index),
            None => ProbeOutcome::Full,
        };
        debug!("probe trace for {key:?}: {} steps, {outcome:?}", steps.len());

        ProbeTrace { key: key.to_owned(), home: home_index(key, self.capacity), steps, outcome }
    }

    /// Lazily yields one symbol per slot, in slot order
    pub fn occupancy_map(&self) -> impl Iterator<Item = SlotSymbol> + '_ {
        self.slots.iter().map(Slot::symbol)
    }

    /// Renders the occupancy map as rows of `width` symbols
    #[must_use]
    pub fn render_occupancy(&self, width: usize) -> String {
        let symbols: Vec<char> = self.occupancy_map().map(SlotSymbol::as_char).collect();
        symbols
            .chunks(width.max(1))
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns the mean probe sequence length over all live entries, or `None` if there are
    /// none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_probe_sequence_length(&self) -> Option<f64> {
        let lengths = self.probe_lengths();
        if lengths.is_empty() {
            return None;
        }

        let total: usize = lengths.iter().sum();
        Some(total as f64 / lengths.len() as f64)
    }

    /// Returns the longest probe sequence among live entries
    #[must_use]
    pub fn longest_probe_sequence(&self) -> Option<usize> {
        self.probe_lengths().into_iter().max()
    }

    /// Probe length of every live entry, in slot order
    fn probe_lengths(&self) -> Vec<usize> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Occupied(entry) => Some(self.find(&entry.key).length),
                Slot::Empty | Slot::Deleted => None,
            })
            .collect()
    }

    /// Returns the number of tombstones
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|slot| **slot == Slot::Deleted).count()
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the ratio of live entries to slots
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity.get() as f64
    }

    /// Returns an iterator over the live key-value pairs, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(entry) => Some((entry.key.as_str(), entry.value.as_str())),
            Slot::Empty | Slot::Deleted => None,
        })
    }

    /// Renders every slot with its contents
    #[must_use]
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LinearProbingHashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index}: ---")?,
                Slot::Deleted => writeln!(f, "{index}: xxx")?,
                Slot::Occupied(entry) => writeln!(f, "{index}: {}\t{}", entry.key, entry.value)?,
            }
        }
        Ok(())
    }
}
