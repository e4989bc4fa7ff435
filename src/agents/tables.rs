//! Learned value stores
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use std::collections::{hash_map, HashMap};
use std::hash::Hash;

/// A table of values indexed by state-action pairs.
///
/// Entries that have never been written read as `T::default()`.
/// Entries are never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize + Eq + Hash, A: Serialize + Eq + Hash, T: Serialize",
    deserialize = "S: Deserialize<'de> + Eq + Hash, A: Deserialize<'de> + Eq + Hash, \
                   T: Deserialize<'de>"
))]
pub struct StateActionTable<S, A, T> {
    entries: HashMap<S, HashMap<A, T>>,
}

/// Action value estimates: `Q(s, a)`, zero when unseen.
pub type QTable<S, A> = StateActionTable<S, A, f64>;

/// Number of updates applied to each state-action pair.
pub type VisitCounts<S, A> = StateActionTable<S, A, u64>;

impl<S, A, T> StateActionTable<S, A, T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Number of stored state-action entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }

    /// Iterate over all stored `(state, action, value)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &A, &T)> {
        self.entries
            .iter()
            .flat_map(|(s, row)| row.iter().map(move |(a, v)| (s, a, v)))
    }
}

impl<S, A, T> Default for StateActionTable<S, A, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A, T> StateActionTable<S, A, T>
where
    S: Eq + Hash,
    A: Eq + Hash,
{
    /// The stored entry if one has been written.
    pub fn get(&self, state: &S, action: &A) -> Option<&T> {
        self.entries.get(state)?.get(action)
    }

    /// Mutable reference to an entry, inserting `T::default()` if missing.
    pub fn entry(&mut self, state: &S, action: &A) -> &mut T
    where
        S: Clone,
        A: Clone,
        T: Default,
    {
        self.entries
            .entry(state.clone())
            .or_default()
            .entry(action.clone())
            .or_default()
    }
}

impl<S, A, T> StateActionTable<S, A, T>
where
    S: Eq + Hash,
    A: Eq + Hash,
    T: Copy + Default,
{
    /// The stored value, or the default if the pair has never been written.
    pub fn value(&self, state: &S, action: &A) -> T {
        self.get(state, action).copied().unwrap_or_default()
    }
}

/// Linear model weights indexed by feature key.
///
/// Features that have never been updated have weight 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Eq + Hash",
    deserialize = "K: Deserialize<'de> + Eq + Hash"
))]
pub struct Weights<K: Eq + Hash> {
    values: HashMap<K, f64>,
}

impl<K: Eq + Hash> Weights<K> {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Weight of a feature; 0 if never updated.
    pub fn get(&self, feature: &K) -> f64 {
        self.values.get(feature).copied().unwrap_or(0.0)
    }

    /// Add `delta` to a feature's weight.
    pub fn add(&mut self, feature: K, delta: f64) {
        *self.values.entry(feature).or_insert(0.0) += delta;
    }

    /// Inner product of the weights with a feature vector.
    pub fn dot(&self, features: &FeatureVector<K>) -> f64 {
        features
            .iter()
            .map(|(feature, magnitude)| self.get(feature) * magnitude)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<K, f64> {
        self.values.iter()
    }
}

impl<K: Eq + Hash> Default for Weights<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod state_action_table {
    use super::*;

    #[test]
    fn unseen_is_default() {
        let table: QTable<u8, char> = QTable::new();
        assert_eq!(table.value(&0, &'a'), 0.0);
        assert!(table.get(&0, &'a').is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn entry_inserts_once() {
        let mut counts: VisitCounts<u8, char> = VisitCounts::new();
        *counts.entry(&0, &'a') += 1;
        *counts.entry(&0, &'a') += 1;
        *counts.entry(&0, &'b') += 1;
        assert_eq!(counts.value(&0, &'a'), 2);
        assert_eq!(counts.value(&0, &'b'), 1);
        assert_eq!(counts.value(&1, &'a'), 0);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn iter_entries() {
        let mut table: QTable<u8, char> = QTable::new();
        *table.entry(&1, &'x') = 3.5;
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(&1, &'x', &3.5)]);
    }
}
