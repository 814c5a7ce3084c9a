//! Per-run load counter for the fair pool

use crate::domain::OwnerName;
use std::collections::BTreeMap;

/// Assignment counts of the fair pool members
///
/// Counts start at zero for every run and are never persisted. Entries keep
/// the pool order so the least loaded member is resolved deterministically.
#[derive(Debug, Clone, Default)]
pub struct OwnerLoadCounter {
    entries: Vec<(OwnerName, usize)>,
}

impl OwnerLoadCounter {
    /// Creates a counter with every pool member at zero
    pub fn new(pool: &[OwnerName]) -> Self {
        Self {
            entries: pool.iter().map(|owner| (owner.clone(), 0)).collect(),
        }
    }

    /// Least loaded member; ties go to the earliest in pool order
    pub fn least_loaded(&self) -> Option<&OwnerName> {
        let mut best: Option<&(OwnerName, usize)> = None;
        for entry in &self.entries {
            match best {
                Some((_, count)) if *count <= entry.1 => {}
                _ => best = Some(entry),
            }
        }
        best.map(|(owner, _)| owner)
    }

    /// Records one assignment to `owner`
    ///
    /// Owners outside the pool are ignored.
    pub fn increment(&mut self, owner: &OwnerName) {
        if let Some((_, count)) = self.entries.iter_mut().find(|(name, _)| name == owner) {
            *count += 1;
        }
    }

    /// Picks the least loaded member and records the assignment
    pub fn assign_next(&mut self) -> Option<OwnerName> {
        let owner = self.least_loaded()?.clone();
        self.increment(&owner);
        Some(owner)
    }

    /// Assignments recorded for `owner`
    pub fn count(&self, owner: &OwnerName) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == owner)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Total assignments across the pool
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Difference between the most and least loaded members
    pub fn spread(&self) -> usize {
        let max = self.entries.iter().map(|(_, c)| *c).max().unwrap_or(0);
        let min = self.entries.iter().map(|(_, c)| *c).min().unwrap_or(0);
        max - min
    }

    /// Counts keyed by owner name
    pub fn snapshot(&self) -> BTreeMap<String, usize> {
        self.entries
            .iter()
            .map(|(owner, count)| (owner.as_str().to_string(), *count))
            .collect()
    }
}
