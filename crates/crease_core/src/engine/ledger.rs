//! Per-player accumulators keyed by player id, kept in first-appearance order.

use std::collections::HashMap;

use crate::models::PlayerId;

#[derive(Debug, Clone)]
pub struct PlayerLedger<T> {
    entries: Vec<T>,
    index: HashMap<PlayerId, usize>,
}

impl<T> Default for PlayerLedger<T> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }
}

impl<T> PlayerLedger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing entry for `id`, or a new one appended at the end.
    pub fn entry_or_insert_with(&mut self, id: &str, make: impl FnOnce() -> T) -> &mut T {
        let slot = match self.index.get(id) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push(make());
                self.index.insert(id.to_string(), slot);
                slot
            }
        };
        &mut self.entries[slot]
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&slot| &self.entries[slot])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        match self.index.get(id) {
            Some(&slot) => Some(&mut self.entries[slot]),
            None => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.entries
    }
}
