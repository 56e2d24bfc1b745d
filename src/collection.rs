//! Ordered, id-keyed collections with a traversal cursor and per-entry tried flags.

use indexmap::IndexMap;

use crate::algorithms::choosing::minmax::MinMaxChoiceAlgorithm;
use crate::error::{PackError, Result};
use crate::{ChoiceAlgorithm, Cuboid};

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    tried: bool,
}

/// Entries keyed by id in insertion order.
///
/// The `tried` flag lives here and is cleared by [`Collection::reset`]; the `used`
/// flag lives on the entry itself and is never touched by the collection.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    kind: &'static str,
    entries: IndexMap<String, Entry<T>>,
    cursor: usize,
    current: Option<usize>,
}

impl<T: Cuboid> Collection<T> {
    /// Creates an empty collection. `kind` names the entries in error messages.
    pub fn new(kind: &'static str) -> Collection<T> {
        Collection {
            kind,
            entries: IndexMap::new(),
            cursor: 0,
            current: None,
        }
    }

    /// Appends `value`, rejecting an id that is already present.
    pub fn insert(&mut self, value: T) -> Result<()> {
        let id = value.id().to_string();
        if self.entries.contains_key(&id) {
            return Err(PackError::DuplicateId {
                kind: self.kind,
                id,
            });
        }
        self.entries.insert(
            id,
            Entry {
                value,
                tried: false,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id).map(|e| &e.value)
    }

    pub fn is_tried(&self, id: &str) -> bool {
        self.entries.get(id).is_some_and(|e| e.tried)
    }

    /// Iterates over every entry in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values().map(|e| &e.value)
    }

    /// The entry most recently returned by one of the `next*` methods.
    pub fn current(&self) -> Option<&T> {
        self.current
            .and_then(|i| self.entries.get_index(i))
            .map(|(_, e)| &e.value)
    }

    /// Clears every tried flag and rewinds the sequential cursor.
    pub fn reset(&mut self) {
        for entry in self.entries.values_mut() {
            entry.tried = false;
        }
        self.cursor = 0;
        self.current = None;
    }

    /// Returns the next untried entry in insertion order and marks it tried.
    ///
    /// Used entries are still returned; only the tried flag gates this traversal.
    pub fn next(&mut self) -> Option<&mut T> {
        let offset = self
            .entries
            .values()
            .skip(self.cursor)
            .position(|e| !e.tried)?;
        let index = self.cursor + offset;
        self.cursor = index + 1;
        self.take(index)
    }

    /// Returns the untried, unused entry with the largest score and marks it tried.
    pub fn next_largest(&mut self) -> Option<&mut T> {
        self.next_chosen(&MinMaxChoiceAlgorithm::<false>)
    }

    /// Returns the untried, unused entry with the smallest score and marks it tried.
    pub fn next_smallest(&mut self) -> Option<&mut T> {
        self.next_chosen(&MinMaxChoiceAlgorithm::<true>)
    }

    /// Lets `algorithm` pick among entries that are neither tried nor used.
    pub fn next_chosen<C: ChoiceAlgorithm>(&mut self, algorithm: &C) -> Option<&mut T> {
        let candidates: Vec<usize> = self
            .entries
            .values()
            .enumerate()
            .filter(|(_, e)| !e.tried && !e.value.is_used())
            .map(|(i, _)| i)
            .collect();
        let choices: Vec<&T> = candidates
            .iter()
            .filter_map(|&i| self.entries.get_index(i))
            .map(|(_, e)| &e.value)
            .collect();
        let picked = algorithm.choose(&choices)?;
        let index = *candidates.get(picked)?;
        self.take(index)
    }

    fn take(&mut self, index: usize) -> Option<&mut T> {
        let (_, entry) = self.entries.get_index_mut(index)?;
        entry.tried = true;
        self.current = Some(index);
        Some(&mut entry.value)
    }
}
