//! Ordered entity collections
//!
//! Entities keep insertion order. Removal while iterating must walk indices
//! from highest to lowest so a removal never shifts an element that has not
//! been visited yet.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct EntityStore<T> {
    items: Vec<T>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity
    pub fn spawn(&mut self, entity: T) {
        self.items.push(entity);
    }

    /// Remove and return the entity at `index`, preserving the order of the rest
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Drop every entity for which `keep` returns false
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a EntityStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut EntityStore<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}
