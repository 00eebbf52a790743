//! ## adtlab-core::arena
//! **Index arena with stable handles**
//!
//! Nodes of linked structures live in one vector and refer to each other by
//! `Handle` instead of by pointer. Individual nodes are never freed; the whole
//! arena is reset at once when the structure is reloaded.

use serde::{Deserialize, Serialize};

/// Stable index of a value inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle(u32);

impl Handle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only arena addressed by [`Handle`].
#[derive(Debug, Clone)]
pub struct NodeArena<T> {
    slots: Vec<T>,
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Moves `value` into the arena and returns its handle.
    pub fn allocate(&mut self, value: T) -> Handle {
        let handle = Handle(self.slots.len() as u32);
        self.slots.push(value);
        handle
    }

    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.index())
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots.get_mut(handle.index())
    }

    /// Drops every value. Handles issued before the reset become dangling and
    /// must not be used again.
    pub fn reset(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_stay_valid_across_allocations() {
        let mut arena = NodeArena::new();
        let a = arena.allocate(123u32);
        let b = arena.allocate(456u32);
        for n in 0..100 {
            arena.allocate(n);
        }
        assert_eq!(arena.get(a), Some(&123));
        assert_eq!(arena.get(b), Some(&456));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = NodeArena::new();
        let h = arena.allocate(String::from("a"));
        arena.get_mut(h).unwrap().push('b');
        assert_eq!(arena.get(h).map(String::as_str), Some("ab"));
    }

    #[test]
    fn reset_empties_the_arena() {
        let mut arena = NodeArena::with_capacity(4);
        let h = arena.allocate(1u8);
        arena.reset();
        assert!(arena.is_empty());
        assert_eq!(arena.get(h), None);
        let h2 = arena.allocate(2u8);
        assert_eq!(arena.get(h2), Some(&2));
    }
}
