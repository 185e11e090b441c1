// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp (OutPt and OutRec storage)
//
// Index-addressed arena with a free list.
//
// Edges, output points and output records all live in arenas and refer to
// each other by u32 index instead of by pointer. Ring splicing during joins
// therefore only rewrites indices. Freed slots are recycled by `alloc`.

use std::ops::{Index, IndexMut};

/// Null index for every arena-backed link.
pub const INVALID: u32 = u32::MAX;

pub struct Arena<T> {
    items: Vec<Option<T>>,
    free_list: Vec<u32>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Stores `value`, returning its index.
    pub fn alloc(&mut self, value: T) -> u32 {
        if let Some(idx) = self.free_list.pop() {
            self.items[idx as usize] = Some(value);
            idx
        } else {
            let idx = self.items.len() as u32;
            self.items.push(Some(value));
            idx
        }
    }

    /// Returns the slot to the free list.
    pub fn free(&mut self, idx: u32) {
        if let Some(slot) = self.items.get_mut(idx as usize) {
            if slot.take().is_some() {
                self.free_list.push(idx);
            }
        }
    }

    pub fn get(&self, idx: u32) -> Option<&T> {
        self.items.get(idx as usize)?.as_ref()
    }

    pub fn is_live(&self, idx: u32) -> bool {
        self.get(idx).is_some()
    }

    /// Number of slots ever handed out, live or free.
    #[cfg(test)]
    pub fn slot_count(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.items.len() - self.free_list.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.free_list.clear();
    }

    /// Indices of live slots in allocation order.
    pub fn live_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| i as u32)
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<u32> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: u32) -> &T {
        match self.items.get(idx as usize) {
            Some(Some(v)) => v,
            _ => panic!("arena index {} is not live", idx),
        }
    }
}

impl<T> IndexMut<u32> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, idx: u32) -> &mut T {
        match self.items.get_mut(idx as usize) {
            Some(Some(v)) => v,
            _ => panic!("arena index {} is not live", idx),
        }
    }
}
