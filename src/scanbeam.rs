// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp (scanbeam list)
//
// Scanbeam queue.
//
// A binary heap of Y values. The sweep runs from the bottom of the input
// (largest Y) towards the top (smallest Y), so the queue yields the largest
// pending Y first. Duplicate Y values may be inserted freely; `pop` drains
// all copies of the value it returns.

use crate::geom::CInt;

pub struct Scanbeam {
    /// nodes[1..=size] are active; nodes[0] unused.
    nodes: Vec<CInt>,
    size: usize,
}

impl Scanbeam {
    pub fn new() -> Self {
        Scanbeam {
            nodes: vec![0],
            size: 0,
        }
    }

    fn float_down(&mut self, mut curr: usize) {
        let y = self.nodes[curr];
        loop {
            let mut child = curr << 1;
            if child > self.size {
                break;
            }
            if child < self.size && self.nodes[child + 1] > self.nodes[child] {
                child += 1;
            }
            if y >= self.nodes[child] {
                break;
            }
            self.nodes[curr] = self.nodes[child];
            curr = child;
        }
        self.nodes[curr] = y;
    }

    fn float_up(&mut self, mut curr: usize) {
        let y = self.nodes[curr];
        loop {
            let parent = curr >> 1;
            if parent == 0 || self.nodes[parent] >= y {
                break;
            }
            self.nodes[curr] = self.nodes[parent];
            curr = parent;
        }
        self.nodes[curr] = y;
    }

    pub fn insert(&mut self, y: CInt) {
        self.size += 1;
        if self.size < self.nodes.len() {
            self.nodes[self.size] = y;
        } else {
            self.nodes.push(y);
        }
        self.float_up(self.size);
    }

    fn extract_max(&mut self) -> Option<CInt> {
        if self.size == 0 {
            return None;
        }
        let top = self.nodes[1];
        self.nodes[1] = self.nodes[self.size];
        self.size -= 1;
        if self.size > 0 {
            self.float_down(1);
        }
        Some(top)
    }

    #[inline]
    fn peek(&self) -> Option<CInt> {
        if self.size == 0 {
            None
        } else {
            Some(self.nodes[1])
        }
    }

    /// Removes and returns the largest Y along with all of its duplicates.
    pub fn pop(&mut self) -> Option<CInt> {
        let y = self.extract_max()?;
        while self.peek() == Some(y) {
            self.extract_max();
        }
        Some(y)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.size = 0;
    }
}

impl Default for Scanbeam {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_largest_first() {
        let mut sb = Scanbeam::new();
        for y in [3, -7, 10, 0, 5] {
            sb.insert(y);
        }
        let order: Vec<CInt> = std::iter::from_fn(|| sb.pop()).collect();
        assert_eq!(order, vec![10, 5, 3, 0, -7]);
        assert!(sb.is_empty());
    }

    #[test]
    fn duplicates_are_drained() {
        let mut sb = Scanbeam::new();
        for y in [4, 4, 2, 4, 2, 9] {
            sb.insert(y);
        }
        assert_eq!(sb.pop(), Some(9));
        assert_eq!(sb.pop(), Some(4));
        assert_eq!(sb.pop(), Some(2));
        assert_eq!(sb.pop(), None);
    }

    #[test]
    fn insert_after_pop_keeps_order() {
        let mut sb = Scanbeam::new();
        sb.insert(1);
        sb.insert(8);
        assert_eq!(sb.pop(), Some(8));
        sb.insert(6);
        sb.insert(1);
        assert_eq!(sb.pop(), Some(6));
        assert_eq!(sb.pop(), Some(1));
        assert!(sb.is_empty());
    }

    #[test]
    fn clear_empties() {
        let mut sb = Scanbeam::new();
        sb.insert(1);
        sb.insert(2);
        sb.clear();
        assert!(sb.is_empty());
        assert_eq!(sb.pop(), None);
    }
}
