//! Snake body storage.
//!
//! Segments live in an arena addressed by slot index. Each slot records the
//! slot of its successor toward the head, so the body is a singly linked
//! chain from tail to head without any shared mutable nodes. Slots freed by
//! `pop_tail` are recycled.

use super::grid::{CellId, Coords};

/// One occupied cell of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub coords: Coords,
    pub cell: CellId,
}

impl Segment {
    pub fn new(coords: Coords, cell: CellId) -> Self {
        Self { coords, cell }
    }
}

#[derive(Debug, Clone)]
pub struct SnakeBody {
    segments: Vec<Segment>,
    next: Vec<Option<usize>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl SnakeBody {
    /// Create a single-segment body
    pub fn new(segment: Segment) -> Self {
        Self {
            segments: vec![segment],
            next: vec![None],
            free: Vec::new(),
            head: 0,
            tail: 0,
            len: 1,
        }
    }

    pub fn head(&self) -> Segment {
        self.segments[self.head]
    }

    pub fn tail(&self) -> Segment {
        self.segments[self.tail]
    }

    /// The segment directly in front of the tail, if the body is longer than one
    pub fn tail_successor(&self) -> Option<Segment> {
        self.next[self.tail].map(|slot| self.segments[slot])
    }

    /// The segment directly behind the head, if the body is longer than one
    pub fn neck(&self) -> Option<Segment> {
        self.iter().second_to_last()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Never true for a body built through this API
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push_head(&mut self, segment: Segment) {
        let slot = self.alloc(segment, None);
        self.next[self.head] = Some(slot);
        self.head = slot;
        self.len += 1;
    }

    /// Remove and return the tail. A single-segment body is left as it is.
    pub fn pop_tail(&mut self) -> Segment {
        let old_tail = self.tail;
        let removed = self.segments[old_tail];
        let Some(successor) = self.next[old_tail] else {
            return removed;
        };

        self.next[old_tail] = None;
        self.free.push(old_tail);
        self.tail = successor;
        self.len -= 1;
        removed
    }

    /// Append behind the current tail without removing anything
    pub fn grow_at_tail(&mut self, segment: Segment) {
        let slot = self.alloc(segment, Some(self.tail));
        self.tail = slot;
        self.len += 1;
    }

    /// Invert the chain in place: the tail becomes the head and every link flips.
    pub fn reverse(&mut self) {
        let mut previous = None;
        let mut cursor = Some(self.tail);
        while let Some(slot) = cursor {
            cursor = self.next[slot];
            self.next[slot] = previous;
            previous = Some(slot);
        }
        std::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Segments from tail to head
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            body: self,
            cursor: Some(self.tail),
        }
    }

    fn alloc(&mut self, segment: Segment, next: Option<usize>) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.segments[slot] = segment;
                self.next[slot] = next;
                slot
            }
            None => {
                self.segments.push(segment);
                self.next.push(next);
                self.segments.len() - 1
            }
        }
    }
}

pub struct Iter<'a> {
    body: &'a SnakeBody,
    cursor: Option<usize>,
}

impl Iter<'_> {
    fn second_to_last(self) -> Option<Segment> {
        let mut previous = None;
        let mut current = None;
        for segment in self {
            previous = current;
            current = Some(segment);
        }
        previous
    }
}

impl Iterator for Iter<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let slot = self.cursor?;
        self.cursor = self.body.next[slot];
        Some(self.body.segments[slot])
    }
}
