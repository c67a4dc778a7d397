// libacio/src/transport/ring.rs

use std::collections::VecDeque;

/// Fixed-capacity FIFO. When full, `put` overwrites the oldest element
/// and hands it back.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buf: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    /// Append an element, returning the evicted oldest element on overflow.
    pub fn put(&mut self, item: T) -> Option<T> {
        let evicted = if self.is_full() {
            self.buf.pop_front()
        } else {
            None
        };
        self.buf.push_back(item);
        evicted
    }

    /// Append every element; returns how many old elements were evicted.
    pub fn put_all<I: IntoIterator<Item = T>>(&mut self, items: I) -> usize {
        items
            .into_iter()
            .filter_map(|item| self.put(item))
            .count()
    }

    pub fn get(&mut self) -> Option<T> {
        self.buf.pop_front()
    }

    /// Element at `pos` counted from the oldest one.
    pub fn peek(&self, pos: usize) -> Option<&T> {
        self.buf.get(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    /// All elements, oldest first, as one slice.
    pub fn as_slice(&mut self) -> &[T] {
        self.buf.make_contiguous()
    }

    /// Remove and return every element, oldest first.
    pub fn drain_all(&mut self) -> Vec<T> {
        self.buf.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
