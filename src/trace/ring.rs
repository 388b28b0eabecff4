/// Fixed-size ring that always holds exactly `capacity` items.
///
/// Pushing overwrites the oldest slot and hands it back, so the length never
/// changes after construction.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    head: usize, // index of the oldest item
}

impl<T: Clone> RingBuffer<T> {
    /// `capacity` must be non-zero; callers validate it.
    pub fn filled(capacity: usize, value: T) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: vec![value; capacity],
            head: 0,
        }
    }
}

impl<T> RingBuffer<T> {
    /// Replace the oldest item with `item`, returning the evicted one.
    pub fn push(&mut self, item: T) -> T {
        let evicted = std::mem::replace(&mut self.slots[self.head], item);
        self.head = (self.head + 1) % self.slots.len();
        evicted
    }

    /// Items held; always the capacity given at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn newest(&self) -> &T {
        let len = self.slots.len();
        &self.slots[(self.head + len - 1) % len]
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let (older, newer) = self.slots.split_at(self.head);
        newer.iter().chain(older.iter())
    }
}
