/// A fixed-capacity ring buffer of optional lines, used to hold the
/// sliding window of context around a match.
///
/// The buffer never grows or shrinks after construction: its capacity is
/// fixed at `2 * context_lines + 1` so that a match sitting in the middle
/// slot always has room for `context_lines` lines of history behind it and
/// `context_lines` lines of lookahead in front of it. Pushing past
/// capacity silently evicts the oldest retained element, which is exactly
/// what we want: once a line scrolls out of both the pre- and
/// post-context range of any future match, nobody needs it anymore.
///
/// `None` entries stand in for "no line here", which happens at the start
/// and end of a file, where there simply aren't `context_lines` worth of
/// neighbors to report.
#[derive(Clone, Debug)]
pub struct CircularLineBuffer<T> {
    capacity: usize,
    // A `Vec<Option<T>>` sized to `capacity` and never reallocated. `head`
    // is the logical index of the oldest retained element; `len` is how
    // many slots are currently occupied.
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> CircularLineBuffer<T> {
    /// Create a new, empty buffer with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> CircularLineBuffer<T> {
        assert!(capacity > 0, "circular line buffer capacity must be > 0");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        CircularLineBuffer { capacity, slots, head: 0, len: 0 }
    }

    /// The fixed capacity of this buffer.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of occupied slots, which never exceeds `capacity`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if and only if this buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if and only if this buffer is holding `capacity`
    /// elements, i.e., the next `push_back` will evict the oldest one.
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Append `value` to the buffer.
    ///
    /// If the buffer is already at capacity, the oldest retained element
    /// is silently overwritten.
    pub fn push_back(&mut self, value: Option<T>) {
        let idx = (self.head + self.len) % self.capacity;
        if self.is_full() {
            self.slots[idx] = value;
            self.head = (self.head + 1) % self.capacity;
        } else {
            self.slots[idx] = value;
            self.len += 1;
        }
    }

    /// Returns the element at logical position `i`, where `0` is the
    /// oldest retained element and `len() - 1` is the newest.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`. Out-of-range access here is always a
    /// programming error in the scanner, not a user-facing condition.
    pub fn get(&self, i: usize) -> &Option<T> {
        assert!(i < self.len, "index {i} out of bounds (len={})", self.len);
        &self.slots[(self.head + i) % self.capacity]
    }
}
