//! Circular buffer for kernels that keep a fixed history.
//!
//! The [`RingBuffer`] type provides a fixed-capacity circular buffer. Kernels
//! use it for the money-flow history of MFI and the smoothed-price history of
//! the Hilbert-transform cycle indicators.

/// A fixed-capacity circular buffer.
///
/// When the buffer is full, adding a new value overwrites the oldest one and
/// hands it back to the caller.
///
/// # Example
///
/// ```rust
/// use ta_core::RingBuffer;
///
/// let mut buffer: RingBuffer<f64> = RingBuffer::new(3);
///
/// buffer.push(1.0);
/// buffer.push(2.0);
/// buffer.push(3.0);
/// assert_eq!(buffer.push(4.0), Some(1.0));
///
/// let newest_first: Vec<f64> = buffer.iter_newest_first().copied().collect();
/// assert_eq!(newest_first, vec![4.0, 3.0, 2.0]);
/// ```
#[derive(Clone, Debug)]
pub struct RingBuffer<T: Copy> {
    /// Internal storage.
    buffer: Vec<T>,
    /// Index of the next write position (also the oldest element when full).
    head: usize,
    /// Number of elements currently in the buffer.
    len: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Create a new, empty ring buffer with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if capacity is 0.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be > 0");
        Self {
            buffer: vec![T::default(); capacity],
            head: 0,
            len: 0,
        }
    }
}

impl<T: Copy> RingBuffer<T> {
    /// Create a full buffer where every slot holds `value`.
    ///
    /// # Panics
    ///
    /// Panics if capacity is 0.
    #[must_use]
    pub fn filled(value: T, capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be > 0");
        Self {
            buffer: vec![value; capacity],
            head: 0,
            len: capacity,
        }
    }

    /// Push a value into the buffer.
    ///
    /// If the buffer is full, the oldest value is replaced and returned.
    pub fn push(&mut self, value: T) -> Option<T> {
        let old = if self.is_full() {
            Some(self.buffer[self.head])
        } else {
            self.len += 1;
            None
        };

        self.buffer[self.head] = value;
        self.head = (self.head + 1) % self.buffer.len();
        old
    }

    fn is_full(&self) -> bool {
        self.len == self.buffer.len()
    }

    /// Returns the number of elements in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get a value by index (0 = oldest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        Some(&self.buffer[self.physical(self.len - 1 - index)])
    }

    /// Get the newest value in the buffer.
    #[must_use]
    pub fn newest(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(&self.buffer[self.physical(0)])
    }

    /// Get the oldest value in the buffer.
    #[must_use]
    pub fn oldest(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns an iterator from the newest value back to the oldest.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).map(move |age| &self.buffer[self.physical(age)])
    }

    /// Returns an iterator over the values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    /// Physical slot of the value written `age` pushes ago.
    fn physical(&self, age: usize) -> usize {
        let capacity = self.buffer.len();
        (self.head + capacity - 1 - age % capacity) % capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer: RingBuffer<f64> = RingBuffer::new(5);
        assert!(buffer.is_empty());
        assert!(!buffer.is_full());
        assert_eq!(buffer.buffer.len(), 5);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn test_new_zero_capacity() {
        let _: RingBuffer<f64> = RingBuffer::new(0);
    }

    #[test]
    fn test_push_and_get() {
        let mut buffer: RingBuffer<f64> = RingBuffer::new(3);

        assert_eq!(buffer.push(1.0), None);
        assert_eq!(buffer.push(2.0), None);

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(0), Some(&1.0));
        assert_eq!(buffer.get(1), Some(&2.0));
        assert_eq!(buffer.get(2), None);
    }

    #[test]
    fn test_push_overflow() {
        let mut buffer: RingBuffer<f64> = RingBuffer::new(3);

        buffer.push(1.0);
        buffer.push(2.0);
        buffer.push(3.0);
        assert!(buffer.is_full());

        assert_eq!(buffer.push(4.0), Some(1.0));
        assert_eq!(buffer.oldest(), Some(&2.0));
        assert_eq!(buffer.newest(), Some(&4.0));
        let values: Vec<f64> = buffer.iter().copied().collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_filled_starts_full() {
        let mut buffer = RingBuffer::filled(0.0f64, 3);
        assert!(buffer.is_full());
        assert_eq!(buffer.push(5.0), Some(0.0));

        let newest_first: Vec<f64> = buffer.iter_newest_first().copied().collect();
        assert_eq!(newest_first, vec![5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_newest_first_partial() {
        let mut buffer: RingBuffer<i32> = RingBuffer::new(4);
        buffer.push(1);
        buffer.push(2);

        let newest_first: Vec<i32> = buffer.iter_newest_first().copied().collect();
        assert_eq!(newest_first, vec![2, 1]);
    }

    #[test]
    fn test_wraparound_multiple_times() {
        let mut buffer: RingBuffer<f64> = RingBuffer::new(2);

        for i in 1..=10 {
            buffer.push(i as f64);
        }

        assert_eq!(buffer.oldest(), Some(&9.0));
        assert_eq!(buffer.newest(), Some(&10.0));
    }
}
