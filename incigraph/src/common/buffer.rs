use std::{fmt, mem, ops::Deref};

use super::pool::Pooled;

/// An exclusively owned, amortized-growth array backed by the thread-local
/// [pool](super::pool).
///
/// The storage is rented on creation, replaced by a rented storage of double
/// capacity when full and given back on drop.
pub struct GrowableBuffer<T: Pooled> {
    items: Vec<T>,
}

impl<T: Pooled + Copy> GrowableBuffer<T> {
    /// Creates an empty buffer. No storage is rented until the first push.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: T::rent(capacity),
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            self.grow();
        }

        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Gives the storage back to the pool, leaving the buffer empty and
    /// without allocation.
    pub fn release(&mut self) {
        let items = mem::take(&mut self.items);
        if items.capacity() > 0 {
            T::give_back(items);
        }
    }

    fn grow(&mut self) {
        let capacity = (self.items.capacity() * 2).max(1);
        let mut grown = T::rent(capacity);
        grown.extend_from_slice(&self.items);

        let previous = mem::replace(&mut self.items, grown);
        if previous.capacity() > 0 {
            T::give_back(previous);
        }
    }
}

impl<T: Pooled + Copy> Default for GrowableBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pooled> Deref for GrowableBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T: Pooled + fmt::Debug> fmt::Debug for GrowableBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: Pooled> Drop for GrowableBuffer<T> {
    fn drop(&mut self) {
        let items = mem::take(&mut self.items);
        if items.capacity() > 0 {
            T::give_back(items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_grow() {
        let mut buffer = GrowableBuffer::<i32>::with_capacity(2);

        for i in 0..10 {
            buffer.push(i);
        }

        assert_eq!(buffer.len(), 10);
        assert!(buffer.capacity() >= 10);
        assert_eq!(buffer.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn lazy_allocation() {
        let mut buffer = GrowableBuffer::<i32>::new();
        assert_eq!(buffer.capacity(), 0);

        buffer.push(42);
        assert_eq!(&*buffer, &[42]);
    }

    #[test]
    fn release_returns_to_pool() {
        i32::with_pool(|pool| pool.clear());

        let mut buffer = GrowableBuffer::<i32>::with_capacity(8);
        buffer.push(1);
        buffer.release();

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 0);
        assert_eq!(i32::with_pool(|pool| pool.idle_count()), Some(1));
    }

    #[test]
    fn drop_returns_to_pool() {
        i32::with_pool(|pool| pool.clear());

        {
            let mut buffer = GrowableBuffer::<i32>::with_capacity(4);
            buffer.push(1);
        }

        assert_eq!(i32::with_pool(|pool| pool.idle_count()), Some(1));
    }
}
