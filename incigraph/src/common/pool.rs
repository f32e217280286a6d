//! Free-list pool of vectors keyed by capacity.
//!
//! Builders allocate one small buffer per vertex that has an out-edge. Without
//! reuse, building many graphs in a row would spend most of its time in the
//! allocator, so finished buffers are returned to a pool and handed out again
//! to the next builder.
//!
//! The pool groups buffers into power-of-two buckets by their capacity. A
//! buffer rented from bucket `b` has capacity at least `2^b`. Every bucket is
//! bounded; a returned buffer that does not fit is simply deallocated.

use std::cell::RefCell;

use crate::core::Endpoints;

const BUCKET_COUNT: usize = 31;
const DEFAULT_MAX_PER_BUCKET: usize = 32;

/// Pool of vectors of type `T`.
///
/// Rented vectors are always empty and exclusively owned by the renter until
/// they are given back.
#[derive(Debug)]
pub struct ArrayPool<T> {
    buckets: Vec<Vec<Vec<T>>>,
    max_per_bucket: usize,
}

impl<T> ArrayPool<T> {
    pub fn new() -> Self {
        Self::with_max_per_bucket(DEFAULT_MAX_PER_BUCKET)
    }

    /// Creates a pool that keeps at most `max_per_bucket` idle buffers of every
    /// capacity class.
    pub fn with_max_per_bucket(max_per_bucket: usize) -> Self {
        Self {
            buckets: (0..BUCKET_COUNT).map(|_| Vec::new()).collect(),
            max_per_bucket,
        }
    }

    /// Returns an empty vector with capacity of at least `min_capacity`.
    pub fn rent(&mut self, min_capacity: usize) -> Vec<T> {
        let bucket = bucket_for_request(min_capacity);

        match self.buckets.get_mut(bucket) {
            Some(idle) => match idle.pop() {
                Some(vec) => {
                    debug_assert!(vec.is_empty());
                    debug_assert!(vec.capacity() >= min_capacity);
                    vec
                }
                None => Vec::with_capacity(1 << bucket),
            },
            // Too large to be pooled.
            None => Vec::with_capacity(min_capacity),
        }
    }

    /// Returns the vector to the pool.
    ///
    /// The content is dropped, only the allocation is kept.
    pub fn give_back(&mut self, mut vec: Vec<T>) {
        vec.clear();

        let capacity = vec.capacity();
        if capacity == 0 {
            return;
        }

        let bucket = bucket_for_capacity(capacity);
        let Some(idle) = self.buckets.get_mut(bucket) else {
            return;
        };

        if idle.len() < self.max_per_bucket {
            idle.push(vec);
        } else {
            tracing::debug!(capacity, "array pool bucket is full, dropping buffer");
        }
    }

    /// Returns the number of idle buffers held by the pool.
    pub fn idle_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Deallocates all idle buffers.
    pub fn clear(&mut self) {
        for idle in self.buckets.iter_mut() {
            idle.clear();
        }
    }
}

impl<T> Default for ArrayPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Smallest bucket whose guaranteed capacity is enough for the request.
fn bucket_for_request(min_capacity: usize) -> usize {
    if min_capacity <= 1 {
        0
    } else {
        (usize::BITS - (min_capacity - 1).leading_zeros()) as usize
    }
}

// Largest bucket whose guaranteed capacity the buffer satisfies.
fn bucket_for_capacity(capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (usize::BITS - 1 - capacity.leading_zeros()) as usize
}

/// Element types that have a thread-local [`ArrayPool`] shared by all builders
/// on the thread.
pub trait Pooled: Sized + 'static {
    /// Runs the closure with exclusive access to the thread-local pool.
    ///
    /// Returns `None` if the pool is not accessible, which happens during
    /// thread teardown or on reentrant access.
    fn with_pool<R>(f: impl FnOnce(&mut ArrayPool<Self>) -> R) -> Option<R>;

    /// Rents a vector from the thread-local pool.
    fn rent(min_capacity: usize) -> Vec<Self> {
        Self::with_pool(|pool| pool.rent(min_capacity))
            .unwrap_or_else(|| Vec::with_capacity(min_capacity))
    }

    /// Returns a vector to the thread-local pool.
    fn give_back(vec: Vec<Self>) {
        // If the pool is gone, the vector is dropped with the closure.
        Self::with_pool(move |pool| pool.give_back(vec));
    }
}

macro_rules! impl_pooled {
    ($($ty:ty),*) => {
        $(
            impl Pooled for $ty {
                fn with_pool<R>(f: impl FnOnce(&mut ArrayPool<Self>) -> R) -> Option<R> {
                    thread_local! {
                        static POOL: RefCell<ArrayPool<$ty>> = RefCell::new(ArrayPool::new());
                    }

                    POOL.try_with(|pool| {
                        pool.try_borrow_mut().ok().map(|mut pool| f(&mut *pool))
                    })
                    .ok()
                    .flatten()
                }
            }
        )*
    };
}

impl_pooled!(i32, Endpoints);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets() {
        assert_eq!(bucket_for_request(0), 0);
        assert_eq!(bucket_for_request(1), 0);
        assert_eq!(bucket_for_request(2), 1);
        assert_eq!(bucket_for_request(3), 2);
        assert_eq!(bucket_for_request(4), 2);
        assert_eq!(bucket_for_request(5), 3);

        assert_eq!(bucket_for_capacity(1), 0);
        assert_eq!(bucket_for_capacity(3), 1);
        assert_eq!(bucket_for_capacity(4), 2);
        assert_eq!(bucket_for_capacity(7), 2);
    }

    #[test]
    fn rent_has_capacity() {
        let mut pool = ArrayPool::<i32>::new();

        for n in [0, 1, 2, 3, 7, 8, 100] {
            let vec = pool.rent(n);
            assert!(vec.is_empty());
            assert!(vec.capacity() >= n);
        }
    }

    #[test]
    fn reuse() {
        let mut pool = ArrayPool::<i32>::new();

        let mut vec = pool.rent(8);
        vec.extend([1, 2, 3]);
        let ptr = vec.as_ptr();
        pool.give_back(vec);

        assert_eq!(pool.idle_count(), 1);

        let vec = pool.rent(5);
        assert!(vec.is_empty());
        assert_eq!(vec.as_ptr(), ptr);
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn too_small_is_not_reused() {
        let mut pool = ArrayPool::<i32>::new();

        pool.give_back(Vec::with_capacity(4));

        let vec = pool.rent(5);
        assert!(vec.capacity() >= 5);
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn bounded_buckets() {
        let mut pool = ArrayPool::<i32>::with_max_per_bucket(2);

        for _ in 0..5 {
            pool.give_back(Vec::with_capacity(4));
        }

        assert_eq!(pool.idle_count(), 2);

        pool.clear();
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn empty_vec_is_not_pooled() {
        let mut pool = ArrayPool::<i32>::new();
        pool.give_back(Vec::new());
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn thread_local_pool() {
        let vec = i32::rent(16);
        assert!(vec.capacity() >= 16);
        i32::give_back(vec);

        let idle = i32::with_pool(|pool| pool.idle_count()).unwrap();
        assert!(idle >= 1);
    }
}
