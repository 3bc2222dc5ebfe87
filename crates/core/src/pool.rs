//! Bounded scratchpad pool
//!
//! Hands out exclusive leases on pre-allocated `ScratchPadV2` buffers to
//! concurrent hash calls. `acquire` blocks while every pad is checked out;
//! the lease returns its pad in `Drop`, so a panicking or failing hash call
//! never starves the pool.
//!
//! Pads are handed out dirty. Both pipelines overwrite their region in
//! stage 1 before reading it, so nothing leaks between tenants.

use std::ops::{Deref, DerefMut};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::params::Hash;
use crate::scratchpad::ScratchPadV2;
use crate::{Algorithm, v1, v2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fixed-capacity pool of v2-sized scratchpads
pub struct ScratchPool {
    free: Mutex<Vec<ScratchPadV2>>,
    available: Condvar,
    capacity: usize,
}

impl ScratchPool {
    /// Create a pool holding `capacity` pads (at least one)
    ///
    /// Allocates `capacity` × ~440 KB up front.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let free = (0..capacity).map(|_| ScratchPadV2::new()).collect();

        tracing::debug!(capacity, "scratchpad pool created");

        Self {
            free: Mutex::new(free),
            available: Condvar::new(),
            capacity,
        }
    }

    /// Number of pads owned by the pool
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pads currently not leased
    pub fn available(&self) -> usize {
        self.lock().len()
    }

    /// Lease a pad, blocking until one is free
    pub fn acquire(&self) -> ScratchLease<'_> {
        let mut free = self.lock();
        loop {
            if let Some(pad) = free.pop() {
                return ScratchLease {
                    pool: self,
                    pad: Some(pad),
                };
            }
            tracing::trace!("all scratchpads leased, waiting");
            free = self
                .available
                .wait(free)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Lease a pad if one is free right now
    pub fn try_acquire(&self) -> Option<ScratchLease<'_>> {
        self.lock().pop().map(|pad| ScratchLease {
            pool: self,
            pad: Some(pad),
        })
    }

    /// v1 hash on a leased pad
    pub fn run_v1(&self, input: &[u8]) -> Result<Hash> {
        let mut lease = self.acquire();
        v1::compute(input, lease.v1_bytes_mut())
    }

    /// v2 hash on a leased pad
    pub fn run_v2(&self, input: &[u8]) -> Result<Hash> {
        let mut lease = self.acquire();
        v2::xelis_hash(input, &mut lease)
    }

    /// Hash with the given generation on a leased pad
    pub fn hash(&self, algorithm: Algorithm, input: &[u8]) -> Result<Hash> {
        match algorithm {
            Algorithm::V1 => self.run_v1(input),
            Algorithm::V2 => self.run_v2(input),
        }
    }

    /// Hash by algorithm tag (`xel/0`, `xel/1`); unknown tags run v1
    pub fn hash_named(&self, algorithm: &str, input: &[u8]) -> Result<Hash> {
        self.hash(Algorithm::from_name(algorithm), input)
    }

    /// Hash every input on the rayon thread pool, results in input order
    ///
    /// At most `capacity` hashes run at once; other tasks block on the pool.
    #[cfg(feature = "parallel")]
    pub fn hash_batch<I>(&self, algorithm: Algorithm, inputs: &[I]) -> Vec<Result<Hash>>
    where
        I: AsRef<[u8]> + Sync,
    {
        inputs
            .par_iter()
            .map(|input| self.hash(algorithm, input.as_ref()))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ScratchPadV2>> {
        // The free list stays consistent even if a holder panicked
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, pad: ScratchPadV2) {
        self.lock().push(pad);
        self.available.notify_one();
    }
}

/// Exclusive lease on one pooled scratchpad, returned on drop
pub struct ScratchLease<'a> {
    pool: &'a ScratchPool,
    pad: Option<ScratchPadV2>,
}

impl Deref for ScratchLease<'_> {
    type Target = ScratchPadV2;

    fn deref(&self) -> &ScratchPadV2 {
        // Only `Drop` takes the pad out
        match &self.pad {
            Some(pad) => pad,
            None => unreachable!("scratchpad lease used after release"),
        }
    }
}

impl DerefMut for ScratchLease<'_> {
    fn deref_mut(&mut self) -> &mut ScratchPadV2 {
        match &mut self.pad {
            Some(pad) => pad,
            None => unreachable!("scratchpad lease used after release"),
        }
    }
}

impl Drop for ScratchLease<'_> {
    fn drop(&mut self) {
        if let Some(pad) = self.pad.take() {
            self.pool.release(pad);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_zero_capacity_is_clamped() {
        let pool = ScratchPool::new(0);
        assert_eq!(pool.capacity(), 1);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_lease_returns_on_drop() {
        let pool = ScratchPool::new(2);

        let first = pool.acquire();
        let second = pool.acquire();
        assert_eq!(pool.available(), 0);
        assert!(pool.try_acquire().is_none());

        drop(first);
        assert_eq!(pool.available(), 1);
        drop(second);
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn test_lease_returns_on_error_path() {
        let pool = ScratchPool::new(1);
        assert!(pool.run_v1(&[0u8; 10]).is_err());
        assert!(pool.run_v2(&[]).is_err());
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_lease_returns_on_panic() {
        let pool = ScratchPool::new(1);

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let _lease = pool.acquire();
            panic!("hash call blew up");
        }));

        assert!(outcome.is_err());
        assert_eq!(pool.available(), 1);
        assert!(pool.run_v2(b"still usable").is_ok());
    }

    #[test]
    fn test_acquire_blocks_until_release() {
        let pool = ScratchPool::new(1);
        let woken = AtomicUsize::new(0);

        thread::scope(|s| {
            let lease = pool.acquire();

            s.spawn(|| {
                let _lease = pool.acquire();
                woken.fetch_add(1, Ordering::SeqCst);
            });

            thread::sleep(Duration::from_millis(50));
            assert_eq!(woken.load(Ordering::SeqCst), 0);
            drop(lease);
        });

        assert_eq!(woken.load(Ordering::SeqCst), 1);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_concurrent_calls_match_single_threaded() {
        let pool = ScratchPool::new(4);
        let inputs: Vec<Vec<u8>> = (0..16u8).map(|i| vec![i; 200]).collect();

        let mut pad = ScratchPadV2::new();
        let expected_v1: Vec<Hash> = inputs
            .iter()
            .map(|input| v1::compute(input, pad.v1_bytes_mut()).unwrap())
            .collect();
        let expected_v2: Vec<Hash> = inputs
            .iter()
            .map(|input| v2::xelis_hash(input, &mut pad).unwrap())
            .collect();

        thread::scope(|s| {
            for (i, input) in inputs.iter().enumerate() {
                let pool = &pool;
                let expected_v1 = &expected_v1;
                let expected_v2 = &expected_v2;
                s.spawn(move || {
                    assert_eq!(pool.run_v1(input).unwrap(), expected_v1[i]);
                    assert_eq!(pool.run_v2(input).unwrap(), expected_v2[i]);
                });
            }
        });

        assert_eq!(pool.available(), 4);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_hash_batch_preserves_order() {
        let pool = ScratchPool::new(3);
        let inputs: Vec<Vec<u8>> = (0..10u8).map(|i| vec![i; 64]).collect();

        let results = pool.hash_batch(Algorithm::V2, &inputs);
        assert_eq!(results.len(), inputs.len());

        for (input, result) in inputs.iter().zip(results) {
            assert_eq!(result.unwrap(), pool.run_v2(input).unwrap());
        }
    }
}
