//! Exclusive animation lock.
//!
//! At most one gate animates at a time across the whole register. A gate
//! takes an [`AnimationLease`] before it starts and the lease releases the
//! lock when dropped. Every acquisition bumps a generation counter, so a
//! forced release (reset) turns any outstanding lease stale: its frames
//! can no longer write and its drop no longer touches the lock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
struct LockState {
    held: AtomicBool,
    generation: AtomicU64,
}

/// Shared busy flag with generation tracking.
#[derive(Debug, Clone, Default)]
pub struct BusyLock {
    state: Arc<LockState>,
}

impl BusyLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock if it is free.
    pub fn try_acquire(&self) -> Option<AnimationLease> {
        self.state
            .held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        let generation = self.state.generation.fetch_add(1, Ordering::AcqRel) + 1;
        Some(AnimationLease {
            state: Arc::clone(&self.state),
            generation,
        })
    }

    /// Whether an animation currently holds the lock.
    pub fn is_busy(&self) -> bool {
        self.state.held.load(Ordering::Acquire)
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.state.generation.load(Ordering::Acquire)
    }

    /// Clear the lock regardless of who holds it and invalidate every
    /// outstanding lease.
    pub fn force_release(&self) {
        self.state.generation.fetch_add(1, Ordering::AcqRel);
        self.state.held.store(false, Ordering::Release);
    }
}

/// Proof of holding the [`BusyLock`]. Releases it on drop.
#[derive(Debug)]
pub struct AnimationLease {
    state: Arc<LockState>,
    generation: u64,
}

impl AnimationLease {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False once the lock has been force-released or re-acquired.
    pub fn is_current(&self) -> bool {
        self.state.generation.load(Ordering::Acquire) == self.generation
    }
}

impl Drop for AnimationLease {
    fn drop(&mut self) {
        if self.is_current() {
            self.state.held.store(false, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusive() {
        let lock = BusyLock::new();
        let lease = lock.try_acquire().unwrap();
        assert!(lock.is_busy());
        assert!(lock.try_acquire().is_none());
        drop(lease);
        assert!(!lock.is_busy());
        assert!(lock.try_acquire().is_some());
    }

    #[test]
    fn test_force_release_makes_lease_stale() {
        let lock = BusyLock::new();
        let stale = lock.try_acquire().unwrap();
        lock.force_release();
        assert!(!lock.is_busy());
        assert!(!stale.is_current());

        let fresh = lock.try_acquire().unwrap();
        assert!(fresh.generation() > stale.generation());
        // Dropping the stale lease must not free the new holder's lock.
        drop(stale);
        assert!(lock.is_busy());
        drop(fresh);
        assert!(!lock.is_busy());
    }
}
