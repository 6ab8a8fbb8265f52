//! Generic grow-only object pool with lifecycle hooks.
//!
//! Models the visitor prefab pool: instances are created deactivated,
//! activated and reset on acquire, deactivated on release, and never
//! deallocated. The pool hands out [`PoolHandle`]s (slot indices)
//! instead of references, so the owner keeps full mutable access to the
//! pool between calls.

use tracing::warn;

/// Hooks a pool runs at each point of an item's lifecycle.
pub trait PoolLifecycle<T> {
    /// Build a fresh deactivated instance. Called when `acquire` finds
    /// no free slot.
    fn create(&mut self) -> T;

    /// Activate and reset an instance as it leaves the pool.
    fn on_acquire(&mut self, item: &mut T);

    /// Deactivate an instance as it returns to the pool.
    fn on_release(&mut self, item: &mut T);
}

/// Index of a pool slot.
///
/// Valid for the lifetime of the pool that issued it; slots are never
/// deallocated. A handle whose slot has been released is stale:
/// [`ObjectPool::get`] returns `None` for it until the slot is acquired
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolHandle(usize);

#[derive(Debug)]
struct Slot<T> {
    item: T,
    free: bool,
}

/// A grow-only pool of reusable instances.
#[derive(Debug)]
pub struct ObjectPool<T, L> {
    lifecycle: L,
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
}

impl<T, L: PoolLifecycle<T>> ObjectPool<T, L> {
    /// Create an empty pool.
    pub const fn new(lifecycle: L) -> Self {
        Self {
            lifecycle,
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Take an instance out of the pool, growing by one if none are
    /// free. Runs `on_acquire` before returning the handle.
    pub fn acquire(&mut self) -> PoolHandle {
        let index = self.next_free_index();
        if let Some(slot) = self.slots.get_mut(index) {
            slot.free = false;
            self.lifecycle.on_acquire(&mut slot.item);
        }
        PoolHandle(index)
    }

    /// Return an instance to the pool.
    ///
    /// Runs `on_release` and marks the slot free. Releasing a handle
    /// that is already free, or one this pool never issued, is ignored
    /// with a warning; the pool stays consistent either way. Returns
    /// whether the release took effect.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.0) else {
            warn!(slot = handle.0, "Release of unknown pool handle ignored");
            return false;
        };
        if slot.free {
            warn!(slot = handle.0, "Double release of pool handle ignored");
            return false;
        }
        self.lifecycle.on_release(&mut slot.item);
        slot.free = true;
        self.free.push(handle.0);
        true
    }

    /// Shared access to a live (acquired) instance.
    ///
    /// Returns `None` for freed or unknown handles, so a stale handle
    /// never observes a recycled instance.
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots
            .get(handle.0)
            .filter(|slot| !slot.free)
            .map(|slot| &slot.item)
    }

    /// Mutable access to a live (acquired) instance.
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.0)
            .filter(|slot| !slot.free)
            .map(|slot| &mut slot.item)
    }

    /// Total instances ever created.
    pub const fn created(&self) -> usize {
        self.slots.len()
    }

    /// Instances currently parked in the pool.
    pub const fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Instances currently out with callers.
    pub const fn in_use(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    fn next_free_index(&mut self) -> usize {
        if let Some(index) = self.free.pop() {
            return index;
        }
        self.slots.push(Slot {
            item: self.lifecycle.create(),
            free: true,
        });
        self.slots.len().saturating_sub(1)
    }
}
