//! Debug-only validation support.
//!
//! The table runs user code (key extraction, hashing, predicates) while
//! its bucket array may be mid-mutation. In debug builds a per-instance
//! guard panics if that user code calls back into the same table. In
//! release builds the guard compiles to a zero-cost no-op.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-instance reentrancy tracker. Public entry points open a section
/// with `let _g = self.checks.enter();`.
#[derive(Debug)]
pub(crate) struct DebugChecks {
    #[cfg(debug_assertions)]
    entered: Cell<bool>,
    // Keeps the owning container !Send + !Sync, matching its
    // single-threaded contract.
    _nosend: PhantomData<*mut ()>,
}

impl DebugChecks {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            entered: Cell::new(false),
            _nosend: PhantomData,
        }
    }

    /// Enter a guarded section. Panics in debug builds if the section is
    /// already open.
    #[inline]
    pub(crate) fn enter(&self) -> SectionGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.entered.get(),
                "reentrancy detected: nested entry into hash table"
            );
            self.entered.set(true);
            return SectionGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return SectionGuard { _z: PhantomData };
        }
    }
}

impl Default for DebugChecks {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`DebugChecks::enter`].
pub(crate) struct SectionGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugChecks,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for SectionGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.owner.entered.get());
            self.owner.entered.set(false);
        }
    }
}
