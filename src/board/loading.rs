//! Loading indicator shared between a page model and its observers.
//!
//! A page marks a service call as outstanding by holding an [`InFlight`]
//! guard for the duration of the call. The guard releases its mark when it
//! is dropped, including when the enclosing future is dropped before it
//! completes.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Counts service calls that are currently outstanding.
///
/// Clones share the same counter, so a clone handed to a view layer observes
/// calls started by the page that owns the original.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    in_flight: Arc<AtomicUsize>,
}

impl LoadingIndicator {
    /// Returns whether any call is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }

    /// Marks a call as outstanding until the returned guard is dropped.
    #[must_use = "the call is only marked while the guard is held"]
    pub(crate) fn start(&self) -> InFlight {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        InFlight {
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

/// Marks one outstanding call. Dropping it clears the mark.
#[derive(Debug)]
pub(crate) struct InFlight {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
