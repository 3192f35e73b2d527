// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cooperative cancellation of long-running overlays.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use geo_lite_topology::{Error, Result};

/// Shared cancellation flag. Clones observe the same flag, so a supervisor
/// thread can keep one clone and pass another into the overlay
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. The overlay stops at its next phase boundary.
    pub fn request(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Clears a previous request so the handle can be reused.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Fails with [`Error::Interrupted`] once cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_requested() {
            return Err(Error::Interrupted);
        }
        Ok(())
    }
}
