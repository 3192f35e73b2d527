// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Overlay configuration loaded from environment variables.

use crate::interrupt::Interrupt;

/// Overlay configuration.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Check that split edges only meet at vertices before labelling.
    pub validate_noding: bool,
    /// Skip input parts that cannot contribute to INTERSECTION or DIFFERENCE.
    pub envelope_filter: bool,
    /// Sanity-check result areas against the inputs.
    pub check_result: bool,
    /// Cancellation handle checked between phases.
    pub interrupt: Option<Interrupt>,
}

impl OverlayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            validate_noding: env_flag("GEO_LITE_VALIDATE_NODING", true),
            envelope_filter: env_flag("GEO_LITE_ENVELOPE_FILTER", true),
            check_result: env_flag("GEO_LITE_CHECK_RESULT", false),
            interrupt: None,
        }
    }

    /// Attaches a cancellation handle.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
