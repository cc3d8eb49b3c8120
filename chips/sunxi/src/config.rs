// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Compile-time configuration of the sunxi chip crate.
//!
//! Like the kernel's configuration, options live in a typed `const` object so
//! that every code path is type-checked regardless of which features a board
//! enables. This is the only place in the crate where `cfg!(feature = ..)`
//! may be used.

use crate::wdt::{Generation, WdtTimeout};

/// Timeout used when the kernel loop arms the watchdog through
/// `WatchDog::setup()`. Must be one of the durations the hardware can count;
/// anything else fails the build.
const DEFAULT_WDT_TIMEOUT_S: u32 = 16;

/// Data structure holding compile-time configuration options.
pub struct Config {
    /// Watchdog register layout present on this SoC.
    pub generation: Generation,

    /// Watchdog timeout armed by the kernel loop.
    pub default_timeout: WdtTimeout,

    /// Whether the watchdog driver traces reloads and stops to the debug
    /// output.
    ///
    /// Arming and failures are always reported. Reloads happen on every pass
    /// of the kernel loop, so tracing them is only useful when debugging the
    /// driver itself.
    pub debug_wdt: bool,
}

/// The configuration of this build.
pub const CONFIG: Config = Config {
    generation: if cfg!(feature = "sun6i") {
        Generation::Sun6i
    } else {
        Generation::Sun4i
    },
    default_timeout: WdtTimeout::new_const(DEFAULT_WDT_TIMEOUT_S),
    debug_wdt: cfg!(feature = "debug_wdt"),
};
