// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interface for configuring a watchdog

/// Watchdog hooks called by the kernel main loop.
///
/// The loop calls `setup()` once before it starts, `tickle()` on every pass,
/// and brackets sleep with `suspend()` and `resume()`. None of the hooks can
/// fail: an implementation that cannot arm its hardware reports the problem
/// and leaves the system running unprotected.
pub trait WatchDog {
    /// Arm the watchdog with the period chosen by the implementation. The
    /// period must be long enough to survive a normal pass of the loop and
    /// short enough to catch a hang.
    fn setup(&self) {}

    /// Restart the countdown. Does nothing if the watchdog is not running.
    fn tickle(&self) {}

    /// Stop the countdown before the chip sleeps.
    fn suspend(&self) {}

    /// Restart the watchdog after sleep, with the same period `setup()`
    /// chose.
    fn resume(&self) {
        self.tickle();
    }
}

/// Boards without a watchdog use the unit type.
impl WatchDog for () {}

#[cfg(test)]
mod tests {
    use super::WatchDog;

    #[test]
    fn unit_watchdog_is_inert() {
        let wdt: &dyn WatchDog = &();
        wdt.setup();
        wdt.tickle();
        wdt.suspend();
        wdt.resume();
    }
}
