// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interface for a hardware watchdog timer.

use crate::ErrorCode;

pub trait Watchdog {
    /// Arm the watchdog timer. `timeout_s` is the time in seconds after which
    /// the watchdog resets the system if it is not serviced.
    ///
    /// Returns `INVAL` if the hardware cannot count `timeout_s` seconds and
    /// `ALREADY` if the watchdog is already running.
    fn start(&self, timeout_s: u32) -> Result<(), ErrorCode>;

    /// Disable the watchdog timer.
    ///
    /// Returns `OFF` if the watchdog is not running.
    fn stop(&self) -> Result<(), ErrorCode>;

    /// Service the watchdog to let the hardware know the application
    /// is still executing.
    ///
    /// Returns `OFF` if the watchdog is not running.
    fn tickle(&self) -> Result<(), ErrorCode>;
}
