// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Capability for 32-bit memory-mapped register accesses.
//!
//! Drivers whose register offsets are only known at runtime cannot describe
//! their peripheral with a fixed `#[repr(C)]` register struct. They instead
//! take an `Mmio` implementation and compute addresses themselves. On
//! hardware this is [`VolatileMmio`]; tests substitute a model of the
//! peripheral.

/// 32-bit register access at absolute addresses.
pub trait Mmio {
    /// Read the 32-bit register at `addr`.
    fn read32(&self, addr: usize) -> u32;

    /// Write `value` to the 32-bit register at `addr`.
    fn write32(&self, addr: usize, value: u32);
}

/// Passthrough implementation that performs volatile reads and writes.
pub struct VolatileMmio {
    _private: (),
}

impl VolatileMmio {
    /// Create the MMIO capability.
    ///
    /// # Safety
    ///
    /// Every address later passed to `read32`/`write32` must be a mapped,
    /// 4-byte aligned device register that is safe to access with volatile
    /// 32-bit loads and stores.
    pub const unsafe fn new() -> VolatileMmio {
        VolatileMmio { _private: () }
    }
}

impl Mmio for VolatileMmio {
    #[inline]
    fn read32(&self, addr: usize) -> u32 {
        // Safety: validity of `addr` was promised when constructing `self`.
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    #[inline]
    fn write32(&self, addr: usize, value: u32) {
        // Safety: validity of `addr` was promised when constructing `self`.
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) };
    }
}
