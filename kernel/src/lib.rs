// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Core kernel support for the sunxi watchdog driver.
//!
//! The kernel crate holds the code that chips and boards share: the Hardware
//! Interface Layer (HIL) definitions, the kernel-loop platform traits, the
//! standard error type, debug output, and the MMIO capability that drivers
//! use to reach their registers.
//!
//! Most `unsafe` code is in this kernel crate.

#![no_std]

#[macro_use]
pub mod debug;
pub mod errorcode;
pub mod hil;
pub mod platform;
pub mod utilities;

pub use crate::errorcode::ErrorCode;
