// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Peripheral implementations for Allwinner (sunxi) SoCs.

#![no_std]
#![crate_name = "sunxi"]
#![crate_type = "rlib"]

pub mod config;
pub mod wdt;
