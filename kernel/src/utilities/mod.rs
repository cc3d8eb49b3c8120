// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Utility functions and types provided by the kernel crate.

pub mod mmio;

/// The Tock Register Interface.
///
/// This is a re-export of the `tock-register-interface` crate provided for
/// convenience.
///
/// Drivers use the bitfield definitions and the `interfaces` traits to
/// describe hardware registers; the [`mmio`] module supplies the accesses.
pub mod registers {
    pub use tock_registers::fields::{Field, FieldValue};
    pub use tock_registers::interfaces;
    pub use tock_registers::register_bitfields;
    pub use tock_registers::{LocalRegisterCopy, RegisterLongName};
}
