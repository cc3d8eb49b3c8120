// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Standard error enum for invoking operations

use core::fmt;

/// Standard errors in Tock.
///
/// HIL implementations convert their driver-specific errors into one of
/// these values so that boards and capsules can handle failures without
/// knowing which chip produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ErrorCode {
    /// Generic failure condition
    FAIL = 1,
    /// Underlying system is busy; retry
    BUSY = 2,
    /// The state requested is already set
    ALREADY = 3,
    /// The component is powered down
    OFF = 4,
    /// Reservation required before use
    RESERVE = 5,
    /// An invalid parameter was passed
    INVAL = 6,
    /// Parameter passed was too large
    SIZE = 7,
    /// Operation canceled by a call
    CANCEL = 8,
    /// Memory required not available
    NOMEM = 9,
    /// Operation is not supported
    NOSUPPORT = 10,
    /// Device is not available
    NODEVICE = 11,
    /// Device is not physically installed
    UNINSTALLED = 12,
    /// Packet transmission not acknowledged
    NOACK = 13,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::FAIL => "FAIL",
            ErrorCode::BUSY => "BUSY",
            ErrorCode::ALREADY => "ALREADY",
            ErrorCode::OFF => "OFF",
            ErrorCode::RESERVE => "RESERVE",
            ErrorCode::INVAL => "INVAL",
            ErrorCode::SIZE => "SIZE",
            ErrorCode::CANCEL => "CANCEL",
            ErrorCode::NOMEM => "NOMEM",
            ErrorCode::NOSUPPORT => "NOSUPPORT",
            ErrorCode::NODEVICE => "NODEVICE",
            ErrorCode::UNINSTALLED => "UNINSTALLED",
            ErrorCode::NOACK => "NOACK",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use core::fmt::Write;

    struct Name {
        buf: [u8; 16],
        len: usize,
    }

    impl Write for Name {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let end = self.len + s.len();
            self.buf[self.len..end].copy_from_slice(s.as_bytes());
            self.len = end;
            Ok(())
        }
    }

    fn name(err: ErrorCode) -> Name {
        let mut name = Name {
            buf: [0; 16],
            len: 0,
        };
        write!(name, "{}", err).unwrap();
        name
    }

    #[test]
    fn display_uses_variant_name() {
        let inval = name(ErrorCode::INVAL);
        assert_eq!(&inval.buf[..inval.len], b"INVAL");
        let nodevice = name(ErrorCode::NODEVICE);
        assert_eq!(&nodevice.buf[..nodevice.len], b"NODEVICE");
    }
}
