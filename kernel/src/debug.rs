// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Support for in-kernel debugging.
//!
//! Boards register a writer (usually a UART that is already configured) with
//! [`set_debug_writer`]. Afterwards any crate can print through it with the
//! `debug!` macro:
//!
//! ```ignore
//! use kernel::debug;
//!
//! debug!("watchdog armed: {} s", 16);
//! ```
//!
//! Every line is prefixed with the file and line number of the call site.
//! If no writer has been registered the output is dropped.

use core::fmt::{self, Arguments, Write};
use core::ptr::addr_of_mut;

/// Byte sink for debug output.
pub trait IoWrite {
    /// Write as much of `buf` as possible and return the number of bytes
    /// consumed. Returning 0 signals that the writer cannot make progress.
    fn write(&mut self, buf: &[u8]) -> usize;
}

static mut DEBUG_WRITER: Option<&'static mut dyn IoWrite> = None;

/// Register the writer used by `debug!`.
///
/// # Safety
///
/// Must be called from the single kernel thread, before any other code can
/// be printing through the previous writer.
pub unsafe fn set_debug_writer(writer: &'static mut dyn IoWrite) {
    *addr_of_mut!(DEBUG_WRITER) = Some(writer);
}

/// Adapts an [`IoWrite`] to `core::fmt::Write`, retrying short writes.
struct WriteAdapter<'a> {
    writer: &'a mut dyn IoWrite,
}

impl Write for WriteAdapter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut remaining = s.as_bytes();
        while !remaining.is_empty() {
            let written = self.writer.write(remaining);
            if written == 0 {
                return Err(fmt::Error);
            }
            remaining = &remaining[written.min(remaining.len())..];
        }
        Ok(())
    }
}

/// Format one debug line into `writer`.
pub fn write_debug_line(
    writer: &mut dyn IoWrite,
    args: Arguments,
    file_line: &(&'static str, u32),
) -> fmt::Result {
    let (file, line) = *file_line;
    let mut adapter = WriteAdapter { writer };
    adapter.write_fmt(format_args!("{}:{}: ", file, line))?;
    adapter.write_fmt(args)?;
    adapter.write_str("\r\n")
}

/// Backend of the `debug!` macro.
pub fn debug_println(args: Arguments, file_line: &(&'static str, u32)) {
    // Safety: the kernel is single threaded and `debug!` is not reentrant.
    let writer = unsafe { (*addr_of_mut!(DEBUG_WRITER)).as_deref_mut() };
    if let Some(writer) = writer {
        let _ = write_debug_line(writer, args, file_line);
    }
}

/// In-kernel `println()` debugging.
#[macro_export]
macro_rules! debug {
    () => ({
        // Allow an empty debug!() to print the location when hit
        $crate::debug!("")
    });
    ($($arg:tt)+) => ({
        $crate::debug::debug_println(format_args!($($arg)+), {
            static _FILE_LINE: (&'static str, u32) = (file!(), line!());
            &_FILE_LINE
        })
    });
}
