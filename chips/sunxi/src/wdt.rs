// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Watchdog timer driver for Allwinner (sunxi) SoCs.
//!
//! The watchdog lives inside the timer block. Two generations of the IP place
//! its registers differently:
//!
//! | Generation     | CTRL | CFG  | MODE | Timeout field | Reset action    |
//! |----------------|------|------|------|---------------|-----------------|
//! | sun4i (A10..)  | 0x00 | 0x04 | 0x04 | bits 3..6     | CFG[1] = 1      |
//! | sun6i (A31..)  | 0x10 | 0x14 | 0x18 | bits 4..7     | CFG[1:0] = 0b01 |
//!
//! On sun4i the configuration and mode registers are the same register.
//!
//! The countdown only restarts when the restart bit is written together with
//! the key `0x0A57` to the control register; writes without the key are
//! ignored by the hardware.
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! use kernel::utilities::mmio::VolatileMmio;
//! use sunxi::wdt::{Generation, Wdt};
//!
//! static MMIO: VolatileMmio = unsafe { VolatileMmio::new() };
//!
//! let wdt = Wdt::new(&MMIO, Generation::Sun6i.default_base(), Generation::Sun6i);
//! wdt.start(10)?;
//! ```

use core::cell::Cell;
use core::fmt;
use core::marker::PhantomData;

use kernel::debug;
use kernel::hil;
use kernel::platform::watchdog::WatchDog;
use kernel::utilities::mmio::Mmio;
use kernel::utilities::registers::interfaces::{ReadWriteable, Readable, Writeable};
use kernel::utilities::registers::{register_bitfields, Field, FieldValue, RegisterLongName};
use kernel::ErrorCode;

use crate::config::CONFIG;

register_bitfields![u32,
    CTRL [
        /// Restart the countdown. Only honored together with KEY.
        RESTART OFFSET(0) NUMBITS(1) [],
        /// Write access key
        KEY OFFSET(1) NUMBITS(15) [
            Unlock = 0x0A57
        ]
    ],
    CFG [
        /// Action taken on expiry. Only the bits in `WdtLayout::reset_mask`
        /// exist on a given generation.
        ACTION OFFSET(0) NUMBITS(2) []
    ],
    MODE [
        /// Watchdog enable
        EN OFFSET(0) NUMBITS(1) []
    ]
];

/// Width of the timeout field in the mode register.
const TIMEOUT_MASK: u32 = 0xF;

/// Register placement of one watchdog generation.
#[derive(Debug, PartialEq, Eq)]
pub struct WdtLayout {
    /// Byte offset of the control (reload) register.
    pub ctrl_offset: usize,
    /// Byte offset of the configuration (expiry action) register.
    pub cfg_offset: usize,
    /// Byte offset of the mode (enable and timeout) register.
    pub mode_offset: usize,
    /// Position of the 4-bit timeout field in the mode register.
    pub timeout_shift: usize,
    /// Configuration bits that select the expiry action.
    pub reset_mask: u32,
    /// Value of `reset_mask` bits that selects a full system reset.
    pub reset_value: u32,
}

impl WdtLayout {
    fn timeout_field(&self) -> Field<u32, MODE::Register> {
        Field::<u32, MODE::Register>::new(TIMEOUT_MASK, self.timeout_shift)
    }

    fn reset_action(&self) -> FieldValue<u32, CFG::Register> {
        FieldValue::<u32, CFG::Register>::new(self.reset_mask, 0, self.reset_value)
    }
}

pub const SUN4I_WDT_LAYOUT: WdtLayout = WdtLayout {
    ctrl_offset: 0x00,
    cfg_offset: 0x04,
    mode_offset: 0x04,
    timeout_shift: 3,
    reset_mask: 0x02,
    reset_value: 0x02,
};

pub const SUN6I_WDT_LAYOUT: WdtLayout = WdtLayout {
    ctrl_offset: 0x10,
    cfg_offset: 0x14,
    mode_offset: 0x18,
    timeout_shift: 4,
    reset_mask: 0x03,
    reset_value: 0x01,
};

/// Watchdog IP generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generation {
    /// sun4i layout (A10, A13, A20, ...).
    Sun4i,
    /// sun6i layout (A31, H3, A64, ...).
    Sun6i,
}

impl Generation {
    /// Pick the generation named by a device tree `compatible` string.
    ///
    /// There is no fallback: programming a watchdog with the wrong layout
    /// would leave it silently unarmed.
    pub fn from_compatible(compatible: &str) -> Result<Generation, WdtError> {
        match compatible {
            "allwinner,sun4i-a10-wdt" => Ok(Generation::Sun4i),
            "allwinner,sun6i-a31-wdt" => Ok(Generation::Sun6i),
            _ => Err(WdtError::UnknownGeneration),
        }
    }

    pub fn layout(self) -> &'static WdtLayout {
        match self {
            Generation::Sun4i => &SUN4I_WDT_LAYOUT,
            Generation::Sun6i => &SUN6I_WDT_LAYOUT,
        }
    }

    pub const fn compatible(self) -> &'static str {
        match self {
            Generation::Sun4i => "allwinner,sun4i-a10-wdt",
            Generation::Sun6i => "allwinner,sun6i-a31-wdt",
        }
    }

    /// Address of the watchdog register window inside the timer block.
    pub const fn default_base(self) -> usize {
        match self {
            Generation::Sun4i => 0x01C2_0C90,
            Generation::Sun6i => 0x01C2_0CA0,
        }
    }
}

/// Timeouts the watchdog counter supports.
///
/// The hardware only counts these durations; there is no setting for 7, 9,
/// 11, 13 or 15 seconds, nor for anything above 16.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WdtTimeout {
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S8,
    S10,
    S12,
    S14,
    S16,
}

impl WdtTimeout {
    pub const MIN: WdtTimeout = WdtTimeout::S1;
    pub const MAX: WdtTimeout = WdtTimeout::S16;

    pub const fn from_secs(seconds: u32) -> Option<WdtTimeout> {
        match seconds {
            1 => Some(WdtTimeout::S1),
            2 => Some(WdtTimeout::S2),
            3 => Some(WdtTimeout::S3),
            4 => Some(WdtTimeout::S4),
            5 => Some(WdtTimeout::S5),
            6 => Some(WdtTimeout::S6),
            8 => Some(WdtTimeout::S8),
            10 => Some(WdtTimeout::S10),
            12 => Some(WdtTimeout::S12),
            14 => Some(WdtTimeout::S14),
            16 => Some(WdtTimeout::S16),
            _ => None,
        }
    }

    /// Like `from_secs`, for `const` items only: an unsupported value fails
    /// const evaluation. Runtime callers must use `from_secs` or `try_from`.
    pub(crate) const fn new_const(seconds: u32) -> WdtTimeout {
        match WdtTimeout::from_secs(seconds) {
            Some(timeout) => timeout,
            None => panic!("unsupported watchdog timeout"),
        }
    }

    pub const fn seconds(self) -> u32 {
        match self {
            WdtTimeout::S1 => 1,
            WdtTimeout::S2 => 2,
            WdtTimeout::S3 => 3,
            WdtTimeout::S4 => 4,
            WdtTimeout::S5 => 5,
            WdtTimeout::S6 => 6,
            WdtTimeout::S8 => 8,
            WdtTimeout::S10 => 10,
            WdtTimeout::S12 => 12,
            WdtTimeout::S14 => 14,
            WdtTimeout::S16 => 16,
        }
    }

    /// Value of the mode register's timeout field.
    pub const fn code(self) -> u32 {
        match self {
            WdtTimeout::S1 => 0x1,
            WdtTimeout::S2 => 0x2,
            WdtTimeout::S3 => 0x3,
            WdtTimeout::S4 => 0x4,
            WdtTimeout::S5 => 0x5,
            WdtTimeout::S6 => 0x6,
            WdtTimeout::S8 => 0x7,
            WdtTimeout::S10 => 0x8,
            WdtTimeout::S12 => 0x9,
            WdtTimeout::S14 => 0xA,
            WdtTimeout::S16 => 0xB,
        }
    }
}

impl TryFrom<u32> for WdtTimeout {
    type Error = WdtError;

    fn try_from(seconds: u32) -> Result<WdtTimeout, WdtError> {
        WdtTimeout::from_secs(seconds).ok_or(WdtError::UnsupportedTimeout)
    }
}

/// Hardware code for a timeout of `seconds`.
pub fn encode(seconds: u32) -> Result<u32, WdtError> {
    WdtTimeout::try_from(seconds).map(WdtTimeout::code)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WdtError {
    /// The requested timeout has no hardware encoding.
    UnsupportedTimeout,
    /// No register layout matches the requested generation.
    UnknownGeneration,
    /// The operation is not allowed in the current state.
    InvalidStateTransition,
}

impl fmt::Display for WdtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WdtError::UnsupportedTimeout => f.write_str("unsupported timeout"),
            WdtError::UnknownGeneration => f.write_str("unknown watchdog generation"),
            WdtError::InvalidStateTransition => f.write_str("invalid state transition"),
        }
    }
}

impl From<WdtError> for ErrorCode {
    fn from(err: WdtError) -> ErrorCode {
        match err {
            WdtError::UnsupportedTimeout => ErrorCode::INVAL,
            WdtError::UnknownGeneration => ErrorCode::NODEVICE,
            WdtError::InvalidStateTransition => ErrorCode::OFF,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WdtState {
    /// Never armed since construction.
    Uninitialized,
    /// Counting down; must be reloaded before it expires.
    Armed,
    /// Disabled by `stop()`. The timeout must be given again to re-arm.
    Stopped,
}

/// One watchdog register at a layout-dependent address.
struct WdtRegister<'a, M: Mmio, R: RegisterLongName> {
    mmio: &'a M,
    addr: usize,
    associated_register: PhantomData<R>,
}

impl<'a, M: Mmio, R: RegisterLongName> WdtRegister<'a, M, R> {
    fn new(mmio: &'a M, addr: usize) -> Self {
        WdtRegister {
            mmio,
            addr,
            associated_register: PhantomData,
        }
    }
}

impl<M: Mmio, R: RegisterLongName> Readable for WdtRegister<'_, M, R> {
    type T = u32;
    type R = R;

    fn get(&self) -> u32 {
        self.mmio.read32(self.addr)
    }
}

impl<M: Mmio, R: RegisterLongName> Writeable for WdtRegister<'_, M, R> {
    type T = u32;
    type R = R;

    fn set(&self, value: u32) {
        self.mmio.write32(self.addr, value);
    }
}

pub struct Wdt<'a, M: Mmio> {
    mmio: &'a M,
    base: usize,
    generation: Generation,
    layout: &'static WdtLayout,
    state: Cell<WdtState>,
    timeout: Cell<Option<WdtTimeout>>,
    /// Stopped by the kernel loop's `suspend()`, not by a client.
    suspended: Cell<bool>,
}

impl<'a, M: Mmio> Wdt<'a, M> {
    /// Create the driver for the watchdog whose register window starts at
    /// `base`. Nothing is written until the watchdog is started.
    ///
    /// At most one `Wdt` may drive a given `base`.
    pub fn new(mmio: &'a M, base: usize, generation: Generation) -> Wdt<'a, M> {
        Wdt {
            mmio,
            base,
            generation,
            layout: generation.layout(),
            state: Cell::new(WdtState::Uninitialized),
            timeout: Cell::new(None),
            suspended: Cell::new(false),
        }
    }

    /// Create the driver for the generation and address configured for this
    /// build.
    pub fn from_config(mmio: &'a M) -> Wdt<'a, M> {
        let generation = CONFIG.generation;
        Wdt::new(mmio, generation.default_base(), generation)
    }

    /// Create the driver for a device described by a device tree node.
    pub fn probe(mmio: &'a M, base: usize, compatible: &str) -> Result<Wdt<'a, M>, WdtError> {
        let generation = Generation::from_compatible(compatible)?;
        Ok(Wdt::new(mmio, base, generation))
    }

    fn ctrl(&self) -> WdtRegister<'a, M, CTRL::Register> {
        WdtRegister::new(self.mmio, self.base + self.layout.ctrl_offset)
    }

    fn cfg(&self) -> WdtRegister<'a, M, CFG::Register> {
        WdtRegister::new(self.mmio, self.base + self.layout.cfg_offset)
    }

    fn mode(&self) -> WdtRegister<'a, M, MODE::Register> {
        WdtRegister::new(self.mmio, self.base + self.layout.mode_offset)
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn layout(&self) -> &'static WdtLayout {
        self.layout
    }

    pub fn state(&self) -> WdtState {
        self.state.get()
    }

    pub fn is_armed(&self) -> bool {
        self.state.get() == WdtState::Armed
    }

    /// Timeout of the most recent arming, if any.
    pub fn timeout(&self) -> Option<WdtTimeout> {
        self.timeout.get()
    }

    /// Arm the watchdog with a timeout of `seconds`.
    pub fn start(&self, seconds: u32) -> Result<(), WdtError> {
        let timeout = WdtTimeout::try_from(seconds)?;
        self.start_timeout(timeout)
    }

    /// Arm the watchdog. Allowed when it has never been armed or after
    /// `stop()`.
    pub fn start_timeout(&self, timeout: WdtTimeout) -> Result<(), WdtError> {
        if self.is_armed() {
            return Err(WdtError::InvalidStateTransition);
        }

        self.arm(timeout);
        debug!(
            "sunxi wdt: armed ({:?}), {} s timeout",
            self.generation,
            timeout.seconds()
        );
        Ok(())
    }

    // The order matters: the reload latches the new timeout, and the expiry
    // action must be set before the counter is enabled.
    fn arm(&self, timeout: WdtTimeout) {
        let mode = self.mode();

        mode.modify(self.layout.timeout_field().val(timeout.code()));
        self.reload_unchecked();
        self.cfg().modify(self.layout.reset_action());
        mode.modify(MODE::EN::SET);

        self.timeout.set(Some(timeout));
        self.state.set(WdtState::Armed);
        self.suspended.set(false);
    }

    /// Restart the countdown.
    pub fn reload(&self) -> Result<(), WdtError> {
        if !self.is_armed() {
            return Err(WdtError::InvalidStateTransition);
        }

        self.reload_unchecked();
        if CONFIG.debug_wdt {
            debug!("sunxi wdt: reload");
        }
        Ok(())
    }

    /// Write the reload command regardless of the driver state.
    ///
    /// For early boot code that pets a watchdog armed by an earlier stage.
    pub fn reload_unchecked(&self) {
        self.ctrl().write(CTRL::KEY::Unlock + CTRL::RESTART::SET);
    }

    /// Disable the watchdog.
    ///
    /// This clears the whole mode register, timeout included.
    pub fn stop(&self) -> Result<(), WdtError> {
        if !self.is_armed() {
            return Err(WdtError::InvalidStateTransition);
        }

        self.mode().set(0);
        self.state.set(WdtState::Stopped);
        self.suspended.set(false);
        if CONFIG.debug_wdt {
            debug!("sunxi wdt: stopped");
        }
        Ok(())
    }

    /// Reset the SoC through the watchdog.
    ///
    /// Arms the shortest timeout with the system reset action from any
    /// state. The caller must stop reloading and wait for the reset.
    pub fn trigger_system_reset(&self) {
        self.arm(WdtTimeout::MIN);
    }
}

impl<M: Mmio> hil::watchdog::Watchdog for Wdt<'_, M> {
    fn start(&self, timeout_s: u32) -> Result<(), ErrorCode> {
        Wdt::start(self, timeout_s).map_err(|err| match err {
            WdtError::InvalidStateTransition => ErrorCode::ALREADY,
            err => err.into(),
        })
    }

    fn stop(&self) -> Result<(), ErrorCode> {
        Wdt::stop(self).map_err(ErrorCode::from)
    }

    fn tickle(&self) -> Result<(), ErrorCode> {
        Wdt::reload(self).map_err(ErrorCode::from)
    }
}

/// Kernel loop hooks. Failures cannot be returned from these, so they are
/// reported through `debug!` and the kernel keeps running unprotected.
impl<M: Mmio> WatchDog for Wdt<'_, M> {
    fn setup(&self) {
        if let Err(err) = self.start_timeout(CONFIG.default_timeout) {
            debug!("sunxi wdt: setup failed: {}", err);
        }
    }

    fn tickle(&self) {
        if self.is_armed() {
            self.reload_unchecked();
        }
    }

    fn suspend(&self) {
        if self.is_armed() && self.stop().is_ok() {
            self.suspended.set(true);
        }
    }

    // Only undo our own suspend; a watchdog a client stopped stays off.
    fn resume(&self) {
        if !self.suspended.get() {
            return;
        }
        if let Some(timeout) = self.timeout() {
            if let Err(err) = self.start_timeout(timeout) {
                debug!("sunxi wdt: resume failed: {}", err);
            }
        }
    }
}
