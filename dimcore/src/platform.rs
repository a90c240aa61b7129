// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hardware capabilities the dimmer needs.
//!
//! Interrupt masking is not part of these traits.
//! It is provided through the `critical-section` crate by the platform.

/// Pin identity.
///
/// The numbering is up to the platform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId(pub u8);

impl PinId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Logic level pin access.
pub trait Gpio {
    /// Non-blocking read of an input pin. `true` = high.
    fn read(&mut self, pin: PinId) -> bool;

    /// Drive an output pin. `true` = high.
    fn write(&mut self, pin: PinId, high: bool);
}

/// Blocking delays.
pub trait BusyWait {
    fn delay_us(&mut self, us: u16);

    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}

/// Source of rising edge events.
pub trait EdgeSource<'h> {
    /// Run `handler` on every rising edge of `pin`.
    ///
    /// The handler runs in interrupt context and preempts the control loop.
    fn set_handler(&mut self, pin: PinId, handler: &'h (dyn Fn() + Sync));
}

/// Everything the trigger handler and the control loop touch.
pub trait Platform: Gpio + BusyWait {}

impl<T: Gpio + BusyWait> Platform for T {}

// vim: ts=4 sw=4 expandtab
