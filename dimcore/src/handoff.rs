// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Values crossing between the zero crossing interrupt and the control loop.
//!
//! Both values are wider than what the AVR can access atomically.
//! Every access runs inside of a critical section (interrupts masked)
//! and only copies the value in or out.

use crate::config::MAINS_HALFWAVE_US;
use core::cell::Cell;
use critical_section::{CriticalSection, Mutex};

/// Number of zero crossings since the last drain.
///
/// Written by the interrupt, drained by the control loop.
pub struct ZeroCrossCounter {
    count: Mutex<Cell<u16>>,
}

impl ZeroCrossCounter {
    pub const fn new() -> Self {
        Self {
            count: Mutex::new(Cell::new(0)),
        }
    }

    /// Count one zero crossing.
    pub fn increment(&self) {
        critical_section::with(|cs| self.increment_cs(cs));
    }

    /// Count one zero crossing from within an existing critical section.
    pub fn increment_cs(&self, cs: CriticalSection<'_>) {
        let count = self.count.borrow(cs);
        count.set(count.get().saturating_add(1));
    }

    /// Read and reset the counter as one atomic step.
    pub fn drain(&self) -> u16 {
        critical_section::with(|cs| self.count.borrow(cs).replace(0))
    }

    /// Read without resetting.
    pub fn peek(&self) -> u16 {
        critical_section::with(|cs| self.count.borrow(cs).get())
    }
}

impl Default for ZeroCrossCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Triac firing delay published by the control loop for the interrupt.
pub struct SharedDelay {
    us: Mutex<Cell<u16>>,
}

impl SharedDelay {
    /// Delay value that never fires the triac.
    pub const OFF: u16 = MAINS_HALFWAVE_US;

    /// Starts out as [Self::OFF].
    /// Edges before the first publish must not fire.
    pub const fn new() -> Self {
        Self {
            us: Mutex::new(Cell::new(Self::OFF)),
        }
    }

    pub fn publish(&self, us: u16) {
        critical_section::with(|cs| self.us.borrow(cs).set(us));
    }

    pub fn get(&self) -> u16 {
        critical_section::with(|cs| self.get_cs(cs))
    }

    pub fn get_cs(&self, cs: CriticalSection<'_>) -> u16 {
        self.us.borrow(cs).get()
    }
}

impl Default for SharedDelay {
    fn default() -> Self {
        Self::new()
    }
}


// vim: ts=4 sw=4 expandtab
