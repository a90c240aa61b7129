// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debug value table.
//!
//! The control loop stores its latest values here.
//! A debug reader (serial streamer, debugger, simulator) takes snapshots.

use core::cell::Cell;
use critical_section::Mutex;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Debug {
    /// Lower 16 bits of the system time.
    AcTime,
    /// Zero crossings drained in the last iteration.
    Ticks,
    RampValue,
    MicroDelay,
    /// 1 while a power instability is injected.
    Unstable,
}
pub const NRVALUES: usize = 5;

pub struct DebugValues {
    values: Mutex<[Cell<u16>; NRVALUES]>,
}

impl DebugValues {
    pub const fn new() -> Self {
        Self {
            values: Mutex::new([
                Cell::new(0),
                Cell::new(0),
                Cell::new(0),
                Cell::new(0),
                Cell::new(0),
            ]),
        }
    }

    pub fn log_u16(&self, id: Debug, value: u16) {
        critical_section::with(|cs| {
            let id = id as usize;
            let values = self.values.borrow(cs);
            if id < values.len() {
                values[id].set(value);
            }
        });
    }

    pub fn log_bool(&self, id: Debug, value: bool) {
        self.log_u16(id, value.into());
    }

    pub fn get(&self, id: Debug) -> u16 {
        critical_section::with(|cs| {
            self.values
                .borrow(cs)
                .get(id as usize)
                .map_or(0, Cell::get)
        })
    }

    /// Consistent copy of all values.
    pub fn snapshot(&self) -> [u16; NRVALUES] {
        critical_section::with(|cs| {
            let values = self.values.borrow(cs);
            core::array::from_fn(|i| values[i].get())
        })
    }
}

impl Default for DebugValues {
    fn default() -> Self {
        Self::new()
    }
}


// vim: ts=4 sw=4 expandtab
