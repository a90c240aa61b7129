// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::{hw::mcu, ports::PIN_ZERO_CROSS};
use core::cell::Cell;
use critical_section::Mutex;
use dimcore::{EdgeSource, PinId};

type Handler = &'static (dyn Fn() + Sync);

static HANDLER: Mutex<Cell<Option<Handler>>> = Mutex::new(Cell::new(None));

/// MCUCR: ISC01 + ISC00 -> rising edge on INT0.
const MCUCR_ISC0_RISING: u8 = 0x03;
/// GIMSK/GIFR: INT0 bit.
const INT0_BIT: u8 = 1 << 6;

/// INT0 external interrupt. Only available on PB2.
#[allow(non_snake_case)]
pub struct ExInt {
    CPU: mcu::CPU,
    EXINT: mcu::EXINT,
}

impl ExInt {
    pub fn new(cpu: mcu::CPU, exint: mcu::EXINT) -> Self {
        Self {
            CPU: cpu,
            EXINT: exint,
        }
    }
}

impl EdgeSource<'static> for ExInt {
    fn set_handler(&mut self, pin: PinId, handler: Handler) {
        if pin != PIN_ZERO_CROSS {
            return;
        }
        critical_section::with(|cs| HANDLER.borrow(cs).set(Some(handler)));

        // SAFETY: All bit combinations are valid register values.
        unsafe {
            self.CPU
                .mcucr()
                .modify(|r, w| w.bits((r.bits() & !0x03) | MCUCR_ISC0_RISING));
            self.EXINT.gifr().write(|w| w.bits(INT0_BIT));
            self.EXINT
                .gimsk()
                .modify(|r, w| w.bits(r.bits() | INT0_BIT));
        }
    }
}

#[avr_device::interrupt(attiny84)]
fn EXT_INT0() {
    let handler = critical_section::with(|cs| HANDLER.borrow(cs).get());
    if let Some(handler) = handler {
        handler();
    }
}

// vim: ts=4 sw=4 expandtab
