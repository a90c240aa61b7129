// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::hw::{delay_us, interrupt, mcu};
use dimcore::{BusyWait, Gpio, PinId};

// Arduino style ATtiny84 pin numbers.
//
//                           +-\/-+
//                     VCC  1|    |14  GND
//             (D 10)  PB0  2|    |13  AREF (D  0)
//             (D  9)  PB1  3|    |12  PA1  (D  1)
//                     PB3  4|    |11  PA2  (D  2)
//  PWM  INT0  (D  8)  PB2  5|    |10  PA3  (D  3)
//  PWM        (D  7)  PA7  6|    |9   PA4  (D  4)
//  PWM        (D  6)  PA6  7|    |8   PA5  (D  5)        PWM
//                           +----+
const PB0: PinId = PinId(0);
const PB2: PinId = PinId(2);
const PA7: PinId = PinId(3);
const PA3: PinId = PinId(7);
const PA1: PinId = PinId(9);

/// Zero crossing sense input. High pulse around each zero crossing.
pub const PIN_ZERO_CROSS: PinId = PB2;
/// Dim-select input. High = reduced brightness.
pub const PIN_DIM_SELECT: PinId = PA7;
/// Status LED output.
pub const PIN_STATUS: PinId = PB0;
/// Channel enable input. High = enabled.
pub const PIN_ENABLE: PinId = PA3;
/// Triac gate output. Active high.
pub const PIN_TRIGGER: PinId = PA1;

#[derive(Copy, Clone, PartialEq, Eq)]
enum Port {
    A,
    B,
}

fn port_bit(pin: PinId) -> Option<(Port, u8)> {
    match pin.0 {
        0..=2 => Some((Port::B, pin.0)),
        3..=10 => Some((Port::A, 10 - pin.0)),
        _ => None,
    }
}

fn pin_input(_bit: u8) -> u8 {
    0
}
fn pin_output(bit: u8) -> u8 {
    1 << bit
}
fn pin_low(_bit: u8) -> u8 {
    0
}
fn pin_floating(_bit: u8) -> u8 {
    0
}
fn pin_pullup(bit: u8) -> u8 {
    1 << bit
}

#[allow(non_snake_case)]
pub struct Board {
    PORTA: mcu::PORTA,
    PORTB: mcu::PORTB,
}

impl Board {
    pub fn new(porta: mcu::PORTA, portb: mcu::PORTB) -> Self {
        Self {
            PORTA: porta,
            PORTB: portb,
        }
    }

    /// Get a second handle to the ports.
    ///
    /// # SAFETY
    ///
    /// May only be used from the zero crossing interrupt.
    /// All read-modify-write port accesses from main context
    /// are done with interrupts disabled, so they never interleave
    /// with the interrupt.
    pub unsafe fn steal() -> Self {
        // SAFETY: See function safety contract.
        let dp = unsafe { mcu::Peripherals::steal() };
        Self::new(dp.PORTA, dp.PORTB)
    }

    /// Initial pin levels and directions.
    pub fn setup(&self) {
        // SAFETY: Called with interrupts disabled before the main loop starts.
        unsafe {
            self.PORTA.porta().write(|w| {
                w.bits(
                    pin_pullup(0) | // PA0: DNC
                    pin_low(1) | // PA1: triac trigger
                    pin_pullup(2) | // PA2: DNC
                    pin_floating(3) | // PA3: enable
                    pin_pullup(4) | // PA4: DNC, ISP SCK
                    pin_pullup(5) | // PA5: DNC, ISP MISO
                    pin_pullup(6) | // PA6: DNC, ISP MOSI
                    pin_floating(7), // PA7: dim-select
                )
            });
            self.PORTA.ddra().write(|w| {
                w.bits(
                    pin_input(0) | // PA0: DNC
                    pin_output(1) | // PA1: triac trigger
                    pin_input(2) | // PA2: DNC
                    pin_input(3) | // PA3: enable
                    pin_input(4) | // PA4: DNC, ISP SCK
                    pin_input(5) | // PA5: DNC, ISP MISO
                    pin_input(6) | // PA6: DNC, ISP MOSI
                    pin_input(7), // PA7: dim-select
                )
            });
            self.PORTB.portb().write(|w| {
                w.bits(
                    pin_low(0) | // PB0: status LED
                    pin_pullup(1) | // PB1: DNC
                    pin_floating(2) | // PB2: zero crossing, INT0
                    pin_pullup(3), // PB3: RESET
                )
            });
            self.PORTB.ddrb().write(|w| {
                w.bits(
                    pin_output(0) | // PB0: status LED
                    pin_input(1) | // PB1: DNC
                    pin_input(2) | // PB2: zero crossing, INT0
                    pin_input(3), // PB3: RESET
                )
            });
        }
    }
}

impl Gpio for Board {
    fn read(&mut self, pin: PinId) -> bool {
        match port_bit(pin) {
            Some((Port::A, bit)) => self.PORTA.pina().read().bits() & (1 << bit) != 0,
            Some((Port::B, bit)) => self.PORTB.pinb().read().bits() & (1 << bit) != 0,
            None => false,
        }
    }

    fn write(&mut self, pin: PinId, high: bool) {
        let Some((port, bit)) = port_bit(pin) else {
            return;
        };
        let set = |v: u8| if high { v | (1 << bit) } else { v & !(1 << bit) };
        interrupt::free(|_| {
            // SAFETY: All bit combinations are valid port values.
            unsafe {
                match port {
                    Port::A => self.PORTA.porta().modify(|r, w| w.bits(set(r.bits()))),
                    Port::B => self.PORTB.portb().modify(|r, w| w.bits(set(r.bits()))),
                };
            }
        });
    }
}

impl BusyWait for Board {
    fn delay_us(&mut self, us: u16) {
        delay_us(us);
    }
}

// vim: ts=4 sw=4 expandtab
