// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]
#![cfg_attr(target_arch = "avr", feature(asm_experimental_arch))]

#[cfg(target_arch = "avr")]
mod exint;
#[cfg(target_arch = "avr")]
mod hw;
#[cfg(target_arch = "avr")]
mod ports;

#[cfg(target_arch = "avr")]
mod firmware {
    use crate::{
        exint::ExInt,
        hw::{interrupt, mcu},
        ports::{Board, PIN_DIM_SELECT, PIN_ENABLE, PIN_STATUS, PIN_TRIGGER, PIN_ZERO_CROSS},
    };
    use dimcore::{
        BusyWait as _, Dimmer, EdgeSource as _, Gpio as _, OutputMode, TriacChannel, Trigger,
        config::{STARTUP_BLINKS, STARTUP_BLINK_MS},
        debug::DebugValues,
    };
    use panic_halt as _;

    const OUTPUT_MODE: OutputMode = if cfg!(feature = "test-mode") {
        OutputMode::DeviceTest
    } else {
        OutputMode::Normal
    };

    static TRIGGER: Trigger = Trigger::new(PIN_STATUS, PIN_TRIGGER, OUTPUT_MODE);
    static DEBUG: DebugValues = DebugValues::new();

    fn on_zero_cross() {
        // SAFETY: We are in the zero crossing interrupt.
        let mut board = unsafe { Board::steal() };
        TRIGGER.on_zero_cross(&mut board);
    }

    #[cfg(feature = "unstable-power")]
    fn faults() -> dimcore::PowerInstability<dimcore::Lfsr16> {
        dimcore::PowerInstability::new(dimcore::Lfsr16::new(0xACE1))
    }

    #[cfg(not(feature = "unstable-power"))]
    fn faults() -> dimcore::NoFaults {
        dimcore::NoFaults
    }

    fn startup_blink(board: &mut Board) {
        for _ in 0..STARTUP_BLINKS {
            board.write(PIN_STATUS, true);
            board.delay_ms(STARTUP_BLINK_MS);
            board.write(PIN_STATUS, false);
            board.delay_ms(STARTUP_BLINK_MS);
        }
    }

    #[avr_device::entry]
    fn main() -> ! {
        let Some(dp) = mcu::Peripherals::take() else {
            panic!();
        };

        let mut board = Board::new(dp.PORTA, dp.PORTB);
        board.setup();

        let mut exint = ExInt::new(dp.CPU, dp.EXINT);
        exint.set_handler(PIN_ZERO_CROSS, &on_zero_cross);

        startup_blink(&mut board);

        let mut dimmer = Dimmer::new(
            &TRIGGER,
            TriacChannel::new(PIN_ENABLE, PIN_TRIGGER),
            PIN_DIM_SELECT,
            faults(),
        )
        .with_debug(&DEBUG);

        // SAFETY: The interrupt handler and all shared state are set up.
        unsafe { interrupt::enable() };

        dimmer.run(&mut board)
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}

// vim: ts=4 sw=4 expandtab
