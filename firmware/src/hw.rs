// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

pub use avr_device::attiny84 as mcu;
pub use avr_device::interrupt;

/// Internal RC oscillator.
pub const CPU_HZ: u32 = 8_000_000;

/// CPU cycles per iteration of [delay_loop].
const LOOP_CYCLES: u32 = 4;

/// Busy loop for `iterations` * 4 CPU cycles.
#[inline(always)]
fn delay_loop(iterations: u16) {
    if iterations == 0 {
        return;
    }
    // SAFETY: The asm code only decrements a register.
    //         It does not access memory.
    unsafe {
        core::arch::asm!(
            "1: sbiw {n}, 1", // 2 cycles
            "brne 1b", // 2 cycles
            n = inout(reg_iw) iterations => _,
            options(nomem, nostack)
        );
    }
}

/// Busy wait for `us` microseconds.
///
/// Interrupts extend the wait.
#[inline(never)]
pub fn delay_us(us: u16) {
    const ITERATIONS_PER_US: u32 = CPU_HZ / 1_000_000 / LOOP_CYCLES;
    let iterations = u32::from(us) * ITERATIONS_PER_US;
    delay_loop(iterations.min(u16::MAX.into()) as u16);
}

// vim: ts=4 sw=4 expandtab
