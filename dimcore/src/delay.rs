// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::config::{MAINS_HALFWAVE_US, ZERO_PULSE_WIDTH_US};

/// Calculate the triac firing delay after the rising zero crossing edge.
///
/// `dim_level` 0 fires right after the zero crossing pulse (full conduction).
/// `dim_level` 1 fires as late as possible (minimal conduction).
/// Values outside of 0..=1 are clamped. NaN is treated as 1 (off).
pub fn calc_micro_delay(dim_level: f32) -> u16 {
    calc_micro_delay_for(dim_level, MAINS_HALFWAVE_US, ZERO_PULSE_WIDTH_US)
}

/// [calc_micro_delay] with explicit mains timing.
pub fn calc_micro_delay_for(dim_level: f32, halfwave_us: u16, zero_pulse_us: u16) -> u16 {
    let dim_level = if dim_level.is_nan() {
        1.0
    } else {
        dim_level.clamp(0.0, 1.0)
    };
    let wave_us = halfwave_us.saturating_sub(zero_pulse_us);

    // Round half up. The operand is never negative.
    let offs = (f32::from(wave_us) * dim_level + 0.5) as u16;

    offs.min(wave_us).saturating_add(zero_pulse_us / 2)
}


// vim: ts=4 sw=4 expandtab
