// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build time configuration.
//!
//! Measurements on the zero crossing detector:
//! The zero crossing impulse is about 1.66 ms wide and
//! the real zero crossing comes about 850 us after the rising edge.
//! The distance between rising edges is 10 ms (50 Hz mains).

/// Mains half-wave length (50 Hz).
pub const MAINS_HALFWAVE_US: u16 = 10_000;

/// Width of the zero crossing sense pulse.
/// It starts a bit before 0 V and ends a bit after 0 V.
pub const ZERO_PULSE_WIDTH_US: u16 = 1_700;

/// What is left of the half-wave between two zero crossing pulses.
pub const WAVE_US: u16 = MAINS_HALFWAVE_US - ZERO_PULSE_WIDTH_US;

/// Minimum distance between a trigger and the next zero crossing pulse.
pub const SAFETY_MARGIN_US: u16 = 200;

/// Never fire the triac with a delay at or above this.
pub const MAX_DELAY_US: u16 = WAVE_US - SAFETY_MARGIN_US;

/// Triac gate pulse length.
/// The BT136 has a 2 us turn-on time, no need to keep the gate on much longer.
pub const TRIGGER_PULSE_US: u16 = 5;

/// Ramp ceiling. Full brightness.
pub const RAMP_MAX: u16 = 400;

/// Ramp ceiling while the dim-select input is asserted.
pub const RAMP_DIMMED: u16 = 80;

/// Fade-in time from off to full brightness, in mains half-waves.
/// The ramp moves one unit per half-wave.
pub const RAMP_UP_TICKS: u16 = RAMP_MAX;

/// Maximum lamp brightness. 0 = off, 1 = full brightness.
pub const MAX_BRIGHTNESS: f32 = 1.0;

/// Control loop sleep between two iterations.
pub const LOOP_PERIOD_MS: u16 = 2;

/// Status blink length per edge in device test mode.
pub const TEST_MODE_BLINK_MS: u16 = 5;

/// Half-waves until the first simulated power instability.
pub const INSTABILITY_FIRST_TICKS: u32 = 100;

/// Lower bound (inclusive) of the randomized instability distance.
pub const INSTABILITY_MIN_TICKS: u32 = 200;

/// Upper bound (exclusive) of the randomized instability distance.
pub const INSTABILITY_MAX_TICKS: u32 = 2_000;

/// Number of status blinks after power-on.
pub const STARTUP_BLINKS: u8 = 5;

/// Status blink on and off time after power-on.
pub const STARTUP_BLINK_MS: u16 = 100;

const _: () = assert!(MAX_DELAY_US < WAVE_US);
const _: () = assert!(RAMP_DIMMED <= RAMP_MAX);
const _: () = assert!(INSTABILITY_MIN_TICKS < INSTABILITY_MAX_TICKS);

// vim: ts=4 sw=4 expandtab
