// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Phase control AC dimmer for one triac channel.
//!
//! The zero crossing interrupt ([Trigger::on_zero_cross]) waits for the
//! published delay and fires the triac. The control loop ([Dimmer]) counts
//! the zero crossings, runs the brightness ramp and publishes the next delay.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod debug;
pub mod delay;
pub mod fault;
pub mod handoff;
pub mod platform;
pub mod ramp;
pub mod system;
pub mod timer;
pub mod triac;

pub use crate::{
    delay::calc_micro_delay,
    fault::{FaultInjector, IntervalSource, Lfsr16, NoFaults, PowerInstability},
    handoff::{SharedDelay, ZeroCrossCounter},
    platform::{BusyWait, EdgeSource, Gpio, PinId, Platform},
    ramp::Ramp,
    system::{Cycle, Dimmer, ramp_target},
    timer::AcTime,
    triac::{OutputMode, TriacChannel, Trigger, delay_fires},
};

// vim: ts=4 sw=4 expandtab
