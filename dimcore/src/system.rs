// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The control loop.

use crate::{
    config::{LOOP_PERIOD_MS, MAX_BRIGHTNESS, RAMP_DIMMED, RAMP_MAX},
    debug::{Debug, DebugValues},
    fault::FaultInjector,
    platform::{Gpio, PinId, Platform},
    ramp::Ramp,
    timer::AcTime,
    triac::{OutputMode, TriacChannel, Trigger},
};

/// Ramp target for the sensed input levels.
///
/// Disabled overrides dim-select.
pub const fn ramp_target(enabled: bool, dim_select: bool) -> u16 {
    match (enabled, dim_select) {
        (false, _) => 0,
        (true, true) => RAMP_DIMMED,
        (true, false) => RAMP_MAX,
    }
}

/// Result of one control loop iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cycle {
    /// Zero crossings since the previous iteration.
    pub ticks: u16,
    pub ac_time: AcTime,
    pub enabled: bool,
    pub dim_select: bool,
    pub power_unstable: bool,
    pub ramp_value: u16,
    pub dim_level: f32,
    /// Delay published to the trigger handler.
    pub micro_delay: u16,
}

/// Control loop state.
pub struct Dimmer<'a, F> {
    trigger: &'a Trigger,
    debug: Option<&'a DebugValues>,
    channel: TriacChannel,
    ramp: Ramp,
    ac_time: AcTime,
    pin_dim_select: PinId,
    faults: F,
}

impl<'a, F: FaultInjector> Dimmer<'a, F> {
    pub fn new(
        trigger: &'a Trigger,
        channel: TriacChannel,
        pin_dim_select: PinId,
        faults: F,
    ) -> Self {
        debug_assert_eq!(channel.pin_trigger(), trigger.pin_trigger());
        Self {
            trigger,
            debug: None,
            channel,
            ramp: Ramp::new(RAMP_MAX),
            ac_time: AcTime::new(),
            pin_dim_select,
            faults,
        }
    }

    /// Log every iteration into `debug`.
    #[must_use]
    pub fn with_debug(mut self, debug: &'a DebugValues) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Run one control loop iteration.
    pub fn run_once<P: Gpio + ?Sized>(&mut self, p: &mut P) -> Cycle {
        // Zero crossings counted by the interrupt since the last run.
        let ticks = self.trigger.zero_crosses().drain();
        self.ac_time = self.ac_time.add_ticks(ticks);

        let power_unstable = self.faults.power_unstable(self.ac_time);

        let enabled = p.read(self.channel.pin_enable());
        let dim_select = p.read(self.pin_dim_select);

        self.ramp.set_target(ramp_target(enabled, dim_select));
        self.ramp.add_ticks(ticks);

        let brightness = self.ramp.relative_value() * MAX_BRIGHTNESS;
        self.channel.calc_dim_level(brightness, power_unstable);

        let micro_delay = self.channel.micro_delay();
        self.trigger.delay().publish(micro_delay);

        // The handler may have skipped firing and left the status pin as is.
        if self.channel.is_off() && self.trigger.mode() == OutputMode::Normal {
            p.write(self.trigger.pin_status(), false);
        }

        if let Some(debug) = self.debug {
            debug.log_u16(Debug::AcTime, self.ac_time.ticks() as u16);
            debug.log_u16(Debug::Ticks, ticks);
            debug.log_u16(Debug::RampValue, self.ramp.value());
            debug.log_u16(Debug::MicroDelay, micro_delay);
            debug.log_bool(Debug::Unstable, power_unstable);
        }

        Cycle {
            ticks,
            ac_time: self.ac_time,
            enabled,
            dim_select,
            power_unstable,
            ramp_value: self.ramp.value(),
            dim_level: self.channel.dim_level(),
            micro_delay,
        }
    }

    /// Run the control loop forever.
    pub fn run<P: Platform + ?Sized>(&mut self, p: &mut P) -> ! {
        loop {
            self.run_once(p);
            p.delay_ms(LOOP_PERIOD_MS);
        }
    }

    pub fn ramp(&self) -> &Ramp {
        &self.ramp
    }

    pub fn channel(&self) -> &TriacChannel {
        &self.channel
    }

    pub fn ac_time(&self) -> AcTime {
        self.ac_time
    }

    pub fn faults(&self) -> &F {
        &self.faults
    }
}


// vim: ts=4 sw=4 expandtab
