// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    config::{MAX_DELAY_US, TEST_MODE_BLINK_MS, TRIGGER_PULSE_US},
    delay::calc_micro_delay,
    handoff::{SharedDelay, ZeroCrossCounter},
    platform::{Platform, PinId},
};

/// Output behavior of the status and trigger pins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Phase control.
    #[default]
    Normal,
    /// Device test: blink the status pin on every zero crossing, never fire the triac.
    DeviceTest,
}

/// Returns `true`, if the triac may be fired with this delay.
///
/// A later trigger would be too close to the next zero crossing.
pub const fn delay_fires(micro_delay: u16) -> bool {
    micro_delay < MAX_DELAY_US
}

/// One dimmable output.
#[derive(Clone, Debug)]
pub struct TriacChannel {
    /// 0 = no dimming (on), 1 = off.
    dim_level: f32,
    /// Delay after the zero crossing edge before firing.
    micro_delay: u16,
    /// Input pin. High = enabled.
    pin_enable: PinId,
    /// Triac gate output.
    pin_trigger: PinId,
}

impl TriacChannel {
    /// New channel, switched off.
    pub const fn new(pin_enable: PinId, pin_trigger: PinId) -> Self {
        Self {
            dim_level: 1.0,
            micro_delay: SharedDelay::OFF,
            pin_enable,
            pin_trigger,
        }
    }

    /// Recalculate the dim level and the firing delay.
    ///
    /// Unstable power forces the channel off for this iteration.
    pub fn calc_dim_level(&mut self, brightness: f32, power_unstable: bool) {
        self.dim_level = if power_unstable || brightness.is_nan() {
            1.0
        } else {
            (1.0 - brightness).clamp(0.0, 1.0)
        };
        self.micro_delay = calc_micro_delay(self.dim_level);
    }

    pub fn dim_level(&self) -> f32 {
        self.dim_level
    }

    pub fn micro_delay(&self) -> u16 {
        self.micro_delay
    }

    /// Fully off. The trigger handler does not fire.
    #[allow(clippy::float_cmp)]
    pub fn is_off(&self) -> bool {
        self.dim_level == 1.0
    }

    pub fn pin_enable(&self) -> PinId {
        self.pin_enable
    }

    pub fn pin_trigger(&self) -> PinId {
        self.pin_trigger
    }
}

/// Zero crossing interrupt side of the dimmer.
///
/// Shared between the control loop and the interrupt handler.
/// Lives in a `static` on the target.
pub struct Trigger {
    zero_crosses: ZeroCrossCounter,
    delay: SharedDelay,
    pin_status: PinId,
    pin_trigger: PinId,
    mode: OutputMode,
}

impl Trigger {
    pub const fn new(pin_status: PinId, pin_trigger: PinId, mode: OutputMode) -> Self {
        Self {
            zero_crosses: ZeroCrossCounter::new(),
            delay: SharedDelay::new(),
            pin_status,
            pin_trigger,
            mode,
        }
    }

    /// Zero crossing rising edge handler.
    ///
    /// Waits for the published delay and pulses the triac gate.
    /// Blocks for up to one half-wave.
    pub fn on_zero_cross<P: Platform + ?Sized>(&self, p: &mut P) {
        match self.mode {
            OutputMode::Normal => {
                let micro_delay = self.delay.get();
                if delay_fires(micro_delay) {
                    // Wait before firing the triac.
                    p.write(self.pin_status, true);
                    p.delay_us(micro_delay);
                    p.write(self.pin_status, false);

                    // Fire.
                    p.write(self.pin_trigger, true);
                    p.delay_us(TRIGGER_PULSE_US);
                    p.write(self.pin_trigger, false);
                }
            }
            OutputMode::DeviceTest => {
                p.write(self.pin_status, true);
                p.delay_ms(TEST_MODE_BLINK_MS);
                p.write(self.pin_status, false);
            }
        }

        // Time base. Counts regardless of firing.
        self.zero_crosses.increment();
    }

    pub fn zero_crosses(&self) -> &ZeroCrossCounter {
        &self.zero_crosses
    }

    pub fn delay(&self) -> &SharedDelay {
        &self.delay
    }

    pub fn pin_status(&self) -> PinId {
        self.pin_status
    }

    pub fn pin_trigger(&self) -> PinId {
        self.pin_trigger
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }
}


// vim: ts=4 sw=4 expandtab
