// -*- coding: utf-8 -*-

use dimcore::{BusyWait, Gpio, PinId};

/// Pin roles of the simulated board. Same numbering as the firmware.
pub const PIN_STATUS: PinId = PinId(0);
pub const PIN_ZERO_CROSS: PinId = PinId(2);
pub const PIN_DIM_SELECT: PinId = PinId(3);
pub const PIN_ENABLE: PinId = PinId(7);
pub const PIN_TRIGGER: PinId = PinId(9);

/// Scripted input levels.
#[derive(Clone, Debug, Default)]
pub struct Inputs {
    /// Enable input goes low at this time.
    pub disable_at_us: Option<u64>,
    /// Dim-select input goes high at this time.
    pub dim_at_us: Option<u64>,
    /// Dim-select input goes low again at this time.
    pub undim_at_us: Option<u64>,
}

impl Inputs {
    fn enabled(&self, now_us: u64) -> bool {
        self.disable_at_us.is_none_or(|t| now_us < t)
    }

    fn dim_select(&self, now_us: u64) -> bool {
        self.dim_at_us.is_some_and(|t| now_us >= t)
            && self.undim_at_us.is_none_or(|t| now_us < t)
    }
}

/// Firing statistics since the last [SimBoard::take_stats].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub edges: u32,
    pub pulses: u32,
    pub delay_sum_us: u64,
    pub delay_min_us: Option<u64>,
    pub delay_max_us: Option<u64>,
}

impl Stats {
    pub fn delay_avg_us(&self) -> Option<u64> {
        if self.pulses == 0 {
            None
        } else {
            Some(self.delay_sum_us / u64::from(self.pulses))
        }
    }
}

/// Simulated microcontroller with a virtual microsecond clock.
///
/// Busy waits advance the clock.
#[derive(Debug, Default)]
pub struct SimBoard {
    now_us: u64,
    inputs: Inputs,
    status: bool,
    trigger: bool,
    edge_us: u64,
    stats: Stats,
}

impl SimBoard {
    pub fn new(inputs: Inputs) -> Self {
        Self {
            inputs,
            ..Default::default()
        }
    }

    pub fn now_us(&self) -> u64 {
        self.now_us
    }

    /// Let time pass. The clock never runs backwards.
    pub fn advance_to(&mut self, us: u64) {
        self.now_us = self.now_us.max(us);
    }

    /// A zero crossing edge happens now.
    pub fn mark_edge(&mut self) {
        self.edge_us = self.now_us;
        self.stats.edges += 1;
    }

    pub fn status(&self) -> bool {
        self.status
    }

    pub fn take_stats(&mut self) -> Stats {
        core::mem::take(&mut self.stats)
    }
}

impl Gpio for SimBoard {
    fn read(&mut self, pin: PinId) -> bool {
        match pin {
            PIN_ENABLE => self.inputs.enabled(self.now_us),
            PIN_DIM_SELECT => self.inputs.dim_select(self.now_us),
            _ => false,
        }
    }

    fn write(&mut self, pin: PinId, high: bool) {
        match pin {
            PIN_STATUS => self.status = high,
            PIN_TRIGGER => {
                if high && !self.trigger {
                    let delay = self.now_us - self.edge_us;
                    let s = &mut self.stats;
                    s.pulses += 1;
                    s.delay_sum_us += delay;
                    s.delay_min_us = Some(s.delay_min_us.map_or(delay, |d| d.min(delay)));
                    s.delay_max_us = Some(s.delay_max_us.map_or(delay, |d| d.max(delay)));
                }
                self.trigger = high;
            }
            _ => (),
        }
    }
}

impl BusyWait for SimBoard {
    fn delay_us(&mut self, us: u16) {
        self.now_us += u64::from(us);
    }

    fn delay_ms(&mut self, ms: u16) {
        self.now_us += u64::from(ms) * 1000;
    }
}

// vim: ts=4 sw=4 expandtab
