// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use dimcore::{
    BusyWait, Dimmer, Gpio, NoFaults, OutputMode, PinId, TriacChannel, Trigger, calc_micro_delay,
    config::{
        MAX_BRIGHTNESS, MAX_DELAY_US, RAMP_DIMMED, RAMP_MAX, RAMP_UP_TICKS, ZERO_PULSE_WIDTH_US,
    },
    delay_fires,
};
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

const STATUS: PinId = PinId(0);
const DIM: PinId = PinId(3);
const ENABLE: PinId = PinId(7);
const TRIG: PinId = PinId(9);

/// Recording fake board with a microsecond clock.
#[derive(Default)]
struct Bench {
    now_us: u64,
    enable: bool,
    dim: bool,
    status: bool,
    trigger: bool,
    edge_us: u64,
    /// Delay between edge and gate pulse of every fired pulse.
    pulses: Vec<u64>,
}

impl Gpio for Bench {
    fn read(&mut self, pin: PinId) -> bool {
        match pin {
            ENABLE => self.enable,
            DIM => self.dim,
            _ => panic!("read of {pin:?}"),
        }
    }

    fn write(&mut self, pin: PinId, high: bool) {
        match pin {
            STATUS => self.status = high,
            TRIG => {
                if high && !self.trigger {
                    self.pulses.push(self.now_us - self.edge_us);
                }
                self.trigger = high;
            }
            _ => panic!("write of {pin:?}"),
        }
    }
}

impl BusyWait for Bench {
    fn delay_us(&mut self, us: u16) {
        self.now_us += u64::from(us);
    }
}

impl Bench {
    fn edge(&mut self, trigger: &Trigger) {
        self.edge_us = self.now_us;
        trigger.on_zero_cross(self);
    }
}

fn setup(mode: OutputMode) -> Trigger {
    Trigger::new(STATUS, TRIG, mode)
}

fn dimmer(trigger: &Trigger) -> Dimmer<'_, NoFaults> {
    Dimmer::new(trigger, TriacChannel::new(ENABLE, TRIG), DIM, NoFaults)
}

#[test]
fn disabled_channel_never_fires() {
    let trigger = setup(OutputMode::Normal);
    let mut d = dimmer(&trigger);
    let mut b = Bench {
        enable: true,
        ..Default::default()
    };

    // Bring the lamp to full brightness first.
    for _ in 0..RAMP_UP_TICKS {
        b.edge(&trigger);
        d.run_once(&mut b);
    }
    assert_eq!(d.ramp().value(), RAMP_MAX);
    assert!(!b.pulses.is_empty());

    // Disable. The ramp decays one unit per half-wave, it does not snap.
    b.enable = false;
    b.edge(&trigger);
    let c = d.run_once(&mut b);
    assert_eq!(c.ramp_value, RAMP_MAX - 1);

    for _ in 1..RAMP_UP_TICKS {
        b.edge(&trigger);
        d.run_once(&mut b);
    }
    assert_eq!(d.ramp().value(), 0);
    assert_eq!(d.channel().dim_level(), 1.0);
    assert!(trigger.delay().get() >= MAX_DELAY_US);
    assert!(!b.status);

    b.pulses.clear();
    for _ in 0..1000 {
        b.edge(&trigger);
        b.edge(&trigger);
        let c = d.run_once(&mut b);
        assert_eq!(c.ticks, 2);
        assert_eq!(c.dim_level, 1.0);
    }
    assert!(b.pulses.is_empty());
    assert!(!b.status);
}

#[test]
fn enabled_channel_ramps_to_full_conduction() {
    let trigger = setup(OutputMode::Normal);
    let mut d = dimmer(&trigger);
    let mut b = Bench {
        enable: true,
        ..Default::default()
    };

    let mut c = d.run_once(&mut b);
    assert_eq!(c.ramp_value, 0);
    for tick in 1..=RAMP_UP_TICKS {
        b.edge(&trigger);
        c = d.run_once(&mut b);
        assert_eq!(c.ramp_value, tick);
    }

    assert_eq!(c.ramp_value, RAMP_MAX);
    assert_eq!(d.ramp().relative_value(), 1.0);
    assert_eq!(c.dim_level, 0.0);
    assert_eq!(c.micro_delay, ZERO_PULSE_WIDTH_US / 2);
    assert_eq!(trigger.delay().get(), ZERO_PULSE_WIDTH_US / 2);

    // The next edge fires right after the zero crossing pulse.
    b.pulses.clear();
    b.edge(&trigger);
    assert_eq!(b.pulses, [u64::from(ZERO_PULSE_WIDTH_US / 2)]);
    assert!(!b.trigger);
}

#[test]
fn dim_select_settles_at_dimmed_level() {
    let trigger = setup(OutputMode::Normal);
    let mut d = dimmer(&trigger);
    let mut b = Bench {
        enable: true,
        dim: true,
        ..Default::default()
    };

    for _ in 0..(2 * RAMP_MAX) {
        b.edge(&trigger);
        d.run_once(&mut b);
    }
    let c = d.run_once(&mut b);
    assert_eq!(c.ramp_value, RAMP_DIMMED);

    let dim_level = 1.0 - (f32::from(RAMP_DIMMED) / f32::from(RAMP_MAX)) * MAX_BRIGHTNESS;
    assert!((c.dim_level - dim_level).abs() < 1e-6);
    assert!(c.micro_delay.abs_diff(calc_micro_delay(dim_level)) <= 1);
    assert!(delay_fires(c.micro_delay));

    b.pulses.clear();
    b.edge(&trigger);
    assert_eq!(b.pulses, [u64::from(c.micro_delay)]);
}

#[test]
fn dim_select_toggling_stays_bounded() {
    let trigger = setup(OutputMode::Normal);
    let mut d = dimmer(&trigger);
    let mut b = Bench {
        enable: true,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(7);

    let mut prev = d.run_once(&mut b).ramp_value;
    for _ in 0..5_000 {
        if rng.random_bool(0.1) {
            b.dim = !b.dim;
        }
        if rng.random_bool(0.02) {
            b.enable = !b.enable;
        }
        for _ in 0..rng.random_range(0..4) {
            b.edge(&trigger);
        }
        let c = d.run_once(&mut b);
        assert!(c.ramp_value <= RAMP_MAX);
        assert!(prev.abs_diff(c.ramp_value) <= c.ticks);
        assert!((0.0..=1.0).contains(&c.dim_level));
        prev = c.ramp_value;
    }
}

#[test]
fn edges_before_first_iteration_do_not_fire() {
    let trigger = setup(OutputMode::Normal);
    let mut b = Bench {
        enable: true,
        ..Default::default()
    };
    for _ in 0..10 {
        b.edge(&trigger);
    }
    assert!(b.pulses.is_empty());

    let mut d = dimmer(&trigger);
    let c = d.run_once(&mut b);
    assert_eq!(c.ticks, 10);
    assert_eq!(c.ramp_value, 10);
}

#[test]
fn device_test_mode_only_blinks() {
    let trigger = setup(OutputMode::DeviceTest);
    let mut d = dimmer(&trigger);
    let mut b = Bench {
        enable: true,
        ..Default::default()
    };

    for _ in 0..(2 * RAMP_MAX) {
        let before = b.now_us;
        b.edge(&trigger);
        assert_eq!(b.now_us - before, 5_000);
        d.run_once(&mut b);
    }
    assert_eq!(d.ramp().value(), RAMP_MAX);
    assert!(b.pulses.is_empty());
}
