// -*- coding: utf-8 -*-

use crate::{
    board::{
        Inputs, PIN_DIM_SELECT, PIN_ENABLE, PIN_STATUS, PIN_TRIGGER, PIN_ZERO_CROSS, SimBoard,
        Stats,
    },
    mains::Mains,
};
use anyhow as ah;
use dimcore::{
    Cycle, Dimmer, EdgeSource as _, IntervalSource, OutputMode, PowerInstability, TriacChannel,
    Trigger,
    config::{INSTABILITY_MAX_TICKS, INSTABILITY_MIN_TICKS, LOOP_PERIOD_MS, MAINS_HALFWAVE_US},
    debug::{DebugValues, NRVALUES},
};
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use std::sync::{Mutex, PoisonError};

/// Instability distances drawn from a seeded PRNG.
pub struct RandomIntervals(StdRng);

impl RandomIntervals {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl IntervalSource for RandomIntervals {
    fn next_interval(&mut self) -> u32 {
        self.0.random_range(INSTABILITY_MIN_TICKS..INSTABILITY_MAX_TICKS)
    }
}

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub duration_us: u64,
    pub report_us: u64,
    pub inputs: Inputs,
    pub unstable_seed: Option<u64>,
    pub mode: OutputMode,
    /// Time of the first zero crossing edge.
    pub phase_us: u64,
}

/// Periodic progress report.
#[derive(Clone, Debug)]
pub struct Report {
    pub now_us: u64,
    pub stats: Stats,
    pub debug: [u16; NRVALUES],
    pub cycle: Cycle,
    pub status: bool,
}

/// Run the dimmer against the simulated mains.
///
/// `on_cycle` sees every control loop iteration,
/// `on_report` is called once per report interval.
pub fn run(
    cfg: &SimConfig,
    mut on_cycle: impl FnMut(u64, &Cycle) -> ah::Result<()>,
    mut on_report: impl FnMut(&Report) -> ah::Result<()>,
) -> ah::Result<()> {
    ah::ensure!(cfg.report_us > 0, "Report interval must not be zero");

    let trigger = Trigger::new(PIN_STATUS, PIN_TRIGGER, cfg.mode);
    let debug = DebugValues::new();
    let board = Mutex::new(SimBoard::new(cfg.inputs.clone()));

    // Interrupt handler.
    let on_edge = || {
        let mut b = board.lock().unwrap_or_else(PoisonError::into_inner);
        b.mark_edge();
        trigger.on_zero_cross(&mut *b);
    };
    let mut mains = Mains::new(u64::from(MAINS_HALFWAVE_US), cfg.phase_us);
    mains.set_handler(PIN_ZERO_CROSS, &on_edge);

    let faults = cfg
        .unstable_seed
        .map(|seed| PowerInstability::new(RandomIntervals::new(seed)));
    let mut dimmer = Dimmer::new(
        &trigger,
        TriacChannel::new(PIN_ENABLE, PIN_TRIGGER),
        PIN_DIM_SELECT,
        faults,
    )
    .with_debug(&debug);

    let mut next_report_us = cfg.report_us;
    loop {
        let (now_us, cycle, status) = {
            let mut b = board.lock().unwrap_or_else(PoisonError::into_inner);
            let cycle = dimmer.run_once(&mut *b);
            (b.now_us(), cycle, b.status())
        };
        on_cycle(now_us, &cycle)?;

        if now_us >= next_report_us {
            next_report_us += cfg.report_us;
            let stats = board
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take_stats();
            on_report(&Report {
                now_us,
                stats,
                debug: debug.snapshot(),
                cycle,
                status,
            })?;
        }
        if now_us >= cfg.duration_us {
            break;
        }

        // Sleep. Zero crossings interrupt the sleep.
        let wake_us = now_us + u64::from(LOOP_PERIOD_MS) * 1000;
        while mains.next_edge_us() <= wake_us {
            board
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .advance_to(mains.next_edge_us());
            mains.edge();
        }
        board
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .advance_to(wake_us);
    }

    Ok(())
}


// vim: ts=4 sw=4 expandtab
