// -*- coding: utf-8 -*-

#![forbid(unsafe_code)]

mod board;
mod mains;
mod sim;
mod trace;

use crate::{
    board::Inputs,
    sim::{Report, SimConfig},
    trace::Trace,
};
use anyhow as ah;
use clap::Parser;
use dimcore::{OutputMode, config::RAMP_MAX, debug::Debug};
use std::path::PathBuf;

/// Run the dimmer control against a simulated 50 Hz mains.
#[derive(Parser, Debug)]
struct Opts {
    /// Simulated time, in milliseconds.
    #[arg(short, long, default_value_t = 6_000)]
    duration: u64,

    /// Progress report interval, in milliseconds.
    #[arg(short, long, default_value_t = 500)]
    report: u64,

    /// Switch the enable input off at this time (ms).
    #[arg(long)]
    disable_at: Option<u64>,

    /// Assert the dim-select input at this time (ms).
    #[arg(long)]
    dim_at: Option<u64>,

    /// Release the dim-select input at this time (ms).
    #[arg(long)]
    undim_at: Option<u64>,

    /// Simulate unstable power.
    #[arg(short, long)]
    unstable: bool,

    /// Random seed for the unstable power simulation.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Time of the first zero crossing edge (us).
    #[arg(long, default_value_t = 1_000)]
    phase: u64,

    /// Device test mode: blink on zero crossings, never fire.
    #[arg(long)]
    test_mode: bool,

    /// Write a CSV trace of every control loop iteration to this file.
    #[arg(long)]
    trace: Option<PathBuf>,
}

impl Opts {
    fn sim_config(&self) -> ah::Result<SimConfig> {
        ah::ensure!(self.duration > 0, "Duration must not be zero");
        ah::ensure!(self.report > 0, "Report interval must not be zero");
        if let (Some(dim), Some(undim)) = (self.dim_at, self.undim_at) {
            ah::ensure!(dim < undim, "--undim-at must be after --dim-at");
        }
        let ms = |t: Option<u64>| t.map(|t| t * 1000);
        Ok(SimConfig {
            duration_us: self.duration * 1000,
            report_us: self.report * 1000,
            inputs: Inputs {
                disable_at_us: ms(self.disable_at),
                dim_at_us: ms(self.dim_at),
                undim_at_us: ms(self.undim_at),
            },
            unstable_seed: self.unstable.then_some(self.seed),
            mode: if self.test_mode {
                OutputMode::DeviceTest
            } else {
                OutputMode::Normal
            },
            phase_us: self.phase,
        })
    }
}

fn print_report(r: &Report) {
    let c = &r.cycle;
    let delay = match (
        r.stats.delay_min_us,
        r.stats.delay_avg_us(),
        r.stats.delay_max_us,
    ) {
        (Some(min), Some(avg), Some(max)) => format!("{min:>5}/{avg:>5}/{max:>5} us"),
        _ => "off".to_string(),
    };
    println!(
        "{:>7.3} s  in:{}{}  status:{}  ramp {:>3}/{}  dim {:.3}  publ {:>5} us  fired {:>3}/{:<3} {}{}",
        r.now_us as f64 / 1e6,
        if c.enabled { 'E' } else { '-' },
        if c.dim_select { 'D' } else { '-' },
        u8::from(r.status),
        c.ramp_value,
        RAMP_MAX,
        c.dim_level,
        c.micro_delay,
        r.stats.pulses,
        r.stats.edges,
        delay,
        if r.debug[Debug::Unstable as usize] != 0 { "  UNSTABLE" } else { "" },
    );
}

fn main() -> ah::Result<()> {
    let opts = Opts::parse();
    let cfg = opts.sim_config()?;

    let mut trace = match &opts.trace {
        Some(path) => Some(Trace::create(path)?),
        None => None,
    };

    sim::run(
        &cfg,
        |now_us, cycle| match trace.as_mut() {
            Some(trace) => trace.cycle(now_us, cycle),
            None => Ok(()),
        },
        |report| {
            print_report(report);
            Ok(())
        },
    )?;

    if let Some(trace) = trace {
        trace.finish()?;
    }
    Ok(())
}

// vim: ts=4 sw=4 expandtab
