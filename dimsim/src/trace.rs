// -*- coding: utf-8 -*-

use anyhow::{self as ah, Context as _};
use dimcore::Cycle;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// CSV trace of every control loop iteration.
pub struct Trace<W> {
    out: W,
}

impl Trace<BufWriter<File>> {
    pub fn create(path: &Path) -> ah::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Create trace file '{}'", path.display()))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> Trace<W> {
    pub fn new(mut out: W) -> ah::Result<Self> {
        writeln!(
            out,
            "time_us,ticks,ac_time,enabled,dim_select,unstable,ramp,dim_level,micro_delay"
        )
        .context("Write trace header")?;
        Ok(Self { out })
    }

    pub fn cycle(&mut self, now_us: u64, c: &Cycle) -> ah::Result<()> {
        writeln!(
            self.out,
            "{},{},{},{},{},{},{},{:.4},{}",
            now_us,
            c.ticks,
            c.ac_time.ticks(),
            u8::from(c.enabled),
            u8::from(c.dim_select),
            u8::from(c.power_unstable),
            c.ramp_value,
            c.dim_level,
            c.micro_delay,
        )
        .context("Write trace")
    }

    pub fn finish(mut self) -> ah::Result<W> {
        self.out.flush().context("Flush trace")?;
        Ok(self.out)
    }
}


// vim: ts=4 sw=4 expandtab
