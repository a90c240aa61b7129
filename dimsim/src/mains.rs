// -*- coding: utf-8 -*-

use dimcore::{EdgeSource, PinId};

/// Simulated zero crossing detector.
///
/// Produces one rising edge per mains half-wave.
pub struct Mains<'h> {
    halfwave_us: u64,
    next_edge_us: u64,
    handler: Option<(PinId, &'h (dyn Fn() + Sync))>,
}

impl<'h> Mains<'h> {
    pub fn new(halfwave_us: u64, first_edge_us: u64) -> Self {
        Self {
            halfwave_us,
            next_edge_us: first_edge_us,
            handler: None,
        }
    }

    pub fn next_edge_us(&self) -> u64 {
        self.next_edge_us
    }

    /// Produce the pending edge and schedule the next one.
    pub fn edge(&mut self) {
        self.next_edge_us += self.halfwave_us;
        if let Some((_, handler)) = self.handler {
            handler();
        }
    }
}

impl<'h> EdgeSource<'h> for Mains<'h> {
    fn set_handler(&mut self, pin: PinId, handler: &'h (dyn Fn() + Sync)) {
        self.handler = Some((pin, handler));
    }
}

// vim: ts=4 sw=4 expandtab
