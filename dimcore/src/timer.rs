// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// System time in mains half-waves (zero crossings).
///
/// The zero crossing interrupt blocks for most of each half-wave,
/// so the mains is the only usable clock.
/// Wraps around after 2^32 half-waves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AcTime(u32);

impl AcTime {
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_ticks(ticks: u32) -> Self {
        Self(ticks)
    }

    pub const fn ticks(self) -> u32 {
        self.0
    }

    /// Advance by `ticks` half-waves.
    #[must_use]
    pub const fn add_ticks(self, ticks: u16) -> Self {
        Self(self.0.wrapping_add(ticks as u32))
    }

    /// Half-waves elapsed since `earlier`.
    pub const fn since(self, earlier: Self) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

impl From<AcTime> for u32 {
    fn from(t: AcTime) -> u32 {
        t.0
    }
}


// vim: ts=4 sw=4 expandtab
