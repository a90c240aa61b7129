// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated unstable mains power.
//!
//! When active, the channel is switched off for single control loop
//! iterations at random distances, which adds flickering.
//! This exercises the recovery of the ramp.

use crate::{
    config::{INSTABILITY_FIRST_TICKS, INSTABILITY_MAX_TICKS, INSTABILITY_MIN_TICKS},
    timer::AcTime,
};

/// Decides per control loop iteration whether power is unstable.
pub trait FaultInjector {
    fn power_unstable(&mut self, now: AcTime) -> bool;
}

/// Stable power.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoFaults;

impl FaultInjector for NoFaults {
    fn power_unstable(&mut self, _now: AcTime) -> bool {
        false
    }
}

impl<T: FaultInjector> FaultInjector for Option<T> {
    fn power_unstable(&mut self, now: AcTime) -> bool {
        self.as_mut().is_some_and(|f| f.power_unstable(now))
    }
}

impl<T: FaultInjector + ?Sized> FaultInjector for &mut T {
    fn power_unstable(&mut self, now: AcTime) -> bool {
        (**self).power_unstable(now)
    }
}

/// Random source for the distance to the next instability.
pub trait IntervalSource {
    /// Next distance in half-waves.
    /// Expected in `INSTABILITY_MIN_TICKS..INSTABILITY_MAX_TICKS`.
    fn next_interval(&mut self) -> u32;
}

/// 16 bit Galois LFSR interval source.
///
/// For targets without a random number generator.
#[derive(Clone, Debug)]
pub struct Lfsr16(u16);

impl Lfsr16 {
    const TAPS: u16 = 0xB400;

    /// A zero seed would lock up the LFSR. It is replaced by 1.
    pub const fn new(seed: u16) -> Self {
        Self(if seed == 0 { 1 } else { seed })
    }

    pub fn next_u16(&mut self) -> u16 {
        let lsb = self.0 & 1;
        self.0 >>= 1;
        if lsb != 0 {
            self.0 ^= Self::TAPS;
        }
        self.0
    }
}

impl IntervalSource for Lfsr16 {
    fn next_interval(&mut self) -> u32 {
        let span = INSTABILITY_MAX_TICKS - INSTABILITY_MIN_TICKS;
        INSTABILITY_MIN_TICKS + u32::from(self.next_u16()) % span
    }
}

/// Injects one instability, then waits a random number of half-waves.
#[derive(Clone, Debug)]
pub struct PowerInstability<R> {
    source: R,
    last: AcTime,
    next: u32,
}

impl<R: IntervalSource> PowerInstability<R> {
    pub const fn new(source: R) -> Self {
        Self {
            source,
            last: AcTime::new(),
            next: INSTABILITY_FIRST_TICKS,
        }
    }

    /// Half-waves between the last and the next instability.
    pub fn next_interval(&self) -> u32 {
        self.next
    }
}

impl<R: IntervalSource> FaultInjector for PowerInstability<R> {
    fn power_unstable(&mut self, now: AcTime) -> bool {
        if now.since(self.last) > self.next {
            self.last = now;
            self.next = self
                .source
                .next_interval()
                .clamp(INSTABILITY_MIN_TICKS, INSTABILITY_MAX_TICKS - 1);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Fixed(u32);

    impl IntervalSource for Fixed {
        fn next_interval(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_instability() {
        let mut f = PowerInstability::new(Fixed(300));
        assert_eq!(f.next_interval(), INSTABILITY_FIRST_TICKS);

        assert!(!f.power_unstable(AcTime::from_ticks(0)));
        assert!(!f.power_unstable(AcTime::from_ticks(100)));
        assert!(f.power_unstable(AcTime::from_ticks(101)));
        assert_eq!(f.next_interval(), 300);
        assert!(!f.power_unstable(AcTime::from_ticks(102)));
        assert!(!f.power_unstable(AcTime::from_ticks(401)));
        assert!(f.power_unstable(AcTime::from_ticks(402)));
    }

    #[test]
    fn test_interval_clamp() {
        let mut f = PowerInstability::new(Fixed(5));
        assert!(f.power_unstable(AcTime::from_ticks(1000)));
        assert_eq!(f.next_interval(), INSTABILITY_MIN_TICKS);

        let mut f = PowerInstability::new(Fixed(u32::MAX));
        assert!(f.power_unstable(AcTime::from_ticks(1000)));
        assert_eq!(f.next_interval(), INSTABILITY_MAX_TICKS - 1);
    }

    #[test]
    fn test_wrapping_time() {
        let mut f = PowerInstability::new(Fixed(300));
        assert!(f.power_unstable(AcTime::from_ticks(u32::MAX - 10)));
        assert!(!f.power_unstable(AcTime::from_ticks(100)));
        assert!(f.power_unstable(AcTime::from_ticks(290)));
    }

    #[test]
    fn test_lfsr() {
        let mut l = Lfsr16::new(0);
        let first = l.next_u16();
        assert_ne!(first, 0);

        // Maximum length sequence.
        let mut period = 1_u32;
        while l.next_u16() != first {
            period += 1;
        }
        assert_eq!(period, 0xFFFF);

        let mut l = Lfsr16::new(0xACE1);
        for _ in 0..1000 {
            let i = l.next_interval();
            assert!((INSTABILITY_MIN_TICKS..INSTABILITY_MAX_TICKS).contains(&i));
        }
    }

    #[test]
    fn test_option() {
        let mut none: Option<NoFaults> = None;
        assert!(!none.power_unstable(AcTime::from_ticks(1_000_000)));

        let mut some = Some(PowerInstability::new(Fixed(300)));
        assert!(some.power_unstable(AcTime::from_ticks(1_000)));
        assert!(!NoFaults.power_unstable(AcTime::from_ticks(1_000)));
    }
}

// vim: ts=4 sw=4 expandtab
