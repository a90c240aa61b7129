// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Linear ramp.
///
/// Moves the current value towards the target by one unit per tick.
/// The value never leaves `0..=max` and never overshoots the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ramp {
    value: u16,
    target: u16,
    max: u16,
}

impl Ramp {
    /// New ramp at value 0 and target 0.
    pub const fn new(max: u16) -> Self {
        Self {
            value: 0,
            target: 0,
            max,
        }
    }

    /// Set a new target. It is clamped to `0..=max`.
    ///
    /// Redirecting an unfinished ramp keeps the current value.
    pub fn set_target(&mut self, target: u16) {
        self.target = target.min(self.max);
    }

    /// Advance the ramp by `ticks` units towards the target.
    pub fn add_ticks(&mut self, ticks: u16) {
        if self.value < self.target {
            self.value = self.value.saturating_add(ticks).min(self.target);
        } else if self.value > self.target {
            self.value = self.value.saturating_sub(ticks).max(self.target);
        }
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn target(&self) -> u16 {
        self.target
    }

    pub fn max(&self) -> u16 {
        self.max
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }

    /// Current value relative to the ceiling, in 0..=1.
    pub fn relative_value(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            f32::from(self.value) / f32::from(self.max)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

    #[test]
    fn test_ramp_up_down() {
        let mut r = Ramp::new(400);
        assert_eq!(r.value(), 0);
        assert_eq!(r.relative_value(), 0.0);

        r.set_target(400);
        r.add_ticks(0);
        assert_eq!(r.value(), 0);
        r.add_ticks(150);
        assert_eq!(r.value(), 150);
        r.add_ticks(249);
        assert_eq!(r.value(), 399);
        assert!(!r.is_settled());
        r.add_ticks(1);
        assert_eq!(r.value(), 400);
        assert_eq!(r.relative_value(), 1.0);
        r.add_ticks(1000);
        assert_eq!(r.value(), 400);
        assert!(r.is_settled());

        r.set_target(80);
        r.add_ticks(300);
        assert_eq!(r.value(), 100);
        r.add_ticks(300);
        assert_eq!(r.value(), 80);
        assert_eq!(r.relative_value(), 0.2);

        r.set_target(0);
        r.add_ticks(u16::MAX);
        assert_eq!(r.value(), 0);
    }

    #[test]
    fn test_target_clamp() {
        let mut r = Ramp::new(10);
        r.set_target(11);
        assert_eq!(r.target(), 10);
        r.add_ticks(u16::MAX);
        assert_eq!(r.value(), 10);
        assert_eq!(r.max(), 10);
    }

    #[test]
    fn test_redirect() {
        let mut r = Ramp::new(400);
        r.set_target(400);
        r.add_ticks(50);
        r.set_target(80);
        assert_eq!(r.value(), 50);
        r.add_ticks(10);
        assert_eq!(r.value(), 60);
        r.set_target(0);
        r.add_ticks(10);
        assert_eq!(r.value(), 50);
    }

    #[test]
    fn test_zero_max() {
        let mut r = Ramp::new(0);
        r.set_target(100);
        r.add_ticks(100);
        assert_eq!(r.value(), 0);
        assert_eq!(r.relative_value(), 0.0);
    }

    #[test]
    fn test_random_sequences() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let max = rng.random_range(1..=1000);
            let mut r = Ramp::new(max);
            for _ in 0..500 {
                if rng.random_bool(0.3) {
                    r.set_target(rng.random_range(0..=max + 100));
                }
                let prev = r.value();
                let ticks = rng.random_range(0..5);
                r.add_ticks(ticks);
                assert!(r.value() <= r.max());
                assert!(prev.abs_diff(r.value()) <= ticks);
                assert!((0.0..=1.0).contains(&r.relative_value()));
            }

            // Settles in exactly |target - value| ticks and stays there.
            let dist = r.value().abs_diff(r.target());
            for _ in 0..dist {
                assert!(!r.is_settled());
                r.add_ticks(1);
            }
            assert!(r.is_settled());
            let settled = r.value();
            r.add_ticks(100);
            assert_eq!(r.value(), settled);
        }
    }
}

// vim: ts=4 sw=4 expandtab
