//! Pluggable randomness for delays and probabilistic branches.
//!
//! Every randomized delay in the crate is expressed as a [`JitterRange`] and sampled through a
//! [`Jitter`] source, so playback is reproducible from a seed ([`SeededJitter`]) or fully pinned
//! for tests ([`FixedJitter`]).

use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

use crate::foundation::error::{VisageError, VisageResult};
use crate::foundation::time::Millis;

/// Half-open millisecond range `[min, max)`.
///
/// `min == max` is allowed and always samples `min`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct JitterRange {
    /// Inclusive lower bound.
    pub min: Millis,
    /// Exclusive upper bound (equal to `min` for a fixed value).
    pub max: Millis,
}

impl JitterRange {
    /// Create a validated range.
    pub fn new(min: Millis, max: Millis) -> VisageResult<Self> {
        if min > max {
            return Err(VisageError::validation(format!(
                "jitter range min ({min}) must be <= max ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    /// Range constructor for constant tables; bounds are checked at compile time there.
    pub const fn ms(min: u64, max: u64) -> Self {
        assert!(min <= max, "jitter range min must be <= max");
        Self {
            min: Millis(min),
            max: Millis(max),
        }
    }

    /// Degenerate range that always yields `value`.
    pub const fn fixed(value: Millis) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// `true` when the range can only produce `min`.
    pub fn is_fixed(self) -> bool {
        self.min >= self.max
    }

    /// `true` when `value` is a possible sample of this range.
    pub fn contains(self, value: Millis) -> bool {
        if self.is_fixed() {
            value == self.min
        } else {
            self.min <= value && value < self.max
        }
    }

    /// Largest value the range can produce.
    pub fn max_inclusive(self) -> Millis {
        if self.is_fixed() {
            self.min
        } else {
            Millis(self.max.0 - 1)
        }
    }

    /// Shift both bounds by `extra`.
    pub fn shifted(self, extra: Millis) -> Self {
        Self {
            min: self.min + extra,
            max: self.max + extra,
        }
    }
}

/// Source of randomness consumed by the timeline engine.
pub trait Jitter {
    /// Draw a delay from `range`. Must return a value for which `range.contains` holds.
    fn sample(&mut self, range: JitterRange) -> Millis;

    /// Return `true` with probability `p`. Values outside `[0, 1]` saturate.
    fn chance(&mut self, p: f64) -> bool;
}

impl<J: Jitter + ?Sized> Jitter for Box<J> {
    fn sample(&mut self, range: JitterRange) -> Millis {
        (**self).sample(range)
    }

    fn chance(&mut self, p: f64) -> bool {
        (**self).chance(p)
    }
}

/// Reproducible jitter backed by a seeded [`StdRng`].
#[derive(Clone, Debug)]
pub struct SeededJitter {
    rng: StdRng,
}

impl SeededJitter {
    /// Create a source whose whole sequence is determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Jitter for SeededJitter {
    fn sample(&mut self, range: JitterRange) -> Millis {
        if range.is_fixed() {
            return range.min;
        }
        Millis(self.rng.gen_range(range.min.0..range.max.0))
    }

    fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() || p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen_bool(p)
    }
}

/// Jitter pinned to a fixed relative position inside every range, with a fixed coin.
///
/// `position` is a fraction in `[0, 1]`: `0.0` always samples `min`, `1.0` always samples the
/// largest value below `max`. Chances strictly between 0 and 1 resolve to `coin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedJitter {
    position: f64,
    coin: bool,
}

impl FixedJitter {
    /// Create a pinned source. `position` is clamped into `[0, 1]`.
    pub fn new(position: f64, coin: bool) -> Self {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        Self { position, coin }
    }

    /// Always the lower bound, probabilistic branches never taken.
    pub fn lower() -> Self {
        Self::new(0.0, false)
    }

    /// Always the largest value of the range, probabilistic branches always taken.
    pub fn upper() -> Self {
        Self::new(1.0, true)
    }
}

impl Jitter for FixedJitter {
    fn sample(&mut self, range: JitterRange) -> Millis {
        if range.is_fixed() {
            return range.min;
        }
        let span = range.max.0 - range.min.0;
        let offset = ((span as f64) * self.position).floor() as u64;
        Millis(range.min.0 + offset.min(span - 1))
    }

    fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() || p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.coin
    }
}

#[cfg(test)]
#[path = "../tests/unit/jitter.rs"]
mod tests;
