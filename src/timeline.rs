//! Declarative timelines: ordered `(delay, action)` steps, played once or cyclically.
//!
//! A [`Timeline`] is plain data. It says nothing about timers; the [`Engine`](crate::Engine)
//! turns it into scheduled work. Timelines are built through [`TimelineBuilder`], which validates
//! the shape so the engine never sees a cycle that cannot advance time.

use crate::foundation::error::{VisageError, VisageResult};
use crate::foundation::time::Millis;
use crate::jitter::{Jitter, JitterRange};

/// How long to wait before a step fires, relative to the previous step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Delay {
    /// Exact delay.
    Fixed(Millis),
    /// Uniform draw from a half-open range.
    Uniform(JitterRange),
    /// Usually `base`; with probability `chance` redrawn from `range` instead.
    Wobble {
        /// Delay used when the coin does not come up.
        base: Millis,
        /// Probability of redrawing, in `[0, 1]`.
        chance: f64,
        /// Range the redraw samples from.
        range: JitterRange,
    },
}

impl Delay {
    /// No delay.
    pub const ZERO: Delay = Delay::Fixed(Millis::ZERO);

    /// Fixed delay of `ms` milliseconds.
    pub const fn ms(ms: u64) -> Self {
        Self::Fixed(Millis(ms))
    }

    /// Uniform delay drawn from `[min, max)` milliseconds.
    pub const fn between(min: u64, max: u64) -> Self {
        Self::Uniform(JitterRange::ms(min, max))
    }

    /// Resolve this delay using `jitter`.
    pub fn sample(&self, jitter: &mut dyn Jitter) -> Millis {
        match *self {
            Self::Fixed(d) => d,
            Self::Uniform(range) => jitter.sample(range),
            Self::Wobble {
                base,
                chance,
                range,
            } => {
                if jitter.chance(chance) {
                    jitter.sample(range)
                } else {
                    base
                }
            }
        }
    }

    /// Smallest value [`sample`](Self::sample) can return.
    pub fn min(&self) -> Millis {
        match *self {
            Self::Fixed(d) => d,
            Self::Uniform(range) => range.min,
            Self::Wobble { base, range, .. } => base.min(range.min),
        }
    }

    /// Largest value [`sample`](Self::sample) can return.
    pub fn max(&self) -> Millis {
        match *self {
            Self::Fixed(d) => d,
            Self::Uniform(range) => range.max_inclusive(),
            Self::Wobble { base, range, .. } => base.max(range.max_inclusive()),
        }
    }

    /// Same delay with a constant hold of `extra` added to every outcome.
    pub fn shifted(self, extra: Millis) -> Self {
        match self {
            Self::Fixed(d) => Self::Fixed(d + extra),
            Self::Uniform(range) => Self::Uniform(range.shifted(extra)),
            Self::Wobble {
                base,
                chance,
                range,
            } => Self::Wobble {
                base: base + extra,
                chance,
                range: range.shifted(extra),
            },
        }
    }

    fn validate(&self) -> VisageResult<()> {
        match *self {
            Self::Fixed(_) => Ok(()),
            Self::Uniform(range) => JitterRange::new(range.min, range.max).map(|_| ()),
            Self::Wobble { chance, range, .. } => {
                check_chance(chance)?;
                JitterRange::new(range.min, range.max).map(|_| ())
            }
        }
    }
}

impl From<Millis> for Delay {
    fn from(value: Millis) -> Self {
        Self::Fixed(value)
    }
}

impl From<JitterRange> for Delay {
    fn from(value: JitterRange) -> Self {
        Self::Uniform(value)
    }
}

/// One entry of a timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<P> {
    /// Wait before `action`, measured from the previous step (or from the cycle start).
    pub delay: Delay,
    /// What happens once the delay elapses.
    pub action: Action<P>,
}

/// What a step does when it fires.
#[derive(Clone, Debug, PartialEq)]
pub enum Action<P> {
    /// Hand `P` to the channel's emit callback.
    Emit(P),
    /// With probability `chance`, play `steps` inline before continuing.
    Maybe {
        /// Probability of taking the branch.
        chance: f64,
        /// Steps spliced in when the branch is taken.
        steps: Vec<Step<P>>,
    },
    /// Start a nested timeline that lives and dies with the current execution.
    Overlay(Box<Timeline<P>>),
}

/// Playback mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    /// Play the steps once, then finish.
    OneShot,
    /// Wait `initial`, play the steps, wait `gap`, and repeat until cancelled.
    Cyclic {
        /// Wait before the first cycle.
        initial: Delay,
        /// Wait after the last step of a cycle before the next cycle begins.
        gap: Delay,
    },
}

/// Ordered sequence of timed steps plus an optional entry value.
///
/// `entry` is emitted synchronously when the timeline starts, before any delay elapses.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline<P> {
    entry: Option<P>,
    steps: Vec<Step<P>>,
    mode: Mode,
}

impl<P> Timeline<P> {
    /// Start building a timeline.
    pub fn builder() -> TimelineBuilder<P> {
        TimelineBuilder::new()
    }

    /// Value emitted at start, if any.
    pub fn entry(&self) -> Option<&P> {
        self.entry.as_ref()
    }

    /// Top-level steps in playback order.
    pub fn steps(&self) -> &[Step<P>] {
        &self.steps
    }

    /// Playback mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// `true` for timelines that repeat until cancelled.
    pub fn is_cyclic(&self) -> bool {
        matches!(self.mode, Mode::Cyclic { .. })
    }

    /// Every value this timeline (including branches and overlays) can emit, in declaration order.
    pub fn emitted_values(&self) -> Vec<&P> {
        let mut out = Vec::new();
        if let Some(entry) = &self.entry {
            out.push(entry);
        }
        collect_emits(&self.steps, &mut out);
        out
    }

    /// Check the structural rules the engine relies on.
    pub fn validate(&self) -> VisageResult<()> {
        validate_steps(&self.steps)?;
        if let Mode::Cyclic { initial, gap } = self.mode {
            initial.validate()?;
            gap.validate()?;
            if self.steps.is_empty() {
                return Err(VisageError::timeline("cyclic timeline needs at least one step"));
            }
            let cycle = self
                .steps
                .iter()
                .fold(gap.min(), |acc, step| acc + step.delay.min());
            if cycle == Millis::ZERO {
                return Err(VisageError::timeline(
                    "cyclic timeline must advance time on every cycle",
                ));
            }
        }
        Ok(())
    }
}

fn collect_emits<'a, P>(steps: &'a [Step<P>], out: &mut Vec<&'a P>) {
    for step in steps {
        match &step.action {
            Action::Emit(p) => out.push(p),
            Action::Maybe { steps, .. } => collect_emits(steps, out),
            Action::Overlay(timeline) => out.extend(timeline.emitted_values()),
        }
    }
}

fn check_chance(chance: f64) -> VisageResult<()> {
    if !(0.0..=1.0).contains(&chance) {
        return Err(VisageError::timeline(format!(
            "chance must be within [0, 1], got {chance}"
        )));
    }
    Ok(())
}

fn validate_steps<P>(steps: &[Step<P>]) -> VisageResult<()> {
    for step in steps {
        step.delay.validate()?;
        match &step.action {
            Action::Emit(_) => {}
            Action::Maybe { chance, steps } => {
                check_chance(*chance)?;
                validate_steps(steps)?;
            }
            Action::Overlay(timeline) => timeline.validate()?,
        }
    }
    Ok(())
}

/// Fluent builder for [`Timeline`].
///
/// ```
/// use visage::{Delay, EyeState, Timeline};
///
/// let wink = Timeline::builder()
///     .emit_after(Delay::ms(100), EyeState::Squint)
///     .emit_after(Delay::ms(80), EyeState::Normal)
///     .one_shot()
///     .unwrap();
/// assert_eq!(wink.steps().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct TimelineBuilder<P> {
    entry: Option<P>,
    steps: Vec<Step<P>>,
}

impl<P> Default for TimelineBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TimelineBuilder<P> {
    /// Empty builder.
    pub fn new() -> Self {
        Self {
            entry: None,
            steps: Vec::new(),
        }
    }

    /// Value to emit synchronously at start.
    pub fn entry(mut self, value: P) -> Self {
        self.entry = Some(value);
        self
    }

    /// Emit `value` once `delay` has elapsed since the previous step.
    pub fn emit_after(mut self, delay: impl Into<Delay>, value: P) -> Self {
        self.steps.push(Step {
            delay: delay.into(),
            action: Action::Emit(value),
        });
        self
    }

    /// Emit `value` at the same instant as the previous step.
    pub fn emit(self, value: P) -> Self {
        self.emit_after(Delay::ZERO, value)
    }

    /// With probability `chance`, play the steps added by `branch` inline.
    ///
    /// An entry set inside `branch` is ignored; branches only contribute steps.
    pub fn maybe(mut self, chance: f64, branch: impl FnOnce(Self) -> Self) -> Self {
        let inner = branch(Self::new());
        self.steps.push(Step {
            delay: Delay::ZERO,
            action: Action::Maybe {
                chance,
                steps: inner.steps,
            },
        });
        self
    }

    /// Start `overlay` once `delay` has elapsed since the previous step.
    pub fn overlay_after(mut self, delay: impl Into<Delay>, overlay: Timeline<P>) -> Self {
        self.steps.push(Step {
            delay: delay.into(),
            action: Action::Overlay(Box::new(overlay)),
        });
        self
    }

    /// Finish as a timeline that plays once.
    pub fn one_shot(self) -> VisageResult<Timeline<P>> {
        self.finish(Mode::OneShot)
    }

    /// Finish as a timeline that repeats until cancelled.
    pub fn cyclic(
        self,
        initial: impl Into<Delay>,
        gap: impl Into<Delay>,
    ) -> VisageResult<Timeline<P>> {
        self.finish(Mode::Cyclic {
            initial: initial.into(),
            gap: gap.into(),
        })
    }

    fn finish(self, mode: Mode) -> VisageResult<Timeline<P>> {
        let timeline = Timeline {
            entry: self.entry,
            steps: self.steps,
            mode,
        };
        timeline.validate()?;
        Ok(timeline)
    }
}

#[cfg(test)]
#[path = "../tests/unit/timeline.rs"]
mod tests;
