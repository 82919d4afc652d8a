//! A single animation channel: one engine, at most one live execution, one current value.

use std::fmt;

use crate::engine::{Engine, ExecutionHandle};
use crate::features::Patch;
use crate::foundation::time::Timestamp;
use crate::jitter::Jitter;
use crate::timeline::Timeline;

/// Owns the timeline execution of one channel and the value it currently emits.
///
/// Switching timelines goes through [`play`](Self::play), which cancels the live execution,
/// resets the value to the channel's rest value and only then starts the replacement.
pub struct Channel<S, P> {
    label: &'static str,
    rest: S,
    state: S,
    engine: Engine<P>,
    live: Option<ExecutionHandle>,
}

impl<S: fmt::Debug, P> fmt::Debug for Channel<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("label", &self.label)
            .field("state", &self.state)
            .field("engine", &self.engine)
            .field("live", &self.live)
            .finish()
    }
}

impl<S, P> Channel<S, P>
where
    S: Copy + fmt::Debug,
    P: Patch<S> + Clone + fmt::Debug,
{
    /// Idle channel resting at `rest`.
    pub fn new(label: &'static str, rest: S, jitter: Box<dyn Jitter>) -> Self {
        Self {
            label,
            rest,
            state: rest,
            engine: Engine::with_boxed_jitter(jitter),
            live: None,
        }
    }

    /// Name used in logs.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Value the channel currently emits.
    pub fn state(&self) -> S {
        self.state
    }

    /// Value the channel returns to whenever its timeline is replaced.
    pub fn rest(&self) -> S {
        self.rest
    }

    /// `true` while a timeline execution can still emit.
    pub fn is_playing(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|handle| self.engine.is_live(handle))
    }

    /// Channel clock.
    pub fn now(&self) -> Timestamp {
        self.engine.now()
    }

    /// Timers queued by the live execution.
    pub fn pending_timers(&self) -> usize {
        self.engine.pending_timers()
    }

    /// Due time of the next queued step.
    pub fn next_due(&self) -> Option<Timestamp> {
        self.engine.next_due()
    }

    /// Cancel the live execution, reset to rest, then start `timeline` if given.
    pub fn play(&mut self, timeline: Option<&Timeline<P>>) {
        if let Some(handle) = self.live.take() {
            self.engine.cancel(handle);
        }
        self.state = self.rest;
        if let Some(timeline) = timeline {
            let label = self.label;
            let state = &mut self.state;
            self.live = Some(self.engine.start(timeline, |patch| {
                tracing::trace!(channel = label, ?patch, "emit");
                patch.apply(state);
            }));
        }
    }

    /// Cancel the live execution and rest.
    pub fn stop(&mut self) {
        self.play(None);
    }

    /// Fire the earliest step due at or before `until`. Returns `false` when nothing was due.
    pub fn fire_next(&mut self, until: Timestamp) -> bool {
        let label = self.label;
        let state = &mut self.state;
        self.engine.fire_next(until, |patch| {
            tracing::trace!(channel = label, ?patch, "emit");
            patch.apply(state);
        })
    }

    /// Fire everything due up to `t` and move the channel clock there.
    pub fn advance_to(&mut self, t: Timestamp) {
        while self.fire_next(t) {}
        self.engine.advance_to(t, |_| {});
    }
}

#[cfg(test)]
#[path = "../tests/unit/channel.rs"]
mod tests;
