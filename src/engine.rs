//! Virtual-time executor for [`Timeline`]s.
//!
//! The engine owns a clock, a jitter source and a timer queue. Nothing fires on its own: the owner
//! moves the clock forward with [`Engine::advance_to`] (or one timer at a time with
//! [`Engine::fire_next`]) and every due step runs in timestamp order. Steps that share a timestamp
//! run in the order they were scheduled.
//!
//! A started timeline becomes an *execution* made of one or more *tracks*: the main track plus one
//! per overlay it spawned. Each track has at most one queued timer. Cancelling an execution drops
//! all of its tracks and purges their timers before returning.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, VecDeque};

use crate::foundation::time::Timestamp;
use crate::jitter::Jitter;
use crate::timeline::{Action, Delay, Mode, Step, Timeline};

/// Identifies one started timeline. Returned by [`Engine::start`], consumed by [`Engine::cancel`].
#[must_use = "an execution that is never cancelled keeps its timers queued"]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ExecutionHandle {
    id: u64,
}

impl ExecutionHandle {
    /// Engine-unique execution id.
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Scheduled {
    due: Timestamp,
    seq: u64,
    exec: u64,
    track: u32,
}

enum Armed<P> {
    Restart,
    Run(Action<P>),
}

struct Track<P> {
    steps: Vec<Step<P>>,
    gap: Option<Delay>,
    pending: VecDeque<Step<P>>,
    armed: Option<Armed<P>>,
}

struct Execution<P> {
    tracks: BTreeMap<u32, Track<P>>,
    next_track: u32,
}

/// Timeline executor driven by an explicit virtual clock.
pub struct Engine<P> {
    now: Timestamp,
    jitter: Box<dyn Jitter>,
    executions: BTreeMap<u64, Execution<P>>,
    queue: BinaryHeap<Reverse<Scheduled>>,
    next_exec: u64,
    next_seq: u64,
}

impl<P> std::fmt::Debug for Engine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("now", &self.now)
            .field("executions", &self.executions.len())
            .field("pending_timers", &self.queue.len())
            .finish()
    }
}

impl<P: Clone> Engine<P> {
    /// Engine at `t+0ms` drawing delays from `jitter`.
    pub fn new(jitter: impl Jitter + 'static) -> Self {
        Self::with_boxed_jitter(Box::new(jitter))
    }

    /// Engine at `t+0ms` with an already boxed jitter source.
    pub fn with_boxed_jitter(jitter: Box<dyn Jitter>) -> Self {
        Self {
            now: Timestamp::ZERO,
            jitter,
            executions: BTreeMap::new(),
            queue: BinaryHeap::new(),
            next_exec: 0,
            next_seq: 0,
        }
    }

    /// Current position of the virtual clock.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Number of queued timers across every execution.
    pub fn pending_timers(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest queued timer.
    pub fn next_due(&self) -> Option<Timestamp> {
        self.queue.peek().map(|Reverse(s)| s.due)
    }

    /// `true` while the execution still has a track that can fire.
    pub fn is_live(&self, handle: &ExecutionHandle) -> bool {
        self.executions.contains_key(&handle.id)
    }

    /// Start `timeline` at the current instant.
    ///
    /// The entry value, if any, is emitted before this returns.
    pub fn start(&mut self, timeline: &Timeline<P>, mut emit: impl FnMut(&P)) -> ExecutionHandle {
        let id = self.next_exec;
        self.next_exec += 1;
        self.executions.insert(
            id,
            Execution {
                tracks: BTreeMap::new(),
                next_track: 0,
            },
        );
        self.spawn_track(id, timeline, &mut emit);
        tracing::debug!(
            execution = id,
            at = %self.now,
            pending = self.queue.len(),
            cyclic = timeline.is_cyclic(),
            "timeline started"
        );
        ExecutionHandle { id }
    }

    /// Stop an execution. No step of it fires after this returns.
    ///
    /// Returns the number of queued timers that were purged.
    pub fn cancel(&mut self, handle: ExecutionHandle) -> usize {
        let before = self.queue.len();
        self.executions.remove(&handle.id);
        self.queue.retain(|Reverse(s)| s.exec != handle.id);
        let purged = before - self.queue.len();
        tracing::debug!(execution = handle.id, at = %self.now, purged, "timeline cancelled");
        purged
    }

    /// Fire the earliest timer due at or before `until`, moving the clock to its due time.
    ///
    /// Returns `false` when nothing is due.
    pub fn fire_next(&mut self, until: Timestamp, mut emit: impl FnMut(&P)) -> bool {
        match self.queue.peek() {
            Some(Reverse(s)) if s.due <= until => {}
            _ => return false,
        }
        let Some(Reverse(sched)) = self.queue.pop() else {
            return false;
        };
        self.now = self.now.max(sched.due);
        self.run(sched, &mut emit);
        true
    }

    /// Fire every timer due at or before `t`, then move the clock to `t`.
    ///
    /// Moving backwards is a no-op.
    pub fn advance_to(&mut self, t: Timestamp, mut emit: impl FnMut(&P)) {
        while self.fire_next(t, &mut emit) {}
        self.now = self.now.max(t);
    }

    fn run(&mut self, sched: Scheduled, emit: &mut dyn FnMut(&P)) {
        let Some(track) = self
            .executions
            .get_mut(&sched.exec)
            .and_then(|e| e.tracks.get_mut(&sched.track))
        else {
            return;
        };
        let mut overlay = None;
        match track.armed.take() {
            Some(Armed::Restart) => track.pending.extend(track.steps.iter().cloned()),
            Some(Armed::Run(Action::Emit(value))) => emit(&value),
            Some(Armed::Run(Action::Maybe { chance, steps })) => {
                if self.jitter.chance(chance) {
                    for step in steps.into_iter().rev() {
                        track.pending.push_front(step);
                    }
                }
            }
            Some(Armed::Run(Action::Overlay(timeline))) => overlay = Some(timeline),
            None => return,
        }
        if let Some(timeline) = overlay {
            self.spawn_track(sched.exec, &timeline, emit);
        }
        self.arm(sched.exec, sched.track);
    }

    fn spawn_track(&mut self, exec: u64, timeline: &Timeline<P>, emit: &mut dyn FnMut(&P)) {
        if let Some(entry) = timeline.entry() {
            emit(entry);
        }
        let Some(execution) = self.executions.get_mut(&exec) else {
            return;
        };
        let track_id = execution.next_track;
        execution.next_track += 1;
        let (pending, gap, armed, first) = match timeline.mode() {
            Mode::OneShot => (
                timeline.steps().iter().cloned().collect(),
                None,
                None,
                None,
            ),
            Mode::Cyclic { initial, gap } => (
                VecDeque::new(),
                Some(gap),
                Some(Armed::Restart),
                Some(initial.sample(self.jitter.as_mut())),
            ),
        };
        execution.tracks.insert(
            track_id,
            Track {
                steps: timeline.steps().to_vec(),
                gap,
                pending,
                armed,
            },
        );
        match first {
            Some(delay) => self.schedule(exec, track_id, self.now + delay),
            None => self.arm(exec, track_id),
        }
    }

    /// Queue the next timer of a track, or retire the track when it has nothing left.
    fn arm(&mut self, exec: u64, track_id: u32) {
        let Some(execution) = self.executions.get_mut(&exec) else {
            return;
        };
        let Some(track) = execution.tracks.get_mut(&track_id) else {
            return;
        };
        let delay = if let Some(step) = track.pending.pop_front() {
            track.armed = Some(Armed::Run(step.action));
            step.delay.sample(self.jitter.as_mut())
        } else if let Some(gap) = track.gap {
            track.armed = Some(Armed::Restart);
            gap.sample(self.jitter.as_mut())
        } else {
            execution.tracks.remove(&track_id);
            if execution.tracks.is_empty() {
                self.executions.remove(&exec);
                tracing::trace!(execution = exec, at = %self.now, "timeline finished");
            }
            return;
        };
        self.schedule(exec, track_id, self.now + delay);
    }

    fn schedule(&mut self, exec: u64, track: u32, due: Timestamp) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Scheduled {
            due,
            seq,
            exec,
            track,
        }));
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
