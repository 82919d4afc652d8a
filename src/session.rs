//! Session-oriented animation API.
//!
//! An [`Animator`] owns the four channels and the static avatar. The caller changes selections
//! and moves virtual time forward; the animator fires every channel's due steps in global
//! timestamp order and re-resolves the face after each one.

use serde::{Deserialize, Serialize};

use crate::config::{AvatarConfig, SessionConfig};
use crate::emote::{EmoteChannel, EmoteOverlay, EmoteSelector};
use crate::expression::{ExpressionChannel, ExpressionSelector};
use crate::eye::{EyeChannel, EyeSelector};
use crate::features::FeatureState;
use crate::foundation::error::{VisageError, VisageResult};
use crate::foundation::math::channel_seed;
use crate::foundation::time::{Millis, Timestamp};
use crate::jitter::{Jitter, SeededJitter};
use crate::mouth::{MouthChannel, MouthSelector};
use crate::resolver::{ResolverInputs, resolve};
use crate::sink::FrameSink;

/// Merged output at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    /// Virtual time of the emission that produced this frame.
    pub at: Timestamp,
    /// Resolved face.
    pub features: FeatureState,
    /// Emote glyph layer input.
    pub emote: EmoteOverlay,
}

impl AnimationFrame {
    fn same_look(&self, other: &Self) -> bool {
        self.features == other.features && self.emote == other.emote
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    Eye,
    Mouth,
    Expression,
}

/// Root of a running animation session.
///
/// Expression and eye/mouth animations exclude each other: selecting an expression switches the
/// eye and mouth channels off, and selecting an eye or mouth animation switches the expression
/// off. The emote channel composes with everything.
#[derive(Debug)]
pub struct Animator {
    avatar: AvatarConfig,
    now: Timestamp,
    eye: EyeChannel,
    mouth: MouthChannel,
    expression: ExpressionChannel,
    emote: EmoteChannel,
    frame: AnimationFrame,
    unflushed: Vec<AnimationFrame>,
}

impl Animator {
    /// Idle session whose channels draw jitter from per-channel seeds derived from `seed`.
    pub fn new(avatar: AvatarConfig, seed: u64) -> Self {
        Self::with_jitter(avatar, |label| {
            Box::new(SeededJitter::new(channel_seed(seed, label)))
        })
    }

    /// Idle session with caller-supplied jitter, requested once per channel label
    /// (`eye`, `mouth`, `expression`).
    pub fn with_jitter(
        avatar: AvatarConfig,
        mut jitter: impl FnMut(&'static str) -> Box<dyn Jitter>,
    ) -> Self {
        let features = avatar.features();
        let mut animator = Self {
            eye: EyeChannel::new(jitter("eye")),
            mouth: MouthChannel::new(jitter("mouth")),
            expression: ExpressionChannel::new(jitter("expression")),
            emote: EmoteChannel::new(),
            avatar,
            now: Timestamp::ZERO,
            frame: AnimationFrame {
                at: Timestamp::ZERO,
                features,
                emote: EmoteOverlay::default(),
            },
            unflushed: Vec::new(),
        };
        animator.recompute_with(true);
        animator
    }

    /// Session built from a loaded configuration, with its selections applied at `t+0ms`.
    pub fn from_config(config: &SessionConfig) -> VisageResult<Self> {
        config.validate()?;
        let mut animator = Self::new(config.avatar.clone(), config.seed);
        animator.set_expression(config.expression)?;
        animator.set_eye(config.eye)?;
        animator.set_mouth(config.mouth)?;
        animator.set_emote(config.emote);
        Ok(animator)
    }

    /// Current virtual time.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Latest merged frame.
    pub fn frame(&self) -> &AnimationFrame {
        &self.frame
    }

    /// Renderer input: the static avatar with the resolved face written in.
    pub fn avatar(&self) -> AvatarConfig {
        self.avatar.with_features(&self.frame.features)
    }

    /// Static avatar configuration.
    pub fn static_avatar(&self) -> &AvatarConfig {
        &self.avatar
    }

    /// Replace the static avatar. Channels keep running.
    pub fn set_avatar(&mut self, avatar: AvatarConfig) {
        self.avatar = avatar;
        self.recompute();
    }

    /// Eye channel.
    pub fn eye(&self) -> &EyeChannel {
        &self.eye
    }

    /// Mouth channel.
    pub fn mouth(&self) -> &MouthChannel {
        &self.mouth
    }

    /// Expression channel.
    pub fn expression(&self) -> &ExpressionChannel {
        &self.expression
    }

    /// Emote channel.
    pub fn emote(&self) -> &EmoteChannel {
        &self.emote
    }

    /// Timers queued across every channel.
    pub fn pending_timers(&self) -> usize {
        self.eye.pending_timers() + self.mouth.pending_timers() + self.expression.pending_timers()
    }

    /// Select an eye animation. Anything but `none` switches the expression off.
    #[tracing::instrument(level = "debug", skip(self), fields(at = %self.now))]
    pub fn set_eye(&mut self, selector: EyeSelector) -> VisageResult<()> {
        if selector != EyeSelector::None {
            self.clear_expression()?;
        }
        self.eye.select(selector)?;
        self.recompute();
        Ok(())
    }

    /// Select a mouth animation. Anything but `none` switches the expression off.
    #[tracing::instrument(level = "debug", skip(self), fields(at = %self.now))]
    pub fn set_mouth(&mut self, selector: MouthSelector) -> VisageResult<()> {
        if selector != MouthSelector::None {
            self.clear_expression()?;
        }
        self.mouth.select(selector)?;
        self.recompute();
        Ok(())
    }

    /// Select an expression. Anything but `none` switches the eye and mouth animations off.
    #[tracing::instrument(level = "debug", skip(self), fields(at = %self.now))]
    pub fn set_expression(&mut self, selector: ExpressionSelector) -> VisageResult<()> {
        if selector.is_active() {
            self.eye.select(EyeSelector::None)?;
            self.mouth.select(MouthSelector::None)?;
        }
        self.expression.select(selector)?;
        self.emote.observe_expression(selector);
        self.recompute();
        Ok(())
    }

    /// Select an emote.
    #[tracing::instrument(level = "debug", skip(self), fields(at = %self.now))]
    pub fn set_emote(&mut self, selector: EmoteSelector) {
        self.emote.select(selector);
        self.recompute();
    }

    /// [`set_eye`](Self::set_eye) from a selector name; unknown names mean `none`.
    pub fn set_eye_str(&mut self, name: &str) -> VisageResult<()> {
        self.set_eye(EyeSelector::parse_lossy(name))
    }

    /// [`set_mouth`](Self::set_mouth) from a selector name; unknown names mean `none`.
    pub fn set_mouth_str(&mut self, name: &str) -> VisageResult<()> {
        self.set_mouth(MouthSelector::parse_lossy(name))
    }

    /// [`set_expression`](Self::set_expression) from a selector name; unknown base names mean
    /// `neutral`.
    pub fn set_expression_str(&mut self, name: &str) -> VisageResult<()> {
        self.set_expression(ExpressionSelector::parse_lossy(name))
    }

    /// [`set_emote`](Self::set_emote) from a selector name; unknown names mean `none`.
    pub fn set_emote_str(&mut self, name: &str) {
        self.set_emote(EmoteSelector::parse_lossy(name))
    }

    /// Due time of the next step on any channel.
    pub fn next_due(&self) -> Option<Timestamp> {
        self.earliest().map(|(due, _)| due)
    }

    /// Fire every step due up to `t` in timestamp order, re-resolving after each.
    ///
    /// Rewinding is an error.
    #[tracing::instrument(level = "trace", skip(self), fields(from = %self.now))]
    pub fn advance_to(&mut self, t: Timestamp) -> VisageResult<()> {
        if t < self.now {
            return Err(VisageError::validation(format!(
                "cannot rewind session from {} to {t}",
                self.now
            )));
        }
        while let Some((due, source)) = self.earliest().filter(|(due, _)| *due <= t) {
            self.now = due;
            let fired = match source {
                Source::Eye => self.eye.channel_mut().fire_next(due),
                Source::Mouth => self.mouth.channel_mut().fire_next(due),
                Source::Expression => self.expression.channel_mut().fire_next(due),
            };
            if fired {
                self.recompute();
            }
        }
        self.eye.channel_mut().advance_to(t);
        self.mouth.channel_mut().advance_to(t);
        self.expression.channel_mut().advance_to(t);
        self.now = t;
        Ok(())
    }

    /// [`advance_to`](Self::advance_to) `now + d`.
    pub fn advance_by(&mut self, d: Millis) -> VisageResult<()> {
        self.advance_to(self.now + d)
    }

    /// Take every distinct frame produced since the last drain, oldest first.
    pub fn drain_frames(&mut self) -> Vec<AnimationFrame> {
        std::mem::take(&mut self.unflushed)
    }

    /// Push every undrained frame into `sink`. Returns how many were pushed.
    pub fn flush(&mut self, sink: &mut dyn FrameSink) -> VisageResult<usize> {
        let frames = self.drain_frames();
        for frame in &frames {
            sink.push_frame(frame)?;
        }
        Ok(frames.len())
    }

    fn clear_expression(&mut self) -> VisageResult<()> {
        self.expression.select(ExpressionSelector::None)?;
        self.emote.observe_expression(ExpressionSelector::None);
        Ok(())
    }

    fn earliest(&self) -> Option<(Timestamp, Source)> {
        [
            (self.eye.channel().next_due(), Source::Eye),
            (self.mouth.channel().next_due(), Source::Mouth),
            (self.expression.channel().next_due(), Source::Expression),
        ]
        .into_iter()
        .filter_map(|(due, source)| due.map(|d| (d, source)))
        .min_by_key(|(due, _)| *due)
    }

    fn inputs(&self) -> ResolverInputs {
        ResolverInputs::new(self.avatar.features())
            .with_eye((self.eye.selector() != EyeSelector::None).then(|| self.eye.state()))
            .with_mouth(self.mouth.is_active().then(|| self.mouth.state()))
            .with_expression(
                self.expression
                    .is_active()
                    .then(|| self.expression.state()),
            )
    }

    fn recompute(&mut self) {
        self.recompute_with(false);
    }

    fn recompute_with(&mut self, force: bool) {
        let next = AnimationFrame {
            at: self.now,
            features: resolve(&self.inputs()),
            emote: self.emote.overlay(),
        };
        if force || !next.same_look(&self.frame) {
            tracing::trace!(at = %next.at, features = ?next.features, "frame");
            self.unflushed.push(next.clone());
            self.frame = next;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
