//! Eye channel: blink and left-twitch timelines over [`EyeState`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::cadence;
use crate::channel::Channel;
use crate::features::EyeState;
use crate::foundation::error::{VisageError, VisageResult};
use crate::jitter::Jitter;
use crate::timeline::{Delay, Timeline};

/// Which timeline the eye channel runs.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum EyeSelector {
    /// Idle, eyes held `normal`.
    #[default]
    None,
    /// Periodic double blink.
    Blink,
    /// Left-eye twitch bursts.
    LeftTwitch,
}

impl EyeSelector {
    /// Every selector in menu order.
    pub const ALL: [EyeSelector; 3] = [Self::None, Self::Blink, Self::LeftTwitch];

    /// Human-readable menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Blink => "Blinking Eyes",
            Self::LeftTwitch => "Left Eye Twitch",
        }
    }

    /// Canonical camelCase name.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Strict parse; unknown names are an error.
    pub fn parse(value: &str) -> VisageResult<Self> {
        value
            .parse()
            .map_err(|_| VisageError::unknown_selector("eye", value))
    }

    /// Lenient parse; unknown names become [`EyeSelector::None`].
    pub fn parse_lossy(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

/// The timeline `selector` runs, or `None` when the channel should idle.
pub fn timeline(selector: EyeSelector) -> VisageResult<Option<Timeline<EyeState>>> {
    match selector {
        EyeSelector::None => Ok(None),
        EyeSelector::Blink => blink().map(Some),
        EyeSelector::LeftTwitch => left_twitch().map(Some),
    }
}

/// Cyclic double blink.
pub fn blink() -> VisageResult<Timeline<EyeState>> {
    Timeline::builder()
        .emit(EyeState::Squint)
        .emit_after(cadence::BLINK_SQUINT, EyeState::Content)
        .emit_after(cadence::BLINK_CLOSED, EyeState::Normal)
        .emit_after(cadence::BLINK_PAUSE, EyeState::Squint)
        .emit_after(cadence::BLINK_SQUINT, EyeState::Content)
        .emit_after(cadence::BLINK_CLOSED, EyeState::Normal)
        .cyclic(cadence::BLINK_STARTUP, Delay::Uniform(cadence::BLINK_GAP))
}

/// Cyclic twitch bursts. Starts twitching immediately.
pub fn left_twitch() -> VisageResult<Timeline<EyeState>> {
    Timeline::builder()
        .entry(EyeState::LeftTwitch)
        .emit(EyeState::Normal)
        .emit_after(cadence::TWITCH_FIRST_NORMAL, EyeState::LeftTwitch)
        .emit_after(cadence::TWITCH_HOLD, EyeState::Normal)
        .emit_after(cadence::TWITCH_SECOND_NORMAL, EyeState::LeftTwitch)
        .maybe(cadence::TWITCH_EXTRA_CHANCE, |extra| {
            extra
                .emit_after(cadence::TWITCH_EXTRA_NORMAL, EyeState::Normal)
                .emit_after(cadence::TWITCH_EXTRA_HOLD, EyeState::LeftTwitch)
        })
        .cyclic(cadence::TWITCH_STARTUP, cadence::TWITCH_GAP)
}

/// Eye channel: selector plus the [`Channel`] running its timeline.
#[derive(Debug)]
pub struct EyeChannel {
    selector: EyeSelector,
    channel: Channel<EyeState, EyeState>,
}

impl EyeChannel {
    /// Idle channel.
    pub fn new(jitter: Box<dyn Jitter>) -> Self {
        Self {
            selector: EyeSelector::None,
            channel: Channel::new("eye", EyeState::Normal, jitter),
        }
    }

    /// Switch timelines. Re-selecting the running selector keeps it running.
    #[tracing::instrument(level = "debug", skip(self), fields(from = %self.selector))]
    pub fn select(&mut self, selector: EyeSelector) -> VisageResult<()> {
        if selector == self.selector {
            return Ok(());
        }
        let next = timeline(selector)?;
        self.selector = selector;
        self.channel.play(next.as_ref());
        Ok(())
    }

    /// Current selector.
    pub fn selector(&self) -> EyeSelector {
        self.selector
    }

    /// Current eye value.
    pub fn state(&self) -> EyeState {
        self.channel.state()
    }

    /// Underlying channel.
    pub fn channel(&self) -> &Channel<EyeState, EyeState> {
        &self.channel
    }

    pub(crate) fn channel_mut(&mut self) -> &mut Channel<EyeState, EyeState> {
        &mut self.channel
    }

    /// Timers queued by the running timeline.
    pub fn pending_timers(&self) -> usize {
        self.channel.pending_timers()
    }
}

#[cfg(test)]
#[path = "../tests/unit/eye.rs"]
mod tests;
