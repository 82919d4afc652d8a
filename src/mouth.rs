//! Mouth channel: talk cycles toggling between `serious` and an open shape.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::cadence;
use crate::channel::Channel;
use crate::features::MouthState;
use crate::foundation::error::{VisageError, VisageResult};
use crate::jitter::Jitter;
use crate::timeline::Timeline;

/// Which timeline the mouth channel runs.
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
pub enum MouthSelector {
    /// Idle; the static mouth shows through.
    #[default]
    None,
    /// `serious` / `openSmile`.
    HappyTalk,
    /// `serious` / `sad`.
    SadTalk,
    /// `serious` / `open`.
    NormalTalk,
}

impl MouthSelector {
    /// Every selector in menu order.
    pub const ALL: [MouthSelector; 4] = [
        Self::None,
        Self::HappyTalk,
        Self::SadTalk,
        Self::NormalTalk,
    ];

    /// Human-readable menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::HappyTalk => "Happy Talk",
            Self::SadTalk => "Sad Talk",
            Self::NormalTalk => "Normal Talk",
        }
    }

    /// Canonical camelCase name.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Open shape the talk cycle toggles to.
    pub fn open_shape(self) -> Option<MouthState> {
        match self {
            Self::None => None,
            Self::HappyTalk => Some(MouthState::OpenSmile),
            Self::SadTalk => Some(MouthState::Sad),
            Self::NormalTalk => Some(MouthState::Open),
        }
    }

    /// Strict parse; unknown names are an error.
    pub fn parse(value: &str) -> VisageResult<Self> {
        value
            .parse()
            .map_err(|_| VisageError::unknown_selector("mouth", value))
    }

    /// Lenient parse; unknown names become [`MouthSelector::None`].
    pub fn parse_lossy(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

/// The timeline `selector` runs, or `None` when the channel should idle.
pub fn timeline(selector: MouthSelector) -> VisageResult<Option<Timeline<MouthState>>> {
    selector.open_shape().map(talk).transpose()
}

/// Cyclic toggle between `open` and `serious` with per-toggle jitter.
pub fn talk(open: MouthState) -> VisageResult<Timeline<MouthState>> {
    Timeline::builder()
        .emit(open)
        .emit_after(cadence::TALK_TOGGLE, MouthState::Serious)
        .cyclic(cadence::TALK_LEAD_IN, cadence::TALK_TOGGLE)
}

/// Mouth channel: selector plus the [`Channel`] running its timeline.
#[derive(Debug)]
pub struct MouthChannel {
    selector: MouthSelector,
    channel: Channel<MouthState, MouthState>,
}

impl MouthChannel {
    /// Idle channel.
    pub fn new(jitter: Box<dyn Jitter>) -> Self {
        Self {
            selector: MouthSelector::None,
            channel: Channel::new("mouth", MouthState::Serious, jitter),
        }
    }

    /// Switch timelines. Re-selecting the running selector keeps it running.
    #[tracing::instrument(level = "debug", skip(self), fields(from = %self.selector))]
    pub fn select(&mut self, selector: MouthSelector) -> VisageResult<()> {
        if selector == self.selector {
            return Ok(());
        }
        let next = timeline(selector)?;
        self.selector = selector;
        self.channel.play(next.as_ref());
        Ok(())
    }

    /// Current selector.
    pub fn selector(&self) -> MouthSelector {
        self.selector
    }

    /// Current mouth value.
    pub fn state(&self) -> MouthState {
        self.channel.state()
    }

    /// `true` when the channel contributes a mouth value.
    pub fn is_active(&self) -> bool {
        self.selector != MouthSelector::None
    }

    /// Underlying channel.
    pub fn channel(&self) -> &Channel<MouthState, MouthState> {
        &self.channel
    }

    pub(crate) fn channel_mut(&mut self) -> &mut Channel<MouthState, MouthState> {
        &mut self.channel
    }

    /// Timers queued by the running timeline.
    pub fn pending_timers(&self) -> usize {
        self.channel.pending_timers()
    }
}

#[cfg(test)]
#[path = "../tests/unit/mouth.rs"]
mod tests;
