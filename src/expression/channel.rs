use super::buildup::build_up;
use super::catalogue;
use super::ExpressionSelector;
use crate::channel::Channel;
use crate::features::{FeaturePatch, FeatureState};
use crate::foundation::error::VisageResult;
use crate::jitter::Jitter;
use crate::timeline::Timeline;

/// The timeline `selector` runs, or `None` when the channel should rest at `neutral`.
pub fn timeline(selector: ExpressionSelector) -> VisageResult<Option<Timeline<FeaturePatch>>> {
    match selector {
        ExpressionSelector::None => Ok(None),
        ExpressionSelector::Play {
            expression,
            talking,
        } => build_up(expression, talking).map(Some),
    }
}

/// Expression channel: selector plus the [`Channel`] running its build-up and overlays.
#[derive(Debug)]
pub struct ExpressionChannel {
    selector: ExpressionSelector,
    channel: Channel<FeatureState, FeaturePatch>,
}

impl ExpressionChannel {
    /// Inactive channel resting at `neutral`.
    pub fn new(jitter: Box<dyn Jitter>) -> Self {
        Self {
            selector: ExpressionSelector::None,
            channel: Channel::new("expression", *catalogue::neutral(), jitter),
        }
    }

    /// Switch expressions. Re-selecting the running selector keeps it running.
    #[tracing::instrument(level = "debug", skip(self), fields(from = %self.selector))]
    pub fn select(&mut self, selector: ExpressionSelector) -> VisageResult<()> {
        if selector == self.selector {
            return Ok(());
        }
        let next = timeline(selector)?;
        self.selector = selector;
        self.channel.play(next.as_ref());
        Ok(())
    }

    /// Current selector.
    pub fn selector(&self) -> ExpressionSelector {
        self.selector
    }

    /// `true` unless the selector is [`ExpressionSelector::None`].
    pub fn is_active(&self) -> bool {
        self.selector.is_active()
    }

    /// Current face.
    pub fn state(&self) -> FeatureState {
        self.channel.state()
    }

    /// Underlying channel.
    pub fn channel(&self) -> &Channel<FeatureState, FeaturePatch> {
        &self.channel
    }

    pub(crate) fn channel_mut(&mut self) -> &mut Channel<FeatureState, FeaturePatch> {
        &mut self.channel
    }

    /// Timers queued by the build-up and its overlays.
    pub fn pending_timers(&self) -> usize {
        self.channel.pending_timers()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/channel.rs"]
mod tests;
