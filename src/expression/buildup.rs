//! Hand-authored build-ups that carry the face from neutral to each expression.

use super::catalogue::definition;
use super::{Expression, overlay};
use crate::cadence;
use crate::features::{EyeState, EyebrowsState, FeaturePatch, FeatureState};
use crate::foundation::error::VisageResult;
use crate::timeline::{Delay, Timeline};

/// Shape of one build-up before it becomes a timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    /// Face shown the moment the expression is selected.
    pub entry: FeatureState,
    /// Full-face stages; the last one is the settled expression.
    pub ramp: Vec<(Delay, FeatureState)>,
    /// Eyes-only beats played after settling.
    pub flourish: Vec<(Delay, EyeState)>,
    /// Wait between the last beat and the idle blink.
    pub blink_after: Delay,
}

impl Plan {
    fn starting_at(entry: FeatureState) -> Self {
        Self {
            entry,
            ramp: Vec::new(),
            flourish: Vec::new(),
            blink_after: cadence::IDLE_BLINK_ATTACH,
        }
    }

    fn then(mut self, ms: u64, state: FeatureState) -> Self {
        self.ramp.push((Delay::ms(ms), state));
        self
    }

    fn flourish(mut self, ms: u64, eyes: EyeState) -> Self {
        self.flourish.push((Delay::ms(ms), eyes));
        self
    }

    fn blink_after(mut self, ms: u64) -> Self {
        self.blink_after = Delay::ms(ms);
        self
    }

    /// Face once the ramp is over.
    pub fn settled(&self) -> FeatureState {
        self.ramp.last().map_or(self.entry, |(_, state)| *state)
    }

    /// Eyes once the flourish is over.
    pub fn final_eyes(&self) -> EyeState {
        self.flourish
            .last()
            .map_or(self.settled().eyes, |(_, eyes)| *eyes)
    }
}

/// Build-up plan for `expression`. Expressions without a face of their own ramp like `neutral`.
pub fn plan(expression: Expression) -> Plan {
    use Expression as E;

    let def = |e: Expression| *definition(e);
    let neutral = def(E::Neutral);
    let target = def(expression);

    match expression {
        E::GodlikeSuccess => Plan::starting_at(neutral)
            .then(400, def(E::Surprised))
            .then(400, def(E::Excited))
            .then(400, target)
            .flourish(1200, EyeState::Content)
            .flourish(150, EyeState::Heart)
            .blink_after(1000),
        E::GreatSuccess => Plan::starting_at(neutral)
            .then(400, def(E::MildSuccess))
            .then(500, target)
            .flourish(1000, EyeState::Content)
            .flourish(300, EyeState::Happy)
            .blink_after(500),
        E::Success => Plan::starting_at(neutral)
            .then(300, neutral.with_eyebrows(EyebrowsState::Raised))
            .then(300, target),
        E::MildSuccess => Plan::starting_at(neutral).then(400, target),
        E::MildFailure => Plan::starting_at(neutral)
            .then(400, neutral.with_eyebrows(EyebrowsState::Concerned))
            .then(300, target),
        E::Failure => Plan::starting_at(def(E::MildFailure)).then(500, target),
        E::TerribleFailure => {
            let failure = def(E::Failure);
            Plan::starting_at(failure)
                .then(400, failure.with_eyes(EyeState::Normal))
                .then(200, failure.with_mouth(target.mouth))
                .then(200, target)
        }
        E::TragicFailure => Plan::starting_at(neutral)
            .then(300, def(E::Shocked))
            .then(600, target),
        E::Happy | E::Sad => Plan::starting_at(neutral).then(300, target),
        E::Angry => {
            let brows = neutral.with_eyebrows(EyebrowsState::Angry);
            Plan::starting_at(neutral)
                .then(300, brows)
                .then(200, brows.with_eyes(EyeState::Squint))
                .then(200, target)
        }
        E::Surprised | E::Shocked => Plan::starting_at(neutral).then(200, target),
        E::Confused => Plan::starting_at(neutral)
            .then(300, neutral.with_eyebrows(EyebrowsState::LeftLowered))
            .then(300, target),
        E::Excited | E::Love => Plan::starting_at(def(E::Happy)).then(400, target),
        E::Neutral | E::Sleeping => Plan::starting_at(neutral),
    }
}

/// Full expression timeline: the build-up, then either the talking overlay (attached the moment
/// the face settles) or the idle blink (after the flourish, open eyes only).
pub fn build_up(expression: Expression, talking: bool) -> VisageResult<Timeline<FeaturePatch>> {
    let plan = plan(expression);
    let settled = plan.settled();

    let mut builder = Timeline::builder().entry(FeaturePatch::full(plan.entry));
    for (delay, state) in &plan.ramp {
        builder = builder.emit_after(*delay, FeaturePatch::full(*state));
    }
    if talking {
        builder = builder.overlay_after(Delay::ZERO, overlay::talking(expression, &settled)?);
    }
    for (delay, eyes) in &plan.flourish {
        builder = builder.emit_after(*delay, FeaturePatch::eyes(*eyes));
    }
    let eyes = plan.final_eyes();
    if !talking && !expression.skips_idle_blink() && eyes.is_open() {
        builder = builder.overlay_after(plan.blink_after, overlay::idle_blink(eyes)?);
    }
    builder.one_shot()
}

#[cfg(test)]
#[path = "../../tests/unit/expression/buildup.rs"]
mod tests;
