//! Overlays that ride on a settled expression: the talking mouth and the idle blink.

use super::Expression;
use crate::cadence;
use crate::features::{EyeState, FeaturePatch, FeatureState, MouthState};
use crate::foundation::error::VisageResult;
use crate::timeline::{Delay, Timeline};

/// Mouth shown on the "open" beat of the talking overlay.
pub fn open_mouth(resting: MouthState, failure_tier: bool) -> MouthState {
    if failure_tier {
        return MouthState::Open;
    }
    match resting {
        MouthState::Grin | MouthState::OpenSmile | MouthState::Tongue => MouthState::OpenSmile,
        MouthState::Sad | MouthState::Open | MouthState::Serious | MouthState::Lips => {
            MouthState::Open
        }
    }
}

/// Mouth shown on the "closed" beat of the talking overlay.
pub fn closed_mouth(resting: MouthState, failure_tier: bool) -> MouthState {
    match resting {
        MouthState::Grin | MouthState::OpenSmile | MouthState::Tongue => MouthState::Grin,
        MouthState::Sad if failure_tier => MouthState::Serious,
        MouthState::Sad => MouthState::Sad,
        MouthState::Open | MouthState::Serious => MouthState::Serious,
        MouthState::Lips => MouthState::Lips,
    }
}

/// Mouth-only cycle toggling between the open and closed shapes derived from `base`.
///
/// Ticks are usually 150ms, sometimes redrawn from 100-200ms. Failure tiers hold the open beat
/// 300ms longer. The first beat moves away from whatever mouth `base` already shows.
pub fn talking(expression: Expression, base: &FeatureState) -> VisageResult<Timeline<FeaturePatch>> {
    let failure = expression.is_failure_tier();
    let open = FeaturePatch::mouth(open_mouth(base.mouth, failure));
    let closed = FeaturePatch::mouth(closed_mouth(base.mouth, failure));
    let tick = cadence::talk_tick();
    let open_hold = if failure {
        tick.shifted(cadence::OVERLAY_TALK_FAILURE_HOLD)
    } else {
        tick
    };

    let builder = Timeline::builder();
    let builder = if Some(base.mouth) == open.mouth {
        builder.emit_after(open_hold, closed).emit_after(tick, open)
    } else {
        builder.emit_after(tick, open).emit_after(open_hold, closed)
    };
    builder.cyclic(Delay::ZERO, Delay::ZERO)
}

/// Eyes-only blink that returns to `own_eyes` rather than to `normal`.
///
/// Blinks start every 4000-6000ms, measured start to start.
pub fn idle_blink(own_eyes: EyeState) -> VisageResult<Timeline<FeaturePatch>> {
    Timeline::builder()
        .emit(FeaturePatch::eyes(EyeState::Squint))
        .emit_after(cadence::BLINK_SQUINT, FeaturePatch::eyes(EyeState::Content))
        .emit_after(cadence::BLINK_CLOSED, FeaturePatch::eyes(own_eyes))
        .cyclic(cadence::IDLE_BLINK_STARTUP, cadence::IDLE_BLINK_GAP)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/overlay.rs"]
mod tests;
