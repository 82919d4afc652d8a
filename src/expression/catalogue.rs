//! Static face of every expression.
//!
//! The table is read-only. Overlays decorate copies of these values and never write back.

use super::Expression;
use crate::features::{EyeState, EyebrowsState, FeatureState, MouthState};

const fn face(eyes: EyeState, eyebrows: EyebrowsState, mouth: MouthState) -> FeatureState {
    FeatureState::new(eyes, eyebrows, mouth)
}

static NEUTRAL: FeatureState = face(EyeState::Normal, EyebrowsState::Serious, MouthState::Serious);

static DEFINITIONS: [(Expression, FeatureState); 17] = [
    (
        Expression::GodlikeSuccess,
        face(EyeState::Heart, EyebrowsState::Raised, MouthState::OpenSmile),
    ),
    (
        Expression::GreatSuccess,
        face(EyeState::Happy, EyebrowsState::Raised, MouthState::Grin),
    ),
    (
        Expression::Success,
        face(EyeState::Content, EyebrowsState::Raised, MouthState::OpenSmile),
    ),
    (
        Expression::MildSuccess,
        face(EyeState::Normal, EyebrowsState::Raised, MouthState::Grin),
    ),
    (
        Expression::Neutral,
        face(EyeState::Normal, EyebrowsState::Serious, MouthState::Serious),
    ),
    (
        Expression::MildFailure,
        face(EyeState::Normal, EyebrowsState::Concerned, MouthState::Sad),
    ),
    (
        Expression::Failure,
        face(EyeState::Squint, EyebrowsState::Angry, MouthState::Sad),
    ),
    (
        Expression::TerribleFailure,
        face(EyeState::Dizzy, EyebrowsState::Angry, MouthState::Open),
    ),
    (
        Expression::TragicFailure,
        face(EyeState::Dizzy, EyebrowsState::Angry, MouthState::Open),
    ),
    (
        Expression::Happy,
        face(EyeState::Content, EyebrowsState::Raised, MouthState::Grin),
    ),
    (
        Expression::Sad,
        face(EyeState::Normal, EyebrowsState::Concerned, MouthState::Sad),
    ),
    (
        Expression::Angry,
        face(EyeState::Squint, EyebrowsState::Angry, MouthState::Serious),
    ),
    (
        Expression::Surprised,
        face(EyeState::Normal, EyebrowsState::Raised, MouthState::Open),
    ),
    (
        Expression::Confused,
        face(EyeState::Normal, EyebrowsState::LeftLowered, MouthState::Serious),
    ),
    (
        Expression::Excited,
        face(EyeState::Happy, EyebrowsState::Raised, MouthState::OpenSmile),
    ),
    (
        Expression::Love,
        face(EyeState::Heart, EyebrowsState::Raised, MouthState::OpenSmile),
    ),
    (
        Expression::Shocked,
        face(EyeState::Dizzy, EyebrowsState::Raised, MouthState::Open),
    ),
];

/// Every defined expression with its face, in catalogue order.
pub fn entries() -> &'static [(Expression, FeatureState)] {
    &DEFINITIONS
}

/// `true` when `expression` has a face of its own.
pub fn is_defined(expression: Expression) -> bool {
    DEFINITIONS.iter().any(|(e, _)| *e == expression)
}

/// Face of `expression`; expressions without one use `neutral`.
pub fn definition(expression: Expression) -> &'static FeatureState {
    DEFINITIONS
        .iter()
        .find(|(e, _)| *e == expression)
        .map_or(&NEUTRAL, |(_, state)| state)
}

/// The resting face.
pub fn neutral() -> &'static FeatureState {
    &NEUTRAL
}

#[cfg(test)]
#[path = "../../tests/unit/expression/catalogue.rs"]
mod tests;
