//! Priority merge of every channel's latest value into one [`FeatureState`].

use crate::features::{EyeState, FeatureState, MouthState};

/// Latest value of each channel, `None` for channels that are switched off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolverInputs {
    /// Facial fields of the static avatar configuration.
    pub static_features: FeatureState,
    /// Eye channel value.
    pub eye: Option<EyeState>,
    /// Mouth channel value.
    pub mouth: Option<MouthState>,
    /// Expression channel face.
    pub expression: Option<FeatureState>,
}

impl ResolverInputs {
    /// Inputs with every channel off.
    pub fn new(static_features: FeatureState) -> Self {
        Self {
            static_features,
            ..Self::default()
        }
    }

    /// Set the eye channel value.
    pub fn with_eye(mut self, eye: Option<EyeState>) -> Self {
        self.eye = eye;
        self
    }

    /// Set the mouth channel value.
    pub fn with_mouth(mut self, mouth: Option<MouthState>) -> Self {
        self.mouth = mouth;
        self
    }

    /// Set the expression channel face.
    pub fn with_expression(mut self, expression: Option<FeatureState>) -> Self {
        self.expression = expression;
        self
    }
}

/// Merge channel values.
///
/// An active expression owns the whole face, whatever the eye and mouth channels say. Otherwise
/// eyes come from the eye channel (`normal` when it is off), the mouth from the mouth channel
/// (the static mouth when it is off) and eyebrows always from the static configuration.
pub fn resolve(inputs: &ResolverInputs) -> FeatureState {
    if let Some(face) = inputs.expression {
        return face;
    }
    FeatureState {
        eyes: inputs.eye.unwrap_or(EyeState::Normal),
        eyebrows: inputs.static_features.eyebrows,
        mouth: inputs.mouth.unwrap_or(inputs.static_features.mouth),
    }
}

#[cfg(test)]
#[path = "../tests/unit/resolver.rs"]
mod tests;
