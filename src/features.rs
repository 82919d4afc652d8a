//! Facial feature vocabulary shared by every channel and by the renderer boundary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Eye shapes understood by the avatar renderer.
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
pub enum EyeState {
    /// Plain open eyes.
    #[default]
    Normal,
    /// Closed, relaxed arcs. Doubles as the "fully closed" blink frame.
    Content,
    /// Half-closed. Blink transition frame.
    Squint,
    /// Left eye twitching.
    LeftTwitch,
    /// Upturned happy arcs.
    Happy,
    /// Spiral eyes.
    Dizzy,
    /// Heart-shaped eyes.
    Heart,
    /// Minimal dot eyes.
    Simple,
    /// One eye closed.
    Wink,
}

impl EyeState {
    /// Eye shapes that read as "open" and therefore take an idle blink.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Normal | Self::Squint | Self::Simple | Self::Heart)
    }

    /// Canonical camelCase name.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Eyebrow shapes understood by the avatar renderer.
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
pub enum EyebrowsState {
    /// Raised brows.
    Raised,
    /// Level brows.
    #[default]
    Serious,
    /// Angled down toward the nose.
    Angry,
    /// Angled up toward the nose.
    Concerned,
    /// Left brow lowered.
    LeftLowered,
}

impl EyebrowsState {
    /// Canonical camelCase name.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Mouth shapes understood by the avatar renderer.
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
pub enum MouthState {
    /// Closed smile.
    Grin,
    /// Frown.
    Sad,
    /// Open smile.
    OpenSmile,
    /// Pursed lips.
    Lips,
    /// Open round mouth.
    Open,
    /// Flat closed mouth. Idle value of the mouth channel.
    #[default]
    Serious,
    /// Tongue out.
    Tongue,
}

impl MouthState {
    /// Canonical camelCase name.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// The merged `{eyes, eyebrows, mouth}` triple consumed by the renderer.
///
/// Produced fresh on every recomputation; values are `Copy` and never shared mutably.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureState {
    /// Eye shape.
    pub eyes: EyeState,
    /// Eyebrow shape.
    pub eyebrows: EyebrowsState,
    /// Mouth shape.
    pub mouth: MouthState,
}

impl FeatureState {
    /// Build a state from its three fields.
    pub const fn new(eyes: EyeState, eyebrows: EyebrowsState, mouth: MouthState) -> Self {
        Self {
            eyes,
            eyebrows,
            mouth,
        }
    }

    /// Copy with `eyes` replaced.
    pub const fn with_eyes(self, eyes: EyeState) -> Self {
        Self { eyes, ..self }
    }

    /// Copy with `eyebrows` replaced.
    pub const fn with_eyebrows(self, eyebrows: EyebrowsState) -> Self {
        Self { eyebrows, ..self }
    }

    /// Copy with `mouth` replaced.
    pub const fn with_mouth(self, mouth: MouthState) -> Self {
        Self { mouth, ..self }
    }
}

/// A state change a timeline step applies to a channel's current value.
pub trait Patch<S> {
    /// Apply the change in place.
    fn apply(&self, state: &mut S);
}

impl Patch<EyeState> for EyeState {
    fn apply(&self, state: &mut EyeState) {
        *state = *self;
    }
}

impl Patch<MouthState> for MouthState {
    fn apply(&self, state: &mut MouthState) {
        *state = *self;
    }
}

/// Partial update of a [`FeatureState`]; `None` fields are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeaturePatch {
    /// New eye shape, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyes: Option<EyeState>,
    /// New eyebrow shape, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyebrows: Option<EyebrowsState>,
    /// New mouth shape, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouth: Option<MouthState>,
}

impl FeaturePatch {
    /// Patch that replaces every field.
    pub const fn full(state: FeatureState) -> Self {
        Self {
            eyes: Some(state.eyes),
            eyebrows: Some(state.eyebrows),
            mouth: Some(state.mouth),
        }
    }

    /// Eyes-only patch.
    pub const fn eyes(eyes: EyeState) -> Self {
        Self {
            eyes: Some(eyes),
            eyebrows: None,
            mouth: None,
        }
    }

    /// Mouth-only patch.
    pub const fn mouth(mouth: MouthState) -> Self {
        Self {
            eyes: None,
            eyebrows: None,
            mouth: Some(mouth),
        }
    }

    /// `true` when the patch touches nothing but the mouth.
    pub fn is_mouth_only(&self) -> bool {
        self.eyes.is_none() && self.eyebrows.is_none() && self.mouth.is_some()
    }
}

impl Patch<FeatureState> for FeaturePatch {
    fn apply(&self, state: &mut FeatureState) {
        if let Some(eyes) = self.eyes {
            state.eyes = eyes;
        }
        if let Some(eyebrows) = self.eyebrows {
            state.eyebrows = eyebrows;
        }
        if let Some(mouth) = self.mouth {
            state.mouth = mouth;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/features.rs"]
mod tests;
