//! JSON-facing configuration: the static avatar and a whole session.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::emote::EmoteSelector;
use crate::expression::ExpressionSelector;
use crate::eye::EyeSelector;
use crate::features::{EyeState, EyebrowsState, FeatureState, MouthState};
use crate::foundation::error::{VisageError, VisageResult};
use crate::mouth::MouthSelector;

/// Static avatar configuration as the renderer sees it.
///
/// Only the three facial fields are typed. Everything else (skin tone, hair, clothing, ...) is
/// carried through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Static eye shape. Animation channels usually override it.
    #[serde(default)]
    pub eyes: EyeState,
    /// Static eyebrow shape.
    #[serde(default)]
    pub eyebrows: EyebrowsState,
    /// Static mouth shape.
    #[serde(default)]
    pub mouth: MouthState,
    /// Renderer fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AvatarConfig {
    /// Facial fields as a [`FeatureState`].
    pub fn features(&self) -> FeatureState {
        FeatureState::new(self.eyes, self.eyebrows, self.mouth)
    }

    /// Copy with the facial fields replaced by `features`; opaque fields are kept.
    pub fn with_features(&self, features: &FeatureState) -> Self {
        Self {
            eyes: features.eyes,
            eyebrows: features.eyebrows,
            mouth: features.mouth,
            extra: self.extra.clone(),
        }
    }

    /// Opaque renderer field.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// Everything needed to start an [`Animator`](crate::Animator).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Seed for every channel's jitter.
    #[serde(default)]
    pub seed: u64,
    /// Static avatar.
    #[serde(default)]
    pub avatar: AvatarConfig,
    /// Initial eye selection.
    #[serde(default)]
    pub eye: EyeSelector,
    /// Initial mouth selection.
    #[serde(default)]
    pub mouth: MouthSelector,
    /// Initial expression selection.
    #[serde(default)]
    pub expression: ExpressionSelector,
    /// Initial emote selection.
    #[serde(default)]
    pub emote: EmoteSelector,
}

impl SessionConfig {
    /// Parse from a JSON reader and validate.
    pub fn from_reader<R: std::io::Read>(r: R) -> VisageResult<Self> {
        let config: Self = serde_json::from_reader(r)
            .map_err(|e| VisageError::serde(format!("parse session config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from a JSON string and validate.
    pub fn from_json_str(s: &str) -> VisageResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse from a JSON file and validate.
    pub fn from_path(path: impl AsRef<Path>) -> VisageResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VisageError::validation(format!("open session config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject an expression selected together with an eye or mouth animation.
    pub fn validate(&self) -> VisageResult<()> {
        let eye_or_mouth = self.eye != EyeSelector::None || self.mouth != MouthSelector::None;
        if self.expression.is_active() && eye_or_mouth {
            return Err(VisageError::validation(format!(
                "expression '{}' cannot run together with eye '{}' / mouth '{}'",
                self.expression, self.eye, self.mouth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
