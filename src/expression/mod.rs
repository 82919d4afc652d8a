//! Expression channel: composite build-ups over the whole face, with talking and idle-blink
//! overlays riding on the settled expression.
//!
//! A selector names a base [`Expression`] and whether it should talk. The selector string form
//! appends `Talk` to the base name (`successTalk`), matching the control-panel vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::foundation::error::{VisageError, VisageResult};

pub mod buildup;
pub mod catalogue;
mod channel;
pub mod overlay;

pub use channel::{ExpressionChannel, timeline};

/// Suffix that turns a base expression name into its talking variant.
pub const TALK_SUFFIX: &str = "Talk";

/// Base expressions known to the catalogue, plus `sleeping`.
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
pub enum Expression {
    /// Top success tier.
    GodlikeSuccess,
    /// Second success tier.
    GreatSuccess,
    /// Plain success.
    Success,
    /// Lowest success tier.
    MildSuccess,
    /// Resting face.
    #[default]
    Neutral,
    /// Lowest failure tier.
    MildFailure,
    /// Plain failure.
    Failure,
    /// Second failure tier.
    TerribleFailure,
    /// Worst failure tier.
    TragicFailure,
    /// Happy.
    Happy,
    /// Sad.
    Sad,
    /// Angry.
    Angry,
    /// Surprised.
    Surprised,
    /// Confused.
    Confused,
    /// Excited.
    Excited,
    /// Love.
    Love,
    /// Shocked.
    Shocked,
    /// Asleep. Has no face of its own; shows the sleep emote.
    Sleeping,
}

impl Expression {
    /// Success and failure tiers, best to worst.
    pub const LEVELS: [Expression; 9] = [
        Self::GodlikeSuccess,
        Self::GreatSuccess,
        Self::Success,
        Self::MildSuccess,
        Self::Neutral,
        Self::MildFailure,
        Self::Failure,
        Self::TerribleFailure,
        Self::TragicFailure,
    ];

    /// Basic emotions in menu order.
    pub const EMOTIONS: [Expression; 9] = [
        Self::Happy,
        Self::Sad,
        Self::Angry,
        Self::Surprised,
        Self::Confused,
        Self::Excited,
        Self::Love,
        Self::Shocked,
        Self::Sleeping,
    ];

    /// Canonical camelCase name.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Human-readable menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::GodlikeSuccess => "Godlike Success",
            Self::GreatSuccess => "Great Success",
            Self::Success => "Success",
            Self::MildSuccess => "Mild Success",
            Self::Neutral => "Neutral",
            Self::MildFailure => "Mild Failure",
            Self::Failure => "Failure",
            Self::TerribleFailure => "Terrible Failure",
            Self::TragicFailure => "Tragic Failure",
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
            Self::Surprised => "Surprised",
            Self::Confused => "Confused",
            Self::Excited => "Excited",
            Self::Love => "Love",
            Self::Shocked => "Shocked",
            Self::Sleeping => "Sleeping",
        }
    }

    /// Failure tiers. Their talking mouth is always `open` and held longer.
    pub fn is_failure_tier(self) -> bool {
        matches!(
            self,
            Self::MildFailure | Self::Failure | Self::TerribleFailure | Self::TragicFailure
        )
    }

    /// Expressions whose own flourish replaces the generic idle blink.
    pub fn skips_idle_blink(self) -> bool {
        matches!(
            self,
            Self::Excited | Self::Love | Self::Shocked | Self::TerribleFailure | Self::TragicFailure
        )
    }

    /// `true` when the menu offers a talking variant.
    pub fn has_talking_variant(self) -> bool {
        self != Self::Sleeping
    }
}

/// Selection for the expression channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExpressionSelector {
    /// Channel inactive; the face rests at `neutral`.
    #[default]
    None,
    /// Play `expression`, with the talking overlay when `talking` is set.
    Play {
        /// Base expression.
        expression: Expression,
        /// Whether the talking overlay replaces the idle blink.
        talking: bool,
    },
}

impl ExpressionSelector {
    /// Silent `expression`.
    pub const fn play(expression: Expression) -> Self {
        Self::Play {
            expression,
            talking: false,
        }
    }

    /// Talking `expression`.
    pub const fn talking(expression: Expression) -> Self {
        Self::Play {
            expression,
            talking: true,
        }
    }

    /// `true` for anything but [`ExpressionSelector::None`].
    pub fn is_active(self) -> bool {
        self != Self::None
    }

    /// Base expression, if active.
    pub fn expression(self) -> Option<Expression> {
        match self {
            Self::None => None,
            Self::Play { expression, .. } => Some(expression),
        }
    }

    /// `true` for a talking variant.
    pub fn is_talking(self) -> bool {
        matches!(self, Self::Play { talking: true, .. })
    }

    /// Exactly the silent `sleeping` selector.
    pub fn is_sleeping(self) -> bool {
        self == Self::play(Expression::Sleeping)
    }

    /// Human-readable menu label.
    pub fn label(self) -> String {
        match self {
            Self::None => "None".to_owned(),
            Self::Play {
                expression,
                talking: false,
            } => expression.label().to_owned(),
            Self::Play {
                expression,
                talking: true,
            } => format!("{} (Talking)", expression.label()),
        }
    }

    /// Every selector in menu order: levels, talking levels, emotions, talking emotions.
    pub fn menu() -> Vec<ExpressionSelector> {
        let mut out = vec![Self::None];
        for group in [Expression::LEVELS, Expression::EMOTIONS] {
            out.extend(group.iter().copied().map(Self::play));
            out.extend(
                group
                    .iter()
                    .copied()
                    .filter(|e| e.has_talking_variant())
                    .map(Self::talking),
            );
        }
        out
    }

    /// Strict parse; names outside the catalogue are an error.
    pub fn parse(value: &str) -> VisageResult<Self> {
        if value == "none" {
            return Ok(Self::None);
        }
        let (base, talking) = split_talk(value);
        let expression = Expression::from_str(base)
            .map_err(|_| VisageError::unknown_selector("expression", value))?;
        Ok(Self::Play {
            expression,
            talking,
        })
    }

    /// Lenient parse; unknown base names become `neutral`, keeping the talk decision.
    ///
    /// Any `Talk` suffix counts, so a bare `Talk` plays a talking `neutral`.
    pub fn parse_lossy(value: &str) -> Self {
        if value == "none" {
            return Self::None;
        }
        let (base, talking) = match value.strip_suffix(TALK_SUFFIX) {
            Some(base) => (base, true),
            None => (value, false),
        };
        Self::Play {
            expression: Expression::from_str(base).unwrap_or_default(),
            talking,
        }
    }
}

fn split_talk(value: &str) -> (&str, bool) {
    match value.strip_suffix(TALK_SUFFIX) {
        Some(base) if !base.is_empty() => (base, true),
        _ => (value, false),
    }
}

impl fmt::Display for ExpressionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Play {
                expression,
                talking,
            } => {
                f.write_str(expression.as_str())?;
                if *talking {
                    f.write_str(TALK_SUFFIX)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for ExpressionSelector {
    type Err = VisageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ExpressionSelector {
    type Error = VisageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExpressionSelector> for String {
    fn from(value: ExpressionSelector) -> Self {
        value.to_string()
    }
}

impl From<Expression> for ExpressionSelector {
    fn from(value: Expression) -> Self {
        Self::play(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/mod.rs"]
mod tests;
