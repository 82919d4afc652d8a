//! Emote overlay: floating glyphs (Zzz, !, ?) shown next to the face.
//!
//! Nothing here is timer driven. The glyphs' own looping motion belongs to the renderer; this
//! module only derives which glyph to show and its phase offset.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::expression::ExpressionSelector;
use crate::foundation::error::{VisageError, VisageResult};

/// Phase offset of the sleep glyph, in seconds.
pub const Z_DELAY_SECS: f64 = 0.2;
/// Phase offset of the surprise glyph, in seconds.
pub const SURPRISE_DELAY_SECS: f64 = 0.1;
/// Phase offset of the question glyph, in seconds.
pub const QUESTION_DELAY_SECS: f64 = 0.1;

/// Which emote glyph the caller asked for.
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
pub enum EmoteSelector {
    /// No glyph, unless the expression is `sleeping`.
    #[default]
    None,
    /// Rising Zzz.
    Sleep,
    /// Exclamation mark.
    Surprise,
    /// Question mark.
    Question,
}

impl EmoteSelector {
    /// Every selector in menu order.
    pub const ALL: [EmoteSelector; 4] = [Self::None, Self::Sleep, Self::Surprise, Self::Question];

    /// Human-readable menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Sleep => "Sleep (ZZZ)",
            Self::Surprise => "Surprise (!)",
            Self::Question => "Question (?)",
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
            .map_err(|_| VisageError::unknown_selector("emote", value))
    }

    /// Lenient parse; unknown names become [`EmoteSelector::None`].
    pub fn parse_lossy(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

/// Derived glyph settings handed to the renderer. Absent delays are omitted from JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmoteConfig {
    /// Whether any glyph is visible.
    pub show_emote: bool,
    /// Sleep glyph phase offset, seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_delay: Option<f64>,
    /// Surprise glyph phase offset, seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surprise_delay: Option<f64>,
    /// Question glyph phase offset, seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_delay: Option<f64>,
}

impl EmoteConfig {
    /// Derive glyph settings from the emote selection and the current expression selection.
    pub fn derive(emote: EmoteSelector, expression: ExpressionSelector) -> Self {
        let sleeping = emote == EmoteSelector::Sleep || expression.is_sleeping();
        Self {
            show_emote: emote != EmoteSelector::None || expression.is_sleeping(),
            z_delay: sleeping.then_some(Z_DELAY_SECS),
            surprise_delay: (emote == EmoteSelector::Surprise).then_some(SURPRISE_DELAY_SECS),
            question_delay: (emote == EmoteSelector::Question).then_some(QUESTION_DELAY_SECS),
        }
    }
}

/// What the glyph layer receives: the selection plus its derived settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmoteOverlay {
    /// Emote the caller selected.
    pub emote: EmoteSelector,
    /// Derived settings.
    pub config: EmoteConfig,
}

impl EmoteOverlay {
    /// Glyph actually drawn. Zzz takes precedence whenever it is due, even over a selected
    /// surprise or question glyph.
    pub fn glyph(&self) -> Option<EmoteSelector> {
        if self.config.z_delay.is_some() {
            return Some(EmoteSelector::Sleep);
        }
        match self.emote {
            EmoteSelector::None => None,
            other => Some(other),
        }
    }
}

/// Emote channel: recomputes its overlay whenever either input changes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EmoteChannel {
    emote: EmoteSelector,
    expression: ExpressionSelector,
    overlay: EmoteOverlay,
}

impl EmoteChannel {
    /// Channel with no emote and no expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the emote selection.
    pub fn select(&mut self, emote: EmoteSelector) {
        self.emote = emote;
        self.refresh();
    }

    /// Track the expression channel's selection.
    pub fn observe_expression(&mut self, expression: ExpressionSelector) {
        self.expression = expression;
        self.refresh();
    }

    /// Current emote selection.
    pub fn selector(&self) -> EmoteSelector {
        self.emote
    }

    /// Current overlay.
    pub fn overlay(&self) -> EmoteOverlay {
        self.overlay
    }

    fn refresh(&mut self) {
        self.overlay = EmoteOverlay {
            emote: self.emote,
            config: EmoteConfig::derive(self.emote, self.expression),
        };
    }
}

#[cfg(test)]
#[path = "../tests/unit/emote.rs"]
mod tests;
