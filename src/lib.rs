//! Visage drives timed facial animation for a cartoon avatar.
//!
//! Four channels run side by side on a virtual clock:
//!
//! - eye animations (blink, left twitch)
//! - mouth talk cycles
//! - composite expressions with talking and idle-blink overlays
//! - emote glyphs (Zzz, !, ?)
//!
//! Every animation is a declarative [`Timeline`] executed by an [`Engine`]. An [`Animator`] owns
//! the channels, fires their steps in timestamp order and resolves the merged [`FeatureState`]
//! handed to the renderer.
//!
//! ```
//! use visage::{Animator, AvatarConfig, Millis};
//!
//! let mut animator = Animator::new(AvatarConfig::default(), 42);
//! animator.set_expression_str("successTalk").unwrap();
//! animator.advance_by(Millis(1_000)).unwrap();
//! assert_eq!(animator.frame().features.eyebrows.as_str(), "raised");
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod cadence;
pub mod channel;
pub mod config;
pub mod emote;
pub mod engine;
pub mod expression;
pub mod eye;
pub mod features;
pub mod jitter;
pub mod mouth;
pub mod resolver;
pub mod session;
pub mod sink;
pub mod timeline;

pub use crate::foundation::error::{VisageError, VisageResult};
pub use crate::foundation::time::{Millis, Timestamp};

pub use crate::channel::Channel;
pub use crate::config::{AvatarConfig, SessionConfig};
pub use crate::emote::{EmoteChannel, EmoteConfig, EmoteOverlay, EmoteSelector};
pub use crate::engine::{Engine, ExecutionHandle};
pub use crate::expression::catalogue::definition;
pub use crate::expression::{Expression, ExpressionChannel, ExpressionSelector};
pub use crate::eye::{EyeChannel, EyeSelector};
pub use crate::features::{
    EyeState, EyebrowsState, FeaturePatch, FeatureState, MouthState, Patch,
};
pub use crate::jitter::{FixedJitter, Jitter, JitterRange, SeededJitter};
pub use crate::mouth::{MouthChannel, MouthSelector};
pub use crate::resolver::{ResolverInputs, resolve};
pub use crate::session::{AnimationFrame, Animator};
pub use crate::sink::{FrameSink, InMemorySink, JsonLinesSink};
pub use crate::timeline::{Action, Delay, Mode, Step, Timeline, TimelineBuilder};
