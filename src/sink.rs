//! Consumers of merged animation frames.

use std::io::Write;

use serde::Serialize;

use crate::config::AvatarConfig;
use crate::emote::EmoteOverlay;
use crate::foundation::error::{VisageError, VisageResult};
use crate::foundation::time::Timestamp;
use crate::session::AnimationFrame;

/// Sink contract for consuming merged frames.
///
/// Ordering contract: `push_frame` is called in non-decreasing timestamp order, once per distinct
/// frame, between one `begin` and one `end`.
pub trait FrameSink {
    /// Called once before the first frame with the static avatar configuration.
    fn begin(&mut self, avatar: &AvatarConfig) -> VisageResult<()>;
    /// Consume one frame.
    fn push_frame(&mut self, frame: &AnimationFrame) -> VisageResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> VisageResult<()>;
}

/// In-memory sink for tests and tooling.
#[derive(Debug, Default)]
pub struct InMemorySink {
    avatar: Option<AvatarConfig>,
    /// Frames in timestamp order.
    pub frames: Vec<AnimationFrame>,
    finished: bool,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Avatar passed to `begin`, if any.
    pub fn avatar(&self) -> Option<&AvatarConfig> {
        self.avatar.as_ref()
    }

    /// `true` once `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, avatar: &AvatarConfig) -> VisageResult<()> {
        self.avatar = Some(avatar.clone());
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &AnimationFrame) -> VisageResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> VisageResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    at: Timestamp,
    avatar: AvatarConfig,
    emote: &'a EmoteOverlay,
}

/// Writes one JSON object per frame: timestamp, renderer input and emote overlay.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    avatar: AvatarConfig,
    lines: usize,
}

impl<W: Write> JsonLinesSink<W> {
    /// Sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            avatar: AvatarConfig::default(),
            lines: 0,
        }
    }

    /// Lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush buffered lines to the writer.
    pub fn flush(&mut self) -> VisageResult<()> {
        self.out.flush().map_err(|e| VisageError::Other(e.into()))
    }

    /// Give the writer back.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, avatar: &AvatarConfig) -> VisageResult<()> {
        self.avatar = avatar.clone();
        Ok(())
    }

    fn push_frame(&mut self, frame: &AnimationFrame) -> VisageResult<()> {
        let line = JsonLine {
            at: frame.at,
            avatar: self.avatar.with_features(&frame.features),
            emote: &frame.emote,
        };
        serde_json::to_writer(&mut self.out, &line)
            .map_err(|e| VisageError::serde(format!("write frame: {e}")))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| VisageError::Other(e.into()))?;
        self.lines += 1;
        Ok(())
    }

    fn end(&mut self) -> VisageResult<()> {
        self.flush()
    }
}

#[cfg(test)]
#[path = "../tests/unit/sink.rs"]
mod tests;
