//! Presentation boundary.

use game_core::Position;

use crate::buffer::DisplayBuffer;
use crate::glyph::Glyph;

/// The window port: the only consumer of the composed frame.
pub trait WindowPort {
    /// Paints the frame. `changed` lists tiles that differ from the previous
    /// paint; `viewer` is highlighted when present and omitted for remote
    /// views and animation frames.
    fn paint_frame(
        &mut self,
        buffer: &DisplayBuffer,
        changed: &[Position],
        viewer: Option<Position>,
    );
}

/// Port that discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPort;

impl WindowPort for NullPort {
    fn paint_frame(&mut self, _: &DisplayBuffer, _: &[Position], _: Option<Position>) {}
}

/// One frame as received by a [`RecordingPort`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaintedFrame {
    pub viewer: Option<Position>,
    /// Changed tiles and the glyph each showed.
    pub changed: Vec<(Position, Glyph)>,
    pub checksum: [u8; 32],
}

/// Port that keeps every painted frame, for tools and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingPort {
    frames: Vec<PaintedFrame>,
}

impl RecordingPort {
    pub fn frames(&self) -> &[PaintedFrame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&PaintedFrame> {
        self.frames.last()
    }

    pub fn take(&mut self) -> Vec<PaintedFrame> {
        std::mem::take(&mut self.frames)
    }
}

impl WindowPort for RecordingPort {
    fn paint_frame(
        &mut self,
        buffer: &DisplayBuffer,
        changed: &[Position],
        viewer: Option<Position>,
    ) {
        let changed = changed
            .iter()
            .filter_map(|position| buffer.top(*position).map(|glyph| (*position, glyph)))
            .collect();
        self.frames.push(PaintedFrame {
            viewer,
            changed,
            checksum: buffer.checksum(),
        });
    }
}
