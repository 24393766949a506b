//! Read-only tile inspection for "what is here" commands and debug views.

use game_core::Position;

use crate::buffer::DisplayEntry;
use crate::memory::{LevelMemory, TileMemory};
use crate::port::WindowPort;
use crate::session::DisplaySession;

/// What the viewer is shown and remembers at one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileDescription {
    pub position: Position,
    pub shown: DisplayEntry,
    pub remembered: TileMemory,
}

impl TileDescription {
    /// The frame shows something memory does not hold (a creature, warning
    /// or transient effect).
    pub fn is_overlaid(&self) -> bool {
        let layers = &self.shown.layers;
        layers.creature.is_some() || layers.effect.is_some()
    }
}

impl<P: WindowPort> DisplaySession<P> {
    /// Describes `position` without touching memory or the frame.
    pub fn describe(&self, memory: &LevelMemory, position: Position) -> Option<TileDescription> {
        let shown = *self.buffer.entry(position)?;
        let remembered = *memory.tile(position)?;
        Some(TileDescription {
            position,
            shown,
            remembered,
        })
    }
}
