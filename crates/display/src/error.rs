//! Display errors and the diagnostic channel they are reported through.
//!
//! Rendering never fails: a problem is logged, remembered in a bounded ring
//! for inspection, and the affected tile falls back to a neutral symbol.

use std::collections::VecDeque;

use game_core::{ErrorSeverity, GameError, Position, WallShape};
use tracing::warn;

use crate::seen::SeenDirections;
use crate::transient::TransientId;
use crate::wall::WallMode;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    /// The seen set has no defined symbol for this wall and mode.
    #[error("no wall symbol for {shape:?} in mode {mode:?} seen from {seen:?}")]
    WallPattern {
        shape: WallShape,
        mode: WallMode,
        seen: SeenDirections,
    },

    /// Junction mode from another family of wall shapes.
    #[error("wall mode {mode:?} does not apply to {shape:?}")]
    WallModeMismatch { shape: WallShape, mode: WallMode },

    /// Terrain this build does not know how to draw.
    #[error("unknown terrain {code} at {position}")]
    UnknownTerrain { code: u16, position: Position },

    /// A frame update arrived while no level was attached.
    #[error("no level attached")]
    NoLevel,

    #[error("transient overlay {0:?} is not open")]
    UnknownTransient(TransientId),

    /// Object-icon overlays take object glyphs; every other style takes
    /// effect glyphs.
    #[error("transient overlay {0:?} cannot paint that kind of symbol")]
    TransientStyleMismatch(TransientId),
}

impl GameError for DisplayError {
    fn severity(&self) -> ErrorSeverity {
        use DisplayError::*;
        match self {
            WallPattern { .. } | WallModeMismatch { .. } | UnknownTerrain { .. } => {
                ErrorSeverity::Internal
            }
            NoLevel => ErrorSeverity::Fatal,
            UnknownTransient(_) | TransientStyleMismatch(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use DisplayError::*;
        match self {
            WallPattern { .. } => "DISPLAY_WALL_PATTERN",
            WallModeMismatch { .. } => "DISPLAY_WALL_MODE_MISMATCH",
            UnknownTerrain { .. } => "DISPLAY_UNKNOWN_TERRAIN",
            NoLevel => "DISPLAY_NO_LEVEL",
            UnknownTransient(_) => "DISPLAY_UNKNOWN_TRANSIENT",
            TransientStyleMismatch(_) => "DISPLAY_TRANSIENT_STYLE_MISMATCH",
        }
    }
}

/// Bounded record of recent display errors.
#[derive(Clone, Debug)]
pub struct Diagnostics {
    recent: VecDeque<DisplayError>,
    capacity: usize,
    total: u64,
}

impl Diagnostics {
    pub fn new(capacity: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
        }
    }

    pub fn report(&mut self, error: DisplayError) {
        warn!(
            code = error.error_code(),
            severity = error.severity().as_str(),
            "{error}"
        );
        self.total += 1;
        if self.capacity == 0 {
            return;
        }
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(error);
    }

    /// Most recent reports, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &DisplayError> {
        self.recent.iter()
    }

    pub fn last(&self) -> Option<&DisplayError> {
        self.recent.back()
    }

    /// Reports ever made, including those evicted from the ring.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn clear(&mut self) {
        self.recent.clear();
        self.total = 0;
    }
}
