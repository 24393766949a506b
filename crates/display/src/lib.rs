//! Map memory and display composition.
//!
//! The display keeps two things per level: what the viewer *remembers* about
//! every tile ([`LevelMemory`]) and the composed frame handed to the window
//! port ([`DisplayBuffer`]). A [`Compositor`] ties one [`DisplaySession`] to a
//! level's memory and the oracles describing the level as it is now; all
//! updates go through it, tile by tile via [`Compositor::refresh`] or in bulk.
pub mod buffer;
pub mod config;
pub mod describe;
pub mod error;
pub mod fullframe;
pub mod glyph;
pub mod illusion;
pub mod mapping;
pub mod memory;
pub mod monster;
pub mod port;
pub mod refresh;
pub mod seen;
pub mod session;
pub mod transient;
pub mod wall;

pub use buffer::{Composition, DisplayBuffer, DisplayEntry, TileFlags};
pub use config::{DisplayConfig, MAX_TRANSIENT_CELLS, WARNING_DISTANCE_SQUARED};
pub use describe::TileDescription;
pub use error::{Diagnostics, DisplayError};
pub use fullframe::FrameUpdate;
pub use glyph::{
    CreatureFlags, CreatureGlyph, EffectGlyph, ExplosionKind, Glyph, MapSymbol, ObjectGlyph,
    StomachPart, WARNING_LEVELS, ZapDirection, ZapKind,
};
pub use illusion::IllusionSource;
pub use memory::{DoorMemory, Knowledge, LevelMemory, TileMemory};
pub use monster::{Perception, warning_tier};
pub use port::{NullPort, PaintedFrame, RecordingPort, WindowPort};
pub use seen::SeenDirections;
pub use session::{Compositor, DisplaySession, FeltGear, FrameStats};
pub use transient::{TransientId, TransientOverlay, TransientStyle, TransientSymbol};
pub use wall::{WallMode, WallModes, resolve_wall_symbol};
