//! World model shared by the map display and anything that feeds it.
//!
//! `game-core` defines the value types describing a loaded level (terrain,
//! floor objects, traps, creatures, the viewer) and the oracle traits through
//! which display code reads them. Nothing here knows what the viewer remembers;
//! that lives in the display crate.
pub mod env;
pub mod error;
pub mod state;

pub use env::{
    Door, DoorState, DrawbridgeUnder, Env, LevelFlags, LevelSnapshot, MapDimensions, MapEnv,
    MapOracle, OracleError, PcgRng, RegionKind, RngOracle, StaticTile, TerrainKind, VisionOracle,
    WallShape, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    CreatureTruth, Disguise, EntityId, Furniture, MonsterKind, ObjectKind, ObjectTruth, Position,
    Punishment, Segment, Senses, TrapKind, TrapTruth, Viewer, ViewerStatus,
};
