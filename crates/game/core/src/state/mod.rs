//! Ground truth of a loaded level as the rest of the engine sees it.
//!
//! These are plain value types handed across the oracle boundary. The display
//! subsystem reads them but never mutates the level they describe.
pub mod types;

pub use types::{
    CreatureTruth, Disguise, EntityId, Furniture, MonsterKind, ObjectKind, ObjectTruth, Position,
    Punishment, Segment, Senses, TrapKind, TrapTruth, Viewer, ViewerStatus,
};
