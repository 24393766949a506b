pub mod common;
pub mod creature;
pub mod item;

pub use common::{EntityId, Position};
pub use creature::{
    CreatureTruth, Disguise, Furniture, MonsterKind, Punishment, Segment, Senses, Viewer,
    ViewerStatus,
};
pub use item::{ObjectKind, ObjectTruth, TrapKind, TrapTruth};
