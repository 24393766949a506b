//! Floor objects and traps as they exist in the level, independent of what
//! the viewer knows about them.

use strum::{EnumCount, EnumIter};

use super::{MonsterKind, Position};

/// Object types distinguishable on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    Boulder,
    Corpse,
    Statue,
    Figurine,
    Egg,
    GoldPiece,
    Weapon,
    Armor,
    Ring,
    Amulet,
    Tool,
    Food,
    Potion,
    Scroll,
    Spellbook,
    Wand,
    Gem,
    Rock,
    IronChain,
    HeavyIronBall,
}

impl ObjectKind {
    /// Object types whose glyph depends on the creature they depict or came from.
    pub const fn has_appearance_variant(self) -> bool {
        matches!(self, Self::Corpse | Self::Statue | Self::Figurine)
    }
}

/// The true state of an object lying on the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectTruth {
    pub kind: ObjectKind,
    pub position: Position,
    /// Creature linked to the object (corpse species, statue subject).
    pub creature: Option<MonsterKind>,
}

impl ObjectTruth {
    pub const fn new(kind: ObjectKind, position: Position) -> Self {
        Self {
            kind,
            position,
            creature: None,
        }
    }

    pub const fn with_creature(mut self, creature: MonsterKind) -> Self {
        self.creature = Some(creature);
        self
    }
}

/// Trap types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrapKind {
    Arrow,
    Dart,
    FallingRock,
    SqueakyBoard,
    BearTrap,
    LandMine,
    RollingBoulder,
    SleepingGas,
    Rust,
    Fire,
    Pit,
    SpikedPit,
    Hole,
    TrapDoor,
    Teleport,
    LevelTeleport,
    MagicPortal,
    Web,
    Statue,
    Magic,
    AntiMagic,
    Polymorph,
}

impl TrapKind {
    /// Traps that visibly hold a creature caught in them.
    pub const fn holds_visibly(self) -> bool {
        matches!(self, Self::BearTrap | Self::Pit | Self::SpikedPit | Self::Web)
    }
}

/// The true state of a trap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapTruth {
    pub kind: TrapKind,
    pub position: Position,
    /// Whether the viewer has discovered this trap.
    pub seen: bool,
}

impl TrapTruth {
    pub const fn new(kind: TrapKind, position: Position, seen: bool) -> Self {
        Self {
            kind,
            position,
            seen,
        }
    }
}
