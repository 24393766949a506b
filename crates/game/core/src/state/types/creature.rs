//! Creatures on the level, their disguises, and how the viewer senses them.

use bitflags::bitflags;
use strum::{EnumCount, EnumIter};

use super::{EntityId, ObjectKind, Position};

/// Creature species distinguishable on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterKind {
    GiantAnt,
    Jackal,
    Newt,
    Kitten,
    LittleDog,
    Pony,
    Goblin,
    Gnome,
    Dwarf,
    HillOrc,
    FloatingEye,
    FogCloud,
    SmallMimic,
    LargeMimic,
    GiantMimic,
    LongWorm,
    LongWormTail,
    PurpleWorm,
    Ochrejelly,
    Tengu,
    Soldier,
    RedDragon,
    Human,
    Elf,
}

impl MonsterKind {
    /// Species that can be picked when the viewer's perception is scrambled.
    /// Worm tails are body parts, never a creature in their own right.
    pub const fn is_standalone(self) -> bool {
        !matches!(self, Self::LongWormTail)
    }
}

/// Map furniture a creature can pretend to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Furniture {
    ClosedDoor { horizontal: bool },
    OpenDoor { horizontal: bool },
    Doorway,
    UpStair,
    DownStair,
    Altar,
    Fountain,
    Throne,
    Sink,
    Grave,
    Tree,
    IronBars,
}

/// Appearance a creature projects instead of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Disguise {
    Furniture(Furniture),
    Object(ObjectKind),
    Creature(MonsterKind),
}

/// Which part of a (possibly multi-segment) creature occupies a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    #[default]
    Head,
    Tail,
}

/// The true state of a creature (or creature segment) on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureTruth {
    pub id: EntityId,
    pub kind: MonsterKind,
    pub position: Position,
    /// Experience level, used to pick the danger tier of warnings.
    pub level: u8,
    pub tame: bool,
    pub peaceful: bool,
    pub disguise: Option<Disguise>,
    pub segment: Segment,
    /// Caught in the trap on its tile.
    pub trapped: bool,
}

impl CreatureTruth {
    pub const fn new(id: EntityId, kind: MonsterKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            level: 0,
            tame: false,
            peaceful: false,
            disguise: None,
            segment: Segment::Head,
            trapped: false,
        }
    }

    pub const fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub const fn tame(mut self) -> Self {
        self.tame = true;
        self
    }

    pub const fn peaceful(mut self) -> Self {
        self.peaceful = true;
        self
    }

    pub const fn disguised_as(mut self, disguise: Disguise) -> Self {
        self.disguise = Some(disguise);
        self
    }

    pub const fn tail(mut self) -> Self {
        self.segment = Segment::Tail;
        self
    }

    pub const fn trapped(mut self) -> Self {
        self.trapped = true;
        self
    }

    pub const fn is_tail(&self) -> bool {
        matches!(self.segment, Segment::Tail)
    }
}

bitflags! {
    /// Senses through which the viewer currently perceives a creature.
    ///
    /// `SIGHT` means the creature is visually perceivable (not invisible, or
    /// the viewer sees invisible) *if* its tile is in view; the tile's own
    /// visibility is decided by the vision oracle.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Senses: u8 {
        const SIGHT        = 1 << 0;
        const TELEPATHY    = 1 << 1;
        const INFRAVISION  = 1 << 2;
        const DETECTION    = 1 << 3;
        /// Warned of this specific kind of creature.
        const WARN_OF_KIND = 1 << 4;
        /// Generic danger warning.
        const WARNING      = 1 << 5;
    }
}

impl Senses {
    /// Senses that identify the creature without line of sight.
    pub const REMOTE: Self = Self::TELEPATHY
        .union(Self::INFRAVISION)
        .union(Self::WARN_OF_KIND);

    /// Senses that see through a disguise.
    pub const UNMASKING: Self = Self::TELEPATHY
        .union(Self::DETECTION)
        .union(Self::WARN_OF_KIND);
}

bitflags! {
    /// Viewer conditions relevant to what can be perceived.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ViewerStatus: u16 {
        /// The viewer can perceive its own body.
        const SENSES_SELF    = 1 << 0;
        const BLIND          = 1 << 1;
        const HALLUCINATING  = 1 << 2;
        const LEVITATING     = 1 << 3;
        const UNDERWATER     = 1 << 4;
        const BURIED         = 1 << 5;
        /// Protected from shape changers: disguises never fool the viewer.
        const SEES_DISGUISES = 1 << 6;
    }
}

/// Ball and chain locations when the viewer is punished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Punishment {
    /// `None` while the ball is carried.
    pub ball: Option<Position>,
    pub chain: Position,
}

/// The creature whose point of view is being rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewer {
    pub position: Position,
    pub form: MonsterKind,
    pub disguise: Option<Disguise>,
    pub steed: Option<MonsterKind>,
    pub engulfed_by: Option<MonsterKind>,
    pub punishment: Option<Punishment>,
    pub status: ViewerStatus,
}

impl Viewer {
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            form: MonsterKind::Human,
            disguise: None,
            steed: None,
            engulfed_by: None,
            punishment: None,
            status: ViewerStatus::SENSES_SELF,
        }
    }

    #[inline]
    pub const fn senses_self(&self) -> bool {
        self.status.contains(ViewerStatus::SENSES_SELF)
    }

    #[inline]
    pub const fn is_hallucinating(&self) -> bool {
        self.status.contains(ViewerStatus::HALLUCINATING)
    }

    #[inline]
    pub const fn is_blind(&self) -> bool {
        self.status.contains(ViewerStatus::BLIND)
    }

    #[inline]
    pub const fn is_underwater(&self) -> bool {
        self.status.contains(ViewerStatus::UNDERWATER)
    }

    #[inline]
    pub const fn is_buried(&self) -> bool {
        self.status.contains(ViewerStatus::BURIED)
    }

    #[inline]
    pub const fn is_levitating(&self) -> bool {
        self.status.contains(ViewerStatus::LEVITATING)
    }

    #[inline]
    pub const fn sees_disguises(&self) -> bool {
        self.status.contains(ViewerStatus::SEES_DISGUISES)
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(Position::ORIGIN)
    }
}
