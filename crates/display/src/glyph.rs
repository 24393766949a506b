//! Glyph vocabulary handed to the window port.
//!
//! A glyph names *what* is drawn, never *how*: the presentation layer maps
//! these values to characters, tiles, or colours.

use bitflags::bitflags;
use strum::{EnumCount, EnumIter};

use game_core::{MonsterKind, ObjectKind, RegionKind, TrapKind};

/// Terrain and furniture symbols (the background layer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapSymbol {
    /// Unexplored or solid rock.
    #[default]
    Stone,
    VerticalWall,
    HorizontalWall,
    TopLeftCorner,
    TopRightCorner,
    BottomLeftCorner,
    BottomRightCorner,
    CrossWall,
    /// ┴
    TeeUp,
    /// ┬
    TeeDown,
    /// ┤
    TeeLeft,
    /// ├
    TeeRight,
    Doorway,
    OpenDoor {
        horizontal: bool,
    },
    ClosedDoor {
        horizontal: bool,
    },
    IronBars,
    Tree,
    Room,
    DarkRoom,
    Corridor,
    LitCorridor,
    UpStair,
    DownStair,
    UpLadder,
    DownLadder,
    Altar,
    Grave,
    Throne,
    Sink,
    Fountain,
    Pool,
    Ice,
    Lava,
    RaisedDrawbridge {
        horizontal: bool,
    },
    LoweredDrawbridge {
        horizontal: bool,
    },
    Air,
    Cloud,
    Water,
}

impl MapSymbol {
    /// Door symbols whose lock and trap state can be remembered.
    pub const fn is_door(self) -> bool {
        matches!(self, Self::OpenDoor { .. } | Self::ClosedDoor { .. })
    }

    pub const fn is_wall(self) -> bool {
        matches!(
            self,
            Self::VerticalWall
                | Self::HorizontalWall
                | Self::TopLeftCorner
                | Self::TopRightCorner
                | Self::BottomLeftCorner
                | Self::BottomRightCorner
                | Self::CrossWall
                | Self::TeeUp
                | Self::TeeDown
                | Self::TeeLeft
                | Self::TeeRight
        )
    }

    /// Stone, walls, doors, bars, trees and plain floor: the symbols a blind
    /// viewer may overwrite with whatever floor they feel underfoot.
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::Stone
                | Self::Doorway
                | Self::OpenDoor { .. }
                | Self::ClosedDoor { .. }
                | Self::IronBars
                | Self::Tree
                | Self::Room
        ) || self.is_wall()
    }

    /// The unlit counterpart of a lit floor symbol.
    pub const fn darkened(self) -> Self {
        match self {
            Self::Room => Self::DarkRoom,
            Self::LitCorridor => Self::Corridor,
            other => other,
        }
    }

    /// The same piece of wall turned a quarter turn clockwise.
    pub const fn rotated_cw(self) -> Self {
        match self {
            Self::VerticalWall => Self::HorizontalWall,
            Self::HorizontalWall => Self::VerticalWall,
            Self::TopLeftCorner => Self::TopRightCorner,
            Self::TopRightCorner => Self::BottomRightCorner,
            Self::BottomRightCorner => Self::BottomLeftCorner,
            Self::BottomLeftCorner => Self::TopLeftCorner,
            Self::TeeDown => Self::TeeLeft,
            Self::TeeLeft => Self::TeeUp,
            Self::TeeUp => Self::TeeRight,
            Self::TeeRight => Self::TeeDown,
            other => other,
        }
    }

    pub fn rotated_cw_times(self, quarter_turns: u32) -> Self {
        (0..quarter_turns % 4).fold(self, |symbol, _| symbol.rotated_cw())
    }
}

/// An object as drawn: its kind plus, for corpses, statues and figurines,
/// the creature it depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectGlyph {
    pub kind: ObjectKind,
    pub variant: Option<MonsterKind>,
}

impl ObjectGlyph {
    /// Resolves the drawn form of `kind`. The creature link is kept only for
    /// object kinds that vary by appearance.
    pub const fn new(kind: ObjectKind, creature: Option<MonsterKind>) -> Self {
        let variant = if kind.has_appearance_variant() {
            creature
        } else {
            None
        };
        Self { kind, variant }
    }

    pub const fn plain(kind: ObjectKind) -> Self {
        Self::new(kind, None)
    }
}

/// Danger tiers for generic warnings, weakest first.
pub const WARNING_LEVELS: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreatureGlyph {
    Monster(MonsterKind),
    /// Generic danger marker in `0..WARNING_LEVELS`.
    Warning(u8),
}

impl CreatureGlyph {
    pub fn warning(tier: u8) -> Self {
        Self::Warning(tier.min(WARNING_LEVELS - 1))
    }
}

bitflags! {
    /// Rendering hints attached to a creature overlay.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CreatureFlags: u8 {
        const TAME     = 1 << 0;
        const PEACEFUL = 1 << 1;
        /// Sensed but not seen.
        const DETECTED = 1 << 2;
        /// The viewer is riding it.
        const RIDDEN   = 1 << 3;
        const WARNING  = 1 << 4;
    }
}

/// Direction of travel of a beam, as drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZapDirection {
    Vertical,
    Horizontal,
    /// `\`
    LeftDiagonal,
    /// `/`
    RightDiagonal,
}

impl ZapDirection {
    /// Picks the beam segment for a step of `(dx, dy)`.
    pub const fn from_delta(dx: i32, dy: i32) -> Self {
        if dx != 0 && dx == dy {
            Self::LeftDiagonal
        } else if dx != 0 && dy != 0 {
            Self::RightDiagonal
        } else if dx != 0 {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

/// Beam families that draw with their own palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZapKind {
    MagicMissile,
    Fire,
    Frost,
    Sleep,
    Death,
    Lightning,
    PoisonGas,
    Acid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExplosionKind {
    Dark,
    Noxious,
    Muddy,
    Wet,
    Magical,
    Fiery,
    Frosty,
}

/// Position within the ring drawn while engulfed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StomachPart {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl StomachPart {
    /// Offset of this part from the engulfed viewer.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::TopLeft => (-1, -1),
            Self::Top => (0, -1),
            Self::TopRight => (1, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::BottomLeft => (-1, 1),
            Self::Bottom => (0, 1),
            Self::BottomRight => (1, 1),
        }
    }
}

/// The transient/effect layer: drawn above everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectGlyph {
    Zap {
        kind: ZapKind,
        direction: ZapDirection,
    },
    Explosion {
        kind: ExplosionKind,
        /// Cell of the 3x3 blast, row-major `0..9`.
        cell: u8,
    },
    Swallow {
        engulfer: MonsterKind,
        part: StomachPart,
    },
    Region(RegionKind),
    /// A thrown or kicked object in flight.
    Item(ObjectGlyph),
    /// Generic flash (spell feedback, digging beam).
    Flash,
}

impl EffectGlyph {
    pub const fn zap(kind: ZapKind, dx: i32, dy: i32) -> Self {
        Self::Zap {
            kind,
            direction: ZapDirection::from_delta(dx, dy),
        }
    }

    /// Blast cell for offset `(dx, dy)` from the centre, each in `-1..=1`.
    pub const fn explosion(kind: ExplosionKind, dx: i32, dy: i32) -> Self {
        let cell = ((dy.signum() + 1) * 3 + (dx.signum() + 1)) as u8;
        Self::Explosion { kind, cell }
    }
}

/// The single topmost glyph of a composed tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Glyph {
    Background(MapSymbol),
    Trap(TrapKind),
    Object(ObjectGlyph),
    /// Remembered "something unseen is here" marker.
    UnseenCreature,
    Creature(CreatureGlyph, CreatureFlags),
    Effect(EffectGlyph),
}

impl Default for Glyph {
    fn default() -> Self {
        Self::Background(MapSymbol::Stone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn four_clockwise_turns_are_identity() {
        for symbol in MapSymbol::iter() {
            assert_eq!(symbol.rotated_cw_times(4), symbol);
        }
        assert_eq!(MapSymbol::TeeDown.rotated_cw(), MapSymbol::TeeLeft);
        assert_eq!(
            MapSymbol::TopLeftCorner.rotated_cw_times(2),
            MapSymbol::BottomRightCorner
        );
    }

    #[test]
    fn zap_direction_follows_step() {
        assert_eq!(ZapDirection::from_delta(1, 1), ZapDirection::LeftDiagonal);
        assert_eq!(ZapDirection::from_delta(-1, -1), ZapDirection::LeftDiagonal);
        assert_eq!(ZapDirection::from_delta(1, -1), ZapDirection::RightDiagonal);
        assert_eq!(ZapDirection::from_delta(-1, 0), ZapDirection::Horizontal);
        assert_eq!(ZapDirection::from_delta(0, 1), ZapDirection::Vertical);
    }

    #[test]
    fn object_glyph_drops_irrelevant_variant() {
        let rock = ObjectGlyph::new(ObjectKind::Rock, Some(MonsterKind::Newt));
        assert_eq!(rock.variant, None);
        let corpse = ObjectGlyph::new(ObjectKind::Corpse, Some(MonsterKind::Newt));
        assert_eq!(corpse.variant, Some(MonsterKind::Newt));
    }

    #[test]
    fn darkening_only_touches_lit_floor() {
        assert_eq!(MapSymbol::Room.darkened(), MapSymbol::DarkRoom);
        assert_eq!(MapSymbol::LitCorridor.darkened(), MapSymbol::Corridor);
        assert_eq!(MapSymbol::Fountain.darkened(), MapSymbol::Fountain);
    }

    #[test]
    fn warning_tier_is_clamped() {
        assert_eq!(CreatureGlyph::warning(9), CreatureGlyph::Warning(5));
    }

    #[test]
    fn stomach_ring_surrounds_centre() {
        let offsets: Vec<_> = StomachPart::iter().map(StomachPart::offset).collect();
        assert_eq!(offsets.len(), 8);
        assert!(!offsets.contains(&(0, 0)));
    }
}
