use crate::state::{CreatureTruth, ObjectTruth, Position, Senses, TrapTruth, Viewer};

/// Read-only view of the loaded level: terrain, contents, and the viewer.
///
/// Implementations own the authoritative level data. Everything exposed here is
/// ground truth; what the viewer *knows* is tracked separately by the display
/// layer.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;
    fn flags(&self) -> LevelFlags;

    /// Objects lying at `position`, topmost first.
    fn objects(&self, position: Position) -> Vec<ObjectTruth>;

    fn trap(&self, position: Position) -> Option<TrapTruth>;

    /// Creature (or worm segment) occupying `position`.
    fn creature(&self, position: Position) -> Option<CreatureTruth>;

    /// Every occupied creature position, tail segments included.
    fn creatures(&self) -> Vec<CreatureTruth>;

    /// Positions holding at least one floor object.
    fn object_positions(&self) -> Vec<Position>;

    /// Positions holding a trap, discovered or not.
    fn trap_positions(&self) -> Vec<Position>;

    fn viewer(&self) -> Viewer;

    /// Senses through which the viewer currently perceives `creature`.
    fn senses(&self, creature: &CreatureTruth) -> Senses;

    /// True while the level is being generated and incremental display
    /// updates must be suppressed.
    fn is_generating(&self) -> bool {
        false
    }

    fn top_object(&self, position: Position) -> Option<ObjectTruth> {
        self.objects(position).into_iter().next()
    }

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    fn terrain(&self, position: Position) -> Option<TerrainKind> {
        self.tile(position).map(StaticTile::terrain)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of `position`, or `None` when out of bounds.
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

/// One tile of level terrain together with its current lighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
    lit: bool,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self {
            terrain,
            lit: false,
        }
    }

    pub const fn lit(terrain: TerrainKind) -> Self {
        Self { terrain, lit: true }
    }

    pub const fn with_lit(mut self, lit: bool) -> Self {
        self.lit = lit;
        self
    }

    pub const fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub const fn is_lit(self) -> bool {
        self.lit
    }
}

impl Default for StaticTile {
    fn default() -> Self {
        Self::new(TerrainKind::Stone)
    }
}

/// The eleven wall shapes, named by the junction they draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WallShape {
    Vertical,
    Horizontal,
    TopLeftCorner,
    TopRightCorner,
    BottomLeftCorner,
    BottomRightCorner,
    Cross,
    /// Stem points up.
    TeeUp,
    /// Stem points down.
    TeeDown,
    /// Stem points left.
    TeeLeft,
    /// Stem points right.
    TeeRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorState {
    /// Empty doorway.
    NoDoor,
    Broken,
    Open,
    Closed,
    Locked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    pub state: DoorState,
    pub trapped: bool,
    /// Set when the door sits in a horizontal wall.
    pub horizontal: bool,
}

impl Door {
    pub const fn new(state: DoorState, horizontal: bool) -> Self {
        Self {
            state,
            trapped: false,
            horizontal,
        }
    }

    pub const fn is_shut(self) -> bool {
        matches!(self.state, DoorState::Closed | DoorState::Locked)
    }
}

/// What lies beneath a raised drawbridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawbridgeUnder {
    Moat,
    Lava,
    Ice,
    Floor,
}

/// Terrain classes, ordered the way the solidity predicates expect:
/// everything up to `SecretCorridor` is rock, everything from `Door` on is
/// accessible, and everything from `Room` on is open floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Stone,
    Wall(WallShape),
    DrawbridgeWall { horizontal: bool },
    Tree,
    SecretDoor { horizontal: bool },
    SecretCorridor,
    Pool,
    Moat,
    Water,
    DrawbridgeUp { under: DrawbridgeUnder, horizontal: bool },
    Lava,
    IronBars,
    Door(Door),
    Corridor,
    Room,
    Stairs { down: bool },
    Ladder { down: bool },
    Fountain,
    Throne,
    Sink,
    Grave,
    Altar,
    Ice,
    DrawbridgeDown { horizontal: bool },
    Air,
    Cloud,
    /// Terrain introduced by content this build does not know how to draw.
    Custom(u16),
}

impl TerrainKind {
    /// Solid terrain: stone, walls, trees, and secret passages.
    pub const fn is_rock(self) -> bool {
        matches!(
            self,
            Self::Stone
                | Self::Wall(_)
                | Self::DrawbridgeWall { .. }
                | Self::Tree
                | Self::SecretDoor { .. }
                | Self::SecretCorridor
        )
    }

    /// Wall geometry used for junction glyph selection. Secret doors draw as
    /// the straight wall they hide in.
    pub const fn wall_shape(self) -> Option<WallShape> {
        match self {
            Self::Wall(shape) => Some(shape),
            Self::SecretDoor { horizontal: true } => Some(WallShape::Horizontal),
            Self::SecretDoor { horizontal: false } => Some(WallShape::Vertical),
            _ => None,
        }
    }

    pub const fn is_door(self) -> bool {
        matches!(self, Self::Door(_))
    }

    pub const fn is_corridor(self) -> bool {
        matches!(self, Self::Corridor | Self::SecretCorridor)
    }

    /// Standing water in any form, including the moat under a raised bridge.
    pub const fn is_pool(self) -> bool {
        matches!(
            self,
            Self::Pool
                | Self::Moat
                | Self::Water
                | Self::DrawbridgeUp {
                    under: DrawbridgeUnder::Moat,
                    ..
                }
        )
    }

    pub const fn is_lava(self) -> bool {
        matches!(
            self,
            Self::Lava
                | Self::DrawbridgeUp {
                    under: DrawbridgeUnder::Lava,
                    ..
                }
        )
    }

    /// Pool or lava: what a submerged viewer can still make out.
    pub const fn is_liquid(self) -> bool {
        self.is_pool() || self.is_lava()
    }

    /// Open floor and floor furniture.
    pub const fn is_room(self) -> bool {
        matches!(
            self,
            Self::Room
                | Self::Stairs { .. }
                | Self::Ladder { .. }
                | Self::Fountain
                | Self::Throne
                | Self::Sink
                | Self::Grave
                | Self::Altar
                | Self::Ice
                | Self::DrawbridgeDown { .. }
                | Self::Air
                | Self::Cloud
        )
    }

    /// Terrain a creature could stand on without special abilities.
    pub const fn is_accessible(self) -> bool {
        matches!(self, Self::Door(_) | Self::Corridor) || self.is_room()
    }
}

/// Per-level properties that change how memory behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelFlags {
    /// The viewer retains memory of tiles once they leave sight.
    pub hero_memory: bool,
    /// Solid rock is drawn as trees.
    pub arboreal: bool,
    /// The whole level is open water (underwater rules do not apply).
    pub water_level: bool,
    /// The whole level is open air.
    pub air_level: bool,
}

impl Default for LevelFlags {
    fn default() -> Self {
        Self {
            hero_memory: true,
            arboreal: false,
            water_level: false,
            air_level: false,
        }
    }
}
