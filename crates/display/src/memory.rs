//! What the viewer remembers about each tile of a level.
//!
//! Memory is owned by the level and outlives any single display pass. Only
//! the compositor's mutators write it; everything else reads.

use game_core::{MapDimensions, MapOracle, Position, TrapKind};

use crate::glyph::{MapSymbol, ObjectGlyph};
use crate::seen::SeenDirections;
use crate::wall::WallModes;

/// Tri-state knowledge of a door property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Knowledge {
    #[default]
    Unknown,
    Known(bool),
}

impl Knowledge {
    pub const fn is_known_true(self) -> bool {
        matches!(self, Self::Known(true))
    }
}

/// Door state remembered independently of the door's drawn symbol. Only
/// meaningful while the tile is remembered as a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorMemory {
    pub locked: Knowledge,
    pub trapped: Knowledge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMemory {
    pub background: MapSymbol,
    /// Set only once a trap here has been discovered.
    pub trap: Option<TrapKind>,
    /// Top of the pile as last perceived.
    pub object: Option<ObjectGlyph>,
    /// Something unseen was detected here.
    pub unseen_creature: bool,
    /// Permanent lighting as last perceived; transient light never counts.
    pub was_lit: bool,
    /// Octants the tile has been observed from. Never cleared.
    pub seen: SeenDirections,
    pub door: DoorMemory,
    pub stepped_on: bool,
}

impl TileMemory {
    /// Forgets the remembered layers, keeping lighting and viewing history.
    pub fn forget(&mut self) {
        self.background = MapSymbol::Stone;
        self.trap = None;
        self.object = None;
        self.unseen_creature = false;
        self.door = DoorMemory::default();
    }
}

/// Per-level memory store plus the cached wall junction modes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelMemory {
    dimensions: MapDimensions,
    tiles: Vec<TileMemory>,
    walls: WallModes,
}

impl LevelMemory {
    /// Blank memory with every wall treated as finished.
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            tiles: vec![TileMemory::default(); dimensions.area()],
            walls: WallModes::finished(dimensions),
        }
    }

    /// Blank memory for `map`, with wall modes scanned from its terrain.
    pub fn for_level(map: &dyn MapOracle) -> Self {
        Self {
            dimensions: map.dimensions(),
            tiles: vec![TileMemory::default(); map.dimensions().area()],
            walls: WallModes::scan(map),
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn tile(&self, position: Position) -> Option<&TileMemory> {
        self.dimensions
            .index(position)
            .map(|index| &self.tiles[index])
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut TileMemory> {
        self.dimensions
            .index(position)
            .map(|index| &mut self.tiles[index])
    }

    pub fn walls(&self) -> &WallModes {
        &self.walls
    }

    /// Reclassifies walls around `position` after its terrain changed.
    pub fn rescan_walls(&mut self, map: &dyn MapOracle, position: Position) {
        self.walls.rescan_tile(map, position);
    }

    /// Forgets every tile (amnesia), keeping wall modes.
    pub fn forget_all(&mut self) {
        for tile in &mut self.tiles {
            tile.forget();
            tile.seen = SeenDirections::empty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::ObjectKind;

    #[test]
    fn out_of_range_tiles_are_absent() {
        let mut memory = LevelMemory::new(MapDimensions::new(3, 2));
        assert!(memory.tile(Position::new(3, 0)).is_none());
        assert!(memory.tile_mut(Position::new(-1, 1)).is_none());
        assert_eq!(
            memory.tile(Position::new(2, 1)).map(|tile| tile.background),
            Some(MapSymbol::Stone)
        );
    }

    #[test]
    fn forgetting_keeps_viewing_history() {
        let mut tile = TileMemory {
            background: MapSymbol::Room,
            object: Some(ObjectGlyph::plain(ObjectKind::Rock)),
            unseen_creature: true,
            was_lit: true,
            seen: SeenDirections::N,
            ..TileMemory::default()
        };
        tile.forget();
        assert_eq!(tile.background, MapSymbol::Stone);
        assert!(tile.object.is_none());
        assert!(!tile.unseen_creature);
        assert!(tile.was_lit);
        assert_eq!(tile.seen, SeenDirections::N);
    }
}
