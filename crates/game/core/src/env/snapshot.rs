//! In-memory level backing both oracles.
//!
//! `LevelSnapshot` is the concrete world used by tools and tests: terrain,
//! floor contents, creatures with the senses the viewer has for them, and an
//! explicit set of visible tiles standing in for the vision engine.

use std::collections::{BTreeMap, BTreeSet};

use super::{
    Door, DoorState, LevelFlags, MapDimensions, MapOracle, OracleError, RegionKind, StaticTile,
    TerrainKind, VisionOracle, WallShape,
};
use crate::state::{
    CreatureTruth, EntityId, ObjectTruth, Position, Senses, TrapTruth, Viewer,
};

#[derive(Clone, Debug)]
pub struct LevelSnapshot {
    dimensions: MapDimensions,
    tiles: Vec<StaticTile>,
    flags: LevelFlags,
    objects: BTreeMap<Position, Vec<ObjectTruth>>,
    traps: BTreeMap<Position, TrapTruth>,
    creatures: BTreeMap<Position, (CreatureTruth, Senses)>,
    viewer: Viewer,
    generating: bool,
    visible: BTreeSet<Position>,
    temporarily_lit: BTreeSet<Position>,
    regions: BTreeMap<Position, RegionKind>,
}

impl LevelSnapshot {
    /// A level of solid stone.
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            tiles: vec![StaticTile::default(); dimensions.area()],
            flags: LevelFlags::default(),
            objects: BTreeMap::new(),
            traps: BTreeMap::new(),
            creatures: BTreeMap::new(),
            viewer: Viewer::default(),
            generating: false,
            visible: BTreeSet::new(),
            temporarily_lit: BTreeSet::new(),
            regions: BTreeMap::new(),
        }
    }

    /// Parses a level drawn with box-drawing walls.
    ///
    /// ```text
    /// ' ' stone    '.' floor     '#' corridor   'S' secret door
    /// '─' '│' '┌' '┐' '└' '┘' '┼' '┬' '┴' '├' '┤'  walls ('-' and '|' also work)
    /// '+' closed door   '\'' open door   ':' empty doorway
    /// '<' '>' stairs   '{' fountain   '_' altar   '}' pool   'L' lava   'T' tree
    /// ```
    ///
    /// Rows shorter than the widest one are padded with stone. Doors and
    /// secret doors are horizontal when a horizontal wall piece sits beside them.
    pub fn from_rows(rows: &[&str]) -> Result<Self, OracleError> {
        let grid: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let dimensions = MapDimensions::new(width as u32, grid.len() as u32);
        let mut level = Self::new(dimensions);

        let char_at = |x: i32, y: i32| -> char {
            if x < 0 || y < 0 {
                return ' ';
            }
            grid.get(y as usize)
                .and_then(|row| row.get(x as usize))
                .copied()
                .unwrap_or(' ')
        };

        for (y, row) in grid.iter().enumerate() {
            for (x, &ch) in row.iter().enumerate() {
                let (x, y) = (x as i32, y as i32);
                let horizontal = is_horizontal_piece(char_at(x - 1, y))
                    || is_horizontal_piece(char_at(x + 1, y));
                let terrain = match ch {
                    ' ' => TerrainKind::Stone,
                    '.' => TerrainKind::Room,
                    '#' => TerrainKind::Corridor,
                    'S' => TerrainKind::SecretDoor { horizontal },
                    '+' => TerrainKind::Door(Door::new(DoorState::Closed, horizontal)),
                    '\'' => TerrainKind::Door(Door::new(DoorState::Open, horizontal)),
                    ':' => TerrainKind::Door(Door::new(DoorState::NoDoor, horizontal)),
                    '<' => TerrainKind::Stairs { down: false },
                    '>' => TerrainKind::Stairs { down: true },
                    '{' => TerrainKind::Fountain,
                    '_' => TerrainKind::Altar,
                    '}' => TerrainKind::Pool,
                    'L' => TerrainKind::Lava,
                    'T' => TerrainKind::Tree,
                    other => match wall_shape_for(other) {
                        Some(shape) => TerrainKind::Wall(shape),
                        None => {
                            return Err(OracleError::UnknownTerrainChar {
                                ch: other,
                                position: Position::new(x, y),
                            });
                        }
                    },
                };
                level.set_terrain(Position::new(x, y), terrain);
            }
        }

        Ok(level)
    }

    // ------------------------------------------------------------------
    // Terrain and lighting
    // ------------------------------------------------------------------

    pub fn set_tile(&mut self, position: Position, tile: StaticTile) {
        if let Some(index) = self.dimensions.index(position) {
            self.tiles[index] = tile;
        }
    }

    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) {
        if let Some(index) = self.dimensions.index(position) {
            let lit = self.tiles[index].is_lit();
            self.tiles[index] = StaticTile::new(terrain).with_lit(lit);
        }
    }

    pub fn set_lit(&mut self, position: Position, lit: bool) {
        if let Some(index) = self.dimensions.index(position) {
            self.tiles[index] = self.tiles[index].with_lit(lit);
        }
    }

    /// Lights every tile of the level.
    pub fn light_all(&mut self) {
        for tile in &mut self.tiles {
            *tile = tile.with_lit(true);
        }
    }

    pub fn set_flags(&mut self, flags: LevelFlags) {
        self.flags = flags;
    }

    pub fn set_generating(&mut self, generating: bool) {
        self.generating = generating;
    }

    // ------------------------------------------------------------------
    // Floor contents
    // ------------------------------------------------------------------

    /// Drops `object` on top of the pile at its position.
    pub fn place_object(&mut self, object: ObjectTruth) {
        if self.dimensions.contains(object.position) {
            self.objects.entry(object.position).or_default().insert(0, object);
        }
    }

    /// Removes and returns the topmost object at `position`.
    pub fn take_top_object(&mut self, position: Position) -> Option<ObjectTruth> {
        let pile = self.objects.get_mut(&position)?;
        let top = (!pile.is_empty()).then(|| pile.remove(0));
        if pile.is_empty() {
            self.objects.remove(&position);
        }
        top
    }

    pub fn clear_objects(&mut self, position: Position) {
        self.objects.remove(&position);
    }

    pub fn place_trap(&mut self, trap: TrapTruth) {
        if self.dimensions.contains(trap.position) {
            self.traps.insert(trap.position, trap);
        }
    }

    pub fn remove_trap(&mut self, position: Position) -> Option<TrapTruth> {
        self.traps.remove(&position)
    }

    // ------------------------------------------------------------------
    // Creatures
    // ------------------------------------------------------------------

    pub fn place_creature(&mut self, creature: CreatureTruth, senses: Senses) {
        if self.dimensions.contains(creature.position) {
            self.creatures
                .insert(creature.position, (creature, senses));
        }
    }

    pub fn remove_creature(&mut self, position: Position) -> Option<CreatureTruth> {
        self.creatures.remove(&position).map(|(creature, _)| creature)
    }

    /// Moves the creature with `id` (head segment) to `to`, keeping its senses.
    pub fn move_creature(&mut self, id: EntityId, to: Position) -> bool {
        let from = self
            .creatures
            .iter()
            .find(|(_, (creature, _))| creature.id == id && !creature.is_tail())
            .map(|(position, _)| *position);
        let Some(from) = from else {
            return false;
        };
        if !self.dimensions.contains(to) || self.creatures.contains_key(&to) {
            return false;
        }
        if let Some((mut creature, senses)) = self.creatures.remove(&from) {
            creature.position = to;
            self.creatures.insert(to, (creature, senses));
        }
        true
    }

    pub fn set_senses(&mut self, position: Position, senses: Senses) {
        if let Some((_, current)) = self.creatures.get_mut(&position) {
            *current = senses;
        }
    }

    pub fn set_viewer(&mut self, viewer: Viewer) {
        self.viewer = viewer;
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.viewer
    }

    // ------------------------------------------------------------------
    // Vision
    // ------------------------------------------------------------------

    pub fn set_visible(&mut self, position: Position, visible: bool) {
        if !self.dimensions.contains(position) {
            return;
        }
        if visible {
            self.visible.insert(position);
        } else {
            self.visible.remove(&position);
        }
    }

    pub fn see_all(&mut self) {
        self.visible = self.dimensions.positions().collect();
    }

    pub fn hide_all(&mut self) {
        self.visible.clear();
    }

    /// Marks every in-bounds tile within `radius` (Chebyshev) of `center`
    /// visible and everything else not visible. No occlusion is modelled.
    pub fn see_around(&mut self, center: Position, radius: u32) {
        self.visible = self
            .dimensions
            .positions()
            .filter(|position| position.chebyshev(center) <= radius)
            .collect();
    }

    pub fn set_temporarily_lit(&mut self, position: Position, lit: bool) {
        if lit {
            self.temporarily_lit.insert(position);
        } else {
            self.temporarily_lit.remove(&position);
        }
    }

    pub fn set_region(&mut self, position: Position, region: Option<RegionKind>) {
        match region {
            Some(kind) => {
                self.regions.insert(position, kind);
            }
            None => {
                self.regions.remove(&position);
            }
        }
    }
}

impl MapOracle for LevelSnapshot {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.dimensions
            .index(position)
            .map(|index| self.tiles[index])
    }

    fn flags(&self) -> LevelFlags {
        self.flags
    }

    fn objects(&self, position: Position) -> Vec<ObjectTruth> {
        self.objects.get(&position).cloned().unwrap_or_default()
    }

    fn trap(&self, position: Position) -> Option<TrapTruth> {
        self.traps.get(&position).copied()
    }

    fn creature(&self, position: Position) -> Option<CreatureTruth> {
        self.creatures.get(&position).map(|(creature, _)| *creature)
    }

    fn creatures(&self) -> Vec<CreatureTruth> {
        self.creatures.values().map(|(creature, _)| *creature).collect()
    }

    fn object_positions(&self) -> Vec<Position> {
        self.objects.keys().copied().collect()
    }

    fn trap_positions(&self) -> Vec<Position> {
        self.traps.keys().copied().collect()
    }

    fn viewer(&self) -> Viewer {
        self.viewer
    }

    fn senses(&self, creature: &CreatureTruth) -> Senses {
        self.creatures
            .get(&creature.position)
            .filter(|(stored, _)| stored.id == creature.id)
            .map(|(_, senses)| *senses)
            .unwrap_or_default()
    }

    fn is_generating(&self) -> bool {
        self.generating
    }
}

impl VisionOracle for LevelSnapshot {
    fn is_visible(&self, position: Position) -> bool {
        self.visible.contains(&position)
    }

    fn is_temporarily_lit(&self, position: Position) -> bool {
        self.temporarily_lit.contains(&position)
    }

    fn region_at(&self, position: Position) -> Option<RegionKind> {
        self.regions.get(&position).copied()
    }
}

fn wall_shape_for(ch: char) -> Option<WallShape> {
    let shape = match ch {
        '─' | '-' => WallShape::Horizontal,
        '│' | '|' => WallShape::Vertical,
        '┌' => WallShape::TopLeftCorner,
        '┐' => WallShape::TopRightCorner,
        '└' => WallShape::BottomLeftCorner,
        '┘' => WallShape::BottomRightCorner,
        '┼' => WallShape::Cross,
        '┬' => WallShape::TeeDown,
        '┴' => WallShape::TeeUp,
        '├' => WallShape::TeeRight,
        '┤' => WallShape::TeeLeft,
        _ => return None,
    };
    Some(shape)
}

fn is_horizontal_piece(ch: char) -> bool {
    wall_shape_for(ch).is_some_and(|shape| shape != WallShape::Vertical)
}
