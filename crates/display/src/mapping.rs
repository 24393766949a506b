//! Tile memory mutators.
//!
//! Each mutator records what the viewer perceives now into the level's
//! memory and can push the result straight into the frame. Callers make sure
//! the viewer actually perceives the tile, except for the wide-area reveal
//! variant. Positions off the map are ignored.

use tracing::trace;

use game_core::{
    Door, DoorState, DrawbridgeUnder, ObjectTruth, Position, TerrainKind, TrapTruth,
};

use crate::buffer::{Composition, TileFlags};
use crate::error::DisplayError;
use crate::glyph::{MapSymbol, ObjectGlyph};
use crate::memory::{DoorMemory, Knowledge};
use crate::port::WindowPort;
use crate::seen::SeenDirections;
use crate::session::Compositor;
use crate::wall::resolve_wall_symbol;

impl<P: WindowPort> Compositor<'_, P> {
    /// Records the true background of `position`. Door lock and trap memory
    /// survives as long as the tile still shows a door.
    pub fn set_background(&mut self, position: Position, compose: bool) {
        if self.memory.tile(position).is_none() {
            trace!(%position, "background off map");
            return;
        }
        let symbol = self.background_symbol(position);
        if let Some(tile) = self.memory.tile_mut(position) {
            tile.background = symbol;
            if !symbol.is_door() {
                tile.door = DoorMemory::default();
            }
        }
        if compose {
            self.compose_from_memory(position);
        }
    }

    /// Background recording for wide-area reveals (magic mapping).
    ///
    /// The tile counts as seen from every direction and a door's lock and
    /// trap state become known. Out-of-sight floor never remembered lit
    /// takes its lighting from the truth: lit rooms and corridors are
    /// revealed lit, the rest dark.
    pub fn set_background_ignoring_lit_history(&mut self, position: Position, compose: bool) {
        let Some(tile) = self.map.tile(position) else {
            trace!(%position, "reveal off map");
            return;
        };
        let terrain = tile.terrain();
        let Some(memory) = self.memory.tile_mut(position) else {
            return;
        };
        memory.seen = SeenDirections::ALL;
        let corrected = !memory.was_lit && !self.vision.is_visible(position);
        let lit = corrected && tile.is_lit();
        if lit {
            memory.was_lit = true;
        }

        let mut symbol = self.background_symbol(position);
        if corrected {
            symbol = match (terrain, symbol) {
                (TerrainKind::Room, MapSymbol::Room) if !lit => MapSymbol::DarkRoom,
                (TerrainKind::Corridor, MapSymbol::LitCorridor) if !lit => MapSymbol::Corridor,
                (_, symbol) => symbol,
            };
        }

        if let Some(tile) = self.memory.tile_mut(position) {
            tile.background = symbol;
            tile.door = match terrain {
                TerrainKind::Door(door) if symbol.is_door() => DoorMemory {
                    locked: Knowledge::Known(door.state == DoorState::Locked),
                    trapped: Knowledge::Known(door.trapped),
                },
                _ => DoorMemory::default(),
            };
        }
        if compose {
            self.compose_from_memory(position);
        }
    }

    /// Records the trap's kind. While hallucinating a fresh random kind is
    /// drawn when `reroll` is set or nothing is remembered yet; otherwise the
    /// remembered illusion is kept.
    pub fn set_trap(&mut self, trap: &TrapTruth, compose: bool, reroll: bool) {
        let position = trap.position;
        let hallucinating = self.map.viewer().is_hallucinating();
        let Some(remembered) = self.memory.tile(position).map(|tile| tile.trap) else {
            trace!(%position, "trap off map");
            return;
        };
        let kind = match remembered {
            Some(kept) if hallucinating && !reroll => kept,
            _ if hallucinating => self.session.illusions.trap(),
            _ => trap.kind,
        };
        if let Some(tile) = self.memory.tile_mut(position) {
            tile.trap = Some(kind);
        }
        if compose {
            self.compose_from_memory(position);
        }
    }

    /// Records `object` as the top of the pile at its position.
    pub fn set_object(&mut self, object: &ObjectTruth, compose: bool, reroll: bool) {
        let position = object.position;
        let hallucinating = self.map.viewer().is_hallucinating();
        let Some(remembered) = self.memory.tile(position).map(|tile| tile.object) else {
            trace!(%position, "object off map");
            return;
        };
        let glyph = match remembered {
            Some(kept) if hallucinating && !reroll => kept,
            _ if hallucinating => self.session.illusions.object(),
            _ => ObjectGlyph::new(object.kind, object.creature),
        };
        if let Some(tile) = self.memory.tile_mut(position) {
            tile.object = Some(glyph);
        }
        if compose {
            self.compose_from_memory(position);
        }
    }

    /// Marks an unseen creature at `position` and shows the marker. The
    /// viewer's own tile never carries one.
    pub fn set_unseen_creature_marker(&mut self, position: Position) {
        if position == self.map.viewer().position {
            trace!(%position, "refusing unseen marker on viewer");
            return;
        }
        let Some(tile) = self.memory.tile_mut(position) else {
            return;
        };
        tile.unseen_creature = true;
        self.compose_from_memory(position);
    }

    /// Drops a remembered object and unseen marker proven wrong. Trap and
    /// background memory are kept. The frame is left alone.
    pub fn clear_creature_and_object_memory(&mut self, position: Position) {
        if let Some(tile) = self.memory.tile_mut(position) {
            tile.unseen_creature = false;
            tile.object = None;
        }
    }

    /// Records door lock/trap knowledge learned by detection. Ignored unless
    /// the tile is remembered as a door.
    pub fn record_door_knowledge(
        &mut self,
        position: Position,
        locked: Option<bool>,
        trapped: Option<bool>,
    ) {
        let Some(tile) = self.memory.tile_mut(position) else {
            return;
        };
        if !tile.background.is_door() {
            return;
        }
        if let Some(locked) = locked {
            tile.door.locked = Knowledge::Known(locked);
        }
        if let Some(trapped) = trapped {
            tile.door.trapped = Knowledge::Known(trapped);
        }
    }

    /// Adds the viewer's current octant to the tile's seen set.
    pub fn record_seen_from(&mut self, position: Position) {
        let viewer = self.map.viewer().position;
        if let Some(tile) = self.memory.tile_mut(position) {
            tile.seen |= SeenDirections::from_viewer(viewer, position);
        }
    }

    /// Writes the frame entry for `position` from memory alone.
    pub fn compose_from_memory(&mut self, position: Position) {
        let layers = self.remembered_layers(position);
        self.session.buffer.compose(position, layers, self.vision);
    }

    /// Records everything visible at `position`: background always, a
    /// discovered trap and the top object unless liquid hides them.
    pub fn record_full_tile(&mut self, position: Position, compose: bool, reroll: bool) {
        let Some(terrain) = self.map.terrain(position) else {
            trace!(%position, "tile off map");
            return;
        };
        let underwater = self.map.viewer().is_underwater();
        let hidden = (terrain.is_pool() && !underwater) || terrain.is_lava();

        self.set_background(position, false);

        match self.map.trap(position) {
            Some(trap) if trap.seen && !hidden => self.set_trap(&trap, false, reroll),
            _ => {
                if let Some(tile) = self.memory.tile_mut(position) {
                    tile.trap = None;
                }
            }
        }

        match self.map.top_object(position) {
            Some(object) if !hidden => self.set_object(&object, false, reroll),
            _ => {
                if let Some(tile) = self.memory.tile_mut(position) {
                    tile.object = None;
                }
            }
        }

        if compose {
            self.compose_from_memory(position);
        }
    }

    pub(crate) fn remembered_layers(&self, position: Position) -> Composition {
        let Some(tile) = self.memory.tile(position) else {
            return Composition::default();
        };
        let mut flags = TileFlags::empty();
        flags.set(TileFlags::STEPPED, tile.stepped_on);
        flags.set(TileFlags::LOCKED, tile.door.locked.is_known_true());
        flags.set(TileFlags::TRAPPED, tile.door.trapped.is_known_true());
        flags.set(TileFlags::SEEN, !tile.seen.is_empty());
        flags.set(TileFlags::LIT, tile.was_lit);
        flags.set(TileFlags::TEMP_LIT, self.vision.is_temporarily_lit(position));

        Composition {
            background: tile.background,
            trap: tile.trap,
            object: tile.object,
            unseen_creature: tile.unseen_creature,
            flags,
            ..Composition::default()
        }
    }

    /// The symbol the true terrain shows to a viewer with this tile's
    /// lighting and viewing history.
    pub(crate) fn background_symbol(&mut self, position: Position) -> MapSymbol {
        let Some(terrain) = self.map.terrain(position) else {
            return MapSymbol::Stone;
        };
        let (was_lit, seen) = self
            .memory
            .tile(position)
            .map(|tile| (tile.was_lit, tile.seen))
            .unwrap_or_default();

        match terrain {
            TerrainKind::Stone if self.map.flags().arboreal => MapSymbol::Tree,
            TerrainKind::Stone | TerrainKind::SecretCorridor => MapSymbol::Stone,
            TerrainKind::Wall(_) | TerrainKind::SecretDoor { .. } => {
                let Some(shape) = terrain.wall_shape() else {
                    return MapSymbol::Stone;
                };
                let mode = self.memory.walls().mode(position);
                match resolve_wall_symbol(shape, mode, seen) {
                    Ok(symbol) => symbol,
                    Err(error) => {
                        self.session.diagnostics.report(error);
                        MapSymbol::Stone
                    }
                }
            }
            TerrainKind::DrawbridgeWall { horizontal } => {
                MapSymbol::RaisedDrawbridge { horizontal }
            }
            TerrainKind::Tree => MapSymbol::Tree,
            TerrainKind::Pool | TerrainKind::Moat => MapSymbol::Pool,
            TerrainKind::Water => MapSymbol::Water,
            TerrainKind::DrawbridgeUp { under, .. } => match under {
                DrawbridgeUnder::Moat => MapSymbol::Pool,
                DrawbridgeUnder::Lava => MapSymbol::Lava,
                DrawbridgeUnder::Ice => MapSymbol::Ice,
                DrawbridgeUnder::Floor => MapSymbol::Room,
            },
            TerrainKind::Lava => MapSymbol::Lava,
            TerrainKind::IronBars => MapSymbol::IronBars,
            TerrainKind::Door(door) => door_symbol(door),
            TerrainKind::Corridor if was_lit || self.session.config.lit_corridor => {
                MapSymbol::LitCorridor
            }
            TerrainKind::Corridor => MapSymbol::Corridor,
            TerrainKind::Room => MapSymbol::Room,
            TerrainKind::Stairs { down: true } => MapSymbol::DownStair,
            TerrainKind::Stairs { down: false } => MapSymbol::UpStair,
            TerrainKind::Ladder { down: true } => MapSymbol::DownLadder,
            TerrainKind::Ladder { down: false } => MapSymbol::UpLadder,
            TerrainKind::Fountain => MapSymbol::Fountain,
            TerrainKind::Throne => MapSymbol::Throne,
            TerrainKind::Sink => MapSymbol::Sink,
            TerrainKind::Grave => MapSymbol::Grave,
            TerrainKind::Altar => MapSymbol::Altar,
            TerrainKind::Ice => MapSymbol::Ice,
            TerrainKind::DrawbridgeDown { horizontal } => {
                MapSymbol::LoweredDrawbridge { horizontal }
            }
            TerrainKind::Air => MapSymbol::Air,
            TerrainKind::Cloud => MapSymbol::Cloud,
            TerrainKind::Custom(code) => {
                self.session
                    .diagnostics
                    .report(DisplayError::UnknownTerrain { code, position });
                MapSymbol::Room
            }
        }
    }
}

fn door_symbol(door: Door) -> MapSymbol {
    let horizontal = door.horizontal;
    match door.state {
        DoorState::NoDoor | DoorState::Broken => MapSymbol::Doorway,
        DoorState::Open => MapSymbol::OpenDoor { horizontal },
        DoorState::Closed | DoorState::Locked => MapSymbol::ClosedDoor { horizontal },
    }
}
