//! Per-tile refresh: the single entry point that brings one tile's memory
//! and frame entry up to date with what the viewer perceives now.

use tracing::trace;

use game_core::{CreatureTruth, ObjectKind, Position, Senses, TerrainKind};

use crate::config::WARNING_DISTANCE_SQUARED;
use crate::error::DisplayError;
use crate::glyph::{EffectGlyph, Glyph, MapSymbol};
use crate::monster::Perception;
use crate::port::WindowPort;
use crate::session::{Compositor, FeltGear};

impl<P: WindowPort> Compositor<'_, P> {
    /// Updates memory and the frame for `position`.
    ///
    /// Visible tiles are re-recorded from the truth and any perceivable
    /// creature is drawn over them. Tiles out of sight show memory plus
    /// whatever the viewer senses there by other means.
    pub fn refresh(&mut self, position: Position) {
        self.session.stats.refreshes += 1;
        if self.session.level.is_none() {
            self.session.diagnostics.report(DisplayError::NoLevel);
            return;
        }
        let Some(terrain) = self.map.terrain(position) else {
            trace!(%position, "refresh off map");
            return;
        };
        if self.map.is_generating() {
            return;
        }

        let viewer = self.map.viewer();
        if viewer.engulfed_by.is_some() {
            if position == viewer.position {
                self.display_self();
            }
            return;
        }
        if viewer.is_underwater() && !self.map.flags().water_level {
            let dx = position.x - viewer.position.x;
            let dy = position.y - viewer.position.y;
            if !terrain.is_liquid() || dx * dx + dy * dy > 2 {
                return;
            }
        }

        if self.vision.is_visible(position) {
            self.refresh_visible(position, terrain);
        } else {
            self.refresh_unseen(position);
        }
    }

    fn refresh_visible(&mut self, position: Position, terrain: TerrainKind) {
        let viewer = self.map.viewer();
        let lit = self
            .map
            .tile(position)
            .is_some_and(|tile| tile.is_lit());
        if let Some(tile) = self.memory.tile_mut(position) {
            tile.was_lit = lit;
        }
        self.record_seen_from(position);

        if position == viewer.position {
            self.record_full_tile(position, !viewer.senses_self(), false);
            if viewer.senses_self() {
                self.display_self();
            }
        } else if let Some(creature) = self.map.creature(position) {
            let senses = self.map.senses(&creature);
            let whole = !creature.is_tail();
            let sighted = senses.contains(Senses::SIGHT);
            let remote = whole && senses.intersects(Senses::TELEPATHY | Senses::WARN_OF_KIND);
            let detected = whole && senses.contains(Senses::DETECTION);

            if sighted || remote || detected {
                self.record_full_tile(position, false, false);
                if sighted && creature.trapped {
                    if let Some(trap) = self.map.trap(position) {
                        if trap.kind.holds_visibly() {
                            self.set_trap(&trap, false, false);
                        }
                    }
                }
                let perception = if sighted {
                    Perception::Seen
                } else if remote {
                    Perception::Sensed
                } else {
                    Perception::Detected
                };
                self.display_creature(&creature, perception);
            } else if self.warns_of(&creature, senses) {
                self.record_full_tile(position, false, false);
                self.display_warning(&creature);
            } else {
                self.record_full_tile(position, true, false);
            }
        } else {
            self.record_full_tile(position, true, false);
        }

        if terrain.is_accessible() {
            if let Some(region) = self.vision.region_at(position) {
                self.session.buffer.set_effect(
                    position,
                    Some(EffectGlyph::Region(region)),
                    self.vision,
                );
            }
        }
    }

    fn refresh_unseen(&mut self, position: Position) {
        let viewer = self.map.viewer();
        if position == viewer.position {
            self.feel_location(position);
            if viewer.senses_self() {
                self.display_self();
            }
            return;
        }

        let Some(creature) = self.map.creature(position) else {
            self.compose_remembered(position);
            return;
        };
        let senses = self.map.senses(&creature);
        let whole = !creature.is_tail();
        if whole && senses.intersects(Senses::REMOTE) {
            self.compose_remembered(position);
            self.display_creature(&creature, Perception::Sensed);
        } else if whole && senses.contains(Senses::DETECTION) {
            self.compose_remembered(position);
            self.display_creature(&creature, Perception::Detected);
        } else if self.warns_of(&creature, senses) {
            self.compose_remembered(position);
            self.display_warning(&creature);
        } else {
            self.compose_remembered(position);
        }
    }

    /// Out-of-sight tiles show memory, darkened where the light was never
    /// seen. Levels without memory forget the tile instead.
    fn compose_remembered(&mut self, position: Position) {
        let hero_memory = self.map.flags().hero_memory;
        if let Some(tile) = self.memory.tile_mut(position) {
            if !hero_memory {
                tile.forget();
            } else if !tile.was_lit {
                tile.background = tile.background.darkened();
            }
        }
        self.compose_from_memory(position);
    }

    fn warns_of(&self, creature: &CreatureTruth, senses: Senses) -> bool {
        if creature.is_tail() || creature.peaceful || !senses.contains(Senses::WARNING) {
            return false;
        }
        let viewer = self.map.viewer().position;
        let dx = creature.position.x - viewer.x;
        let dy = creature.position.y - viewer.y;
        dx * dx + dy * dy < WARNING_DISTANCE_SQUARED
    }

    /// Records what the viewer learns at `position` by touch alone.
    ///
    /// Blind or submerged viewers probe their surroundings this way. A
    /// levitating viewer cannot reach the floor, so objects (boulders aside)
    /// and traps stay unknown.
    pub fn feel_location(&mut self, position: Position) {
        let Some(terrain) = self.map.terrain(position) else {
            trace!(%position, "feel off map");
            return;
        };
        let creature = self.map.creature(position);
        let marked = self
            .memory
            .tile(position)
            .is_some_and(|tile| tile.unseen_creature);
        if marked && creature.is_some() {
            return;
        }
        let viewer = self.map.viewer();
        if viewer.is_underwater() && !terrain.is_liquid() {
            return;
        }
        self.record_seen_from(position);

        if viewer.is_levitating() {
            self.feel_from_above(position, terrain);
        } else {
            self.record_full_tile(position, false, false);
            if position == viewer.position {
                self.feel_punishment(position);
            }
            let was_lit = self
                .memory
                .tile(position)
                .is_some_and(|tile| tile.was_lit);
            if let Some(tile) = self.memory.tile_mut(position) {
                if !was_lit {
                    tile.background = tile.background.darkened();
                }
            }
            self.compose_from_memory(position);
        }

        if let Some(creature) = creature {
            if position != viewer.position && !creature.is_tail() {
                let senses = self.map.senses(&creature);
                if senses.intersects(Senses::REMOTE) {
                    self.display_creature(&creature, Perception::Sensed);
                } else if senses.contains(Senses::DETECTION) {
                    self.display_creature(&creature, Perception::Detected);
                }
            }
        }
    }

    fn feel_from_above(&mut self, position: Position, terrain: TerrainKind) {
        let boulder = self
            .map
            .top_object(position)
            .filter(|object| object.kind == ObjectKind::Boulder);
        let shut_door = matches!(terrain, TerrainKind::Door(door) if door.is_shut());

        if terrain.is_rock() || shut_door {
            self.set_background(position, true);
        } else if let Some(boulder) = boulder {
            self.set_object(&boulder, true, false);
        } else if terrain.is_door() {
            self.set_background(position, true);
        } else if terrain == TerrainKind::Room || terrain.is_pool() {
            let Some(tile) = self.memory.tile(position).copied() else {
                return;
            };
            let stale_boulder = tile
                .object
                .is_some_and(|object| object.kind == ObjectKind::Boulder);
            let floor = if tile.was_lit {
                MapSymbol::Room
            } else {
                MapSymbol::DarkRoom
            };
            if stale_boulder || tile.unseen_creature {
                self.clear_creature_and_object_memory(position);
                if terrain != TerrainKind::Room && !tile.seen.is_empty() {
                    self.set_background(position, true);
                } else {
                    self.show_floor(position, floor);
                }
            } else if tile.trap.is_none()
                && tile.object.is_none()
                && tile.background.is_structural()
            {
                self.show_floor(position, floor);
            } else {
                self.compose_from_memory(position);
            }
        } else {
            self.set_background(position, false);
            if let Some(tile) = self.memory.tile_mut(position) {
                if !tile.was_lit && tile.background == MapSymbol::LitCorridor {
                    tile.background = MapSymbol::Corridor;
                }
            }
            self.compose_from_memory(position);
        }
    }

    fn show_floor(&mut self, position: Position, floor: MapSymbol) {
        if let Some(tile) = self.memory.tile_mut(position) {
            tile.background = floor;
        }
        self.compose_from_memory(position);
    }

    fn feel_punishment(&mut self, position: Position) {
        let Some(punishment) = self.map.viewer().punishment else {
            self.session.felt = FeltGear::empty();
            return;
        };
        let top = self.map.top_object(position).map(|object| object.kind);
        let mut felt = FeltGear::empty();
        felt.set(
            FeltGear::CHAIN,
            punishment.chain == position && top == Some(ObjectKind::IronChain),
        );
        felt.set(
            FeltGear::BALL,
            punishment.ball == Some(position) && top == Some(ObjectKind::HeavyIronBall),
        );
        self.session.felt = felt;
    }

    /// Refreshes every tile holding a creature, and the viewer's own tile
    /// unless mounted.
    pub fn refresh_all_creatures(&mut self) {
        let mut positions: Vec<Position> = self
            .map
            .creatures()
            .into_iter()
            .map(|creature| creature.position)
            .collect();
        let viewer = self.map.viewer();
        if viewer.steed.is_none() {
            positions.push(viewer.position);
        }
        for position in positions {
            self.refresh(position);
        }
    }

    pub fn refresh_all_objects(&mut self) {
        for position in self.map.object_positions() {
            self.refresh(position);
        }
    }

    /// Refreshes trap tiles currently drawn as a trap.
    pub fn refresh_all_traps(&mut self) {
        for position in self.map.trap_positions() {
            if matches!(self.session.buffer.top(position), Some(Glyph::Trap(_))) {
                self.refresh(position);
            }
        }
    }
}
