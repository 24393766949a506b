//! Creature overlays: seen, sensed and warned-of creatures and the viewer.

use tracing::trace;

use game_core::{CreatureTruth, Disguise, Furniture, MonsterKind, Senses};

use crate::buffer::Composition;
use crate::glyph::{CreatureFlags, CreatureGlyph, MapSymbol, ObjectGlyph};
use crate::port::WindowPort;
use crate::session::Compositor;

/// How the viewer is aware of a creature it is about to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Perception {
    /// Seen on a visible tile.
    Seen,
    /// Sensed remotely (telepathy, infravision, specific warning).
    Sensed,
    /// Found by detection magic.
    Detected,
}

/// Danger tier shown for a creature of experience `level`.
pub fn warning_tier(level: u8) -> u8 {
    (level / 4).min(5)
}

pub(crate) fn furniture_symbol(furniture: Furniture) -> MapSymbol {
    match furniture {
        Furniture::ClosedDoor { horizontal } => MapSymbol::ClosedDoor { horizontal },
        Furniture::OpenDoor { horizontal } => MapSymbol::OpenDoor { horizontal },
        Furniture::Doorway => MapSymbol::Doorway,
        Furniture::UpStair => MapSymbol::UpStair,
        Furniture::DownStair => MapSymbol::DownStair,
        Furniture::Altar => MapSymbol::Altar,
        Furniture::Fountain => MapSymbol::Fountain,
        Furniture::Throne => MapSymbol::Throne,
        Furniture::Sink => MapSymbol::Sink,
        Furniture::Grave => MapSymbol::Grave,
        Furniture::Tree => MapSymbol::Tree,
        Furniture::IronBars => MapSymbol::IronBars,
    }
}

impl<P: WindowPort> Compositor<'_, P> {
    /// Draws `creature` over its remembered tile.
    ///
    /// A disguise fools the eye unless the viewer is protected or senses the
    /// creature some other way. Furniture and object disguises are committed
    /// to memory, since the viewer has no reason to doubt them.
    pub fn display_creature(&mut self, creature: &CreatureTruth, perception: Perception) {
        let position = creature.position;
        let viewer = self.map.viewer();
        if position == viewer.position {
            trace!(%position, "creature overlay on viewer tile skipped");
            return;
        }
        let senses = self.map.senses(creature);
        let unmasked = viewer.sees_disguises() || senses.intersects(Senses::UNMASKING);

        if let Some(disguise) = creature.disguise.filter(|_| !unmasked) {
            if perception != Perception::Seen {
                return;
            }
            match disguise {
                Disguise::Furniture(furniture) => {
                    if let Some(tile) = self.memory.tile_mut(position) {
                        tile.background = furniture_symbol(furniture);
                        tile.trap = None;
                        tile.object = None;
                    }
                    self.compose_from_memory(position);
                }
                Disguise::Object(kind) => {
                    let variant = if viewer.is_hallucinating() {
                        self.session.illusions.monster()
                    } else {
                        MonsterKind::Tengu
                    };
                    if let Some(tile) = self.memory.tile_mut(position) {
                        tile.object = Some(ObjectGlyph::new(kind, Some(variant)));
                    }
                    self.compose_from_memory(position);
                }
                Disguise::Creature(kind) => {
                    let layers = self
                        .remembered_layers(position)
                        .with_creature(CreatureGlyph::Monster(kind), CreatureFlags::empty());
                    self.session.buffer.compose(position, layers, self.vision);
                }
            }
            return;
        }

        let hallucinating = viewer.is_hallucinating();
        let kind = if hallucinating {
            self.session.illusions.monster()
        } else {
            creature.kind
        };
        let flags = if perception == Perception::Detected && !creature.tame {
            CreatureFlags::DETECTED
        } else if creature.tame && !hallucinating {
            CreatureFlags::TAME
        } else if creature.peaceful && !hallucinating {
            CreatureFlags::PEACEFUL
        } else {
            CreatureFlags::empty()
        };

        if perception == Perception::Seen {
            if let Some(tile) = self.memory.tile_mut(position) {
                tile.unseen_creature = false;
            }
        }
        let layers = self
            .remembered_layers(position)
            .with_creature(CreatureGlyph::Monster(kind), flags);
        self.session.buffer.compose(position, layers, self.vision);
    }

    /// Draws a danger marker for a creature the viewer is only warned of.
    pub fn display_warning(&mut self, creature: &CreatureTruth) {
        let position = creature.position;
        if position == self.map.viewer().position {
            return;
        }
        let hallucinating = self.map.viewer().is_hallucinating();
        let glyph = if self.map.senses(creature).contains(Senses::WARN_OF_KIND) {
            if hallucinating {
                CreatureGlyph::Monster(self.session.illusions.monster())
            } else {
                CreatureGlyph::Monster(creature.kind)
            }
        } else if hallucinating {
            CreatureGlyph::warning(self.session.illusions.warning_level())
        } else {
            CreatureGlyph::warning(warning_tier(creature.level))
        };
        let layers = self
            .remembered_layers(position)
            .with_creature(glyph, CreatureFlags::WARNING);
        self.session.buffer.compose(position, layers, self.vision);
    }

    /// Draws the viewer at its own position.
    pub fn display_self(&mut self) {
        let viewer = self.map.viewer();
        let position = viewer.position;
        let Some(tile) = self.memory.tile_mut(position) else {
            trace!(%position, "viewer off map");
            return;
        };
        tile.stepped_on = true;
        let mut layers = self.remembered_layers(position);

        layers = if let Some(steed) = viewer.steed {
            layers.with_creature(CreatureGlyph::Monster(steed), CreatureFlags::RIDDEN)
        } else {
            match viewer.disguise {
                Some(Disguise::Furniture(furniture)) => Composition {
                    background: furniture_symbol(furniture),
                    trap: None,
                    object: None,
                    unseen_creature: false,
                    ..layers
                },
                Some(Disguise::Object(kind)) => Composition {
                    object: Some(ObjectGlyph::plain(kind)),
                    unseen_creature: false,
                    ..layers
                },
                Some(Disguise::Creature(kind)) => {
                    layers.with_creature(CreatureGlyph::Monster(kind), CreatureFlags::empty())
                }
                None => layers.with_creature(
                    CreatureGlyph::Monster(viewer.form),
                    CreatureFlags::empty(),
                ),
            }
        };
        self.session.buffer.compose(position, layers, self.vision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_tiers_cap_at_strongest() {
        assert_eq!(warning_tier(0), 0);
        assert_eq!(warning_tier(7), 1);
        assert_eq!(warning_tier(12), 3);
        assert_eq!(warning_tier(40), 5);
    }

    #[test]
    fn furniture_keeps_door_orientation() {
        assert_eq!(
            furniture_symbol(Furniture::ClosedDoor { horizontal: true }),
            MapSymbol::ClosedDoor { horizontal: true }
        );
    }
}
