//! The composed frame.
//!
//! The buffer holds one entry per tile and a copy of the frame last handed
//! to the window port. It never reads tile memory: callers push fully
//! composed layers in through [`DisplayBuffer::compose`].

use bitflags::bitflags;
use sha2::{Digest, Sha256};

use game_core::{MapDimensions, Position, TrapKind, VisionOracle};

use crate::glyph::{CreatureFlags, CreatureGlyph, EffectGlyph, Glyph, MapSymbol, ObjectGlyph};

bitflags! {
    /// Provenance hints for presentation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        /// The viewer has walked here.
        const STEPPED  = 1 << 0;
        /// Remembered door known to be locked.
        const LOCKED   = 1 << 1;
        /// Remembered door known to be trapped.
        const TRAPPED  = 1 << 2;
        /// Observed from at least one direction.
        const SEEN     = 1 << 3;
        const LIT      = 1 << 4;
        const TEMP_LIT = 1 << 5;
    }
}

/// Layers of one tile, bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Composition {
    pub background: MapSymbol,
    pub trap: Option<TrapKind>,
    pub object: Option<ObjectGlyph>,
    pub unseen_creature: bool,
    pub creature: Option<CreatureGlyph>,
    pub creature_flags: CreatureFlags,
    pub effect: Option<EffectGlyph>,
    pub flags: TileFlags,
}

impl Composition {
    pub fn with_creature(mut self, glyph: CreatureGlyph, flags: CreatureFlags) -> Self {
        self.creature = Some(glyph);
        self.creature_flags = flags;
        self
    }

    pub fn with_effect(mut self, effect: EffectGlyph) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// One composed tile of the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayEntry {
    pub layers: Composition,
    /// Vision answer at the time the entry was composed.
    pub visible: bool,
}

impl DisplayEntry {
    /// The glyph a single-glyph display would draw.
    pub fn top(&self) -> Glyph {
        let layers = &self.layers;
        if let Some(effect) = layers.effect {
            Glyph::Effect(effect)
        } else if let Some(creature) = layers.creature {
            Glyph::Creature(creature, layers.creature_flags)
        } else if layers.unseen_creature {
            Glyph::UnseenCreature
        } else if let Some(object) = layers.object {
            Glyph::Object(object)
        } else if let Some(trap) = layers.trap {
            Glyph::Trap(trap)
        } else {
            Glyph::Background(layers.background)
        }
    }
}

/// Double-buffered frame: the composed entries and the last presented copy.
#[derive(Clone, Debug, Default)]
pub struct DisplayBuffer {
    dimensions: MapDimensions,
    current: Vec<DisplayEntry>,
    presented: Vec<DisplayEntry>,
    /// The presented copy no longer matches the screen; the next paint
    /// covers every tile.
    stale: bool,
}

impl DisplayBuffer {
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            current: vec![DisplayEntry::default(); dimensions.area()],
            presented: vec![DisplayEntry::default(); dimensions.area()],
            stale: true,
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn entry(&self, position: Position) -> Option<&DisplayEntry> {
        self.dimensions
            .index(position)
            .map(|index| &self.current[index])
    }

    pub fn top(&self, position: Position) -> Option<Glyph> {
        self.entry(position).map(DisplayEntry::top)
    }

    /// Writes `layers` at `position`, taking `visible` from `vision` now.
    /// Returns false when the position is off the map.
    pub fn compose(
        &mut self,
        position: Position,
        layers: Composition,
        vision: &dyn VisionOracle,
    ) -> bool {
        let Some(index) = self.dimensions.index(position) else {
            return false;
        };
        self.current[index] = DisplayEntry {
            layers,
            visible: vision.is_visible(position),
        };
        true
    }

    /// Replaces only the effect layer.
    pub fn set_effect(
        &mut self,
        position: Position,
        effect: Option<EffectGlyph>,
        vision: &dyn VisionOracle,
    ) -> bool {
        let Some(entry) = self.entry(position) else {
            return false;
        };
        let layers = Composition {
            effect,
            ..entry.layers
        };
        self.compose(position, layers, vision)
    }

    /// Resets one tile to unexplored.
    pub fn clear_tile(&mut self, position: Position, vision: &dyn VisionOracle) -> bool {
        self.compose(position, Composition::default(), vision)
    }

    /// Resets the whole frame to unexplored. The next paint repaints the
    /// whole screen.
    pub fn clear(&mut self) {
        self.current.fill(DisplayEntry::default());
        self.invalidate();
    }

    /// Forgets what the screen shows, so the next paint covers every tile.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Tiles whose composed entry differs from the presented frame, or
    /// every tile after [`invalidate`](Self::invalidate).
    pub fn changed_positions(&self) -> Vec<Position> {
        if self.stale {
            return self.dimensions.positions().collect();
        }
        self.dimensions
            .positions()
            .zip(self.current.iter().zip(&self.presented))
            .filter(|(_, (current, presented))| current != presented)
            .map(|(position, _)| position)
            .collect()
    }

    pub fn mark_presented(&mut self) {
        self.presented.clone_from(&self.current);
        self.stale = false;
    }

    /// SHA-256 over every composed entry in row-major order.
    pub fn checksum(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for entry in &self.current {
            hasher.update(format!("{entry:?}").as_bytes());
        }
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{LevelSnapshot, MonsterKind, ObjectKind};

    fn vision() -> LevelSnapshot {
        let mut level = LevelSnapshot::new(MapDimensions::new(4, 3));
        level.set_visible(Position::new(1, 1), true);
        level
    }

    #[test]
    fn compose_reads_visibility_at_write_time() {
        let mut level = vision();
        let mut buffer = DisplayBuffer::new(MapDimensions::new(4, 3));
        let spot = Position::new(1, 1);

        buffer.compose(spot, Composition::default(), &level);
        assert!(buffer.entry(spot).unwrap().visible);

        level.set_visible(spot, false);
        buffer.compose(spot, Composition::default(), &level);
        assert!(!buffer.entry(spot).unwrap().visible);
    }

    #[test]
    fn top_prefers_upper_layers() {
        let mut entry = DisplayEntry::default();
        entry.layers.background = MapSymbol::Room;
        entry.layers.trap = Some(TrapKind::Pit);
        assert_eq!(entry.top(), Glyph::Trap(TrapKind::Pit));

        entry.layers.object = Some(ObjectGlyph::plain(ObjectKind::Wand));
        assert_eq!(entry.top(), Glyph::Object(ObjectGlyph::plain(ObjectKind::Wand)));

        entry.layers = entry
            .layers
            .with_creature(CreatureGlyph::Monster(MonsterKind::Newt), CreatureFlags::TAME);
        assert_eq!(
            entry.top(),
            Glyph::Creature(CreatureGlyph::Monster(MonsterKind::Newt), CreatureFlags::TAME)
        );
    }

    #[test]
    fn changes_are_tracked_against_presented_frame() {
        let level = vision();
        let mut buffer = DisplayBuffer::new(MapDimensions::new(4, 3));
        let layers = Composition {
            background: MapSymbol::Room,
            ..Composition::default()
        };
        buffer.mark_presented();
        buffer.compose(Position::new(2, 0), layers, &level);
        assert_eq!(buffer.changed_positions(), vec![Position::new(2, 0)]);

        buffer.mark_presented();
        assert!(buffer.changed_positions().is_empty());
    }

    #[test]
    fn invalidated_frame_repaints_every_tile() {
        let mut buffer = DisplayBuffer::new(MapDimensions::new(4, 3));
        assert_eq!(buffer.changed_positions().len(), 12);
        buffer.mark_presented();
        assert!(!buffer.is_stale());

        buffer.invalidate();
        assert_eq!(buffer.changed_positions().len(), 12);
        buffer.mark_presented();

        buffer.clear();
        assert!(buffer.is_stale());
        assert_eq!(buffer.changed_positions().len(), 12);
    }

    #[test]
    fn checksum_tracks_content() {
        let level = vision();
        let mut buffer = DisplayBuffer::new(MapDimensions::new(4, 3));
        let empty = buffer.checksum();
        buffer.set_effect(Position::new(0, 0), Some(EffectGlyph::Flash), &level);
        assert_ne!(buffer.checksum(), empty);
        buffer.clear();
        assert_eq!(buffer.checksum(), empty);
    }

    #[test]
    fn off_map_writes_are_ignored() {
        let level = vision();
        let mut buffer = DisplayBuffer::new(MapDimensions::new(4, 3));
        assert!(!buffer.compose(Position::new(9, 9), Composition::default(), &level));
    }
}
