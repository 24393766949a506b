//! Scrambled perception.
//!
//! While the viewer hallucinates, creatures, objects and traps are drawn as
//! random kinds. Rolls come from a seeded PCG stream so frames replay
//! identically.

use strum::{EnumCount, IntoEnumIterator};

use game_core::{MonsterKind, ObjectKind, PcgRng, RngOracle, TrapKind, compute_seed};

use crate::glyph::{ObjectGlyph, WARNING_LEVELS};

#[derive(Clone, Copy, Debug)]
#[repr(u32)]
enum Stream {
    Monster = 1,
    Object = 2,
    Trap = 3,
    Warning = 4,
}

#[derive(Clone, Debug)]
pub struct IllusionSource {
    rng: PcgRng,
    seed: u64,
    counter: u64,
}

impl IllusionSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: PcgRng,
            seed,
            counter: 0,
        }
    }

    fn roll(&mut self, stream: Stream, bound: usize) -> usize {
        self.counter += 1;
        let seed = compute_seed(self.seed, self.counter, stream as u32);
        self.rng.below(seed, bound as u32) as usize
    }

    /// Any creature kind that can stand on its own.
    pub fn monster(&mut self) -> MonsterKind {
        let index = self.roll(Stream::Monster, MonsterKind::COUNT - 1);
        MonsterKind::iter()
            .filter(|kind| kind.is_standalone())
            .nth(index)
            .unwrap_or(MonsterKind::Human)
    }

    pub fn object(&mut self) -> ObjectGlyph {
        let index = self.roll(Stream::Object, ObjectKind::COUNT);
        let kind = ObjectKind::iter().nth(index).unwrap_or(ObjectKind::Rock);
        let variant = kind.has_appearance_variant().then(|| self.monster());
        ObjectGlyph::new(kind, variant)
    }

    pub fn trap(&mut self) -> TrapKind {
        let index = self.roll(Stream::Trap, TrapKind::COUNT);
        TrapKind::iter().nth(index).unwrap_or(TrapKind::Arrow)
    }

    /// A danger tier other than the weakest.
    pub fn warning_level(&mut self) -> u8 {
        1 + self.roll(Stream::Warning, usize::from(WARNING_LEVELS - 1)) as u8
    }
}
