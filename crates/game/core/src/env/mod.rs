//! Traits describing read-only world data.
//!
//! Oracles expose the level (terrain, contents, creatures, the viewer), line
//! of sight, and a deterministic random source. The [`Env`] aggregate bundles
//! them so the display layer can reach everything it needs without coupling to
//! a concrete world implementation.
mod error;
mod map;
mod rng;
mod snapshot;
mod vision;

pub use error::OracleError;
pub use map::{
    Door, DoorState, DrawbridgeUnder, LevelFlags, MapDimensions, MapOracle, StaticTile,
    TerrainKind, WallShape,
};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use snapshot::LevelSnapshot;
pub use vision::{RegionKind, VisionOracle};

/// Aggregates the read-only oracles a display pass consults.
#[derive(Clone, Copy)]
pub struct Env<'a, M, V>
where
    M: MapOracle + ?Sized,
    V: VisionOracle + ?Sized,
{
    map: &'a M,
    vision: &'a V,
}

pub type MapEnv<'a> = Env<'a, dyn MapOracle + 'a, dyn VisionOracle + 'a>;

impl<'a, M, V> Env<'a, M, V>
where
    M: MapOracle + ?Sized,
    V: VisionOracle + ?Sized,
{
    pub fn new(map: &'a M, vision: &'a V) -> Self {
        Self { map, vision }
    }

    pub fn map(&self) -> &'a M {
        self.map
    }

    pub fn vision(&self) -> &'a V {
        self.vision
    }
}

impl<'a, M, V> Env<'a, M, V>
where
    M: MapOracle + 'a,
    V: VisionOracle + 'a,
{
    /// Converts this environment into a trait-object based [`MapEnv`].
    pub fn as_map_env(&self) -> MapEnv<'a> {
        let map: &'a dyn MapOracle = self.map;
        let vision: &'a dyn VisionOracle = self.vision;
        Env::new(map, vision)
    }
}

impl<'a> Env<'a, LevelSnapshot, LevelSnapshot> {
    /// A snapshot answers both map and vision queries.
    pub fn from_snapshot(level: &'a LevelSnapshot) -> Self {
        Self::new(level, level)
    }
}
