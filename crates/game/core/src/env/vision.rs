use crate::state::Position;

/// Ambient region effects that can hang over a tile (gas clouds and the like).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionKind {
    PoisonCloud,
    Fog,
}

/// Line-of-sight answers for the current viewer position.
///
/// The oracle is recomputed by the vision engine whenever the viewer or the
/// level's opacity changes; display code only ever asks point queries.
pub trait VisionOracle {
    /// The viewer can currently see `position`.
    fn is_visible(&self, position: Position) -> bool;

    /// `position` is lit only by a transient light source.
    fn is_temporarily_lit(&self, position: Position) -> bool {
        let _ = position;
        false
    }

    /// Visible region effect covering `position`, if any.
    fn region_at(&self, position: Position) -> Option<RegionKind> {
        let _ = position;
        None
    }
}
