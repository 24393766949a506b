//! Wall junction selection.
//!
//! A wall tile knows its true shape, a junction mode computed once from its
//! neighbours when the level is loaded, and the octants it has been seen
//! from. Together they decide which piece of wall the viewer actually knows
//! about: a T-junction seen only from one side looks like a corner or a
//! straight wall until the other arms have been seen.
//!
//! Rotated shapes are canonicalised first. T-walls are turned to point
//! down, single-quadrant cross walls to have their solid quadrant at the
//! bottom right, by rotating the seen set; the per-orientation row tables
//! hold the answer already turned back.

use game_core::{MapDimensions, MapOracle, Position, WallShape};
use tracing::debug;

use crate::error::DisplayError;
use crate::glyph::MapSymbol;
use crate::seen::SeenDirections;

const SV0: SeenDirections = SeenDirections::NW;
const SV1: SeenDirections = SeenDirections::N;
const SV2: SeenDirections = SeenDirections::NE;
const SV3: SeenDirections = SeenDirections::E;
const SV4: SeenDirections = SeenDirections::SE;
const SV5: SeenDirections = SeenDirections::S;
const SV6: SeenDirections = SeenDirections::SW;
const SV7: SeenDirections = SeenDirections::W;

/// How a wall meets the rock around it.
///
/// Each variant belongs to one family of shapes; `Finished` (every side
/// bounded by finished wall) is valid for all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WallMode {
    #[default]
    Finished,
    /// Straight walls: rock on the left (vertical) or top (horizontal).
    ExteriorLeft,
    /// Straight walls: rock on the right (vertical) or bottom (horizontal).
    ExteriorRight,
    /// Corners: all three outer neighbours are rock.
    CornerOuter,
    /// Corners: the inner diagonal is rock.
    CornerInner,
    /// T-walls: rock behind the long bar.
    TeeLong,
    /// T-walls: rock in the quadrant left of the stem.
    TeeBottomLeft,
    /// T-walls: rock in the quadrant right of the stem.
    TeeBottomRight,
    CrossTopLeft,
    CrossTopRight,
    CrossBottomLeft,
    CrossBottomRight,
    /// Cross walls with rock in the top-left and bottom-right quadrants.
    CrossTopLeftBottomRight,
    /// Cross walls with rock in the bottom-left and top-right quadrants.
    CrossBottomLeftTopRight,
}

impl WallMode {
    fn fits(self, shape: WallShape) -> bool {
        use WallShape::*;
        match self {
            Self::Finished => true,
            Self::ExteriorLeft | Self::ExteriorRight => matches!(shape, Vertical | Horizontal),
            Self::CornerOuter | Self::CornerInner => matches!(
                shape,
                TopLeftCorner | TopRightCorner | BottomLeftCorner | BottomRightCorner
            ),
            Self::TeeLong | Self::TeeBottomLeft | Self::TeeBottomRight => {
                matches!(shape, TeeUp | TeeDown | TeeLeft | TeeRight)
            }
            Self::CrossTopLeft
            | Self::CrossTopRight
            | Self::CrossBottomLeft
            | Self::CrossBottomRight
            | Self::CrossTopLeftBottomRight
            | Self::CrossBottomLeftTopRight => shape == Cross,
        }
    }
}

/// Columns of a T-wall row.
#[derive(Clone, Copy)]
enum TeeColumn {
    Stone,
    LeftCorner,
    RightCorner,
    Bar,
    Tee,
}

/// `[stone, top-left corner, top-right corner, bar, tee]` per orientation,
/// each row the down-pointing row turned clockwise.
const TEE_DOWN: [MapSymbol; 5] = [
    MapSymbol::Stone,
    MapSymbol::TopLeftCorner,
    MapSymbol::TopRightCorner,
    MapSymbol::HorizontalWall,
    MapSymbol::TeeDown,
];
const TEE_LEFT: [MapSymbol; 5] = [
    MapSymbol::Stone,
    MapSymbol::TopRightCorner,
    MapSymbol::BottomRightCorner,
    MapSymbol::VerticalWall,
    MapSymbol::TeeLeft,
];
const TEE_UP: [MapSymbol; 5] = [
    MapSymbol::Stone,
    MapSymbol::BottomRightCorner,
    MapSymbol::BottomLeftCorner,
    MapSymbol::HorizontalWall,
    MapSymbol::TeeUp,
];
const TEE_RIGHT: [MapSymbol; 5] = [
    MapSymbol::Stone,
    MapSymbol::BottomLeftCorner,
    MapSymbol::TopLeftCorner,
    MapSymbol::VerticalWall,
    MapSymbol::TeeRight,
];

/// Columns of a single-quadrant cross row.
#[derive(Clone, Copy)]
enum CrossColumn {
    TopRightCorner,
    BottomRightCorner,
    BottomLeftCorner,
    LeftTee,
    UpTee,
    Cross,
}

const CROSS_BOTTOM_LEFT: [MapSymbol; 6] = [
    MapSymbol::BottomRightCorner,
    MapSymbol::BottomLeftCorner,
    MapSymbol::TopLeftCorner,
    MapSymbol::TeeUp,
    MapSymbol::TeeRight,
    MapSymbol::CrossWall,
];
const CROSS_TOP_LEFT: [MapSymbol; 6] = [
    MapSymbol::BottomLeftCorner,
    MapSymbol::TopLeftCorner,
    MapSymbol::TopRightCorner,
    MapSymbol::TeeRight,
    MapSymbol::TeeDown,
    MapSymbol::CrossWall,
];
const CROSS_TOP_RIGHT: [MapSymbol; 6] = [
    MapSymbol::TopLeftCorner,
    MapSymbol::TopRightCorner,
    MapSymbol::BottomRightCorner,
    MapSymbol::TeeDown,
    MapSymbol::TeeLeft,
    MapSymbol::CrossWall,
];
const CROSS_BOTTOM_RIGHT: [MapSymbol; 6] = [
    MapSymbol::TopRightCorner,
    MapSymbol::BottomRightCorner,
    MapSymbol::BottomLeftCorner,
    MapSymbol::TeeLeft,
    MapSymbol::TeeUp,
    MapSymbol::CrossWall,
];

/// Picks the symbol for a wall of `shape` seen from `seen` under `mode`.
///
/// A wall never seen from anywhere is stone. Combinations with no defined
/// symbol return an error; callers render stone in that case.
pub fn resolve_wall_symbol(
    shape: WallShape,
    mode: WallMode,
    seen: SeenDirections,
) -> Result<MapSymbol, DisplayError> {
    if seen.is_empty() {
        return Ok(MapSymbol::Stone);
    }
    if !mode.fits(shape) {
        return Err(DisplayError::WallModeMismatch { shape, mode });
    }

    match shape {
        WallShape::Vertical => Ok(straight(
            MapSymbol::VerticalWall,
            mode,
            seen,
            SV1 | SV2 | SV3 | SV4 | SV5,
            SV0 | SV1 | SV5 | SV6 | SV7,
        )),
        WallShape::Horizontal => Ok(straight(
            MapSymbol::HorizontalWall,
            mode,
            seen,
            SV3 | SV4 | SV5 | SV6 | SV7,
            SV0 | SV1 | SV2 | SV3 | SV7,
        )),
        WallShape::TopLeftCorner => Ok(corner(
            MapSymbol::TopLeftCorner,
            mode,
            seen,
            SV3 | SV4 | SV5,
            SV4,
        )),
        WallShape::TopRightCorner => Ok(corner(
            MapSymbol::TopRightCorner,
            mode,
            seen,
            SV5 | SV6 | SV7,
            SV6,
        )),
        WallShape::BottomLeftCorner => Ok(corner(
            MapSymbol::BottomLeftCorner,
            mode,
            seen,
            SV1 | SV2 | SV3,
            SV2,
        )),
        WallShape::BottomRightCorner => Ok(corner(
            MapSymbol::BottomRightCorner,
            mode,
            seen,
            SV7 | SV0 | SV1,
            SV0,
        )),
        WallShape::TeeDown => tee(&TEE_DOWN, mode, seen, shape),
        WallShape::TeeLeft => tee(&TEE_LEFT, mode, seen.rotated_ccw(1), shape),
        WallShape::TeeUp => tee(&TEE_UP, mode, seen.rotated_ccw(2), shape),
        WallShape::TeeRight => tee(&TEE_RIGHT, mode, seen.rotated_ccw(3), shape),
        WallShape::Cross => cross(mode, seen),
    }
}

fn straight(
    symbol: MapSymbol,
    mode: WallMode,
    seen: SeenDirections,
    left_exterior: SeenDirections,
    right_exterior: SeenDirections,
) -> MapSymbol {
    let visible = match mode {
        WallMode::ExteriorLeft => seen.intersects(left_exterior),
        WallMode::ExteriorRight => seen.intersects(right_exterior),
        _ => true,
    };
    if visible { symbol } else { MapSymbol::Stone }
}

fn corner(
    symbol: MapSymbol,
    mode: WallMode,
    seen: SeenDirections,
    outer: SeenDirections,
    inner: SeenDirections,
) -> MapSymbol {
    let visible = match mode {
        WallMode::CornerOuter => seen.intersects(outer),
        WallMode::CornerInner => !seen.difference(inner).is_empty(),
        _ => true,
    };
    if visible { symbol } else { MapSymbol::Stone }
}

/// `seen` has already been rotated so the T points down.
fn tee(
    row: &[MapSymbol; 5],
    mode: WallMode,
    seen: SeenDirections,
    shape: WallShape,
) -> Result<MapSymbol, DisplayError> {
    let column = match mode {
        WallMode::TeeLong => {
            if seen.intersects(SV3 | SV4) && !seen.intersects(SV5 | SV6 | SV7) {
                TeeColumn::LeftCorner
            } else if seen.intersects(SV6 | SV7) && !seen.intersects(SV3 | SV4 | SV5) {
                TeeColumn::RightCorner
            } else if seen.contains(SV5)
                || (seen.intersects(SV3 | SV4) && seen.intersects(SV6 | SV7))
            {
                TeeColumn::Tee
            } else if seen.only(SV0 | SV1 | SV2) {
                TeeColumn::Stone
            } else {
                return Err(DisplayError::WallPattern { shape, mode, seen });
            }
        }
        WallMode::TeeBottomLeft => {
            if seen.only(SV4 | SV5) {
                TeeColumn::LeftCorner
            } else if seen.intersects(SV0 | SV1 | SV2 | SV7) && !seen.intersects(SV3 | SV4 | SV5) {
                TeeColumn::Bar
            } else if seen.only(SV6) {
                TeeColumn::Stone
            } else {
                TeeColumn::Tee
            }
        }
        WallMode::TeeBottomRight => {
            if seen.only(SV5 | SV6) {
                TeeColumn::RightCorner
            } else if seen.intersects(SV0 | SV1 | SV2 | SV3) && !seen.intersects(SV5 | SV6 | SV7) {
                TeeColumn::Bar
            } else if seen.only(SV4) {
                TeeColumn::Stone
            } else {
                TeeColumn::Tee
            }
        }
        _ => {
            if seen == SV4 || seen == SV6 {
                TeeColumn::Stone
            } else if seen.intersects(SV3 | SV5 | SV7) || seen.contains(SV4 | SV6) {
                TeeColumn::Tee
            } else if seen.intersects(SV0 | SV1 | SV2) {
                if seen.intersects(SV4 | SV6) {
                    TeeColumn::Tee
                } else {
                    TeeColumn::Bar
                }
            } else {
                return Err(DisplayError::WallPattern { shape, mode, seen });
            }
        }
    };
    Ok(row[column as usize])
}

fn cross(mode: WallMode, seen: SeenDirections) -> Result<MapSymbol, DisplayError> {
    let symbol = match mode {
        WallMode::CrossTopLeft => cross_quadrant(&CROSS_TOP_LEFT, mode, seen.rotated_ccw(2))?,
        WallMode::CrossTopRight => cross_quadrant(&CROSS_TOP_RIGHT, mode, seen.rotated_ccw(3))?,
        WallMode::CrossBottomLeft => {
            cross_quadrant(&CROSS_BOTTOM_LEFT, mode, seen.rotated_ccw(1))?
        }
        WallMode::CrossBottomRight => cross_quadrant(&CROSS_BOTTOM_RIGHT, mode, seen)?,
        WallMode::CrossTopLeftBottomRight => {
            if seen.only(SV1 | SV2 | SV3) {
                MapSymbol::BottomLeftCorner
            } else if seen.only(SV5 | SV6 | SV7) {
                MapSymbol::TopRightCorner
            } else if seen.only(SV3 | SV4 | SV5) || seen.only(SV7 | SV0 | SV1) {
                MapSymbol::Stone
            } else {
                MapSymbol::CrossWall
            }
        }
        WallMode::CrossBottomLeftTopRight => {
            if seen.only(SV0 | SV1 | SV7) {
                MapSymbol::BottomRightCorner
            } else if seen.only(SV3 | SV4 | SV5) {
                MapSymbol::TopLeftCorner
            } else if seen.only(SV1 | SV2 | SV3) || seen.only(SV5 | SV6 | SV7) {
                MapSymbol::Stone
            } else {
                MapSymbol::CrossWall
            }
        }
        _ => cross_finished(seen),
    };
    Ok(symbol)
}

fn cross_finished(seen: SeenDirections) -> MapSymbol {
    let arm = |bits: SeenDirections, middle: SeenDirections, ends: SeenDirections| {
        bits.contains(seen) && (seen.contains(middle) || seen == ends)
    };
    if seen == SV0 {
        MapSymbol::BottomRightCorner
    } else if seen == SV2 {
        MapSymbol::BottomLeftCorner
    } else if seen == SV4 {
        MapSymbol::TopLeftCorner
    } else if seen == SV6 {
        MapSymbol::TopRightCorner
    } else if arm(SV0 | SV1 | SV2, SV1, SV0 | SV2) {
        MapSymbol::TeeUp
    } else if arm(SV2 | SV3 | SV4, SV3, SV2 | SV4) {
        MapSymbol::TeeRight
    } else if arm(SV4 | SV5 | SV6, SV5, SV4 | SV6) {
        MapSymbol::TeeDown
    } else if arm(SV0 | SV6 | SV7, SV7, SV0 | SV6) {
        MapSymbol::TeeLeft
    } else {
        MapSymbol::CrossWall
    }
}

/// `seen` has already been rotated so the solid quadrant is bottom right.
fn cross_quadrant(
    row: &[MapSymbol; 6],
    mode: WallMode,
    seen: SeenDirections,
) -> Result<MapSymbol, DisplayError> {
    if seen == SV4 {
        return Ok(MapSymbol::Stone);
    }
    let rest = seen.difference(SV4);
    let column = if rest == SV0 {
        CrossColumn::BottomRightCorner
    } else if rest.intersects(SV2 | SV3) {
        if rest.intersects(SV5 | SV6 | SV7) {
            CrossColumn::Cross
        } else if rest.intersects(SV0 | SV1) {
            CrossColumn::UpTee
        } else {
            CrossColumn::BottomLeftCorner
        }
    } else if rest.intersects(SV5 | SV6) {
        if rest.intersects(SV1 | SV2 | SV3) {
            CrossColumn::Cross
        } else if rest.intersects(SV0 | SV7) {
            CrossColumn::LeftTee
        } else {
            CrossColumn::TopRightCorner
        }
    } else if rest.contains(SV1) {
        if rest.contains(SV7) {
            CrossColumn::Cross
        } else {
            CrossColumn::UpTee
        }
    } else if rest.contains(SV7) {
        CrossColumn::LeftTee
    } else {
        return Err(DisplayError::WallPattern {
            shape: WallShape::Cross,
            mode,
            seen,
        });
    };
    Ok(row[column as usize])
}

/// Junction modes for every wall tile of a level, computed from the terrain
/// around each wall.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallModes {
    dimensions: MapDimensions,
    modes: Vec<WallMode>,
}

impl WallModes {
    /// Every wall finished on all sides.
    pub fn finished(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            modes: vec![WallMode::Finished; dimensions.area()],
        }
    }

    /// Classifies every wall of the level.
    pub fn scan(map: &dyn MapOracle) -> Self {
        let mut walls = Self::finished(map.dimensions());
        for position in map.dimensions().positions() {
            walls.classify(map, position);
        }
        walls
    }

    /// Recomputes the modes around `position` after its terrain changed.
    pub fn rescan_tile(&mut self, map: &dyn MapOracle, position: Position) {
        for neighbour in position.neighbourhood() {
            self.classify(map, neighbour);
        }
    }

    pub fn mode(&self, position: Position) -> WallMode {
        self.dimensions
            .index(position)
            .map(|index| self.modes[index])
            .unwrap_or_default()
    }

    pub fn set_mode(&mut self, position: Position, mode: WallMode) {
        if let Some(index) = self.dimensions.index(position) {
            self.modes[index] = mode;
        }
    }

    fn classify(&mut self, map: &dyn MapOracle, position: Position) {
        let Some(index) = self.dimensions.index(position) else {
            return;
        };
        let Some(shape) = map.terrain(position).and_then(|terrain| terrain.wall_shape()) else {
            return;
        };
        self.modes[index] = wall_mode_for(map, position, shape);
    }
}

/// Open-ended neighbours count as rock: off the map, solid terrain, corridors.
fn exposed(map: &dyn MapOracle, x: i32, y: i32) -> bool {
    match map.terrain(Position::new(x, y)) {
        None => true,
        Some(terrain) => terrain.is_rock() || terrain.is_corridor(),
    }
}

fn wall_mode_for(map: &dyn MapOracle, position: Position, shape: WallShape) -> WallMode {
    let Position { x, y } = position;
    let at = |dx: i32, dy: i32| exposed(map, x + dx, y + dy);

    let mode = match shape {
        WallShape::Vertical => straight_mode(at(-1, 0), at(1, 0)),
        WallShape::Horizontal => straight_mode(at(0, -1), at(0, 1)),
        WallShape::TeeDown => tee_mode(at(0, -1), at(-1, 1), at(1, 1)),
        WallShape::TeeUp => tee_mode(at(0, 1), at(1, -1), at(-1, -1)),
        WallShape::TeeLeft => tee_mode(at(1, 0), at(-1, -1), at(-1, 1)),
        WallShape::TeeRight => tee_mode(at(-1, 0), at(1, 1), at(1, -1)),
        WallShape::TopLeftCorner => corner_mode([at(-1, -1), at(0, -1), at(-1, 0)], at(1, 1)),
        WallShape::TopRightCorner => corner_mode([at(0, -1), at(1, -1), at(1, 0)], at(-1, 1)),
        WallShape::BottomLeftCorner => corner_mode([at(0, 1), at(-1, 1), at(-1, 0)], at(1, -1)),
        WallShape::BottomRightCorner => corner_mode([at(1, 0), at(1, 1), at(0, 1)], at(-1, -1)),
        WallShape::Cross => cross_mode(at(-1, -1), at(1, -1), at(1, 1), at(-1, 1)),
    };
    if mode.is_none() {
        debug!(%position, ?shape, "ambiguous wall neighbourhood, treating as finished");
    }
    mode.unwrap_or_default()
}

/// `None` when more than one side is exposed.
fn straight_mode(first: bool, second: bool) -> Option<WallMode> {
    match (first, second) {
        (true, true) => None,
        (true, false) => Some(WallMode::ExteriorLeft),
        (false, true) => Some(WallMode::ExteriorRight),
        (false, false) => Some(WallMode::Finished),
    }
}

fn tee_mode(long: bool, bottom_left: bool, bottom_right: bool) -> Option<WallMode> {
    match (long, bottom_left, bottom_right) {
        (false, false, false) => Some(WallMode::Finished),
        (true, false, false) => Some(WallMode::TeeLong),
        (false, true, false) => Some(WallMode::TeeBottomLeft),
        (false, false, true) => Some(WallMode::TeeBottomRight),
        _ => None,
    }
}

/// All three outer neighbours exposed, or the inner diagonal exposed. A
/// partially exposed outside cannot be drawn and counts as finished.
fn corner_mode(outer: [bool; 3], inner: bool) -> Option<WallMode> {
    if inner {
        Some(WallMode::CornerInner)
    } else if outer.iter().all(|exposed| *exposed) {
        Some(WallMode::CornerOuter)
    } else {
        Some(WallMode::Finished)
    }
}

fn cross_mode(
    top_left: bool,
    top_right: bool,
    bottom_right: bool,
    bottom_left: bool,
) -> Option<WallMode> {
    match (top_left, top_right, bottom_right, bottom_left) {
        (false, false, false, false) => Some(WallMode::Finished),
        (true, false, false, false) => Some(WallMode::CrossTopLeft),
        (false, true, false, false) => Some(WallMode::CrossTopRight),
        (false, false, true, false) => Some(WallMode::CrossBottomRight),
        (false, false, false, true) => Some(WallMode::CrossBottomLeft),
        (true, false, true, false) => Some(WallMode::CrossTopLeftBottomRight),
        (false, true, false, true) => Some(WallMode::CrossBottomLeftTopRight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::LevelSnapshot;

    fn bits(octants: &[u32]) -> SeenDirections {
        octants
            .iter()
            .fold(SeenDirections::empty(), |acc, n| acc | SeenDirections::octant(*n))
    }

    #[test]
    fn unseen_walls_are_stone() {
        for mode in [WallMode::Finished, WallMode::TeeLong] {
            assert_eq!(
                resolve_wall_symbol(WallShape::TeeDown, mode, SeenDirections::empty()),
                Ok(MapSymbol::Stone)
            );
        }
    }

    #[test]
    fn straight_wall_hidden_from_its_rock_side() {
        let from_left = bits(&[7]);
        assert_eq!(
            resolve_wall_symbol(WallShape::Vertical, WallMode::ExteriorLeft, from_left),
            Ok(MapSymbol::Stone)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::Vertical, WallMode::ExteriorRight, from_left),
            Ok(MapSymbol::VerticalWall)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::Horizontal, WallMode::ExteriorLeft, bits(&[5])),
            Ok(MapSymbol::HorizontalWall)
        );
    }

    #[test]
    fn tee_seen_from_the_bar_side_is_a_straight_wall() {
        assert_eq!(
            resolve_wall_symbol(WallShape::TeeDown, WallMode::Finished, bits(&[1])),
            Ok(MapSymbol::HorizontalWall)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::TeeDown, WallMode::Finished, bits(&[5])),
            Ok(MapSymbol::TeeDown)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::TeeDown, WallMode::Finished, bits(&[4])),
            Ok(MapSymbol::Stone)
        );
    }

    #[test]
    fn long_tee_seen_from_one_side_is_a_corner() {
        assert_eq!(
            resolve_wall_symbol(WallShape::TeeDown, WallMode::TeeLong, bits(&[3, 4])),
            Ok(MapSymbol::TopLeftCorner)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::TeeDown, WallMode::TeeLong, bits(&[6])),
            Ok(MapSymbol::TopRightCorner)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::TeeDown, WallMode::TeeLong, bits(&[0, 1])),
            Ok(MapSymbol::Stone)
        );
    }

    #[test]
    fn rotated_tee_matches_turned_down_tee() {
        // A left-pointing tee seen from the east behaves like a down tee seen
        // from the north, turned a quarter clockwise.
        assert_eq!(
            resolve_wall_symbol(WallShape::TeeLeft, WallMode::Finished, bits(&[3])),
            Ok(MapSymbol::VerticalWall)
        );
    }

    #[test]
    fn corner_modes_follow_exposed_faces() {
        assert_eq!(
            resolve_wall_symbol(WallShape::TopLeftCorner, WallMode::CornerOuter, bits(&[0])),
            Ok(MapSymbol::Stone)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::TopLeftCorner, WallMode::CornerInner, bits(&[4])),
            Ok(MapSymbol::Stone)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::TopLeftCorner, WallMode::CornerInner, bits(&[3, 4])),
            Ok(MapSymbol::TopLeftCorner)
        );
    }

    #[test]
    fn finished_cross_from_single_diagonal_is_a_corner() {
        assert_eq!(
            resolve_wall_symbol(WallShape::Cross, WallMode::Finished, bits(&[0])),
            Ok(MapSymbol::BottomRightCorner)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::Cross, WallMode::Finished, bits(&[0, 1, 2])),
            Ok(MapSymbol::TeeUp)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::Cross, WallMode::Finished, bits(&[1, 5])),
            Ok(MapSymbol::CrossWall)
        );
    }

    #[test]
    fn quadrant_cross_from_the_solid_side_is_stone() {
        assert_eq!(
            resolve_wall_symbol(WallShape::Cross, WallMode::CrossBottomRight, bits(&[4])),
            Ok(MapSymbol::Stone)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::Cross, WallMode::CrossBottomRight, bits(&[2, 3])),
            Ok(MapSymbol::BottomLeftCorner)
        );
        assert_eq!(
            resolve_wall_symbol(WallShape::Cross, WallMode::CrossTopLeft, bits(&[0])),
            Ok(MapSymbol::Stone)
        );
    }

    #[test]
    fn mode_from_wrong_family_is_rejected() {
        let err = resolve_wall_symbol(WallShape::Vertical, WallMode::TeeLong, bits(&[1]))
            .unwrap_err();
        assert_eq!(
            err,
            DisplayError::WallModeMismatch {
                shape: WallShape::Vertical,
                mode: WallMode::TeeLong
            }
        );
    }

    #[test]
    fn scan_classifies_room_walls() {
        let level = LevelSnapshot::from_rows(&[
            "┌──┬──┐",
            "│..│..│",
            "├──┼──┤",
            "│..│..│",
            "└──┴──┘",
        ])
        .unwrap();
        let walls = WallModes::scan(&level);

        // Outer walls face rock.
        assert_eq!(walls.mode(Position::new(1, 0)), WallMode::ExteriorLeft);
        assert_eq!(walls.mode(Position::new(1, 4)), WallMode::ExteriorRight);
        assert_eq!(walls.mode(Position::new(0, 1)), WallMode::ExteriorLeft);
        assert_eq!(walls.mode(Position::new(0, 0)), WallMode::CornerOuter);
        assert_eq!(walls.mode(Position::new(3, 0)), WallMode::TeeLong);
        // Interior cross has floor in every quadrant.
        assert_eq!(walls.mode(Position::new(3, 2)), WallMode::Finished);
    }

    #[test]
    fn rescan_picks_up_dug_out_neighbour() {
        let mut level = LevelSnapshot::from_rows(&["...", "─┬─", "..."]).unwrap();
        let mut walls = WallModes::scan(&level);
        assert_eq!(walls.mode(Position::new(1, 1)), WallMode::Finished);

        level.set_terrain(Position::new(1, 0), game_core::TerrainKind::Corridor);
        walls.rescan_tile(&level, Position::new(1, 0));
        assert_eq!(walls.mode(Position::new(1, 1)), WallMode::TeeLong);
    }
}
