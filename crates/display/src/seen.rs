//! Seen-direction bit set.
//!
//! One bit per octant around a tile, numbered clockwise from the top left:
//!
//! ```text
//!     0 1 2
//!     7 x 3
//!     6 5 4
//! ```
//!
//! A bit is set once the viewer has looked at the tile from that octant.
//! Walls use the accumulated set to decide which faces the viewer knows.

use bitflags::bitflags;

use game_core::Position;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SeenDirections: u8 {
        const NW = 1 << 0;
        const N  = 1 << 1;
        const NE = 1 << 2;
        const E  = 1 << 3;
        const SE = 1 << 4;
        const S  = 1 << 5;
        const SW = 1 << 6;
        const W  = 1 << 7;
    }
}

/// Octant looked up by `[sign(viewer.y - y) + 1][sign(x - viewer.x) + 1]`.
const SEEN_MATRIX: [[SeenDirections; 3]; 3] = [
    [SeenDirections::NE, SeenDirections::N, SeenDirections::NW],
    [SeenDirections::E, SeenDirections::all(), SeenDirections::W],
    [SeenDirections::SE, SeenDirections::S, SeenDirections::SW],
];

impl SeenDirections {
    pub const ALL: Self = Self::all();

    /// Octant bit for a tile at `tile` observed from `viewer`. Looking at the
    /// tile from the tile itself counts as every direction.
    pub fn from_viewer(viewer: Position, tile: Position) -> Self {
        let row = ((viewer.y - tile.y).signum() + 1) as usize;
        let col = ((tile.x - viewer.x).signum() + 1) as usize;
        SEEN_MATRIX[row][col]
    }

    /// Single bit `SVn`.
    pub const fn octant(index: u32) -> Self {
        Self::from_bits_retain(1u8 << (index % 8))
    }

    /// Rotates the viewpoint a quarter turn counter-clockwise `quarter_turns`
    /// times. A wall turned clockwise by the same amount sees the result.
    pub const fn rotated_ccw(self, quarter_turns: u32) -> Self {
        Self::from_bits_retain(self.bits().rotate_right(2 * (quarter_turns % 4)))
    }

    /// Every set bit lies within `mask`, and at least one is set.
    pub const fn only(self, mask: Self) -> bool {
        self.intersects(mask) && !self.intersects(mask.complement())
    }
}
