//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Errors raised while building or querying level data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Position is outside the map bounds.
    #[error("position {0} is out of map bounds")]
    PositionOutOfBounds(Position),

    /// Level text used a character with no terrain mapping.
    #[error("unknown terrain character {ch:?} at {position}")]
    UnknownTerrainChar { ch: char, position: Position },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::PositionOutOfBounds(_) => "ORACLE_POSITION_OUT_OF_BOUNDS",
            OracleError::UnknownTerrainChar { .. } => "ORACLE_UNKNOWN_TERRAIN_CHAR",
        }
    }
}
