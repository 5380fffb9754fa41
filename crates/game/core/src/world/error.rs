use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The map has no terrain rows (or only empty ones). Nothing can be
    /// simulated or rendered without them.
    #[error("missing terrain data: the map needs at least one non-empty row of tiles")]
    MissingTerrain,
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            WorldError::MissingTerrain => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            WorldError::MissingTerrain => "WORLD_MISSING_TERRAIN",
        }
    }
}
