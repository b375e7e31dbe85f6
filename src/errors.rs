use thiserror::Error;

/// Errors raised while loading levels.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level text cannot be turned into a playable board.
    #[error("malformed level: {0}")]
    Malformed(MalformedReason),

    /// A level pack file could not be read.
    #[error("cannot read level pack: {0}")]
    Io(#[from] std::io::Error),

    /// A level pack file is not valid JSON for the expected schema.
    #[error("invalid level pack: {0}")]
    Json(#[from] serde_json::Error),

    /// A level pack does not define any level for the requested tier.
    #[error("no levels defined for {0}")]
    EmptyTier(String),

    /// A solution string contains a character outside of `udlrUDLR`.
    #[error("invalid solution character '{0}'")]
    InvalidSolution(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("layout has no rows")]
    NoRows,
    #[error("layout has no player")]
    MissingPlayer,
    #[error("layout has more than one player")]
    MultiplePlayers,
    #[error("board dimensions are invalid")]
    InvalidDimensions,
    #[error("mine count does not fit on the board")]
    TooManyMines,
    #[error("level is solved before any move")]
    AlreadySolved,
}

impl From<MalformedReason> for LevelError {
    fn from(reason: MalformedReason) -> Self {
        LevelError::Malformed(reason)
    }
}
