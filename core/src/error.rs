use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Pixel ({0}, {1}) is outside the field")]
    PixelOutOfBounds(i32, i32),
    #[error("Field needs at least one mine")]
    NoMines,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Tile already holds a mine")]
    MineAlreadyPlaced,
    #[error("Adjacent mine count already set")]
    AdjacentCountAlreadySet,
}

pub type Result<T> = core::result::Result<T, GameError>;
