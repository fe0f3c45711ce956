//! Error type shared by the whole crate.

/// Everything that can go wrong inside the covering/reveal core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A polygon needs at least three vertices.
    #[error("invalid polygon: {vertices} vertices, need at least 3")]
    InvalidPolygon { vertices: usize },

    /// The average tile would fall below the minimum tile area.
    #[error("too many tiles: {requested} requested, at most {max} fit")]
    TooManyTiles { requested: usize, max: usize },

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
