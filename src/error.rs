use thiserror::Error;

/// Errors.
///    Error 1: Move name outside the 18 face generators
///    Error 2: A corner or edge color set does not match any cubie
///    Error 3: Decoded state violates a physical invariant
///    Error 4: Pattern database cache files missing or stale
///    Error 5: Invalid color/corner/edge value
///    Error 6: I/O or metadata codec failure while persisting a database
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown move `{0}`")]
    UnknownMove(String),
    #[error("sticker grid is not decodable: {0}")]
    InvalidSticker(String),
    #[error("state violates a physical invariant")]
    InvalidState,
    #[error("pattern database unavailable: {0}")]
    PdbNotFound(String),
    #[error("invalid color value")]
    InvalidColor,
    #[error("invalid corner value")]
    InvalidCorner,
    #[error("invalid edge value")]
    InvalidEdge,
    #[error("io error")]
    Io(#[from] std::io::Error),
    #[error("metadata codec error")]
    Meta(#[from] bincode::Error),
}
