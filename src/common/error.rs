use thiserror::Error;

use super::metadata::ECLevel;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    #[error("data too long: {len} bytes do not fit any version at ec level {ec_level:?}")]
    DataTooLong { len: usize, ec_level: ECLevel },

    #[error("arena exhausted: requested {requested} bytes, {remaining} remaining")]
    ArenaExhausted { requested: usize, remaining: usize },

    #[error("invalid version {0}, expected 1..=40")]
    InvalidVersion(u8),

    #[error("invalid masking pattern {0}, expected 0..8")]
    InvalidMaskingPattern(u8),

    #[error("invalid error correction level {0:?}, expected one of L, M, Q, H")]
    InvalidECLevel(char),
}

pub type QRResult<T> = Result<T, QRError>;
