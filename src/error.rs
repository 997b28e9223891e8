//! Error types for the qttt crate

use thiserror::Error;

/// Main error type for the qttt crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: position {position} is already occupied")]
    IllegalMove { position: usize },

    #[error("position {position} is out of bounds (board has {cells} cells)")]
    InvalidPosition { position: usize, cells: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_display() {
        let err = Error::IllegalMove { position: 4 };
        assert_eq!(
            err.to_string(),
            "illegal move: position 4 is already occupied"
        );
    }

    #[test]
    fn test_invalid_position_display() {
        let err = Error::InvalidPosition {
            position: 9,
            cells: 9,
        };
        assert_eq!(
            err.to_string(),
            "position 9 is out of bounds (board has 9 cells)"
        );
    }
}
