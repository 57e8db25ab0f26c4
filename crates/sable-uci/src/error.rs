//! UCI protocol errors.

use sable_engine::GameError;

/// Errors from UCI command handling.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing `startpos` or `fen`.
    #[error("malformed position command: expected startpos or fen")]
    MalformedPosition,

    /// The `position fen` command does not carry six FEN fields.
    #[error("truncated FEN in position command: \"{text}\"")]
    TruncatedFen {
        /// What followed the `fen` keyword.
        text: String,
    },

    /// The `go depth` value is not a number.
    #[error("invalid depth: \"{value}\"")]
    InvalidDepth {
        /// The offending value.
        value: String,
    },

    /// Setting up or advancing the game failed.
    #[error(transparent)]
    Game {
        /// The underlying game error.
        #[from]
        source: GameError,
    },

    /// Reading from stdin failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::UciError;

    #[test]
    fn messages_name_the_offender() {
        let err = UciError::InvalidDepth {
            value: "deep".to_string(),
        };
        assert_eq!(format!("{err}"), "invalid depth: \"deep\"");

        let err = UciError::MalformedPosition;
        assert!(format!("{err}").contains("startpos"));
    }
}
