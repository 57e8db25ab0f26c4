//! UCI command parsing.

use crate::error::UciError;

/// A parsed UCI command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- discard the current game.
    UciNewGame,
    /// `position startpos|fen <fen> [moves ...]` -- set up a position.
    Position {
        /// The FEN string, or `None` for the starting position.
        fen: Option<String>,
        /// Coordinate moves to apply after setup.
        moves: Vec<String>,
    },
    /// `go [depth N]` -- search and reply with a best move.
    Go {
        /// Search depth override, if given.
        depth: Option<u8>,
    },
    /// `stop` -- end the session.
    Stop,
    /// `quit` -- end the session.
    Quit,
    /// Anything unrecognized (ignored, per protocol).
    Unknown(String),
}

/// Parse one line of UCI input.
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match head {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "position" => parse_position(&tokens[1..]),
        "go" => parse_go(&tokens[1..]),
        other => Ok(Command::Unknown(other.to_string())),
    }
}

/// Parse `position startpos [moves ...]` or `position fen <6 fields> [moves ...]`.
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    let (fen, rest) = match tokens.first() {
        Some(&"startpos") => (None, &tokens[1..]),
        Some(&"fen") => {
            if tokens.len() < 7 {
                return Err(UciError::TruncatedFen {
                    text: tokens[1..].join(" "),
                });
            }
            (Some(tokens[1..7].join(" ")), &tokens[7..])
        }
        _ => return Err(UciError::MalformedPosition),
    };

    let moves = match rest.first() {
        Some(&"moves") => rest[1..].iter().map(|s| s.to_string()).collect(),
        _ => Vec::new(),
    };

    Ok(Command::Position { fen, moves })
}

/// Parse the `go` arguments. Only `depth N` is meaningful; other
/// subcommands (`infinite`, clock fields) are accepted and ignored.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut depth = None;

    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] == "depth" && i + 1 < tokens.len() {
            let value = tokens[i + 1];
            depth = Some(value.parse::<u8>().map_err(|_| UciError::InvalidDepth {
                value: value.to_string(),
            })?);
            i += 2;
        } else {
            i += 1;
        }
    }

    Ok(Command::Go { depth })
}

#[cfg(test)]
mod tests {
    use super::{Command, parse_command};

    #[test]
    fn bare_commands() {
        assert_eq!(parse_command("uci").unwrap(), Command::Uci);
        assert_eq!(parse_command("isready").unwrap(), Command::IsReady);
        assert_eq!(parse_command("ucinewgame").unwrap(), Command::UciNewGame);
        assert_eq!(parse_command("stop").unwrap(), Command::Stop);
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn position_startpos() {
        let cmd = parse_command("position startpos").unwrap();
        assert_eq!(
            cmd,
            Command::Position {
                fen: None,
                moves: vec![]
            }
        );
    }

    #[test]
    fn position_startpos_with_moves() {
        let cmd = parse_command("position startpos moves e2e4 e7e5").unwrap();
        match cmd {
            Command::Position { fen, moves } => {
                assert!(fen.is_none());
                assert_eq!(moves, vec!["e2e4", "e7e5"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn position_fen_collects_six_fields() {
        let cmd = parse_command(
            "position fen r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 4 20 moves e1g1",
        )
        .unwrap();
        match cmd {
            Command::Position { fen, moves } => {
                assert_eq!(fen.as_deref(), Some("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 4 20"));
                assert_eq!(moves, vec!["e1g1"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn position_fen_too_short_is_an_error() {
        assert!(parse_command("position fen 8/8").is_err());
        assert!(parse_command("position").is_err());
        assert!(parse_command("position sidepos").is_err());
    }

    #[test]
    fn go_with_and_without_depth() {
        assert_eq!(parse_command("go").unwrap(), Command::Go { depth: None });
        assert_eq!(
            parse_command("go depth 4").unwrap(),
            Command::Go { depth: Some(4) }
        );
        assert_eq!(
            parse_command("go infinite").unwrap(),
            Command::Go { depth: None }
        );
    }

    #[test]
    fn go_with_bad_depth_is_an_error() {
        assert!(parse_command("go depth many").is_err());
    }

    #[test]
    fn unknown_commands_pass_through() {
        assert_eq!(
            parse_command("xyzzy now").unwrap(),
            Command::Unknown("xyzzy".to_string())
        );
        assert_eq!(parse_command("").unwrap(), Command::Unknown(String::new()));
    }
}
