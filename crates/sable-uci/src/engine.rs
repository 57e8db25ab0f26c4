//! The UCI session loop.
//!
//! One command runs to completion before the next line is read; the
//! search is an uninterruptible CPU routine, so there is no worker thread
//! and no mid-search `stop`. Responses go to stdout, logs to `tracing`.

use std::io::{self, BufRead};

use tracing::{debug, warn};

use sable_engine::Game;

use crate::command::{Command, parse_command};
use crate::error::UciError;

const ENGINE_NAME: &str = concat!("sable ", env!("CARGO_PKG_VERSION"));
const ENGINE_AUTHOR: &str = "the sable authors";

/// What a handled command produced: lines for stdout, and whether the
/// session should end.
struct Response {
    lines: Vec<String>,
    quit: bool,
}

impl Response {
    fn lines(lines: Vec<String>) -> Response {
        Response { lines, quit: false }
    }

    fn empty() -> Response {
        Response {
            lines: Vec::new(),
            quit: false,
        }
    }

    fn quit() -> Response {
        Response {
            lines: Vec::new(),
            quit: true,
        }
    }
}

/// The UCI front end, owning the current game.
pub struct UciEngine {
    game: Game,
}

impl UciEngine {
    /// Create an engine holding a fresh game.
    pub fn new() -> UciEngine {
        UciEngine { game: Game::new() }
    }

    /// Read commands from stdin until `quit`/`stop` or end of input.
    pub fn run(mut self) -> Result<(), UciError> {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(command = trimmed, "received");

            let response = match parse_command(trimmed) {
                Ok(command) => self.respond(command),
                Err(error) => {
                    warn!(%error, "rejected command");
                    Response::empty()
                }
            };
            for out in &response.lines {
                println!("{out}");
            }
            if response.quit {
                break;
            }
        }
        Ok(())
    }

    /// Handle one parsed command. Failures inside `position` are logged
    /// and leave the current game untouched.
    fn respond(&mut self, command: Command) -> Response {
        match command {
            Command::Uci => Response::lines(vec![
                format!("id name {ENGINE_NAME}"),
                format!("id author {ENGINE_AUTHOR}"),
                "uciok".to_string(),
            ]),
            Command::IsReady => Response::lines(vec!["readyok".to_string()]),
            Command::UciNewGame => {
                self.game = Game::new();
                Response::empty()
            }
            Command::Position { fen, moves } => {
                match Self::build_game(fen.as_deref(), &moves) {
                    Ok(game) => self.game = game,
                    Err(error) => warn!(%error, "position rejected"),
                }
                Response::empty()
            }
            Command::Go { depth } => Response::lines(self.go(depth)),
            Command::Stop | Command::Quit => Response::quit(),
            Command::Unknown(token) => {
                debug!(token, "ignoring unknown command");
                Response::empty()
            }
        }
    }

    /// Build a game from scratch for a `position` command, replaying the
    /// move list so the repetition set matches the game history.
    fn build_game(fen: Option<&str>, moves: &[String]) -> Result<Game, UciError> {
        let mut game = match fen {
            Some(fen) => Game::from_fen(fen)?,
            None => Game::new(),
        };
        for text in moves {
            game.apply_external_move(text)?;
        }
        Ok(game)
    }

    /// Run a search and format the `info` and `bestmove` lines.
    fn go(&mut self, depth: Option<u8>) -> Vec<String> {
        if let Some(depth) = depth {
            self.game.set_search_depth(depth);
        }

        let best = self.game.make_engine_move();
        let mut lines = Vec::new();

        if let Some(report) = self.game.last_search() {
            let millis = report.elapsed.as_millis().max(1);
            let nps = report.nodes as u128 * 1000 / millis;
            let pv: Vec<String> = report.pv.iter().map(|m| m.to_uci()).collect();
            lines.push(format!(
                "info depth {} score cp {} nodes {} nps {} time {} pv {}",
                self.game.search_depth(),
                centipawns(report.score),
                report.nodes,
                nps,
                millis,
                pv.join(" "),
            ));
        }

        match best {
            Some(mv) => lines.push(format!("bestmove {}", mv.to_uci())),
            None => lines.push("bestmove 0000".to_string()),
        }
        lines
    }
}

impl Default for UciEngine {
    fn default() -> UciEngine {
        UciEngine::new()
    }
}

/// Convert a pawn-unit score to centipawns, clamping the checkmate
/// sentinel into a finite display range.
fn centipawns(score: f32) -> i64 {
    (score * 100.0).clamp(-1_000_000.0, 1_000_000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::{UciEngine, centipawns};
    use crate::command::parse_command;

    fn respond(engine: &mut UciEngine, line: &str) -> (Vec<String>, bool) {
        let response = engine.respond(parse_command(line).unwrap());
        (response.lines, response.quit)
    }

    #[test]
    fn uci_handshake() {
        let mut engine = UciEngine::new();
        let (lines, quit) = respond(&mut engine, "uci");
        assert!(lines[0].starts_with("id name sable"));
        assert!(lines[1].starts_with("id author"));
        assert_eq!(lines.last().unwrap(), "uciok");
        assert!(!quit);
    }

    #[test]
    fn isready_answers_readyok() {
        let mut engine = UciEngine::new();
        let (lines, _) = respond(&mut engine, "isready");
        assert_eq!(lines, vec!["readyok"]);
    }

    #[test]
    fn go_emits_info_and_bestmove() {
        let mut engine = UciEngine::new();
        respond(&mut engine, "position startpos moves e2e4 e7e5");
        let (lines, _) = respond(&mut engine, "go depth 2");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("info depth 2 score cp "));
        assert!(lines[0].contains(" pv "));
        assert!(lines[1].starts_with("bestmove "));
        assert_ne!(lines[1], "bestmove 0000");
    }

    #[test]
    fn go_on_a_mated_position_reports_no_move() {
        let mut engine = UciEngine::new();
        respond(&mut engine, "position fen R3k3/8/4K3/8/8/8/8/8 b - - 0 1");
        let (lines, _) = respond(&mut engine, "go depth 2");
        assert_eq!(lines.last().unwrap(), "bestmove 0000");
    }

    #[test]
    fn bad_position_keeps_the_previous_game() {
        let mut engine = UciEngine::new();
        respond(&mut engine, "position startpos moves e2e4");
        // An illegal move list must not clobber the game set up above.
        respond(&mut engine, "position startpos moves e2e5");
        let (lines, _) = respond(&mut engine, "go depth 1");
        assert!(lines.last().unwrap().starts_with("bestmove "));
    }

    #[test]
    fn stop_and_quit_end_the_session() {
        let mut engine = UciEngine::new();
        let (_, quit) = respond(&mut engine, "stop");
        assert!(quit);
        let mut engine = UciEngine::new();
        let (_, quit) = respond(&mut engine, "quit");
        assert!(quit);
    }

    #[test]
    fn unknown_commands_are_silent() {
        let mut engine = UciEngine::new();
        let (lines, quit) = respond(&mut engine, "xyzzy");
        assert!(lines.is_empty());
        assert!(!quit);
    }

    #[test]
    fn centipawn_conversion_clamps_the_sentinel() {
        assert_eq!(centipawns(1.0), 100);
        assert_eq!(centipawns(-2.5), -250);
        assert_eq!(centipawns(f32::MAX), 1_000_000);
        assert_eq!(centipawns(-f32::MAX), -1_000_000);
    }
}
