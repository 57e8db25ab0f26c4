//! The long-lived game driver: position, history, repetition set, search.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use tracing::{debug, info};

use sable_core::{Board, FenError, Move, generate_legal_moves};

use crate::eval::is_checkmate_score;
use crate::search::{SearchReport, search};

/// Default search depth in plies.
pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

/// Errors from driving a game with external input.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The move text is not coordinate notation for this position.
    #[error("malformed move: \"{text}\"")]
    MalformedMove {
        /// The offending move text.
        text: String,
    },
    /// The move parses but is not among the legal moves.
    #[error("illegal move: \"{text}\"")]
    IllegalMove {
        /// The offending move text.
        text: String,
    },
    /// The game could not be set up from a FEN string.
    #[error("invalid FEN: {source}")]
    InvalidFen {
        /// The underlying FEN failure.
        #[from]
        source: FenError,
    },
}

/// A running game: the current position plus everything the search needs
/// that outlives a single position -- move history, the repetition hash
/// set, the seeded RNG behind the evaluation jitter, and the configured
/// search depth.
pub struct Game {
    board: Board,
    moves: Vec<Move>,
    position_hashes: HashSet<u64>,
    search_depth: u8,
    best_line: Vec<Move>,
    last_search: Option<SearchReport>,
    outcome: Option<Outcome>,
    rng: StdRng,
}

impl Game {
    /// Start a fresh game from the initial position, seeded from entropy.
    pub fn new() -> Game {
        let seed = rand::rng().next_u64();
        debug!(seed, "new game");
        Game::with_seed(seed)
    }

    /// Start a fresh game with a fixed RNG seed, for reproducible play.
    pub fn with_seed(seed: u64) -> Game {
        Game::from_board(Board::starting_position(), StdRng::seed_from_u64(seed))
    }

    /// Start a game from a FEN position, seeded from entropy.
    pub fn from_fen(fen: &str) -> Result<Game, GameError> {
        let board: Board = fen.parse()?;
        let seed = rand::rng().next_u64();
        Ok(Game::from_board(board, StdRng::seed_from_u64(seed)))
    }

    fn from_board(board: Board, rng: StdRng) -> Game {
        let mut position_hashes = HashSet::new();
        position_hashes.insert(board.hash());
        Game {
            board,
            moves: Vec::new(),
            position_hashes,
            search_depth: DEFAULT_SEARCH_DEPTH,
            best_line: Vec::new(),
            last_search: None,
            outcome: None,
            rng,
        }
    }

    /// The current position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves played so far, in order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The last move played, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    /// Hashes of every position reached in this game, the repetition set.
    pub fn position_hashes(&self) -> &HashSet<u64> {
        &self.position_hashes
    }

    /// The best line found by the most recent engine search.
    pub fn best_line(&self) -> &[Move] {
        &self.best_line
    }

    /// The full report of the most recent engine search.
    pub fn last_search(&self) -> Option<&SearchReport> {
        self.last_search.as_ref()
    }

    /// The configured search depth.
    pub fn search_depth(&self) -> u8 {
        self.search_depth
    }

    /// Override the search depth for subsequent engine moves.
    pub fn set_search_depth(&mut self, depth: u8) {
        self.search_depth = depth;
    }

    /// The result, once the game is decided.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// `true` once an outcome is recorded.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Apply a move given in coordinate text (e.g. "e2e4", "e7e8q").
    ///
    /// The text is resolved against the generated legal moves, so the
    /// applied move carries canonical capture/en-passant/promotion flags.
    /// On any error the game state is untouched.
    pub fn apply_external_move(&mut self, text: &str) -> Result<Move, GameError> {
        let parsed = Move::from_uci(text, &self.board).ok_or_else(|| GameError::MalformedMove {
            text: text.to_string(),
        })?;
        let mv = generate_legal_moves(&self.board)
            .into_iter()
            .find(|m| {
                m.source() == parsed.source()
                    && m.dest() == parsed.dest()
                    && m.promotion_piece() == parsed.promotion_piece()
            })
            .ok_or_else(|| GameError::IllegalMove {
                text: text.to_string(),
            })?;
        self.play(mv);
        Ok(mv)
    }

    /// Search the current position and play the best move found.
    ///
    /// Returns the move played, or `None` when the game is already over
    /// or the side to move has none (checkmate or stalemate, recorded in
    /// the outcome). A checkmate-sentinel score also records the outcome:
    /// once the search proves a mate, the game is decided.
    pub fn make_engine_move(&mut self) -> Option<Move> {
        if self.is_finished() {
            return None;
        }

        let report = search(
            &self.board,
            self.search_depth,
            &self.position_hashes,
            &mut self.rng,
        );

        if is_checkmate_score(report.score) {
            self.outcome = Some(if report.score > 0.0 {
                Outcome::WhiteWins
            } else {
                Outcome::BlackWins
            });
        }

        let chosen = report.pv.first().copied();
        match chosen {
            Some(mv) => {
                self.best_line = report.pv.clone();
                self.last_search = Some(report);
                self.play(mv);
                info!(mv = %mv, "engine move");
                Some(mv)
            }
            None => {
                // No legal move at the root. Mate was recorded above via
                // the sentinel; anything else is stalemate.
                if self.outcome.is_none() {
                    self.outcome = Some(Outcome::Draw);
                }
                self.last_search = Some(report);
                None
            }
        }
    }

    /// Play a validated move: update the board, history, repetition set.
    fn play(&mut self, mv: Move) {
        self.board = self.board.make_move(mv);
        self.moves.push(mv);
        self.position_hashes.insert(self.board.hash());
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
