//! Evaluation, search, and the game driver.

pub mod eval;
mod game;
pub mod search;

pub use eval::{
    Activity, CHECKMATE_SCORE, EVAL_NOISE_SPAN, REPETITION_PENALTY, checkmate_score, evaluate,
    is_checkmate_score,
};
pub use game::{DEFAULT_SEARCH_DEPTH, Game, GameError, Outcome};
pub use search::{SearchReport, search};
