//! UCI protocol front end for sable.

pub mod command;
pub mod engine;
pub mod error;

pub use command::{Command, parse_command};
pub use engine::UciEngine;
pub use error::UciError;
