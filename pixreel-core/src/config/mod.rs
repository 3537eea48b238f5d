//! Configuration types
//!
//! Board-agnostic player settings and the `player.toml` parser.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
