//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware fills them from
//! `board.toml` at build time; the host tools fill them from CLI flags.

pub mod types;

pub use types::*;
