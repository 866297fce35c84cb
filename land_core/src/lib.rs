//! Move selection for the land game, an Othello-family game where placing a
//! disk flips every flanked run of opposing disks.

pub mod engine;
pub mod error;
pub mod logic;
pub mod session;
