pub mod board;
pub mod rules;
