//! CLI subcommands

pub mod selfplay;
pub mod solve;
pub mod train;
