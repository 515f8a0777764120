//! `jistool` command implementations.

pub mod commands;
pub mod hex;
