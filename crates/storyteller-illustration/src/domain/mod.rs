//! Domain layer for the illustration context.

pub mod commands;
pub mod prompt;
