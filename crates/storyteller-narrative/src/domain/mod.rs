//! Domain layer for the narrative context.

pub mod commands;
pub mod extraction;
pub mod prompt;
