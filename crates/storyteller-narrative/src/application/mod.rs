//! Application layer for the narrative context.

pub mod command_handlers;
