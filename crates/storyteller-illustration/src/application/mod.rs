//! Application layer for the illustration context.

pub mod command_handlers;
pub mod fanout;
