//! Storyteller — narrative context.
//!
//! Responsible for turning a story brief into a narrative prompt, calling the
//! text model once, and recovering a typed `StoryDocument` from its reply.

pub mod application;
pub mod domain;
