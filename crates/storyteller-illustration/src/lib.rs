//! Storyteller — illustration context.
//!
//! Turns scene image descriptions into rendered illustrations, one concurrent
//! image request per scene, and sequences the full story-with-images request.

pub mod application;
pub mod domain;
