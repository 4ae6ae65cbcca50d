//! Shared test doubles for the Storyteller service.

mod image;
mod text;

pub use image::{FailingImageGenerator, RecordingImageGenerator, RendezvousImageGenerator};
pub use text::{FailingTextGenerator, ScriptedTextGenerator};
