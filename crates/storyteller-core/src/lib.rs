//! Storyteller Core — shared story types and provider seams.
//!
//! This crate defines the data model exchanged between the narrative and
//! illustration contexts and the traits that model providers implement. It
//! contains no infrastructure code.

pub mod error;
pub mod generation;
pub mod story;
