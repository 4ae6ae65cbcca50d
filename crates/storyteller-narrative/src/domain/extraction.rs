//! Best-effort recovery of a `StoryDocument` from a text-model reply.
//!
//! The model is told to answer with bare JSON but often wraps it in a
//! markdown fence or adds prose. Extraction runs in two stages:
//!
//! 1. If the reply contains a fenced code block tagged `json`, the first such
//!    block is parsed and nothing else is tried. Block-level fences are found
//!    with a markdown parser; failing that, a literal "```json" followed by a
//!    newline anywhere in the reply also counts, since models often put the
//!    fence mid-line or indent it.
//! 2. Otherwise the whole reply is parsed.
//!
//! Any failure is reported as an [`ExtractionError`]; [`extract_or_degrade`]
//! turns that into a single-scene fallback document so callers always get a
//! well-shaped story.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use storyteller_core::story::StoryDocument;
use thiserror::Error;
use tracing::warn;

/// Why a reply could not be turned into a `StoryDocument`.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The candidate text was not JSON of the expected shape.
    #[error("reply is not a valid story document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The document parsed but had no scenes.
    #[error("story document has no scenes")]
    NoScenes,

    /// A scene had blank content.
    #[error("scene {scene_number} has no content")]
    EmptyContent {
        /// The offending scene's number as given by the model.
        scene_number: u32,
    },
}

/// Which extraction path produced the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// The reply parsed into a document.
    Parsed(StoryDocument),
    /// The reply could not be parsed; this is the single-scene fallback.
    Degraded(StoryDocument),
}

impl ExtractionOutcome {
    /// Returns `true` for the fallback path.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    /// Borrows the document regardless of path.
    #[must_use]
    pub fn document(&self) -> &StoryDocument {
        match self {
            Self::Parsed(document) | Self::Degraded(document) => document,
        }
    }

    /// Unwraps the document regardless of path.
    #[must_use]
    pub fn into_document(self) -> StoryDocument {
        match self {
            Self::Parsed(document) | Self::Degraded(document) => document,
        }
    }
}

/// Parses `raw` into a `StoryDocument`.
///
/// # Errors
///
/// Returns `ExtractionError` if neither the first `json` fence nor the whole
/// reply parses into a document with at least one non-empty scene.
pub fn extract_story_document(raw: &str) -> Result<StoryDocument, ExtractionError> {
    let block = fenced_json_block(raw);
    let candidate = block.as_deref().or_else(|| inline_json_fence(raw)).unwrap_or(raw);
    let document: StoryDocument = serde_json::from_str(candidate)?;
    check_document(&document)?;
    Ok(document)
}

/// Parses `raw`, falling back to the single-scene document built from the raw
/// reply and `story_idea` when parsing fails.
#[must_use]
pub fn extract_or_degrade(raw: &str, story_idea: &str) -> ExtractionOutcome {
    match extract_story_document(raw) {
        Ok(document) => ExtractionOutcome::Parsed(document),
        Err(err) => {
            warn!(error = %err, reply_length = raw.len(), "falling back to single-scene story");
            ExtractionOutcome::Degraded(StoryDocument::degraded(raw, story_idea))
        }
    }
}

/// Returns the body of the first fenced code block whose info string starts
/// with `json`, if any.
fn fenced_json_block(raw: &str) -> Option<String> {
    let mut body: Option<String> = None;
    for event in Parser::new(raw) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if body.is_none() && is_json_info(&info) =>
            {
                body = Some(String::new());
            }
            Event::Text(text) => {
                if let Some(buffer) = body.as_mut() {
                    buffer.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) if body.is_some() => return body,
            _ => {}
        }
    }
    body
}

/// Returns the text between the first literal "```json" that ends its line and
/// the next "```". Catches fences the markdown pass reads as inline code or
/// indented blocks.
fn inline_json_fence(raw: &str) -> Option<&str> {
    let mut rest = raw;
    while let Some(pos) = rest.find("```json") {
        let after = &rest[pos + "```json".len()..];
        if let Some(body) = after
            .strip_prefix('\n')
            .or_else(|| after.strip_prefix("\r\n"))
        {
            return body.find("```").map(|end| &body[..end]);
        }
        rest = after;
    }
    None
}

fn is_json_info(info: &str) -> bool {
    info.split_whitespace()
        .next()
        .is_some_and(|lang| lang.eq_ignore_ascii_case("json"))
}

fn check_document(document: &StoryDocument) -> Result<(), ExtractionError> {
    if document.scenes.is_empty() {
        return Err(ExtractionError::NoScenes);
    }
    for (index, scene) in document.scenes.iter().enumerate() {
        if scene.content.trim().is_empty() {
            return Err(ExtractionError::EmptyContent {
                scene_number: scene.scene_number,
            });
        }
        let expected = index + 1;
        if usize::try_from(scene.scene_number).ok() != Some(expected) {
            warn!(
                scene_number = scene.scene_number,
                position = expected,
                "scene number does not match its position"
            );
        }
    }
    Ok(())
}
