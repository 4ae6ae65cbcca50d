//! Enhanced image prompt construction.

/// Quality terms appended to every illustration prompt.
pub const QUALITY_SUFFIX: &str = "high quality, detailed, storybook illustration";

/// Appends the art style and quality terms to a base image description.
#[must_use]
pub fn build_enhanced_prompt(image_prompt: &str, art_style: &str) -> String {
    format!("{image_prompt}, {art_style} style, {QUALITY_SUFFIX}")
}
