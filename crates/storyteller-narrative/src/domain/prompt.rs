//! Narrative prompt construction.

use crate::domain::commands::StoryBrief;

/// Scene headings the model is asked to follow, in order.
pub const SCENE_TITLES: [&str; 4] = ["Introduction", "Rising Action", "Climax", "Resolution"];

/// Builds the text-model prompt for `brief`.
///
/// The paragraph count is a hint to the model only; replies are not checked
/// against it.
#[must_use]
pub fn build_story_prompt(brief: &StoryBrief) -> String {
    let scenes_example = SCENE_TITLES
        .iter()
        .enumerate()
        .map(|(index, title)| {
            format!(
                "    {{\n      \"scene_number\": {},\n      \"scene_title\": \"{title}\",\n      \"content\": \"Scene content here...\",\n      \"image_prompt\": \"Detailed description for image generation\"\n    }}",
                index + 1
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"Create a cohesive narrative story based on this idea: "{idea}"

Requirements:
- Genre: {genre}
- Tone: {tone}
- Target audience: {audience}
- Structure the story into exactly 4 scenes: Introduction/Setting, Rising Action, Climax, Resolution
- Each scene should be 2-3 paragraphs long
- Make the story engaging and complete
- Ensure smooth transitions between scenes

Format your entire response as a single, valid JSON object. DO NOT include any other text, explanations, or markdown outside the JSON. The JSON structure must be exactly as follows:
{{
  "title": "Story Title",
  "scenes": [
{scenes_example}
  ]
}}"#,
        idea = brief.trimmed_idea(),
        genre = brief.genre,
        tone = brief.tone,
        audience = brief.target_audience,
    )
}
