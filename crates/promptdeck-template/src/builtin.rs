//! Built-in templates.

use promptdeck_common_core::TemplateId;

use crate::template::{Format, Template};

const POLAROID_FACE: &str = "a woman in her thirties with short dark hair and a warm smile";

fn builtin(id: &str, name: &str, text: &str, defaults: &[(&str, &str)]) -> Template {
    defaults.iter().fold(
        Template::from_text(TemplateId::new(id), name, text),
        |template, (key, value)| template.with_default(key, *value),
    )
}

/// The initial deck, in display order.
pub fn templates() -> Vec<Template> {
    vec![
        builtin(
            "polaroid",
            "Polaroid With My Younger Self",
            "An old polaroid photo of (pol_face) hugging (pol_face2) as a small child, \
             taken at (pol_place). Faded colours, soft flash, slight blur, (pol_mood) mood, \
             white polaroid frame.",
            &[
                ("pol_face", POLAROID_FACE),
                ("pol_face2", POLAROID_FACE),
                ("pol_place", "a living room in the 1990s"),
                ("pol_mood", "nostalgic"),
            ],
        )
        .with_format(Format::Json),
        builtin(
            "street-portrait",
            "Street Portrait",
            "A candid street portrait of (subject) in (city) at (time_of_day), \
             shot on a (camera), natural light, (style) style.",
            &[
                ("subject", "an elderly man selling tea"),
                ("city", "Istanbul"),
                ("time_of_day", "golden hour"),
                ("camera", "35mm film camera"),
                ("style", "documentary"),
            ],
        )
        .with_format(Format::Json),
        builtin(
            "product-shot",
            "Product Shot",
            "A photo of (product) placed on (surface), lit by (lighting), \
             with (props) in the background.",
            &[
                ("product", "a ceramic coffee mug"),
                ("surface", "a weathered wooden table"),
                ("lighting", "morning window light"),
                ("props", "a folded newspaper"),
            ],
        ),
        builtin(
            "short-story",
            "Short Story",
            "Write a short story about (character) who lives in (place). \
             The tone should be (tone) and the story should end with (ending). \
             Keep it under (length) words.",
            &[
                ("character", "a retired lighthouse keeper"),
                ("place", "a small island"),
                ("tone", "bittersweet"),
                ("ending", "an unexpected letter"),
                ("length", "500"),
            ],
        ),
        builtin(
            "email-reply",
            "Email Reply",
            "Write a (tone) reply to an email from (sender) about (topic). \
             Mention (point) and keep it to (length).",
            &[
                ("tone", "polite but firm"),
                ("sender", "a client"),
                ("topic", "a delayed delivery"),
                ("point", "the new delivery date"),
                ("length", "one short paragraph"),
            ],
        ),
        builtin(
            "code-review",
            "Code Review",
            "Review the following (language) code with a focus on (focus). \
             Explain each issue so that (audience) can follow, and suggest a fix.",
            &[
                ("language", "Rust"),
                ("focus", "error handling"),
                ("audience", "a junior developer"),
            ],
        ),
    ]
}
