pub const POST_TEXT: &str = include_str!("../data/prompts/post_text.txt");
pub const POST_IMAGE: &str = include_str!("../data/prompts/post_image.txt");
pub const TITLE_FIELD: &str = include_str!("../data/prompts/title_field.txt");
pub const DESCRIPTION_FIELD: &str = include_str!("../data/prompts/description_field.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// The template is scanned once; substituted values are never rescanned, so
/// user text containing `{{...}}` is embedded verbatim. Unknown placeholders
/// are left as they are.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let key = &after_open[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    result.push_str(rest);
    result
}

/// Instruction for the structured title/description step.
pub fn post_text(business_type: &str, post_summary: &str) -> String {
    render(
        POST_TEXT,
        &[
            ("business_type", business_type),
            ("post_summary", post_summary),
        ],
    )
}

/// Instruction for the image step. Embeds the title produced by the text step.
pub fn post_image(business_type: &str, post_summary: &str, title: &str) -> String {
    render(
        POST_IMAGE,
        &[
            ("business_type", business_type),
            ("post_summary", post_summary),
            ("title", title),
        ],
    )
}
