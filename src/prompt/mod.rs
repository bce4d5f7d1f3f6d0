use crate::wire::ApplicationCategory;

pub const TEMPLATE_VERSION: &str = "v1";

const CRUD_V1: &str = include_str!("../../assets/prompts/crud.v1.md");
const STATIC_V1: &str = include_str!("../../assets/prompts/static.v1.md");

/// System message sent with every generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInstructions {
    pub category: ApplicationCategory,
    pub version: &'static str,
    pub text: String,
}

/// Framing contract with the generator. The response parser depends on the
/// `File: <path>` line, keep it in sync with `parse::FILE_MARKER`.
fn output_framing() -> &'static str {
r#"Output Format (MANDATORY):
- Format your response with 'File: filename' followed by the file contents.
- Render each file as a line `File: <relative-path>` and then its full content on the following lines.
- Files may appear in any order. Do not nest files or wrap them in code fences.
- Write directory separators literally in the path, e.g. `File: assets/js/main.js`.
- Do not write anything before the first `File:` line; it is discarded."#
}

fn template_body(category: ApplicationCategory) -> &'static str {
    match category {
        ApplicationCategory::Crud => CRUD_V1,
        ApplicationCategory::Static => STATIC_V1,
    }
}

pub fn select_instructions(category: ApplicationCategory) -> SystemInstructions {
    let text = format!(
        "{body}\n{framing}",
        body = template_body(category).trim_end(),
        framing = output_framing()
    );
    SystemInstructions { category, version: TEMPLATE_VERSION, text }
}

pub fn user_prompt(prompt: &str) -> String {
    prompt.trim().to_string()
}
