//! 提示词组装 — 固定指令 + 模式块 + 条件约束 + 用户输入
//!
//! Prompt composition. The output is a pure function of the brief: no clock, no
//! randomness, no I/O.
//!
//! Layout of a [`ComposedPrompt`]:
//!
//! ```text
//! SYSTEM INSTRUCTION:
//! <directive>
//! **MANDATORY JSON SCHEMA:**
//! <schema>
//! [reference clause]
//! [overrides block]
//! USER INPUT:
//! <brief.prompt, verbatim>
//! ```
//!
//! Brief values are interpolated as-is. That is a prompt-quality injection surface
//! (a caller can steer the model), not a security boundary: nothing here is executed.

pub mod directive;

use crate::types::CreativeBrief;
use directive::{
    DIRECTIVE, OVERRIDES_HEADER, REFERENCE_HEADER, SCHEMA, SCHEMA_HEADER, SYSTEM_LABEL,
    USER_LABEL,
};
use std::fmt;

/// Final text sent to the model. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt(String);

impl ComposedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ComposedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComposedPrompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Build the full prompt for a brief.
pub fn compose(brief: &CreativeBrief) -> ComposedPrompt {
    let mut constraints = String::new();
    if let Some(reference) = brief.reference() {
        constraints.push_str(&reference_clause(reference));
    }
    if let Some(block) = overrides_block(brief) {
        constraints.push_str(&block);
    }

    ComposedPrompt(format!(
        "{SYSTEM_LABEL}\n{DIRECTIVE}\n{SCHEMA_HEADER}\n{SCHEMA}\n\n{constraints}\n{USER_LABEL}\n{}",
        brief.prompt
    ))
}

/// Instruction to fold a described reference image into the visual or typography sections.
pub fn reference_clause(reference: &str) -> String {
    format!(
        "\n{REFERENCE_HEADER}\n\
         The user has provided a description of a specific reference image/sketch: \"{reference}\".\n\
         INSTRUCTION: You MUST incorporate the visual elements of this reference into the \
         'visual_elements' or 'text_integration_styling' section. \
         Ensure the generated prompt reflects this reference.\n"
    )
}

/// One mandatory line per present override, in style → font → lighting → ratio → language order.
pub fn override_lines(brief: &CreativeBrief) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(style) = brief.style() {
        lines.push(format!(
            "- Visual Style: Force the image style to be \"{style}\"."
        ));
    }
    if let Some(font) = brief.font() {
        lines.push(format!(
            "- Typography Style: Use \"{font}\" font style for the text."
        ));
    }
    if let Some(lighting) = brief.lighting() {
        lines.push(format!(
            "- Lighting & Atmosphere: Enforce \"{lighting}\" mood."
        ));
    }
    if let Some(ratio) = brief.ratio() {
        lines.push(format!(
            "- Aspect Ratio Target: {ratio} (Adjust composition logic to fit this frame)."
        ));
    }
    if let Some(language) = brief.language() {
        lines.push(format!(
            "- Text Language: Ensure spelling of text content is strictly in \"{language}\"."
        ));
    }
    lines
}

/// `None` when the brief carries no overrides.
pub fn overrides_block(brief: &CreativeBrief) -> Option<String> {
    let lines = override_lines(brief);
    if lines.is_empty() {
        return None;
    }
    let mut block = format!("\n{OVERRIDES_HEADER}\n");
    for line in lines {
        block.push_str(&line);
        block.push('\n');
    }
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_only_brief() {
        let p = compose(&CreativeBrief::new("Sneaker launch, neon city"));
        let text = p.as_str();
        assert!(text.starts_with("SYSTEM INSTRUCTION:\n"));
        assert!(text.contains("**ROLE:**"));
        assert!(text.contains(SCHEMA_HEADER));
        assert!(text.contains("\"color_palette\""));
        assert!(!text.contains(REFERENCE_HEADER));
        assert!(!text.contains(OVERRIDES_HEADER));
        assert!(text.ends_with("USER INPUT:\nSneaker launch, neon city"));
    }

    #[test]
    fn test_section_order() {
        let brief = CreativeBrief::new("idea")
            .with_reference("hand-drawn sketch of a can")
            .with_style("Surreal");
        let text = compose(&brief).into_string();
        let directive = text.find("**ROLE:**").unwrap();
        let schema = text.find(SCHEMA_HEADER).unwrap();
        let reference = text.find(REFERENCE_HEADER).unwrap();
        let overrides = text.find(OVERRIDES_HEADER).unwrap();
        let user = text.find(USER_LABEL).unwrap();
        assert!(directive < schema);
        assert!(schema < reference);
        assert!(reference < overrides);
        assert!(overrides < user);
    }

    #[test]
    fn test_reference_interpolated_verbatim() {
        let reference = "a \"vintage\" poster with {braces}";
        let text = compose(&CreativeBrief::new("idea").with_reference(reference)).into_string();
        assert!(text.contains(&format!("reference image/sketch: \"{}\".", reference)));
    }

    #[test]
    fn test_override_lines_order_and_omission() {
        let brief = CreativeBrief::new("idea")
            .with_language("Bahasa Indonesia")
            .with_style("Minimalist")
            .with_ratio("9:16");
        let lines = override_lines(&brief);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("- Visual Style:"));
        assert!(lines[1].starts_with("- Aspect Ratio Target: 9:16"));
        assert!(lines[2].starts_with("- Text Language:"));
    }

    #[test]
    fn test_composition_is_deterministic() {
        let brief = CreativeBrief::new("idea").with_font("Bold serif");
        assert_eq!(compose(&brief), compose(&brief));
    }

    #[test]
    fn test_user_input_not_escaped() {
        let text = compose(&CreativeBrief::new("Say \"hi\"\n// not a comment")).into_string();
        assert!(text.ends_with("USER INPUT:\nSay \"hi\"\n// not a comment"));
    }
}
