//! Prompt text sent to the language model.

use crate::domain::foundation::SectionKey;

fn section_key_list() -> String {
    SectionKey::all()
        .iter()
        .map(|key| format!("- {}", key.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Synthesis instruction for text read by the static strategy.
pub fn website_synthesis_prompt() -> String {
    format!(
        r#"You're an expert company strategist.

Based on the company website content below, generate a strawman Vision to Values document as a JSON object with the following keys:
{}

If any of these are not clearly inferable, return "TBD" for that field.

Respond ONLY with the JSON object."#,
        section_key_list()
    )
}

/// Synthesis instruction for text read by the rendered strategy.
pub fn rendered_synthesis_prompt() -> String {
    format!(
        r#"You are a company-building strategist.

Based on the content below from a company's website, generate a draft Vision to Values document.

Return the result as a valid JSON object with the following keys:
{}

Use the company's tone where possible. If something is not inferable, write "TBD".
Only output the JSON object, with no explanation or intro."#,
        section_key_list()
    )
}

/// Classification instruction for the latest user message.
pub fn classifier_prompt(user_message: &str) -> String {
    format!(
        r#"You're a classification engine for a Vision to Values builder.

Classify the user's message into one of these categories:
{}

User message:
"{}"

Respond ONLY with the category name. No explanation."#,
        section_key_list(),
        user_message
    )
}

/// Coaching instruction for one section.
pub fn coaching_prompt(section: SectionKey, current_draft: &str, context: &str) -> String {
    let name = section.as_str();
    format!(
        r#"You are helping a startup founder refine the "{name}" section of their Vision to Values document.

Here is their current draft for this section:
"{current_draft}"

You may reference other sections for alignment:
{context}

Your goal is to:
- Improve clarity, tone, and alignment with their identity
- Ask thoughtful follow-up questions or offer suggestions
- Stay focused on just the "{name}" section for now

When the section is finished, say so plainly (for example "this section is complete") and restate the final text."#
    )
}

/// Fixed persona for the Vision-only chat.
pub const VISION_PERSONA_PROMPT: &str = r#"You are a strategic thought partner helping a founder articulate the "Vision" section of their company's Vision to Values document.

Your job is to guide them in defining their aspirational purpose, their true north, through a thoughtful, multi-turn conversation.

Background:
> Managing a hyper-growth company is like launching a rocket. Even slight trajectory issues early on can result in massive divergence later. A clear, focused vision keeps the organization aligned and inspired.

A great vision should:
- Be long-term and inspirational
- Capture the company's essence
- Provide direction in uncertain times
- Be simple, memorable, and emotionally resonant

Example (LinkedIn): "Create economic opportunity for every member of the global workforce"

Instructions:
Ask clarifying questions, suggest ideas, and refine their thinking, but do not move on to other dimensions like Mission or Values. Stay focused on the Vision.

When you respond, use clean HTML:
- Use <h2> for section titles
- Use <p> for body content
- Avoid markdown or code blocks"#;

/// Polishing instruction wrapping the founder's rough sections.
pub fn polish_prompt(summary: &str) -> String {
    format!(
        r#"You are a strategic communications expert helping a startup founder craft a polished "Vision to Values" page.

Use the following rough inputs provided by the founder. Rephrase and polish each section clearly and concisely, keeping it engaging and authentic.

{summary}

Return a clean HTML document using <h2> for section titles and <p> for body content. No code blocks, no markdown."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesis_prompts_name_all_seven_keys() {
        for prompt in [website_synthesis_prompt(), rendered_synthesis_prompt()] {
            for key in SectionKey::all() {
                assert!(prompt.contains(&format!("- {}", key.as_str())));
            }
        }
    }

    #[test]
    fn classifier_prompt_quotes_message() {
        let prompt = classifier_prompt("Our culture should emphasize transparency");
        assert!(prompt.contains("\"Our culture should emphasize transparency\""));
        assert!(prompt.contains("- values"));
    }

    #[test]
    fn coaching_prompt_embeds_draft_and_context() {
        let prompt = coaching_prompt(SectionKey::Culture, "Open by default", "VISION: See far");
        assert!(prompt.contains("\"culture\" section"));
        assert!(prompt.contains("\"Open by default\""));
        assert!(prompt.contains("VISION: See far"));
    }
}
