use storage::models::Biodata;

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn draft_prompt(participant: &Biodata) -> String {
        format!(
            r#"Generate a professional and inspiring Public Relations (PR) draft of approximately 100 words for a skill training program participant.
The tone should be positive and forward-looking.
Do not use markdown. Output plain text only.

Participant Details:
- Name: {}
- College: {}
- Course: {}
- Program Enrolled In: {}
- Target Audience Category: {}
- Stated Goals: {}
- Hobbies: {}
- Address: {}

Draft the PR highlighting their potential and the value of the training program."#,
            participant.name,
            participant.college_name,
            participant.course,
            participant.program_enrolled,
            participant.target_audience,
            participant.goals,
            participant.hobbies,
            participant.city,
        )
    }

    pub fn review_prompt(draft: &str) -> String {
        format!(
            r#"As a Public Relations expert, please review the following PR draft written for a skill training program participant.
Provide a quality score out of 10 and 2-3 brief, constructive feedback points.
The score should reflect the draft's professionalism, tone, clarity, and effectiveness.

PR Draft to review:
---
{}
---"#,
            draft
        )
    }

    pub fn enhance_prompt() -> &'static str {
        "Enhance this person's photo for a professional profile. Give it a clean, professional-looking, and neutral background suitable for a corporate or program ID. Do not change the person's facial features or appearance. Just improve the lighting and replace the background."
    }

    /// Response schema for the review call: integer score and a list of strings.
    pub fn review_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "score": {
                    "type": "INTEGER",
                    "description": "A quality score for the PR draft, from 1 to 10."
                },
                "feedback": {
                    "type": "ARRAY",
                    "description": "An array of 2-3 brief, constructive feedback points.",
                    "items": { "type": "STRING" }
                }
            },
            "required": ["score", "feedback"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_prompt_includes_participant_fields() {
        let biodata = Biodata {
            name: "Asha Rao".to_string(),
            college_name: "Rajasthan University".to_string(),
            city: "Jaipur".to_string(),
            program_enrolled: "Agroeconomics".to_string(),
            ..Default::default()
        };

        let prompt = PromptBuilder::draft_prompt(&biodata);
        assert!(prompt.contains("- Name: Asha Rao"));
        assert!(prompt.contains("- College: Rajasthan University"));
        assert!(prompt.contains("- Program Enrolled In: Agroeconomics"));
        assert!(prompt.contains("- Address: Jaipur"));
    }

    #[test]
    fn test_review_prompt_embeds_draft() {
        let prompt = PromptBuilder::review_prompt("Some draft");
        assert!(prompt.contains("---\nSome draft\n---"));
    }
}
