use serde::Serialize;

use crate::types::SkillTriggerInfo;

/// Maximum trigger phrases shown per skill in its summary line.
const MAX_DISPLAY_TRIGGERS: usize = 4;

/// Machine-readable evaluate payload: discovered skills plus the rendered
/// prompt.
#[derive(Debug, Serialize)]
pub struct EvaluateResult {
    pub skills: Vec<SkillTriggerInfo>,
    pub prompt: String,
}

/// Condense trigger patterns into one readable fragment.
pub fn format_trigger_summary(patterns: &[String]) -> String {
    if patterns.is_empty() {
        return "No specific triggers defined".to_string();
    }
    patterns[..patterns.len().min(MAX_DISPLAY_TRIGGERS)].join(", ")
}

/// Render the skill activation prompt for the given trigger records.
///
/// Pure function of its input. The surrounding instructional text is a
/// contract consumed by a downstream text-following process; only the
/// skill-list region varies.
pub fn compile_evaluation_prompt(skills: &[SkillTriggerInfo]) -> String {
    if skills.is_empty() {
        return NO_SKILLS_PROMPT.to_string();
    }

    let skill_lines = skills
        .iter()
        .map(|skill| {
            format!(
                "- {}: Trigger = {}",
                skill.skill_name,
                format_trigger_summary(&skill.trigger_patterns)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"
## MANDATORY SKILL ACTIVATION SEQUENCE

### Step 1 - EVALUATE (do this in your response):
For each installed skill, state: [skill-name] - YES/NO - [reason]

Installed skills to evaluate:
{skill_lines}

### Step 2 - ACTIVATE (do this immediately after Step 1):
IF any skills are YES → Use Skill(skill-name) tool for EACH relevant skill NOW
IF no skills are YES → State "No skills activated" and proceed

### Step 3 - IMPLEMENT:
Only after Step 2 is complete, proceed with implementation.

## CRITICAL REQUIREMENTS

1. You MUST call Skill() tool in Step 2 for every YES skill
2. The evaluation (Step 1) is WORTHLESS unless you ACTIVATE (Step 2) the skills
3. Do NOT skip to implementation without completing Step 2

## Example of Correct Sequence:

```
SKILL EVALUATION (Step 1):
- tdd: YES - fixing a bug in the CLI
- diff-review: YES - reviewing a security-sensitive PR
- model-router: NO - model tier already selected by user

ACTIVATING SKILLS (Step 2):
[Calls Skill("tdd")]
[Calls Skill("diff-review")]

IMPLEMENTING (Step 3):
[Now proceeds with implementation following both activated skills]
```

## BLOCKING CONDITIONS - NO EXCEPTIONS

- If tdd = YES: You are BLOCKED until Phase 1 (RED) is complete - failing test required
- Skills CHAIN: If multiple skills are YES, follow ALL activated skills

## NO EXCEPTIONS

These rationalizations are REJECTED:
- "It's a simple change" → BLOCKED. Write the test.
- "Just this once" → BLOCKED. That's what you said last time.
- "I'll add tests after" → BLOCKED. Tests after = not TDD.
- "It's faster to do it manually" → BLOCKED. Fix the tool.
- "The tool is mostly working" → BLOCKED. Mostly = broken.
- "One-time migration" → BLOCKED. Build the feature.

If you are unsure whether a skill applies, ASK THE USER:
"Should I skip the [skill-name] skill for this task?"

Only proceed without activation if user EXPLICITLY says yes.

This activation sequence is MANDATORY. Skipping Step 2 violates project policy.
"#
    )
}

const NO_SKILLS_PROMPT: &str = r"
## MANDATORY SKILL ACTIVATION SEQUENCE

No skills installed. Install skills with: skills add <skill-name>
";

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, patterns: &[&str]) -> SkillTriggerInfo {
        SkillTriggerInfo {
            skill_name: name.to_string(),
            description: String::new(),
            trigger_patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_input_renders_no_skills_document() {
        let prompt = compile_evaluation_prompt(&[]);
        assert_eq!(
            prompt,
            "\n## MANDATORY SKILL ACTIVATION SEQUENCE\n\nNo skills installed. Install skills with: skills add <skill-name>\n"
        );
    }

    #[test]
    fn test_summary_caps_at_four_triggers() {
        let prompt =
            compile_evaluation_prompt(&[skill("tdd", &["one", "two", "three", "four", "five"])]);
        assert!(prompt.contains("- tdd: Trigger = one, two, three, four\n"));
        assert!(!prompt.contains("five"));
    }

    #[test]
    fn test_no_triggers_placeholder() {
        let prompt = compile_evaluation_prompt(&[skill("bare", &[])]);
        assert!(prompt.contains("- bare: Trigger = No specific triggers defined"));
    }

    #[test]
    fn test_skill_lines_preserve_input_order() {
        let prompt = compile_evaluation_prompt(&[skill("b", &["x1234"]), skill("a", &["y1234"])]);
        let b_pos = prompt.find("- b: Trigger =").unwrap();
        let a_pos = prompt.find("- a: Trigger =").unwrap();
        assert!(b_pos < a_pos);
    }

    #[test]
    fn test_fixed_sections_present() {
        let prompt = compile_evaluation_prompt(&[skill("tdd", &["bug fix"])]);
        assert!(prompt.starts_with("\n## MANDATORY SKILL ACTIVATION SEQUENCE\n"));
        assert!(prompt.contains("### Step 1 - EVALUATE (do this in your response):"));
        assert!(prompt.contains("### Step 2 - ACTIVATE (do this immediately after Step 1):"));
        assert!(prompt.contains("### Step 3 - IMPLEMENT:"));
        assert!(prompt.contains("## BLOCKING CONDITIONS - NO EXCEPTIONS"));
        assert!(prompt.ends_with("Skipping Step 2 violates project policy.\n"));
    }

    #[test]
    fn test_format_trigger_summary() {
        assert_eq!(format_trigger_summary(&[]), "No specific triggers defined");
        assert_eq!(
            format_trigger_summary(&["a".to_string(), "b".to_string()]),
            "a, b"
        );
    }
}
