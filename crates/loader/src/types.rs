use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ── Categories ───────────────────────────────────────────────────────────────

/// Canonical skill categories understood by the loader.
///
/// This is a closed set; the bundled-skill library carries its own,
/// independently versioned vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillCategory {
    Testing,
    Development,
    Documentation,
    Refactoring,
    Security,
    Performance,
    CodeQuality,
    Deployment,
    Database,
    Framework,
    Workflow,
    Memory,
    Communication,
}

/// Where a skill's instructions run when it is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvocationContext {
    Fork,
    Inline,
}

// ── Skill metadata ───────────────────────────────────────────────────────────

/// Metadata parsed from SKILL.md frontmatter.
///
/// Only `name` is required. Sibling systems define further keys (tool
/// permissions, category tags); unknown keys are ignored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<SkillCategory>,
    #[serde(default, rename = "disable-model-invocation")]
    pub disable_model_invocation: bool,
    #[serde(default, rename = "user-invocable")]
    pub user_invocable: Option<bool>,
    #[serde(default, rename = "allowed-tools")]
    pub allowed_tools: Option<String>,
    #[serde(default)]
    pub context: Option<InvocationContext>,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub tools: Option<String>,
    #[serde(default)]
    pub extensions: Option<String>,
    /// Filesystem path to the skill directory.
    #[serde(skip)]
    pub path: PathBuf,
}

/// A fully loaded skill: metadata, markdown body, and supporting files.
#[derive(Debug, Clone)]
pub struct Skill {
    pub metadata: SkillMetadata,
    pub body: String,
    pub path: PathBuf,
    /// Files shipped alongside SKILL.md, relative to the skill directory.
    pub supporting_files: Vec<PathBuf>,
}

// ── Trigger records ──────────────────────────────────────────────────────────

/// Trigger summary extracted from one SKILL.md, consumed by the evaluation
/// prompt compiler. `skill_name` is never empty: a document that cannot
/// produce one is rejected outright.
///
/// Field casing in JSON output (`skillName`, `triggerPatterns`) is part of
/// the machine-readable contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillTriggerInfo {
    pub skill_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub trigger_patterns: Vec<String>,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_info_json_field_casing() {
        let info = SkillTriggerInfo {
            skill_name: "tdd".to_string(),
            description: "Test-driven development".to_string(),
            trigger_patterns: vec!["Fixing a bug".to_string()],
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["skillName"], "tdd");
        assert_eq!(json["triggerPatterns"][0], "Fixing a bug");
    }

    #[test]
    fn test_category_kebab_case_names() {
        let category: SkillCategory = serde_yaml::from_str("code-quality").unwrap();
        assert_eq!(category, SkillCategory::CodeQuality);
        assert!(serde_yaml::from_str::<SkillCategory>("quality").is_err());
    }
}
