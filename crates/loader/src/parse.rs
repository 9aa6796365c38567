use std::path::Path;

use serde_yaml::Value;

use crate::{
    error::{Error, Result},
    types::SkillMetadata,
};

/// A definition file split into validated header fields and markdown body.
#[derive(Debug, Clone)]
pub struct ParsedDefinition {
    pub name: String,
    pub description: String,
    pub body: String,
}

/// Parse a SKILL.md document into its header fields and body.
///
/// The frontmatter is parsed as YAML first; when that fails, a line-oriented
/// recovery pass extracts `name` and `description` from the raw block. Either
/// way, a document that yields no non-blank name is malformed.
pub fn parse_definition(content: &str, source: &Path) -> Result<ParsedDefinition> {
    let (raw_frontmatter, body) =
        split_frontmatter(content).map_err(|reason| Error::malformed(source, reason))?;

    let (name, description) = match serde_yaml::from_str::<Value>(&raw_frontmatter) {
        Ok(value) => (
            scalar_field(&value, "name"),
            scalar_field(&value, "description"),
        ),
        Err(_) => {
            let loose = recover_frontmatter(&raw_frontmatter);
            (loose.name, loose.description)
        },
    };

    let name = name.map(|n| n.trim().to_string()).unwrap_or_default();
    if name.is_empty() {
        return Err(Error::malformed(source, "missing name in frontmatter"));
    }
    let description = description
        .map(|d| d.trim().to_string())
        .unwrap_or_default();

    Ok(ParsedDefinition {
        name,
        description,
        body,
    })
}

/// Parse a SKILL.md file into full metadata (strict YAML, no recovery pass).
pub fn parse_metadata(content: &str, skill_dir: &Path) -> Result<SkillMetadata> {
    let (raw_frontmatter, _body) =
        split_frontmatter(content).map_err(|reason| Error::malformed(skill_dir, reason))?;

    let mut meta: SkillMetadata = serde_yaml::from_str(&raw_frontmatter)
        .map_err(|e| Error::malformed(skill_dir, format!("invalid frontmatter: {e}")))?;

    if meta.name.trim().is_empty() {
        return Err(Error::malformed(skill_dir, "missing name in frontmatter"));
    }
    meta.name = meta.name.trim().to_string();
    meta.path = skill_dir.to_path_buf();
    Ok(meta)
}

/// Split SKILL.md content at `---` delimiters into (frontmatter, body).
pub fn split_frontmatter(content: &str) -> std::result::Result<(String, String), &'static str> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("---") {
        return Err("missing frontmatter delimited by ---");
    }

    // Skip the opening ---
    let after_open = &trimmed[3..];
    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- for frontmatter")?;

    let frontmatter = after_open[..close_pos].trim().to_string();
    let body = after_open[close_pos + 4..].trim().to_string();
    Ok((frontmatter, body))
}

// ── Loose recovery ───────────────────────────────────────────────────────────

/// Fields recovered by the line-oriented fallback parser.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LooseFrontmatter {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Recover `name` and `description` from frontmatter that fails strict YAML
/// parsing. Real SKILL.md files sometimes carry unescaped colons inside
/// description prose; only the key prefix is matched here, so such lines
/// survive.
///
/// The first `name:` line wins. The first `description:` line starts a
/// multi-line capture that runs until the next `identifier:` line; the
/// fragments are trimmed and joined with single spaces.
pub fn recover_frontmatter(raw_frontmatter: &str) -> LooseFrontmatter {
    let lines: Vec<&str> = raw_frontmatter.lines().collect();
    let mut recovered = LooseFrontmatter::default();

    for (i, line) in lines.iter().enumerate() {
        if recovered.name.is_none()
            && let Some(rest) = line.strip_prefix("name:")
        {
            let value = strip_optional_quotes(rest);
            if !value.is_empty() {
                recovered.name = Some(value.to_string());
                continue;
            }
        }

        if recovered.description.is_none()
            && let Some(rest) = line.strip_prefix("description:")
        {
            let mut fragments = Vec::new();
            let first = rest.trim();
            if !first.is_empty() && first != "|" {
                fragments.push(first);
            }
            for next in &lines[i + 1..] {
                if is_top_level_key(next) {
                    break;
                }
                if !next.trim().is_empty() {
                    fragments.push(next.trim());
                }
            }
            recovered.description = Some(fragments.join(" ").trim().to_string());
        }
    }

    recovered
}

/// Strip a single layer of matching surrounding quotes.
fn strip_optional_quotes(value: &str) -> &str {
    let trimmed = value.trim();
    let stripped = trimmed
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| {
            trimmed
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
        });
    match stripped {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

/// A line beginning a new top-level frontmatter key (`identifier:`).
fn is_top_level_key(line: &str) -> bool {
    match line.split_once(':') {
        Some((key, _)) => {
            !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        },
        None => false,
    }
}

/// Coerce a scalar frontmatter value to a string; mappings and sequences are
/// treated as absent.
fn scalar_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
