use std::sync::LazyLock;

use regex::Regex;

/// Cleaned bullets at or below this length are discarded as noise.
const MIN_TRIGGER_CHARS: usize = 3;

#[allow(clippy::unwrap_used)]
static SECTION_HEADINGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    // Ordered heading matchers; all are applied, independently.
    [
        r"^##\s*When to Use",
        r"^##\s*Trigger Conditions",
        r"^##\s*When to Invoke",
        r"^##\s*Context\s*/\s*Trigger Conditions",
        r"^##\s*When NOT to Use",
    ]
    .iter()
    .map(|pattern| Regex::new(&format!("(?i){pattern}")).unwrap())
    .collect()
});

#[allow(clippy::unwrap_used)]
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.+)$").unwrap());

#[allow(clippy::unwrap_used)]
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());

#[allow(clippy::unwrap_used)]
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

#[allow(clippy::unwrap_used)]
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

/// Extract condensed trigger phrases from a SKILL.md body.
///
/// Scans the recognized "when to use"-style sections for bullet lines,
/// strips inline markup, and keeps everything longer than three characters.
/// Output order is deterministic: heading-pattern order, then document order
/// within each pattern. Identical bullets under two matched headings are
/// kept twice.
pub fn extract_triggers(body: &str) -> Vec<String> {
    let lines: Vec<&str> = body.lines().collect();
    let mut patterns = Vec::new();

    for heading in SECTION_HEADINGS.iter() {
        for (idx, line) in lines.iter().enumerate() {
            if !heading.is_match(line) {
                continue;
            }
            // Section runs until the next ##-level heading or end of body.
            for section_line in lines[idx + 1..]
                .iter()
                .take_while(|l| !l.starts_with("##"))
            {
                let Some(captures) = BULLET.captures(section_line) else {
                    continue;
                };
                let cleaned = clean_bullet(&captures[1]);
                if cleaned.chars().count() > MIN_TRIGGER_CHARS {
                    patterns.push(cleaned);
                }
            }
        }
    }

    patterns
}

/// Strip bold, inline code, and link markup from a bullet, then trim.
fn clean_bullet(text: &str) -> String {
    let text = BOLD.replace_all(text.trim(), "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    text.trim().to_string()
}
