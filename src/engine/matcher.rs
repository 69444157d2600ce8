//! Matchers over compiled rule tables
//!
//! Pure functions: they take text and a table and report which rules fire.
//! Nothing here allocates state that outlives the call.

use crate::rules::{CompiledRule, RuleBook, RuleTable};

/// A rule that fired, with the text that triggered it
#[derive(Debug, Clone, Copy)]
pub struct RuleHit<'r, 't> {
    pub rule: &'r CompiledRule,
    pub excerpt: &'t str,
}

/// Every rule in the table that matches, in table order
pub fn match_all<'r>(text: &str, table: &'r RuleTable) -> Vec<&'r CompiledRule> {
    table.iter().filter(|rule| rule.is_match(text)).collect()
}

/// The first rule in the table that matches, with its excerpt
pub fn match_first<'r, 't>(text: &'t str, table: &'r RuleTable) -> Option<RuleHit<'r, 't>> {
    table
        .iter()
        .find_map(|rule| rule.find(text).map(|excerpt| RuleHit { rule, excerpt }))
}

/// A dangerous `rm` invocation
#[derive(Debug, Clone)]
pub struct DeleteHit<'r> {
    pub rule: &'r CompiledRule,
    /// The `rm` invocation as written (lower-cased)
    pub invocation: String,
}

/// Flags and targets of one `rm` invocation
#[derive(Debug, Default, PartialEq, Eq)]
struct RmArgs {
    recursive: bool,
    force: bool,
    targets: Vec<String>,
}

impl RmArgs {
    fn parse(args: &str) -> Self {
        let mut parsed = RmArgs::default();
        let mut options_done = false;
        let mut skip_next = false;

        for raw in args.split_whitespace() {
            if skip_next {
                skip_next = false;
                continue;
            }
            // Redirections are not targets: `> /dev/null`, `2>&1`, `2>/dev/null`
            if is_redirect_operator(raw) {
                skip_next = true;
                continue;
            }
            if raw.contains('>') || raw.starts_with('<') {
                continue;
            }

            let token = raw.trim_matches(|c| c == '"' || c == '\'');
            if !options_done && token == "--" {
                options_done = true;
                continue;
            }
            if !options_done && token.starts_with("--") {
                match token {
                    "--recursive" => parsed.recursive = true,
                    "--force" => parsed.force = true,
                    _ => {}
                }
                continue;
            }
            if !options_done && token.len() > 1 && token.starts_with('-') {
                parsed.recursive |= token.contains('r');
                parsed.force |= token.contains('f');
                continue;
            }
            if !token.is_empty() {
                parsed.targets.push(token.to_string());
            }
        }

        parsed
    }
}

fn is_redirect_operator(token: &str) -> bool {
    matches!(
        token,
        ">" | ">>" | "<" | "1>" | "2>" | "1>>" | "2>>" | "&>" | "&>>"
    )
}

/// Two-phase structural check for destructive `rm` invocations.
///
/// Phase 1: recursive and force flags together are dangerous when any target
/// is in the dangerous-target set or is an absolute path. Phase 2: a
/// recursive flag without force is dangerous only for the dangerous-target
/// set (root, root wildcard, home, parent traversal, bare wildcard).
pub fn match_destructive_delete<'r>(command: &str, rules: &'r RuleBook) -> Option<DeleteHit<'r>> {
    let lowered = command.to_lowercase();

    for caps in rules.rm_invocation.captures_iter(&lowered) {
        let args = RmArgs::parse(&caps[1]);
        if !args.recursive {
            continue;
        }

        let hit = args.targets.iter().find_map(|target| {
            rules
                .delete_targets
                .iter()
                .find(|rule| rule.is_match(target))
                .or_else(|| {
                    args.force
                        .then(|| rules.forced_delete_targets.iter().find(|rule| rule.is_match(target)))
                        .flatten()
                })
        });

        if let Some(rule) = hit {
            return Some(DeleteHit {
                rule,
                invocation: format!("rm {}", caps[1].trim()),
            });
        }
    }

    None
}

/// Whether the command contains a destructive `rm` invocation
pub fn is_destructive_delete(command: &str, rules: &RuleBook) -> bool {
    match_destructive_delete(command, rules).is_some()
}

/// Collapse runs of whitespace so spacing tricks don't defeat the patterns
pub fn normalize_command(command: &str) -> String {
    command.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Use forward slashes so Windows-style paths hit the same rules
pub fn normalize_path(path: &str) -> String {
    path.trim().replace('\\', "/")
}

/// Cut text to at most `max_bytes`, on a char boundary.
/// Returns the kept prefix and whether anything was dropped.
pub fn bounded(text: &str, max_bytes: usize) -> (&str, bool) {
    if text.len() <= max_bytes {
        return (text, false);
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    (&text[..end], true)
}

/// Shorten an excerpt for display in a block reason
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{}...", kept)
}
