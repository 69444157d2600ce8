//! Git rules
//!
//! History rewrites on protected branches block; other destructive git
//! operations only warn.

use crate::rules::{Category, Rule};

/// Force pushes to protected branches
pub const HISTORY_REWRITE_RULES: &[Rule] = &[
    Rule::block(
        "git-force-push-protected",
        Category::GitHistoryRewrite,
        r"\bgit\s+push(?:\s[^;&|\n]{0,512}?)?\s(?:--force|-f)\s(?:[^;&|\n]{0,512}?[\s:+/])?(?:main|master|production|prod)(?:\s|$|[;&|])",
        "Force pushing to a protected branch rewrites shared history",
    ),
    Rule::block(
        "git-force-push-protected-trailing",
        Category::GitHistoryRewrite,
        r"\bgit\s+push\s(?:[^;&|\n]{0,512}?[\s:+/])?(?:main|master|production|prod)\s(?:[^;&|\n]{0,512}?\s)?(?:--force|-f)(?:\s|$|[;&|])",
        "Force pushing to a protected branch rewrites shared history",
    ),
    Rule::block(
        "git-force-refspec-protected",
        Category::GitHistoryRewrite,
        r"\bgit\s+push\s[^;&|\n]{0,512}?[\s:]\+(?:[^\s:]{1,256}:)?(?:refs/heads/)?(?:main|master|production|prod)(?:\s|$|[;&|])",
        "Force pushing to a protected branch rewrites shared history",
    ),
];

/// Destructive but recoverable operations that proceed with a warning
pub const WARN_RULES: &[Rule] = &[
    Rule::warn(
        "git-reset-hard",
        Category::GitWarn,
        r"\bgit\s+reset\s(?:[^;&|\n]{0,256}?\s)?--hard\s+(?:HEAD[~^]|@[~^{]|ORIG_HEAD\b|[0-9a-f]{7,40}\b|[A-Za-z0-9_.-]{1,64}/[A-Za-z0-9_./-]{1,200})",
        "Hard reset to an earlier or remote ref discards commits and local changes",
    ),
    Rule::warn(
        "git-reset-hard-trailing",
        Category::GitWarn,
        r"\bgit\s+reset\s+(?:HEAD[~^]|@[~^{]|ORIG_HEAD\b|[0-9a-f]{7,40}\b|[A-Za-z0-9_.-]{1,64}/[A-Za-z0-9_./-]{1,200})[^;&|\n]{0,256}?\s--hard\b",
        "Hard reset to an earlier or remote ref discards commits and local changes",
    ),
    Rule::warn(
        "git-clean-force-dirs",
        Category::GitWarn,
        r"\bgit\s+clean\s(?:[^;&|\n]{0,256}?\s)?-[a-zA-Z]{0,8}(?:f[a-zA-Z]{0,8}d|d[a-zA-Z]{0,8}f)",
        "git clean with force and directory flags deletes untracked files and directories",
    ),
    Rule::warn(
        "git-clean-force-dirs-split",
        Category::GitWarn,
        r"\bgit\s+clean\s(?:[^;&|\n]{0,256}?\s)?(?:(?:-[a-zA-Z]{0,8}f[a-zA-Z]{0,8}|--force)\s(?:[^;&|\n]{0,256}?\s)?-[a-zA-Z]{0,8}d|-[a-zA-Z]{0,8}d[a-zA-Z]{0,8}\s(?:[^;&|\n]{0,256}?\s)?(?:-[a-zA-Z]{0,8}f|--force))",
        "git clean with force and directory flags deletes untracked files and directories",
    ),
    Rule::warn(
        "git-rebase-force",
        Category::GitWarn,
        r"\bgit\s+rebase\s(?:[^;&|\n]{0,256}?\s)?(?:--force-rebase|-f|--no-ff)(?:\s|$|[;&|])",
        "Forced rebase rewrites commit history",
    ),
];
