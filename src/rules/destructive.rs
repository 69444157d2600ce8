//! Destructive delete rules
//!
//! `rm` is checked structurally rather than with one regex: the invocation
//! pattern below finds each `rm` and its argument run, and the target tables
//! are matched against the individual (lower-cased, unquoted) targets.

use crate::rules::{Category, Rule};

/// One `rm` invocation and the arguments up to the next command separator
pub const RM_INVOCATION: &str = r#"(?:^|[\s;&|(`'"/\\])rm\s+([^;&|\n`)]*)"#;

/// Targets that are dangerous for any recursive delete, forced or not
pub const DANGEROUS_TARGETS: &[Rule] = &[
    Rule::block(
        "rm-root",
        Category::DestructiveDelete,
        r"^/+$",
        "Recursive delete of the root filesystem",
    ),
    Rule::block(
        "rm-root-wildcard",
        Category::DestructiveDelete,
        r"^/+\*",
        "Recursive delete of everything under the root directory",
    ),
    Rule::block(
        "rm-home",
        Category::DestructiveDelete,
        r"^(?:~|\$home\b|\$\{home\})",
        "Recursive delete of the home directory",
    ),
    Rule::block(
        "rm-parent-traversal",
        Category::DestructiveDelete,
        r"(?:^|/)\.\.(?:/|$)",
        "Recursive delete reaching outside the working directory",
    ),
    Rule::block(
        "rm-bare-wildcard",
        Category::DestructiveDelete,
        r"^(?:\./)?\.?\*$",
        "Recursive delete with a bare wildcard",
    ),
];

/// Extra targets that are dangerous once `--force` is also present
pub const FORCED_TARGETS: &[Rule] = &[Rule::block(
    "rm-forced-absolute",
    Category::DestructiveDelete,
    r"^/",
    "Forced recursive delete of an absolute path",
)];
