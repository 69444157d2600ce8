//! Rule tables for action-gate
//!
//! Each concern gets its own ordered, immutable table. Tables are plain
//! `&'static [Rule]` slices; they are compiled into [`RuleTable`]s once, when a
//! [`crate::Gate`] is built.

pub mod destructive;
pub mod git;
pub mod infra;
pub mod paths;
pub mod privilege;
pub mod secrets;

use regex::Regex;
use std::fmt;

use crate::error::GateError;

/// What kind of danger a rule detects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    DestructiveDelete,
    PrivilegeEscalation,
    DestructiveInfra,
    GitHistoryRewrite,
    GitWarn,
    SensitivePath,
    SecretLeak,
}

impl Category {
    /// Stable machine-readable name
    pub fn as_str(self) -> &'static str {
        match self {
            Category::DestructiveDelete => "destructive-delete",
            Category::PrivilegeEscalation => "privilege-escalation",
            Category::DestructiveInfra => "destructive-infra",
            Category::GitHistoryRewrite => "git-history-rewrite",
            Category::GitWarn => "git-warn",
            Category::SensitivePath => "sensitive-path",
            Category::SecretLeak => "secret-leak",
        }
    }

    /// Human-readable label used in block reasons
    pub fn label(self) -> &'static str {
        match self {
            Category::DestructiveDelete => "destructive delete",
            Category::PrivilegeEscalation => "privilege escalation",
            Category::DestructiveInfra => "destructive system operation",
            Category::GitHistoryRewrite => "git history rewrite",
            Category::GitWarn => "risky git operation",
            Category::SensitivePath => "sensitive path",
            Category::SecretLeak => "secret leak",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a match stops the action or only warns about it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Block,
    Warn,
}

/// Extra check run on each regex hit; the rule matches only if it accepts one
pub type MatchFilter = fn(&str) -> bool;

/// A security rule definition
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Unique identifier for this rule
    pub id: &'static str,

    /// Category of danger
    pub category: Category,

    /// Block or warn
    pub severity: Severity,

    /// Regex pattern to match
    pub pattern: &'static str,

    /// Human-readable explanation
    pub message: &'static str,

    /// Structural predicate applied to each hit
    pub filter: Option<MatchFilter>,
}

impl Rule {
    /// Create a new blocking rule
    pub const fn block(
        id: &'static str,
        category: Category,
        pattern: &'static str,
        message: &'static str,
    ) -> Self {
        Self {
            id,
            category,
            severity: Severity::Block,
            pattern,
            message,
            filter: None,
        }
    }

    /// Create a new warning rule
    pub const fn warn(
        id: &'static str,
        category: Category,
        pattern: &'static str,
        message: &'static str,
    ) -> Self {
        Self {
            id,
            category,
            severity: Severity::Warn,
            pattern,
            message,
            filter: None,
        }
    }

    /// Attach a structural predicate to the rule
    pub const fn with_filter(mut self, filter: MatchFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// A rule with its compiled regex
#[derive(Debug)]
pub struct CompiledRule {
    pub rule: &'static Rule,
    regex: Regex,
}

impl CompiledRule {
    fn compile(rule: &'static Rule) -> Result<Self, GateError> {
        let regex = Regex::new(rule.pattern).map_err(|e| GateError::PatternCompile {
            rule: rule.id,
            detail: e.to_string(),
        })?;
        Ok(Self { rule, regex })
    }

    /// Return the first hit accepted by the rule's filter, if any
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|hit| self.rule.filter.map_or(true, |accept| accept(hit)))
    }

    /// Check whether the rule matches the text
    pub fn is_match(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    /// Replace every accepted hit with `replacement`
    pub fn redact(&self, text: &str, replacement: &str) -> String {
        self.regex
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let hit = &caps[0];
                if self.rule.filter.map_or(true, |accept| accept(hit)) {
                    replacement.to_string()
                } else {
                    hit.to_string()
                }
            })
            .into_owned()
    }
}

/// An ordered table of compiled rules
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
}

impl RuleTable {
    /// Compile every rule in the table, failing on the first bad pattern
    pub fn compile(rules: &'static [Rule]) -> Result<Self, GateError> {
        let rules = rules
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }
}

/// Every table the gate needs, compiled
#[derive(Debug)]
pub struct RuleBook {
    pub rm_invocation: Regex,
    pub delete_targets: RuleTable,
    pub forced_delete_targets: RuleTable,
    pub infra: RuleTable,
    pub privilege: RuleTable,
    pub git_rewrite: RuleTable,
    pub git_warn: RuleTable,
    pub sensitive_paths: RuleTable,
    pub secrets: RuleTable,
}

impl RuleBook {
    /// Compile all static tables
    pub fn compile() -> Result<Self, GateError> {
        let rm_invocation =
            Regex::new(destructive::RM_INVOCATION).map_err(|e| GateError::PatternCompile {
                rule: "rm-invocation",
                detail: e.to_string(),
            })?;

        Ok(Self {
            rm_invocation,
            delete_targets: RuleTable::compile(destructive::DANGEROUS_TARGETS)?,
            forced_delete_targets: RuleTable::compile(destructive::FORCED_TARGETS)?,
            infra: RuleTable::compile(infra::INFRA_RULES)?,
            privilege: RuleTable::compile(privilege::PRIVILEGE_RULES)?,
            git_rewrite: RuleTable::compile(git::HISTORY_REWRITE_RULES)?,
            git_warn: RuleTable::compile(git::WARN_RULES)?,
            sensitive_paths: RuleTable::compile(paths::SENSITIVE_PATH_RULES)?,
            secrets: RuleTable::compile(secrets::SECRET_RULES)?,
        })
    }
}

/// All static tables, for checks that walk every rule
pub fn all_tables() -> [&'static [Rule]; 8] {
    [
        destructive::DANGEROUS_TARGETS,
        destructive::FORCED_TARGETS,
        infra::INFRA_RULES,
        privilege::PRIVILEGE_RULES,
        git::HISTORY_REWRITE_RULES,
        git::WARN_RULES,
        paths::SENSITIVE_PATH_RULES,
        secrets::SECRET_RULES,
    ]
}
