//! Classification engine for action-gate
//!
//! [`Gate::classify`] runs an action through the fixed [`PIPELINE`] of stages
//! and folds the results into one [`Verdict`].

pub mod matcher;

use crate::action::{Action, ActionKind};
use crate::config::{Config, LimitsConfig};
use crate::error::GateError;
use crate::output::Verdict;
use crate::rules::{Category, CompiledRule, RuleBook, RuleTable};

use matcher::{bounded, excerpt, match_all, match_destructive_delete, match_first};

/// Scanning less than this would let trivially padded input through
const MIN_SCAN_BYTES: usize = 4096;

/// One step of the classification pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    DestructiveDelete,
    DestructiveInfra,
    PrivilegeEscalation,
    GitHistoryRewrite,
    GitWarn,
    SensitivePath,
    SecretLeak,
}

/// Stages in precedence order. The first blocking stage wins; warnings from
/// earlier stages are kept on the verdict.
pub const PIPELINE: [Stage; 7] = [
    Stage::DestructiveDelete,
    Stage::DestructiveInfra,
    Stage::PrivilegeEscalation,
    Stage::GitHistoryRewrite,
    Stage::GitWarn,
    Stage::SensitivePath,
    Stage::SecretLeak,
];

impl Stage {
    /// Whether the stage inspects actions of this kind
    pub fn applies_to(self, kind: ActionKind) -> bool {
        match self {
            Stage::SensitivePath => true,
            Stage::SecretLeak => kind.writes_content(),
            _ => kind == ActionKind::Shell,
        }
    }
}

/// What a single stage concluded
#[derive(Debug)]
enum Outcome {
    Pass,
    Warn(String),
    Block {
        category: Category,
        rule_id: &'static str,
        reason: String,
    },
}

/// The normalized, bounded text each stage looks at
#[derive(Debug)]
struct Subject<'a> {
    kind: ActionKind,
    command: Option<String>,
    path: Option<String>,
    content: Option<&'a str>,
}

impl<'a> Subject<'a> {
    /// Commands and paths are always inspected in full. Only content is cut
    /// to `max_bytes`, with a warning naming the limit.
    fn prepare(action: &'a Action, max_bytes: usize, warnings: &mut Vec<String>) -> Self {
        let command = action.command().map(matcher::normalize_command);
        let path = action.path().map(matcher::normalize_path);
        let content = action.content().map(|c| {
            let (kept, truncated) = bounded(c, max_bytes);
            if truncated {
                warnings.push(format!(
                    "content is larger than {} bytes; only the first {} bytes were inspected",
                    max_bytes, max_bytes
                ));
            }
            kept
        });

        Self {
            kind: action.kind(),
            command,
            path,
            content,
        }
    }

    /// Text checked for sensitive paths: the target path, or the whole command
    fn inspected_path(&self) -> Option<&str> {
        self.path.as_deref().or(self.command.as_deref())
    }
}

/// The safety gate: compiled rule tables plus scanning limits
#[derive(Debug)]
pub struct Gate {
    rules: RuleBook,
    limits: LimitsConfig,
}

impl Gate {
    /// Build a gate, compiling every rule table
    pub fn new(config: &Config) -> Result<Self, GateError> {
        Self::with_limits(config.limits.clone())
    }

    pub fn with_limits(mut limits: LimitsConfig) -> Result<Self, GateError> {
        limits.max_scan_bytes = limits.max_scan_bytes.max(MIN_SCAN_BYTES);
        Ok(Self {
            rules: RuleBook::compile()?,
            limits,
        })
    }

    /// Classify an action.
    ///
    /// Fails with [`GateError::InvalidAction`] for malformed actions; callers
    /// must treat any error as a block.
    pub fn classify(&self, action: &Action) -> Result<Verdict, GateError> {
        action.validate()?;

        let mut warnings = Vec::new();
        let subject = Subject::prepare(action, self.limits.max_scan_bytes, &mut warnings);

        for stage in PIPELINE {
            if !stage.applies_to(subject.kind) {
                continue;
            }
            match self.run_stage(stage, &subject) {
                Outcome::Pass => {}
                Outcome::Warn(message) => warnings.push(message),
                Outcome::Block {
                    category,
                    rule_id,
                    reason,
                } => return Ok(Verdict::block(category, rule_id, reason, warnings)),
            }
        }

        Ok(Verdict::allow(warnings))
    }

    fn run_stage(&self, stage: Stage, subject: &Subject<'_>) -> Outcome {
        let rules = &self.rules;
        match stage {
            Stage::DestructiveDelete => subject
                .command
                .as_deref()
                .and_then(|cmd| match_destructive_delete(cmd, rules))
                .map_or(Outcome::Pass, |hit| self.block(hit.rule, &hit.invocation)),
            Stage::DestructiveInfra => self.first_block(subject.command.as_deref(), &rules.infra),
            Stage::PrivilegeEscalation => {
                self.first_block(subject.command.as_deref(), &rules.privilege)
            }
            Stage::GitHistoryRewrite => {
                self.first_block(subject.command.as_deref(), &rules.git_rewrite)
            }
            Stage::GitWarn => subject
                .command
                .as_deref()
                .and_then(|cmd| match_first(cmd, &rules.git_warn))
                .map_or(Outcome::Pass, |hit| Outcome::Warn(hit.rule.rule.message.to_string())),
            Stage::SensitivePath => self.first_block(subject.inspected_path(), &rules.sensitive_paths),
            Stage::SecretLeak => subject
                .content
                .map_or(Outcome::Pass, |content| self.secret_leak(content)),
        }
    }

    fn first_block(&self, text: Option<&str>, table: &RuleTable) -> Outcome {
        text.and_then(|t| match_first(t, table))
            .map_or(Outcome::Pass, |hit| self.block(hit.rule, hit.excerpt))
    }

    fn block(&self, rule: &CompiledRule, offending: &str) -> Outcome {
        let rule = rule.rule;
        Outcome::Block {
            category: rule.category,
            rule_id: rule.id,
            reason: format!(
                "Blocked ({}): {} [{}]",
                rule.category.label(),
                rule.message,
                excerpt(offending, self.limits.max_excerpt_chars)
            ),
        }
    }

    /// Collect every secret detector that fires; the secret itself is never
    /// copied into the reason.
    fn secret_leak(&self, content: &str) -> Outcome {
        let hits = match_all(content, &self.rules.secrets);
        let Some(first) = hits.first() else {
            return Outcome::Pass;
        };

        let mut detected: Vec<&str> = Vec::new();
        for hit in &hits {
            if !detected.contains(&hit.rule.message) {
                detected.push(hit.rule.message);
            }
        }

        Outcome::Block {
            category: Category::SecretLeak,
            rule_id: first.rule.id,
            reason: format!(
                "Blocked ({}): secrets detected in content: {}",
                Category::SecretLeak.label(),
                detected.join(", ")
            ),
        }
    }

    /// Replace anything secret-shaped in `text` with `[REDACTED]`
    pub fn redact(&self, text: &str) -> String {
        self.rules
            .secrets
            .iter()
            .fold(text.to_string(), |acc, rule| rule.redact(&acc, "[REDACTED]"))
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }
}
