//! Privilege escalation rules

use crate::rules::{Category, Rule};

pub const PRIVILEGE_RULES: &[Rule] = &[
    Rule::block(
        "sudo",
        Category::PrivilegeEscalation,
        r"(?i)\bsudo(?:\s|$)",
        "sudo commands are blocked",
    ),
    Rule::block(
        "su-login",
        Category::PrivilegeEscalation,
        r"(?i)(?:^|[\s;&|(])su\s+-",
        "su commands are blocked",
    ),
    Rule::block(
        "doas",
        Category::PrivilegeEscalation,
        r"(?i)(?:^|[\s;&|(])doas\s",
        "doas commands are blocked",
    ),
];
