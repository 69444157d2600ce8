//! Secret detection rules for written content
//!
//! Unlike the other tables, every matching rule is reported, so one write can
//! surface several kinds of leaked credential at once. Messages double as the
//! sub-category names listed in block reasons.

use crate::rules::{Category, Rule};

/// Minimum Shannon entropy (bits per char) for a quoted token to look random
const MIN_TOKEN_ENTROPY: f64 = 3.5;

/// Accept quoted tokens that look randomly generated rather than like words
fn high_entropy_token(hit: &str) -> bool {
    let token = hit.trim_matches(|c| c == '"' || c == '\'');
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    let letters = token.chars().filter(|c| c.is_ascii_alphabetic()).count();
    digits >= 2 && letters >= 2 && shannon_entropy(token) >= MIN_TOKEN_ENTROPY
}

fn shannon_entropy(token: &str) -> f64 {
    let mut counts = [0usize; 256];
    for byte in token.bytes() {
        counts[byte as usize] += 1;
    }
    let len = token.len() as f64;
    counts
        .iter()
        .filter(|&&n| n > 0)
        .map(|&n| {
            let p = n as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject unquoted values that read like a field access (`config.password`)
fn not_code_reference(hit: &str) -> bool {
    let Some(split) = hit.find(|c| c == '=' || c == ':') else {
        return true;
    };
    let value = hit[split + 1..]
        .trim()
        .trim_end_matches(|c: char| c == ';' || c == ',');
    if value.starts_with(|c| c == '"' || c == '\'') {
        return true;
    }
    let is_ident = |part: &str| {
        part.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
            && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    !(value.contains('.') && value.split('.').all(is_ident))
}

pub const SECRET_RULES: &[Rule] = &[
    Rule::block(
        "private-key",
        Category::SecretLeak,
        r"-----BEGIN (?:RSA |EC |DSA |OPENSSH |ENCRYPTED |PGP )?PRIVATE KEY(?: BLOCK)?-----",
        "Private key detected",
    ),
    Rule::block(
        "aws-access-key-id",
        Category::SecretLeak,
        r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b",
        "AWS access key ID detected",
    ),
    Rule::block(
        "github-token",
        Category::SecretLeak,
        r"\bgh[pousr]_[A-Za-z0-9]{36,255}\b",
        "GitHub token detected",
    ),
    Rule::block(
        "github-fine-grained-token",
        Category::SecretLeak,
        r"\bgithub_pat_[A-Za-z0-9_]{22,255}",
        "GitHub token detected",
    ),
    Rule::block(
        "stripe-key",
        Category::SecretLeak,
        r"\b(?:sk|rk)_(?:live|test)_[A-Za-z0-9]{16,247}\b",
        "Stripe API key detected",
    ),
    Rule::block(
        "jwt",
        Category::SecretLeak,
        r"\beyJ[A-Za-z0-9_-]{5,2048}\.eyJ[A-Za-z0-9_-]{5,2048}\.[A-Za-z0-9_-]{10,2048}",
        "JSON Web Token detected",
    ),
    Rule::block(
        "connection-string-password",
        Category::SecretLeak,
        r#"(?i)\b[a-z][a-z0-9+.-]{1,20}://[^\s:/@'"]{1,128}:[^\s/@'"]{1,128}@[^\s/'"]{1,256}"#,
        "Connection string with embedded password detected",
    ),
    Rule::block(
        "npm-token",
        Category::SecretLeak,
        r"\bnpm_[A-Za-z0-9]{36}\b",
        "Package registry token detected",
    ),
    Rule::block(
        "pypi-token",
        Category::SecretLeak,
        r"\bpypi-AgE[A-Za-z0-9_-]{50,512}",
        "Package registry token detected",
    ),
    Rule::block(
        "api-key-assignment",
        Category::SecretLeak,
        r#"(?i)(?:api|secret)[_-]?key['"]?\s{0,8}[=:]\s{0,8}['"]?[A-Za-z0-9_\-/+=.]{16,256}"#,
        "API key assignment detected",
    ),
    Rule::block(
        "password-assignment",
        Category::SecretLeak,
        r#"(?im)(?:password|passwd|pwd)['"]?\s{0,8}[=:]\s{0,8}(?:'[^'\r\n]{8,256}'|"[^"\r\n]{8,256}"|[^\s'"(){}\[\];,<>$]{8,256}(?:$|[\s;,]))"#,
        "Password assignment detected",
    )
    .with_filter(not_code_reference),
    Rule::block(
        "bearer-token",
        Category::SecretLeak,
        r"(?i)\bbearer\s{1,8}[A-Za-z0-9._~+/-]{20,2048}=*",
        "Bearer token detected",
    ),
    Rule::block(
        "high-entropy-string",
        Category::SecretLeak,
        r#"["'][A-Za-z0-9+/_=-]{20,512}["']"#,
        "High-entropy secret-like string detected",
    )
    .with_filter(high_entropy_token),
];
