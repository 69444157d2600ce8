//! Sensitive path rules
//!
//! Matched against file paths for Read/Write/Edit, and against the whole
//! command line for shell commands (`cat ~/.ssh/id_rsa`).

use crate::rules::{Category, Rule};

/// `.env.example` is the one dotenv file agents are expected to touch, and
/// `process.env` is JavaScript, not a file
fn is_dotenv_file(hit: &str) -> bool {
    let name = hit
        .trim_matches(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        .to_ascii_lowercase();
    !name.ends_with(".env.example") && name != "process.env"
}

pub const SENSITIVE_PATH_RULES: &[Rule] = &[
    Rule::block(
        "env-file",
        Category::SensitivePath,
        r#"(?i)(?:^|[^\w.])\.env(?:\.[A-Za-z0-9_-]{1,32})?\b|(?:^|[\s/'"=])[A-Za-z0-9_-]{1,64}\.env(?:$|[\s'"`;&|)])"#,
        "Access to .env files is blocked. Use .env.example instead.",
    )
    .with_filter(is_dotenv_file),
    Rule::block(
        "credentials-json",
        Category::SensitivePath,
        r"(?i)credentials\.json\b",
        "Access to credentials files is blocked.",
    ),
    Rule::block(
        "secrets-file",
        Category::SensitivePath,
        r"(?i)\bsecrets?\.(?:json|ya?ml)\b",
        "Access to secrets files is blocked.",
    ),
    Rule::block(
        "ssh-dir",
        Category::SensitivePath,
        r"(?i)\.ssh[/\\]",
        "Access to the SSH directory is blocked.",
    ),
    Rule::block(
        "ssh-key",
        Category::SensitivePath,
        r"(?i)id_(?:rsa|dsa|ecdsa|ed25519)(?:\b|_)",
        "Access to SSH keys is blocked.",
    ),
    Rule::block(
        "aws-credentials",
        Category::SensitivePath,
        r"(?i)\.aws[/\\]credentials\b",
        "Access to AWS credentials is blocked.",
    ),
    Rule::block(
        "gcloud-credentials",
        Category::SensitivePath,
        r"(?i)gcloud[/\\](?:credentials\.db|access_tokens\.db|application_default_credentials\.json|legacy_credentials)",
        "Access to Google Cloud credentials is blocked.",
    ),
    Rule::block(
        "azure-tokens",
        Category::SensitivePath,
        r"(?i)\.azure[/\\](?:accesstokens\.json|msal_token_cache)",
        "Access to Azure credentials is blocked.",
    ),
    Rule::block(
        "docker-config",
        Category::SensitivePath,
        r"(?i)\.docker[/\\]config\.json\b",
        "Access to Docker registry credentials is blocked.",
    ),
    Rule::block(
        "npmrc",
        Category::SensitivePath,
        r"(?i)\.npmrc\b",
        "Access to npm credentials is blocked.",
    ),
    Rule::block(
        "pypirc",
        Category::SensitivePath,
        r"(?i)\.pypirc\b",
        "Access to PyPI credentials is blocked.",
    ),
    Rule::block(
        "netrc",
        Category::SensitivePath,
        r"(?i)\.netrc\b",
        "Access to netrc credentials is blocked.",
    ),
    Rule::block(
        "pgpass",
        Category::SensitivePath,
        r"(?i)\.pgpass\b",
        "Access to PostgreSQL credentials is blocked.",
    ),
    Rule::block(
        "kube-config",
        Category::SensitivePath,
        r"(?i)\.kube[/\\]config\b",
        "Access to Kubernetes config is blocked.",
    ),
    Rule::block(
        "key-bundle",
        Category::SensitivePath,
        r"(?i)\.(?:pem|p12|pfx)\b",
        "Access to private key and certificate bundles is blocked.",
    ),
];
