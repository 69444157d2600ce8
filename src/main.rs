//! action-gate - pre-execution safety gate for coding-agent tool calls
//!
//! Reads one JSON request on stdin, writes the decision as JSON on stdout,
//! and exits 0 to allow or 2 to block.
//!
//! # Usage
//!
//! ```bash
//! # Plain request
//! echo '{"kind":"shell","commandText":"rm -rf /"}' | action-gate
//!
//! # As an agent PreToolUse hook
//! echo '{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}' | action-gate
//! ```

use std::env;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use serde_json::Value;

use action_gate::{
    audit::{AuditEntry, AuditLogger},
    config::Config,
    Action, ActionRequest, Gate, GateError, GateResponse, HookInput, HookOutput, Verdict,
};

const EXIT_BLOCK: u8 = 2;

fn print_version() {
    println!("action-gate {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"action-gate - pre-execution safety gate for coding-agent tool calls

USAGE:
    action-gate [OPTIONS] < request.json

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -c, --config PATH       Path to config file

INPUT:
    {{"kind":"shell","commandText":"..."}}
    {{"kind":"read"|"write"|"edit","targetPath":"...","contentPreview":"..."}}
    or a PreToolUse hook payload ({{"tool_name":..., "tool_input":...}})

EXIT STATUS:
    0   allowed (possibly with warnings)
    2   blocked, or the request could not be evaluated
"#
    );
}

struct Args {
    help: bool,
    version: bool,
    config_path: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            config_path: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                arg if arg.starts_with("--config=") => {
                    let path = arg.trim_start_matches("--config=");
                    result.config_path = Some(path.to_string());
                }
                _ => {}
            }
            i += 1;
        }

        result
    }
}

/// Which contract the caller speaks
enum Request {
    Gate(Result<Action, GateError>),
    Hook {
        action: Option<Result<Action, GateError>>,
        session_id: Option<String>,
    },
}

fn parse_request(json: &str) -> Result<Request, GateError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| GateError::InvalidAction(format!("malformed JSON: {}", e)))?;

    if value.get("kind").is_some() {
        let action = serde_json::from_value::<ActionRequest>(value)
            .map_err(|e| GateError::InvalidAction(e.to_string()))
            .and_then(Action::try_from);
        return Ok(Request::Gate(action));
    }

    let hook: HookInput = serde_json::from_value(value)
        .map_err(|e| GateError::InvalidAction(format!("unrecognized request: {}", e)))?;
    let action = hook
        .to_request()
        .transpose()
        .map(|request| request.and_then(Action::try_from));
    Ok(Request::Hook {
        action,
        session_id: hook.session_id,
    })
}

fn emit(json: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", json);
    let _ = handle.flush();
}

fn exit_for(verdict: &Result<Verdict, GateError>) -> ExitCode {
    match verdict {
        Ok(v) if v.is_allow() => ExitCode::SUCCESS,
        _ => ExitCode::from(EXIT_BLOCK),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let config = if let Some(ref path) = args.config_path {
        Config::load_from(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Warning: {}; using defaults", e);
            Config::default()
        })
    } else {
        Config::load()
    };

    let gate = match Gate::new(&config) {
        Ok(gate) => gate,
        Err(e) => {
            eprintln!("Error: {}", e);
            emit(&GateResponse::from_error(&e).to_json());
            return ExitCode::from(EXIT_BLOCK);
        }
    };

    let mut logger = AuditLogger::new(config.audit_path().as_deref());

    let mut input_json = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input_json) {
        let err = GateError::InvalidAction(format!("failed to read stdin: {}", e));
        eprintln!("Error: {} (blocking)", err);
        emit(&GateResponse::from_error(&err).to_json());
        return ExitCode::from(EXIT_BLOCK);
    }

    // Nothing to check
    if input_json.trim().is_empty() {
        emit(&GateResponse::from_verdict(&Verdict::allow(Vec::new())).to_json());
        return ExitCode::SUCCESS;
    }

    let (action, session_id, hook) = match parse_request(&input_json) {
        Ok(Request::Gate(action)) => (action, None, false),
        Ok(Request::Hook {
            action: None,
            ..
        }) => {
            // Tools the gate does not inspect pass through
            emit(&HookOutput::allow().to_json());
            return ExitCode::SUCCESS;
        }
        Ok(Request::Hook {
            action: Some(action),
            session_id,
        }) => (action, session_id, true),
        Err(e) => (Err(e), None, false),
    };

    let verdict = action
        .as_ref()
        .map_err(Clone::clone)
        .and_then(|action| gate.classify(action));

    let entry = match (&action, &verdict) {
        (Ok(action), Ok(v)) => AuditEntry::new(&gate, action, v, session_id.as_deref()),
        (_, Err(e)) | (Err(e), _) => {
            eprintln!("Error: {} (blocking)", e);
            AuditEntry::error(e, session_id.as_deref())
        }
    };
    if let Err(e) = logger.log(&entry) {
        eprintln!("Warning: Failed to write audit log: {}", e);
    }

    if hook {
        let output = match &verdict {
            Ok(v) => HookOutput::from_verdict(v),
            Err(e) => HookOutput::from_error(e),
        };
        emit(&output.to_json());
        // Exit code 2 makes the agent read stderr, so the reason goes there too
        if let Some(reason) = output.deny_reason() {
            eprintln!("{}", reason);
        }
    } else {
        let response = match &verdict {
            Ok(v) => GateResponse::from_verdict(v),
            Err(e) => GateResponse::from_error(e),
        };
        emit(&response.to_json());
    }

    exit_for(&verdict)
}
