use std::env;
use std::sync::{Mutex, OnceLock};

use assigndrop_cli::commands::handle::{self, HandleArgs};
use assigndrop_cli::commands::{doctor, migrate, seed};
use serde_json::Value;

const MANAGED_ENV_VARS: &[&str] = &[
    "ASSIGNDROP_DATABASE_URL",
    "ASSIGNDROP_DATABASE_MAX_CONNECTIONS",
    "ASSIGNDROP_DATABASE_TIMEOUT_SECS",
    "ASSIGNDROP_LOGGING_LEVEL",
    "ASSIGNDROP_LOG_LEVEL",
    "ASSIGNDROP_LOGGING_FORMAT",
    "ASSIGNDROP_LOG_FORMAT",
];

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn with_env(vars: &[(&str, &str)], test: impl FnOnce()) {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    for var in MANAGED_ENV_VARS {
        env::remove_var(var);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test();

    for (key, _) in vars {
        env::remove_var(key);
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|error| {
        panic!("command output should be JSON, got `{output}`: {error}")
    })
}

fn memory_db_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("ASSIGNDROP_DATABASE_URL", "sqlite::memory:?cache=shared"),
        ("ASSIGNDROP_DATABASE_MAX_CONNECTIONS", "1"),
    ]
}

#[test]
fn migrate_returns_success_with_memory_database() {
    with_env(&memory_db_env(), || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn handle_without_intent_returns_the_greeting() {
    with_env(&memory_db_env(), || {
        let result = handle::run(HandleArgs {
            user: "U1".to_string(),
            intent: None,
            assignment_id: None,
            link: None,
        });
        assert_eq!(result.exit_code, 0, "greeting is a success path");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "handle");
        assert_eq!(payload["status"], "ok");
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("AssignmentDrop assistant"));
    });
}

#[test]
fn handle_rejects_unknown_intent_with_guidance() {
    with_env(&memory_db_env(), || {
        let result = handle::run(HandleArgs {
            user: "U1".to_string(),
            intent: Some("delete".to_string()),
            assignment_id: None,
            link: None,
        });
        assert_eq!(result.exit_code, 6, "unknown intent has its own exit code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "invalid_intent");
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("'create'"));
    });
}

#[test]
fn handle_walks_submit_gate_one() {
    with_env(&memory_db_env(), || {
        let result = handle::run(HandleArgs {
            user: "S1".to_string(),
            intent: Some("submit".to_string()),
            assignment_id: None,
            link: None,
        });
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "ok");
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("assignment ID"), "gate 1 must ask for the id");
    });
}

#[test]
fn handle_creates_a_dropbox_end_to_end() {
    with_env(&memory_db_env(), || {
        let result = handle::run(HandleArgs {
            user: "T1".to_string(),
            intent: Some("create".to_string()),
            assignment_id: None,
            link: None,
        });
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "ok");
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("assignment dropbox has been created"));
    });
}

#[test]
fn seed_is_idempotent_across_runs() {
    with_env(&memory_db_env(), || {
        let first = seed::run();
        assert_eq!(first.exit_code, 0, "expected first seed invocation success");
        let first_payload = parse_payload(&first.output);
        assert_eq!(first_payload["command"], "seed");
        assert_eq!(first_payload["status"], "ok");
        let message = first_payload["message"].as_str().unwrap_or("");
        assert!(message.contains("DEMO01"));
        assert!(message.contains("DEMO02"));

        let second = seed::run();
        assert_eq!(second.exit_code, 0, "expected second seed invocation success");
        let second_payload = parse_payload(&second.output);
        assert_eq!(second_payload["status"], "ok");
        assert_eq!(first_payload["message"], second_payload["message"]);
    });
}

#[test]
fn doctor_flags_unmigrated_schema() {
    with_env(&memory_db_env(), || {
        let output = doctor::run(true);
        let payload = parse_payload(&output);

        assert_eq!(payload["overall_status"], "fail");
        let checks = payload["checks"].as_array().expect("checks array");
        let schema_check = checks
            .iter()
            .find(|check| check["name"] == "schema_readiness")
            .expect("schema readiness check present");
        assert_eq!(schema_check["status"], "fail");
        let connectivity_check = checks
            .iter()
            .find(|check| check["name"] == "database_connectivity")
            .expect("connectivity check present");
        assert_eq!(connectivity_check["status"], "pass");
    });
}
