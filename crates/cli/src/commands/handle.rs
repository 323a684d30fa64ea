use std::str::FromStr;

use uuid::Uuid;

use assigndrop_agent::{TracingAuditSink, WorkflowEngine};
use assigndrop_core::config::{AppConfig, LoadOptions, LogFormat};
use assigndrop_core::errors::WorkflowError;
use assigndrop_core::workflow::{Intent, WorkflowRequest};
use assigndrop_db::repositories::{SqlAssignmentRepository, SqlSubmissionRepository};
use assigndrop_db::{connect, migrations};

use crate::commands::CommandResult;

#[derive(Debug)]
pub struct HandleArgs {
    pub user: String,
    pub intent: Option<String>,
    pub assignment_id: Option<String>,
    pub link: Option<String>,
}

/// One stateless engine invocation: the transport hands over the caller
/// identity and whatever optional fields this message carried, and the
/// response string goes straight back to the user.
pub fn run(args: HandleArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "handle",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    init_logging(&config);

    let intent = match args.intent.as_deref().map(Intent::from_str).transpose() {
        Ok(intent) => intent,
        Err(error) => {
            return CommandResult::failure("handle", "invalid_intent", error.user_message(), 6);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "handle",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let engine = WorkflowEngine::new(
            SqlAssignmentRepository::new(pool.clone()),
            SqlSubmissionRepository::new(pool.clone()),
        );

        let mut request = WorkflowRequest::new(args.user.clone(), intent);
        if let Some(assignment_id) = args.assignment_id.clone() {
            request = request.with_assignment_id(assignment_id);
        }
        if let Some(link) = args.link.clone() {
            request = request.with_submission_link(link);
        }

        let correlation_id = Uuid::new_v4().to_string();
        let outcome = engine
            .handle_with_audit(&request, &TracingAuditSink, &correlation_id)
            .await
            .map_err(|error| {
                let error_class = match error {
                    WorkflowError::Storage { .. } => "storage",
                    WorkflowError::InvalidIntent { .. } => "invalid_intent",
                };
                (error_class, error.user_message().to_string(), 7u8)
            });

        pool.close().await;
        outcome
    });

    match result {
        Ok(response) => CommandResult::success("handle", response),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("handle", error_class, message, exit_code)
        }
    }
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    // try_init: repeated invocations in one process (tests) keep the first
    // subscriber.
    let builder =
        tracing_subscriber::fmt().with_target(false).with_max_level(log_level).with_writer(std::io::stderr);
    let result = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    let _ = result;
}
