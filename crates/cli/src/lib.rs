pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::handle::HandleArgs;

#[derive(Debug, Parser)]
#[command(
    name = "assigndrop",
    about = "Assigndrop operator CLI",
    long_about = "Operate the assignment dropbox workflow: handle a single user message, \
                  apply migrations, load demo fixtures, and run readiness checks.",
    after_help = "Examples:\n  assigndrop handle --user T1 --intent create\n  \
                  assigndrop handle --user S1 --intent submit --assignment-id AB12CD --link http://x/y\n  \
                  assigndrop doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Handle one structured workflow call (one user message) and print the response"
    )]
    Handle {
        #[arg(long, help = "Caller identity as supplied by the messaging transport")]
        user: String,
        #[arg(long, help = "Declared intent: create, submit, or view (omit for the greeting)")]
        intent: Option<String>,
        #[arg(long, help = "6-character assignment id, for submit and view")]
        assignment_id: Option<String>,
        #[arg(long, help = "Submission link, for submit")]
        link: Option<String>,
    },
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic demo dropbox fixtures and verify them")]
    Seed,
    #[command(about = "Validate config, database connectivity, and schema readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Handle { user, intent, assignment_id, link } => {
            commands::handle::run(HandleArgs { user, intent, assignment_id, link })
        }
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
