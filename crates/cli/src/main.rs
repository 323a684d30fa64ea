use std::process::ExitCode;

fn main() -> ExitCode {
    assigndrop_cli::run()
}
