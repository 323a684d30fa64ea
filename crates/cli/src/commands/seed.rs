use assigndrop_core::config::{AppConfig, LoadOptions};
use assigndrop_db::{connect, migrations, DemoSeedDataset, DropboxSeedInfo};

use crate::commands::CommandResult;

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "seed",
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

        let seed_result = DemoSeedDataset::load(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;

        let verification = DemoSeedDataset::verify(&pool)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), 6u8))?;

        let run_result: Result<Vec<DropboxSeedInfo>, (&'static str, String, u8)> =
            if verification.all_present {
                Ok(seed_result.dropboxes_seeded)
            } else {
                Err(("seed_verification", verification_message(&verification.checks), 6u8))
            };

        pool.close().await;
        run_result
    });

    match result {
        Ok(dropboxes) => {
            let dropbox_lines = dropboxes
                .iter()
                .map(|info| {
                    format!("  - {}: {} ({})", info.submission_id, info.owner_identity, info.description)
                })
                .collect::<Vec<_>>();
            let message =
                format!("demo dropbox dataset loaded:\n{}", dropbox_lines.join("\n"));
            CommandResult::success("seed", message)
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn verification_message(checks: &[(&'static str, bool)]) -> String {
    let failed_checks =
        checks.iter().filter_map(|(check, passed)| (!passed).then_some(*check)).collect::<Vec<_>>();

    if failed_checks.is_empty() {
        "some seed data failed to load".to_string()
    } else {
        format!("seed verification failed for checks: {}", failed_checks.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::verification_message;

    #[test]
    fn verification_error_message_targets_failed_checks() {
        let checks =
            [("DEMO01", true), ("DEMO01-submission-count", false), ("DEMO02", false)];

        assert_eq!(
            verification_message(&checks),
            "seed verification failed for checks: DEMO01-submission-count, DEMO02"
        );
    }

    #[test]
    fn verification_error_message_falls_back_to_generic_when_no_labels() {
        let checks = [("DEMO01", true), ("DEMO02", true)];
        assert_eq!(verification_message(&checks), "some seed data failed to load");
    }
}
