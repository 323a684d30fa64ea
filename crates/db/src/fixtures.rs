use sqlx::Executor;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Canonical demo seeds and their verification contract.
const SEED_DROPBOXES: &[SeedDropboxContract] = &[
    SeedDropboxContract {
        submission_id: "DEMO01",
        owner_identity: "demo-teacher-1",
        expected_submission_count: 3,
        description: "active dropbox with three submissions",
    },
    SeedDropboxContract {
        submission_id: "DEMO02",
        owner_identity: "demo-teacher-2",
        expected_submission_count: 0,
        description: "freshly created dropbox, no submissions yet",
    },
];

struct SeedDropboxContract {
    submission_id: &'static str,
    owner_identity: &'static str,
    expected_submission_count: i64,
    description: &'static str,
}

/// Deterministic demo dataset for the assignment dropbox workflow.
///
/// Loads are idempotent: fixture rows carry fixed ids and are inserted with
/// `INSERT OR REPLACE`, so repeated `seed` runs converge on the same state.
pub struct DemoSeedDataset;

#[derive(Debug)]
pub struct SeedResult {
    pub dropboxes_seeded: Vec<DropboxSeedInfo>,
}

#[derive(Debug)]
pub struct DropboxSeedInfo {
    pub submission_id: &'static str,
    pub owner_identity: &'static str,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}

impl DemoSeedDataset {
    pub const SQL: &'static str = include_str!("../../../config/fixtures/demo_seed_data.sql");

    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;
        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        let dropboxes_seeded = SEED_DROPBOXES
            .iter()
            .map(|dropbox| DropboxSeedInfo {
                submission_id: dropbox.submission_id,
                owner_identity: dropbox.owner_identity,
                description: dropbox.description,
            })
            .collect::<Vec<_>>();

        Ok(SeedResult { dropboxes_seeded })
    }

    /// Verifies the seeded rows match the contract above.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::new();

        for dropbox in SEED_DROPBOXES {
            let dropbox_present: i64 = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM assignments \
                 WHERE submission_id = ?1 AND owner_identity = ?2)",
            )
            .bind(dropbox.submission_id)
            .bind(dropbox.owner_identity)
            .fetch_one(pool)
            .await?;
            checks.push((dropbox.submission_id, dropbox_present == 1));

            let submission_count: i64 = sqlx::query_scalar(
                "SELECT COUNT(1) FROM submissions WHERE assignment_submission_id = ?1",
            )
            .bind(dropbox.submission_id)
            .fetch_one(pool)
            .await?;
            checks.push((dropbox.count_label(), submission_count == dropbox.expected_submission_count));
        }

        let all_present = checks.iter().all(|(_, passed)| *passed);
        Ok(VerificationResult { all_present, checks })
    }
}

impl SeedDropboxContract {
    fn count_label(&self) -> &'static str {
        match self.submission_id {
            "DEMO01" => "DEMO01-submission-count",
            _ => "DEMO02-submission-count",
        }
    }
}
