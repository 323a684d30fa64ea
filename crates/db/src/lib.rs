pub mod connection;
pub mod fixtures;
pub mod migrations;
pub mod repositories;

pub use connection::{connect, DbPool};
pub use fixtures::{DemoSeedDataset, DropboxSeedInfo, SeedResult, VerificationResult};
