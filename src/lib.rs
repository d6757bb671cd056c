pub mod config;
pub mod ingestion;
pub mod init;
pub mod output;
pub mod store;
pub mod telemetry;
pub mod templates;
pub mod topics;
