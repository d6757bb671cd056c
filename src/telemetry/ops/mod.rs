pub mod fetch;
pub mod list;
pub mod generate;
pub mod init;
