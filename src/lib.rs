pub mod backend;
pub mod config;
pub mod error;
pub mod ingest;
pub mod output;
pub mod session;
pub mod shell;
pub mod summary;
