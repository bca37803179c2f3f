pub mod report;
pub mod runner;
pub mod server;
pub mod utils;

// Re-export common items
pub use report::{generate_report, Report, TestResult};
pub use runner::Runner;
pub use server::StaticServer;
