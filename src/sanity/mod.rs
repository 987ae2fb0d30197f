pub mod runner;
pub mod sanity_config;
pub mod sanity_report;

pub use runner::run_sanity_check;
pub use sanity_config::SanityConfig;
pub use sanity_report::SanityReport;
