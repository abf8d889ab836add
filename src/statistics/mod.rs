//! Reporting of search statistics in a `PREFIX name=value` line format.
mod statistic_logging;

pub use statistic_logging::configure;
pub use statistic_logging::log_statistic;
pub use statistic_logging::log_statistic_postfix;
pub use statistic_logging::should_log_statistics;
