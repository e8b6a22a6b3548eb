//! Runs `rspec` scenario suites inside `cargo test`.

use rspec::report::Report;
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};
use std::sync::Arc;

/// Runs every scenario in `suite` and panics if any of them failed.
///
/// Scenarios run one after another so the printed given/when/then report
/// reads top to bottom. rspec catches failing assertions itself, so the
/// report is checked afterwards to fail the enclosing test.
pub fn run_scenarios<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(false)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    let report = Runner::new(config, vec![logger]).run(suite);
    assert!(
        report.is_success(),
        "{} of {} scenarios failed",
        report.get_failed(),
        report.get_passed() + report.get_failed()
    );
}
