pub mod checks;
pub mod fs;

use crate::report::{console, json, Report, TestResult};
use crate::utils::config::RunnerConfig;
use anyhow::Result;
use colored::Colorize;
use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

pub use checks::{CheckError, CheckOutcome, FaultKind};
pub use fs::{LocalFs, ProbeFs};

/// Runs the checks of one session and accumulates their results
pub struct Runner {
    config: RunnerConfig,
    fs: Box<dyn ProbeFs>,
    results: Vec<TestResult>,
    started_at: Instant,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_fs(config, Box::new(LocalFs))
    }

    pub fn with_fs(config: RunnerConfig, fs: Box<dyn ProbeFs>) -> Self {
        Self {
            config,
            fs,
            results: Vec::new(),
            started_at: Instant::now(),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Results recorded so far, in execution order
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn log_test(&mut self, name: &str, success: bool, details: &str) {
        let result = TestResult::new(name, success, details);
        if success {
            log::info!("check {:?} passed", name);
        } else {
            log::warn!("check {:?} failed: {}", name, details);
        }
        console::print_result(&result);
        self.results.push(result);
    }

    /// Run one check and record exactly one result for it
    pub fn run_check<F>(&mut self, name: &str, check: F)
    where
        F: FnOnce() -> CheckOutcome,
    {
        let outcome = isolate(check);
        self.record(name, outcome);
    }

    /// Run every check in its fixed order
    pub fn run_all(&mut self) {
        self.run_check(checks::BASIC_OPERATIONS, checks::basic_operations);

        let probe = self.config.probe_path();
        let outcome = isolate(|| checks::file_operations(&*self.fs, &probe));
        self.record(checks::FILE_OPERATIONS, outcome);

        self.run_check(checks::DATA_STRUCTURES, checks::data_structures);
        self.run_check(checks::ALGORITHMS, checks::algorithms);
        self.run_check(checks::ERROR_HANDLING, checks::error_handling);
    }

    /// Summarize the results recorded so far
    pub fn generate_report(&self) -> Report {
        Report::from_results(&self.results, self.started_at.elapsed())
    }

    /// Print the summary and persist the report
    pub fn finish(&self) -> Result<Report> {
        let report = self.generate_report();
        console::print_summary(&report);

        let path = self.config.report_path();
        json::save(&report, &path)?;
        println!(
            "\n{} Test report saved to: {}",
            "■".blue(),
            path.display().to_string().cyan()
        );

        Ok(report)
    }

    fn record(&mut self, name: &str, outcome: CheckOutcome) {
        match outcome {
            Ok(summary) => self.log_test(name, true, &summary),
            Err(e) => self.log_test(name, false, &e.to_string()),
        }
    }
}

// Serializes swapping the process-wide panic hook
static PANIC_HOOK_LOCK: Mutex<()> = Mutex::new(());

thread_local! {
    static PANIC_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Run a check, turning a panic into a failed outcome
///
/// The default hook is replaced while the check runs so a panic shows up only
/// as a FAIL line, with its source location in the details.
fn isolate<F>(check: F) -> CheckOutcome
where
    F: FnOnce() -> CheckOutcome,
{
    let outcome = {
        let _guard = PANIC_HOOK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|info| {
            let location = info.location().map(|l| l.to_string());
            log::debug!("check panicked at {:?}", location);
            PANIC_LOCATION.with(|cell| *cell.borrow_mut() = location);
        }));
        let outcome = panic::catch_unwind(AssertUnwindSafe(check));
        panic::set_hook(previous);
        outcome
    };

    outcome.unwrap_or_else(|payload| {
        let mut message = panic_message(payload);
        if let Some(location) = PANIC_LOCATION.with(|cell| cell.borrow_mut().take()) {
            message = format!("{} (at {})", message, location);
        }
        Err(CheckError::Assertion(message))
    })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "check panicked".to_string()
    }
}
