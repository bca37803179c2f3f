//! Human-readable console output for a run

use super::types::{timestamp_now, Report, TestResult};
use colored::Colorize;
use std::path::Path;

const RULE_WIDTH: usize = 50;

/// Print environment info before the checks start
pub fn print_banner(work_dir: &Path) {
    println!("{} Starting Agent Capability Tests...", "▶".green().bold());
    println!("  Version: {}", env!("CARGO_PKG_VERSION").cyan());
    println!(
        "  Platform: {}",
        format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH).cyan()
    );
    let cwd = std::fs::canonicalize(work_dir).unwrap_or_else(|_| work_dir.to_path_buf());
    println!("  Working Directory: {}", cwd.display().to_string().cyan());
    println!("{}", "-".repeat(RULE_WIDTH));
}

/// Print the PASS/FAIL line for one recorded result
pub fn print_result(result: &TestResult) {
    let status = if result.success {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    };
    println!("{}: {}", status, result.test);
    if !result.details.is_empty() {
        println!("  Details: {}", result.details);
    }
}

pub fn print_summary(report: &Report) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{}", "AGENT TEST REPORT".bold());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Total Tests: {}", report.total);
    println!("Passed: {}", report.passed.to_string().green());
    println!("Failed: {}", report.failed.to_string().red());
    match report.success_rate {
        Some(rate) => println!("Success Rate: {:.1}%", rate),
        None => println!("Success Rate: n/a (no tests ran)"),
    }
    println!("Duration: {:.2} seconds", report.duration_seconds);
    println!("Timestamp: {}", timestamp_now());

    if report.failed > 0 {
        println!("\n{}", "Failed Tests:".red().bold());
        for result in report.failures() {
            println!("  - {}: {}", result.test, result.details);
        }
    }
}
