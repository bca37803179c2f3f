use super::types::Report;
use anyhow::{Context, Result};
use std::path::Path;

/// Write the report as pretty JSON, replacing any previous file
pub fn save(report: &Report, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    log::debug!("report written to {}", path.display());
    Ok(())
}

pub fn load(path: &Path) -> Result<Report> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report from {}", path.display()))?;
    let report = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid report", path.display()))?;
    Ok(report)
}

/// Generate JSON report
pub async fn generate(report: &Report, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        save(report, path)?;
        println!("JSON report saved to: {}", path.display());
    } else {
        println!("{}", serde_json::to_string_pretty(report)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::TestResult;
    use std::time::Duration;

    fn sample() -> Report {
        Report::from_results(
            &[
                TestResult::new("Test 1", true, ""),
                TestResult::new("Test 2", true, ""),
                TestResult::new("Test 3", false, "Error message"),
            ],
            Duration::from_millis(1234),
        )
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = sample();

        save(&report, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.total, report.total);
        assert_eq!(loaded.passed, report.passed);
        assert_eq!(loaded.failed, report.failed);
        assert_eq!(loaded.results, report.results);
        let (a, b) = (loaded.success_rate.unwrap(), report.success_rate.unwrap());
        assert!((a - b).abs() < 1e-9);
        assert!((loaded.duration_seconds - report.duration_seconds).abs() < 1e-9);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, "stale content that is much longer than nothing").unwrap();

        let empty = Report::from_results(&[], Duration::ZERO);
        save(&empty, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["total"], 0);
        assert!(value["success_rate"].is_null());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load(&path).is_err());
        assert!(load(&dir.path().join("missing.json")).is_err());
    }
}
