pub mod console;
pub mod html;
pub mod json;
pub mod junit;
pub mod types;

use anyhow::Result;
use std::path::Path;

pub use types::{Report, TestResult};

/// Render a saved report in another format
pub async fn generate_report(
    results_path: &Path,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let report = json::load(results_path)?;

    match format {
        "json" => json::generate(&report, output).await,
        "html" => html::generate(&report, output).await,
        "junit" | "xml" => junit::generate(&report, output).await,
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_generate_html_from_saved_report() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("agent_test_report.json");
        let output = dir.path().join(html::DASHBOARD_FILE);
        let report = Report::from_results(
            &[TestResult::new("Algorithms", true, "")],
            Duration::from_millis(3),
        );
        json::save(&report, &results).unwrap();

        generate_report(&results, "html", Some(&output))
            .await
            .unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("Algorithms"));
    }

    #[tokio::test]
    async fn test_unknown_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("agent_test_report.json");
        json::save(&Report::from_results(&[], Duration::ZERO), &results).unwrap();

        let err = generate_report(&results, "pdf", None).await.unwrap_err();
        assert!(err.to_string().contains("Unknown format"));
    }
}
