use super::types::Report;
use anyhow::Result;
use std::path::Path;

/// File name the static server advertises as the dashboard
pub const DASHBOARD_FILE: &str = "dashboard.html";

/// Generate HTML dashboard
pub async fn generate(report: &Report, output: Option<&Path>) -> Result<()> {
    let html = generate_html(report);

    if let Some(path) = output {
        std::fs::write(path, html)?;
        println!("HTML report saved to: {}", path.display());
    } else {
        println!("{}", html);
    }

    Ok(())
}

pub fn generate_html(report: &Report) -> String {
    let rate = report
        .success_rate
        .map(|r| format!("{:.1}%", r))
        .unwrap_or_else(|| "n/a".to_string());
    let overall_class = if report.is_success() { "passed" } else { "failed" };

    let mut rows_html = String::new();
    for result in &report.results {
        let (status_icon, status_class) = if result.success {
            ("✓", "passed")
        } else {
            ("✗", "failed")
        };

        rows_html.push_str(&format!(
            r#"
            <tr class="{status_class}">
                <td class="status">{status_icon}</td>
                <td class="name">{}</td>
                <td class="details">{}</td>
                <td class="timestamp">{}</td>
            </tr>"#,
            html_escape(&result.test),
            html_escape(&result.details),
            html_escape(&result.timestamp),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Agent Test Dashboard</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0f172a; color: #e2e8f0; margin: 0; padding: 32px; }}
        h1 {{ margin-top: 0; }}
        .cards {{ display: flex; gap: 16px; margin-bottom: 24px; }}
        .card {{ background: #1e293b; border-radius: 8px; padding: 16px 24px; min-width: 120px; }}
        .card .label {{ font-size: 12px; text-transform: uppercase; color: #94a3b8; }}
        .card .value {{ font-size: 28px; font-weight: 600; }}
        .card.passed .value {{ color: #22c55e; }}
        .card.failed .value {{ color: #ef4444; }}
        table {{ width: 100%; border-collapse: collapse; background: #1e293b; border-radius: 8px; }}
        th, td {{ text-align: left; padding: 10px 14px; border-bottom: 1px solid #334155; }}
        tr.passed .status {{ color: #22c55e; }}
        tr.failed .status {{ color: #ef4444; }}
        tr.failed .details {{ color: #fca5a5; }}
        .timestamp {{ color: #94a3b8; font-family: monospace; }}
    </style>
</head>
<body>
    <h1>Agent Test Report</h1>
    <div class="cards">
        <div class="card"><div class="label">Total</div><div class="value">{total}</div></div>
        <div class="card passed"><div class="label">Passed</div><div class="value">{passed}</div></div>
        <div class="card failed"><div class="label">Failed</div><div class="value">{failed}</div></div>
        <div class="card {overall_class}"><div class="label">Success Rate</div><div class="value">{rate}</div></div>
        <div class="card"><div class="label">Duration</div><div class="value">{duration:.2}s</div></div>
    </div>
    <table>
        <thead>
            <tr><th></th><th>Test</th><th>Details</th><th>Timestamp</th></tr>
        </thead>
        <tbody>{rows_html}
        </tbody>
    </table>
</body>
</html>
"#,
        total = report.total,
        passed = report.passed,
        failed = report.failed,
        duration = report.duration_seconds,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
