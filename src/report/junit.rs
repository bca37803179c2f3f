use super::types::{Report, TestResult};
use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

/// Generate JUnit XML report string from a run report
pub fn generate_junit_xml(report: &Report) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let tests = report.total.to_string();
    let failures = report.failed.to_string();
    let time = report.duration_seconds.to_string();

    // <testsuites>
    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", "agent-tester-run"));
    suites_start.push_attribute(("tests", tests.as_str()));
    suites_start.push_attribute(("failures", failures.as_str()));
    suites_start.push_attribute(("time", time.as_str()));
    writer.write_event(Event::Start(suites_start))?;

    // The checks form a single suite
    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", "agent-capabilities"));
    suite_start.push_attribute(("tests", tests.as_str()));
    suite_start.push_attribute(("failures", failures.as_str()));
    suite_start.push_attribute(("skipped", "0"));
    suite_start.push_attribute(("time", time.as_str()));
    if let Some(first) = report.results.first() {
        suite_start.push_attribute(("timestamp", first.timestamp.as_str()));
    }
    writer.write_event(Event::Start(suite_start))?;

    for result in &report.results {
        write_test_case(&mut writer, result)?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let xml = String::from_utf8(writer.into_inner().into_inner())?;
    Ok(xml)
}

fn write_test_case<W: std::io::Write>(writer: &mut Writer<W>, result: &TestResult) -> Result<()> {
    let mut case_start = BytesStart::new("testcase");
    case_start.push_attribute(("name", result.test.as_str()));
    case_start.push_attribute(("classname", "agent_tester.checks"));
    case_start.push_attribute(("timestamp", result.timestamp.as_str()));

    if result.success {
        writer.write_event(Event::Empty(case_start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(case_start))?;

    let mut fail_start = BytesStart::new("failure");
    fail_start.push_attribute(("message", result.details.as_str()));
    fail_start.push_attribute(("type", "CheckFailed"));
    writer.write_event(Event::Start(fail_start))?;
    writer.write_event(Event::Text(BytesText::new(&result.details)))?;
    writer.write_event(Event::End(BytesEnd::new("failure")))?;

    writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    Ok(())
}

/// Generate JUnit report
pub async fn generate(report: &Report, output: Option<&Path>) -> Result<()> {
    let xml = generate_junit_xml(report)?;

    if let Some(path) = output {
        std::fs::write(path, xml)?;
        println!("JUnit report saved to: {}", path.display());
    } else {
        println!("{}", xml);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_generate_junit_xml() {
        let report = Report::from_results(
            &[
                TestResult::new("Basic Operations", true, "ok"),
                TestResult::new("File Operations", false, "File content mismatch"),
            ],
            Duration::from_millis(1500),
        );

        let xml = generate_junit_xml(&report).expect("Failed to generate XML");

        assert!(xml.contains(r#"<testsuites name="agent-tester-run""#));
        assert!(xml.contains(r#"tests="2""#));
        assert!(xml.contains(r#"failures="1""#));
        assert!(xml.contains(r#"<testcase name="Basic Operations""#));
        assert!(xml.contains(r#"message="File content mismatch""#));
    }
}
