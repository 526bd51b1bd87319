use super::types::Report;
use crate::aggregate::{ExecutionGroup, ItemAggregate};
use crate::error::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::HashSet;
use std::io::Cursor;

/// Generate JUnit XML: one suite per group, one case per item
pub fn generate_junit_xml(report: &Report) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let suites: Vec<(&ExecutionGroup, Vec<&ItemAggregate>)> = report
        .groups
        .iter()
        .map(|group| (group, distinct_items(group)))
        .collect();

    let total_tests: usize = suites.iter().map(|(_, items)| items.len()).sum();
    let failures: usize = suites
        .iter()
        .map(|(_, items)| failed_count(items))
        .sum();

    // <testsuites>
    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", suite_name(&report.summary.collection.name)));
    suites_start.push_attribute(("tests", total_tests.to_string().as_str()));
    suites_start.push_attribute(("failures", failures.to_string().as_str()));
    suites_start.push_attribute(("timestamp", report.timestamp.as_str()));
    writer.write_event(Event::Start(suites_start))?;

    for (index, (group, items)) in suites.iter().enumerate() {
        let name = if group.parent.name.is_empty() {
            suite_name(&report.summary.collection.name)
        } else {
            group.parent.name.as_str()
        };

        let mut suite_start = BytesStart::new("testsuite");
        suite_start.push_attribute(("name", name));
        suite_start.push_attribute(("id", index.to_string().as_str()));
        suite_start.push_attribute(("tests", items.len().to_string().as_str()));
        suite_start.push_attribute(("failures", failed_count(items).to_string().as_str()));
        suite_start.push_attribute(("time", seconds(items.iter().map(|i| i.mean.time).sum()).as_str()));
        writer.write_event(Event::Start(suite_start))?;

        for item in items {
            write_test_case(&mut writer, name, item)?;
        }

        writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let result = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&result).into_owned())
}

fn write_test_case<W: std::io::Write>(
    writer: &mut Writer<W>,
    suite: &str,
    item: &ItemAggregate,
) -> Result<()> {
    let classname = suite.replace(" / ", ".");

    let mut case_start = BytesStart::new("testcase");
    case_start.push_attribute(("name", item.item.name.as_str()));
    case_start.push_attribute(("classname", classname.as_str()));
    case_start.push_attribute(("time", seconds(item.mean.time).as_str()));
    writer.write_event(Event::Start(case_start))?;

    for assertion in item.assertions.iter().filter(|a| a.failed > 0) {
        let mut fail_start = BytesStart::new("failure");
        fail_start.push_attribute(("message", assertion.name.as_str()));
        fail_start.push_attribute(("type", "AssertionFailure"));
        writer.write_event(Event::Start(fail_start))?;

        let detail = format!(
            "{} failed {} of {} times",
            assertion.name,
            assertion.failed,
            assertion.passed + assertion.failed
        );
        writer.write_event(Event::Text(BytesText::new(&detail)))?;

        writer.write_event(Event::End(BytesEnd::new("failure")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    Ok(())
}

/// Items of a group in order, each once
fn distinct_items(group: &ExecutionGroup) -> Vec<&ItemAggregate> {
    let mut seen = HashSet::new();
    group
        .executions
        .iter()
        .filter(|item| seen.insert(item.item.id.as_str()))
        .map(|item| item.as_ref())
        .collect()
}

fn failed_count(items: &[&ItemAggregate]) -> usize {
    items
        .iter()
        .filter(|item| item.cumulative_tests.failed > 0)
        .count()
}

fn suite_name(collection: &str) -> &str {
    if collection.is_empty() {
        "run-report"
    } else {
        collection
    }
}

fn seconds(ms: f64) -> String {
    format!("{:.3}", ms / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::{assertion, execution};
    use crate::run::{CollectionInfo, Run, RunResult};
    use chrono::Utc;

    #[test]
    fn test_generate_junit_xml() {
        let mut login = execution("e1", "login", "auth", Some(1500));
        login.assertions = vec![assertion("status is 200", false)];
        let mut login_again = execution("e1", "login", "auth", Some(500));
        login_again.assertions = vec![assertion("status is 200", true)];
        let mut checkout = execution("e2", "checkout", "cart", Some(2000));
        checkout.assertions = vec![assertion("has total", false)];

        let run = RunResult {
            collection: CollectionInfo {
                id: "col".to_string(),
                name: "Shop".to_string(),
            },
            run: Run {
                executions: vec![login, login_again, checkout],
                ..Run::default()
            },
            ..RunResult::default()
        };
        let report = Report::build(&run, Utc::now());

        let xml = generate_junit_xml(&report).expect("Failed to generate XML");

        assert!(xml.contains(r#"<testsuites name="Shop" tests="2" failures="1""#));
        assert!(xml.contains(r#"<testsuite name="Folder auth" id="0" tests="1" failures="1" time="1.000">"#));
        assert!(xml.contains(r#"<testcase name="Request login" classname="Folder auth" time="1.000">"#));
        assert!(xml.contains(r#"<failure message="status is 200" type="AssertionFailure">status is 200 failed 1 of 2 times</failure>"#));
        assert!(xml.contains(r#"<testsuite name="Folder cart" id="1" tests="1" failures="0""#));
        assert_eq!(xml.matches("<testcase ").count(), 2);
    }
}
