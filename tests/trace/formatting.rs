//! Formatting and statistics

use stepwise_trace::{HumanFormatter, TraceFormatter};

use crate::fill;

#[test]
fn header_lines_number_from_zero() {
    let trace = fill(&[4, 2]);
    let text = HumanFormatter::new().format_trace(&trace);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("[0000] init"));
    assert!(lines[1].contains("write 4"));
    assert!(lines[1].ends_with("@ [0]"));
    assert!(lines[3].contains("sum is 6"));
}

#[test]
fn relative_headers_use_the_total() {
    let trace = fill(&[4, 2]);
    let formatter = HumanFormatter::new().with_total(trace.len());
    assert!(formatter.format(trace.last().unwrap()).starts_with("[4/4]"));
}

#[test]
fn state_and_result_are_indented() {
    let trace = fill(&[4, 2]);
    let text = HumanFormatter::new()
        .with_state()
        .with_result()
        .format(trace.get(2).unwrap());

    assert!(text.contains("\n    [4 2]"));
    assert!(text.ends_with("\n    => 6"));
}

#[test]
fn stats_count_phases() {
    let trace = fill(&[1, 2, 3]);
    let stats = trace.stats();

    assert_eq!(stats.snapshot_count, 5);
    assert_eq!(stats.count("write"), 3);
    assert_eq!(stats.count("init"), 1);
    assert_eq!(stats.count("error"), 0);
    assert!(!stats.failed);
    assert_eq!(stats.to_string(), "5 steps, 3 write, 1 done, 1 init");
}
