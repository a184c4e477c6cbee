//! Integration tests for Layer 1: Trace
//!
//! Tests recording, sealing, formatting, and statistics of traces.

mod formatting;

use std::fmt;

use stepwise_foundation::Row;
use stepwise_trace::{Focus, Phase, Trace, TraceRecorder};

/// A phase set for a toy engine that fills a row left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Init,
    Write,
    Done,
    Error,
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Phase for Fill {
    fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Write => "write",
            Self::Done => "done",
            Self::Error => "error",
        }
    }

    fn error() -> Self {
        Self::Error
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

pub type FillTrace = Trace<Fill, Row<i64>, i64>;

/// Runs the toy engine: writes each value in turn, keeping a running sum.
pub fn fill(values: &[i64]) -> FillTrace {
    let mut rec = TraceRecorder::new("fill");
    let mut row = Row::filled(values.len(), 0);
    let mut sum = 0;

    rec.record(Fill::Init, &row, Focus::none(), "start with zeros", &sum)
        .unwrap();
    for (i, value) in values.iter().enumerate() {
        row.set(i, *value).unwrap();
        sum += value;
        rec.record(Fill::Write, &row, Focus::index(i), format!("write {value}"), &sum)
            .unwrap();
    }
    rec.record(Fill::Done, &row, Focus::none(), format!("sum is {sum}"), &sum)
        .unwrap();
    rec.finish().unwrap()
}
