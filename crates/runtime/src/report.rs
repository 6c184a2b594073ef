// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Report sinks.
//!
//! The dispatcher never formats anything itself. It hands outcomes,
//! snapshots and verdicts to a [`ReportSink`], which decides how they look.

use crate::dispatcher::{CommandOutcome, CommandRecord};
use allocation_engine::Outcome;
use command_stream::ParseError;
use resource_model::ReportView;
use safety_checker::SafetyVerdict;
use std::io::{self, Write};

/// Receives everything a run reports.
pub trait ReportSink {
    /// A request or release has been handled.
    fn outcome(&mut self, record: &CommandRecord) -> io::Result<()>;

    /// The current state, in customer order.
    fn snapshot(&mut self, view: &ReportView) -> io::Result<()>;

    /// A safety verdict for the current state.
    fn verdict(&mut self, verdict: &SafetyVerdict) -> io::Result<()>;

    /// A command line was skipped because it could not be parsed.
    fn malformed(&mut self, error: &ParseError) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<K: ReportSink + ?Sized> ReportSink for Box<K> {
    fn outcome(&mut self, record: &CommandRecord) -> io::Result<()> {
        (**self).outcome(record)
    }

    fn snapshot(&mut self, view: &ReportView) -> io::Result<()> {
        (**self).snapshot(view)
    }

    fn verdict(&mut self, verdict: &SafetyVerdict) -> io::Result<()> {
        (**self).verdict(verdict)
    }

    fn malformed(&mut self, error: &ParseError) -> io::Result<()> {
        (**self).malformed(error)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

// ── Text ───────────────────────────────────────────────────────

/// Human-readable report.
///
/// ```text
/// Current System State:
/// AVAILABLE RESOURCES:
/// Resource 0: 3
/// ...
///
/// MAXIMUM DEMAND:
/// Customer 0: 7 5 3
/// ...
/// ```
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn section<'a>(
        &mut self,
        title: &str,
        rows: impl Iterator<Item = (usize, &'a [u64])>,
    ) -> io::Result<()> {
        writeln!(self.out, "\n{title}:")?;
        for (customer, row) in rows {
            let cells: Vec<String> = row.iter().map(u64::to_string).collect();
            writeln!(self.out, "Customer {customer}: {}", cells.join(" "))?;
        }
        Ok(())
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn outcome(&mut self, record: &CommandRecord) -> io::Result<()> {
        let customer = record.command.customer().unwrap_or_default();
        match &record.outcome {
            CommandOutcome::Applied(Outcome::Granted) => {
                writeln!(self.out, "Request from customer {customer} has been granted")
            }
            CommandOutcome::Applied(Outcome::Released) => {
                writeln!(self.out, "Resources released from customer {customer}")
            }
            CommandOutcome::Rejected(rejection) => {
                writeln!(self.out, "Denied ({}): {rejection}", rejection.kind())
            }
            CommandOutcome::Reported => Ok(()),
        }
    }

    fn snapshot(&mut self, view: &ReportView) -> io::Result<()> {
        writeln!(self.out, "Current System State:")?;
        writeln!(self.out, "AVAILABLE RESOURCES:")?;
        for (j, units) in view.available.iter().enumerate() {
            writeln!(self.out, "Resource {j}: {units}")?;
        }
        let rows = &view.customers;
        self.section(
            "MAXIMUM DEMAND",
            rows.iter().map(|r| (r.customer, r.maximum.as_slice())),
        )?;
        self.section(
            "CURRENT ALLOCATION",
            rows.iter().map(|r| (r.customer, r.allocation.as_slice())),
        )?;
        self.section(
            "CURRENT NEED",
            rows.iter().map(|r| (r.customer, r.need.as_slice())),
        )?;
        writeln!(self.out)
    }

    fn verdict(&mut self, verdict: &SafetyVerdict) -> io::Result<()> {
        writeln!(self.out, "Safety: {verdict}")
    }

    fn malformed(&mut self, error: &ParseError) -> io::Result<()> {
        writeln!(self.out, "Skipped: {error}")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

// ── JSON ───────────────────────────────────────────────────────

/// One JSON object per line, tagged by `"event"`.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, value: serde_json::Value) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &value)?;
        writeln!(self.out)
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn outcome(&mut self, record: &CommandRecord) -> io::Result<()> {
        let mut value = serde_json::json!({
            "event": "outcome",
            "line": record.line,
            "command": record.command,
            "result": record.outcome.label(),
        });
        if let CommandOutcome::Rejected(rejection) = &record.outcome {
            value["message"] = rejection.to_string().into();
        }
        self.emit(value)
    }

    fn snapshot(&mut self, view: &ReportView) -> io::Result<()> {
        self.emit(serde_json::json!({ "event": "snapshot", "state": view }))
    }

    fn verdict(&mut self, verdict: &SafetyVerdict) -> io::Result<()> {
        self.emit(serde_json::json!({
            "event": "verdict",
            "safe": verdict.is_safe(),
            "completion_order": verdict.completion_order,
            "unfinished": verdict.unfinished,
        }))
    }

    fn malformed(&mut self, error: &ParseError) -> io::Result<()> {
        self.emit(serde_json::json!({
            "event": "malformed",
            "line": error.line(),
            "message": error.to_string(),
        }))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

// ── Memory ─────────────────────────────────────────────────────

/// A reported event, as collected by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    Outcome(CommandRecord),
    Snapshot(ReportView),
    Verdict(SafetyVerdict),
    Malformed { line: Option<usize>, message: String },
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<ReportEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome records only, in dispatch order.
    pub fn outcomes(&self) -> impl Iterator<Item = &CommandRecord> {
        self.events.iter().filter_map(|e| match e {
            ReportEvent::Outcome(r) => Some(r),
            _ => None,
        })
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &ReportView> {
        self.events.iter().filter_map(|e| match e {
            ReportEvent::Snapshot(v) => Some(v),
            _ => None,
        })
    }
}

impl ReportSink for MemorySink {
    fn outcome(&mut self, record: &CommandRecord) -> io::Result<()> {
        self.events.push(ReportEvent::Outcome(record.clone()));
        Ok(())
    }

    fn snapshot(&mut self, view: &ReportView) -> io::Result<()> {
        self.events.push(ReportEvent::Snapshot(view.clone()));
        Ok(())
    }

    fn verdict(&mut self, verdict: &SafetyVerdict) -> io::Result<()> {
        self.events.push(ReportEvent::Verdict(verdict.clone()));
        Ok(())
    }

    fn malformed(&mut self, error: &ParseError) -> io::Result<()> {
        self.events.push(ReportEvent::Malformed {
            line: error.line(),
            message: error.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allocation_engine::Rejection;
    use command_stream::Command;
    use resource_model::SystemState;

    fn view() -> ReportView {
        SystemState::from_parts(&[4, 2], &[vec![3, 1], vec![2, 2]], &[vec![1, 0], vec![0, 1]])
            .unwrap()
            .snapshot()
    }

    fn granted() -> CommandRecord {
        CommandRecord {
            line: Some(3),
            command: Command::Request {
                customer: 1,
                amounts: vec![1, 0],
            },
            outcome: CommandOutcome::Applied(Outcome::Granted),
        }
    }

    fn text_of(f: impl FnOnce(&mut TextSink<Vec<u8>>) -> io::Result<()>) -> String {
        let mut sink = TextSink::new(Vec::new());
        f(&mut sink).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_text_snapshot_layout() {
        let text = text_of(|s| s.snapshot(&view()));
        let expected = "\
Current System State:
AVAILABLE RESOURCES:
Resource 0: 3
Resource 1: 1

MAXIMUM DEMAND:
Customer 0: 3 1
Customer 1: 2 2

CURRENT ALLOCATION:
Customer 0: 1 0
Customer 1: 0 1

CURRENT NEED:
Customer 0: 2 1
Customer 1: 2 1

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_text_outcomes() {
        assert_eq!(
            text_of(|s| s.outcome(&granted())),
            "Request from customer 1 has been granted\n"
        );

        let denied = CommandRecord {
            outcome: CommandOutcome::Rejected(Rejection::DeniedUnsafe { customer: 1 }),
            ..granted()
        };
        let text = text_of(|s| s.outcome(&denied));
        assert!(text.starts_with("Denied (denied_unsafe): "));
        assert!(text.contains("unsafe state"));
    }

    #[test]
    fn test_text_verdict_and_malformed() {
        let verdict = SafetyVerdict {
            completion_order: vec![1, 0],
            unfinished: vec![],
        };
        assert_eq!(
            text_of(|s| s.verdict(&verdict)),
            "Safety: SAFE, sequence <1, 0>\n"
        );

        let err = ParseError::UnknownCommand {
            line: 4,
            keyword: "XX".into(),
        };
        assert!(text_of(|s| s.malformed(&err)).starts_with("Skipped: line 4"));
    }

    #[test]
    fn test_json_lines() {
        let mut sink = JsonSink::new(Vec::new());
        sink.outcome(&granted()).unwrap();
        sink.snapshot(&view()).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "outcome");
        assert_eq!(lines[0]["line"], 3);
        assert_eq!(lines[0]["result"], "granted");
        assert_eq!(lines[0]["command"]["command"], "request");
        assert_eq!(lines[1]["event"], "snapshot");
        assert_eq!(lines[1]["state"]["available"], serde_json::json!([3, 1]));
    }

    #[test]
    fn test_json_rejection_message() {
        let mut sink = JsonSink::new(Vec::new());
        let record = CommandRecord {
            outcome: CommandOutcome::Rejected(Rejection::UnknownCustomer {
                customer: 9,
                customers: 2,
            }),
            ..granted()
        };
        sink.outcome(&record).unwrap();
        let value: serde_json::Value =
            serde_json::from_slice(&sink.into_inner()).unwrap();
        assert_eq!(value["result"], "unknown_customer");
        assert!(value["message"].as_str().unwrap().contains("unknown customer 9"));
    }

    #[test]
    fn test_memory_sink_filters() {
        let mut sink = MemorySink::new();
        sink.snapshot(&view()).unwrap();
        sink.outcome(&granted()).unwrap();
        assert_eq!(sink.events.len(), 2);
        assert_eq!(sink.outcomes().count(), 1);
        assert_eq!(sink.snapshots().count(), 1);
    }

    #[test]
    fn test_boxed_sink_forwards() {
        let mut sink: Box<dyn ReportSink> = Box::new(MemorySink::new());
        sink.verdict(&SafetyVerdict::default()).unwrap();
        sink.flush().unwrap();
    }
}
