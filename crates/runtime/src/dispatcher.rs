// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Drives an [`AllocationEngine`] from a command stream.
//!
//! ```text
//!  text line ──► CommandParser ──► Command ──► AllocationEngine
//!                    │ ParseError                   │ Outcome / Rejection
//!                    ▼                              ▼
//!               sink.malformed()              sink.outcome()
//!                                             sink.snapshot()  (on `*`)
//! ```

use crate::report::ReportSink;
use crate::RuntimeError;
use allocation_engine::{AllocationEngine, EngineStats, Outcome, Rejection};
use command_stream::{Command, CommandParser};
use safety_checker::SafetyVerdict;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// What dispatching a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A request was granted or a release applied.
    Applied(Outcome),
    /// The engine refused the command; the state is unchanged.
    Rejected(Rejection),
    /// A snapshot was reported.
    Reported,
}

impl CommandOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Short snake_case label: the outcome name or the rejection kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Applied(outcome) => outcome.as_str(),
            Self::Rejected(rejection) => rejection.kind(),
            Self::Reported => "reported",
        }
    }
}

impl From<Result<Outcome, Rejection>> for CommandOutcome {
    fn from(result: Result<Outcome, Rejection>) -> Self {
        match result {
            Ok(outcome) => Self::Applied(outcome),
            Err(rejection) => Self::Rejected(rejection),
        }
    }
}

/// A dispatched command and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    /// Source line, when the command came from text.
    pub line: Option<usize>,
    pub command: Command,
    pub outcome: CommandOutcome,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct RunSummary {
    pub engine: EngineStats,
    /// Command lines skipped because they could not be parsed.
    pub malformed_lines: u64,
    /// Snapshots reported, whether requested by `*` or automatic.
    pub snapshots: u64,
}

impl RunSummary {
    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{}; {} malformed lines skipped, {} snapshots",
            self.engine.summary(),
            self.malformed_lines,
            self.snapshots,
        )
    }
}

/// Feeds commands to an [`AllocationEngine`] and reports every result to a
/// [`ReportSink`].
///
/// # Example
/// ```
/// use runtime::{CommandDispatcher, MemorySink};
/// use allocation_engine::AllocationEngine;
/// use resource_model::SystemState;
///
/// let state = SystemState::initialize(&[3, 3], &[vec![2, 2], vec![1, 3]]).unwrap();
/// let mut dispatcher = CommandDispatcher::new(AllocationEngine::new(state), MemorySink::new());
///
/// dispatcher.dispatch_str("RQ 0 1 1\nRQ 9 0 0\n*\n").unwrap();
/// assert_eq!(dispatcher.sink().outcomes().count(), 2);
/// assert_eq!(dispatcher.sink().snapshots().count(), 1);
/// ```
pub struct CommandDispatcher<K: ReportSink> {
    engine: AllocationEngine,
    parser: CommandParser,
    sink: K,
    snapshot_each: bool,
    malformed_lines: u64,
    snapshots: u64,
}

impl<K: ReportSink> CommandDispatcher<K> {
    pub fn new(engine: AllocationEngine, sink: K) -> Self {
        let parser = CommandParser::new(engine.state().num_resources());
        Self {
            engine,
            parser,
            sink,
            snapshot_each: false,
            malformed_lines: 0,
            snapshots: 0,
        }
    }

    /// Report the full state after every request and release.
    pub fn with_snapshot_each(mut self, enabled: bool) -> Self {
        self.snapshot_each = enabled;
        self
    }

    pub fn engine(&self) -> &AllocationEngine {
        &self.engine
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    /// Reports the current state and its safety verdict.
    ///
    /// An unsafe state is reported, not refused: every later request is
    /// still judged against it.
    pub fn report_initial_state(&mut self) -> Result<SafetyVerdict, RuntimeError> {
        let verdict = self.engine.safety_verdict();
        if verdict.is_safe() {
            tracing::info!(%verdict, "initial state");
        } else {
            tracing::warn!(%verdict, "initial state is unsafe");
        }
        self.report_snapshot()?;
        self.sink.verdict(&verdict)?;
        Ok(verdict)
    }

    /// Applies one command and reports it.
    pub fn dispatch(&mut self, command: Command) -> Result<CommandOutcome, RuntimeError> {
        self.dispatch_at(None, command)
    }

    /// Parses and applies one line of text.
    ///
    /// Returns `Ok(None)` for blank, comment and malformed lines. Malformed
    /// lines are logged, reported to the sink and skipped.
    pub fn dispatch_line(
        &mut self,
        line_no: usize,
        line: &str,
    ) -> Result<Option<CommandOutcome>, RuntimeError> {
        match self.parser.parse_line(line_no, line) {
            Ok(Some(command)) => self.dispatch_at(Some(line_no), command).map(Some),
            Ok(None) => Ok(None),
            Err(e) => {
                tracing::warn!("skipping malformed command: {e}");
                self.malformed_lines += 1;
                self.sink.malformed(&e)?;
                Ok(None)
            }
        }
    }

    /// Dispatches every line of `text`.
    pub fn dispatch_str(&mut self, text: &str) -> Result<(), RuntimeError> {
        for (i, line) in text.lines().enumerate() {
            self.dispatch_line(i + 1, line)?;
        }
        Ok(())
    }

    /// Dispatches lines from an async reader until end of input.
    pub async fn dispatch_reader<R>(&mut self, reader: R) -> Result<(), RuntimeError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut line_no = 0;
        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            self.dispatch_line(line_no, &line)?;
        }
        tracing::debug!(lines = line_no, "command stream exhausted");
        Ok(())
    }

    /// Flushes the sink and returns the run totals.
    pub fn finish(mut self) -> Result<RunSummary, RuntimeError> {
        self.sink.flush()?;
        let summary = RunSummary {
            engine: self.engine.stats().clone(),
            malformed_lines: self.malformed_lines,
            snapshots: self.snapshots,
        };
        tracing::info!("{}", summary.summary());
        Ok(summary)
    }

    fn dispatch_at(
        &mut self,
        line: Option<usize>,
        command: Command,
    ) -> Result<CommandOutcome, RuntimeError> {
        let outcome: CommandOutcome = match &command {
            Command::Request { customer, amounts } => {
                self.engine.request(*customer, amounts).into()
            }
            Command::Release { customer, amounts } => {
                self.engine.release(*customer, amounts).into()
            }
            Command::Snapshot => {
                self.report_snapshot()?;
                return Ok(CommandOutcome::Reported);
            }
        };

        let record = CommandRecord {
            line,
            command,
            outcome,
        };
        self.sink.outcome(&record)?;
        if self.snapshot_each {
            self.report_snapshot()?;
        }
        Ok(record.outcome)
    }

    fn report_snapshot(&mut self) -> Result<(), RuntimeError> {
        self.snapshots += 1;
        self.sink.snapshot(&self.engine.snapshot())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{MemorySink, ReportEvent};
    use resource_model::SystemState;

    fn dispatcher() -> CommandDispatcher<MemorySink> {
        let state = SystemState::initialize(&[3, 3], &[vec![2, 2], vec![1, 3]]).unwrap();
        CommandDispatcher::new(AllocationEngine::new(state), MemorySink::new())
    }

    #[test]
    fn test_dispatch_request_and_release() {
        let mut d = dispatcher();
        let granted = d
            .dispatch(Command::Request {
                customer: 0,
                amounts: vec![1, 1],
            })
            .unwrap();
        assert_eq!(granted, CommandOutcome::Applied(Outcome::Granted));

        let released = d
            .dispatch(Command::Release {
                customer: 0,
                amounts: vec![1, 0],
            })
            .unwrap();
        assert_eq!(released.label(), "released");
        assert_eq!(d.engine().state().allocation(0), &[0, 1]);
        assert_eq!(d.sink().outcomes().count(), 2);
    }

    #[test]
    fn test_rejection_is_reported_not_fatal() {
        let mut d = dispatcher();
        let outcome = d.dispatch_line(1, "RL 0 1 0").unwrap().unwrap();
        assert!(outcome.is_rejected());
        assert_eq!(outcome.label(), "exceeds_allocation");

        let record = d.sink().outcomes().next().unwrap();
        assert_eq!(record.line, Some(1));
    }

    #[test]
    fn test_snapshot_command() {
        let mut d = dispatcher();
        assert_eq!(
            d.dispatch_line(1, "*").unwrap(),
            Some(CommandOutcome::Reported)
        );
        assert_eq!(d.sink().outcomes().count(), 0);
        assert_eq!(d.sink().snapshots().count(), 1);
    }

    #[test]
    fn test_malformed_line_skipped() {
        let mut d = dispatcher();
        assert_eq!(d.dispatch_line(1, "RQ 0 1").unwrap(), None);
        assert_eq!(d.dispatch_line(2, "bogus").unwrap(), None);
        assert_eq!(d.dispatch_line(3, "# comment").unwrap(), None);
        assert!(d.dispatch_line(4, "RQ 0 1 1").unwrap().is_some());

        assert!(matches!(
            d.sink().events[0],
            ReportEvent::Malformed { line: Some(1), .. }
        ));
        let summary = d.finish().unwrap();
        assert_eq!(summary.malformed_lines, 2);
        assert_eq!(summary.engine.requests, 1);
    }

    #[test]
    fn test_snapshot_each() {
        let mut d = dispatcher().with_snapshot_each(true);
        d.dispatch_str("RQ 0 1 1\nRQ 1 0 9\n*\n").unwrap();
        // one per request plus the explicit `*`
        assert_eq!(d.sink().snapshots().count(), 3);
        let summary = d.finish().unwrap();
        assert_eq!(summary.snapshots, 3);
    }

    #[test]
    fn test_report_initial_state() {
        let mut d = dispatcher();
        let verdict = d.report_initial_state().unwrap();
        assert!(verdict.is_safe());
        assert!(matches!(d.sink().events[0], ReportEvent::Snapshot(_)));
        assert!(matches!(d.sink().events[1], ReportEvent::Verdict(_)));
    }

    #[test]
    fn test_outcome_from_result() {
        let o: CommandOutcome = Err(Rejection::DeniedUnsafe { customer: 0 }).into();
        assert_eq!(o.label(), "denied_unsafe");
        let o: CommandOutcome = Ok(Outcome::Granted).into();
        assert!(!o.is_rejected());
    }

    #[tokio::test]
    async fn test_dispatch_reader() {
        let mut d = dispatcher();
        let input: &[u8] = b"RQ 0 1 1\n\nRQ 1 1 0\nRL 0 1 1\n";
        d.dispatch_reader(input).await.unwrap();
        let summary = d.finish().unwrap();
        assert_eq!(summary.engine.requests, 2);
        assert_eq!(summary.engine.releases, 1);
    }
}
