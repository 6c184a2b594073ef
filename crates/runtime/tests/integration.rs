// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: end-to-end runs.
//!
//! These tests exercise the complete flow from config → customer table →
//! initial state → dispatcher → sink, proving that the five crates compose
//! correctly.

use allocation_engine::{AllocationEngine, Outcome, Rejection};
use resource_model::SystemState;
use runtime::{
    scenario, CommandDispatcher, CommandOutcome, MemorySink, ReportEvent, RuntimeConfig,
    TextSink,
};
use std::path::Path;

// ── Helpers ────────────────────────────────────────────────────

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn classic_dispatcher() -> CommandDispatcher<MemorySink> {
    let engine = AllocationEngine::new(scenario::classic_state().unwrap());
    CommandDispatcher::new(engine, MemorySink::new())
}

fn outcomes(d: &CommandDispatcher<MemorySink>) -> Vec<CommandOutcome> {
    d.sink().outcomes().map(|r| r.outcome.clone()).collect()
}

// ── Classic Scenario ───────────────────────────────────────────

#[test]
fn test_classic_scenario_outcomes() {
    let mut d = classic_dispatcher();
    let verdict = d.report_initial_state().unwrap();
    assert_eq!(verdict.safe_sequence(), Some(&[1, 3, 0, 2, 4][..]));

    d.dispatch_str(scenario::CLASSIC_COMMANDS).unwrap();

    let got = outcomes(&d);
    assert_eq!(got.len(), 4);
    assert_eq!(got[0], CommandOutcome::Applied(Outcome::Granted));
    assert!(matches!(
        got[1],
        CommandOutcome::Rejected(Rejection::InsufficientResources {
            customer: 4,
            resource: 0,
            requested: 3,
            available: 2,
        })
    ));
    assert_eq!(
        got[2],
        CommandOutcome::Rejected(Rejection::DeniedUnsafe { customer: 0 })
    );
    assert_eq!(got[3], CommandOutcome::Applied(Outcome::Released));

    // after the release the state is back where it started
    let last = d.sink().snapshots().last().unwrap().clone();
    assert_eq!(last, scenario::classic_state().unwrap().snapshot());
}

#[test]
fn test_unsafe_denial_leaves_state_unchanged() {
    let mut d = classic_dispatcher();
    d.dispatch_line(1, "RQ 1 1 0 2").unwrap();
    let before = d.engine().state().clone();

    let outcome = d.dispatch_line(2, "RQ 0 0 2 0").unwrap().unwrap();
    assert_eq!(outcome.label(), "denied_unsafe");
    assert_eq!(d.engine().state(), &before);
    assert_eq!(d.engine().state().available(), &[2, 3, 0]);
}

#[test]
fn test_classic_text_report() {
    let mut out = Vec::new();
    let engine = AllocationEngine::new(scenario::classic_state().unwrap());
    let mut d = CommandDispatcher::new(engine, TextSink::new(&mut out));
    d.dispatch_str("RQ 1 1 0 2\n*\n").unwrap();
    d.finish().unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Request from customer 1 has been granted"));
    for header in [
        "AVAILABLE RESOURCES:",
        "MAXIMUM DEMAND:",
        "CURRENT ALLOCATION:",
        "CURRENT NEED:",
    ] {
        assert!(text.contains(header), "missing {header}");
    }
    assert!(text.contains("Resource 0: 2\nResource 1: 3\nResource 2: 0"));
}

// ── Config-Driven Runs ─────────────────────────────────────────

#[tokio::test]
async fn test_run_from_config_files() {
    let dir = tempfile::tempdir().unwrap();
    let customers = write(dir.path(), "customers.txt", "7,5,3\n3,2,2\n9,0,2\n2,2,2\n4,3,3\n");
    let commands = write(
        dir.path(),
        "commands.txt",
        "RQ 0 0 1 0\nRQ 1 2 0 0\nrq 2 3 0 2\nRQ 3 2 1 1\nRQ 4 0 0 2\n*\n",
    );
    let config_path = write(
        dir.path(),
        "bankers.toml",
        &format!(
            "customers_file = {:?}\ncommands_file = {:?}\navailable = [10, 5, 7]\nexpected_customers = 5\n",
            customers.display().to_string(),
            commands.display().to_string(),
        ),
    );

    let config = RuntimeConfig::from_file(&config_path).unwrap();
    let state = config.load_state().unwrap();
    let mut d = CommandDispatcher::new(AllocationEngine::new(state), MemorySink::new());

    let file = tokio::fs::File::open(config.commands_file.as_ref().unwrap())
        .await
        .unwrap();
    d.dispatch_reader(tokio::io::BufReader::new(file)).await.unwrap();

    // the five requests rebuild the classic allocation
    let last = d.sink().snapshots().last().unwrap().clone();
    assert_eq!(last.available, vec![3, 3, 2]);
    assert_eq!(last, scenario::classic_state().unwrap().snapshot());

    let summary = d.finish().unwrap();
    assert_eq!(summary.engine.grants, 5);
    assert_eq!(summary.malformed_lines, 0);
}

#[tokio::test]
async fn test_malformed_lines_do_not_stop_the_run() {
    let state = SystemState::initialize(&[4, 4], &[vec![3, 3], vec![2, 2]]).unwrap();
    let mut d = CommandDispatcher::new(AllocationEngine::new(state), MemorySink::new());

    let input: &[u8] = b"RQ 0 1\nHELLO\nRQ x 1 1\nRQ -1 1 1\nRQ 1 2 2\n";
    d.dispatch_reader(input).await.unwrap();

    let malformed: Vec<_> = d
        .sink()
        .events
        .iter()
        .filter_map(|e| match e {
            ReportEvent::Malformed { line, .. } => *line,
            _ => None,
        })
        .collect();
    assert_eq!(malformed, vec![1, 2, 3, 4]);
    assert_eq!(d.engine().state().allocation(1), &[2, 2]);
}

#[test]
fn test_unsafe_initial_state_is_reported() {
    // nobody can finish: each needs 2 more of the single free unit
    let state = SystemState::from_parts(&[3], &[vec![3], vec![3]], &[vec![1], vec![1]]).unwrap();
    let mut d = CommandDispatcher::new(AllocationEngine::new(state), MemorySink::new());

    let verdict = d.report_initial_state().unwrap();
    assert!(!verdict.is_safe());
    assert_eq!(verdict.unfinished, vec![0, 1]);

    // releases still work from an unsafe state
    assert_eq!(
        d.dispatch_line(1, "RL 0 1").unwrap(),
        Some(CommandOutcome::Applied(Outcome::Released))
    );
    assert!(d.engine().is_safe());
}

#[test]
fn test_json_sink_from_config() {
    let config = RuntimeConfig {
        available: vec![2],
        report_format: "json".into(),
        ..Default::default()
    };
    let state = SystemState::initialize(&config.available, &[vec![1]]).unwrap();
    let sink = config.create_sink(std::io::sink()).unwrap();
    let mut d = CommandDispatcher::new(AllocationEngine::new(state), sink);
    d.dispatch_str("RQ 0 1\n*\n").unwrap();
    assert_eq!(d.finish().unwrap().engine.grants, 1);
}
