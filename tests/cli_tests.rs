//! Integration tests for the corrminer binary

use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const TRACE: &str = "abcedabcefagbchabijcaklc";

fn trace_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_mine_text_report() {
    let file = trace_file(TRACE);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("corrminer");
    cmd.arg("mine").arg(file.path()).arg("--format").arg("chars");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Correlation Mining Report (bfs)"))
        .stdout(predicate::str::contains("Segments:          5"))
        .stdout(predicate::str::contains("Rules:             3"))
        .stdout(predicate::str::contains("[a → b] -> c"));
}

#[test]
fn test_mine_json_output() {
    let file = trace_file(TRACE);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("corrminer");
    cmd.arg("mine")
        .arg(file.path())
        .arg("--format")
        .arg("chars")
        .arg("--miner")
        .arg("dfs")
        .arg("--output")
        .arg("json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["miner"], "dfs");
    assert_eq!(json["segments"], 5);
    assert_eq!(json["rules"].as_array().unwrap().len(), 3);
    assert_eq!(json["rules"][0]["history"], serde_json::json!(["a"]));
    assert_eq!(json["rules"][0]["prediction"], "c");
}

#[test]
fn test_mine_with_config_file() {
    let file = trace_file(TRACE);
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "min_support = 100").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("corrminer");
    cmd.arg("mine")
        .arg(file.path())
        .arg("--format")
        .arg("chars")
        .arg("--config")
        .arg(config.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Rules:             0"));
}

#[test]
fn test_mine_rejects_invalid_parameter() {
    let file = trace_file(TRACE);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("corrminer");
    cmd.arg("mine")
        .arg(file.path())
        .arg("--window-size")
        .arg("0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("window_size"));
}

#[test]
fn test_mine_missing_trace() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("corrminer");
    cmd.arg("mine").arg("/nonexistent/trace.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read trace file"));
}

#[test]
fn test_mine_audit_log() {
    let lines: String = (0..8)
        .flat_map(|i| {
            ["q-1", "q-2", "q-3"].map(|name| {
                format!(
                    "2013-11-21 17:24:{:02},000: ugi=root\tip=/127.0.0.1\tcmd=open\tsrc=/in/{}\tdst=null\tperm=null\n",
                    i, name
                )
            })
        })
        .collect();
    let file = trace_file(&lines);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("corrminer");
    cmd.arg("mine")
        .arg(file.path())
        .arg("--format")
        .arg("audit")
        .arg("--strip-prefix")
        .arg("/in/")
        .arg("--window-size")
        .arg("3");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[q-1 → q-2] -> q-3"));
}

#[test]
fn test_simulate_strategies() {
    let file = trace_file(&"abcd".repeat(20));

    for strategy in ["none", "cminer", "quickmine"] {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("corrminer");
        cmd.arg("simulate")
            .arg(file.path())
            .arg("--format")
            .arg("chars")
            .arg("--strategy")
            .arg(strategy)
            .arg("--cache-size")
            .arg("2");

        cmd.assert()
            .success()
            .stdout(predicate::str::contains(format!("Cache Simulation ({})", strategy)))
            .stdout(predicate::str::contains("Accesses:          80"));
    }
}

#[test]
fn test_simulate_json_output() {
    let file = trace_file(&"abcd".repeat(20));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("corrminer");
    cmd.arg("simulate")
        .arg(file.path())
        .arg("--format")
        .arg("chars")
        .arg("--strategy")
        .arg("none")
        .arg("--cache-size")
        .arg("2")
        .arg("--output")
        .arg("json");

    let output = cmd.output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["strategy"], "none");
    assert_eq!(json["accesses"], 80);
    assert_eq!(json["hits"], 0);
}

#[test]
fn test_generate_is_reproducible() {
    let run = || {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("corrminer");
        cmd.arg("generate").arg("--length").arg("32").arg("--seed").arg("42");
        cmd.output().unwrap().stdout
    };

    let first = run();
    assert_eq!(first, run());
    let text = String::from_utf8(first).unwrap();
    assert_eq!(text.trim().len(), 32);
    assert!(text.trim().chars().all(|c| c.is_ascii_lowercase()));
}

#[test]
fn test_generate_custom_alphabet() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("corrminer");
    cmd.arg("generate")
        .arg("--length")
        .arg("16")
        .arg("--alphabet")
        .arg("xy");

    cmd.assert()
        .success()
        .stdout(predicate::str::is_match("^[xy]{16}\n$").unwrap());
}
