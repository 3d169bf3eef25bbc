//! CLI integration tests for scns-think / scns-selfplay

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::{contains, starts_with};
use tempfile::tempdir;

#[test]
fn think_prints_bestmove() {
    let mut cmd = Command::cargo_bin("scns-think").unwrap();
    cmd.arg("--sfen").arg("startpos").arg("--iterations").arg("30");
    cmd.assert().success().stdout(starts_with("bestmove "));
}

#[test]
fn think_applies_moves_and_prints_json() {
    let mut cmd = Command::cargo_bin("scns-think").unwrap();
    cmd.args(["--moves", "2c2b", "1a2b", "--iterations", "30", "--json"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["iterations"], 30);
    assert_ne!(json["bestmove"], "resign");
    assert!(json["children"].as_array().is_some_and(|c| !c.is_empty()));
}

#[test]
fn think_resigns_when_game_is_over() {
    let mut cmd = Command::cargo_bin("scns-think").unwrap();
    cmd.args(["--sfen", "L2/3/2l/3 w - 1", "--iterations", "5"]);
    cmd.assert().success().stdout(contains("bestmove resign"));
}

#[test]
fn think_reads_config_file() {
    let td = tempdir().unwrap();
    let config = td.path().join("search.toml");
    fs::write(&config, "max_iterations = 12\nvmax_scan = \"descending\"\n").unwrap();

    let mut cmd = Command::cargo_bin("scns-think").unwrap();
    cmd.arg("--config").arg(&config).arg("--json");
    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["iterations"], 12);
}

#[test]
fn think_rejects_bad_input() {
    let mut cmd = Command::cargo_bin("scns-think").unwrap();
    cmd.args(["--sfen", "gle/1c1 b - 1"]);
    cmd.assert().failure().stderr(contains("invalid SFEN"));

    let mut cmd = Command::cargo_bin("scns-think").unwrap();
    cmd.args(["--moves", "2d2c", "--iterations", "1"]);
    cmd.assert().failure().stderr(contains("illegal move"));

    let td = tempdir().unwrap();
    let config = td.path().join("bad.toml");
    fs::write(&config, "thinking_time = 3\n").unwrap();
    let mut cmd = Command::cargo_bin("scns-think").unwrap();
    cmd.arg("--config").arg(&config);
    cmd.assert().failure().stderr(contains("invalid config file"));
}

#[test]
fn selfplay_writes_jsonl() {
    let td = tempdir().unwrap();
    let out = td.path().join("games.jsonl");

    let mut cmd = Command::cargo_bin("scns-selfplay").unwrap();
    cmd.args(["--iterations", "20", "--max-plies", "4", "--out"])
        .arg(&out);
    cmd.assert().success();

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let (result, moves) = lines.split_last().unwrap();
    assert_eq!(result["type"], "result");
    assert!(!moves.is_empty() && moves.len() <= 4);
    assert_eq!(result["plies"], moves.len() as u64);
    assert!(moves.iter().all(|m| m["type"] == "move"));
    assert_eq!(moves[0]["side_to_move"], "b");
    assert_eq!(moves[0]["sfen_before"], "gle/1c1/1C1/ELG b - 1");
}
