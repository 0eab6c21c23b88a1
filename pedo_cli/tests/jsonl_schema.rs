use assert_cmd::prelude::*;
use rstest::rstest;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("valid JSON"))
        .collect()
}

/// Validate the JSONL schema of step reports for both sources.
#[rstest]
#[case(false)]
#[case(true)]
fn jsonl_report_schema(#[case] hardware: bool) {
    let mut cmd = Command::cargo_bin("pedo").unwrap();
    cmd.arg("--json")
        .arg("--log-level")
        .arg("error")
        .arg("simulate")
        .arg("--steps")
        .arg("5");
    if hardware {
        cmd.arg("--hardware");
    }

    let out = cmd.assert().success().get_output().stdout.clone();
    let reports = json_lines(&out);
    assert!(!reports.is_empty(), "no JSON lines on stdout");

    let mut prev_steps = 0;
    let mut prev_end = 0;
    let start = reports[0]["startDate"].as_u64().expect("startDate");
    for v in &reports {
        let obj = v.as_object().expect("report is an object");
        assert_eq!(obj.len(), 3, "unexpected keys: {v}");
        let s = v["startDate"].as_u64().expect("startDate is a number");
        let e = v["endDate"].as_u64().expect("endDate is a number");
        let n = v["numberOfSteps"].as_u64().expect("numberOfSteps is a number");
        assert_eq!(s, start, "start date is fixed for a session");
        assert!(e >= s && e >= prev_end);
        assert!(n >= prev_steps);
        prev_steps = n;
        prev_end = e;
    }
    // Baseline report first, then one report per step
    assert_eq!(reports[0]["numberOfSteps"], 0);
    assert_eq!(prev_steps, 5);
    assert_eq!(reports.len(), 6);
}

#[rstest]
fn jsonl_capabilities_schema() {
    let mut cmd = Command::cargo_bin("pedo").unwrap();
    cmd.arg("--json").arg("capabilities").arg("--hardware");

    let out = cmd.assert().success().get_output().stdout.clone();
    let lines = json_lines(&out);
    assert_eq!(lines.len(), 1);
    let v = &lines[0];
    assert_eq!(v["stepCounting"], true);
    assert_eq!(v["hardwareCounter"], true);
    assert_eq!(v["distance"], false);
    assert_eq!(v["floorCounting"], false);
}

/// Errors in --json mode are a single JSON object on stderr.
#[rstest]
fn jsonl_error_schema() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, "[detector]\nalpha = 1.5\n").unwrap();

    let mut cmd = Command::cargo_bin("pedo").unwrap();
    cmd.arg("--json")
        .arg("--config")
        .arg(&cfg)
        .arg("simulate")
        .arg("--steps")
        .arg("1");

    let out = cmd.assert().code(3).get_output().stderr.clone();
    let stderr = String::from_utf8_lossy(&out);
    let line = stderr
        .lines()
        .find(|l| l.contains("\"reason\""))
        .unwrap_or("")
        .to_string();
    assert!(!line.is_empty(), "no JSON error line; stderr was: {stderr}");

    let v: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
    assert_eq!(v["reason"], "InvalidConfig");
    assert_eq!(v["exit_code"], 3);
    assert!(v["message"].as_str().unwrap_or("").contains("detector.alpha"));
}
