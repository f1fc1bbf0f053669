//! Integration tests for furrow CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn furrow(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_furrow"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_mission(dir: &Path, agents: &str) -> String {
    let path = dir.join("mission.yaml");
    let out = furrow(&["init", "--agents", agents, "-o", path.to_str().unwrap()]);
    assert!(out.status.success(), "init failed: {}", String::from_utf8_lossy(&out.stderr));
    path.to_str().unwrap().to_string()
}

#[test]
fn help_lists_subcommands() {
    let output = furrow(&["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("init"));
    assert!(text.contains("plan"));
    assert!(text.contains("sweep"));
}

#[test]
fn init_writes_loadable_mission() {
    let dir = TempDir::new().unwrap();
    let path = write_mission(dir.path(), "3");

    let yaml = fs::read_to_string(&path).unwrap();
    assert!(yaml.contains("Agent 1"));
    assert!(yaml.contains("Agent 3"));
    assert!(yaml.contains("#0000FF"));

    let output = furrow(&["plan", &path]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn init_to_stdout() {
    let output = furrow(&["init", "--agents", "2", "--lat", "-33.86", "--lng", "151.2"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("agents:"));
    assert!(text.contains("-33.86"));
}

#[test]
fn plan_produces_json() {
    let dir = TempDir::new().unwrap();
    let path = write_mission(dir.path(), "2");

    let output = furrow(&["plan", &path, "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("Output should be valid JSON");
    let agents = value["agents"].as_array().expect("agents array");
    assert_eq!(agents.len(), 2);
    for agent in agents {
        let plan = &agent["plan"];
        let rows = plan["rows"].as_array().unwrap().len();
        assert!(rows >= 5);
        assert_eq!(plan["waypoints"].as_array().unwrap().len(), rows * 2);
        assert_eq!(plan["estimate"]["waypoint_count"].as_u64().unwrap() as usize, rows * 2);
    }
}

#[test]
fn plan_produces_svg_file() {
    let dir = TempDir::new().unwrap();
    let path = write_mission(dir.path(), "2");
    let svg_path = dir.path().join("plan.svg");

    let output = furrow(&["plan", &path, "-f", "svg", "-o", svg_path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());

    let svg = fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<polygon"));
    assert!(svg.contains("stroke=\"#FF0000\""));
    assert!(svg.contains("stroke=\"#00FF00\""));
}

#[test]
fn plan_produces_text_summary() {
    let dir = TempDir::new().unwrap();
    let path = write_mission(dir.path(), "1");

    let output = furrow(&["plan", &path, "-f", "text"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Agent 1"));
    assert!(text.contains("meters"));
    assert!(text.contains("Efficiency:"));
    assert!(text.contains("Estimated time: 0:"));
    assert!(text.contains("Waypoints:"));
}

#[test]
fn plan_single_agent() {
    let dir = TempDir::new().unwrap();
    let path = write_mission(dir.path(), "3");

    let output = furrow(&["plan", &path, "-f", "text", "--agent", "2"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Agent 2"));
    assert!(!text.contains("Agent 1"));

    let missing = furrow(&["plan", &path, "--agent", "4"]);
    assert!(!missing.status.success());
}

#[test]
fn degenerate_agent_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mission.yaml");
    fs::write(
        &path,
        r#"name: mixed
agents:
  - name: Good
    points: "-7.9159, 110.5606, -7.9149, 110.5606, -7.9149, 110.5616, -7.9159, 110.5616"
  - name: Flat
    points: "0, 0, 0, 0.001, 0, 0.002"
"#,
    )
    .unwrap();
    let path = path.to_str().unwrap();

    let output = furrow(&["plan", path, "-f", "text"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Good"));
    assert!(text.contains("Flat"));
    assert!(text.contains("Error: Degenerate geometry"));

    let strict = furrow(&["plan", path, "--strict"]);
    assert!(!strict.status.success());
    assert!(stdout(&strict).is_empty());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("Flat"));
}

#[test]
fn missing_mission_names_the_file() {
    let output = furrow(&["plan", "/nonexistent/mission.yaml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/mission.yaml"));
}

#[test]
fn sweep_plans_points() {
    let output = furrow(&[
        "sweep",
        "--points",
        "-7.9159, 110.5606, -7.9149, 110.5606, -7.9149, 110.5616, -7.9159, 110.5616",
        "--angle",
        "90",
        "--separation",
        "10",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let text = stdout(&output);
    assert!(text.contains("Rows:"));
    assert!(text.contains("Waypoints:"));
}

#[test]
fn sweep_reads_points_file() {
    let dir = TempDir::new().unwrap();
    let points = dir.path().join("area.txt");
    fs::write(&points, "-7.9159, 110.5606,\n-7.9149, 110.5606,\n-7.9149, 110.5616\n").unwrap();

    let output = furrow(&["sweep", "--points-file", points.to_str().unwrap(), "-f", "json"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["agents"][0]["area"].as_array().unwrap().len(), 3);
}

#[test]
fn sweep_rejects_bad_points() {
    let output = furrow(&["sweep", "--points", "1, 2, 3"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("even number"));
}
