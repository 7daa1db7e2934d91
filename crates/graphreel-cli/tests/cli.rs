use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_snapshot(dir: &Path, step: usize, nodes: &[&str], links: &[(&str, &str)]) {
    let nodes: Vec<String> = nodes
        .iter()
        .map(|n| format!("{{\"name\": \"{}\"}}", n))
        .collect();
    let links: Vec<String> = links
        .iter()
        .map(|(s, t)| format!("{{\"source\": \"{}\", \"target\": \"{}\"}}", s, t))
        .collect();
    let doc = format!(
        "{{\"nodes\": [{}], \"links\": [{}]}}",
        nodes.join(", "),
        links.join(", ")
    );
    std::fs::write(dir.join(format!("network{}.json", step)), doc).unwrap();
}

/// Two snapshots: {A, B; A-B} then {A, B, C; A-B, B-C}
fn scenario() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("networkEvolution");
    std::fs::create_dir_all(&input).unwrap();
    write_snapshot(&input, 0, &["A", "B"], &[("A", "B")]);
    write_snapshot(&input, 1, &["A", "B", "C"], &[("A", "B"), ("B", "C")]);
    dir
}

fn graphreel(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("graphreel").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("config.toml"));
    cmd
}

#[test]
fn diff_shows_new_nodes_and_edges() {
    let dir = scenario();
    let input = dir.path().join("networkEvolution");

    graphreel(dir.path())
        .arg("diff")
        .arg(input.join("network0.json"))
        .arg(input.join("network1.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("+ node C"))
        .stdout(predicate::str::contains("+ edge B -> C"))
        .stdout(predicate::str::contains("node A").not());
}

#[test]
fn diff_json_output() {
    let dir = scenario();
    let input = dir.path().join("networkEvolution");

    let output = graphreel(dir.path())
        .args(["--format", "json", "diff"])
        .arg(input.join("network0.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let diff: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(diff["reveals"].as_array().unwrap().len(), 2);
}

#[test]
fn convert_writes_deduplicated_log() {
    let dir = scenario();

    graphreel(dir.path())
        .args(["convert", "--output", "DGS/network.dgs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 5 events from 2 snapshots"));

    let log = std::fs::read_to_string(dir.path().join("DGS").join("network.dgs")).unwrap();
    assert!(log.starts_with("DGS004\n\"NetworkEvolution\" 0 0\n"));
    assert_eq!(log.matches("an \"A\"").count(), 1);
    assert_eq!(log.matches("ae \"A-B\" \"A\" \"B\"").count(), 1);
    assert!(log.contains("ae \"B-C\" \"B\" \"C\"\nst 5\n"));
}

#[test]
fn convert_diff_order_adds_nodes_before_their_edges() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("networkEvolution");
    std::fs::create_dir_all(&input).unwrap();
    write_snapshot(&input, 0, &["A"], &[]);
    write_snapshot(&input, 1, &["A", "C", "D"], &[("C", "D"), ("D", "A"), ("C", "Z")]);

    graphreel(dir.path())
        .args(["convert", "--diff-order", "--output", "order.dgs"])
        .assert()
        .success();

    let log = std::fs::read_to_string(dir.path().join("order.dgs")).unwrap();
    let mut added = Vec::new();
    let mut edges = 0;
    for line in log.lines() {
        let fields: Vec<&str> = line.split('"').collect();
        if line.starts_with("an ") {
            added.push(fields[1].to_string());
        } else if line.starts_with("ae ") {
            edges += 1;
            for endpoint in [fields[3], fields[5]] {
                assert!(
                    added.iter().any(|n| n == endpoint),
                    "edge {} written before node {}",
                    fields[1],
                    endpoint
                );
            }
        }
    }
    assert_eq!(added, vec!["A", "C", "D"]);
    assert_eq!(edges, 2);
}

#[test]
fn animate_renders_frames() {
    let dir = scenario();

    graphreel(dir.path())
        .args(["animate", "--no-delay", "--output-prefix", "frames/image"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from 2 snapshots (3 nodes, 2 edges)"));

    // A, settle A, B, A-B, settle A-B, settle B, then C, B-C, settle B-C, settle C
    let frames = std::fs::read_dir(dir.path().join("frames")).unwrap().count();
    assert_eq!(frames, 10);
    assert!(dir.path().join("frames").join("image000009.svg").is_file());
}

#[test]
fn animate_aborts_on_missing_snapshot() {
    let dir = scenario();

    graphreel(dir.path())
        .args(["animate", "--no-delay", "--steps", "3", "--output-prefix", "frames/image"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Snapshot not found"));
}

#[test]
fn animate_rejects_malformed_snapshot() {
    let dir = scenario();
    std::fs::write(
        dir.path().join("networkEvolution").join("network2.json"),
        "{\"nodes\": [",
    )
    .unwrap();

    graphreel(dir.path())
        .args(["animate", "--no-delay", "--output-prefix", "frames/image"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse snapshot"));
}

#[test]
fn replay_renders_converted_log() {
    let dir = scenario();

    graphreel(dir.path()).arg("convert").assert().success();
    graphreel(dir.path())
        .args(["replay", "network.dgs", "--no-delay", "--output-prefix", "replay/image"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(3 nodes, 2 edges)"));

    assert!(dir.path().join("replay").join("image000000.svg").is_file());
}

#[test]
fn config_set_get_and_list() {
    let dir = tempfile::tempdir().unwrap();

    graphreel(dir.path())
        .args(["config", "set", "steps", "21"])
        .assert()
        .success();
    graphreel(dir.path())
        .args(["config", "get", "steps"])
        .assert()
        .success()
        .stdout("21\n");
    graphreel(dir.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reveal_delay_ms = 500"));

    graphreel(dir.path())
        .args(["config", "set", "quality", "ultra"])
        .assert()
        .failure();
    graphreel(dir.path())
        .args(["config", "get", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();

    graphreel(dir.path()).args(["config", "init"]).assert().success();
    graphreel(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    graphreel(dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_values_drive_commands() {
    let dir = scenario();

    graphreel(dir.path())
        .args(["config", "set", "event_log", "from-config.dgs"])
        .assert()
        .success();
    graphreel(dir.path()).arg("convert").assert().success();

    assert!(dir.path().join("from-config.dgs").is_file());
}

#[test]
fn completions_for_bash() {
    let dir = tempfile::tempdir().unwrap();

    graphreel(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("graphreel"));
    graphreel(dir.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef graphreel"));
}
