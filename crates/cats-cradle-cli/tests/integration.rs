//! Integration tests for the cats-cradle CLI.
//!
//! These run the compiled binary end to end. A small, feasible pool
//! configuration keeps the generating tests fast.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn binary_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up from cats-cradle-cli to crates
    path.pop(); // Go up from crates to the workspace root

    // Try release first, then debug
    let release = path.join("target/release/cats-cradle");
    if release.exists() {
        return release;
    }
    path.join("target/debug/cats-cradle")
}

const SMALL_CONFIG: &str = "\
pattern:
  field_width: 200.0
  field_height: 200.0
  min_dot_distance: 30.0
dot_counts: [5, 6]
connectedness_levels: [0, 1]
patterns_per_condition: 2
reference_dot_count: 5
reference_quota: 2
seed: 11
";

/// Write the small config under a per-test name so parallel tests never
/// step on each other.
fn small_config(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("cats-cradle-tests");
    fs::create_dir_all(&dir).expect("Failed to create temp dir");
    let path = dir.join(name);
    fs::write(&path, SMALL_CONFIG).expect("Failed to write test config");
    path
}

/// Everything from the top-level "seed" field on: the document minus the
/// run timestamp.
fn from_seed(stdout: &str) -> &str {
    let at = stdout.find("\"seed\"").expect("document should contain a seed field");
    &stdout[at..]
}

#[test]
fn no_args_shows_usage_and_fails() {
    let output = Command::new(binary_path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"), "stderr was: {}", stderr);
    assert!(stderr.contains("generate"));
}

#[test]
fn unknown_command_fails() {
    let output = Command::new(binary_path())
        .arg("frobnicate")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown command: frobnicate"), "stderr was: {}", stderr);
}

#[test]
fn help_lists_every_command() {
    let output = Command::new(binary_path())
        .arg("help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    for command in ["generate", "preview", "conditions", "harness"] {
        assert!(stderr.contains(command), "help should mention {}", command);
    }
}

#[test]
fn conditions_prints_the_default_grid() {
    let output = Command::new(binary_path())
        .arg("conditions")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("7 dot counts x 3 connectedness levels"), "stdout was: {}", stdout);
    assert!(stdout.contains("Reference pool: 12 dots, 0 connections, 168 patterns"));
    assert!(stdout.contains("Total: 168 test + 168 reference patterns"));
}

#[test]
fn generate_is_deterministic_for_a_seed() {
    let config = small_config("determinism.yaml");

    let run = || {
        let output = Command::new(binary_path())
            .args(["generate", "--config", config.to_str().unwrap(), "--seed", "7"])
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        String::from_utf8_lossy(&output.stdout).into_owned()
    };

    let first = run();
    let second = run();
    assert_eq!(from_seed(&first), from_seed(&second), "same seed must reproduce the pool");
}

#[test]
fn generate_falls_back_to_the_config_seed() {
    let config = small_config("config-seed.yaml");

    let implicit = Command::new(binary_path())
        .args(["generate", "--config", config.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    let explicit = Command::new(binary_path())
        .args(["generate", "--config", config.to_str().unwrap(), "--seed", "11"])
        .output()
        .expect("Failed to execute command");

    assert!(implicit.status.success());
    assert!(explicit.status.success());
    let implicit_out = String::from_utf8_lossy(&implicit.stdout).into_owned();
    let explicit_out = String::from_utf8_lossy(&explicit.stdout).into_owned();
    assert_eq!(from_seed(&implicit_out), from_seed(&explicit_out));
}

#[test]
fn generate_seeds_differ_in_content() {
    let config = small_config("seed-content.yaml");

    let run = |seed: &str| {
        let output = Command::new(binary_path())
            .args(["generate", "--config", config.to_str().unwrap(), "--seed", seed])
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).into_owned()
    };

    let a = run("7");
    let b = run("8");
    let pool_of = |s: &str| s[s.find("\"pool\"").unwrap()..].to_string();
    assert_ne!(pool_of(&a), pool_of(&b), "different seeds should produce different pools");
}

#[test]
fn generate_emits_the_document_structure() {
    let config = small_config("structure.yaml");

    let output = Command::new(binary_path())
        .args(["generate", "--config", config.to_str().unwrap(), "--seed", "7", "--pretty"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for field in ["\"tool\"", "\"generated_at\"", "\"config\"", "\"reference\"", "\"conditions\"", "\"signature\"", "\"pairs\""] {
        assert!(stdout.contains(field), "document should contain {}", field);
    }
    assert!(stdout.contains("\"tool\": \"cats-cradle\""));
}

#[test]
fn generate_rejects_a_missing_config() {
    let output = Command::new(binary_path())
        .args(["generate", "--config", "/nonexistent/pool.yaml"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read config"), "stderr was: {}", stderr);
}

#[test]
fn preview_renders_the_requested_pattern() {
    let config = small_config("preview.yaml");

    let output = Command::new(binary_path())
        .args([
            "preview",
            "--config",
            config.to_str().unwrap(),
            "--dots",
            "5",
            "--connections",
            "1",
            "--seed",
            "3",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<svg"));
    assert_eq!(stdout.matches("<circle").count(), 5, "one circle per dot");
    assert_eq!(stdout.matches("<line").count(), 4, "one stroke per segment");
}

#[test]
fn preview_is_deterministic_on_stdout() {
    let config = small_config("preview-determinism.yaml");

    let run = || {
        let output = Command::new(binary_path())
            .args(["preview", "--config", config.to_str().unwrap(), "--seed", "3"])
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).into_owned()
    };

    assert_eq!(run(), run());
}

#[test]
fn preview_writes_an_output_file() {
    let config = small_config("preview-file.yaml");
    let out = std::env::temp_dir().join("cats-cradle-tests").join("preview.svg");

    let output = Command::new(binary_path())
        .args([
            "preview",
            "--config",
            config.to_str().unwrap(),
            "--seed",
            "3",
            "-o",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Wrote:"), "stderr was: {}", stderr);

    let svg = fs::read_to_string(&out).expect("preview file should exist");
    assert!(svg.ends_with("</svg>\n"));
}

#[test]
fn preview_rejects_more_connections_than_segments() {
    let output = Command::new(binary_path())
        .args(["preview", "--connections", "9"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot fit"), "stderr was: {}", stderr);
}

#[test]
fn harness_passes_on_the_small_config() {
    let config = small_config("harness.yaml");

    let output = Command::new(binary_path())
        .args(["harness", "--config", config.to_str().unwrap(), "--seed", "7"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HARNESS SUMMARY"));
    assert!(stderr.contains("Passed: 4  Failed: 0"), "stderr was: {}", stderr);
}

#[test]
fn harness_json_reports_every_condition() {
    let config = small_config("harness-json.yaml");

    let output = Command::new(binary_path())
        .args(["harness", "--config", config.to_str().unwrap(), "--seed", "7", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"passed\": 4"), "stdout was: {}", stdout);
    assert!(stdout.contains("\"failed\": 0"));
    assert_eq!(stdout.matches("\"status\": \"ok\"").count(), 4);
}
