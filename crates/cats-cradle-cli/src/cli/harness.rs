//! Harness command: check every condition is reachable and time it.
//!
//! Builds each (dot count, connectedness) condition as its own one-
//! condition pool with the shared seed, so a pathological condition is
//! pinpointed instead of sinking the whole build.

use std::time::Instant;

use serde::Serialize;

use cats_cradle::build_pool;

use super::common::{load_config, resolve_seed};

/// Result of building a single condition.
#[derive(Debug, Serialize)]
pub struct ConditionResult {
    /// Dots per pattern in this condition
    pub dot_count: usize,
    /// Connecting segments per pattern
    pub connections: usize,
    /// Unique patterns required
    pub quota: usize,
    /// Unique patterns actually produced
    pub patterns: usize,
    /// Wall clock build time in milliseconds
    pub time_ms: f64,
    /// "ok" or "failed"
    pub status: &'static str,
    /// Failure detail, present only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Full harness report, one entry per condition.
#[derive(Debug, Serialize)]
pub struct HarnessReport {
    pub seed: u64,
    pub conditions: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<ConditionResult>,
}

pub fn cmd_harness(args: &[String]) {
    let mut config_path: Option<&str> = None;
    let mut seed_flag: Option<u64> = None;
    let mut json_output = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(&args[i]);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed_flag = args[i].parse().ok();
                }
            }
            "--json" => {
                json_output = true;
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            unknown => {
                eprintln!("Unknown option: {}", unknown);
            }
        }
        i += 1;
    }

    let cfg = load_config(config_path);
    let seed = resolve_seed(seed_flag, &cfg);

    if !json_output {
        eprintln!("cats-cradle harness");
        eprintln!("===================");
        eprintln!(
            "Field: {}x{}, {} segments per pattern",
            cfg.pattern.field_width, cfg.pattern.field_height, cfg.pattern.lines_per_pattern
        );
        eprintln!(
            "Conditions: {} (quota {} each, seed {})\n",
            cfg.dot_counts.len() * cfg.connectedness_levels.len(),
            cfg.patterns_per_condition,
            seed
        );
    }

    let mut results: Vec<ConditionResult> = Vec::new();
    let mut passed = 0;
    let mut failed = 0;

    for &level in &cfg.connectedness_levels {
        for &dot_count in &cfg.dot_counts {
            if !json_output {
                eprint!("  {:>2} dots / {} connections ... ", dot_count, level);
            }

            // a one-condition pool, no reference patterns
            let mut one = cfg.clone();
            one.dot_counts = vec![dot_count];
            one.connectedness_levels = vec![level];
            one.reference_quota = 0;

            let start = Instant::now();
            let outcome = build_pool(&one, seed);
            let time_ms = start.elapsed().as_secs_f64() * 1000.0;

            let result = match outcome {
                Ok(pool) => {
                    passed += 1;
                    ConditionResult {
                        dot_count,
                        connections: level,
                        quota: cfg.patterns_per_condition,
                        patterns: pool.total_patterns(),
                        time_ms,
                        status: "ok",
                        error: None,
                    }
                }
                Err(e) => {
                    failed += 1;
                    ConditionResult {
                        dot_count,
                        connections: level,
                        quota: cfg.patterns_per_condition,
                        patterns: 0,
                        time_ms,
                        status: "failed",
                        error: Some(e.to_string()),
                    }
                }
            };

            if !json_output {
                match &result.error {
                    None => eprintln!("{:>3} patterns in {:>7.1}ms", result.patterns, time_ms),
                    Some(e) => eprintln!("FAILED: {}", e),
                }
            }
            results.push(result);
        }
    }

    if json_output {
        let report = HarnessReport {
            seed,
            conditions: results.len(),
            passed,
            failed,
            results,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        eprintln!("\n════════════════════════════════════════════════════════");
        eprintln!("  HARNESS SUMMARY");
        eprintln!("════════════════════════════════════════════════════════");
        eprintln!("  {:>4}  {:>11}  {:>8}  {:>9}  {:>6}", "Dots", "Connections", "Patterns", "Time(ms)", "Status");

        let mut total_time = 0.0;
        for r in &results {
            let status = if r.status == "ok" { "✓" } else { "✗" };
            eprintln!(
                "  {:>4}  {:>11}  {:>8}  {:>9.1}  {:>6}",
                r.dot_count, r.connections, r.patterns, r.time_ms, status
            );
            total_time += r.time_ms;
        }

        eprintln!("════════════════════════════════════════════════════════");
        eprintln!("  Passed: {}  Failed: {}  ({:.1}ms total)", passed, failed, total_time);
        eprintln!("════════════════════════════════════════════════════════");
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: cats-cradle harness [options]");
    eprintln!();
    eprintln!("Builds every condition separately and reports whether its quota");
    eprintln!("was reachable and how long it took. Exits non-zero if any");
    eprintln!("condition fails.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <file>   Pool configuration YAML (default: built-in)");
    eprintln!("  --seed <n>            Generator seed (default: config, else random)");
    eprintln!("  --json                Emit the report as JSON on stdout");
}
