//! Generate command: build the full pool and export it as JSON.

use std::time::Instant;

use serde::Serialize;

use cats_cradle::{build_pool, PatternPool, PoolConfig};

use super::common::{load_config, resolve_seed, write_output};

/// Manifest wrapper around an exported pool. Everything needed to
/// reproduce the pool rides along with it.
#[derive(Serialize)]
struct PoolDocument<'a> {
    tool: &'static str,
    version: &'static str,
    generated_at: String,
    seed: u64,
    config: &'a PoolConfig,
    pool: &'a PatternPool,
}

pub fn cmd_generate(args: &[String]) {
    let mut config_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut seed_flag: Option<u64> = None;
    let mut pretty = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(&args[i]);
                }
            }
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(&args[i]);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed_flag = args[i].parse().ok();
                }
            }
            "--pretty" => {
                pretty = true;
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

    let conditions = cfg.dot_counts.len() * cfg.connectedness_levels.len();
    eprintln!(
        "Building pool: {} conditions x {} patterns + {} reference (seed {})",
        conditions, cfg.patterns_per_condition, cfg.reference_quota, seed
    );

    let start = Instant::now();
    let pool = match build_pool(&cfg, seed) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    eprintln!("Generated {} patterns in {:?}", pool.total_patterns(), start.elapsed());

    let doc = PoolDocument {
        tool: "cats-cradle",
        version: env!("CARGO_PKG_VERSION"),
        generated_at: chrono::Utc::now().to_rfc3339(),
        seed,
        config: &cfg,
        pool: &pool,
    };

    let json = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    match json {
        Ok(json) => write_output(output_path, &json),
        Err(e) => {
            eprintln!("Error: failed to serialize pool: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: cats-cradle generate [options]");
    eprintln!();
    eprintln!("Builds the full stimulus pool and writes it as a JSON document");
    eprintln!("with the seed and configuration embedded.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <file>   Pool configuration YAML (default: built-in)");
    eprintln!("  -o, --output <file>   Output file ('-' or omitted: stdout)");
    eprintln!("  --seed <n>            Generator seed (default: config, else random)");
    eprintln!("  --pretty              Pretty-print the JSON");
}
