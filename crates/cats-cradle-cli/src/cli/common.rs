//! Shared helpers for CLI commands.

use std::fs;

use log::debug;

use cats_cradle::PoolConfig;

/// Load a pool configuration from YAML, or the defaults when no file is
/// given. Omitted fields fall back to their defaults, so a config file
/// only needs to name what it changes.
pub fn load_config(path: Option<&str>) -> PoolConfig {
    let Some(path) = path else {
        return PoolConfig::default();
    };

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: failed to read config {}: {}", path, e);
            std::process::exit(1);
        }
    };

    match serde_yaml::from_str(&content) {
        Ok(cfg) => {
            debug!("loaded config from {}", path);
            cfg
        }
        Err(e) => {
            eprintln!("Error: failed to parse config {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

/// Pick the seed: command line beats config file beats a fresh OS draw.
pub fn resolve_seed(flag: Option<u64>, cfg: &PoolConfig) -> u64 {
    match flag.or(cfg.seed) {
        Some(s) => s,
        None => {
            let s = rand::random::<u64>();
            eprintln!("No seed given, using {}", s);
            s
        }
    }
}

/// Write to a file, or to stdout for `None` / `-`.
pub fn write_output(path: Option<&str>, content: &str) {
    match path {
        Some("-") | None => {
            println!("{}", content);
        }
        Some(path) => {
            if let Err(e) = fs::write(path, content) {
                eprintln!("Error: failed to write {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Wrote: {}", path);
        }
    }
}
