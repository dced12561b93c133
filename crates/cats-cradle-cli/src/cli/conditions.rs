//! Conditions command: show the configured condition grid.

use super::common::load_config;

pub fn cmd_conditions(args: &[String]) {
    let mut config_path: Option<&str> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(&args[i]);
                }
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

    println!(
        "Condition grid: {} dot counts x {} connectedness levels",
        cfg.dot_counts.len(),
        cfg.connectedness_levels.len()
    );
    println!();
    println!("{:>6}  {:>12}  {:>6}", "dots", "connections", "quota");
    for &level in &cfg.connectedness_levels {
        for &dot_count in &cfg.dot_counts {
            println!("{:>6}  {:>12}  {:>6}", dot_count, level, cfg.patterns_per_condition);
        }
    }

    println!();
    println!(
        "Reference pool: {} dots, 0 connections, {} patterns",
        cfg.reference_dot_count, cfg.reference_quota
    );

    let test_total =
        cfg.dot_counts.len() * cfg.connectedness_levels.len() * cfg.patterns_per_condition;
    println!("Total: {} test + {} reference patterns", test_total, cfg.reference_quota);
}

fn print_usage() {
    eprintln!("Usage: cats-cradle conditions [options]");
    eprintln!();
    eprintln!("Prints every (dot count, connectedness) condition a configuration");
    eprintln!("covers, with its quota, without generating anything.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <file>   Pool configuration YAML (default: built-in)");
}
