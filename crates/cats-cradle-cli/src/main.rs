//! cats-cradle - dot-and-line stimulus pool generator
//!
//! Command-line front end over the cats-cradle library: pool export to
//! JSON, single-pattern SVG previews, condition listing, and a
//! per-condition feasibility harness.

use std::env;

mod cli;

use cli::{cmd_conditions, cmd_generate, cmd_harness, cmd_preview};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 {
        match args[1].as_str() {
            "generate" => {
                cmd_generate(&args[2..]);
                return;
            }
            "preview" => {
                cmd_preview(&args[2..]);
                return;
            }
            "conditions" => {
                cmd_conditions(&args[2..]);
                return;
            }
            "harness" => {
                cmd_harness(&args[2..]);
                return;
            }
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            unknown => {
                eprintln!("Unknown command: {}", unknown);
                eprintln!();
            }
        }
    }

    print_usage(&args[0]);
    std::process::exit(1);
}

fn print_usage(prog: &str) {
    eprintln!("Usage: {} <command> [options]", prog);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  generate    Build the full pattern pool and write it as JSON");
    eprintln!("  preview     Generate a single pattern and write it as SVG");
    eprintln!("  conditions  Print the condition grid for a configuration");
    eprintln!("  harness     Check every condition is reachable, with timings");
    eprintln!("  help        Show this help");
    eprintln!();
    eprintln!("Run '{} <command> --help' for command options.", prog);
}
