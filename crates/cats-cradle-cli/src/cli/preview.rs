//! Preview command: one pattern rendered as a standalone SVG.

use cats_cradle::{generate_pattern, GeneratorConfig, Pattern, Rng};

use super::common::{load_config, resolve_seed, write_output};

pub fn cmd_preview(args: &[String]) {
    let mut config_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut seed_flag: Option<u64> = None;
    let mut dot_count: usize = 12;
    let mut connections: usize = 0;

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
            "-d" | "--dots" => {
                i += 1;
                if i < args.len() {
                    dot_count = args[i].parse().unwrap_or(12);
                }
            }
            "-k" | "--connections" => {
                i += 1;
                if i < args.len() {
                    connections = args[i].parse().unwrap_or(0);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed_flag = args[i].parse().ok();
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
    if connections > cfg.pattern.lines_per_pattern {
        eprintln!(
            "Error: {} connections cannot fit in {} segments",
            connections, cfg.pattern.lines_per_pattern
        );
        std::process::exit(1);
    }

    let seed = resolve_seed(seed_flag, &cfg);
    let mut rng = Rng::new(seed);

    eprintln!("Generating {} dots / {} connections (seed {})", dot_count, connections, seed);

    let pattern = match generate_pattern(
        &cfg.pattern,
        dot_count,
        connections,
        cfg.max_attempts_per_pattern,
        &mut rng,
    ) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let svg = pattern_to_svg(&pattern, &cfg.pattern);
    write_output(output_path, &svg);
}

/// Render a pattern as a standalone SVG document.
///
/// The viewBox is the stimulus field itself (origin-centered), so the
/// drawing needs no coordinate shuffling: segments become strokes, dots
/// become filled circles, both sized by the display constants.
pub fn pattern_to_svg(pattern: &Pattern, cfg: &GeneratorConfig) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">
"#,
        -cfg.half_width(),
        -cfg.half_height(),
        cfg.field_width,
        cfg.field_height
    ));

    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
        -cfg.half_width(),
        -cfg.half_height(),
        cfg.field_width,
        cfg.field_height
    ));

    svg.push_str(&format!(
        "<g stroke=\"black\" stroke-width=\"{}\" stroke-linecap=\"round\">\n",
        cfg.line_width
    ));
    for line in &pattern.lines {
        svg.push_str(&format!(
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>\n",
            line.x1, line.y1, line.x2, line.y2
        ));
    }
    svg.push_str("</g>\n");

    svg.push_str("<g fill=\"black\">\n");
    for dot in &pattern.dots {
        svg.push_str(&format!(
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\"/>\n",
            dot.x,
            dot.y,
            cfg.dot_diameter / 2.0
        ));
    }
    svg.push_str("</g>\n</svg>\n");

    svg
}

fn print_usage() {
    eprintln!("Usage: cats-cradle preview [options]");
    eprintln!();
    eprintln!("Generates one pattern and writes it as a standalone SVG.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -d, --dots <n>         Number of dots (default: 12)");
    eprintln!("  -k, --connections <n>  Number of connecting segments (default: 0)");
    eprintln!("  -c, --config <file>    Pool configuration YAML (default: built-in)");
    eprintln!("  -o, --output <file>    Output file ('-' or omitted: stdout)");
    eprintln!("  --seed <n>             Generator seed (default: config, else random)");
}
