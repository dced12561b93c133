//! Dot placement by rejection sampling.

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::geometry::Point;
use crate::rng::Rng;

/// Integer sampling bounds for dot centers, inset by the boundary margin.
fn inset_bounds(cfg: &GeneratorConfig) -> Result<(i32, i32, i32, i32), GenerateError> {
    let margin = cfg.min_dot_boundary_distance;
    if cfg.field_width - 2.0 * margin <= 0.0 || cfg.field_height - 2.0 * margin <= 0.0 {
        return Err(GenerateError::InfeasibleBounds {
            width: cfg.field_width,
            height: cfg.field_height,
            margin,
        });
    }

    let min_x = (-cfg.half_width() + margin).ceil() as i32;
    let max_x = (cfg.half_width() - margin).floor() as i32;
    let min_y = (-cfg.half_height() + margin).ceil() as i32;
    let max_y = (cfg.half_height() - margin).floor() as i32;
    Ok((min_x, max_x, min_y, max_y))
}

/// Place `n` dots on the integer grid inside the inset rectangle, each at
/// least `min_dot_distance` from every earlier dot.
///
/// One attempt budget is shared across all `n` dots, so a layout that
/// paints itself into a corner fails fast instead of hammering on the
/// last dot. Callers retry with a whole fresh layout on failure; partial
/// dot sets are never patched up or reused.
pub fn generate_dots(
    cfg: &GeneratorConfig,
    n: usize,
    rng: &mut Rng,
) -> Result<Vec<Point>, GenerateError> {
    let (min_x, max_x, min_y, max_y) = inset_bounds(cfg)?;

    let mut dots: Vec<Point> = Vec::with_capacity(n);
    let mut attempts: u32 = 0;

    while dots.len() < n {
        if attempts >= cfg.max_dot_attempts {
            return Err(GenerateError::PlacementExhausted {
                stage: "dots",
                placed: dots.len(),
                requested: n,
            });
        }
        attempts += 1;

        let candidate = Point::new(
            rng.next_int(min_x, max_x) as f64,
            rng.next_int(min_y, max_y) as f64,
        );

        if dots.iter().any(|d| d.distance(candidate) < cfg.min_dot_distance) {
            continue;
        }
        dots.push(candidate);
    }

    Ok(dots)
}
