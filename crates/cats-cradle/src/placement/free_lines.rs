//! Free segment placement.

use std::f64::consts::PI;

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::geometry::{lines_intersect, point_to_segment_distance, Line, Point};
use crate::rng::Rng;

/// Place `count` free segments among the dots.
///
/// A candidate starts on the integer grid anywhere in the field; the end
/// point follows from a uniform angle and a uniform length between the
/// segment bounds. It is kept only if the end point stays inside the
/// field, it crosses nothing already placed (`existing` plus this call's
/// own), and it keeps clearance from every dot.
///
/// Each segment gets its own attempt budget. Returns only the newly
/// placed segments, in placement order.
pub fn generate_free_lines(
    cfg: &GeneratorConfig,
    count: usize,
    dots: &[Point],
    existing: &[Line],
    rng: &mut Rng,
) -> Result<Vec<Line>, GenerateError> {
    let half_w = cfg.half_width();
    let half_h = cfg.half_height();
    let min_x = (-half_w).ceil() as i32;
    let max_x = half_w.floor() as i32;
    let min_y = (-half_h).ceil() as i32;
    let max_y = half_h.floor() as i32;

    let mut placed: Vec<Line> = Vec::with_capacity(count);

    for _ in 0..count {
        let mut accepted = false;

        for _ in 0..cfg.max_line_attempts {
            let x1 = rng.next_int(min_x, max_x) as f64;
            let y1 = rng.next_int(min_y, max_y) as f64;
            let angle = rng.next_range(0.0, 2.0 * PI);
            let length = rng.next_range(cfg.min_line_length, cfg.max_line_length);

            let x2 = x1 + length * angle.cos();
            let y2 = y1 + length * angle.sin();
            if x2 < -half_w || x2 > half_w || y2 < -half_h || y2 > half_h {
                continue;
            }

            let candidate = Line::new(x1, y1, x2, y2);

            if existing
                .iter()
                .chain(placed.iter())
                .any(|l| lines_intersect(&candidate, l))
            {
                continue;
            }
            if dots
                .iter()
                .any(|d| point_to_segment_distance(*d, &candidate) < cfg.min_line_dot_distance)
            {
                continue;
            }

            placed.push(candidate);
            accepted = true;
            break;
        }

        if !accepted {
            return Err(GenerateError::PlacementExhausted {
                stage: "free segments",
                placed: placed.len(),
                requested: count,
            });
        }
    }

    Ok(placed)
}
