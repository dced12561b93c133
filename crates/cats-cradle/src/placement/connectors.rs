//! Connecting segment placement between dot pairs.

use crate::config::GeneratorConfig;
use crate::geometry::{lines_intersect, point_to_segment_distance, Line, Point};
use crate::rng::Rng;

/// Connecting segments realized between dot pairs.
///
/// `lines[i]` joins `dots[pairs[i].0]` to `dots[pairs[i].1]`.
#[derive(Debug, Clone, Default)]
pub struct Connections {
    pub lines: Vec<Line>,
    pub pairs: Vec<(usize, usize)>,
}

impl Connections {
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Try to realize `requested` connections between dots not yet connected.
///
/// Each connection samples two distinct dots from the unused pool and
/// accepts when the joining segment has a legal length, crosses nothing
/// (`existing` plus connections made here), and keeps clearance from
/// every dot except its own two endpoints. Used dots leave the pool, so
/// no dot ever joins two pairs.
///
/// May return fewer than `requested` when the remaining dots admit no
/// valid segment within the per-connection attempt budget. That shortfall
/// is an expected outcome, not an error: callers needing an exact count
/// check `len()` and retry with a fresh layout.
pub fn generate_connecting_lines(
    cfg: &GeneratorConfig,
    dots: &[Point],
    requested: usize,
    existing: &[Line],
    rng: &mut Rng,
) -> Connections {
    let mut unused: Vec<usize> = (0..dots.len()).collect();
    let mut result = Connections::default();

    for _ in 0..requested {
        if unused.len() < 2 {
            break;
        }

        let mut accepted = false;

        for _ in 0..cfg.max_connection_attempts {
            // two distinct positions in the unused pool
            let a = rng.next_index(unused.len());
            let mut b = rng.next_index(unused.len() - 1);
            if b >= a {
                b += 1;
            }
            let (i1, i2) = (unused[a], unused[b]);

            let candidate = Line::new(dots[i1].x, dots[i1].y, dots[i2].x, dots[i2].y);
            let len = candidate.length();
            if len < cfg.min_line_length || len > cfg.max_line_length {
                continue;
            }
            if existing
                .iter()
                .chain(result.lines.iter())
                .any(|l| lines_intersect(&candidate, l))
            {
                continue;
            }
            if clearance_blocked(cfg, dots, &candidate, i1, i2) {
                continue;
            }

            // remove the higher position first, removal shifts later elements
            let (first, second) = if a > b { (a, b) } else { (b, a) };
            unused.remove(first);
            unused.remove(second);

            result.lines.push(candidate);
            result.pairs.push((i1, i2));
            accepted = true;
            break;
        }

        if !accepted {
            break;
        }
    }

    result
}

/// True when the candidate runs closer than the clearance to any dot
/// other than its own endpoints.
fn clearance_blocked(
    cfg: &GeneratorConfig,
    dots: &[Point],
    candidate: &Line,
    i1: usize,
    i2: usize,
) -> bool {
    dots.iter().enumerate().any(|(i, d)| {
        i != i1 && i != i2 && point_to_segment_distance(*d, candidate) < cfg.min_line_dot_distance
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x4 grid where horizontal neighbors (50 apart) and the outer
    /// vertical neighbors (55 apart) are connectable, nothing else is.
    fn grid_dots() -> Vec<Point> {
        let mut dots = Vec::new();
        for &y in &[-90.0, -35.0, 35.0, 90.0] {
            for &x in &[-50.0, 0.0, 50.0] {
                dots.push(Point::new(x, y));
            }
        }
        dots
    }

    #[test]
    fn two_dots_always_connect() {
        let cfg = GeneratorConfig::default();
        let dots = vec![Point::new(-20.0, 0.0), Point::new(20.0, 0.0)];

        let made = generate_connecting_lines(&cfg, &dots, 1, &[], &mut Rng::new(1));
        assert_eq!(made.len(), 1);

        let (a, b) = made.pairs[0];
        assert_eq!(made.lines[0].start(), dots[a]);
        assert_eq!(made.lines[0].end(), dots[b]);
        assert_ne!(a, b);
    }

    #[test]
    fn connects_two_pairs_on_the_grid() {
        let cfg = GeneratorConfig::default();
        let dots = grid_dots();

        let made = generate_connecting_lines(&cfg, &dots, 2, &[], &mut Rng::new(42));
        assert_eq!(made.len(), 2, "the grid has 14 connectable pairs");

        let mut endpoints: Vec<usize> = Vec::new();
        for &(a, b) in &made.pairs {
            endpoints.push(a);
            endpoints.push(b);
        }
        endpoints.sort_unstable();
        endpoints.dedup();
        assert_eq!(endpoints.len(), 4, "no dot may join two pairs");

        for line in &made.lines {
            let len = line.length();
            assert!(len >= cfg.min_line_length && len <= cfg.max_line_length);
        }
        assert!(!lines_intersect(&made.lines[0], &made.lines[1]));
    }

    #[test]
    fn shortfall_when_lengths_never_fit() {
        let cfg = GeneratorConfig {
            max_connection_attempts: 200,
            ..GeneratorConfig::default()
        };
        // pairwise distances 75, 65 and 140, all outside [30, 60]
        let dots = vec![
            Point::new(-70.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(70.0, 0.0),
        ];

        let made = generate_connecting_lines(&cfg, &dots, 2, &[], &mut Rng::new(8));
        assert!(made.is_empty(), "no pair is connectable, got {:?}", made.pairs);
    }

    #[test]
    fn existing_segment_blocks_the_only_pair() {
        let cfg = GeneratorConfig {
            max_connection_attempts: 200,
            ..GeneratorConfig::default()
        };
        let dots = vec![Point::new(-20.0, 0.0), Point::new(20.0, 0.0)];
        let existing = vec![Line::new(0.0, -10.0, 0.0, 10.0)];

        let made = generate_connecting_lines(&cfg, &dots, 1, &existing, &mut Rng::new(8));
        assert!(made.is_empty());
    }

    #[test]
    fn bystander_dot_near_segment_blocks_it() {
        let cfg = GeneratorConfig {
            max_connection_attempts: 200,
            ..GeneratorConfig::default()
        };
        // the bystander dot sits 5 units from the only length-legal segment
        let dots = vec![
            Point::new(-20.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(0.0, 5.0),
        ];

        let made = generate_connecting_lines(&cfg, &dots, 1, &[], &mut Rng::new(8));
        assert!(made.is_empty(), "clearance from a bystander dot must reject the pair");
    }

    #[test]
    fn deterministic_for_seed() {
        let cfg = GeneratorConfig::default();
        let dots = grid_dots();
        let a = generate_connecting_lines(&cfg, &dots, 2, &[], &mut Rng::new(17));
        let b = generate_connecting_lines(&cfg, &dots, 2, &[], &mut Rng::new(17));
        assert_eq!(a.pairs, b.pairs);
        assert_eq!(a.lines, b.lines);
    }
}
