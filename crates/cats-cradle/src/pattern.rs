//! Pattern aggregate: dots, segments, and connection bookkeeping.

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::geometry::{lines_intersect, point_to_segment_distance, Line, Point};

/// A complete dot-and-line stimulus.
///
/// `lines` keeps free segments first and connecting segments last, in the
/// same order as `pairs`: `lines[free_line_count() + i]` realizes
/// `pairs[i]`. Constructors uphold `pairs.len() <= lines.len()`; keep that
/// invariant if you build one by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Dot centers in stimulus coordinates.
    pub dots: Vec<Point>,
    /// All segments, free first, connecting last.
    pub lines: Vec<Line>,
    /// Dot index pairs joined by the connecting segments.
    pub pairs: Vec<(usize, usize)>,
    /// Condition identity: number of dots this pattern was generated for.
    pub dot_count: usize,
    /// Condition identity: number of connecting segments.
    pub connections: usize,
}

/// Canonical identity of a pattern's geometry.
///
/// Coordinates round to the nearest integer, then dots and segments sort,
/// so two patterns that differ only in generation order (or by less than
/// half a unit) collapse to the same signature.
///
/// ## Rust Lesson #25: Deriving Eq, Hash and Ord
///
/// Vecs of integer tuples already know how to compare themselves
/// lexicographically, so deriving `PartialOrd`/`Ord` costs nothing and
/// makes signatures sortable. Deriving `Hash` + `Eq` is what lets a
/// `HashSet<PatternSignature>` answer "seen this one before?" with no
/// custom code at all. None of this would derive on the raw f64 pattern -
/// floats aren't `Eq` or `Hash` (NaN ruins everything), which is exactly
/// why the signature switches to i64 first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternSignature {
    dots: Vec<(i64, i64)>,
    lines: Vec<(i64, i64, i64, i64)>,
}

#[inline]
fn round_coord(v: f64) -> i64 {
    v.round() as i64
}

impl Pattern {
    /// Assemble a pattern. Dot and connection counts come from the inputs.
    pub fn new(dots: Vec<Point>, lines: Vec<Line>, pairs: Vec<(usize, usize)>) -> Self {
        let dot_count = dots.len();
        let connections = pairs.len();
        Self { dots, lines, pairs, dot_count, connections }
    }

    /// Number of free (non-connecting) segments.
    #[inline]
    pub fn free_line_count(&self) -> usize {
        self.lines.len() - self.pairs.len()
    }

    /// The free segments.
    #[inline]
    pub fn free_lines(&self) -> &[Line] {
        &self.lines[..self.free_line_count()]
    }

    /// The connecting segments, aligned with `pairs`.
    #[inline]
    pub fn connecting_lines(&self) -> &[Line] {
        &self.lines[self.free_line_count()..]
    }

    /// Compute the canonical signature for duplicate detection.
    pub fn signature(&self) -> PatternSignature {
        let mut dots: Vec<(i64, i64)> = self
            .dots
            .iter()
            .map(|d| (round_coord(d.x), round_coord(d.y)))
            .collect();
        dots.sort_unstable();

        let mut lines: Vec<(i64, i64, i64, i64)> = self
            .lines
            .iter()
            .map(|l| {
                (
                    round_coord(l.x1),
                    round_coord(l.y1),
                    round_coord(l.x2),
                    round_coord(l.y2),
                )
            })
            .collect();
        lines.sort_unstable();

        PatternSignature { dots, lines }
    }

    /// The horizontal mirror image: x negates, y stays.
    ///
    /// Dot indices don't move, so `pairs` carries over unchanged and the
    /// mirror of a valid pattern is valid under the same constraints.
    pub fn mirrored(&self) -> Pattern {
        Pattern {
            dots: self.dots.iter().map(|d| Point::new(-d.x, d.y)).collect(),
            lines: self
                .lines
                .iter()
                .map(|l| Line::new(-l.x1, l.y1, -l.x2, l.y2))
                .collect(),
            pairs: self.pairs.clone(),
            dot_count: self.dot_count,
            connections: self.connections,
        }
    }

    /// Check every placement invariant at once.
    ///
    /// The placers enforce these incrementally while building; this whole-
    /// pattern recheck is the final gate after segment replacement, where
    /// greedy steps can interact. Checks dot spacing and bounds, segment
    /// lengths, pairwise crossings, dot clearance (a connecting segment's
    /// own endpoints exempted), and that no dot joins more than one pair.
    pub fn is_valid(&self, cfg: &GeneratorConfig) -> bool {
        if self.dots.len() != self.dot_count || self.pairs.len() != self.connections {
            return false;
        }
        if self.pairs.len() > self.lines.len() {
            return false;
        }

        let max_x = cfg.half_width() - cfg.min_dot_boundary_distance;
        let max_y = cfg.half_height() - cfg.min_dot_boundary_distance;
        for (i, dot) in self.dots.iter().enumerate() {
            if dot.x.abs() > max_x || dot.y.abs() > max_y {
                return false;
            }
            for other in &self.dots[i + 1..] {
                if dot.distance(*other) < cfg.min_dot_distance {
                    return false;
                }
            }
        }

        // every dot joins at most one pair, endpoints distinct and in range
        let mut used = vec![false; self.dots.len()];
        for &(a, b) in &self.pairs {
            if a == b || a >= self.dots.len() || b >= self.dots.len() {
                return false;
            }
            if used[a] || used[b] {
                return false;
            }
            used[a] = true;
            used[b] = true;
        }

        for (i, line) in self.lines.iter().enumerate() {
            let len = line.length();
            if len < cfg.min_line_length || len > cfg.max_line_length {
                return false;
            }
            for other in &self.lines[i + 1..] {
                if lines_intersect(line, other) {
                    return false;
                }
            }
        }

        let free_count = self.free_line_count();
        for (i, line) in self.lines.iter().enumerate() {
            let exempt = if i >= free_count {
                Some(self.pairs[i - free_count])
            } else {
                None
            };
            for (di, dot) in self.dots.iter().enumerate() {
                if let Some((a, b)) = exempt {
                    if di == a || di == b {
                        continue;
                    }
                }
                if point_to_segment_distance(*dot, line) < cfg.min_line_dot_distance {
                    return false;
                }
            }
        }

        true
    }
}

impl std::fmt::Display for PatternSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d")?;
        for (x, y) in &self.dots {
            write!(f, ":{},{}", x, y)?;
        }
        write!(f, " l")?;
        for (x1, y1, x2, y2) in &self.lines {
            write!(f, ":{},{},{},{}", x1, y1, x2, y2)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
