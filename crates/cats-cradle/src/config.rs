//! Generation constants and pool configuration.
//!
//! Defaults reproduce the standard stimulus battery. Every field can be
//! overridden from a YAML file, and omitted fields fall back to the
//! defaults, so a config file only needs to name what it changes.

use serde::{Deserialize, Serialize};

/// Geometric constants and attempt budgets for a single pattern.
///
/// All lengths are in stimulus units. The field rectangle is centered on
/// the origin, spanning [-field_width/2, field_width/2] horizontally and
/// [-field_height/2, field_height/2] vertically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Width of the stimulus field.
    pub field_width: f64,
    /// Height of the stimulus field.
    pub field_height: f64,

    /// Dot diameter when rendered. Display only, never a placement constraint.
    pub dot_diameter: f64,
    /// Stroke width when rendered. Display only.
    pub line_width: f64,

    /// Minimum distance between any two dot centers.
    pub min_dot_distance: f64,
    /// Minimum distance from a dot center to every field edge.
    pub min_dot_boundary_distance: f64,
    /// Shortest allowed segment.
    pub min_line_length: f64,
    /// Longest allowed segment.
    pub max_line_length: f64,
    /// Minimum clearance between a segment and any dot that is not one of
    /// its own endpoints.
    pub min_line_dot_distance: f64,

    /// Total segments per pattern, free plus connecting.
    pub lines_per_pattern: usize,

    /// Attempt budget shared across all dots of one pattern.
    pub max_dot_attempts: u32,
    /// Attempt budget per free segment.
    pub max_line_attempts: u32,
    /// Attempt budget per connection during direct synthesis.
    pub max_connection_attempts: u32,
    /// Outer attempt budget for the free-to-connecting replacement planner.
    pub max_replacement_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            field_width: 160.0,
            field_height: 240.0,
            dot_diameter: 12.0,
            line_width: 2.0,
            min_dot_distance: 42.0,
            min_dot_boundary_distance: 10.0,
            min_line_length: 30.0,
            max_line_length: 60.0,
            min_line_dot_distance: 12.0,
            lines_per_pattern: 4,
            max_dot_attempts: 20000,
            max_line_attempts: 2000,
            max_connection_attempts: 2000,
            max_replacement_attempts: 1000,
        }
    }
}

impl GeneratorConfig {
    /// Half the field width, the x extent from the origin.
    #[inline]
    pub fn half_width(&self) -> f64 {
        self.field_width / 2.0
    }

    /// Half the field height, the y extent from the origin.
    #[inline]
    pub fn half_height(&self) -> f64 {
        self.field_height / 2.0
    }
}

/// Condition grid and quotas for a full stimulus pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Per-pattern constants shared by every condition.
    pub pattern: GeneratorConfig,

    /// Dot counts to cover.
    pub dot_counts: Vec<usize>,
    /// Connectedness levels to cover at each dot count.
    pub connectedness_levels: Vec<usize>,
    /// Unique patterns required per (dot count, connectedness) condition.
    pub patterns_per_condition: usize,

    /// Dot count of the reference pool.
    pub reference_dot_count: usize,
    /// Unique patterns required in the reference pool.
    pub reference_quota: usize,

    /// Ceiling multiplier: one condition may consume at most
    /// quota * max_attempts_per_pattern candidates before giving up.
    pub max_attempts_per_pattern: u32,

    /// Seed for the generator. None lets the CLI pick one.
    pub seed: Option<u64>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            pattern: GeneratorConfig::default(),
            dot_counts: vec![9, 10, 11, 12, 13, 14, 15],
            connectedness_levels: vec![0, 1, 2],
            patterns_per_condition: 8,
            reference_dot_count: 12,
            reference_quota: 168,
            max_attempts_per_pattern: 1000,
            seed: None,
        }
    }
}
