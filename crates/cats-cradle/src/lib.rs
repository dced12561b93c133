//! # cats-cradle
//!
//! Constrained dot-and-line stimulus generation.
//!
//! A pattern is a handful of dots plus a fixed count of line segments,
//! some floating free and some connecting dot pairs, all placed by
//! seeded rejection sampling under spacing, clearance, length and
//! no-crossing constraints. Pools of mutually distinct patterns are
//! assembled per (dot count, connectedness) condition, each with its
//! horizontal mirror offered alongside, plus a separate reference pool.

pub mod config;
pub mod error;
pub mod geometry;
pub mod pattern;
pub mod placement;
pub mod pool;
pub mod rng;

// Re-export common types at crate root for convenience.
pub use config::{GeneratorConfig, PoolConfig};
pub use error::GenerateError;
pub use geometry::{lines_intersect, point_to_segment_distance, Line, Point};
pub use pattern::{Pattern, PatternSignature};
pub use placement::{
    generate_connecting_lines, generate_dots, generate_free_lines, replace_free_lines, Connections,
};
pub use pool::{
    build_pool, generate_base_pattern, generate_pattern, ConditionPool, PatternPool, PoolEntry,
};
pub use rng::Rng;
