//! Randomized constraint-respecting placement.
//!
//! Dots, free segments, connecting segments, and the free-to-connecting
//! replacement planner. Every placer draws candidates from a shared
//! seeded generator and rejects until the constraints hold or an attempt
//! budget runs out; nothing is ever repaired in place.

mod connectors;
mod dots;
mod free_lines;
mod replace;

pub use connectors::{generate_connecting_lines, Connections};
pub use dots::generate_dots;
pub use free_lines::generate_free_lines;
pub use replace::replace_free_lines;
