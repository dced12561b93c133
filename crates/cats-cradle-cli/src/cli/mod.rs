//! CLI command implementations.
//!
//! - `generate` - build the pattern pool and export it as JSON
//! - `preview` - render a single pattern to SVG
//! - `conditions` - print the condition grid for a configuration
//! - `harness` - per-condition feasibility sweep with timings

pub mod common;
pub mod conditions;
pub mod generate;
pub mod harness;
pub mod preview;

pub use conditions::cmd_conditions;
pub use generate::cmd_generate;
pub use harness::cmd_harness;
pub use preview::cmd_preview;
