//! Pattern synthesis and condition-pool assembly.
//!
//! A pool build walks the condition grid (connectedness levels outer, dot
//! counts inner), reusing one cached set of 0-connected base layouts per
//! dot count so every derived pattern shares its dots with a base. All
//! randomness comes from a single seeded generator, which makes a whole
//! pool reproducible from (seed, config) alone.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{GeneratorConfig, PoolConfig};
use crate::error::GenerateError;
use crate::pattern::{Pattern, PatternSignature};
use crate::placement::{
    generate_connecting_lines, generate_dots, generate_free_lines, replace_free_lines,
};
use crate::rng::Rng;

/// One accepted pattern plus its signature key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub pattern: Pattern,
    /// Display form of the canonical signature, stable across runs.
    pub signature: String,
}

/// All accepted patterns for one (dot count, connectedness) condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionPool {
    pub dot_count: usize,
    pub connections: usize,
    pub patterns: Vec<PoolEntry>,
}

/// Output of a full pool build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternPool {
    /// Reference patterns: the standard dot count, 0-connected, drawn
    /// from their own duplicate domain.
    pub reference: Vec<PoolEntry>,
    /// One pool per condition, levels outer, dot counts inner.
    pub conditions: Vec<ConditionPool>,
}

impl PatternPool {
    /// Total accepted patterns across reference and conditions.
    pub fn total_patterns(&self) -> usize {
        self.reference.len() + self.conditions.iter().map(|c| c.patterns.len()).sum::<usize>()
    }
}

/// Generate a 0-connected pattern: dots plus the full complement of free
/// segments.
pub fn generate_base_pattern(
    cfg: &GeneratorConfig,
    dot_count: usize,
    rng: &mut Rng,
) -> Result<Pattern, GenerateError> {
    let dots = generate_dots(cfg, dot_count, rng)?;
    let lines = generate_free_lines(cfg, cfg.lines_per_pattern, &dots, &[], rng)?;
    Ok(Pattern::new(dots, lines, Vec::new()))
}

/// Synthesize one pattern with exactly `connections` connecting segments,
/// placing connectors directly instead of deriving them from a base.
///
/// Retries whole candidates up to `max_attempts` times; a connector
/// shortfall discards the candidate rather than degrading to a lower
/// connectedness than asked for.
pub fn generate_pattern(
    cfg: &GeneratorConfig,
    dot_count: usize,
    connections: usize,
    max_attempts: u32,
    rng: &mut Rng,
) -> Result<Pattern, GenerateError> {
    for _ in 0..max_attempts {
        let dots = match generate_dots(cfg, dot_count, rng) {
            Ok(d) => d,
            Err(e @ GenerateError::InfeasibleBounds { .. }) => return Err(e),
            Err(_) => continue,
        };

        let made = generate_connecting_lines(cfg, &dots, connections, &[], rng);
        if made.len() < connections {
            debug!(
                "direct synthesis placed {} of {} connections, discarding candidate",
                made.len(),
                connections
            );
            continue;
        }
        let Some(free_count) = cfg.lines_per_pattern.checked_sub(made.len()) else {
            continue;
        };

        let free = match generate_free_lines(cfg, free_count, &dots, &made.lines, rng) {
            Ok(f) => f,
            Err(_) => continue,
        };

        let mut lines = free;
        lines.extend(made.lines);
        return Ok(Pattern::new(dots, lines, made.pairs));
    }

    Err(GenerateError::PlacementExhausted {
        stage: "pattern",
        placed: 0,
        requested: 1,
    })
}

/// Build the full stimulus pool for a configuration.
///
/// Fails fast on an infeasible geometry; placement dead ends inside one
/// candidate just roll a fresh candidate, and only an exhausted condition
/// ceiling surfaces as [`GenerateError::QuotaUnreachable`].
pub fn build_pool(cfg: &PoolConfig, seed: u64) -> Result<PatternPool, GenerateError> {
    let mut rng = Rng::new(seed);

    let reference = build_reference_pool(cfg, &mut rng)?;

    // one base pool per dot count, reused by every connectedness level
    let mut bases: Vec<Vec<Pattern>> = Vec::with_capacity(cfg.dot_counts.len());
    for &dot_count in &cfg.dot_counts {
        bases.push(build_base_pool(cfg, dot_count, &mut rng)?);
    }

    // ## Rust Lesson #26: HashSet Membership
    //
    // `HashSet::insert` returns false when the value was already present,
    // so "check and remember" is one call. We only ever ask membership
    // questions - iteration order of a HashSet is unspecified, so nothing
    // here iterates it, or determinism would quietly break.
    let mut seen: HashSet<PatternSignature> = HashSet::new();
    let mut conditions = Vec::with_capacity(cfg.connectedness_levels.len() * cfg.dot_counts.len());

    for &level in &cfg.connectedness_levels {
        for (bi, &dot_count) in cfg.dot_counts.iter().enumerate() {
            let pool = fill_condition(cfg, dot_count, level, &bases[bi], &mut seen, &mut rng)?;
            conditions.push(pool);
        }
    }

    Ok(PatternPool { reference, conditions })
}

/// Attempt ceiling for one condition's fill loop.
fn condition_ceiling(cfg: &PoolConfig, quota: usize) -> u32 {
    (quota as u32).saturating_mul(cfg.max_attempts_per_pattern)
}

/// Admit the pattern if its signature is new to `seen`.
fn push_unique(
    pattern: Pattern,
    seen: &mut HashSet<PatternSignature>,
    entries: &mut Vec<PoolEntry>,
) -> bool {
    let sig = pattern.signature();
    if !seen.insert(sig.clone()) {
        debug!(
            "duplicate signature for {} dots / {} connections",
            pattern.dot_count, pattern.connections
        );
        return false;
    }
    entries.push(PoolEntry { pattern, signature: sig.to_string() });
    true
}

/// Fill the reference pool: 0-connected patterns at the reference dot
/// count, unique among themselves but free to coincide with test
/// patterns.
fn build_reference_pool(cfg: &PoolConfig, rng: &mut Rng) -> Result<Vec<PoolEntry>, GenerateError> {
    let quota = cfg.reference_quota;
    let ceiling = condition_ceiling(cfg, quota);
    let mut seen: HashSet<PatternSignature> = HashSet::new();
    let mut entries: Vec<PoolEntry> = Vec::with_capacity(quota);
    let mut attempts: u32 = 0;

    while entries.len() < quota {
        if attempts >= ceiling {
            return Err(GenerateError::QuotaUnreachable {
                dot_count: cfg.reference_dot_count,
                connections: 0,
                produced: entries.len(),
                quota,
            });
        }
        attempts += 1;

        let pattern = match generate_base_pattern(&cfg.pattern, cfg.reference_dot_count, rng) {
            Ok(p) => p,
            Err(e @ GenerateError::InfeasibleBounds { .. }) => return Err(e),
            Err(_) => continue, // placement ran dry, roll a fresh layout
        };

        push_unique(pattern, &mut seen, &mut entries);
    }

    debug!("reference pool filled: {} patterns in {} attempts", quota, attempts);
    rng.shuffle(&mut entries);
    Ok(entries)
}

/// Generate `patterns_per_condition` unique 0-connected bases for one dot
/// count. Cached and walked round-robin by every connectedness level, so
/// a derived pattern sits on exactly the dot layout of a level-0 one.
fn build_base_pool(
    cfg: &PoolConfig,
    dot_count: usize,
    rng: &mut Rng,
) -> Result<Vec<Pattern>, GenerateError> {
    let quota = cfg.patterns_per_condition;
    let ceiling = condition_ceiling(cfg, quota);
    let mut seen: HashSet<PatternSignature> = HashSet::new();
    let mut bases: Vec<Pattern> = Vec::with_capacity(quota);
    let mut attempts: u32 = 0;

    while bases.len() < quota {
        if attempts >= ceiling {
            return Err(GenerateError::QuotaUnreachable {
                dot_count,
                connections: 0,
                produced: bases.len(),
                quota,
            });
        }
        attempts += 1;

        let pattern = match generate_base_pattern(&cfg.pattern, dot_count, rng) {
            Ok(p) => p,
            Err(e @ GenerateError::InfeasibleBounds { .. }) => return Err(e),
            Err(_) => continue,
        };

        if seen.insert(pattern.signature()) {
            bases.push(pattern);
        }
    }

    debug!("{} base layouts ready for {} dots after {} attempts", quota, dot_count, attempts);
    Ok(bases)
}

/// Fill one condition pool to quota.
///
/// Level 0 admits the cached bases directly; higher levels derive their
/// segments through replacement on a round-robin walk of the bases.
/// Every accepted pattern also offers its mirror image while room
/// remains, and all candidates share one signature domain across
/// conditions, so no two test patterns in the whole pool coincide.
fn fill_condition(
    cfg: &PoolConfig,
    dot_count: usize,
    level: usize,
    bases: &[Pattern],
    seen: &mut HashSet<PatternSignature>,
    rng: &mut Rng,
) -> Result<ConditionPool, GenerateError> {
    let quota = cfg.patterns_per_condition;
    let ceiling = condition_ceiling(cfg, quota);
    let mut patterns: Vec<PoolEntry> = Vec::with_capacity(quota);
    let mut attempts: u32 = 0;
    let mut base_index = 0usize;

    while patterns.len() < quota {
        if attempts >= ceiling {
            return Err(GenerateError::QuotaUnreachable {
                dot_count,
                connections: level,
                produced: patterns.len(),
                quota,
            });
        }
        attempts += 1;

        let base = &bases[base_index % bases.len()];
        base_index += 1;

        let candidate = if level == 0 {
            base.clone()
        } else {
            match replace_free_lines(&cfg.pattern, &base.dots, &base.lines, level, rng) {
                Ok((lines, pairs)) => Pattern::new(base.dots.clone(), lines, pairs),
                Err(_) => {
                    debug!(
                        "replacement dead-ended for {} dots / {} connections, next base",
                        dot_count, level
                    );
                    continue;
                }
            }
        };

        let mirror = candidate.mirrored();
        if push_unique(candidate, seen, &mut patterns) && patterns.len() < quota {
            push_unique(mirror, seen, &mut patterns);
        }
    }

    debug!(
        "condition {} dots / {} connections filled after {} attempts",
        dot_count, level, attempts
    );
    rng.shuffle(&mut patterns);
    Ok(ConditionPool { dot_count, connections: level, patterns })
}

// ============================================================================
// TESTS
// ============================================================================
