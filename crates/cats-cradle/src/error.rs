//! Typed failures for pattern and pool generation.

/// Everything that can go wrong while generating patterns.
///
/// ## Rust Lesson #24: Enum Variants with Named Fields
///
/// Enum variants don't have to be bare tags or tuples - they can carry
/// named fields like little structs. `PlacementExhausted { placed: 3, .. }`
/// reads much better at the match site than `PlacementExhausted(3, 12)`,
/// and adding a field later doesn't silently shift positional meaning.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// The boundary margin leaves no area to sample dot positions in.
    InfeasibleBounds { width: f64, height: f64, margin: f64 },
    /// A dot or free segment ran out of placement attempts.
    PlacementExhausted {
        stage: &'static str,
        placed: usize,
        requested: usize,
    },
    /// No valid set of connecting segments was found for a base layout
    /// within the replacement budget.
    ReplacementInfeasible { connections: usize },
    /// A condition pool could not reach its unique-pattern quota.
    QuotaUnreachable {
        dot_count: usize,
        connections: usize,
        produced: usize,
        quota: usize,
    },
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::InfeasibleBounds { width, height, margin } => write!(
                f,
                "boundary margin {} leaves no sampling area in a {}x{} field",
                margin, width, height
            ),
            GenerateError::PlacementExhausted { stage, placed, requested } => write!(
                f,
                "placed {} of {} {} before the attempt budget ran out",
                placed, requested, stage
            ),
            GenerateError::ReplacementInfeasible { connections } => write!(
                f,
                "no valid {}-connection replacement found within the attempt budget",
                connections
            ),
            GenerateError::QuotaUnreachable { dot_count, connections, produced, quota } => write!(
                f,
                "condition {} dots / {} connections: reached {} of {} unique patterns",
                dot_count, connections, produced, quota
            ),
        }
    }
}

// Makes our error type work with the standard error trait
impl std::error::Error for GenerateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_condition() {
        let err = GenerateError::QuotaUnreachable {
            dot_count: 13,
            connections: 2,
            produced: 5,
            quota: 8,
        };
        let msg = err.to_string();
        assert!(msg.contains("13 dots"), "message should name the dot count: {}", msg);
        assert!(msg.contains("5 of 8"), "message should show the shortfall: {}", msg);
    }

    #[test]
    fn display_names_the_stage() {
        let err = GenerateError::PlacementExhausted {
            stage: "dots",
            placed: 7,
            requested: 12,
        };
        assert_eq!(
            err.to_string(),
            "placed 7 of 12 dots before the attempt budget ran out"
        );
    }

    #[test]
    fn works_as_boxed_error() {
        fn fails() -> Result<(), Box<dyn std::error::Error>> {
            Err(Box::new(GenerateError::ReplacementInfeasible { connections: 2 }))
        }
        let err = fails().unwrap_err();
        assert!(err.to_string().contains("2-connection"));
    }
}
