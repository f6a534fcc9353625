//! Compiler configuration options

/// Default limit on expression nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration options for a compilation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Deepest allowed nesting of sub-expressions (groupings, unary
    /// operators and right operands all count one level).
    pub max_depth: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
