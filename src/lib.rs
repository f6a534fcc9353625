//! # Flint
//!
//! A single-pass expression compiler. Source text is scanned into tokens,
//! parsed by precedence climbing and emitted straight into a bytecode
//! [`Chunk`] with no syntax tree in between.
//!
//! ```
//! use flint::{Chunk, OpCode, compile};
//!
//! let mut chunk = Chunk::new();
//! compile("1 + 2", &mut chunk).unwrap();
//! assert_eq!(chunk.code().last(), Some(&u8::from(OpCode::Return)));
//! ```

pub mod bytecode;
pub mod config;
pub mod frontend;

pub use bytecode::{
    Chunk, ChunkError, CompileError, Diagnostic, Location, OpCode, Value, compile,
    compile_tokens, compile_with,
};
pub use config::CompilerConfig;
pub use frontend::scanner::Scanner;
pub use frontend::token::{Token, TokenKind};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub(crate) mod test_utils {
    /// Initialize a tracing subscriber that writes through the test harness.
    /// Safe to call from several tests.
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
            )
            .with_test_writer()
            .try_init();
    }
}
