pub mod chunk;
pub mod compile;
pub mod compile_error;
pub mod disasm;
pub mod op;
pub mod rules;
pub mod value;

pub use chunk::{Chunk, ChunkError};
pub use compile::{compile, compile_tokens, compile_with};
pub use compile_error::{CompileError, Diagnostic, Location};
pub use op::OpCode;
pub use value::{Value, ValueArray};
