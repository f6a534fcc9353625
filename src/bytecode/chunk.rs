use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bytecode::{OpCode, Value, ValueArray};

/// Errors raised when loading a serialized chunk image.
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("invalid chunk image: {0}")]
    Decode(#[from] postcard::Error),

    #[error("corrupt chunk image: {code} code bytes but {lines} line entries")]
    LineTableMismatch { code: usize, lines: usize },
}

/// A compiled bytecode chunk.
///
/// Holds the instruction stream, a parallel line table with one entry per
/// code byte, and the constant pool referenced by `OP_CONSTANT` operands.
/// Everything is append-only; `reset` is the only way to shrink it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chunk {
    code: Vec<u8>,
    lines: Vec<u32>,
    constants: ValueArray,

    /// Logical capacity shared by `code` and `lines`.
    #[serde(skip)]
    capacity: usize,
}

/// Growth policy: jump to 8, then double.
pub(crate) fn grow_capacity(capacity: usize) -> usize {
    if capacity < 8 { 8 } else { capacity * 2 }
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one byte together with the source line that produced it.
    pub fn write(&mut self, byte: u8, line: u32) {
        if self.capacity < self.code.len() + 1 {
            let old_capacity = self.capacity;
            self.capacity = grow_capacity(old_capacity);
            self.code.reserve_exact(self.capacity - self.code.len());
            self.lines.reserve_exact(self.capacity - self.lines.len());
            trace!(old_capacity, new_capacity = self.capacity, "chunk grown");
        }

        self.code.push(byte);
        self.lines.push(line);
    }

    pub fn write_op(&mut self, op: OpCode, line: u32) {
        self.write(op.into(), line);
    }

    /// Append `value` to the constant pool and return its index.
    ///
    /// The index is not checked against the operand width; callers that
    /// encode it into an instruction must do that themselves.
    pub fn add_constant(&mut self, value: Value) -> usize {
        self.constants.write(value)
    }

    /// Return to the empty, zero-capacity state.
    pub fn reset(&mut self) {
        self.code = Vec::new();
        self.lines = Vec::new();
        self.constants.clear();
        self.capacity = 0;
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    pub fn constants(&self) -> &ValueArray {
        &self.constants
    }

    pub fn line_at(&self, offset: usize) -> Option<u32> {
        self.lines.get(offset).copied()
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Encode the chunk as a compact binary image.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ChunkError> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Decode a chunk image produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChunkError> {
        let mut chunk: Chunk = postcard::from_bytes(bytes)?;
        if chunk.code.len() != chunk.lines.len() {
            return Err(ChunkError::LineTableMismatch {
                code: chunk.code.len(),
                lines: chunk.lines.len(),
            });
        }
        chunk.capacity = chunk.code.len();
        Ok(chunk)
    }
}
