// =============================================================================
// OP - Bytecode instructions
// =============================================================================

/// One-byte opcodes. `Constant` is followed by a one-byte constant index;
/// every other opcode stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    // literals
    Constant = 0,

    // arithmetic
    Add = 1,
    Subtract = 2,
    Multiply = 3,
    Divide = 4,
    Negate = 5,

    Return = 6,
}

impl OpCode {
    /// Mnemonic used by the disassembler.
    pub fn name(self) -> &'static str {
        match self {
            OpCode::Constant => "OP_CONSTANT",
            OpCode::Add => "OP_ADD",
            OpCode::Subtract => "OP_SUBTRACT",
            OpCode::Multiply => "OP_MULTIPLY",
            OpCode::Divide => "OP_DIVIDE",
            OpCode::Negate => "OP_NEGATE",
            OpCode::Return => "OP_RETURN",
        }
    }

    /// Number of operand bytes following the opcode.
    pub fn operand_len(self) -> usize {
        match self {
            OpCode::Constant => 1,
            _ => 0,
        }
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> u8 {
        op as u8
    }
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, u8> {
        Ok(match byte {
            0 => OpCode::Constant,
            1 => OpCode::Add,
            2 => OpCode::Subtract,
            3 => OpCode::Multiply,
            4 => OpCode::Divide,
            5 => OpCode::Negate,
            6 => OpCode::Return,
            other => return Err(other),
        })
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OpCode; 7] = [
        OpCode::Constant,
        OpCode::Add,
        OpCode::Subtract,
        OpCode::Multiply,
        OpCode::Divide,
        OpCode::Negate,
        OpCode::Return,
    ];

    #[test]
    fn test_byte_values_are_stable() {
        assert_eq!(u8::from(OpCode::Constant), 0);
        assert_eq!(u8::from(OpCode::Negate), 5);
        assert_eq!(u8::from(OpCode::Return), 6);
    }

    #[test]
    fn test_every_opcode_decodes_to_itself() {
        for op in ALL {
            assert_eq!(OpCode::try_from(u8::from(op)), Ok(op));
        }
    }

    #[test]
    fn test_unknown_byte_is_rejected() {
        assert_eq!(OpCode::try_from(7), Err(7));
        assert_eq!(OpCode::try_from(255), Err(255));
    }

    #[test]
    fn test_only_constant_has_an_operand() {
        for op in ALL {
            let expected = if op == OpCode::Constant { 1 } else { 0 };
            assert_eq!(op.operand_len(), expected, "{}", op);
        }
    }
}
