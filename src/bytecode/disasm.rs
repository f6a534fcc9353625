use crate::bytecode::{Chunk, OpCode, value::format_value};
use std::collections::HashMap;

/// Print disassembly of a chunk
pub fn print_chunk(chunk: &Chunk, name: &str) {
    print!("{}", disassemble_chunk(chunk, name));
}

/// Return the full listing of a chunk as a String
pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> String {
    let mut output = format!("== {} ==\n", name);

    let mut offset = 0;
    while offset < chunk.len() {
        let (line, next) = disassemble_instruction(chunk, offset);
        output.push_str(&line);
        output.push('\n');
        offset = next;
    }

    output
}

/// Disassemble the instruction at `offset`.
///
/// Returns the formatted line and the offset of the next instruction.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> (String, usize) {
    let mut output = format!("{:04} ", offset);

    let line = chunk.line_at(offset);
    if offset > 0 && line == chunk.line_at(offset - 1) {
        output.push_str("   | ");
    } else {
        match line {
            Some(line) => output.push_str(&format!("{:4} ", line)),
            None => output.push_str("   ? "),
        }
    }

    let Some(&byte) = chunk.code().get(offset) else {
        output.push_str("<end of chunk>");
        return (output, offset + 1);
    };

    match OpCode::try_from(byte) {
        Ok(OpCode::Constant) => {
            let (text, next) = constant_instruction(chunk, offset);
            output.push_str(&text);
            (output, next)
        }
        Ok(op) => {
            output.push_str(op.name());
            (output, offset + 1)
        }
        Err(byte) => {
            output.push_str(&format!("Unknown opcode {}", byte));
            (output, offset + 1)
        }
    }
}

fn constant_instruction(chunk: &Chunk, offset: usize) -> (String, usize) {
    let name = OpCode::Constant.name();

    let Some(&index) = chunk.code().get(offset + 1) else {
        return (format!("{:<16} <truncated>", name), offset + 1);
    };

    let value = match chunk.constants().get(index as usize) {
        Some(value) => format_value(value),
        None => "<invalid>".to_string(),
    };

    (format!("{:<16} {:4} '{}'", name, index, value), offset + 2)
}

// =============================================================================
// Statistics
// =============================================================================

/// Print chunk statistics
pub fn print_chunk_stats(chunk: &Chunk) {
    print!("{}", chunk_stats(chunk));
}

/// Size summary plus opcode frequency, most frequent first.
pub fn chunk_stats(chunk: &Chunk) -> String {
    let mut output = String::new();

    let counts = count_ops(chunk);
    let total: usize = counts.values().sum();

    output.push_str(&format!("Bytes:        {}\n", chunk.len()));
    output.push_str(&format!("Instructions: {}\n", total));
    output.push_str(&format!("Constants:    {}\n", chunk.constants().len()));

    if total == 0 {
        return output;
    }

    output.push_str("Op frequency:\n");
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    for (op, count) in counts {
        let pct = (count as f64 / total as f64) * 100.0;
        output.push_str(&format!("  {:<14} {:>4} ({:>5.1}%)\n", op, count, pct));
    }

    output
}

fn count_ops(chunk: &Chunk) -> HashMap<&'static str, usize> {
    let mut counts = HashMap::new();
    let code = chunk.code();

    let mut offset = 0;
    while offset < code.len() {
        let (name, width) = match OpCode::try_from(code[offset]) {
            Ok(op) => (op.name(), 1 + op.operand_len()),
            Err(_) => ("<unknown>", 1),
        };
        *counts.entry(name).or_insert(0) += 1;
        offset += width;
    }

    counts
}
