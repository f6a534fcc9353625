use tracing::{debug, trace};

use crate::{
    bytecode::{
        Chunk, OpCode, Value,
        compile_error::{CompileError, Diagnostic},
        rules::{Infix, Precedence, Prefix, get_rule},
    },
    config::CompilerConfig,
    frontend::{
        scanner::Scanner,
        token::{Token, TokenKind},
    },
};

/// Compile `source` into `chunk` with the default configuration.
///
/// On success the chunk ends with `OP_RETURN` and is safe to execute. On
/// failure it is left populated but must not be executed.
pub fn compile(source: &str, chunk: &mut Chunk) -> Result<(), CompileError> {
    compile_with(source, chunk, &CompilerConfig::default())
}

pub fn compile_with(
    source: &str,
    chunk: &mut Chunk,
    config: &CompilerConfig,
) -> Result<(), CompileError> {
    compile_tokens(Scanner::new(source), chunk, config)
}

/// Compile from any token source.
///
/// A source that runs dry without yielding `Eof` is treated as if it ended
/// with one.
pub fn compile_tokens<'src, I>(
    tokens: I,
    chunk: &mut Chunk,
    config: &CompilerConfig,
) -> Result<(), CompileError>
where
    I: IntoIterator<Item = Token<'src>>,
{
    let mut compiler = Compiler::new(tokens.into_iter(), chunk, config);

    compiler.advance();
    compiler.expression();
    compiler.consume(TokenKind::Eof, "Expect end of expression.");

    compiler.finish()
}

/// One-token lookahead plus error state.
struct Parser<'src> {
    current: Token<'src>,
    previous: Token<'src>,
    /// Sticky for the whole compilation.
    had_error: bool,
    /// Suppresses further reports. Never cleared: there is no resynchronization.
    panic_mode: bool,
}

/// Single-pass expression compiler.
///
/// Owns all per-compilation state, so independent compilations can run
/// side by side.
struct Compiler<'src, 'a, I> {
    tokens: I,
    parser: Parser<'src>,
    chunk: &'a mut Chunk,
    config: &'a CompilerConfig,

    /// Current `parse_precedence` recursion depth
    depth: usize,

    /// Reported errors, in order
    diagnostics: Vec<Diagnostic>,
}

impl<'src, 'a, I> Compiler<'src, 'a, I>
where
    I: Iterator<Item = Token<'src>>,
{
    fn new(tokens: I, chunk: &'a mut Chunk, config: &'a CompilerConfig) -> Self {
        Self {
            tokens,
            parser: Parser {
                current: Token::eof(1),
                previous: Token::eof(1),
                had_error: false,
                panic_mode: false,
            },
            chunk,
            config,
            depth: 0,
            diagnostics: Vec::new(),
        }
    }

    // =========================================================================
    // Token stream
    // =========================================================================

    fn next_token(&mut self) -> Token<'src> {
        let line = self.parser.current.line;
        self.tokens.next().unwrap_or_else(|| Token::eof(line))
    }

    /// Shift `current` into `previous` and pull the next non-error token.
    /// Every error token on the way is reported.
    fn advance(&mut self) {
        self.parser.previous = self.parser.current;

        loop {
            self.parser.current = self.next_token();
            if self.parser.current.kind != TokenKind::Error {
                break;
            }

            let message = self.parser.current.lexeme;
            self.error_at_current(message);
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.parser.current.kind == kind {
            self.advance();
            return;
        }

        self.error_at_current(message);
    }

    // =========================================================================
    // Error reporting
    // =========================================================================

    fn error_at(&mut self, token: Token<'src>, message: &str) {
        if self.parser.panic_mode {
            return;
        }
        self.parser.panic_mode = true;
        self.parser.had_error = true;

        let diagnostic = Diagnostic::at(&token, message);
        trace!(%diagnostic, "compile error reported");
        self.diagnostics.push(diagnostic);
    }

    fn error(&mut self, message: &str) {
        self.error_at(self.parser.previous, message);
    }

    fn error_at_current(&mut self, message: &str) {
        self.error_at(self.parser.current, message);
    }

    // =========================================================================
    // Emission
    // =========================================================================

    fn emit_byte(&mut self, byte: u8) {
        self.chunk.write(byte, self.parser.previous.line);
    }

    fn emit_op(&mut self, op: OpCode) {
        self.emit_byte(op.into());
    }

    fn emit_bytes(&mut self, byte1: u8, byte2: u8) {
        self.emit_byte(byte1);
        self.emit_byte(byte2);
    }

    /// Add `value` to the pool and return its operand byte.
    ///
    /// When the pool no longer fits a one-byte operand the error is reported
    /// and index 0 is substituted so compilation can carry on.
    fn make_constant(&mut self, value: Value) -> u8 {
        let index = self.chunk.add_constant(value);
        match u8::try_from(index) {
            Ok(index) => index,
            Err(_) => {
                self.error("Too many constants in one chunk.");
                0
            }
        }
    }

    fn emit_constant(&mut self, value: Value) {
        let index = self.make_constant(value);
        self.emit_bytes(OpCode::Constant.into(), index);
    }

    fn finish(self) -> Result<(), CompileError> {
        let Compiler {
            parser,
            chunk,
            diagnostics,
            ..
        } = self;

        chunk.write_op(OpCode::Return, parser.previous.line);

        debug!(
            bytes = chunk.len(),
            constants = chunk.constants().len(),
            ok = !parser.had_error,
            "compilation finished"
        );

        if parser.had_error {
            Err(CompileError { diagnostics })
        } else {
            Ok(())
        }
    }

    // =========================================================================
    // Precedence climbing
    // =========================================================================

    fn expression(&mut self) {
        self.parse_precedence(Precedence::Assignment);
    }

    fn parse_precedence(&mut self, precedence: Precedence) {
        if self.depth >= self.config.max_depth {
            self.error_at_current("Expression nested too deeply.");
            return;
        }

        self.depth += 1;
        self.climb(precedence);
        self.depth -= 1;
    }

    fn climb(&mut self, precedence: Precedence) {
        self.advance();
        let Some(prefix) = get_rule(self.parser.previous.kind).prefix else {
            self.error("Expect expression.");
            return;
        };

        self.prefix(prefix);

        while precedence <= get_rule(self.parser.current.kind).precedence {
            self.advance();
            if let Some(infix) = get_rule(self.parser.previous.kind).infix {
                self.infix(infix);
            }
        }
    }

    fn prefix(&mut self, rule: Prefix) {
        match rule {
            Prefix::Grouping => self.grouping(),
            Prefix::Number => self.number(),
            Prefix::Unary => self.unary(),
        }
    }

    fn infix(&mut self, rule: Infix) {
        match rule {
            Infix::Binary => self.binary(),
        }
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    fn number(&mut self) {
        match self.parser.previous.lexeme.parse::<Value>() {
            Ok(value) => self.emit_constant(value),
            Err(_) => self.error("Invalid number."),
        }
    }

    fn grouping(&mut self) {
        self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after expression.");
    }

    fn unary(&mut self) {
        let operator = self.parser.previous.kind;

        // Compile the operand.
        self.parse_precedence(Precedence::Unary);

        if operator == TokenKind::Minus {
            self.emit_op(OpCode::Negate);
        }
    }

    fn binary(&mut self) {
        let operator = self.parser.previous.kind;
        let rule = get_rule(operator);

        // Right operand binds one level tighter: left-associative.
        self.parse_precedence(rule.precedence.next());

        match operator {
            TokenKind::Plus => self.emit_op(OpCode::Add),
            TokenKind::Minus => self.emit_op(OpCode::Subtract),
            TokenKind::Star => self.emit_op(OpCode::Multiply),
            TokenKind::Slash => self.emit_op(OpCode::Divide),
            _ => {}
        }
    }
}
