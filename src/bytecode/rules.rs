use crate::frontend::token::TokenKind;

/// Binding power, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None,
    Assignment, // =
    Or,         // or
    And,        // and
    Equality,   // == !=
    Comparison, // < > <= >=
    Term,       // + -
    Factor,     // * /
    Unary,      // ! -
    Call,       // . ()
    Primary,
}

impl Precedence {
    /// The next tighter level. `Primary` is its own successor.
    pub fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Unary,
            Precedence::Unary => Precedence::Call,
            Precedence::Call => Precedence::Primary,
            Precedence::Primary => Precedence::Primary,
        }
    }
}

/// Handlers for a token that starts an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    Grouping,
    Number,
    Unary,
}

/// Handlers for a token that continues an expression after a left operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infix {
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRule {
    pub prefix: Option<Prefix>,
    pub infix: Option<Infix>,
    pub precedence: Precedence,
}

impl ParseRule {
    const NONE: ParseRule = ParseRule::new(None, None, Precedence::None);

    const fn new(prefix: Option<Prefix>, infix: Option<Infix>, precedence: Precedence) -> Self {
        ParseRule {
            prefix,
            infix,
            precedence,
        }
    }
}

/// Rule table lookup. Every token kind has an entry; kinds that cannot
/// start or continue an expression map to `ParseRule::NONE`.
pub const fn get_rule(kind: TokenKind) -> ParseRule {
    use Precedence as P;
    use TokenKind::*;

    match kind {
        LeftParen => ParseRule::new(Some(Prefix::Grouping), None, P::None),
        Minus => ParseRule::new(Some(Prefix::Unary), Some(Infix::Binary), P::Term),
        Plus => ParseRule::new(None, Some(Infix::Binary), P::Term),
        Slash => ParseRule::new(None, Some(Infix::Binary), P::Factor),
        Star => ParseRule::new(None, Some(Infix::Binary), P::Factor),
        Number => ParseRule::new(Some(Prefix::Number), None, P::None),

        RightParen | LeftBrace | RightBrace | Comma | Dot | Semicolon => ParseRule::NONE,
        Bang | BangEqual | Equal | EqualEqual => ParseRule::NONE,
        Greater | GreaterEqual | Less | LessEqual => ParseRule::NONE,
        Identifier | String => ParseRule::NONE,
        And | Class | Else | False | For | Fun | If | Nil | Or | Print | Return | Super
        | This | True | Var | While => ParseRule::NONE,
        Error | Eof => ParseRule::NONE,
    }
}
