use crate::frontend::token::{Token, TokenKind};

/// Where in the token stream a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The offending token was end of input.
    AtEnd,
    /// An ordinary token, identified by its lexeme.
    At(String),
    /// A lexical error; the message already describes the problem.
    Lexical,
}

/// A single reported error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[line {line}] Error{location}: {message}")]
pub struct Diagnostic {
    pub line: u32,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic pointing at `token`.
    pub fn at(token: &Token<'_>, message: impl Into<String>) -> Self {
        let location = match token.kind {
            TokenKind::Eof => Location::AtEnd,
            TokenKind::Error => Location::Lexical,
            _ => Location::At(token.lexeme.to_string()),
        };
        Diagnostic {
            line: token.line,
            location,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::AtEnd => write!(f, " at end"),
            Location::At(lexeme) => write!(f, " at '{}'", lexeme),
            Location::Lexical => Ok(()),
        }
    }
}

/// Failed compilation. Carries every diagnostic that was reported, in order.
///
/// The chunk that was being written is left populated but must not be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileError {
    pub fn first(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }

    /// True if any diagnostic message contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.diagnostics.iter().any(|d| d.message.contains(needle))
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, d) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_at_lexeme() {
        let token = Token::new(TokenKind::RightParen, ")", 3);
        let d = Diagnostic::at(&token, "Expect expression.");
        assert_eq!(d.to_string(), "[line 3] Error at ')': Expect expression.");
    }

    #[test]
    fn test_display_at_end() {
        let d = Diagnostic::at(&Token::eof(7), "Expect expression.");
        assert_eq!(d.location, Location::AtEnd);
        assert_eq!(d.to_string(), "[line 7] Error at end: Expect expression.");
    }

    #[test]
    fn test_display_lexical() {
        let token = Token::error("Unexpected character.", 2);
        let d = Diagnostic::at(&token, token.lexeme);
        assert_eq!(d.to_string(), "[line 2] Error: Unexpected character.");
    }

    #[test]
    fn test_compile_error_lists_every_diagnostic() {
        let err = CompileError {
            diagnostics: vec![
                Diagnostic::at(&Token::error("Unexpected character.", 1), "Unexpected character."),
                Diagnostic::at(&Token::eof(1), "Expect expression."),
            ],
        };

        assert_eq!(
            err.to_string(),
            "[line 1] Error: Unexpected character.\n[line 1] Error at end: Expect expression."
        );
        assert!(err.mentions("Expect expression"));
        assert!(!err.mentions("Too many constants"));
        assert_eq!(err.first().map(|d| d.line), Some(1));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = CompileError {
            diagnostics: Vec::new(),
        };
        let _: &dyn std::error::Error = &err;
    }
}
