use crate::frontend::token::{Token, TokenKind};

pub struct TokenDumper {
    pub color: bool,
    pub show_debug_repr: bool, // if false, prints the lexeme only
}

impl Default for TokenDumper {
    fn default() -> Self {
        Self {
            color: true,
            show_debug_repr: true,
        }
    }
}

impl TokenDumper {
    // ANSI colors
    const RESET: &'static str = "\x1b[0m";
    const DIM: &'static str = "\x1b[2m";
    const RED: &'static str = "\x1b[31m";
    const GRN: &'static str = "\x1b[32m";
    const YEL: &'static str = "\x1b[33m";
    const CYN: &'static str = "\x1b[36m";
    const MAG: &'static str = "\x1b[35m";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.show_debug_repr = false;
        self
    }

    pub fn dump<'src>(&self, tokens: impl IntoIterator<Item = Token<'src>>) {
        for t in tokens {
            println!("{}", self.format_one(&t));
        }
    }

    pub fn format_one(&self, t: &Token<'_>) -> String {
        let kind = self.kind(t.kind);
        let colr = if self.color { self.color(t.kind) } else { "" };
        let reset = if self.color { Self::RESET } else { "" };

        if self.show_debug_repr {
            format!(
                "[{:04}] {}{:<8} {:?} {:?}{}",
                t.line, colr, kind, t.kind, t.lexeme, reset
            )
        } else {
            match t.kind {
                TokenKind::Error => format!(
                    "[{:04}] {}{:<8} ERROR: {}{}",
                    t.line, colr, kind, t.lexeme, reset
                ),
                TokenKind::Eof => format!("[{:04}] {}{:<8}{}", t.line, colr, kind, reset),
                _ => format!(
                    "[{:04}] {}{:<8} {}{}",
                    t.line, colr, kind, t.lexeme, reset
                ),
            }
        }
    }

    fn kind(&self, k: TokenKind) -> &'static str {
        use TokenKind::*;
        match k {
            // common specials
            Error => "ERROR",
            Eof => "EOF",

            // literals
            Number => "NUMBER",
            String => "STRING",

            // names
            Identifier => "IDENT",

            // structure
            LeftParen | RightParen | LeftBrace | RightBrace => "DELIM",
            Comma | Dot | Semicolon => "PUNCT",

            // ops / comparisons
            Plus | Minus | Star | Slash | Bang | Equal => "OP",
            EqualEqual | BangEqual | Less | LessEqual | Greater | GreaterEqual => "CMP",

            // everything else = keyword
            _ => "KEYWORD",
        }
    }

    fn color(&self, k: TokenKind) -> &'static str {
        use TokenKind::*;
        match k {
            Eof => Self::DIM,
            Error => Self::RED,
            String => Self::GRN,
            Number => Self::CYN,
            Identifier => Self::YEL,
            Plus | Minus | Star | Slash | Bang | Equal => Self::MAG,
            EqualEqual | BangEqual | Less | LessEqual | Greater | GreaterEqual => Self::MAG,
            _ => Self::RESET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::scanner::Scanner;

    #[test]
    fn test_debug_repr_without_color() {
        let dumper = TokenDumper::new().no_color();
        let t = Token::new(TokenKind::Number, "42", 3);
        assert_eq!(dumper.format_one(&t), "[0003] NUMBER   Number \"42\"");
    }

    #[test]
    fn test_pretty_forms() {
        let dumper = TokenDumper::new().no_color().pretty();
        let lines: Vec<_> = Scanner::new("(1 @")
            .map(|t| dumper.format_one(&t))
            .collect();

        assert_eq!(
            lines,
            vec![
                "[0001] DELIM    (",
                "[0001] NUMBER   1",
                "[0001] ERROR    ERROR: Unexpected character.",
                "[0001] EOF     ",
            ]
        );
    }

    #[test]
    fn test_color_wraps_output() {
        let dumper = TokenDumper::new();
        let out = dumper.format_one(&Token::new(TokenKind::Identifier, "x", 1));
        assert!(out.contains(TokenDumper::YEL));
        assert!(out.ends_with(TokenDumper::RESET));
    }

    #[test]
    fn test_keywords_are_grouped() {
        let dumper = TokenDumper::new();
        assert_eq!(dumper.kind(TokenKind::While), "KEYWORD");
        assert_eq!(dumper.kind(TokenKind::GreaterEqual), "CMP");
        assert_eq!(dumper.kind(TokenKind::Semicolon), "PUNCT");
    }
}
