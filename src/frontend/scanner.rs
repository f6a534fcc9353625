use crate::frontend::token::{Token, TokenKind};

/// On-demand scanner over a source string.
///
/// Tokens are produced one at a time through `Iterator`; the final item is
/// always a single `TokenKind::Eof`. Lexical problems do not stop the
/// scanner, they surface as `TokenKind::Error` tokens carrying the message.
pub struct Scanner<'src> {
    source: &'src str,
    start: usize,
    pos: usize,
    line: u32,
    finished: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Scanner {
            source,
            start: 0,
            pos: 0,
            line: 1,
            finished: false,
        }
    }

    fn current(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.current();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn matches(&mut self, expected: u8) -> bool {
        if self.current() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn make(&self, kind: TokenKind) -> Token<'src> {
        Token::new(kind, &self.source[self.start..self.pos], self.line)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            match ch {
                b' ' | b'\r' | b'\t' => {
                    self.advance();
                }
                b'\n' => {
                    self.line += 1;
                    self.advance();
                }
                b'/' if self.peek() == Some(b'/') => {
                    while self.current().is_some_and(|c| c != b'\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_string(&mut self) -> Token<'src> {
        loop {
            match self.current() {
                Some(b'"') => {
                    self.advance();
                    return self.make(TokenKind::String);
                }
                Some(b'\n') => {
                    self.line += 1;
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
                None => return Token::error("Unterminated string.", self.line),
            }
        }
    }

    fn read_number(&mut self) -> Token<'src> {
        while self.current().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Only treat '.' as a decimal point if followed by a digit
        if self.current() == Some(b'.') && self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.current().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        self.make(TokenKind::Number)
    }

    fn read_identifier(&mut self) -> Token<'src> {
        while self.current().is_some_and(|c| is_alpha(c) || c.is_ascii_digit()) {
            self.advance();
        }

        let ident = &self.source[self.start..self.pos];
        self.make(TokenKind::keyword(ident).unwrap_or(TokenKind::Identifier))
    }

    /// Consume the remaining bytes of a multi-byte UTF-8 character so the
    /// next token starts on a char boundary.
    fn skip_continuation_bytes(&mut self) {
        while self.current().is_some_and(|c| c & 0xC0 == 0x80) {
            self.advance();
        }
    }

    /// Scan the next token. After end of input this keeps returning `Eof`.
    pub fn scan_token(&mut self) -> Token<'src> {
        self.skip_whitespace();
        self.start = self.pos;

        let Some(ch) = self.advance() else {
            return self.make(TokenKind::Eof);
        };

        if is_alpha(ch) {
            return self.read_identifier();
        }
        if ch.is_ascii_digit() {
            return self.read_number();
        }

        let kind = match ch {
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            b';' => TokenKind::Semicolon,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'-' => TokenKind::Minus,
            b'+' => TokenKind::Plus,
            b'/' => TokenKind::Slash,
            b'*' => TokenKind::Star,
            b'!' if self.matches(b'=') => TokenKind::BangEqual,
            b'!' => TokenKind::Bang,
            b'=' if self.matches(b'=') => TokenKind::EqualEqual,
            b'=' => TokenKind::Equal,
            b'<' if self.matches(b'=') => TokenKind::LessEqual,
            b'<' => TokenKind::Less,
            b'>' if self.matches(b'=') => TokenKind::GreaterEqual,
            b'>' => TokenKind::Greater,
            b'"' => return self.read_string(),
            _ => {
                self.skip_continuation_bytes();
                return Token::error("Unexpected character.", self.line);
            }
        };

        self.make(kind)
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        if self.finished {
            return None;
        }
        let token = self.scan_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source).map(|t| t.kind).collect()
    }

    fn lexemes(source: &str) -> Vec<&str> {
        Scanner::new(source)
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.lexeme)
            .collect()
    }

    #[test]
    fn test_arithmetic_expression() {
        assert_eq!(
            kinds("1 + 2 * (3 - 4) / 5"),
            vec![
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::Star,
                TokenKind::LeftParen,
                TokenKind::Number,
                TokenKind::Minus,
                TokenKind::Number,
                TokenKind::RightParen,
                TokenKind::Slash,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_empty_source_is_single_eof() {
        let tokens: Vec<_> = Scanner::new("").collect();
        assert_eq!(tokens, vec![Token::eof(1)]);
    }

    #[test]
    fn test_scan_token_keeps_returning_eof() {
        let mut scanner = Scanner::new("1");
        assert_eq!(scanner.scan_token().kind, TokenKind::Number);
        assert_eq!(scanner.scan_token().kind, TokenKind::Eof);
        assert_eq!(scanner.scan_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("! != = == < <= > >="),
            vec![
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lexemes("12 3.25 007"), vec!["12", "3.25", "007"]);
        // '.' not followed by a digit is not part of the number
        assert_eq!(
            kinds("1."),
            vec![TokenKind::Number, TokenKind::Dot, TokenKind::Eof]
        );
        assert_eq!(lexemes("1.x"), vec!["1", ".", "x"]);
    }

    #[test]
    fn test_keyword_vs_identifier() {
        assert_eq!(
            kinds("var variable or orchid _x"),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Or,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_keeps_quotes_and_counts_lines() {
        let tokens: Vec<_> = Scanner::new("\"a\nb\" 1").collect();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "\"a\nb\"");
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_unterminated_string_error() {
        let tokens: Vec<_> = Scanner::new("\"abc").collect();
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].lexeme, "Unterminated string.");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_unexpected_character_does_not_stop_scanning() {
        let tokens: Vec<_> = Scanner::new("1 @ # 2").collect();
        let got: Vec<_> = tokens.iter().map(|t| (t.kind, t.lexeme)).collect();
        assert_eq!(
            got,
            vec![
                (TokenKind::Number, "1"),
                (TokenKind::Error, "Unexpected character."),
                (TokenKind::Error, "Unexpected character."),
                (TokenKind::Number, "2"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_multibyte_character_is_one_error() {
        let got = kinds("1 é 2");
        assert_eq!(
            got,
            vec![
                TokenKind::Number,
                TokenKind::Error,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_and_line_numbers() {
        let src = "// header\n1 // trailing\n\n+ 2";
        let tokens: Vec<_> = Scanner::new(src).collect();
        let got: Vec<_> = tokens.iter().map(|t| (t.kind, t.line)).collect();
        assert_eq!(
            got,
            vec![
                (TokenKind::Number, 2),
                (TokenKind::Plus, 4),
                (TokenKind::Number, 4),
                (TokenKind::Eof, 4),
            ]
        );
    }

    #[test]
    fn test_lone_slash_is_an_operator() {
        assert_eq!(
            kinds("4 / 2"),
            vec![
                TokenKind::Number,
                TokenKind::Slash,
                TokenKind::Number,
                TokenKind::Eof
            ]
        );
    }
}
