//! SQL scanner used for highlighting
//!
//! Whitespace and `--` line comments are skipped; they end up as unstyled
//! gaps between tokens. Offsets are byte offsets into the scanned text.

use std::iter::Peekable;
use std::str::CharIndices;

use super::token::{ClassificationError, Token, TokenKind, Tokenizer};

/// Stateless SQL tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlLexer;

impl SqlLexer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for SqlLexer {
    fn scan(&self, text: &str) -> Result<Vec<Token>, ClassificationError> {
        Scanner::new(text).scan_tokens()
    }
}

struct Scanner<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn scan_tokens(mut self) -> Result<Vec<Token>, ClassificationError> {
        while let Some((start, ch)) = self.chars.next() {
            self.scan_token(start, ch)?;
        }
        Ok(self.tokens)
    }

    fn scan_token(&mut self, start: usize, ch: char) -> Result<(), ClassificationError> {
        let kind = match ch {
            '\n' => {
                self.line += 1;
                None
            }
            c if c.is_whitespace() => None,
            '(' => Some(TokenKind::LeftParen),
            ')' => Some(TokenKind::RightParen),
            ',' => Some(TokenKind::Comma),
            '.' => Some(TokenKind::Dot),
            '+' => Some(TokenKind::Plus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            ';' => Some(TokenKind::Semicolon),
            '%' => Some(TokenKind::Percent),
            '-' => {
                if self.advance_if('-') {
                    self.skip_line_comment();
                    None
                } else {
                    Some(TokenKind::Minus)
                }
            }
            '!' => Some(self.pick('=', TokenKind::BangEqual, TokenKind::Bang)),
            '=' => Some(self.pick('=', TokenKind::EqualEqual, TokenKind::Equal)),
            '<' => Some(self.pick('=', TokenKind::LessEqual, TokenKind::Less)),
            '>' => Some(self.pick('=', TokenKind::GreaterEqual, TokenKind::Greater)),
            '|' => {
                if self.advance_if('|') {
                    Some(TokenKind::PipePipe)
                } else {
                    return Err(self.unexpected(start, ch));
                }
            }
            '\'' | '"' => {
                self.string(start, ch)?;
                Some(TokenKind::String)
            }
            c if c.is_ascii_digit() => {
                self.number();
                Some(TokenKind::Number)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let end = self.identifier_end();
                let word = &self.source[start..end];
                Some(TokenKind::keyword(word).unwrap_or(TokenKind::Identifier))
            }
            _ => return Err(self.unexpected(start, ch)),
        };

        if let Some(kind) = kind {
            let end = self.position();
            self.tokens.push(Token::new(kind, start, end));
        }
        Ok(())
    }

    /// Byte offset of the next unconsumed character
    fn position(&mut self) -> usize {
        match self.chars.peek() {
            Some(&(offset, _)) => offset,
            None => self.source.len(),
        }
    }

    fn advance_if(&mut self, expected: char) -> bool {
        if self.chars.peek().map(|&(_, c)| c) == Some(expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn pick(&mut self, next: char, two_char: TokenKind, one_char: TokenKind) -> TokenKind {
        if self.advance_if(next) {
            two_char
        } else {
            one_char
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.chars.next();
        }
    }

    /// Consume a quoted string. A doubled quote is an escaped quote.
    fn string(&mut self, start: usize, quote: char) -> Result<(), ClassificationError> {
        let start_line = self.line;
        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => {
                    if !self.advance_if(quote) {
                        return Ok(());
                    }
                }
                Some((_, '\n')) => self.line += 1,
                Some(_) => {}
                None => {
                    return Err(ClassificationError::new(
                        format!("Unterminated string at line {}", start_line),
                        start,
                    ))
                }
            }
        }
    }

    fn number(&mut self) {
        self.consume_digits();

        // A fraction needs at least one digit after the dot
        let mut lookahead = self.chars.clone();
        if let (Some((_, '.')), Some((_, d))) = (lookahead.next(), lookahead.next()) {
            if d.is_ascii_digit() {
                self.chars.next();
                self.consume_digits();
            }
        }
    }

    fn consume_digits(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.chars.next();
        }
    }

    fn identifier_end(&mut self) -> usize {
        while let Some(&(_, c)) = self.chars.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            self.chars.next();
        }
        self.position()
    }

    fn unexpected(&self, offset: usize, ch: char) -> ClassificationError {
        ClassificationError::new(
            format!("Unexpected character '{}' at line {}", ch, self.line),
            offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        SqlLexer
            .scan(text)
            .expect("scan should succeed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    // ========================================================================
    // Keywords and identifiers
    // ========================================================================

    #[test]
    fn test_scan_select_statement() {
        let tokens = SqlLexer.scan("SELECT * FROM t;").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Select, 0, 6),
                Token::new(TokenKind::Star, 7, 8),
                Token::new(TokenKind::From, 9, 13),
                Token::new(TokenKind::Identifier, 14, 15),
                Token::new(TokenKind::Semicolon, 15, 16),
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            kinds("select From wHeRe"),
            vec![TokenKind::Select, TokenKind::From, TokenKind::Where]
        );
    }

    #[test]
    fn test_identifiers_allow_underscores_and_digits() {
        let tokens = SqlLexer.scan("_tmp user_2").unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Identifier, 0, 4));
        assert_eq!(tokens[1], Token::new(TokenKind::Identifier, 5, 11));
    }

    #[test]
    fn test_create_table_with_types() {
        assert_eq!(
            kinds("CREATE TABLE people (id INT, name VARCHAR, born DATE, ok BOOLEAN)"),
            vec![
                TokenKind::Create,
                TokenKind::Table,
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::NumberDataType,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::StringDataType,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::DateDataType,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::BooleanDataType,
                TokenKind::RightParen,
            ]
        );
    }

    // ========================================================================
    // Operators and literals
    // ========================================================================

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("!= ! == = <= < >= > ||"),
            vec![
                TokenKind::BangEqual,
                TokenKind::Bang,
                TokenKind::EqualEqual,
                TokenKind::Equal,
                TokenKind::LessEqual,
                TokenKind::Less,
                TokenKind::GreaterEqual,
                TokenKind::Greater,
                TokenKind::PipePipe,
            ]
        );
    }

    #[test]
    fn test_numbers_with_fraction() {
        let tokens = SqlLexer.scan("42 3.14 7.").unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Number, 0, 2));
        assert_eq!(tokens[1], Token::new(TokenKind::Number, 3, 7));
        assert_eq!(tokens[2], Token::new(TokenKind::Number, 8, 9));
        assert_eq!(tokens[3], Token::new(TokenKind::Dot, 9, 10));
    }

    #[test]
    fn test_strings_both_quotes_and_escapes() {
        let tokens = SqlLexer.scan(r#"'it''s' "x""#).unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::String, 0, 7));
        assert_eq!(tokens[1], Token::new(TokenKind::String, 8, 11));
    }

    #[test]
    fn test_non_ascii_inside_string_uses_byte_offsets() {
        let text = "'héllo' x";
        let tokens = SqlLexer.scan(text).unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::String, 0, 8));
        assert_eq!(tokens[1], Token::new(TokenKind::Identifier, 9, 10));
        assert_eq!(tokens[1].end, text.len());
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = SqlLexer.scan("-- note\nSELECT").unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::Select, 8, 14)]);
    }

    #[test]
    fn test_minus_is_operator() {
        assert_eq!(
            kinds("a - 1"),
            vec![TokenKind::Identifier, TokenKind::Minus, TokenKind::Number]
        );
    }

    // ========================================================================
    // Failures
    // ========================================================================

    #[test]
    fn test_unterminated_string_reports_line() {
        let err = SqlLexer.scan("SELECT\n'abc").unwrap_err();
        assert_eq!(err.message, "Unterminated string at line 2");
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn test_unexpected_character() {
        let err = SqlLexer.scan("SELECT #").unwrap_err();
        assert_eq!(err.message, "Unexpected character '#' at line 1");
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn test_single_pipe_is_rejected() {
        assert!(SqlLexer.scan("a | b").is_err());
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        assert!(SqlLexer.scan("").unwrap().is_empty());
        assert!(SqlLexer.scan("  \n\t ").unwrap().is_empty());
    }
}
