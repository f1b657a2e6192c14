//! Lex a gene rule string into a series of tokens for later parsing
use thiserror::Error;

use crate::io::gene_rule_parse::token::Token;

pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    /// Convert the source into tokens, always terminated by [`Token::Eof`]
    pub fn lex(mut self) -> Result<Vec<Token>, LexerError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }
        self.tokens.push(Token::Eof);
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), LexerError> {
        let c = self.advance();
        match c {
            '(' => self.tokens.push(Token::LeftParen),
            ')' => self.tokens.push(Token::RightParen),
            ' ' | '\r' | '\n' | '\t' => {}
            c if Lexer::is_identifier_start(c) => self.read_identifier(),
            c => {
                return Err(LexerError::InvalidCharacter {
                    character: c,
                    position: self.start,
                })
            }
        };
        Ok(())
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn read_identifier(&mut self) {
        while !self.is_at_end() && Lexer::is_identifier_char(self.source[self.current]) {
            self.current += 1;
        }
        let text: String = self.source[self.start..self.current].iter().collect();
        let token = match text.as_str() {
            "and" | "And" | "AND" => Token::And,
            "or" | "Or" | "OR" => Token::Or,
            "not" | "Not" | "NOT" => Token::Not,
            _ => Token::Identifier(text),
        };
        self.tokens.push(token);
    }

    fn is_identifier_start(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    // Gene ids include versions and database prefixes, e.g. `10195.1` or `HGNC:8888`
    fn is_identifier_char(c: char) -> bool {
        Lexer::is_identifier_start(c) || matches!(c, '.' | '-' | ':')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LexerError {
    #[error("Invalid character `{character}` at position {position}")]
    InvalidCharacter { character: char, position: usize },
}
