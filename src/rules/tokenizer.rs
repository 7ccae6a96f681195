//! Rule string tokenizer
//!
//! Produces keywords (`and`, `or`, any case), parentheses, comparator
//! symbols, and words. Quoted literals such as `'Sales Team'` come out as a
//! single word with their quotes still attached.

use super::ast::{Comparator, LogicalOp};
use crate::error::TokenizeError;

/// One lexical unit of a rule string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LParen,
    RParen,
    Keyword(LogicalOp),
    Comparator(Comparator),
    /// Identifier, integer literal, or quoted literal (quotes kept)
    Word(String),
}

impl Token {
    pub fn is_keyword(&self, op: LogicalOp) -> bool {
        matches!(self, Token::Keyword(k) if *k == op)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Keyword(op) => write!(f, "{}", op),
            Token::Comparator(c) => write!(f, "{}", c),
            Token::Word(w) => f.write_str(w),
        }
    }
}

/// Tokenize leniently: unrecognized input is dropped
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input)
        .filter_map(|scanned| match scanned {
            Ok(token) => Some(token),
            Err(e) => {
                log::trace!("tokenizer dropping {}", e);
                None
            }
        })
        .collect()
}

/// Tokenize strictly: the first unrecognized fragment is an error
pub fn tokenize_strict(input: &str) -> Result<Vec<Token>, TokenizeError> {
    Tokenizer::new(input).collect()
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn starts_token(&self, c: char) -> bool {
        c.is_whitespace()
            || matches!(c, '(' | ')' | '\'')
            || is_word_char(c)
            || Comparator::from_symbol(c).is_some()
    }

    fn scan_word(&mut self) -> Token {
        let start = self.pos;
        if self.current_char() == Some('-') {
            self.pos += 1;
        }
        while let Some(c) = self.current_char() {
            if !is_word_char(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        let word = &self.input[start..self.pos];
        match LogicalOp::from_keyword(word) {
            Some(op) => Token::Keyword(op),
            None => Token::Word(word.to_string()),
        }
    }

    fn scan_quoted(&mut self) -> Result<Token, TokenizeError> {
        let start = self.pos;
        match self.input[start + 1..].find('\'') {
            Some(offset) => {
                let end = start + 1 + offset + 1;
                self.pos = end;
                Ok(Token::Word(self.input[start..end].to_string()))
            }
            None => {
                // Unterminated: drop the quote only, the rest still scans
                self.pos += 1;
                Err(TokenizeError {
                    fragment: "'".to_string(),
                    position: start,
                })
            }
        }
    }

    fn starts_negative_number(&self) -> bool {
        self.current_char() == Some('-') && self.peek_second().is_some_and(|n| n.is_ascii_digit())
    }

    fn scan_unrecognized(&mut self) -> TokenizeError {
        let start = self.pos;
        while let Some(c) = self.current_char() {
            if self.pos > start && (self.starts_token(c) || self.starts_negative_number()) {
                break;
            }
            self.pos += c.len_utf8();
        }
        TokenizeError {
            fragment: self.input[start..self.pos].to_string(),
            position: start,
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let c = self.current_char()?;

        let token = match c {
            '(' => {
                self.pos += 1;
                Token::LParen
            }
            ')' => {
                self.pos += 1;
                Token::RParen
            }
            '\'' => return Some(self.scan_quoted()),
            c if is_word_char(c) => self.scan_word(),
            '-' if self.starts_negative_number() => self.scan_word(),
            c => match Comparator::from_symbol(c) {
                Some(cmp) => {
                    self.pos += 1;
                    Token::Comparator(cmp)
                }
                None => return Some(Err(self.scan_unrecognized())),
            },
        };

        Some(Ok(token))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
