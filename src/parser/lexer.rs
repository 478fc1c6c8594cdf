use std::fmt::Display;
use crate::parser::error::*;


/// A digit run that does not fit in a `u64` lexes as `Number(None)`;
/// the parser decides what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Number(Option<u64>),
    Dice,
    Plus,
    Minus,
    Eof,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(Some(n)) => write!(f, "number {n}"),
            Token::Number(None) => write!(f, "oversized number"),
            Token::Dice => write!(f, "'d'"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}


#[derive(Debug)]
pub(crate) struct Lexer {
    input: Vec<char>,
    pub position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        if self.position >= self.input.len() {
            return Ok(Token::Eof);
        }

        let ch = self.input[self.position];

        match ch {
            '+' => {
                self.position += 1;
                Ok(Token::Plus)
            }
            '-' => {
                self.position += 1;
                Ok(Token::Minus)
            }
            'd' => {
                self.position += 1;
                Ok(Token::Dice)
            }
            '0'..='9' => Ok(self.read_number()),
            // whitespace is not part of the notation
            _ => Err(ParseError::Token(ch).at_pos(self.position))
        }
    }

    fn read_number(&mut self) -> Token {
        let start = self.position;
        while self.position < self.input.len() && self.input[self.position].is_ascii_digit() {
            self.position += 1;
        }

        let number_str: String = self.input[start..self.position].iter().collect();
        Token::Number(number_str.parse().ok())
    }
}
