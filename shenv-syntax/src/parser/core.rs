// This file is part of shenv, a POSIX-shell-compatible dotenv evaluator.
// Copyright (C) 2024 WATANABE Yuki
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Fundamentals for implementing the parser.

use super::error::Error;
use super::error::Result;
use super::error::SyntaxError;
use super::lex::Token;
use super::lex::TokenKind;
use super::lex::Tokenize;
use crate::source::Location;
use std::rc::Rc;

/// Dotenv syntax parser
///
/// A parser manages a set of data used in syntax parsing. It keeps a reference
/// to a tokenizer that provides tokens to parse. It also has a one-token
/// lookahead buffer.
#[derive(Debug)]
#[must_use = "Parser must be used to parse syntax"]
pub struct Parser<'a, T: Tokenize + ?Sized> {
    /// Tokenizer that provides tokens
    tokens: &'a mut T,
    /// Token to be parsed next
    peeked: Option<Token>,
}

impl<'a, T: Tokenize + ?Sized> Parser<'a, T> {
    /// Creates a new parser based on the given tokenizer.
    pub fn new(tokens: &'a mut T) -> Self {
        Parser {
            tokens,
            peeked: None,
        }
    }

    /// Reads the next token if the current token is not yet read.
    fn require_token(&mut self) -> Result<&mut Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.tokens.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    /// Returns a reference to the current token.
    ///
    /// If the current token is not yet read from the underlying tokenizer, it
    /// is read.
    pub fn peek_token(&mut self) -> Result<&Token> {
        self.require_token().map(|token| &*token)
    }

    /// Consumes the current token.
    ///
    /// If the current token is not yet read from the underlying tokenizer, it
    /// is read.
    pub fn take_token(&mut self) -> Result<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.tokens.next_token(),
        }
    }

    /// Returns the location of the given token.
    ///
    /// The location covers the first source character of the token, or is
    /// empty at the end of input.
    #[must_use]
    pub fn location_of(&self, token: &Token) -> Location {
        let code = Rc::clone(self.tokens.code());
        let start = token.offset.min(code.value.len());
        let end = match token.kind {
            TokenKind::Eof => start,
            _ => code.value[start..]
                .chars()
                .next()
                .map_or(start, |c| start + c.len_utf8()),
        };
        Location {
            code,
            range: start..end,
        }
    }

    /// Creates an error located at the given token.
    #[must_use]
    pub fn error_at(&self, cause: SyntaxError, token: &Token) -> Error {
        let location = self.location_of(token);
        Error { cause, location }
    }

    /// Creates an error for a token that is not acceptable.
    ///
    /// `expected` lists the token kinds that would have been accepted.
    #[must_use]
    pub fn unexpected(&self, token: Token, expected: &[TokenKind]) -> Error {
        let location = self.location_of(&token);
        let cause = SyntaxError::UnexpectedToken {
            kind: token.kind,
            value: token.value,
            expected: expected.to_vec(),
        };
        Error { cause, location }
    }
}

/// Test tokenizer that returns prepared tokens
///
/// After the prepared tokens are exhausted, the tokenizer returns
/// end-of-input tokens located at the end of the code.
#[cfg(test)]
#[derive(Debug)]
pub(super) struct TokenList {
    code: Rc<crate::source::Code>,
    tokens: std::collections::VecDeque<Token>,
}

#[cfg(test)]
impl TokenList {
    pub fn new<I: IntoIterator<Item = Token>>(code: &str, tokens: I) -> Self {
        let code = Rc::new(crate::source::Code::new(
            code,
            crate::source::Source::Unknown,
        ));
        let tokens = tokens.into_iter().collect();
        TokenList { code, tokens }
    }
}

#[cfg(test)]
impl Tokenize for TokenList {
    fn next_token(&mut self) -> Result<Token> {
        Ok(self
            .tokens
            .pop_front()
            .unwrap_or_else(|| Token::eof(self.code.value.len())))
    }

    fn code(&self) -> &Rc<crate::source::Code> {
        &self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lex::Tokenizer;
    use crate::source::Source;

    #[test]
    fn parser_peek_and_take() {
        let mut tokenizer = Tokenizer::with_source(Source::Unknown, "A=b");
        let mut parser = Parser::new(&mut tokenizer);
        assert_eq!(parser.peek_token().unwrap().kind, TokenKind::Assign);
        assert_eq!(parser.peek_token().unwrap().kind, TokenKind::Assign);
        assert_eq!(parser.take_token().unwrap().kind, TokenKind::Assign);
        assert_eq!(parser.peek_token().unwrap().kind, TokenKind::Characters);
        assert_eq!(parser.take_token().unwrap().value, "b");
        assert_eq!(parser.take_token().unwrap(), Token::eof(3));
        assert_eq!(parser.take_token().unwrap(), Token::eof(3));
    }

    #[test]
    fn parser_propagates_tokenizer_error() {
        let mut tokenizer = Tokenizer::with_source(Source::Unknown, "1=b");
        let mut parser = Parser::new(&mut tokenizer);
        let e = parser.peek_token().unwrap_err();
        assert_eq!(e.cause, SyntaxError::InvalidName('1'));
    }

    #[test]
    fn location_of_token() {
        let mut tokens = TokenList::new("A=日本", []);
        let parser = Parser::new(&mut tokens);
        let token = Token::new(TokenKind::Characters, "日本", 2);
        assert_eq!(parser.location_of(&token).range, 2..5);
        assert_eq!(parser.location_of(&Token::eof(8)).range, 8..8);
        assert_eq!(parser.location_of(&Token::eof(100)).range, 8..8);
    }
}
