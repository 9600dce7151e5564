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

//! Lexical analyzer.
//!
//! The [`Tokenizer`] converts source code into a sequence of [`Token`]s. It
//! is a character-level state machine that performs quote removal as it goes,
//! so the parser only sees literal character runs, variable names and
//! expansion operators.
//!
//! The tokenizer is lazy: each call to [`Tokenize::next_token`] advances the
//! state machine only until a token is available. It never backtracks.
//!
//! ```
//! # use shenv_syntax::parser::lex::{Tokenize, Tokenizer, TokenKind};
//! # use shenv_syntax::source::Source;
//! let mut tokenizer = Tokenizer::with_source(Source::Unknown, "FOO='a b'");
//! let token = tokenizer.next_token().unwrap();
//! assert_eq!((token.kind, token.value.as_str()), (TokenKind::Assign, "FOO"));
//! let token = tokenizer.next_token().unwrap();
//! assert_eq!((token.kind, token.value.as_str()), (TokenKind::Characters, "a b"));
//! let token = tokenizer.next_token().unwrap();
//! assert_eq!(token.kind, TokenKind::Eof);
//! ```

mod core;
mod dollar;
mod quote;
mod token;
mod value;

pub use self::core::*;
pub use self::token::*;

use super::error::Result;
use crate::source::Code;
use crate::source::Position;
use std::rc::Rc;

/// Source of tokens consumed by the [parser](super::Parser)
///
/// This trait abstracts the tokenizer so that another implementation can be
/// substituted, for example, to feed the parser with a prepared token
/// sequence in tests.
///
/// After returning a token of [`TokenKind::Eof`], an implementor should keep
/// returning end-of-input tokens. After returning an error, it should keep
/// returning the error.
pub trait Tokenize {
    /// Returns the next token.
    fn next_token(&mut self) -> Result<Token>;

    /// Returns the code being tokenized.
    fn code(&self) -> &Rc<Code>;

    /// Computes the line and column of the given byte offset in the code.
    fn position(&self, offset: usize) -> Position {
        self.code().position(offset)
    }
}

impl<T: Tokenize + ?Sized> Tokenize for &mut T {
    fn next_token(&mut self) -> Result<Token> {
        (**self).next_token()
    }
    fn code(&self) -> &Rc<Code> {
        (**self).code()
    }
}

impl<T: Tokenize + ?Sized> Tokenize for Box<T> {
    fn next_token(&mut self) -> Result<Token> {
        (**self).next_token()
    }
    fn code(&self) -> &Rc<Code> {
        (**self).code()
    }
}

/// Tests if a character can start a variable name.
#[must_use]
pub fn is_name_start_char(c: char) -> bool {
    matches!(c, 'A'..='Z' | '_' | 'a'..='z')
}

/// Tests if a character can be part of a variable name.
///
/// Note that a valid name cannot start with a digit.
#[must_use]
pub fn is_name_char(c: char) -> bool {
    matches!(c, '0'..='9' | 'A'..='Z' | '_' | 'a'..='z')
}

/// Tests if a string is a valid variable name.
///
/// ```
/// # use shenv_syntax::parser::lex::is_name;
/// assert!(is_name("_FOO1"));
/// assert!(!is_name("1FOO"));
/// assert!(!is_name(""));
/// ```
#[must_use]
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(is_name_start_char) && chars.all(is_name_char)
}

/// Tests if a character names a special parameter, which is not supported.
///
/// A special parameter is one of: `@*#?-$!`. Digits (positional parameters)
/// are not included.
#[must_use]
pub fn is_special_parameter_char(c: char) -> bool {
    matches!(c, '@' | '*' | '#' | '?' | '-' | '$' | '!')
}

/// Tests if a character must be quoted or escaped in an unquoted value.
#[must_use]
pub fn is_special_char(c: char) -> bool {
    matches!(c, '|' | '&' | ';' | '<' | '>' | '(' | ')')
}

/// Tests if a character separates assignments.
#[must_use]
pub fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}
