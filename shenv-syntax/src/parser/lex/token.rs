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

//! Tokens produced by the tokenizer

use std::fmt;

/// Token identifier, or classification of tokens.
///
/// The `Display` implementation prints the variant name, which is used in
/// error messages about unexpected tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display, strum::EnumIter)]
pub enum TokenKind {
    /// End of input
    #[strum(serialize = "EOF")]
    Eof,
    /// Run of literal characters, with quotes and escapes already removed
    Characters,
    /// Start of an assignment, carrying the variable name
    Assign,
    /// `$name` or `${name}`, carrying the variable name
    SimpleExpansion,
    /// Start of `${name<op>word}`, carrying the variable name
    StartExpansion,
    /// Operator of a braced expansion, one of `-`, `:-`, `=`, `:=`, `+`,
    /// `:+`, `?` and `:?`
    ExpansionOperator,
    /// `}` closing a braced expansion
    EndExpansion,
}

/// Result of lexical analysis produced by the tokenizer
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    /// Token identifier
    pub kind: TokenKind,
    /// Literal text of the token
    pub value: String,
    /// Byte offset of the token in the source code
    pub offset: usize,
}

impl Token {
    /// Creates a new token.
    #[inline]
    #[must_use]
    pub fn new<S: Into<String>>(kind: TokenKind, value: S, offset: usize) -> Token {
        Token {
            kind,
            value: value.into(),
            offset,
        }
    }

    /// Creates an end-of-input token at the given offset.
    #[inline]
    #[must_use]
    pub fn eof(offset: usize) -> Token {
        Token::new(TokenKind::Eof, "", offset)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` ({:?})", self.kind, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn token_kind_names() {
        let names: Vec<String> = TokenKind::iter().map(|kind| kind.to_string()).collect();
        assert_eq!(
            names,
            [
                "EOF",
                "Characters",
                "Assign",
                "SimpleExpansion",
                "StartExpansion",
                "ExpansionOperator",
                "EndExpansion",
            ]
        );
    }

    #[test]
    fn token_display() {
        let token = Token::new(TokenKind::Characters, "a\"b", 3);
        assert_eq!(token.to_string(), r#"`Characters` ("a\"b")"#);
        assert_eq!(Token::eof(0).to_string(), r#"`EOF` ("")"#);
    }
}
