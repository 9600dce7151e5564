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

//! Definition of errors that happen in the tokenizer and parser.

use super::lex::TokenKind;
use crate::source::Location;
use crate::source::Position;
use crate::source::pretty::Annotation;
use crate::source::pretty::AnnotationType;
use crate::source::pretty::Footer;
use crate::source::pretty::MessageBase;
use itertools::Itertools as _;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Types of syntax errors.
///
/// For errors about constructs that are not closed, the error
/// [location](Error::location) is that of the opening quote or `$`.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SyntaxError {
    /// A character that cannot start or continue a variable name appears
    /// where an assignment is expected.
    #[error("invalid character {0:?} in variable name")]
    InvalidName(char),
    /// A variable name is not followed by `=`.
    #[error("the assignment is missing `=` after the variable name")]
    MissingAssignmentOperator,
    /// One of `|&;<>()` appears unquoted in an assignment value.
    #[error("unescaped special character {0:?} in the value")]
    UnescapedSpecialChar(char),
    /// A `` ` `` or `$(` appears in a value.
    #[error("command substitution and arithmetic expansion are not supported")]
    UnsupportedCommandSubstitution,
    /// A special or positional parameter is expanded.
    #[error("special parameter `${0}` is not supported")]
    UnsupportedSpecialParam(char),
    /// A braced parameter expansion lacks a name.
    #[error("the parameter name is missing")]
    EmptyParam,
    /// A braced parameter expansion contains an invalid name.
    #[error("invalid character {0:?} in parameter name")]
    InvalidParam(char),
    /// A braced parameter expansion has a malformed modifier.
    #[error("the parameter expansion contains a malformed modifier")]
    InvalidModifier,
    /// A single quotation lacks a closing `'`.
    #[error("the single quote is not closed")]
    UnclosedSingleQuote,
    /// A double quotation lacks a closing `"`.
    #[error("the double quote is not closed")]
    UnclosedDoubleQuote,
    /// A braced parameter expansion lacks a closing `}`.
    #[error("the parameter expansion is not closed")]
    UnclosedParam,
    /// Parameter expansions are nested deeper than
    /// [`MAX_SWITCH_DEPTH`](super::lex::MAX_SWITCH_DEPTH).
    #[error("parameter expansions are nested too deeply")]
    NestingTooDeep,
    /// The input contains a null character.
    #[error("the input contains a null character")]
    NulByte,
    /// A token of an unexpected kind appears.
    #[error("unexpected token `{kind}` ({value:?}), expected {}", Expected(.expected))]
    UnexpectedToken {
        kind: TokenKind,
        value: String,
        expected: Vec<TokenKind>,
    },
}

/// Formatter for the list of acceptable token kinds
struct Expected<'a>(&'a [TokenKind]);

impl fmt::Display for Expected<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => f.write_str("nothing"),
            [kind] => write!(f, "`{kind}`"),
            kinds => write!(
                f,
                "one of {}",
                kinds.iter().format_with(", ", |kind, f| f(&format_args!("`{kind}`")))
            ),
        }
    }
}

impl SyntaxError {
    /// Returns a label for annotating the error location.
    #[must_use]
    pub fn label(&self) -> Cow<'static, str> {
        use SyntaxError::*;
        match self {
            InvalidName(_) => "expected `NAME=value`".into(),
            MissingAssignmentOperator => "expected `=` after this name".into(),
            UnescapedSpecialChar(c) => format!("quote or escape the `{c}`").into(),
            UnsupportedCommandSubstitution => "command substitution starts here".into(),
            UnsupportedSpecialParam(_) => "only named variables can be expanded".into(),
            EmptyParam => "expected a variable name".into(),
            InvalidParam(_) => "not a valid variable name".into(),
            InvalidModifier => "expected one of `-`, `=`, `+`, `?` or `}`".into(),
            UnclosedSingleQuote => "the single quote opened here is never closed".into(),
            UnclosedDoubleQuote => "the double quote opened here is never closed".into(),
            UnclosedParam => "the parameter expansion started here is never closed".into(),
            NestingTooDeep => "this expansion exceeds the nesting limit".into(),
            NulByte => "null character".into(),
            UnexpectedToken { kind, .. } => format!("unexpected `{kind}`").into(),
        }
    }
}

/// Explanation of a failure in tokenizing or parsing
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    pub cause: SyntaxError,
    pub location: Location,
}

impl Error {
    /// Returns the line and column where the error is reported.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        self.location.position()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.location.code.source.label();
        write!(f, "{}:{}: {}", label, self.position(), self.cause)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

impl MessageBase for Error {
    fn message_title(&self) -> Cow<'_, str> {
        self.cause.to_string().into()
    }

    fn main_annotation(&self) -> Annotation<'_> {
        Annotation::new(AnnotationType::Error, self.cause.label(), &self.location)
    }

    fn footers(&self) -> Vec<Footer<'_>> {
        use SyntaxError::*;
        let label = match self.cause {
            UnescapedSpecialChar(_) => "wrap the value in single quotes to use it literally",
            UnsupportedCommandSubstitution => "dotenv files cannot run commands",
            UnclosedSingleQuote | UnclosedDoubleQuote | UnclosedParam => {
                "the end of input was reached inside the construct"
            }
            NestingTooDeep => "split the value into several assignments",
            _ => return Vec::new(),
        };
        vec![Footer {
            r#type: AnnotationType::Help,
            label: label.into(),
        }]
    }
}

/// Result of parsing
pub type Result<T> = std::result::Result<T, Error>;
