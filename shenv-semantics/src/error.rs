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


//! Evaluation errors

use shenv_syntax::parser;
use thiserror::Error;

/// Error that may occur in evaluation
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// A required variable is undefined (or empty).
    ///
    /// This error is raised by the `?` and `:?` switches. The message is the
    /// result of evaluating the switch word, or a default message if the
    /// word evaluates to an empty string.
    #[error("{message}")]
    UndefinedVariable { name: String, message: String },

    /// The input has a syntax error.
    ///
    /// Only the [`TokenEvaluator`](crate::TokenEvaluator) returns this error
    /// because it parses the input while evaluating it.
    #[error(transparent)]
    Syntax(#[from] parser::Error),
}

impl Error {
    /// Creates an `UndefinedVariable` error.
    ///
    /// If `message` is empty, the default message naming the variable is
    /// used.
    #[must_use]
    pub fn undefined_variable<N, M>(name: N, message: M) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        let name = name.into();
        let mut message = message.into();
        if message.is_empty() {
            message = format!("Missing required value for variable \"{name}\"");
        }
        Error::UndefinedVariable { name, message }
    }
}

/// Result of evaluation
pub type Result<T> = std::result::Result<T, Error>;
