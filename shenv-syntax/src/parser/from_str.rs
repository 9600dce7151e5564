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

use super::Error;
use super::Parser;
use super::lex::Tokenizer;
use crate::source::Source;
use crate::syntax::*;
use std::str::FromStr;

/// Parses an assignment list with an unknown source.
impl FromStr for AssignmentList {
    type Err = Error;

    fn from_str(s: &str) -> Result<AssignmentList, Error> {
        let mut tokenizer = Tokenizer::with_source(Source::Unknown, s);
        Parser::new(&mut tokenizer).assignment_list()
    }
}

/// Parses a single assignment with an unknown source.
///
/// Returns `Err(None)` if the input contains no assignment or more than one.
impl FromStr for Assignment {
    type Err = Option<Error>;

    fn from_str(s: &str) -> Result<Assignment, Option<Error>> {
        let mut tokenizer = Tokenizer::with_source(Source::Unknown, s);
        let mut parser = Parser::new(&mut tokenizer);
        let assignment = parser.assignment()?.ok_or(None)?;
        match parser.assignment()? {
            None => Ok(assignment),
            Some(_) => Err(None),
        }
    }
}
