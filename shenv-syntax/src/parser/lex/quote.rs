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

//! Part of the tokenizer that scans single and double quotations

use super::core::State;
use super::core::Step;
use super::core::Tokenizer;
use crate::parser::error::Result;
use crate::parser::error::SyntaxError;

impl Tokenizer {
    pub(super) fn single_quoted(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            None => Err(self.error_at_opening(SyntaxError::UnclosedSingleQuote, 1)),
            Some('\'') => {
                self.leave();
                Ok(Step::Advance)
            }
            Some(c) => {
                self.push_char(c);
                Ok(Step::Advance)
            }
        }
    }

    pub(super) fn double_quoted(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            None => Err(self.error_at_opening(SyntaxError::UnclosedDoubleQuote, 1)),
            Some('"') => {
                self.quoting_level -= 1;
                self.leave();
                Ok(Step::Advance)
            }
            Some('\\') => {
                self.state = State::DoubleQuotedEscape;
                Ok(Step::Advance)
            }
            Some('$') => {
                self.enter(State::Dollar);
                Ok(Step::Advance)
            }
            Some('`') => Err(self.error_here(SyntaxError::UnsupportedCommandSubstitution)),
            Some(c) => {
                self.push_char(c);
                Ok(Step::Advance)
            }
        }
    }

    pub(super) fn double_quoted_escape(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            None => Err(self.error_at_opening(SyntaxError::UnclosedDoubleQuote, 1)),
            Some('\n') => {
                self.state = State::DoubleQuoted;
                Ok(Step::Advance)
            }
            Some(c) => {
                if !matches!(c, '"' | '$' | '`' | '\\') {
                    self.push_char('\\');
                }
                self.push_char(c);
                self.state = State::DoubleQuoted;
                Ok(Step::Advance)
            }
        }
    }
}
