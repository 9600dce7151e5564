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

//! Part of the tokenizer that scans unquoted values

use super::core::State;
use super::core::Step;
use super::core::Tokenizer;
use super::is_separator;
use super::is_special_char;
use super::token::TokenKind;
use crate::parser::error::Result;
use crate::parser::error::SyntaxError;

impl Tokenizer {
    /// Opens a quotation or expansion that starts a new context.
    fn open(&mut self, state: State) -> Step {
        self.mark();
        if state == State::DoubleQuoted {
            self.quoting_level += 1;
        }
        self.enter(state);
        Step::Advance
    }

    pub(super) fn assignment_value(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            None => {
                self.flush(TokenKind::Characters);
                Ok(self.finish())
            }
            Some(c) if is_separator(c) => {
                self.flush(TokenKind::Characters);
                self.state = State::AssignmentList;
                Ok(Step::Advance)
            }
            Some('\\') => {
                self.mark();
                self.state = State::AssignmentValueEscape;
                Ok(Step::Advance)
            }
            Some('\'') => Ok(self.open(State::SingleQuoted)),
            Some('"') => Ok(self.open(State::DoubleQuoted)),
            Some('$') => Ok(self.open(State::Dollar)),
            Some('`') => Err(self.error_here(SyntaxError::UnsupportedCommandSubstitution)),
            Some(c) if is_special_char(c) => {
                Err(self.error_here(SyntaxError::UnescapedSpecialChar(c)))
            }
            Some(c) => {
                self.push_char(c);
                Ok(Step::Advance)
            }
        }
    }

    pub(super) fn assignment_value_escape(&mut self, c: Option<char>) -> Step {
        self.state = State::AssignmentValue;
        match c {
            // A backslash at the end of input stands for itself.
            None => {
                self.push_char('\\');
                Step::Reconsume
            }
            Some('\n') => Step::Advance,
            Some(c) => {
                self.push_char(c);
                Step::Advance
            }
        }
    }

    pub(super) fn expansion_value(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            None => Err(self.error_at_opening(SyntaxError::UnclosedParam, 2)),
            Some('}') => {
                self.flush(TokenKind::Characters);
                self.emit(TokenKind::EndExpansion, "}".to_string(), self.index());
                self.switch_depth -= 1;
                self.leave();
                Ok(Step::Advance)
            }
            Some('\\') => {
                self.mark();
                self.state = State::ExpansionValueEscape;
                Ok(Step::Advance)
            }
            Some('\'') if self.quoting_level == 0 => Ok(self.open(State::SingleQuoted)),
            Some('"') => Ok(self.open(State::DoubleQuoted)),
            Some('$') => Ok(self.open(State::Dollar)),
            Some('`') => Err(self.error_here(SyntaxError::UnsupportedCommandSubstitution)),
            Some(c) => {
                self.push_char(c);
                Ok(Step::Advance)
            }
        }
    }

    pub(super) fn expansion_value_escape(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            None => Err(self.error_at_opening(SyntaxError::UnclosedParam, 2)),
            Some('\n') => {
                self.state = State::ExpansionValue;
                Ok(Step::Advance)
            }
            Some(c) => {
                // In double quotes, only some characters are escapable.
                if self.quoting_level > 0 && !matches!(c, '"' | '$' | '`' | '\\' | '}') {
                    self.push_char('\\');
                }
                self.push_char(c);
                self.state = State::ExpansionValue;
                Ok(Step::Advance)
            }
        }
    }
}
