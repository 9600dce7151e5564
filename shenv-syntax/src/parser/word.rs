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

//! Syntax parser for words and parameter expansions

use super::core::Parser;
use super::error::Result;
use super::error::SyntaxError;
use super::lex::TokenKind::{self, *};
use super::lex::Tokenize;
use crate::syntax::Expansion;
use crate::syntax::Switch;
use crate::syntax::Word;

/// Context in which a word is parsed
///
/// The context determines which tokens end the word.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WordContext {
    /// Value of an assignment, ended by the next `Assign` or `EOF`
    Assignment,
    /// Word of a switch, ended by `EndExpansion`
    Switch,
}

impl WordContext {
    /// Token kinds that end the word without being consumed.
    #[must_use]
    pub fn terminators(self) -> &'static [TokenKind] {
        match self {
            WordContext::Assignment => &[Assign, Eof],
            WordContext::Switch => &[EndExpansion],
        }
    }

    /// Token kinds acceptable in the context, for error messages.
    #[must_use]
    pub fn expected(self) -> &'static [TokenKind] {
        match self {
            WordContext::Assignment => &[Assign, Characters, SimpleExpansion, StartExpansion, Eof],
            WordContext::Switch => &[Characters, SimpleExpansion, StartExpansion, EndExpansion],
        }
    }
}

impl<T: Tokenize + ?Sized> Parser<'_, T> {
    /// Parses a word.
    ///
    /// The token that ends the word is left unconsumed.
    pub(super) fn word(&mut self, context: WordContext) -> Result<Word> {
        let mut word = Word::new();
        loop {
            let kind = self.peek_token()?.kind;
            match kind {
                Characters => {
                    let token = self.take_token()?;
                    word.push_characters(&token.value);
                }
                SimpleExpansion => {
                    let token = self.take_token()?;
                    word.push_expansion(Expansion::simple(token.value));
                }
                StartExpansion => word.push_expansion(self.switch_expansion()?),
                _ if context.terminators().contains(&kind) => return Ok(word),
                _ => {
                    let token = self.take_token()?;
                    return Err(self.unexpected(token, context.expected()));
                }
            }
        }
    }

    /// Parses a parameter expansion with a switch.
    ///
    /// The current token must be `StartExpansion`.
    fn switch_expansion(&mut self) -> Result<Expansion> {
        let start = self.take_token()?;
        debug_assert_eq!(start.kind, StartExpansion, "{start:?}");

        let operator = self.take_token()?;
        if operator.kind != ExpansionOperator {
            return Err(self.unexpected(operator, &[ExpansionOperator]));
        }
        let Some((condition, r#type)) = Switch::parse_operator(&operator.value) else {
            return Err(self.error_at(SyntaxError::InvalidModifier, &operator));
        };

        let word = self.word(WordContext::Switch)?;
        let end = self.take_token()?;
        debug_assert_eq!(end.kind, EndExpansion, "{end:?}");

        let switch = Switch {
            r#type,
            condition,
            word,
        };
        Ok(Expansion::switch(start.value, switch))
    }
}
