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


//! Evaluation of token streams
//!
//! The [`TokenEvaluator`] evaluates tokens as they are read from a
//! [tokenizer](Tokenize), without building an abstract syntax tree. Words
//! whose value is not used are still read through to validate their syntax,
//! but they are not evaluated.

use crate::Result;
use crate::Scope;
use crate::expansion::Context;
use crate::expansion::switch;
use shenv_env::Env;
use shenv_syntax::parser::Parser;
use shenv_syntax::parser::SyntaxError;
use shenv_syntax::parser::WordContext;
use shenv_syntax::parser::lex::TokenKind::*;
use shenv_syntax::parser::lex::Tokenize;
use shenv_syntax::syntax::Switch;

/// Evaluator that reads tokens directly
///
/// A `TokenEvaluator` produces the same scope as the
/// [`Evaluator`](crate::Evaluator) for any syntactically valid input.
/// The two may differ in which error they report for an input that has both
/// a syntax error and an evaluation error: the `Evaluator` never sees the
/// evaluation error because parsing precedes evaluation, whereas the
/// `TokenEvaluator` reports whichever comes first in the input.
///
/// ```
/// # use shenv_env::MapEnv;
/// # use shenv_semantics::TokenEvaluator;
/// # use shenv_syntax::parser::lex::Tokenizer;
/// # use shenv_syntax::source::Source;
/// let mut tokenizer = Tokenizer::with_source(Source::Stdin, "A=1 B=${A:+x}");
/// let evaluator = TokenEvaluator::new(MapEnv::new(), false);
/// let scope = evaluator.evaluate(&mut tokenizer).unwrap();
/// assert_eq!(scope.get("B"), Some("x"));
/// ```
#[derive(Clone, Debug)]
pub struct TokenEvaluator<E: Env> {
    env: E,
    override_env: bool,
}

impl<E: Env> TokenEvaluator<E> {
    /// Creates an evaluator.
    #[must_use]
    pub fn new(env: E, override_env: bool) -> Self {
        TokenEvaluator { env, override_env }
    }

    /// Returns the environment.
    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Returns whether assignments take precedence over the environment.
    #[must_use]
    pub fn override_env(&self) -> bool {
        self.override_env
    }

    /// Reads all tokens and evaluates them.
    ///
    /// The first syntax or evaluation error aborts the evaluation.
    pub fn evaluate<T: Tokenize + ?Sized>(&self, tokens: &mut T) -> Result<Scope> {
        let mut parser = Parser::new(tokens);
        let mut context = Context::new(&self.env, self.override_env);
        loop {
            let token = parser.take_token()?;
            match token.kind {
                Assign => {
                    let predefined = context.predefined(&token.value);
                    let active = predefined.is_none();
                    let value = word(&mut parser, &mut context, WordContext::Assignment, active)?;
                    context.scope.insert(token.value, predefined.unwrap_or(value));
                }
                Eof => return Ok(context.into_scope()),
                _ => return Err(parser.unexpected(token, &[Assign, Eof]).into()),
            }
        }
    }
}

/// Reads a word and evaluates it if `active` is true.
///
/// An inactive word yields an empty string. The token that ends the word is
/// left unconsumed.
fn word<T, E>(
    parser: &mut Parser<'_, T>,
    context: &mut Context<'_, E>,
    word_context: WordContext,
    active: bool,
) -> Result<String>
where
    T: Tokenize + ?Sized,
    E: Env + ?Sized,
{
    let mut result = String::new();
    loop {
        let kind = parser.peek_token()?.kind;
        match kind {
            Characters => {
                let token = parser.take_token()?;
                if active {
                    result.push_str(&token.value);
                }
            }
            SimpleExpansion => {
                let token = parser.take_token()?;
                if active {
                    if let Some(value) = context.resolve(&token.value) {
                        result.push_str(&value);
                    }
                }
            }
            StartExpansion => result.push_str(&switch_expansion(parser, context, active)?),
            _ if word_context.terminators().contains(&kind) => return Ok(result),
            _ => {
                let token = parser.take_token()?;
                return Err(parser.unexpected(token, word_context.expected()).into());
            }
        }
    }
}

/// Reads a parameter expansion with a switch and evaluates it if `active` is
/// true.
///
/// The current token must be `StartExpansion`.
fn switch_expansion<T, E>(
    parser: &mut Parser<'_, T>,
    context: &mut Context<'_, E>,
    active: bool,
) -> Result<String>
where
    T: Tokenize + ?Sized,
    E: Env + ?Sized,
{
    let start = parser.take_token()?;
    debug_assert_eq!(start.kind, StartExpansion, "{start:?}");

    let operator = parser.take_token()?;
    if operator.kind != ExpansionOperator {
        return Err(parser.unexpected(operator, &[ExpansionOperator]).into());
    }
    let Some((condition, r#type)) = Switch::parse_operator(&operator.value) else {
        return Err(parser.error_at(SyntaxError::InvalidModifier, &operator).into());
    };

    let (action, value) = if active {
        let value = context.resolve(&start.value);
        (Some(switch::action(r#type, condition, value.as_deref())), value)
    } else {
        (None, None)
    };
    let needs_word = action.is_some_and(switch::Action::needs_word);
    let word = word(parser, context, WordContext::Switch, needs_word)?;
    let end = parser.take_token()?;
    debug_assert_eq!(end.kind, EndExpansion, "{end:?}");

    match action {
        Some(action) => switch::apply(context, action, &start.value, value, word),
        None => Ok(String::new()),
    }
}
