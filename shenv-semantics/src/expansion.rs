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


//! Word evaluation
//!
//! A [`Word`] evaluates to a string by concatenating its literal characters
//! and the results of its parameter expansions. The [`Evaluate`] trait is
//! implemented by the syntax types that can be evaluated, and the
//! [`Context`] provides the variables they refer to.

mod param;
pub mod switch;

use crate::Result;
use crate::Scope;
use shenv_env::Env;
use shenv_syntax::syntax::Word;
use shenv_syntax::syntax::WordUnit;

/// Variables visible to the evaluation
///
/// A context combines the scope being built by the evaluation with the
/// environment that defines variables that existed before the evaluation.
#[derive(Debug)]
pub struct Context<'a, E: Env + ?Sized> {
    /// Environment consulted for existing variables
    pub env: &'a E,

    /// Whether assignments take precedence over the environment
    pub override_env: bool,

    /// Variables defined so far
    pub scope: Scope,
}

impl<'a, E: Env + ?Sized> Context<'a, E> {
    /// Creates a context with an empty scope.
    pub fn new(env: &'a E, override_env: bool) -> Self {
        Context {
            env,
            override_env,
            scope: Scope::new(),
        }
    }

    /// Returns the current value of a variable.
    ///
    /// If `override_env` is true, the scope is searched before the
    /// environment. Otherwise, the environment is searched first.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<String> {
        let local = || self.scope.get(name).map(str::to_owned);
        if self.override_env {
            local().or_else(|| self.env.get(name))
        } else {
            self.env.get(name).or_else(local)
        }
    }

    /// Returns the environment value that supersedes an assignment to the
    /// variable.
    ///
    /// The result is always `None` if `override_env` is true.
    #[must_use]
    pub fn predefined(&self, name: &str) -> Option<String> {
        if self.override_env {
            None
        } else {
            self.env.get(name)
        }
    }

    /// Consumes the context and returns the scope.
    #[must_use]
    pub fn into_scope(self) -> Scope {
        self.scope
    }
}

/// Syntactic construct that can be evaluated to a string
pub trait Evaluate {
    /// Evaluates the construct in the context.
    fn evaluate<E: Env + ?Sized>(&self, context: &mut Context<'_, E>) -> Result<String>;
}

impl Evaluate for WordUnit {
    fn evaluate<E: Env + ?Sized>(&self, context: &mut Context<'_, E>) -> Result<String> {
        match self {
            WordUnit::Characters(chars) => Ok(chars.clone()),
            WordUnit::Expansion(expansion) => expansion.evaluate(context),
        }
    }
}

/// Evaluates the units from left to right and concatenates the results.
///
/// An empty word evaluates to an empty string.
impl Evaluate for Word {
    fn evaluate<E: Env + ?Sized>(&self, context: &mut Context<'_, E>) -> Result<String> {
        let mut result = String::new();
        for unit in &self.units {
            result.push_str(&unit.evaluate(context)?);
        }
        Ok(result)
    }
}
