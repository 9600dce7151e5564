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


//! Parameter expansion switch semantics
//!
//! A switch decides the result of a parameter expansion from the current
//! value of the variable. The decision is made in two steps so that callers
//! can avoid evaluating the switch word when it is not used:
//!
//! 1. [`action`] chooses what to do from the switch and the value.
//! 2. [`apply`] performs the action, given the evaluated word if
//!    [`Action::needs_word`] is true.

use super::Context;
use crate::Error;
use crate::Result;
use shenv_env::Env;
use shenv_syntax::syntax::SwitchCondition;
use shenv_syntax::syntax::SwitchType;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum ValueState {
    Set,
    Unset,
}

impl ValueState {
    fn with(condition: SwitchCondition, value: Option<&str>) -> Self {
        match (condition, value) {
            (_, None) => ValueState::Unset,
            (SwitchCondition::UnsetOrEmpty, Some("")) => ValueState::Unset,
            (_, Some(_)) => ValueState::Set,
        }
    }
}

/// Result of a switch decision
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    /// Expand to the current value.
    KeepValue,
    /// Expand to an empty string.
    Discard,
    /// Expand to the word.
    Substitute,
    /// Assign the word to the variable and expand to it.
    Assign,
    /// Fail with the word as the error message.
    Fail,
}

impl Action {
    /// Tests whether the action uses the switch word.
    #[must_use]
    pub fn needs_word(self) -> bool {
        match self {
            Action::KeepValue | Action::Discard => false,
            Action::Substitute | Action::Assign | Action::Fail => true,
        }
    }
}

/// Chooses the action of a switch.
///
/// `value` is the current value of the variable, or `None` if it is
/// undefined.
#[must_use]
pub fn action(r#type: SwitchType, condition: SwitchCondition, value: Option<&str>) -> Action {
    use SwitchType::*;
    use ValueState::*;
    match (r#type, ValueState::with(condition, value)) {
        (Alter, Set) => Action::Substitute,
        (Alter, Unset) => Action::Discard,
        (Default, Set) => Action::KeepValue,
        (Default, Unset) => Action::Substitute,
        (Assign, Set) => Action::KeepValue,
        (Assign, Unset) => Action::Assign,
        (Error, Set) => Action::KeepValue,
        (Error, Unset) => Action::Fail,
    }
}

/// Performs the action of a switch.
///
/// `value` is the current value of the variable named `name`. `word` is the
/// evaluated switch word, which is ignored unless the action
/// [needs it](Action::needs_word).
///
/// The `Assign` action defines the variable in the scope of the context.
/// The `Fail` action returns [`Error::UndefinedVariable`].
pub fn apply<E: Env + ?Sized>(
    context: &mut Context<'_, E>,
    action: Action,
    name: &str,
    value: Option<String>,
    word: String,
) -> Result<String> {
    match action {
        Action::KeepValue => Ok(value.unwrap_or_default()),
        Action::Discard => Ok(String::new()),
        Action::Substitute => Ok(word),
        Action::Assign => {
            context.scope.insert(name, word.as_str());
            Ok(word)
        }
        Action::Fail => Err(Error::undefined_variable(name, word)),
    }
}
