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


//! Parameter expansion semantics

use super::Context;
use super::Evaluate;
use super::switch;
use crate::Result;
use shenv_env::Env;
use shenv_syntax::syntax::Expansion;
use shenv_syntax::syntax::Modifier;

/// Expands the parameter.
///
/// An expansion without a modifier yields the value of the variable, or an
/// empty string if the variable is undefined. An expansion with a switch
/// evaluates the switch word only if the switch needs it.
impl Evaluate for Expansion {
    fn evaluate<E: Env + ?Sized>(&self, context: &mut Context<'_, E>) -> Result<String> {
        let value = context.resolve(&self.name);
        match &self.modifier {
            Modifier::None => Ok(value.unwrap_or_default()),
            Modifier::Switch(switch) => {
                let action = switch::action(switch.r#type, switch.condition, value.as_deref());
                let word = if action.needs_word() {
                    switch.word.evaluate(context)?
                } else {
                    String::new()
                };
                switch::apply(context, action, &self.name, value, word)
            }
        }
    }
}
