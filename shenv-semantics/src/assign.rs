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


//! Assignment

use crate::Result;
use crate::expansion::Context;
use crate::expansion::Evaluate;
use shenv_env::Env;

#[doc(no_inline)]
pub use shenv_syntax::syntax::Assignment;

/// Performs an assignment.
///
/// If the environment defines the variable and `override_env` is false, the
/// environment value is stored in the scope and the assigned word is not
/// evaluated. Otherwise, the word is evaluated and the result is stored.
pub fn perform_assignment<E: Env + ?Sized>(
    context: &mut Context<'_, E>,
    assignment: &Assignment,
) -> Result<()> {
    let value = match context.predefined(&assignment.name) {
        Some(value) => value,
        None => assignment.value.evaluate(context)?,
    };
    context.scope.insert(assignment.name.as_str(), value);
    Ok(())
}

/// Performs assignments.
///
/// This function calls [`perform_assignment`] for each [`Assignment`] in
/// order, stopping at the first error.
pub fn perform_assignments<E: Env + ?Sized>(
    context: &mut Context<'_, E>,
    assignments: &[Assignment],
) -> Result<()> {
    for assignment in assignments {
        perform_assignment(context, assignment)?;
    }
    Ok(())
}
