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


//! Evaluation of abstract syntax trees

use crate::Result;
use crate::Scope;
use crate::assign::perform_assignments;
use crate::expansion::Context;
use shenv_env::Env;
use shenv_syntax::syntax::AssignmentList;

/// Evaluator of assignment lists
///
/// An evaluator holds the environment and the `override_env` flag so that
/// the same configuration can be used for more than one list. Every
/// evaluation starts with an empty scope.
///
/// `E` can be a reference because `&T` implements [`Env`] for any `T: Env`.
#[derive(Clone, Debug)]
pub struct Evaluator<E: Env> {
    env: E,
    override_env: bool,
}

impl<E: Env> Evaluator<E> {
    /// Creates an evaluator.
    #[must_use]
    pub fn new(env: E, override_env: bool) -> Self {
        Evaluator { env, override_env }
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

    /// Evaluates the assignment list.
    ///
    /// Assignments are performed in order. The first error aborts the
    /// evaluation.
    pub fn evaluate(&self, list: &AssignmentList) -> Result<Scope> {
        let mut context = Context::new(&self.env, self.override_env);
        perform_assignments(&mut context, &list.assignments)?;
        Ok(context.into_scope())
    }
}

/// Evaluates the assignment list.
///
/// This is a shorthand for [`Evaluator::new`] followed by
/// [`Evaluator::evaluate`].
pub fn evaluate<E: Env + ?Sized>(
    list: &AssignmentList,
    override_env: bool,
    env: &E,
) -> Result<Scope> {
    let mut context = Context::new(env, override_env);
    perform_assignments(&mut context, &list.assignments)?;
    Ok(context.into_scope())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use assert_matches::assert_matches;
    use shenv_env::MapEnv;

    fn eval(source: &str, env: &MapEnv, override_env: bool) -> Result<Scope> {
        let list: AssignmentList = source.parse().unwrap();
        evaluate(&list, override_env, env)
    }

    fn pairs(scope: &Scope) -> Vec<(&str, &str)> {
        scope.iter().collect()
    }

    #[test]
    fn literal_value() {
        let scope = eval("FOO=bar", &MapEnv::new(), false).unwrap();
        assert_eq!(pairs(&scope), [("FOO", "bar")]);
    }

    #[test]
    fn quote_removal() {
        let scope = eval(r#"A='a$b' B="a$b" C=a\ b"#, &MapEnv::new(), false).unwrap();
        assert_eq!(pairs(&scope), [("A", "a$b"), ("B", "a"), ("C", "a b")]);
    }

    #[test]
    fn environment_precedence() {
        let env: MapEnv = [("FOO", "x")].into_iter().collect();
        let scope = eval("FOO=ignored", &env, false).unwrap();
        assert_eq!(scope.get("FOO"), Some("x"));
        let scope = eval("FOO=ignored", &env, true).unwrap();
        assert_eq!(scope.get("FOO"), Some("ignored"));
    }

    #[test]
    fn expansion_sees_environment_first() {
        let env: MapEnv = [("A", "env")].into_iter().collect();
        let scope = eval("A=file B=$A", &env, false).unwrap();
        assert_eq!(pairs(&scope), [("A", "env"), ("B", "env")]);
        let scope = eval("A=file B=$A", &env, true).unwrap();
        assert_eq!(pairs(&scope), [("A", "file"), ("B", "file")]);
    }

    #[test]
    fn expansion_of_environment_variable_defined_later() {
        let env: MapEnv = [("A", "env")].into_iter().collect();
        let scope = eval("B=${A} A=file", &env, true).unwrap();
        assert_eq!(pairs(&scope), [("B", "env"), ("A", "file")]);
    }

    #[test]
    fn default_with_and_without_colon() {
        let scope = eval("FOO= A=${FOO:-default} B=${FOO-default}", &MapEnv::new(), false);
        let scope = scope.unwrap();
        assert_eq!(scope.get("A"), Some("default"));
        assert_eq!(scope.get("B"), Some(""));
    }

    #[test]
    fn self_referential_assign() {
        let scope = eval("A=${A:=1}\nB=$A", &MapEnv::new(), false).unwrap();
        assert_eq!(pairs(&scope), [("A", "1"), ("B", "1")]);
    }

    #[test]
    fn assign_inside_other_assignment() {
        let scope = eval("B=${A=x}y C=$A", &MapEnv::new(), false).unwrap();
        assert_eq!(pairs(&scope), [("A", "x"), ("B", "xy"), ("C", "x")]);
    }

    #[test]
    fn alter() {
        let scope = eval("E= S=s A=${E+x} B=${E:+x} C=${S:+x} D=${U+x}", &MapEnv::new(), false);
        let scope = scope.unwrap();
        assert_eq!(scope.get("A"), Some("x"));
        assert_eq!(scope.get("B"), Some(""));
        assert_eq!(scope.get("C"), Some("x"));
        assert_eq!(scope.get("D"), Some(""));
    }

    #[test]
    fn required_variable() {
        let e = eval("A=${UNSET?missing}", &MapEnv::new(), false).unwrap_err();
        assert_eq!(
            e,
            Error::UndefinedVariable {
                name: "UNSET".to_string(),
                message: "missing".to_string(),
            }
        );
        let e = eval("A=${UNSET?}", &MapEnv::new(), false).unwrap_err();
        assert_eq!(
            e.to_string(),
            r#"Missing required value for variable "UNSET""#
        );
        let e = eval("E= A=${E:?empty}", &MapEnv::new(), false).unwrap_err();
        assert_matches!(e, Error::UndefinedVariable { name, .. } if name == "E");
        let scope = eval("E= A=${E?empty}", &MapEnv::new(), false).unwrap();
        assert_eq!(scope.get("A"), Some(""));
    }

    #[test]
    fn error_message_is_evaluated() {
        let e = eval("NAME=FOO A=${FOO?\"$NAME is required\"}", &MapEnv::new(), false);
        assert_eq!(e.unwrap_err().to_string(), "FOO is required");
    }

    #[test]
    fn nested_fallbacks() {
        let env: MapEnv = [("C", "c")].into_iter().collect();
        let scope = eval("X=${A:-${B:-${C}}}", &env, false).unwrap();
        assert_eq!(scope.get("X"), Some("c"));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let env: MapEnv = [("E", "env")].into_iter().collect();
        let list: AssignmentList = "A=${A:=1} B=$E$A E=x".parse().unwrap();
        let evaluator = Evaluator::new(&env, false);
        let first = evaluator.evaluate(&list).unwrap();
        let second = evaluator.evaluate(&list).unwrap();
        assert_eq!(first, second);
        assert_eq!(pairs(&first), [("A", "1"), ("B", "env1"), ("E", "env")]);
    }

    #[test]
    fn evaluator_accessors() {
        let env = MapEnv::new();
        let evaluator = Evaluator::new(env.clone(), true);
        assert!(evaluator.override_env());
        assert_eq!(evaluator.env(), &env);
    }

    #[test]
    fn environment_is_not_modified() {
        let env = MapEnv::new();
        eval("A=1 B=${C=2}", &env, false).unwrap();
        assert!(env.variables().is_empty());
    }
}
