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


//! Evaluation semantics for dotenv files
//!
//! This crate evaluates an [`AssignmentList`] into a [`Scope`], a mapping
//! from variable names to their final values. Parameter expansions in
//! assignment values are resolved against the scope being built and an
//! [environment](Env) that defines variables that existed before the
//! evaluation.
//!
//! ```
//! # use shenv_env::MapEnv;
//! # use shenv_syntax::syntax::AssignmentList;
//! let list: AssignmentList = "A=${A:=1} B=$A".parse().unwrap();
//! let scope = shenv_semantics::evaluate(&list, false, &MapEnv::new()).unwrap();
//! assert_eq!(scope.get("A"), Some("1"));
//! assert_eq!(scope.get("B"), Some("1"));
//! ```
//!
//! # Precedence of the environment
//!
//! By default, variables defined in the environment take precedence over
//! assignments in the file: an assignment to a variable the environment
//! already defines stores the environment value without evaluating the
//! assigned word. Setting the `override_env` flag reverses the precedence so
//! that the file overrides the environment.
//!
//! # Streaming evaluation
//!
//! The [`TokenEvaluator`] evaluates a token stream directly without building
//! an abstract syntax tree. It produces the same result as the
//! [`Evaluator`] for any input.

pub mod assign;
pub mod expansion;
pub mod scope;

mod error;
mod eval;
mod stream;

pub use self::error::Error;
pub use self::error::Result;
pub use self::eval::Evaluator;
pub use self::eval::evaluate;
pub use self::scope::Scope;
pub use self::stream::TokenEvaluator;

#[doc(no_inline)]
pub use shenv_env::Env;
#[doc(no_inline)]
pub use shenv_syntax::syntax::AssignmentList;
