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

//! This crate defines environment providers, the sources of variables that
//! are already defined when a dotenv file is evaluated.
//!
//! The [`Env`] trait is the interface to a provider. [`ProcessEnv`] provides
//! an implementation that accesses the environment variables of the current
//! process. [`MapEnv`] is an in-memory provider that does not affect the
//! process. [`ChainEnv`] combines multiple providers.
//!
//! A provider may be read-only, in which case [`Env::set`] fails with
//! [`ReadOnly`].
//!
//! ```
//! # use shenv_env::{Env, MapEnv};
//! let mut env = MapEnv::new();
//! assert_eq!(env.get("HOME"), None);
//! env.set("HOME", "/home/user").unwrap();
//! assert_eq!(env.get("HOME").as_deref(), Some("/home/user"));
//! ```

mod chain;
mod map;
mod process;

pub use self::chain::ChainEnv;
pub use self::map::MapEnv;
pub use self::process::ProcessEnv;

use thiserror::Error;

/// Error that occurs when assigning to a read-only provider
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("cannot assign to `{name}` in a read-only environment")]
pub struct ReadOnly {
    /// Name of the variable that was being assigned
    pub name: String,
}

impl ReadOnly {
    /// Creates an error for the named variable.
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        ReadOnly { name: name.into() }
    }
}

/// Provider of already-defined variables
pub trait Env {
    /// Returns the value of the named variable, if defined.
    ///
    /// A variable defined with an empty value is `Some("")`, which is distinct
    /// from an undefined variable.
    #[must_use]
    fn get(&self, name: &str) -> Option<String>;

    /// Defines a variable.
    ///
    /// Returns [`ReadOnly`] if the provider does not accept assignments.
    fn set(&mut self, name: &str, value: &str) -> Result<(), ReadOnly>;
}

/// Read-only access through a shared reference
///
/// Assignments always fail with [`ReadOnly`].
impl<T: Env + ?Sized> Env for &T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
    fn set(&mut self, name: &str, _value: &str) -> Result<(), ReadOnly> {
        Err(ReadOnly::new(name))
    }
}

impl<T: Env + ?Sized> Env for &mut T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
    fn set(&mut self, name: &str, value: &str) -> Result<(), ReadOnly> {
        (**self).set(name, value)
    }
}

impl<T: Env + ?Sized> Env for Box<T> {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
    fn set(&mut self, name: &str, value: &str) -> Result<(), ReadOnly> {
        (**self).set(name, value)
    }
}
