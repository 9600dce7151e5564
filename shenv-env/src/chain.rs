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

//! Provider combining multiple providers

use super::Env;
use super::ReadOnly;
use std::fmt;

/// Environment provider that consults other providers in order
///
/// [`get`](Env::get) returns the value from the first provider that defines
/// the variable. [`set`](Env::set) assigns to every provider that accepts the
/// assignment, and fails only if none does.
///
/// ```
/// # use shenv_env::{ChainEnv, Env, MapEnv};
/// # use std::collections::HashMap;
/// let defaults = HashMap::from([("A".to_string(), "default".to_string())]);
/// let mut env = ChainEnv::new()
///     .with(MapEnv::new())
///     .with(MapEnv::read_only(defaults));
/// assert_eq!(env.get("A").as_deref(), Some("default"));
/// env.set("A", "custom").unwrap();
/// assert_eq!(env.get("A").as_deref(), Some("custom"));
/// ```
#[derive(Default)]
pub struct ChainEnv<'a> {
    providers: Vec<Box<dyn Env + 'a>>,
}

impl<'a> ChainEnv<'a> {
    /// Creates a chain with no providers.
    ///
    /// An empty chain defines no variables and rejects assignments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider to the chain.
    pub fn push<E: Env + 'a>(&mut self, provider: E) {
        self.providers.push(Box::new(provider));
    }

    /// Appends a provider to the chain and returns the chain.
    #[must_use]
    pub fn with<E: Env + 'a>(mut self, provider: E) -> Self {
        self.push(provider);
        self
    }

    /// Returns the number of providers in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Tests whether the chain has no providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for ChainEnv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainEnv")
            .field("providers", &self.providers.len())
            .finish()
    }
}

impl Env for ChainEnv<'_> {
    fn get(&self, name: &str) -> Option<String> {
        self.providers.iter().find_map(|provider| provider.get(name))
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), ReadOnly> {
        let mut assigned = false;
        for provider in &mut self.providers {
            assigned |= provider.set(name, value).is_ok();
        }
        if assigned {
            Ok(())
        } else {
            Err(ReadOnly::new(name))
        }
    }
}
