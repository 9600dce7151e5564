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

//! In-memory environment provider

use super::Env;
use super::ReadOnly;
use std::collections::HashMap;

/// Environment provider backed by a `HashMap`
///
/// A `MapEnv` does not interact with the environment of the process, so it is
/// suitable for testing and for evaluating files in isolation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MapEnv {
    variables: HashMap<String, String>,
    read_only: bool,
}

impl MapEnv {
    /// Creates an empty writable provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a read-only provider containing the given variables.
    #[must_use]
    pub fn read_only(variables: HashMap<String, String>) -> Self {
        MapEnv {
            variables,
            read_only: true,
        }
    }

    /// Tests whether the provider rejects assignments.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns the variables defined in the provider.
    #[must_use]
    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }

    /// Consumes the provider and returns the variables.
    #[must_use]
    pub fn into_variables(self) -> HashMap<String, String> {
        self.variables
    }
}

/// Creates a writable provider containing the given variables.
impl From<HashMap<String, String>> for MapEnv {
    fn from(variables: HashMap<String, String>) -> Self {
        MapEnv {
            variables,
            read_only: false,
        }
    }
}

/// Creates a writable provider containing the given variables.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let variables = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect::<HashMap<_, _>>();
        MapEnv::from(variables)
    }
}

impl Env for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), ReadOnly> {
        if self.read_only {
            return Err(ReadOnly::new(name));
        }
        self.variables.insert(name.to_string(), value.to_string());
        Ok(())
    }
}
