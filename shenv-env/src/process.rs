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

//! Environment provider for the current process

use super::Env;
use super::ReadOnly;

/// Environment provider that accesses the environment variables of the
/// current process
///
/// Variables whose value is not valid UTF-8 are treated as undefined.
#[derive(Debug)]
pub struct ProcessEnv {
    writable: bool,
}

impl ProcessEnv {
    /// Creates a provider that rejects assignments.
    #[must_use]
    pub fn read_only() -> Self {
        ProcessEnv { writable: false }
    }

    /// Creates a provider that modifies the process environment on
    /// assignment.
    ///
    /// # Safety
    ///
    /// Modifying the process environment is not thread-safe on most
    /// platforms. The caller must ensure that no other thread reads or writes
    /// the environment while the returned provider is in use. See
    /// [`std::env::set_var`].
    ///
    /// Assigning a variable whose name is empty or contains `=` or a null
    /// character panics.
    #[must_use]
    pub unsafe fn writable() -> Self {
        ProcessEnv { writable: true }
    }

    /// Tests whether the provider rejects assignments.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        !self.writable
    }
}

impl Env for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var_os(name)?.into_string().ok()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), ReadOnly> {
        if !self.writable {
            return Err(ReadOnly::new(name));
        }
        // SAFETY: the caller of `ProcessEnv::writable` guarantees that the
        // environment is not accessed concurrently.
        unsafe { std::env::set_var(name, value) }
        Ok(())
    }
}
