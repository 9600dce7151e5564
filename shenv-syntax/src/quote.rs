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

//! Quoting literal values so that the tokenizer reads them back intact
//!
//! The quoting mechanism is picked according to the following rules:
//!
//! - If the string is not empty and contains no characters that need quoting,
//!   the string is returned intact.
//! - Otherwise, if the string contains no single quote, the whole string is
//!   single-quoted.
//! - Otherwise, the whole string is double-quoted, and all occurrences of `"`,
//!   `` ` ``, `$`, and `\` are backslash-escaped.
//!
//! The following characters need quoting:
//!
//! - `;`, `&`, `|`, `(`, `)`, `<`, and `>`
//! - A space, tab, newline, or any other whitespace character
//! - `$`, `` ` ``, `\`, `"`, and `'`
//! - `}`, which would close an enclosing parameter expansion
//!
//! The quoted string is valid both as an assignment value and as the word of
//! a braced parameter expansion.
//!
//! ```
//! # use shenv_syntax::quote::{quote, quoted};
//! assert_eq!(format!("A={}", quoted("foo")), "A=foo");
//! assert_eq!(format!("A={}", quoted("")), "A=''");
//! assert_eq!(quote("a b"), "'a b'");
//! assert_eq!(quote("it's $5"), r#""it's \$5""#);
//! ```

use std::borrow::Cow::{self, Borrowed, Owned};
use std::fmt::{self, Write as _};

#[must_use]
fn char_needs_quoting(c: char) -> bool {
    match c {
        ';' | '&' | '|' | '(' | ')' | '<' | '>' | ' ' | '\t' | '\n' => true,
        '$' | '`' | '\\' | '"' | '\'' | '}' => true,
        _ => c.is_whitespace(),
    }
}

/// Tests whether the string must be quoted.
#[must_use]
pub fn needs_quoting(s: &str) -> bool {
    s.is_empty() || s.chars().any(char_needs_quoting)
}

/// Wrapper for quoting a string.
///
/// `Quoted` wraps a `&str` and implements `Display` to produce a quoted version
/// of the string. The implementation prints the same result as [`quote`] but
/// may be more efficient if the result is to be part of a larger string built
/// with a formatter.
#[derive(Clone, Copy, Debug)]
#[must_use = "`Quoted` does nothing unless printed"]
pub struct Quoted<'a> {
    raw: &'a str,
    needs_quoting: bool,
}

impl<'a> Quoted<'a> {
    /// Returns the original string.
    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> &'a str {
        self.raw
    }

    /// Tests whether the contained string requires quoting.
    #[inline]
    #[must_use]
    pub fn needs_quoting(&self) -> bool {
        self.needs_quoting
    }
}

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.needs_quoting {
            f.write_str(self.raw)
        } else if !self.raw.contains('\'') {
            write!(f, "'{}'", self.raw)
        } else {
            f.write_char('"')?;
            for c in self.raw.chars() {
                if matches!(c, '"' | '`' | '$' | '\\') {
                    f.write_char('\\')?;
                }
                f.write_char(c)?;
            }
            f.write_char('"')
        }
    }
}

impl<'a> From<&'a str> for Quoted<'a> {
    #[inline]
    fn from(raw: &'a str) -> Self {
        let needs_quoting = needs_quoting(raw);
        Quoted { raw, needs_quoting }
    }
}

impl<'a> From<Quoted<'a>> for Cow<'a, str> {
    fn from(q: Quoted<'a>) -> Self {
        if q.needs_quoting() {
            Owned(q.to_string())
        } else {
            Borrowed(q.as_raw())
        }
    }
}

/// Wraps a string in [`Quoted`].
#[inline]
pub fn quoted(raw: &str) -> Quoted<'_> {
    Quoted::from(raw)
}

/// Quotes the argument.
///
/// If the argument needs no quoting, the return value is `Borrowed(raw)`.
/// Otherwise, it is `Owned(new_quoted_string)`.
#[inline]
#[must_use]
pub fn quote(raw: &str) -> Cow<'_, str> {
    quoted(raw).into()
}
