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

//! Source code that is passed to the tokenizer.
//!
//! A [`Code`] holds the whole text of one input together with its
//! [`Source`]. Tokens and errors refer to the code by byte offsets, and a
//! [`Location`] pairs a shared reference to the code with a byte range in it.
//!
//! Line and column numbers are never stored. They are computed on demand by
//! [`Code::position`] when a diagnostic message is produced.

pub mod pretty;

use std::fmt;
use std::ops::Range;
use std::rc::Rc;

/// Origin of source code.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Source {
    /// Source code of unknown origin.
    ///
    /// Normally you should not use this value, but it may be useful for quick
    /// debugging and testing.
    #[default]
    Unknown,

    /// Standard input.
    Stdin,

    /// File read from the file system.
    File { path: String },
}

impl Source {
    /// Returns a label that describes the source.
    ///
    /// ```
    /// # use shenv_syntax::source::Source;
    /// assert_eq!(Source::Unknown.label(), "<?>");
    /// assert_eq!(Source::File { path: ".env".to_string() }.label(), ".env");
    /// ```
    pub fn label(&self) -> &str {
        use Source::*;
        match self {
            Unknown => "<?>",
            Stdin => "<stdin>",
            File { path } => path,
        }
    }
}

/// Line and column of a character in source code
///
/// Both numbers are counted from 1. Columns are counted in characters, not
/// bytes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source code fragment
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Code {
    /// Content of the code
    pub value: String,

    /// Source of this code
    pub source: Source,
}

impl Code {
    /// Creates a new code with the given content and source.
    #[inline]
    #[must_use]
    pub fn new<S: Into<String>>(value: S, source: Source) -> Code {
        Code {
            value: value.into(),
            source,
        }
    }

    /// Computes the line and column of the character at the given byte
    /// offset.
    ///
    /// Offsets beyond the end of the code are clamped to the length of the
    /// code. The offset equal to the length is valid and denotes the position
    /// right after the last character, which is where the end of input is
    /// reported. An offset that is not on a character boundary is moved back
    /// to the start of the character.
    ///
    /// ```
    /// # use shenv_syntax::source::{Code, Position, Source};
    /// let code = Code::new("a\nbc", Source::Unknown);
    /// assert_eq!(code.position(0), Position { line: 1, column: 1 });
    /// assert_eq!(code.position(3), Position { line: 2, column: 2 });
    /// assert_eq!(code.position(4), Position { line: 2, column: 3 });
    /// assert_eq!(code.position(42), Position { line: 2, column: 3 });
    /// ```
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.value.len());
        while !self.value.is_char_boundary(offset) {
            offset -= 1;
        }

        let prefix = &self.value[..offset];
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let column = prefix[line_start..].chars().count() + 1;
        Position { line, column }
    }
}

/// Position of a code fragment
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Location {
    /// Code that contains the fragment
    pub code: Rc<Code>,

    /// Byte range of the fragment in the code
    ///
    /// The range may be empty, which is the case for the end of input.
    pub range: Range<usize>,
}

impl Location {
    /// Creates a dummy location.
    ///
    /// The returned location has [unknown](Source::Unknown) source and the
    /// given source code value. The range covers the first character of the
    /// value, or is empty if the value is empty.
    ///
    /// This function is mainly for use in testing.
    #[must_use]
    pub fn dummy<S: Into<String>>(value: S) -> Location {
        let code = Rc::new(Code::new(value, Source::Unknown));
        let end = code.value.chars().next().map_or(0, char::len_utf8);
        Location { code, range: 0..end }
    }

    /// Returns the position of the start of the fragment.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        self.code.position(self.range.start)
    }
}
