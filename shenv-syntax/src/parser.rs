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

//! Syntax parser for dotenv files
//!
//! The [`Parser`] reads tokens from any [`Tokenize`](lex::Tokenize)
//! implementation and builds an [`AssignmentList`](crate::syntax::AssignmentList).
//!
//! ```
//! # use shenv_syntax::parser::Parser;
//! # use shenv_syntax::parser::lex::Tokenizer;
//! # use shenv_syntax::source::Source;
//! let mut tokenizer = Tokenizer::with_source(Source::Stdin, "A=1 B=$A");
//! let mut parser = Parser::new(&mut tokenizer);
//! let list = parser.assignment_list().unwrap();
//! assert_eq!(list.to_string(), "A=1 B=${A}");
//! ```

mod assignment;
mod core;
mod error;
mod from_str;
mod word;

pub mod lex;

pub use self::core::Parser;
pub use self::error::Error;
pub use self::error::Result;
pub use self::error::SyntaxError;
pub use self::word::WordContext;
