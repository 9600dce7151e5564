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

//! Dotenv file syntax and parser.
//!
//! This crate defines data types for constructing abstract syntax trees (AST)
//! of dotenv files written in a subset of the POSIX shell assignment syntax.
//! See the [`syntax`] module for details.
//!
//! To parse source code into an AST, you can use the `parse` function on a
//! `&str`, which is enabled by the implementation of
//! [`FromStr`](std::str::FromStr) for
//! [`AssignmentList`](syntax::AssignmentList). Errors produced this way refer
//! to an [unknown](source::Source::Unknown) source. To include substantial
//! source information, prepare a [tokenizer](parser::lex::Tokenizer) with
//! source information and pass it to a [parser](parser::Parser).
//!
//! The [`quote`] module quotes literal strings so that the result reads back
//! as the same value.

pub mod parser;
pub mod quote;
pub mod source;
pub mod syntax;
