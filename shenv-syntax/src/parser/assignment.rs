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

//! Syntax parser for assignments

use super::core::Parser;
use super::error::Result;
use super::lex::TokenKind::{Assign, Eof};
use super::lex::Tokenize;
use super::word::WordContext;
use crate::syntax::Assignment;
use crate::syntax::AssignmentList;

impl<T: Tokenize + ?Sized> Parser<'_, T> {
    /// Parses an assignment.
    ///
    /// Returns `Ok(None)` at the end of input. Any token other than `Assign`
    /// and `EOF` is an error.
    pub fn assignment(&mut self) -> Result<Option<Assignment>> {
        let token = self.take_token()?;
        match token.kind {
            Assign => {
                let value = self.word(WordContext::Assignment)?;
                Ok(Some(Assignment {
                    name: token.value,
                    value,
                }))
            }
            Eof => Ok(None),
            _ => Err(self.unexpected(token, &[Assign, Eof])),
        }
    }

    /// Parses the whole input as an assignment list.
    pub fn assignment_list(&mut self) -> Result<AssignmentList> {
        let mut assignments = Vec::new();
        while let Some(assignment) = self.assignment()? {
            assignments.push(assignment);
        }
        Ok(AssignmentList { assignments })
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::TokenList;
    use super::super::error::SyntaxError;
    use super::super::lex::Token;
    use super::super::lex::TokenKind::*;
    use super::super::lex::Tokenizer;
    use super::*;
    use crate::source::Position;
    use crate::source::Source;
    use crate::syntax::{Expansion, Word};
    use assert_matches::assert_matches;

    fn parse(input: &str) -> Result<AssignmentList> {
        let mut tokenizer = Tokenizer::with_source(Source::Unknown, input);
        Parser::new(&mut tokenizer).assignment_list()
    }

    #[test]
    fn parser_empty_input() {
        assert_eq!(parse("").unwrap(), AssignmentList::default());
        assert_eq!(parse(" # nothing\n").unwrap(), AssignmentList::default());
    }

    #[test]
    fn parser_is_deterministic() {
        let input = "A=\"${B:-'q'}\" C=${D:=$E}x\n# comment\nF='${G}'";
        let first = parse(input).unwrap();
        let second = parse(input).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.assignments.len(), 3);
    }

    #[test]
    fn parser_assignments() {
        let list = parse("A=1 B= C=x$A").unwrap();
        let mut c = Word::from("x");
        c.push_expansion(Expansion::simple("A"));
        assert_eq!(
            list.assignments,
            [
                Assignment {
                    name: "A".to_string(),
                    value: Word::from("1"),
                },
                Assignment {
                    name: "B".to_string(),
                    value: Word::new(),
                },
                Assignment {
                    name: "C".to_string(),
                    value: c,
                },
            ]
        );
    }

    #[test]
    fn parser_one_assignment_at_a_time() {
        let mut tokenizer = Tokenizer::with_source(Source::Unknown, "A=1\nB=2");
        let mut parser = Parser::new(&mut tokenizer);
        let a = parser.assignment().unwrap().unwrap();
        assert_eq!(a.name, "A");
        let b = parser.assignment().unwrap().unwrap();
        assert_eq!(b.name, "B");
        assert_eq!(parser.assignment().unwrap(), None);
        assert_eq!(parser.assignment().unwrap(), None);
    }

    #[test]
    fn parser_tokenizer_error_position() {
        let e = parse("A=\nB=foo'bar").unwrap_err();
        assert_eq!(e.cause, SyntaxError::UnclosedSingleQuote);
        assert_eq!(e.position(), Position { line: 2, column: 6 });
    }

    #[test]
    fn parser_unexpected_token_at_top_level() {
        let mut tokens = TokenList::new(
            "xxxxxx",
            [
                Token::new(Characters, "x", 0),
                Token::new(Assign, "A", 1),
            ],
        );
        let e = Parser::new(&mut tokens).assignment_list().unwrap_err();
        assert_matches!(e.cause, SyntaxError::UnexpectedToken { kind, value, expected } => {
            assert_eq!(kind, Characters);
            assert_eq!(value, "x");
            assert_eq!(expected, [Assign, Eof]);
        });
        assert_eq!(e.location.range, 0..1);
    }

    #[test]
    fn parser_end_expansion_in_assignment_value() {
        let mut tokens = TokenList::new(
            "A=x}",
            [
                Token::new(Assign, "A", 0),
                Token::new(Characters, "x", 2),
                Token::new(EndExpansion, "}", 3),
            ],
        );
        let e = Parser::new(&mut tokens).assignment_list().unwrap_err();
        assert_eq!(e.position(), Position { line: 1, column: 4 });
        assert_matches!(&e.cause, SyntaxError::UnexpectedToken { kind, expected, .. } => {
            assert_eq!(*kind, EndExpansion);
            assert_eq!(
                expected.as_slice(),
                [Assign, Characters, SimpleExpansion, StartExpansion, Eof]
            );
        });
    }

    #[test]
    fn parser_stray_operator_in_assignment_value() {
        let mut tokens = TokenList::new(
            "A=-",
            [
                Token::new(Assign, "A", 0),
                Token::new(ExpansionOperator, "-", 2),
            ],
        );
        let e = Parser::new(&mut tokens).assignment_list().unwrap_err();
        assert_matches!(e.cause, SyntaxError::UnexpectedToken { kind: ExpansionOperator, .. });
    }
}
