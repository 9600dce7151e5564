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

//! Part of the tokenizer that scans parameter expansions

use super::core::MAX_SWITCH_DEPTH;
use super::core::State;
use super::core::Step;
use super::core::Tokenizer;
use super::is_name_char;
use super::is_name_start_char;
use super::is_special_parameter_char;
use super::token::TokenKind;
use crate::parser::error::Result;
use crate::parser::error::SyntaxError;

fn is_unsupported_parameter_char(c: char) -> bool {
    is_special_parameter_char(c) || c.is_ascii_digit()
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '-' | '=' | '+' | '?')
}

impl Tokenizer {
    /// Creates an error that spans from the `$` to the current character.
    fn error_from_dollar(&self, cause: SyntaxError) -> crate::parser::error::Error {
        let end = self.index() + 1;
        self.error(cause, self.opening()..end)
    }

    /// Counts a switch word being entered.
    ///
    /// Fails at the `${` if the nesting limit would be exceeded.
    fn enter_switch(&mut self) -> Result<()> {
        if self.switch_depth >= MAX_SWITCH_DEPTH {
            return Err(self.error_at_opening(SyntaxError::NestingTooDeep, 2));
        }
        self.switch_depth += 1;
        Ok(())
    }

    pub(super) fn dollar(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            Some('{') => {
                self.state = State::DollarBrace;
                Ok(Step::Advance)
            }
            Some('(') => Err(self.error_from_dollar(SyntaxError::UnsupportedCommandSubstitution)),
            Some(c) if is_unsupported_parameter_char(c) => {
                Err(self.error_from_dollar(SyntaxError::UnsupportedSpecialParam(c)))
            }
            Some(c) if is_name_start_char(c) => {
                self.flush(TokenKind::Characters);
                self.begin_buffer(c, self.opening());
                self.state = State::SimpleExpansion;
                Ok(Step::Advance)
            }
            // Any other `$` is literal.
            _ => {
                let frame = self.leave();
                self.mark_at(frame.opening);
                self.push_char('$');
                Ok(Step::Reconsume)
            }
        }
    }

    pub(super) fn dollar_brace(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            None => Err(self.error_at_opening(SyntaxError::UnclosedParam, 2)),
            Some('}') => Err(self.error_here(SyntaxError::EmptyParam)),
            Some(c) if is_unsupported_parameter_char(c) => {
                Err(self.error_here(SyntaxError::UnsupportedSpecialParam(c)))
            }
            Some(c) if is_name_start_char(c) => {
                self.flush(TokenKind::Characters);
                self.begin_buffer(c, self.opening());
                self.state = State::ComplexExpansion;
                Ok(Step::Advance)
            }
            Some(c) => Err(self.error_here(SyntaxError::InvalidParam(c))),
        }
    }

    pub(super) fn simple_expansion(&mut self, c: Option<char>) -> Step {
        match c {
            Some(c) if is_name_char(c) => {
                self.push_char(c);
                Step::Advance
            }
            _ => {
                self.flush(TokenKind::SimpleExpansion);
                self.leave();
                Step::Reconsume
            }
        }
    }

    pub(super) fn complex_expansion(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            None => Err(self.error_at_opening(SyntaxError::UnclosedParam, 2)),
            Some(c) if is_name_char(c) => {
                self.push_char(c);
                Ok(Step::Advance)
            }
            Some('}') => {
                self.flush(TokenKind::SimpleExpansion);
                self.leave();
                Ok(Step::Advance)
            }
            Some(':') => {
                self.enter_switch()?;
                self.flush(TokenKind::StartExpansion);
                self.begin_buffer(':', self.index());
                self.state = State::ExpansionOperator;
                Ok(Step::Advance)
            }
            Some(c) if is_operator_char(c) => {
                self.enter_switch()?;
                self.flush(TokenKind::StartExpansion);
                self.emit(TokenKind::ExpansionOperator, c.to_string(), self.index());
                self.state = State::ExpansionValue;
                Ok(Step::Advance)
            }
            Some(_) => Err(self.error_here(SyntaxError::InvalidModifier)),
        }
    }

    pub(super) fn expansion_operator(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            None => Err(self.error_at_opening(SyntaxError::UnclosedParam, 2)),
            Some(c) if is_operator_char(c) => {
                self.push_char(c);
                self.flush(TokenKind::ExpansionOperator);
                self.state = State::ExpansionValue;
                Ok(Step::Advance)
            }
            Some(_) => Err(self.error_here(SyntaxError::InvalidModifier)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::tokens;
    use super::super::token::Token;
    use super::*;
    use crate::source::Position;

    fn t(kind: TokenKind, value: &str, offset: usize) -> Token {
        Token::new(kind, value, offset)
    }

    #[test]
    fn simple_expansion() {
        assert_eq!(
            tokens("a=$b_1").unwrap(),
            [
                t(TokenKind::Assign, "a", 0),
                t(TokenKind::SimpleExpansion, "b_1", 2),
                Token::eof(6),
            ]
        );
    }

    #[test]
    fn simple_expansion_between_characters() {
        assert_eq!(
            tokens("a=x$b-y").unwrap(),
            [
                t(TokenKind::Assign, "a", 0),
                t(TokenKind::Characters, "x", 2),
                t(TokenKind::SimpleExpansion, "b", 3),
                t(TokenKind::Characters, "-y", 5),
                Token::eof(7),
            ]
        );
    }

    #[test]
    fn braced_simple_expansion() {
        assert_eq!(
            tokens("a=${b}c").unwrap(),
            [
                t(TokenKind::Assign, "a", 0),
                t(TokenKind::SimpleExpansion, "b", 2),
                t(TokenKind::Characters, "c", 6),
                Token::eof(7),
            ]
        );
    }

    #[test]
    fn consecutive_expansions() {
        assert_eq!(
            tokens("a=$b$c").unwrap(),
            [
                t(TokenKind::Assign, "a", 0),
                t(TokenKind::SimpleExpansion, "b", 2),
                t(TokenKind::SimpleExpansion, "c", 4),
                Token::eof(6),
            ]
        );
    }

    #[test]
    fn literal_dollars() {
        assert_eq!(
            tokens("a=$ b=x$ c=$").unwrap(),
            [
                t(TokenKind::Assign, "a", 0),
                t(TokenKind::Characters, "$", 2),
                t(TokenKind::Assign, "b", 4),
                t(TokenKind::Characters, "x$", 6),
                t(TokenKind::Assign, "c", 9),
                t(TokenKind::Characters, "$", 11),
                Token::eof(12),
            ]
        );
    }

    #[test]
    fn literal_dollar_before_quote() {
        assert_eq!(
            tokens(r#"a="$" b=$'x'"#).unwrap(),
            [
                t(TokenKind::Assign, "a", 0),
                t(TokenKind::Characters, "$", 2),
                t(TokenKind::Assign, "b", 6),
                t(TokenKind::Characters, "$x", 8),
                Token::eof(12),
            ]
        );
    }

    #[test]
    fn all_expansion_operators() {
        for op in ["-", ":-", "=", ":=", "+", ":+", "?", ":?"] {
            let input = format!("a=${{b{op}c}}");
            let len = input.len();
            assert_eq!(
                tokens(&input).unwrap(),
                [
                    t(TokenKind::Assign, "a", 0),
                    t(TokenKind::StartExpansion, "b", 2),
                    t(TokenKind::ExpansionOperator, op, 5),
                    t(TokenKind::Characters, "c", 5 + op.len()),
                    t(TokenKind::EndExpansion, "}", len - 1),
                    Token::eof(len),
                ],
                "{input:?}"
            );
        }
    }

    #[test]
    fn expansion_with_empty_word() {
        assert_eq!(
            tokens("a=${b:-}").unwrap(),
            [
                t(TokenKind::Assign, "a", 0),
                t(TokenKind::StartExpansion, "b", 2),
                t(TokenKind::ExpansionOperator, ":-", 5),
                t(TokenKind::EndExpansion, "}", 7),
                Token::eof(8),
            ]
        );
    }

    #[test]
    fn nested_expansions() {
        assert_eq!(
            tokens("a=${b-${c:+x}}").unwrap(),
            [
                t(TokenKind::Assign, "a", 0),
                t(TokenKind::StartExpansion, "b", 2),
                t(TokenKind::ExpansionOperator, "-", 5),
                t(TokenKind::StartExpansion, "c", 6),
                t(TokenKind::ExpansionOperator, ":+", 9),
                t(TokenKind::Characters, "x", 11),
                t(TokenKind::EndExpansion, "}", 12),
                t(TokenKind::EndExpansion, "}", 13),
                Token::eof(14),
            ]
        );
    }

    fn nested(depth: usize) -> String {
        format!("a={}x{}", "${b-".repeat(depth), "}".repeat(depth))
    }

    #[test]
    fn nesting_up_to_limit() {
        let tokens = tokens(&nested(MAX_SWITCH_DEPTH)).unwrap();
        let starts = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::StartExpansion)
            .count();
        assert_eq!(starts, MAX_SWITCH_DEPTH);
        assert_eq!(tokens.last(), Some(&Token::eof(2 + 5 * MAX_SWITCH_DEPTH + 1)));
    }

    #[test]
    fn nesting_beyond_limit() {
        let e = tokens(&nested(MAX_SWITCH_DEPTH + 1)).unwrap_err();
        assert_eq!(e.cause, SyntaxError::NestingTooDeep);
        let offset = 2 + 4 * MAX_SWITCH_DEPTH;
        assert_eq!(e.location.range, offset..offset + 2);
    }

    #[test]
    fn sibling_expansions_do_not_count_as_nesting() {
        let input = format!("a={}", "${b-x}".repeat(MAX_SWITCH_DEPTH + 1));
        assert!(tokens(&input).is_ok());
    }

    #[test]
    fn command_substitution() {
        let e = tokens("a=$(ls)").unwrap_err();
        assert_eq!(e.cause, SyntaxError::UnsupportedCommandSubstitution);
        assert_eq!(e.location.range, 2..4);
    }

    #[test]
    fn special_parameters() {
        for c in "@*#?-$!0123456789".chars() {
            let input = format!("a=${c}");
            let e = tokens(&input).unwrap_err();
            assert_eq!(e.cause, SyntaxError::UnsupportedSpecialParam(c), "{input:?}");
            assert_eq!(e.location.range, 2..4, "{input:?}");

            let input = format!("a=${{{c}}}");
            let e = tokens(&input).unwrap_err();
            assert_eq!(e.cause, SyntaxError::UnsupportedSpecialParam(c), "{input:?}");
            assert_eq!(e.location.range, 4..5, "{input:?}");
        }
    }

    #[test]
    fn empty_braced_parameter() {
        let e = tokens("a=${}").unwrap_err();
        assert_eq!(e.cause, SyntaxError::EmptyParam);
        assert_eq!(e.location.range, 4..5);
    }

    #[test]
    fn invalid_braced_parameter() {
        let e = tokens("a=${%x}").unwrap_err();
        assert_eq!(e.cause, SyntaxError::InvalidParam('%'));
        assert_eq!(e.location.range, 4..5);
    }

    #[test]
    fn invalid_modifiers() {
        for input in ["a=${b%c}", "a=${b:}", "a=${b:x}", "a=${b#}"] {
            let e = tokens(input).unwrap_err();
            assert_eq!(e.cause, SyntaxError::InvalidModifier, "{input:?}");
        }
    }

    #[test]
    fn unclosed_braced_parameters() {
        for input in ["a=${", "a=${b", "a=${b:", "a=${b:-", "a=${b-${c}"] {
            let e = tokens(input).unwrap_err();
            assert_eq!(e.cause, SyntaxError::UnclosedParam, "{input:?}");
            assert_eq!(e.position(), Position { line: 1, column: 3 }, "{input:?}");
        }
    }
}
