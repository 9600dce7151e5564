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

//! Fundamental building blocks for the lexical analyzer.

use super::Tokenize;
use super::is_name_char;
use super::is_name_start_char;
use super::is_separator;
use super::token::Token;
use super::token::TokenKind;
use crate::parser::error::Error;
use crate::parser::error::Result;
use crate::parser::error::SyntaxError;
use crate::source::Code;
use crate::source::Location;
use crate::source::Source;
use std::collections::VecDeque;
use std::ops::Range;
use std::rc::Rc;

/// Maximum number of parameter expansions with a switch that can be nested
/// in one another
///
/// The parser and evaluator recurse once per nesting level, so deeper input
/// is rejected with [`SyntaxError::NestingTooDeep`].
pub const MAX_SWITCH_DEPTH: usize = 100;

/// State of the tokenizer state machine
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum State {
    /// Between assignments
    AssignmentList,
    /// In a `#` comment
    Comment,
    /// In the variable name of an assignment
    AssignmentName,
    /// In the unquoted value of an assignment
    AssignmentValue,
    /// After a backslash in an unquoted value
    AssignmentValueEscape,
    /// In single quotes
    SingleQuoted,
    /// In double quotes
    DoubleQuoted,
    /// After a backslash in double quotes
    DoubleQuotedEscape,
    /// After a `$`
    Dollar,
    /// After a `${`
    DollarBrace,
    /// In the name of an unbraced parameter expansion
    SimpleExpansion,
    /// In the name of a braced parameter expansion
    ComplexExpansion,
    /// After the `:` of an expansion operator
    ExpansionOperator,
    /// In the word of a braced parameter expansion
    ExpansionValue,
    /// After a backslash in the word of a braced parameter expansion
    ExpansionValueEscape,
}

/// Saved return state
///
/// A frame is pushed when entering a quotation or expansion and popped when
/// leaving it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Frame {
    /// State to return to
    pub resume: State,
    /// Byte offset of the quote or `$` that opened the construct
    pub opening: usize,
}

/// Outcome of a state transition
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Step {
    /// Moves on to the next character.
    Advance,
    /// Examines the current character again in the new state.
    Reconsume,
    /// Stops the state machine after the end of input.
    Halt,
}

/// Characters accumulated for the next token
#[derive(Clone, Debug, Default)]
struct Buffer {
    value: String,
    /// Offset of the first character that contributed to the buffer
    start: Option<usize>,
}

#[derive(Clone, Debug)]
enum Status {
    Running,
    Halted,
    Failed(Error),
}

/// Lexical analyzer
///
/// The tokenizer implements [`Tokenize`] to produce tokens one by one. It
/// also implements `Iterator`, which yields the tokens up to and including
/// the end-of-input token, or up to the first error.
///
/// ```
/// # use shenv_syntax::parser::lex::{Token, TokenKind, Tokenizer};
/// # use shenv_syntax::source::Source;
/// let tokenizer = Tokenizer::with_source(Source::Unknown, "A=${B:-x}");
/// let tokens: Vec<Token> = tokenizer.collect::<Result<_, _>>().unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::Assign,
///         TokenKind::StartExpansion,
///         TokenKind::ExpansionOperator,
///         TokenKind::Characters,
///         TokenKind::EndExpansion,
///         TokenKind::Eof,
///     ]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Tokenizer {
    code: Rc<Code>,
    /// Byte offset of the current character
    index: usize,
    pub(super) state: State,
    frames: Vec<Frame>,
    /// Number of enclosing double quotes
    pub(super) quoting_level: usize,
    /// Number of enclosing switch words
    pub(super) switch_depth: usize,
    buffer: Buffer,
    pending: VecDeque<Token>,
    status: Status,
}

impl Tokenizer {
    /// Creates a new tokenizer for the given code.
    #[must_use]
    pub fn new(code: Rc<Code>) -> Tokenizer {
        Tokenizer {
            code,
            index: 0,
            state: State::AssignmentList,
            frames: Vec::new(),
            quoting_level: 0,
            switch_depth: 0,
            buffer: Buffer::default(),
            pending: VecDeque::new(),
            status: Status::Running,
        }
    }

    /// Creates a new tokenizer for the given source and content.
    #[must_use]
    pub fn with_source<S: Into<String>>(source: Source, value: S) -> Tokenizer {
        Tokenizer::new(Rc::new(Code::new(value, source)))
    }

    /// Returns the byte offset of the current character.
    #[must_use]
    pub(super) fn index(&self) -> usize {
        self.index
    }

    fn peek_char(&self) -> Option<char> {
        self.code.value[self.index..].chars().next()
    }

    /// Performs the transition for the current character.
    fn step(&mut self, c: Option<char>) -> Result<Step> {
        if c == Some('\0') {
            return Err(self.error_here(SyntaxError::NulByte));
        }

        use State::*;
        match self.state {
            AssignmentList => self.assignment_list(c),
            Comment => Ok(self.comment(c)),
            AssignmentName => self.assignment_name(c),
            AssignmentValue => self.assignment_value(c),
            AssignmentValueEscape => Ok(self.assignment_value_escape(c)),
            SingleQuoted => self.single_quoted(c),
            DoubleQuoted => self.double_quoted(c),
            DoubleQuotedEscape => self.double_quoted_escape(c),
            Dollar => self.dollar(c),
            DollarBrace => self.dollar_brace(c),
            SimpleExpansion => Ok(self.simple_expansion(c)),
            ComplexExpansion => self.complex_expansion(c),
            ExpansionOperator => self.expansion_operator(c),
            ExpansionValue => self.expansion_value(c),
            ExpansionValueEscape => self.expansion_value_escape(c),
        }
    }

    fn assignment_list(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            None => Ok(self.finish()),
            Some(c) if is_separator(c) => Ok(Step::Advance),
            Some('#') => {
                self.state = State::Comment;
                Ok(Step::Advance)
            }
            Some(c) if is_name_start_char(c) => {
                self.push_char(c);
                self.state = State::AssignmentName;
                Ok(Step::Advance)
            }
            Some(c) => Err(self.error_here(SyntaxError::InvalidName(c))),
        }
    }

    fn comment(&mut self, c: Option<char>) -> Step {
        match c {
            None => self.finish(),
            Some('\n') => {
                self.state = State::AssignmentList;
                Step::Advance
            }
            Some(_) => Step::Advance,
        }
    }

    fn assignment_name(&mut self, c: Option<char>) -> Result<Step> {
        match c {
            Some('=') => {
                self.flush(TokenKind::Assign);
                self.state = State::AssignmentValue;
                Ok(Step::Advance)
            }
            Some(c) if is_name_char(c) => {
                self.push_char(c);
                Ok(Step::Advance)
            }
            None | Some(' ' | '\t' | '\n') => {
                let start = self.buffer.start.unwrap_or(self.index);
                let cause = SyntaxError::MissingAssignmentOperator;
                Err(self.error(cause, start..self.index))
            }
            Some(c) => Err(self.error_here(SyntaxError::InvalidName(c))),
        }
    }

    /// Emits the end-of-input token.
    pub(super) fn finish(&mut self) -> Step {
        self.emit(TokenKind::Eof, String::new(), self.index);
        Step::Halt
    }

    /// Queues a token.
    pub(super) fn emit(&mut self, kind: TokenKind, value: String, offset: usize) {
        self.pending.push_back(Token {
            kind,
            value,
            offset,
        });
    }

    /// Records the current offset as the start of the buffer unless the
    /// buffer has already started.
    pub(super) fn mark(&mut self) {
        self.mark_at(self.index);
    }

    /// Records the given offset as the start of the buffer unless the buffer
    /// has already started.
    pub(super) fn mark_at(&mut self, offset: usize) {
        self.buffer.start.get_or_insert(offset);
    }

    /// Appends a character to the buffer.
    pub(super) fn push_char(&mut self, c: char) {
        self.mark();
        self.buffer.value.push(c);
    }

    /// Starts the buffer at the given offset with the given character.
    ///
    /// The buffer must have been flushed beforehand.
    pub(super) fn begin_buffer(&mut self, c: char, start: usize) {
        debug_assert!(self.buffer.value.is_empty(), "{:?}", self.buffer);
        self.buffer.value.push(c);
        self.buffer.start = Some(start);
    }

    /// Emits the buffer content as a token of the given kind.
    ///
    /// Nothing is emitted if the buffer is empty. In any case, the buffer is
    /// reset.
    pub(super) fn flush(&mut self, kind: TokenKind) {
        let start = self.buffer.start.take();
        if !self.buffer.value.is_empty() {
            let value = std::mem::take(&mut self.buffer.value);
            self.emit(kind, value, start.unwrap_or(self.index));
        }
    }

    /// Saves the current state and switches to the given state.
    ///
    /// The current character is recorded as the opening of the new context.
    pub(super) fn enter(&mut self, state: State) {
        self.frames.push(Frame {
            resume: self.state,
            opening: self.index,
        });
        self.state = state;
    }

    /// Returns to the most recently saved state.
    ///
    /// Returns the frame that has been popped.
    pub(super) fn leave(&mut self) -> Frame {
        let frame = self
            .frames
            .pop()
            .expect("a return state must have been saved");
        self.state = frame.resume;
        frame
    }

    /// Returns the offset of the construct that opened the current context.
    #[must_use]
    pub(super) fn opening(&self) -> usize {
        self.frames.last().map_or(self.index, |frame| frame.opening)
    }

    /// Creates an error located at the given range.
    #[must_use]
    pub(super) fn error(&self, cause: SyntaxError, range: Range<usize>) -> Error {
        let code = Rc::clone(&self.code);
        let location = Location { code, range };
        Error { cause, location }
    }

    /// Creates an error located at the current character.
    #[must_use]
    pub(super) fn error_here(&self, cause: SyntaxError) -> Error {
        let end = self.index + self.peek_char().map_or(0, char::len_utf8);
        self.error(cause, self.index..end)
    }

    /// Creates an error located at the construct that opened the current
    /// context.
    #[must_use]
    pub(super) fn error_at_opening(&self, cause: SyntaxError, len: usize) -> Error {
        let opening = self.opening();
        self.error(cause, opening..opening + len)
    }
}

impl Tokenize for Tokenizer {
    fn next_token(&mut self) -> Result<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            match self.status {
                Status::Running => (),
                Status::Halted => return Ok(Token::eof(self.index)),
                Status::Failed(ref error) => return Err(error.clone()),
            }

            let c = self.peek_char();
            match self.step(c) {
                Ok(Step::Advance) => self.index += c.map_or(0, char::len_utf8),
                Ok(Step::Reconsume) => (),
                Ok(Step::Halt) => self.status = Status::Halted,
                Err(error) => {
                    self.pending.clear();
                    self.status = Status::Failed(error.clone());
                    return Err(error);
                }
            }
        }
    }

    fn code(&self) -> &Rc<Code> {
        &self.code
    }
}

impl Iterator for Tokenizer {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        match self.status {
            Status::Failed(_) => None,
            Status::Halted if self.pending.is_empty() => None,
            _ => Some(self.next_token()),
        }
    }
}

impl std::iter::FusedIterator for Tokenizer {}

/// Tokenizes the whole input, returning the tokens up to and including the
/// end of input.
#[cfg(test)]
pub(super) fn tokens(input: &str) -> Result<Vec<Token>> {
    Tokenizer::with_source(Source::Unknown, input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Position;
    use assert_matches::assert_matches;

    fn t(kind: TokenKind, value: &str, offset: usize) -> Token {
        Token::new(kind, value, offset)
    }

    #[test]
    fn tokenizer_empty_input() {
        assert_eq!(tokens("").unwrap(), [Token::eof(0)]);
    }

    #[test]
    fn tokenizer_whitespace_only() {
        assert_eq!(tokens(" \t\n\n ").unwrap(), [Token::eof(5)]);
    }

    #[test]
    fn tokenizer_comment_only() {
        assert_eq!(tokens("#empty").unwrap(), [Token::eof(6)]);
    }

    #[test]
    fn tokenizer_comment_before_assignment() {
        assert_eq!(
            tokens("# a\nb=c").unwrap(),
            [
                t(TokenKind::Assign, "b", 4),
                t(TokenKind::Characters, "c", 6),
                Token::eof(7),
            ]
        );
    }

    #[test]
    fn tokenizer_assignment_without_value() {
        assert_eq!(
            tokens("a=").unwrap(),
            [t(TokenKind::Assign, "a", 0), Token::eof(2)]
        );
    }

    #[test]
    fn tokenizer_multiple_assignments() {
        assert_eq!(
            tokens("A=1 B=2\n\tC_3=three").unwrap(),
            [
                t(TokenKind::Assign, "A", 0),
                t(TokenKind::Characters, "1", 2),
                t(TokenKind::Assign, "B", 4),
                t(TokenKind::Characters, "2", 6),
                t(TokenKind::Assign, "C_3", 9),
                t(TokenKind::Characters, "three", 13),
                Token::eof(18),
            ]
        );
    }

    #[test]
    fn tokenizer_invalid_name_start() {
        let e = tokens("1A=x").unwrap_err();
        assert_eq!(e.cause, SyntaxError::InvalidName('1'));
        assert_eq!(e.location.range, 0..1);
    }

    #[test]
    fn tokenizer_invalid_name_char() {
        let e = tokens("A-B=x").unwrap_err();
        assert_eq!(e.cause, SyntaxError::InvalidName('-'));
        assert_eq!(e.location.range, 1..2);
    }

    #[test]
    fn tokenizer_carriage_return_is_part_of_value() {
        assert_eq!(
            tokens("A=1\r\nB=2").unwrap(),
            [
                t(TokenKind::Assign, "A", 0),
                t(TokenKind::Characters, "1\r", 2),
                t(TokenKind::Assign, "B", 5),
                t(TokenKind::Characters, "2", 7),
                Token::eof(8),
            ]
        );
    }

    #[test]
    fn tokenizer_name_without_operator() {
        let e = tokens("\nFOO bar").unwrap_err();
        assert_eq!(e.cause, SyntaxError::MissingAssignmentOperator);
        assert_eq!(e.location.range, 1..4);
        assert_eq!(e.position(), Position { line: 2, column: 1 });

        let e = tokens("FOO").unwrap_err();
        assert_eq!(e.cause, SyntaxError::MissingAssignmentOperator);
        assert_eq!(e.location.range, 0..3);
    }

    #[test]
    fn tokenizer_nul_byte() {
        let e = tokens("A='a\0b'").unwrap_err();
        assert_eq!(e.cause, SyntaxError::NulByte);
        assert_eq!(e.location.range, 4..5);
    }

    #[test]
    fn tokenizer_keeps_returning_eof() {
        let mut tokenizer = Tokenizer::with_source(Source::Unknown, "a=");
        assert_eq!(tokenizer.next_token().unwrap(), t(TokenKind::Assign, "a", 0));
        assert_eq!(tokenizer.next_token().unwrap(), Token::eof(2));
        assert_eq!(tokenizer.next_token().unwrap(), Token::eof(2));
        assert_eq!(tokenizer.next_token().unwrap(), Token::eof(2));
    }

    #[test]
    fn tokenizer_keeps_returning_error() {
        let mut tokenizer = Tokenizer::with_source(Source::Unknown, "a=b|c");
        assert_eq!(tokenizer.next_token().unwrap(), t(TokenKind::Assign, "a", 0));
        let first = tokenizer.next_token().unwrap_err();
        assert_eq!(first.cause, SyntaxError::UnescapedSpecialChar('|'));
        let second = tokenizer.next_token().unwrap_err();
        assert_eq!(second, first);
    }

    #[test]
    fn tokenizer_iterator_stops_after_eof() {
        let mut tokenizer = Tokenizer::with_source(Source::Unknown, "a=b");
        assert_eq!(tokenizer.next(), Some(Ok(t(TokenKind::Assign, "a", 0))));
        assert_eq!(tokenizer.next(), Some(Ok(t(TokenKind::Characters, "b", 2))));
        assert_eq!(tokenizer.next(), Some(Ok(Token::eof(3))));
        assert_eq!(tokenizer.next(), None);
        assert_eq!(tokenizer.next(), None);
    }

    #[test]
    fn tokenizer_iterator_stops_after_error() {
        let mut tokenizer = Tokenizer::with_source(Source::Unknown, "a='");
        assert_matches!(tokenizer.next(), Some(Ok(_)));
        assert_matches!(tokenizer.next(), Some(Err(_)));
        assert_eq!(tokenizer.next(), None);
    }

    #[test]
    fn tokenizer_is_lazy() {
        // The error is after the first assignment, so the first tokens are
        // available before the error is detected.
        let mut tokenizer = Tokenizer::with_source(Source::Unknown, "A=1 B=`x`");
        assert_eq!(tokenizer.next_token().unwrap(), t(TokenKind::Assign, "A", 0));
        assert_eq!(tokenizer.next_token().unwrap(), t(TokenKind::Characters, "1", 2));
        assert_eq!(tokenizer.next_token().unwrap(), t(TokenKind::Assign, "B", 4));
        let e = tokenizer.next_token().unwrap_err();
        assert_eq!(e.cause, SyntaxError::UnsupportedCommandSubstitution);
    }

    #[test]
    fn tokenizer_position() {
        let tokenizer = Tokenizer::with_source(Source::Unknown, "a\nb\nc");
        assert_eq!(tokenizer.position(4), Position { line: 3, column: 1 });
    }
}
