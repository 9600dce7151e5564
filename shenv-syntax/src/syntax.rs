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

//! Dotenv file syntax
//!
//! This module contains types that represent abstract syntax trees (ASTs) of
//! dotenv files.
//!
//! ## Syntactic elements
//!
//! The AST type that represents a whole file is [`AssignmentList`], which is a
//! vector of [`Assignment`]s. An `Assignment` binds a variable name to a
//! [`Word`], a sequence of [`WordUnit`]s. A word unit is either a run of
//! literal characters or a parameter [`Expansion`], which may contain a
//! [`Switch`] that in turn contains a nested word.
//!
//! Quotes and escapes are removed while parsing, so the AST contains no
//! quoting information.
//!
//! ## Parsing
//!
//! [`AssignmentList`] implements the [`FromStr`](std::str::FromStr) trait, so
//! you can get an AST by calling `parse` on a `&str`:
//!
//! ```
//! # use shenv_syntax::syntax::AssignmentList;
//! let list: AssignmentList = "FOO=bar BAZ=${FOO:-qux}".parse().unwrap();
//! assert_eq!(list.assignments.len(), 2);
//! assert_eq!(list.to_string(), "FOO=bar BAZ=${FOO:-qux}");
//! ```
//!
//! ## Displaying
//!
//! The AST types implement [`Display`](std::fmt::Display), which converts an
//! AST back to source code. Literal characters are quoted where needed, and
//! parsing the displayed form yields an equal AST.

mod impl_display;

/// Type of a [switch](Switch)
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SwitchType {
    /// Alter an existing value, if any. (`+`)
    Alter,
    /// Substitute a missing value with a default. (`-`)
    Default,
    /// Assign a default to the variable if the value is missing. (`=`)
    Assign,
    /// Error out if the value is missing. (`?`)
    Error,
}

impl TryFrom<char> for SwitchType {
    type Error = char;

    /// Converts an operator character to a switch type.
    ///
    /// Returns the character back if it is not a switch operator.
    fn try_from(c: char) -> Result<SwitchType, char> {
        use SwitchType::*;
        match c {
            '+' => Ok(Alter),
            '-' => Ok(Default),
            '=' => Ok(Assign),
            '?' => Ok(Error),
            _ => Err(c),
        }
    }
}

/// Condition that triggers a [switch](Switch)
///
/// In the lexical grammar, a switch condition is an optional colon that
/// precedes a switch type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SwitchCondition {
    /// Without a colon, the switch is triggered if the variable is unset.
    Unset,
    /// With a colon, the switch is triggered if the variable is unset or
    /// empty.
    UnsetOrEmpty,
}

/// Parameter expansion [modifier](Modifier) that conditionally substitutes the
/// value being expanded
///
/// Examples of switches include `+foo`, `:-bar` and `:=baz`.
///
/// A switch is composed of a [condition](SwitchCondition) (an optional `:`), a
/// [type](SwitchType) (one of `+`, `-`, `=` and `?`) and a [word](Word).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Switch {
    /// How the value is substituted
    pub r#type: SwitchType,
    /// Condition that determines whether the value is substituted or not
    pub condition: SwitchCondition,
    /// Word that substitutes the parameter value
    pub word: Word,
}

impl Switch {
    /// Parses an expansion operator such as `:-` into a condition and type.
    ///
    /// ```
    /// # use shenv_syntax::syntax::{Switch, SwitchCondition, SwitchType};
    /// assert_eq!(
    ///     Switch::parse_operator(":="),
    ///     Some((SwitchCondition::UnsetOrEmpty, SwitchType::Assign))
    /// );
    /// assert_eq!(
    ///     Switch::parse_operator("+"),
    ///     Some((SwitchCondition::Unset, SwitchType::Alter))
    /// );
    /// assert_eq!(Switch::parse_operator("::"), None);
    /// ```
    #[must_use]
    pub fn parse_operator(operator: &str) -> Option<(SwitchCondition, SwitchType)> {
        let (condition, rest) = match operator.strip_prefix(':') {
            Some(rest) => (SwitchCondition::UnsetOrEmpty, rest),
            None => (SwitchCondition::Unset, operator),
        };
        let mut chars = rest.chars();
        let r#type = SwitchType::try_from(chars.next()?).ok()?;
        match chars.next() {
            None => Some((condition, r#type)),
            Some(_) => None,
        }
    }
}

/// Attribute that modifies a parameter expansion
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Modifier {
    /// No modifier
    ///
    /// This is the form of `$name` and `${name}`.
    None,
    /// `+`, `-`, `=` or `?`, optionally prefixed with `:`
    Switch(Switch),
}

/// Parameter expansion
///
/// An expansion with [`Modifier::None`] is a _simple_ expansion, which
/// evaluates to the value of the variable or an empty string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Expansion {
    /// Name of the variable to be expanded
    pub name: String,
    /// Modifier
    pub modifier: Modifier,
}

impl Expansion {
    /// Creates a simple expansion of the named variable.
    #[must_use]
    pub fn simple<S: Into<String>>(name: S) -> Self {
        Expansion {
            name: name.into(),
            modifier: Modifier::None,
        }
    }

    /// Creates an expansion with a switch.
    #[must_use]
    pub fn switch<S: Into<String>>(name: S, switch: Switch) -> Self {
        Expansion {
            name: name.into(),
            modifier: Modifier::Switch(switch),
        }
    }
}

/// Element of a [`Word`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WordUnit {
    /// Literal characters
    Characters(String),
    /// Parameter expansion
    Expansion(Expansion),
}

/// Sequence of [`WordUnit`]s
///
/// A word is the value of an assignment or the substitute of a [switch](Switch).
/// Adjacent literal characters are kept in a single
/// [`WordUnit::Characters`] if the word is built with
/// [`push_characters`](Self::push_characters).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Word {
    pub units: Vec<WordUnit>,
}

impl Word {
    /// Creates an empty word.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tests whether the word contains no units.
    ///
    /// An empty word evaluates to an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Appends literal characters, merging them into the last unit if it is
    /// also literal.
    ///
    /// An empty string is ignored.
    pub fn push_characters(&mut self, chars: &str) {
        if chars.is_empty() {
            return;
        }
        match self.units.last_mut() {
            Some(WordUnit::Characters(last)) => last.push_str(chars),
            _ => self.units.push(WordUnit::Characters(chars.to_string())),
        }
    }

    /// Appends an expansion.
    pub fn push_expansion(&mut self, expansion: Expansion) {
        self.units.push(WordUnit::Expansion(expansion));
    }

    /// Returns the literal value of the word if it contains no expansions.
    ///
    /// ```
    /// # use shenv_syntax::syntax::{Expansion, Word};
    /// let mut word = Word::new();
    /// word.push_characters("foo");
    /// assert_eq!(word.to_string_if_literal().as_deref(), Some("foo"));
    /// word.push_expansion(Expansion::simple("BAR"));
    /// assert_eq!(word.to_string_if_literal(), None);
    /// ```
    #[must_use]
    pub fn to_string_if_literal(&self) -> Option<String> {
        self.units
            .iter()
            .map(|unit| match unit {
                WordUnit::Characters(chars) => Some(chars.as_str()),
                WordUnit::Expansion(_) => None,
            })
            .collect()
    }
}

impl From<&str> for Word {
    /// Creates a word containing the given literal characters.
    fn from(chars: &str) -> Self {
        let mut word = Word::new();
        word.push_characters(chars);
        word
    }
}

/// Assignment of a [word](Word) to a variable
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assignment {
    /// Name of the variable to assign to
    pub name: String,
    /// Value assigned to the variable
    pub value: Word,
}

/// Sequence of [assignments](Assignment)
///
/// This is the AST of a whole dotenv file. Assignments are listed in the order
/// they appear in the source.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AssignmentList {
    pub assignments: Vec<Assignment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_type_from_char() {
        assert_eq!(SwitchType::try_from('+'), Ok(SwitchType::Alter));
        assert_eq!(SwitchType::try_from('-'), Ok(SwitchType::Default));
        assert_eq!(SwitchType::try_from('='), Ok(SwitchType::Assign));
        assert_eq!(SwitchType::try_from('?'), Ok(SwitchType::Error));
        assert_eq!(SwitchType::try_from('#'), Err('#'));
    }

    #[test]
    fn parsing_all_operators() {
        use SwitchCondition::*;
        use SwitchType::*;
        let cases = [
            ("-", Unset, Default),
            (":-", UnsetOrEmpty, Default),
            ("=", Unset, Assign),
            (":=", UnsetOrEmpty, Assign),
            ("+", Unset, Alter),
            (":+", UnsetOrEmpty, Alter),
            ("?", Unset, Error),
            (":?", UnsetOrEmpty, Error),
        ];
        for (operator, condition, r#type) in cases {
            assert_eq!(
                Switch::parse_operator(operator),
                Some((condition, r#type)),
                "{operator:?}"
            );
        }
    }

    #[test]
    fn parsing_invalid_operators() {
        for operator in ["", ":", "%", "--", ":-+", "-:"] {
            assert_eq!(Switch::parse_operator(operator), None, "{operator:?}");
        }
    }

    #[test]
    fn word_merges_adjacent_characters() {
        let mut word = Word::new();
        word.push_characters("a");
        word.push_characters("");
        word.push_characters("b");
        word.push_expansion(Expansion::simple("X"));
        word.push_characters("c");
        assert_eq!(
            word.units,
            [
                WordUnit::Characters("ab".to_string()),
                WordUnit::Expansion(Expansion::simple("X")),
                WordUnit::Characters("c".to_string()),
            ]
        );
    }

    #[test]
    fn empty_word() {
        assert!(Word::new().is_empty());
        assert!(Word::from("").is_empty());
        assert_eq!(Word::new().to_string_if_literal().as_deref(), Some(""));
    }
}
