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

//! Diagnostic messages that point into dotenv source code
//!
//! A [`Message`] has a title, annotations that each label a byte range of
//! some [`Code`](super::Code), and footers with extra hints. It carries no
//! formatting of its own. The parser's [`Error`](crate::parser::Error)
//! implements [`MessageBase`], so `Message::from(&error)` describes a syntax
//! error.
//!
//! With the `annotate-snippets` feature, a `&Message` converts into an
//! `annotate_snippets::Message`, which its `Renderer` prints with the
//! offending line underlined:
//!
//! ```
//! # use shenv_syntax::parser::{Error, SyntaxError};
//! # use shenv_syntax::source::Location;
//! # use shenv_syntax::source::pretty::Message;
//! let error = Error {
//!     cause: SyntaxError::EmptyParam,
//!     location: Location::dummy("${}"),
//! };
//! let message = Message::from(&error);
//! assert_eq!(message.title, "the parameter name is missing");
//! # #[cfg(feature = "annotate-snippets")]
//! # {
//! let message = annotate_snippets::Message::from(&message);
//! eprint!("{}", annotate_snippets::Renderer::plain().render(message));
//! # }
//! ```

use super::Location;
use std::borrow::Cow;

/// Type of annotation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnnotationType {
    Error,
    Warning,
    Info,
    Note,
    Help,
}

/// Source code fragment annotated with a label
///
/// Annotations are part of an entire [`Message`].
#[derive(Clone, Debug)]
pub struct Annotation<'a> {
    /// Type of annotation
    pub r#type: AnnotationType,
    /// String that describes the annotated part of the source code
    pub label: Cow<'a, str>,
    /// Position of the annotated fragment in the source code
    pub location: &'a Location,
}

impl<'a> Annotation<'a> {
    /// Creates a new annotation.
    #[must_use]
    pub fn new(r#type: AnnotationType, label: Cow<'a, str>, location: &'a Location) -> Self {
        Annotation {
            r#type,
            label,
            location,
        }
    }
}

/// Additional text without associated source code
#[derive(Clone, Debug)]
pub struct Footer<'a> {
    /// Type of this footer
    pub r#type: AnnotationType,
    /// Text of this footer
    pub label: Cow<'a, str>,
}

/// Entire diagnostic message
#[derive(Clone, Debug)]
pub struct Message<'a> {
    /// Type of this message
    pub r#type: AnnotationType,
    /// String that communicates the most important information in this message
    pub title: Cow<'a, str>,
    /// References to source code fragments annotated with additional information
    pub annotations: Vec<Annotation<'a>>,
    /// Additional text without associated source code
    pub footers: Vec<Footer<'a>>,
}

/// Error types that can be described by a [`Message`]
///
/// Every implementor converts into a message with `Message::from`.
pub trait MessageBase {
    /// Returns the type of the entire message.
    ///
    /// The default implementation returns `AnnotationType::Error`.
    fn message_type(&self) -> AnnotationType {
        AnnotationType::Error
    }

    /// Returns the main caption of the message.
    fn message_title(&self) -> Cow<'_, str>;

    /// Returns the annotation that locates the problem.
    fn main_annotation(&self) -> Annotation<'_>;

    /// Returns hints shown below the annotated code.
    fn footers(&self) -> Vec<Footer<'_>> {
        Vec::new()
    }
}

impl<'a, T: MessageBase> From<&'a T> for Message<'a> {
    fn from(base: &'a T) -> Self {
        Message {
            r#type: base.message_type(),
            title: base.message_title(),
            annotations: vec![base.main_annotation()],
            footers: base.footers(),
        }
    }
}

#[cfg(feature = "annotate-snippets")]
mod annotate_snippets_support {
    use super::super::Code;
    use super::*;
    use std::rc::Rc;

    /// Converts `shenv_syntax::source::pretty::AnnotationType` into
    /// `annotate_snippets::Level`.
    ///
    /// This implementation is only available when the `shenv_syntax` crate is
    /// built with the `annotate-snippets` feature enabled.
    impl From<AnnotationType> for annotate_snippets::Level {
        fn from(r#type: AnnotationType) -> Self {
            use AnnotationType::*;
            match r#type {
                Error => Self::Error,
                Warning => Self::Warning,
                Info => Self::Info,
                Note => Self::Note,
                Help => Self::Help,
            }
        }
    }

    /// Groups annotations by the code they point into, in order of first
    /// appearance.
    fn group_by_code<'a>(
        annotations: &'a [Annotation<'a>],
    ) -> Vec<(&'a Rc<Code>, Vec<&'a Annotation<'a>>)> {
        let mut groups: Vec<(&Rc<Code>, Vec<&Annotation>)> = Vec::new();
        for annotation in annotations {
            let code = &annotation.location.code;
            match groups.iter_mut().find(|(c, _)| Rc::ptr_eq(c, code)) {
                Some((_, group)) => group.push(annotation),
                None => groups.push((code, vec![annotation])),
            }
        }
        groups
    }

    /// Converts a message into `annotate_snippets::Message`.
    ///
    /// Each distinct code becomes one snippet with line numbers starting at
    /// 1, labeled with the source name.
    impl<'a> From<&'a Message<'a>> for annotate_snippets::Message<'a> {
        fn from(message: &'a Message<'a>) -> Self {
            let snippets = group_by_code(&message.annotations)
                .into_iter()
                .map(|(code, annotations)| {
                    let annotations = annotations.into_iter().map(|annotation| {
                        annotate_snippets::Level::from(annotation.r#type)
                            .span(annotation.location.range.clone())
                            .label(&annotation.label)
                    });
                    annotate_snippets::Snippet::source(&code.value)
                        .line_start(1)
                        .origin(code.source.label())
                        .fold(true)
                        .annotations(annotations)
                });
            let footers = message.footers.iter().map(|footer| {
                annotate_snippets::Level::from(footer.r#type).title(&footer.label)
            });

            annotate_snippets::Level::from(message.r#type)
                .title(&message.title)
                .snippets(snippets)
                .footers(footers)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Problem(Location);

    impl MessageBase for Problem {
        fn message_title(&self) -> Cow<'_, str> {
            "something went wrong".into()
        }

        fn main_annotation(&self) -> Annotation<'_> {
            Annotation::new(AnnotationType::Error, "here".into(), &self.0)
        }
    }

    #[test]
    fn message_from_message_base() {
        let problem = Problem(Location::dummy("foo"));
        let message = Message::from(&problem);
        assert_eq!(message.r#type, AnnotationType::Error);
        assert_eq!(message.title, "something went wrong");
        assert_eq!(message.annotations.len(), 1);
        assert_eq!(message.annotations[0].label, "here");
        assert_eq!(message.annotations[0].location, &problem.0);
        assert!(message.footers.is_empty());
    }

    #[cfg(feature = "annotate-snippets")]
    #[test]
    fn rendering_with_annotate_snippets() {
        let problem = Problem(Location::dummy("FOO=bar"));
        let message = Message::from(&problem);
        let message = annotate_snippets::Message::from(&message);
        let rendered = annotate_snippets::Renderer::plain()
            .render(message)
            .to_string();
        assert!(rendered.contains("something went wrong"), "{rendered}");
        assert!(rendered.contains("FOO=bar"), "{rendered}");
    }

    #[cfg(feature = "annotate-snippets")]
    #[test]
    fn annotations_on_same_code_share_snippet() {
        let first = Location::dummy("FOO=bar");
        let second = Location {
            code: std::rc::Rc::clone(&first.code),
            range: 4..7,
        };
        let other = Location::dummy("BAZ=qux");
        let message = Message {
            r#type: AnnotationType::Error,
            title: "title".into(),
            annotations: vec![
                Annotation::new(AnnotationType::Error, "name".into(), &first),
                Annotation::new(AnnotationType::Info, "value".into(), &second),
                Annotation::new(AnnotationType::Note, "elsewhere".into(), &other),
            ],
            footers: vec![Footer {
                r#type: AnnotationType::Help,
                label: "a hint".into(),
            }],
        };
        let message = annotate_snippets::Message::from(&message);
        let rendered = annotate_snippets::Renderer::plain()
            .render(message)
            .to_string();
        assert_eq!(rendered.matches("FOO=bar").count(), 1, "{rendered}");
        assert_eq!(rendered.matches("BAZ=qux").count(), 1, "{rendered}");
        assert!(rendered.contains("a hint"), "{rendered}");
    }
}
