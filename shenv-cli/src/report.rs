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


//! Rendering error messages

use crate::load::LoadError;
use annotate_snippets::Level;
use annotate_snippets::Renderer;
use shenv_syntax::source::pretty::Message;

/// Renders the error as a diagnostic message.
///
/// Syntax errors are rendered with the annotated source code. Other errors
/// are rendered as a single line. If `styled` is true, the message contains
/// ANSI escape sequences for coloring.
#[must_use]
pub fn render(error: &LoadError, styled: bool) -> String {
    let renderer = if styled {
        Renderer::styled()
    } else {
        Renderer::plain()
    };
    match error {
        LoadError::Syntax(error) => {
            let message = Message::from(error);
            let message = annotate_snippets::Message::from(&message);
            renderer.render(message).to_string()
        }
        _ => {
            let title = error.to_string();
            renderer.render(Level::Error.title(&title)).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shenv_syntax::parser::Parser;
    use shenv_syntax::parser::lex::Tokenizer;
    use shenv_syntax::source::Source;
    use std::path::PathBuf;

    #[test]
    fn rendering_syntax_error() {
        let source = Source::File {
            path: "test.env".to_string(),
        };
        let mut tokenizer = Tokenizer::with_source(source, "A=1\nB='oops\n");
        let error = Parser::new(&mut tokenizer).assignment_list().unwrap_err();
        let rendered = render(&LoadError::Syntax(error), false);
        assert!(rendered.starts_with("error: "), "{rendered}");
        assert!(rendered.contains("test.env:2:3"), "{rendered}");
        assert!(rendered.contains("B='oops"), "{rendered}");
    }

    #[test]
    fn rendering_other_error() {
        let error = LoadError::InvalidUtf8 {
            path: PathBuf::from("bad.env"),
        };
        let rendered = render(&error, false);
        assert!(
            rendered.starts_with("error: `bad.env` is not valid UTF-8 text"),
            "{rendered}"
        );
    }
}
