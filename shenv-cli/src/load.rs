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


//! Loading dotenv files
//!
//! [`evaluate_files`] evaluates files and returns the resulting variables.
//! [`load`] additionally assigns the variables to the environment.
//!
//! Each file is evaluated with an empty scope against the same environment.
//! The results are merged in the order of the files, so a variable defined
//! in a later file overrides the same variable in an earlier file.

use log::debug;
use log::trace;
use shenv_env::Env;
use shenv_env::ReadOnly;
use shenv_semantics::Scope;
use shenv_syntax::parser;
use shenv_syntax::parser::Parser;
use shenv_syntax::parser::lex::Tokenizer;
use shenv_syntax::source::Code;
use shenv_syntax::source::Source;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

/// Path that denotes the standard input
pub const STDIN_PATH: &str = "-";

/// Error in loading files
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file cannot be read.
    #[error("cannot read `{}`: {error}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// The file is not valid UTF-8.
    #[error("`{}` is not valid UTF-8 text", path.display())]
    InvalidUtf8 { path: PathBuf },

    /// The file has a syntax error.
    #[error(transparent)]
    Syntax(#[from] parser::Error),

    /// The evaluation failed.
    #[error("{}: {error}", path.display())]
    Eval {
        path: PathBuf,
        #[source]
        error: shenv_semantics::Error,
    },

    /// The environment rejected an assignment.
    #[error(transparent)]
    ReadOnly(#[from] ReadOnly),
}

/// Returns the source of the path.
fn source_of(path: &Path) -> Source {
    if path == Path::new(STDIN_PATH) {
        Source::Stdin
    } else {
        Source::File {
            path: path.display().to_string(),
        }
    }
}

/// Reads the whole content of the file.
///
/// The path `-` reads the standard input.
pub fn read_code(path: &Path) -> Result<Code, LoadError> {
    let io_error = |error| LoadError::Io {
        path: path.to_owned(),
        error,
    };
    let bytes = if path == Path::new(STDIN_PATH) {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes).map_err(io_error)?;
        bytes
    } else {
        std::fs::read(path).map_err(io_error)?
    };
    let value = String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8 {
        path: path.to_owned(),
    })?;
    Ok(Code::new(value, source_of(path)))
}

/// Parses and evaluates the code.
///
/// `path` is used in the error message if the evaluation fails.
pub fn evaluate_code<E: Env + ?Sized>(
    code: Code,
    path: &Path,
    override_env: bool,
    env: &E,
) -> Result<Scope, LoadError> {
    let mut tokenizer = Tokenizer::new(Rc::new(code));
    let list = Parser::new(&mut tokenizer).assignment_list()?;
    debug!("{}: parsed {} assignment(s)", path.display(), list.assignments.len());
    shenv_semantics::evaluate(&list, override_env, env).map_err(|error| LoadError::Eval {
        path: path.to_owned(),
        error,
    })
}

/// Evaluates the files in order and merges the results.
///
/// The first error of any kind aborts the whole process.
pub fn evaluate_files<I, P, E>(paths: I, override_env: bool, env: &E) -> Result<Scope, LoadError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    E: Env + ?Sized,
{
    let mut merged = Scope::new();
    for path in paths {
        let path = path.as_ref();
        debug!("loading {}", path.display());
        let code = read_code(path)?;
        let scope = evaluate_code(code, path, override_env, env)?;
        debug!("{}: defined {} variable(s)", path.display(), scope.len());
        merged.extend(scope);
    }
    Ok(merged)
}

/// Evaluates the files and assigns the results to the environment.
///
/// A variable is assigned if `override_env` is true or the environment does
/// not define it yet. Returns the merged result of the evaluation as in
/// [`evaluate_files`].
pub fn load<I, P, E>(paths: I, override_env: bool, env: &mut E) -> Result<Scope, LoadError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    E: Env + ?Sized,
{
    let scope = evaluate_files(paths, override_env, &*env)?;
    for (name, value) in &scope {
        if override_env || env.get(name).is_none() {
            trace!("setting {name}");
            env.set(name, value)?;
        } else {
            trace!("keeping {name}");
        }
    }
    Ok(scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shenv_env::MapEnv;
    use shenv_syntax::parser::SyntaxError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with_content(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    fn pairs(scope: &Scope) -> Vec<(&str, &str)> {
        scope.iter().collect()
    }

    #[test]
    fn evaluating_single_file() {
        let file = file_with_content(b"A=1\nB=${A}2\n");
        let scope = evaluate_files([file.path()], false, &MapEnv::new()).unwrap();
        assert_eq!(pairs(&scope), [("A", "1"), ("B", "12")]);
    }

    #[test]
    fn later_files_override_earlier_files() {
        let first = file_with_content(b"A=1 B=1");
        let second = file_with_content(b"B=2 C=2");
        let paths = [first.path(), second.path()];
        let scope = evaluate_files(paths, false, &MapEnv::new()).unwrap();
        assert_eq!(pairs(&scope), [("A", "1"), ("B", "2"), ("C", "2")]);
    }

    #[test]
    fn each_file_starts_with_empty_scope() {
        let first = file_with_content(b"A=1");
        let second = file_with_content(b"B=${A-unset}");
        let paths = [first.path(), second.path()];
        let scope = evaluate_files(paths, false, &MapEnv::new()).unwrap();
        assert_eq!(scope.get("B"), Some("unset"));
    }

    #[test]
    fn files_share_environment() {
        let env: MapEnv = [("E", "env")].into_iter().collect();
        let first = file_with_content(b"A=$E");
        let second = file_with_content(b"B=$E E=file");
        let paths = [first.path(), second.path()];
        let scope = evaluate_files(paths, false, &env).unwrap();
        assert_eq!(pairs(&scope), [("A", "env"), ("B", "env"), ("E", "env")]);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.env");
        let e = evaluate_files([&path], false, &MapEnv::new()).unwrap_err();
        assert_matches!(e, LoadError::Io { path: p, error } => {
            assert_eq!(p, path);
            assert_eq!(error.kind(), std::io::ErrorKind::NotFound);
        });
    }

    #[test]
    fn invalid_utf8() {
        let file = file_with_content(b"A=\xff");
        let e = evaluate_files([file.path()], false, &MapEnv::new()).unwrap_err();
        assert_matches!(e, LoadError::InvalidUtf8 { path } => {
            assert_eq!(path, file.path());
        });
    }

    #[test]
    fn syntax_error_names_file() {
        let file = file_with_content(b"A=1\nB='x");
        let e = evaluate_files([file.path()], false, &MapEnv::new()).unwrap_err();
        assert_matches!(&e, LoadError::Syntax(e) => {
            assert_eq!(e.cause, SyntaxError::UnclosedSingleQuote);
            assert_eq!(e.position().line, 2);
            assert_eq!(e.location.code.source, source_of(file.path()));
        });
        let path = file.path().display().to_string();
        assert!(e.to_string().starts_with(&path), "{e}");
    }

    #[test]
    fn first_error_aborts() {
        let first = file_with_content(b"A=${X?no X}");
        let second = file_with_content(b"B='");
        let paths = [first.path(), second.path()];
        let e = evaluate_files(paths, false, &MapEnv::new()).unwrap_err();
        assert_matches!(e, LoadError::Eval { path, error } => {
            assert_eq!(path, first.path());
            assert_eq!(error.to_string(), "no X");
        });
    }

    #[test]
    fn load_keeps_existing_variables() {
        let file = file_with_content(b"A=file B=file");
        let mut env: MapEnv = [("A", "env")].into_iter().collect();
        let scope = load([file.path()], false, &mut env).unwrap();
        assert_eq!(pairs(&scope), [("A", "env"), ("B", "file")]);
        assert_eq!(env.get("A").as_deref(), Some("env"));
        assert_eq!(env.get("B").as_deref(), Some("file"));
    }

    #[test]
    fn load_overrides_existing_variables() {
        let file = file_with_content(b"A=file B=file");
        let mut env: MapEnv = [("A", "env")].into_iter().collect();
        load([file.path()], true, &mut env).unwrap();
        assert_eq!(env.get("A").as_deref(), Some("file"));
        assert_eq!(env.get("B").as_deref(), Some("file"));
    }

    #[test]
    fn load_into_read_only_environment() {
        let file = file_with_content(b"A=1");
        let mut env = MapEnv::read_only(Default::default());
        let e = load([file.path()], false, &mut env).unwrap_err();
        assert_matches!(e, LoadError::ReadOnly(e) => assert_eq!(e.name, "A"));
    }

    #[test]
    fn load_does_not_touch_environment_on_error() {
        let file = file_with_content(b"A=1 B=${X?}");
        let mut env = MapEnv::new();
        load([file.path()], false, &mut env).unwrap_err();
        assert!(env.variables().is_empty());
    }
}
