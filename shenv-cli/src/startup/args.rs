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


//! Command line argument parser
//!
//! The [`parse`] function interprets the arguments of the `shenv` command:
//!
//! ```text
//! shenv [-o|--override] [-e|--export] [-v|--verbose] [--] FILE...
//! shenv -h|--help
//! shenv -V|--version
//! ```
//!
//! Short options can be combined into one argument, as in `-ev`. Long
//! options can be abbreviated to any unambiguous prefix. Options are only
//! recognized before the first operand. An operand of `-` denotes the
//! standard input.

use std::iter::Peekable;
use thiserror::Error;

/// Configuration for evaluating files
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Run {
    /// Files to evaluate, in order
    pub files: Vec<String>,
    /// Whether assignments in the files override the environment (`-o`)
    pub override_env: bool,
    /// Whether to prefix output lines with `export ` (`-e`)
    pub export: bool,
    /// Whether to log progress to the standard error (`-v`)
    pub verbose: bool,
}

/// Parse result
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Parse {
    /// Evaluates files
    Run(Run),
    /// Prints help message and exit
    Help,
    /// Prints version information and exit
    Version,
}

impl From<Run> for Parse {
    fn from(run: Run) -> Self {
        Parse::Run(run)
    }
}

/// Error in command line parsing
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Short option that is not defined
    #[error("unknown option `-{0}`")]
    UnknownShortOption(char),

    /// Long option that is not defined
    #[error("unknown option `{0}`")]
    UnknownLongOption(String),

    /// Long option that matches the prefix of more than one option name
    #[error("ambiguous option name `{0}`")]
    AmbiguousLongOption(String),

    /// Argument specified to an option that does not take an argument
    #[error("option `{0}` does not take an argument")]
    UnexpectedOptionArgument(String),

    /// No file operands
    #[error("missing file operand")]
    MissingFile,
}

/// Option recognized by the parser
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Opt {
    Override,
    Export,
    Verbose,
    Help,
    Version,
}

/// Pairs of long option names and options
const LONG_OPTIONS: [(&str, Opt); 5] = [
    ("override", Opt::Override),
    ("export", Opt::Export),
    ("verbose", Opt::Verbose),
    ("help", Opt::Help),
    ("version", Opt::Version),
];

impl Opt {
    fn from_short(c: char) -> Option<Self> {
        match c {
            'o' => Some(Opt::Override),
            'e' => Some(Opt::Export),
            'v' => Some(Opt::Verbose),
            'h' => Some(Opt::Help),
            'V' => Some(Opt::Version),
            _ => None,
        }
    }

    /// Finds the long option that `name` is a prefix of.
    ///
    /// An exact match is preferred over a prefix match.
    fn from_long(name: &str) -> Result<Self, Error> {
        if let Some(&(_, opt)) = LONG_OPTIONS.iter().find(|&&(long, _)| long == name) {
            return Ok(opt);
        }
        let mut candidates = LONG_OPTIONS
            .iter()
            .filter(|&&(long, _)| long.starts_with(name));
        match (candidates.next(), candidates.next()) {
            (Some(&(_, opt)), None) => Ok(opt),
            (Some(_), Some(_)) => Err(Error::AmbiguousLongOption(format!("--{name}"))),
            (None, _) => Err(Error::UnknownLongOption(format!("--{name}"))),
        }
    }
}

/// Parses command line arguments.
///
/// The first item of `args` is the command name, which is ignored.
pub fn parse<I, S>(args: I) -> Result<Parse, Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into).peekable();
    let mut result = Run::default();

    // Skip the command name
    args.next();

    // Parse options
    while let Some(options) = try_parse_options(&mut args)? {
        for option in options {
            match option {
                Opt::Override => result.override_env = true,
                Opt::Export => result.export = true,
                Opt::Verbose => result.verbose = true,
                Opt::Help => return Ok(Parse::Help),
                Opt::Version => return Ok(Parse::Version),
            }
        }
    }

    args.next_if(|arg| arg == "--");

    // Parse operands
    result.files = args.collect();
    if result.files.is_empty() {
        return Err(Error::MissingFile);
    }
    Ok(Parse::Run(result))
}

/// Parses and consumes the next argument if it is an option.
///
/// Returns `Ok(None)` if the next argument is not an option.
fn try_parse_options<I: Iterator<Item = String>>(
    args: &mut Peekable<I>,
) -> Result<Option<Vec<Opt>>, Error> {
    let Some(arg) = args.next_if(|arg| is_option(arg)) else {
        return Ok(None);
    };

    if let Some(long) = arg.strip_prefix("--") {
        if let Some((name, _value)) = long.split_once('=') {
            // Validate the name before complaining about the argument
            Opt::from_long(name)?;
            return Err(Error::UnexpectedOptionArgument(format!("--{name}")));
        }
        return Ok(Some(vec![Opt::from_long(long)?]));
    }

    arg.chars()
        .skip(1)
        .map(|c| Opt::from_short(c).ok_or(Error::UnknownShortOption(c)))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Tests if the given string is an option.
///
/// `-` and `--` are not options.
fn is_option(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some(rest) => !rest.is_empty() && rest != "-",
        None => false,
    }
}
