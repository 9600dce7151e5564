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


//! This is an internal library crate for the `shenv` command. The entry point
//! is the [`main`] function, which is to be used as the `main` function in the
//! binary crate.
//!
//! The [`load`] module can also be used by other programs to load dotenv
//! files into an [environment](shenv_env::Env).

pub mod load;
pub mod startup;

mod report;

use self::load::evaluate_files;
use self::startup::args::Parse;
use self::startup::args::Run;
use log::debug;
use shenv_env::ProcessEnv;
use shenv_semantics::Scope;
use shenv_syntax::quote::quoted;
use std::io::IsTerminal;
use std::io::Write;
use std::process::ExitCode;

/// Exit status for invalid command line arguments
const EXIT_USAGE: u8 = 2;

fn help(arg0: &str) -> String {
    format!(
        "\
Usage: {arg0} [OPTION]... [--] FILE...
Evaluate dotenv files and print the resulting variables.

  -o, --override  let assignments in the files override the environment
  -e, --export    prefix each output line with `export `
  -v, --verbose   print progress to the standard error
  -h, --help      print this help and exit
  -V, --version   print version information and exit

A FILE of `-` denotes the standard input.
"
    )
}

/// Writes the variables in the dotenv format.
///
/// Each variable is written on its own line as `NAME=value`, with the value
/// quoted as needed so that the output can be evaluated again to the same
/// variables. If `export` is true, each line starts with `export `.
pub fn write_scope<W: Write>(out: &mut W, scope: &Scope, export: bool) -> std::io::Result<()> {
    let prefix = if export { "export " } else { "" };
    for (name, value) in scope {
        writeln!(out, "{prefix}{name}={}", quoted(value))?;
    }
    Ok(())
}

fn run(run: Run) -> ExitCode {
    startup::init_logger(run.verbose);
    debug!("{run:?}");

    let env = ProcessEnv::read_only();
    let scope = match evaluate_files(&run.files, run.override_env, &env) {
        Ok(scope) => scope,
        Err(e) => {
            let styled = std::io::stderr().is_terminal();
            eprintln!("{}", report::render(&e, styled));
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match write_scope(&mut stdout, &scope, run.export).and_then(|()| stdout.flush()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("shenv: cannot write the result: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the `shenv` command.
pub fn main() -> ExitCode {
    let arg0 = std::env::args().next().unwrap_or_else(|| "shenv".to_owned());
    match startup::args::parse(std::env::args()) {
        Ok(Parse::Help) => {
            print!("{}", help(&arg0));
            ExitCode::SUCCESS
        }
        Ok(Parse::Version) => {
            println!("shenv {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Ok(Parse::Run(config)) => run(config),
        Err(e) => {
            eprintln!("{arg0}: {e}");
            eprintln!("Try `{arg0} --help` for more information.");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writing_scope() {
        let scope: Scope = [("A", "plain"), ("B", "x y"), ("C", "it's"), ("D", "")]
            .into_iter()
            .collect();
        let mut out = Vec::new();
        write_scope(&mut out, &scope, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "A=plain\nB='x y'\nC=\"it's\"\nD=''\n"
        );
    }

    #[test]
    fn writing_exported_scope() {
        let scope: Scope = [("A", "$1")].into_iter().collect();
        let mut out = Vec::new();
        write_scope(&mut out, &scope, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "export A='$1'\n");
    }

    #[test]
    fn written_scope_evaluates_to_same_scope() {
        let scope: Scope = [("A", "a b"), ("B", "${x}"), ("C", "'\"\\`$")]
            .into_iter()
            .collect();
        let mut out = Vec::new();
        write_scope(&mut out, &scope, false).unwrap();
        let list: shenv_semantics::AssignmentList =
            String::from_utf8(out).unwrap().parse().unwrap();
        let env = shenv_env::MapEnv::new();
        let evaluated = shenv_semantics::evaluate(&list, false, &env).unwrap();
        assert_eq!(evaluated, scope);
    }

    #[test]
    fn help_mentions_all_options() {
        let help = help("shenv");
        for option in ["--override", "--export", "--verbose", "--help", "--version"] {
            assert!(help.contains(option), "{option}");
        }
    }
}
