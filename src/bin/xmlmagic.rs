// xmlmagic front end
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of xmlmagic.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Load a value from an XML document using the built-in model.
//!
//! `xmlmagic` resolves placeholders against the sources given on the
//!   command line and writes the resulting value to standard output or
//!   a file.

extern crate xmlmagic;

use getopts::{Fail, Options};
use std::{
    env,
    fs::{self, File},
    io::{self, BufReader, Write},
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use xmlmagic::{
    global,
    loader::{LoadError, Loader},
    parse::ParseConfig,
    resolve::{
        DirPreferences, JsonResolver, PrefsResolver, ResolveError,
        ResolverChain, StringTable, TableResolver,
    },
};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    Json,
    Debug,
}

/// A request to load a single document.
#[derive(Debug, PartialEq, Eq)]
struct Job {
    input: String,
    output: Option<String>,
    emit: Emit,
    json: Option<String>,
    strings: Option<String>,
    prefs: Option<String>,
    defines: Vec<(String, String)>,
    depth: usize,
    skip_unknown: bool,
}

/// Types of commands
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Load(Job),
    Usage,
}

/// Front end error.
#[derive(Debug, Error)]
enum CliError {
    #[error("failed to open `{path}`: {source}")]
    Input {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::Input { .. } => exitcode::NOINPUT,
            Self::Resolve(ResolveError::Io { .. }) => exitcode::NOINPUT,
            Self::Resolve(_) | Self::Load(_) | Self::Encode(_) => {
                exitcode::DATAERR
            }
            Self::Output(_) => exitcode::IOERR,
        }
    }
}

fn load(job: &Job) -> Result<(), CliError> {
    let defines: TableResolver = job.defines.iter().cloned().collect();
    let json = job.json.as_ref().map(JsonResolver::from_path).transpose()?;
    let prefs = job
        .prefs
        .as_ref()
        .map(|dir| PrefsResolver::new(DirPreferences::new(dir)));
    let strings = job
        .strings
        .as_ref()
        .map(StringTable::from_path)
        .transpose()?;

    let mut chain = ResolverChain::new();

    if !defines.is_empty() {
        chain.push(&defines);
    }
    if let Some(json) = &json {
        chain.push(json);
    }
    if let Some(prefs) = &prefs {
        chain.push(prefs);
    }
    if let Some(strings) = &strings {
        chain.push(strings);
    }

    let config = ParseConfig::default()
        .with_format_depth(job.depth)
        .with_skip_unknown(job.skip_unknown);

    let src = File::open(&job.input).map_err(|source| CliError::Input {
        path: job.input.clone(),
        source,
    })?;

    let value = Loader::new()
        .with_resolver(&chain)
        .with_config(config)
        .load_value(BufReader::new(src))?;

    let mut rendered = match job.emit {
        Emit::Json => serde_json::to_string_pretty(&value)?,
        Emit::Debug => format!("{value:#?}"),
    };
    rendered.push('\n');

    let written = match &job.output {
        Some(path) => fs::write(path, rendered),
        None => io::stdout().lock().write_all(rendered.as_bytes()),
    };

    written.map_err(CliError::Output)
}

/// Entrypoint for the front end
pub fn main() {
    let args: Vec<String> = env::args().collect();
    let program = &args[0];
    let opts = get_opts();
    let usage = opts.usage(&format!("Usage: {} [OPTIONS] INPUT", program));

    match parse_options(opts, args.clone()) {
        Ok(Command::Load(job)) => {
            init_logging();

            if let Err(e) = load(&job) {
                eprintln!("error: {e}");
                std::process::exit(e.exit_code());
            }
        }
        Ok(Command::Usage) => {
            println!("{}", usage);
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            eprintln!("{}", e);
            println!("{}", usage);
            std::process::exit(exitcode::USAGE);
        }
    }
}

/// Log to standard error,
///   filtered by `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Get 'Options'
fn get_opts() -> Options {
    let mut opts = Options::new();
    opts.optopt("o", "output", "set output file name", "NAME");
    opts.optopt("", "emit", "set output type (default json)", "json|debug");
    opts.optopt("", "json", "resolve @json: tokens from FILE", "FILE");
    opts.optopt("", "strings", "resolve @string/ tokens from FILE", "FILE");
    opts.optopt("", "prefs", "resolve @prefs: tokens from DIR", "DIR");
    opts.optmulti("D", "define", "resolve the token KEY to VALUE", "KEY=VALUE");
    opts.optopt("", "depth", "maximum recursive expansions", "N");
    opts.optflag("", "skip-unknown", "skip unknown child elements");
    opts.optflag("h", "help", "print this help menu");

    opts
}

/// Option parser
fn parse_options(opts: Options, args: Vec<String>) -> Result<Command, Fail> {
    let matches = opts.parse(&args[1..])?;

    if matches.opt_present("h") {
        return Ok(Command::Usage);
    }

    let input = match matches.free.len() {
        0 => return Err(Fail::OptionMissing(String::from("INPUT"))),
        1 => matches.free[0].clone(),
        _ => return Err(Fail::UnrecognizedOption(matches.free[1].clone())),
    };

    let emit = match matches.opt_str("emit").as_deref() {
        None | Some("json") => Emit::Json,
        Some("debug") => Emit::Debug,
        Some(_) => {
            return Err(Fail::ArgumentMissing(String::from(
                "--emit json|debug",
            )))
        }
    };

    let defines = matches
        .opt_strs("define")
        .into_iter()
        .map(|def| match def.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                Ok((key.to_string(), value.to_string()))
            }
            _ => Err(Fail::ArgumentMissing(String::from("--define KEY=VALUE"))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let depth = match matches.opt_str("depth") {
        None => global::DEFAULT_FORMAT_DEPTH,
        Some(n) => n
            .parse()
            .map_err(|_| Fail::ArgumentMissing(String::from("--depth N")))?,
    };

    Ok(Command::Load(Job {
        input,
        output: matches.opt_str("o"),
        emit,
        json: matches.opt_str("json"),
        strings: matches.opt_str("strings"),
        prefs: matches.opt_str("prefs"),
        defines,
        depth,
        skip_unknown: matches.opt_present("skip-unknown"),
    }))
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("program")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    fn job(input: &str) -> Job {
        Job {
            input: input.into(),
            output: None,
            emit: Emit::Json,
            json: None,
            strings: None,
            prefs: None,
            defines: vec![],
            depth: global::DEFAULT_FORMAT_DEPTH,
            skip_unknown: false,
        }
    }

    #[test]
    fn parse_options_help() {
        assert_eq!(
            parse_options(get_opts(), args(&["-h"])),
            Ok(Command::Usage),
        );
        assert_eq!(
            parse_options(get_opts(), args(&["--help"])),
            Ok(Command::Usage),
        );
    }

    #[test]
    fn parse_options_invalid() {
        match parse_options(get_opts(), args(&["-q"])) {
            Err(Fail::UnrecognizedOption(_)) => {}
            _ => panic!("Invalid option not caught"),
        }
    }

    #[test]
    fn parse_options_missing_input() {
        match parse_options(get_opts(), args(&[])) {
            Err(Fail::OptionMissing(message)) => {
                assert_eq!("INPUT", message);
            }
            _ => panic!("Missing input not caught"),
        }
    }

    #[test]
    fn parse_options_too_many_args() {
        match parse_options(get_opts(), args(&["foo", "bar"])) {
            Err(Fail::UnrecognizedOption(message)) => {
                assert_eq!("bar", message);
            }
            _ => panic!("Extra option not caught"),
        }
    }

    #[test]
    fn parse_options_defaults() {
        assert_eq!(
            parse_options(get_opts(), args(&["foo.xml"])),
            Ok(Command::Load(job("foo.xml"))),
        );
    }

    #[test]
    fn parse_options_all() {
        let result = parse_options(
            get_opts(),
            args(&[
                "foo.xml",
                "-o",
                "out.json",
                "--emit",
                "debug",
                "--json",
                "data.json",
                "--strings",
                "strings.json",
                "--prefs",
                "prefs",
                "--define",
                "a=1",
                "-D",
                "b=x=y",
                "--depth",
                "2",
                "--skip-unknown",
            ]),
        );

        assert_eq!(
            result,
            Ok(Command::Load(Job {
                output: Some("out.json".into()),
                emit: Emit::Debug,
                json: Some("data.json".into()),
                strings: Some("strings.json".into()),
                prefs: Some("prefs".into()),
                defines: vec![
                    ("a".into(), "1".into()),
                    ("b".into(), "x=y".into()),
                ],
                depth: 2,
                skip_unknown: true,
                ..job("foo.xml")
            })),
        );
    }

    #[test]
    fn parse_options_invalid_emit() {
        match parse_options(get_opts(), args(&["foo.xml", "--emit", "xml"])) {
            Err(Fail::ArgumentMissing(message)) => {
                assert_eq!("--emit json|debug", message);
            }
            _ => panic!("Invalid emit not caught"),
        }
    }

    #[test]
    fn parse_options_invalid_define() {
        for def in ["novalue", "=value"] {
            match parse_options(get_opts(), args(&["foo.xml", "-D", def])) {
                Err(Fail::ArgumentMissing(message)) => {
                    assert_eq!("--define KEY=VALUE", message);
                }
                _ => panic!("Invalid define `{def}` not caught"),
            }
        }
    }

    #[test]
    fn parse_options_invalid_depth() {
        match parse_options(get_opts(), args(&["foo.xml", "--depth", "-1"])) {
            Err(Fail::ArgumentMissing(message)) => {
                assert_eq!("--depth N", message);
            }
            _ => panic!("Invalid depth not caught"),
        }
    }
}
