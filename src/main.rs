use kleene::{Config, Dfa, DfaDescription, Error, Result, Simulatable};
use log::debug;
use std::{path::Path, process::ExitCode};

const USAGE: &str = "\
kleene <command> [args]

commands:
    regex <regex> <input>      test whether the regex matches the input
    test <dfa-file> <input>    test whether the dfa accepts the input
    minimize <dfa-file>        print the minimized dfa
    complete <dfa-file>        print the dfa completed with a sink state
    equiv <dfa-file> <dfa-file>
                               test whether both dfas accept the same language
    dot <dfa-file>             print the dfa in graphviz format
    regex-dot <regex>          print the nfa compiled from the regex in graphviz format";

#[derive(Debug)]
enum Command {
    Regex { regex: String, input: String },
    Test { dfa: String, input: String },
    Minimize { dfa: String },
    Complete { dfa: String },
    Equiv { lhs: String, rhs: String },
    Dot { dfa: String },
    RegexDot { regex: String },
}

impl Command {
    fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let command = args.next().ok_or_else(usage)?;
        let mut next = || args.next().ok_or_else(usage);

        let command = match command.as_str() {
            "regex" => Command::Regex {
                regex: next()?,
                input: next()?,
            },
            "test" => Command::Test {
                dfa: next()?,
                input: next()?,
            },
            "minimize" => Command::Minimize { dfa: next()? },
            "complete" => Command::Complete { dfa: next()? },
            "equiv" => Command::Equiv {
                lhs: next()?,
                rhs: next()?,
            },
            "dot" => Command::Dot { dfa: next()? },
            "regex-dot" => Command::RegexDot { regex: next()? },
            _ => return Err(usage()),
        };

        if args.next().is_some() {
            return Err(usage());
        }

        Ok(command)
    }

    fn run(self, config: &Config) -> Result<String> {
        debug!("running {:?}", self);

        let verdict = |accepted: bool, yes: &str, no: &str| match accepted {
            true => yes.to_string(),
            false => no.to_string(),
        };

        Ok(match self {
            Command::Regex { regex, input } => {
                let nfa = config.compile(&regex)?;
                verdict(nfa.accepts(input.chars()), "ACCEPTED", "REJECTED")
            }
            Command::Test { dfa, input } => {
                let dfa = read_dfa(&dfa, config)?;
                verdict(dfa.accepts(input.chars()), "ACCEPTED", "REJECTED")
            }
            Command::Minimize { dfa } => config.minimize(&read_dfa(&dfa, config)?)?.to_string(),
            Command::Complete { dfa } => config.complete(&read_dfa(&dfa, config)?)?.to_string(),
            Command::Equiv { lhs, rhs } => {
                let lhs = read_dfa(&lhs, config)?;
                let rhs = read_dfa(&rhs, config)?;
                verdict(
                    config.equivalent(&lhs, &rhs)?,
                    "EQUIVALENT",
                    "NOT EQUIVALENT",
                )
            }
            Command::Dot { dfa } => read_dfa(&dfa, config)?.to_dot(),
            Command::RegexDot { regex } => config.compile(&regex)?.to_dot(),
        })
    }
}

fn usage() -> Error {
    Error::Usage(USAGE.to_string())
}

fn read_dfa(path: impl AsRef<Path>, config: &Config) -> Result<Dfa> {
    let text = std::fs::read_to_string(path)?;
    let dfa = DfaDescription::from_sections(&text)?.parse()?;
    config.check_dfa(&dfa)?;
    Ok(dfa)
}

fn main() -> ExitCode {
    env_logger::init();

    let result = Config::from_env().and_then(|config| {
        Command::from_args(std::env::args().skip(1))?.run(&config)
    });

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
