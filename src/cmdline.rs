use crate::environment::Environment;
use crate::interpreter;
use ansi_term::Colour;
use derive_more::From;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::fmt;
use std::fs::read_to_string;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, From)]
pub enum Error {
    Io(std::io::Error),
    Interpreter(interpreter::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Interpreter(e) => write!(f, "{}", e),
        }
    }
}

pub fn setup() -> std::io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("lispr")?;
    interface.set_prompt("lispr> ")?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".lispr_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> std::io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

pub fn repl<T: Terminal>(interface: &Interface<T>, processor: impl Fn(&str) -> Option<String>) {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                interface.add_history_unique(line.clone());
                if let Some(output) = processor(&line) {
                    writeln!(interface, "{}", output).ok();
                }
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

fn describe_error(e: &interpreter::Error) -> String {
    let text = format!("Error: {}", e);
    match atty::is(atty::Stream::Stdout) {
        true => Colour::Red.paint(text).to_string(),
        false => text,
    }
}

/// One statement per line; the REPL keeps going after an error.
pub fn rep_or_report(line: &str, env: &Rc<Environment>) -> Option<String> {
    match interpreter::rep(line, env) {
        Ok(output) => output,
        Err(e) => Some(describe_error(&e)),
    }
}

/// Runs each non-blank line of a file against `env`, stopping at the first error.
pub fn run_file(path: &str, env: &Rc<Environment>) -> Result<(), Error> {
    log::info!("running {}", path);
    let source = read_to_string(path)?;
    for (number, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match interpreter::rep(line, env) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => (),
            Err(e) => {
                log::error!("{}:{}: {}", path, number + 1, e);
                eprintln!("{}", describe_error(&e));
                return Err(e.into());
            }
        }
    }
    Ok(())
}

pub fn launch(args: Vec<String>, env: &Rc<Environment>) -> Result<(), Error> {
    match args.get(1) {
        Some(path) => run_file(path, env),
        None => {
            log::info!("starting REPL");
            let interface = setup()?;
            repl(&interface, |line| rep_or_report(line, env));
            save_history(&interface)?;
            Ok(())
        }
    }
}
