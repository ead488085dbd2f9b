use bulang::{parser, scanner, Error, Interpreter};

use anyhow::Context;
use clap::{App, Arg, ErrorKind};
use tracing::{debug, Level};

use std::fs;
use std::io::{self, Write};

const SEPARATOR_WIDTH: usize = 30;

// Exit codes, following sysexits.h.
const EXIT_USAGE: i32 = 64;
const EXIT_SYNTAX: i32 = 65;
const EXIT_RUNTIME: i32 = 70;
const EXIT_IO: i32 = 74;

fn cli() -> App<'static, 'static> {
    App::new("bulang")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("script")
                .help("Script to run; starts an interactive prompt when omitted")
                .index(1),
        )
        .arg(
            Arg::with_name("echo")
                .long("echo")
                .help("Print the source under 'Code:' before its output"),
        )
        .arg(
            Arg::with_name("ast")
                .long("ast")
                .help("Print the parsed syntax tree instead of running the script"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log pipeline activity to stderr (repeat for more detail)"),
        )
}

fn main() {
    let matches = match cli().get_matches_safe() {
        Ok(matches) => matches,
        Err(e) => match usage_exit_code(&e) {
            Some(code) => {
                eprintln!("{}", e.message);
                std::process::exit(code);
            }
            None => e.exit(),
        },
    };

    init_logging(matches.occurrences_of("verbose"));

    let result = match matches.value_of("script") {
        Some(path) => run_file(path, matches.is_present("echo"), matches.is_present("ast")),
        None => run_prompt(),
    };
    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    }
}

/// Help and version requests are not failures and keep clap's own exit.
fn usage_exit_code(e: &clap::Error) -> Option<i32> {
    match e.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => None,
        _ => Some(EXIT_USAGE),
    }
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run_file(path: &str, echo: bool, print_ast: bool) -> anyhow::Result<i32> {
    let source = fs::read_to_string(path).with_context(|| format!("could not read {}", path))?;
    debug!(path, bytes = source.len(), "loaded script");
    let stdout = io::stdout();
    let code = run_source(&source, echo, print_ast, stdout.lock())?;
    Ok(code)
}

/// Runs (or with `print_ast`, only parses) `source`, writing everything but
/// diagnostics to `out`. Returns the process exit code.
fn run_source<W: Write>(source: &str, echo: bool, print_ast: bool, mut out: W) -> io::Result<i32> {
    if print_ast {
        return match syntax_tree(source) {
            Ok(tree) => {
                write!(out, "{}", tree)?;
                Ok(0)
            }
            Err(e) => Ok(report(&e)),
        };
    }

    if echo {
        writeln!(out, "Code:")?;
        writeln!(out, "{}", source.trim())?;
        writeln!(out)?;
        writeln!(out, "Output:")?;
    }
    let code = match bulang::run(source, &mut out) {
        Ok(value) => {
            debug!(%value, "script finished");
            0
        }
        Err(e) => report(&e),
    };
    if echo {
        writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    }
    Ok(code)
}

fn syntax_tree(source: &str) -> Result<String, Error> {
    let tokens = scanner::tokenize(source)?;
    let program = parser::parse(&tokens)?;
    Ok(program.to_string())
}

fn run_prompt() -> anyhow::Result<i32> {
    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(stdout);
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin()
            .read_line(&mut line)
            .context("failed to read line")?
            == 0
        {
            println!();
            return Ok(0);
        }
        if let Err(e) = interpreter.run(&line) {
            report(&e);
        }
    }
}

/// Prints the error and returns the exit code for its kind.
fn report(e: &Error) -> i32 {
    eprintln!("{}", e);
    match e {
        Error::Lex(_) | Error::Parse(_) => EXIT_SYNTAX,
        Error::Runtime(_) => EXIT_RUNTIME,
    }
}
