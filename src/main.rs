use std::{
    collections::HashMap,
    fs::read_to_string,
    io::{self, BufRead, Write},
    mem,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use env_logger::{Builder, Env};
use log::{error, info, warn, LevelFilter};

use interpreter::{
    display_error,
    driver::{
        console::{Console, StdConsole},
        session::{FragmentOutcome, Session, SessionConfig},
    },
    errors::errors::Error,
};

/// Fragment name to source text, for rendering diagnostics.
type Sources = HashMap<String, String>;

#[derive(Parser, Debug)]
#[command(name = "interpreter", version, about = "Incremental interpreter for a small C-like language")]
struct Cli {
    /// Source file to run. Starts the interactive shell when omitted.
    file: Option<PathBuf>,

    /// Reject only the offending fragment on a name error instead of ending the session.
    #[arg(long)]
    recover: bool,

    #[arg(long, default_value_t = 256)]
    max_call_depth: usize,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = SessionConfig {
        recover_name_errors: cli.recover,
        max_call_depth: cli.max_call_depth,
    };
    let mut session = Session::with_config(StdConsole::new(), config);

    let code = match &cli.file {
        Some(path) => run_file(&mut session, path),
        None => run_shell(&mut session),
    };

    session.close();
    process::exit(code);
}

fn init_logging(verbosity: u8) {
    let mut builder = Builder::from_env(Env::default().filter_or("INTERP_LOG", "warn"));

    match verbosity {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }

    builder.init();
}

fn run_file<C: Console>(session: &mut Session<C>, path: &Path) -> i32 {
    let source = match read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            error!("failed to read {}: {}", path.display(), err);
            return 2;
        }
    };

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    info!("running {}", name);

    let mut sources = Sources::new();
    sources.insert(name.clone(), source.clone());

    match session.submit_named(&source, &name) {
        Ok(outcomes) => {
            report(&outcomes, &sources);
            0
        }
        Err(error) => {
            eprint!("{}", render(&error, &sources));
            1
        }
    }
}

fn run_shell<C: Console>(session: &mut Session<C>) -> i32 {
    println!("Welcome to dragoninterp!");

    let stdin = io::stdin();
    let mut sources = Sources::new();
    let mut buffer = String::new();
    let mut open_braces: i64 = 0;
    let mut turn = 0;

    loop {
        prompt(if buffer.is_empty() { "> " } else { ". " });

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error!("failed to read input: {}", err);
                return 1;
            }
        }

        if buffer.is_empty() {
            match line.trim() {
                "quit" => break,
                ":program" => {
                    print!("{}", session.program());
                    continue;
                }
                ":symbols" => {
                    print!("{}", session.table());
                    continue;
                }
                "" => continue,
                _ => {}
            }
        }

        open_braces += brace_balance(&line);
        buffer.push_str(&line);

        if open_braces > 0 {
            continue;
        }
        open_braces = 0;

        turn += 1;
        let name = format!("shell:{}", turn);
        let source = mem::take(&mut buffer);
        sources.insert(name.clone(), source.clone());

        match session.submit_named(&source, &name) {
            Ok(outcomes) => report(&outcomes, &sources),
            Err(error) => {
                eprint!("{}", render(&error, &sources));
                return 1;
            }
        }
    }

    0
}

fn prompt(text: &str) {
    let mut stdout = io::stdout();
    if let Err(err) = write!(stdout, "{}", text).and_then(|_| stdout.flush()) {
        warn!("failed to write prompt: {}", err);
    }
}

/// Net `{` minus `}` on a line.
fn brace_balance(line: &str) -> i64 {
    line.chars().fold(0, |balance, ch| match ch {
        '{' => balance + 1,
        '}' => balance - 1,
        _ => balance,
    })
}

fn report(outcomes: &[FragmentOutcome], sources: &Sources) {
    for outcome in outcomes {
        match outcome {
            FragmentOutcome::Declared | FragmentOutcome::Executed => {}
            FragmentOutcome::TypeErrors(errors) => {
                for error in errors {
                    eprint!("{}", render(error, sources));
                }
            }
            FragmentOutcome::RuntimeError(error) | FragmentOutcome::NameError(error) => {
                eprint!("{}", render(error, sources));
            }
        }
    }
}

/// Caret diagnostic against the fragment the error points into.
fn render(error: &Error, sources: &Sources) -> String {
    match sources.get(error.get_position().1.as_str()) {
        Some(source) => display_error(error, source),
        None => format!("Error: {} ({})\n", error.get_error_name(), error),
    }
}
