//! Line-oriented front end for the tokenizer and parser.
//!
//! By default every line read from standard input is tokenized and its
//! tokens are printed. With `--mode ast` the line is parsed instead and the
//! program rendering is printed, followed by any diagnostics.

use std::{
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::PathBuf,
    process,
};

use clap::{Parser as ClapParser, ValueEnum};
use frontend::{
    format_error,
    lexer::{lexer::Lexer, tokens::TokenKind},
    parser::parser::parse,
};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What to print for each input
    #[arg(short, long, value_enum, default_value_t = Mode::Tokens)]
    mode: Mode,

    /// Prompt shown before each line
    #[arg(short, long, default_value = ">> ")]
    prompt: String,

    /// Process this file once instead of reading lines interactively
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Print one `Type: <kind> Literal: <text>` line per token
    Tokens,
    /// Print the parsed program and its diagnostics
    Ast,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Some(path) = &args.input {
        let source = match read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error: can't read {:?}: {}", path, e);
                process::exit(1);
            }
        };
        let file_name = path.file_name().map(|name| name.to_string_lossy().into_owned());

        let mut out = io::stdout().lock();
        if let Err(e) = run(args.mode, source, file_name, &mut out) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    if let Err(e) = start(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Reads lines until an empty line or the end of standard input.
fn start(args: &Args) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    let mut line = String::new();

    loop {
        write!(out, "{}", args.prompt)?;
        out.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let source = line.trim_end_matches(&['\n', '\r'][..]);
        if source.is_empty() {
            return Ok(());
        }

        run(args.mode, source.to_string(), None, &mut out)?;
    }
}

fn run(mode: Mode, source: String, file: Option<String>, out: &mut impl Write) -> io::Result<()> {
    match mode {
        Mode::Tokens => {
            let mut lexer = Lexer::new(source, file);
            loop {
                let token = lexer.next_token();
                if token.is_one_of_many(&[TokenKind::EOF, TokenKind::Illegal]) {
                    break;
                }
                writeln!(out, "{}", token)?;
            }
        }
        Mode::Ast => {
            let (parser, program) = parse(source.clone(), file);
            writeln!(out, "{}", program)?;
            for error in parser.get_errors() {
                write!(out, "{}", format_error(error, &source))?;
            }
        }
    }

    Ok(())
}
