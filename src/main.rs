use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use kiwi::evaluator::Evaluator;
use kiwi::native::global_env;
use kiwi::parser::produce_ast;

mod repl;

#[derive(Parser, Debug)]
#[clap(name = "kiwi", version, about = "A small dynamically-typed scripting language")]
struct Cli {
    /// Script to run; starts the REPL when omitted
    path: Option<PathBuf>,

    /// Evaluate SOURCE and print the resulting value
    #[clap(short, long, value_name = "SOURCE", conflicts_with = "path")]
    eval: Option<String>,

    /// Print the parsed AST instead of evaluating
    #[clap(long)]
    ast: bool,

    /// End the REPL session on the first failing line
    #[clap(long)]
    halt_on_error: bool,

    /// Disable colored output
    #[clap(long)]
    no_color: bool,

    #[clap(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Some(source) = &cli.eval {
        return run_source(source, cli.ast, true);
    }

    if let Some(path) = &cli.path {
        let source = fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
        return run_source(&source, cli.ast, false);
    }

    let options = repl::Options {
        show_ast: cli.ast,
        halt_on_error: cli.halt_on_error,
    };

    let stdin = io::stdin();
    repl::start(stdin.lock(), io::stdout(), &options)
}

fn run_source(source: &str, show_ast: bool, echo: bool) -> Result<()> {
    let program = produce_ast(source).map_err(kiwi::Error::from)?;

    if show_ast {
        println!("{:#?}", program);
        return Ok(());
    }

    let value = Evaluator::new(global_env()?)
        .eval(&program)
        .map_err(kiwi::Error::from)?;

    if echo {
        println!("{}", repl::highlight(&value));
    }

    Ok(())
}
