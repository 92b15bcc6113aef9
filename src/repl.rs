use std::io::{BufRead, Write};

use anyhow::Result;
use colored::Colorize;
use log::{info, warn};

use kiwi::evaluator::Evaluator;
use kiwi::native::global_env;
use kiwi::object::Object;
use kiwi::parser::produce_ast;

#[derive(Debug, Default)]
pub struct Options {
    pub show_ast: bool,
    pub halt_on_error: bool,
}

/// Reads one line at a time and evaluates it against a single root scope
/// that persists for the whole session.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W, options: &Options) -> Result<()> {
    info!("Starting REPL");
    let mut evaluator = Evaluator::new(global_env()?);

    writeln!(output, "kiwi v{} (type `exit` to quit)", env!("CARGO_PKG_VERSION"))?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            break;
        }

        match evaluate_line(&mut evaluator, line, options) {
            Ok(rendered) => writeln!(output, "{}", rendered)?,
            Err(error) => {
                writeln!(output, "{} {}", "error:".red().bold(), error)?;
                if options.halt_on_error {
                    return Err(error.into());
                }
                warn!("Recovered from failed input: {}", line);
            }
        }
    }

    Ok(())
}

fn evaluate_line(evaluator: &mut Evaluator, line: &str, options: &Options) -> Result<String, kiwi::Error> {
    let program = produce_ast(line)?;

    if options.show_ast {
        return Ok(format!("{:#?}", program));
    }

    let value = evaluator.eval(&program)?;
    Ok(highlight(&value))
}

pub fn highlight(value: &Object) -> String {
    let text = value.to_string();

    match value {
        Object::Null => text.cyan().to_string(),
        Object::Number(_) => text.yellow().to_string(),
        Object::Boolean(_) => text.magenta().to_string(),
        Object::Native(_) | Object::Function(_) => text.green().to_string(),
        Object::Object(_) => text,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn session(input: &str, options: &Options) -> (Result<()>, String) {
        colored::control::set_override(false);

        let mut output = Vec::new();
        let result = start(Cursor::new(input), &mut output, options);

        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn scope_persists_between_lines() {
        let (result, output) = session("let x = 1;\nfn inc() { x = x + 1 }\ninc()\nx * 10\n", &Options::default());

        assert!(result.is_ok());
        assert!(output.contains("> 2\n"), "{}", output);
        assert!(output.contains("> 20\n"), "{}", output);
    }

    #[test]
    fn recovers_from_errors() {
        let input = "let x = 1;\nx $ 1\nconst y;\nmissing\nx + 1\n";
        let (result, output) = session(input, &Options::default());

        assert!(result.is_ok());
        assert!(output.contains("error: Parse error: Unrecognized character '$' at position 2"), "{}", output);
        assert!(output.contains("error: Parse error: Constant 'y' must be initialized"), "{}", output);
        assert!(output.contains("error: Runtime error: Cannot resolve 'missing'"), "{}", output);
        assert!(output.contains("> 2\n"), "{}", output);
    }

    #[test]
    fn runaway_recursion_does_not_end_the_session() {
        let (result, output) = session("fn f() { f() }\nf()\n1 + 1\n", &Options::default());

        assert!(result.is_ok());
        assert!(output.contains("error: Runtime error: Maximum call depth of 128 exceeded calling 'f'"), "{}", output);
        assert!(output.contains("> 2\n"), "{}", output);
    }

    #[test]
    fn halt_on_error_stops_the_session() {
        let options = Options {
            halt_on_error: true,
            ..Options::default()
        };
        let (result, output) = session("1 +\n5\n", &options);

        assert!(result.is_err());
        assert!(!output.contains("> 5"), "{}", output);
    }

    #[test]
    fn exit_ends_the_session() {
        let (result, output) = session("1\nexit\n2\n", &Options::default());

        assert!(result.is_ok());
        assert!(output.contains("> 1\n"));
        assert!(!output.contains("> 2\n"));
    }

    #[test]
    fn show_ast() {
        let options = Options {
            show_ast: true,
            ..Options::default()
        };
        let (_, output) = session("let a = 1;\n", &options);

        assert!(output.contains("VarDeclaration"), "{}", output);
    }

    #[test]
    fn highlight_renders_plain_text_without_colors() {
        colored::control::set_override(false);

        assert_eq!(highlight(&Object::Null), "null");
        assert_eq!(highlight(&Object::Number(1.5)), "1.5");
    }
}
