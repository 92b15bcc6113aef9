use std::cell::RefCell;
use std::rc::Rc;

pub mod ast;
pub mod token;
pub mod lexer;
pub mod parser;
pub mod object;
pub mod evaluator;
pub mod env;
pub mod native;
pub mod error;

pub use error::Error;

use crate::env::Env;
use crate::evaluator::Evaluator;
use crate::object::Object;

/// Parses and evaluates `source` against `env`, returning the value of the
/// last statement.
pub fn run(source: &str, env: &Rc<RefCell<Env>>) -> Result<Object, Error> {
    let program = parser::produce_ast(source)?;
    let value = Evaluator::new(Rc::clone(env)).eval(&program)?;

    Ok(value)
}
