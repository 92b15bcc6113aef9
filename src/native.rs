use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;
use log::debug;

use crate::env::Env;
use crate::error::RuntimeError;
use crate::object::Object;

/// Builds a root scope holding `true`, `false`, `null`, `print` and `time`.
pub fn global_env() -> Result<Rc<RefCell<Env>>, RuntimeError> {
  let mut env = Env::new();

  env.declare_var("true", Object::Boolean(true), true)?;
  env.declare_var("false", Object::Boolean(false), true)?;
  env.declare_var("null", Object::Null, true)?;

  env.define_native("print", native_print)?;
  env.define_native("time", native_time)?;

  Ok(Rc::new(RefCell::new(env)))
}

fn native_print(args: Vec<Object>, _: &Rc<RefCell<Env>>) -> Result<Object, RuntimeError> {
  println!("{}", args.iter().map(|arg| arg.to_string()).collect::<Vec<_>>().join(" "));

  Ok(Object::Null)
}

fn native_time(_: Vec<Object>, _: &Rc<RefCell<Env>>) -> Result<Object, RuntimeError> {
  let now = Local::now().timestamp_millis();
  debug!("time() = {}", now);

  Ok(Object::Number(now as f64))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtins_are_constants() {
    let env = global_env().unwrap();

    for name in ["true", "false", "null", "print", "time"] {
      assert!(env.borrow().is_constant(name), "{} should be constant", name);
    }

    assert_eq!(Env::lookup_var(&env, "true"), Ok(Object::Boolean(true)));
    assert_eq!(Env::lookup_var(&env, "false"), Ok(Object::Boolean(false)));
    assert_eq!(Env::lookup_var(&env, "null"), Ok(Object::Null));
  }

  #[test]
  fn time_is_epoch_millis() {
    let env = global_env().unwrap();
    let before = Local::now().timestamp_millis() as f64;

    match native_time(Vec::new(), &env) {
      Ok(Object::Number(now)) => assert!(now >= before),
      other => panic!("unexpected time() result {:?}", other),
    }
  }

  #[test]
  fn print_returns_null() {
    let env = global_env().unwrap();

    assert_eq!(native_print(vec![Object::Number(1.0), Object::Null], &env), Ok(Object::Null));
  }
}
