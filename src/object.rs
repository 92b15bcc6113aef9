use std::cell::RefCell;
use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;

use crate::ast::Statement;
use crate::env::Env;
use crate::error::RuntimeError;

/// Object properties in insertion order.
pub type Properties = Vec<(String, Object)>;

pub type NativeCall = Rc<dyn Fn(Vec<Object>, &Rc<RefCell<Env>>) -> Result<Object, RuntimeError>>;

#[derive(Clone)]
pub struct NativeFunction {
  pub name: String,
  pub call: NativeCall,
}

/// A user function. `env` is the scope the declaration was evaluated in.
pub struct Function {
  pub name: String,
  pub parameters: Vec<String>,
  pub env: Rc<RefCell<Env>>,
  pub body: Vec<Statement>,
}

#[derive(Debug, Clone)]
pub enum Object {
  Null,
  Number(f64),
  Boolean(bool),
  Object(Properties),
  Native(Rc<NativeFunction>),
  Function(Rc<Function>),
}

impl Object {
  pub fn type_name(&self) -> &'static str {
    match self {
      Object::Null => "null",
      Object::Number(_) => "number",
      Object::Boolean(_) => "boolean",
      Object::Object(_) => "object",
      Object::Native(_) => "native-fn",
      Object::Function(_) => "function",
    }
  }

  pub fn property(&self, key: &str) -> Option<&Object> {
    match self {
      Object::Object(properties) => properties
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value),
      _ => None,
    }
  }
}

/// Sets `key`, replacing an earlier entry in place so the first position wins.
pub fn set_property(properties: &mut Properties, key: String, value: Object) {
  match properties.iter_mut().find(|(name, _)| *name == key) {
    Some(entry) => entry.1 = value,
    None => properties.push((key, value)),
  }
}

impl PartialEq for Object {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Object::Null, Object::Null) => true,
      (Object::Number(left), Object::Number(right)) => left == right,
      (Object::Boolean(left), Object::Boolean(right)) => left == right,
      (Object::Object(left), Object::Object(right)) => {
        left.len() == right.len()
          && left.iter().all(|(key, value)| other.property(key) == Some(value))
      }
      (Object::Native(left), Object::Native(right)) => Rc::ptr_eq(left, right),
      (Object::Function(left), Object::Function(right)) => Rc::ptr_eq(left, right),
      _ => false,
    }
  }
}

impl fmt::Debug for NativeFunction {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("NativeFunction").field("name", &self.name).finish()
  }
}

// The captured environment usually contains the function itself.
impl fmt::Debug for Function {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("Function")
      .field("name", &self.name)
      .field("parameters", &self.parameters)
      .finish_non_exhaustive()
  }
}

impl fmt::Display for Object {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Object::Null => f.write_str("null"),
      Object::Number(n) => write!(f, "{}", n),
      Object::Boolean(b) => write!(f, "{}", b),
      Object::Object(properties) if properties.is_empty() => f.write_str("{}"),
      Object::Object(properties) => {
        f.write_str("{ ")?;
        for (index, (key, value)) in properties.iter().enumerate() {
          if index > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{}: {}", key, value)?;
        }
        f.write_str(" }")
      }
      Object::Native(native) => write!(f, "{}() {{ [native code] }}", native.name),
      Object::Function(function) => {
        write!(f, "fn {}({}) {{ [code] }}", function.name, function.parameters.join(", "))
      }
    }
  }
}
