use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::trace;

use crate::error::RuntimeError;
use crate::object::{NativeFunction, Object};

type Objects = HashMap<String, Object>;

/// One lexical scope. Children hold a shared handle to their parent, so a
/// scope captured by a function lives as long as the function does.
#[derive(Debug, Default)]
pub struct Env {
  objects: Objects,
  constants: HashSet<String>,
  parent: Option<Rc<RefCell<Env>>>,
}

impl Env {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn new_with_parent(parent: Rc<RefCell<Env>>) -> Self {
    Self {
      parent: Some(parent),
      ..Self::default()
    }
  }

  pub fn parent(&self) -> Option<&Rc<RefCell<Env>>> {
    self.parent.as_ref()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.objects.contains_key(name)
  }

  pub fn is_constant(&self, name: &str) -> bool {
    self.constants.contains(name)
  }

  /// Declares `name` in this scope only; ancestors may hold the same name.
  pub fn declare_var(&mut self, name: &str, value: Object, constant: bool) -> Result<Object, RuntimeError> {
    if self.objects.contains_key(name) {
      return Err(RuntimeError::Redeclaration { name: name.to_owned() });
    }

    trace!("declare {}{} = {}", if constant { "const " } else { "" }, name, value);

    self.objects.insert(name.to_owned(), value.clone());
    if constant {
      self.constants.insert(name.to_owned());
    }

    Ok(value)
  }

  /// Declares a host callback as a constant.
  pub fn define_native<F>(&mut self, name: &str, call: F) -> Result<Object, RuntimeError>
  where
    F: Fn(Vec<Object>, &Rc<RefCell<Env>>) -> Result<Object, RuntimeError> + 'static,
  {
    let native = NativeFunction {
      name: name.to_owned(),
      call: Rc::new(call),
    };

    self.declare_var(name, Object::Native(Rc::new(native)), true)
  }

  /// Finds the nearest scope, starting at `env`, that declares `name`.
  pub fn resolve(env: &Rc<RefCell<Env>>, name: &str) -> Result<Rc<RefCell<Env>>, RuntimeError> {
    let mut current = Rc::clone(env);

    loop {
      if current.borrow().contains(name) {
        return Ok(current);
      }

      let parent = current.borrow().parent.clone();
      match parent {
        Some(parent) => current = parent,
        None => return Err(RuntimeError::UnresolvedName { name: name.to_owned() }),
      }
    }
  }

  pub fn assign_var(env: &Rc<RefCell<Env>>, name: &str, value: Object) -> Result<Object, RuntimeError> {
    let owner = Self::resolve(env, name)?;
    let mut owner = owner.borrow_mut();

    if owner.is_constant(name) {
      return Err(RuntimeError::ConstantAssignment { name: name.to_owned() });
    }

    trace!("assign {} = {}", name, value);
    owner.objects.insert(name.to_owned(), value.clone());

    Ok(value)
  }

  pub fn lookup_var(env: &Rc<RefCell<Env>>, name: &str) -> Result<Object, RuntimeError> {
    let owner = Self::resolve(env, name)?;
    let value = owner.borrow().objects.get(name).cloned();

    value.ok_or_else(|| RuntimeError::UnresolvedName { name: name.to_owned() })
  }
}
