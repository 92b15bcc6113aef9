use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::ast::{BinaryOperator, Expression, Program, Property, Statement};
use crate::env::Env;
use crate::error::RuntimeError;
use crate::object::{set_property, Function, Object, Properties};

/// Deepest chain of nested user function calls before evaluation gives up.
pub const MAX_CALL_DEPTH: usize = 128;

#[derive(Debug)]
pub struct Evaluator {
  pub env: Rc<RefCell<Env>>,
  depth: usize,
}

impl Evaluator {
  pub fn new(env: Rc<RefCell<Env>>) -> Self {
    Evaluator {
      env,
      depth: 0,
    }
  }

  /// Evaluates every statement in order; the program's value is the last one's.
  pub fn eval(&mut self, program: &Program) -> Result<Object, RuntimeError> {
    debug!("Evaluating program of {} statements", program.body.len());

    self.eval_block(&program.body)
  }

  fn eval_block(&mut self, statements: &[Statement]) -> Result<Object, RuntimeError> {
    let mut result = Object::Null;

    for statement in statements {
      result = self.eval_statement(statement)?;
    }

    Ok(result)
  }

  pub fn eval_statement(&mut self, statement: &Statement) -> Result<Object, RuntimeError> {
    match statement {
      Statement::VarDeclaration { constant, name, value } => {
        let value = match value {
          Some(expression) => self.eval_expression(expression)?,
          None => Object::Null,
        };

        self.env.borrow_mut().declare_var(name, value, *constant)
      }
      Statement::FunctionDeclaration { name, parameters, body } => {
        let function = Function {
          name: name.clone(),
          parameters: parameters.clone(),
          env: Rc::clone(&self.env),
          body: body.clone(),
        };

        self.env.borrow_mut().declare_var(name, Object::Function(Rc::new(function)), true)
      }
      Statement::Expression(expression) => self.eval_expression(expression),
    }
  }

  pub fn eval_expression(&mut self, expression: &Expression) -> Result<Object, RuntimeError> {
    match expression {
      Expression::Number(value) => Ok(Object::Number(*value)),
      Expression::Identifier(name) => Env::lookup_var(&self.env, name),
      Expression::Object(properties) => self.eval_object_expression(properties),
      Expression::Binary { left, operator, right } => {
        let left = self.eval_expression(left)?;
        let right = self.eval_expression(right)?;

        Ok(Self::eval_binary_expression(left, *operator, right))
      }
      Expression::Assignment { target, value } => self.eval_assignment_expression(target, value),
      Expression::Member { object, property, computed } => {
        self.eval_member_expression(object, property, *computed)
      }
      Expression::Call { callee, arguments } => self.eval_call_expression(callee, arguments),
    }
  }

  fn eval_binary_expression(left: Object, op: BinaryOperator, right: Object) -> Object {
    match (left, right) {
      (Object::Number(left), Object::Number(right)) => {
        let result = match op {
          BinaryOperator::Add => left + right,
          BinaryOperator::Subtract => left - right,
          BinaryOperator::Multiply => left * right,
          BinaryOperator::Divide => left / right,
          BinaryOperator::Modulo => left % right,
        };
        Object::Number(result)
      }
      (left, right) => {
        debug!(
          "Non-numeric operands {} {} {} evaluate to null",
          left.type_name(),
          op.symbol(),
          right.type_name()
        );
        Object::Null
      }
    }
  }

  fn eval_object_expression(&mut self, properties: &[Property]) -> Result<Object, RuntimeError> {
    let mut object = Properties::new();

    for property in properties {
      let value = match &property.value {
        Some(expression) => self.eval_expression(expression)?,
        None => Env::lookup_var(&self.env, &property.key)?,
      };
      set_property(&mut object, property.key.clone(), value);
    }

    Ok(Object::Object(object))
  }

  fn eval_assignment_expression(&mut self, target: &Expression, value: &Expression) -> Result<Object, RuntimeError> {
    let name = match target {
      Expression::Identifier(name) => name,
      _ => return Err(RuntimeError::InvalidAssignmentTarget { target: target.to_string() }),
    };

    let value = self.eval_expression(value)?;
    Env::assign_var(&self.env, name, value)
  }

  fn eval_member_expression(&mut self, object: &Expression, property: &Expression, computed: bool) -> Result<Object, RuntimeError> {
    let object = self.eval_expression(object)?;

    let key = match (computed, property) {
      (false, Expression::Identifier(name)) => name.clone(),
      (false, _) => return Err(RuntimeError::InvalidPropertyKey { type_name: "expression".to_owned() }),
      (true, expression) => match self.eval_expression(expression)? {
        Object::Number(number) => number.to_string(),
        other => return Err(RuntimeError::InvalidPropertyKey { type_name: other.type_name().to_owned() }),
      },
    };

    match object {
      Object::Object(_) => Ok(object.property(&key).cloned().unwrap_or(Object::Null)),
      other => Err(RuntimeError::NotAnObject {
        property: key,
        type_name: other.type_name().to_owned(),
      }),
    }
  }

  fn eval_call_expression(&mut self, callee: &Expression, arguments: &[Expression]) -> Result<Object, RuntimeError> {
    let function = self.eval_expression(callee)?;

    let mut args = Vec::with_capacity(arguments.len());
    for argument in arguments {
      args.push(self.eval_expression(argument)?);
    }

    match function {
      Object::Native(native) => {
        debug!("Calling native {}() with {} arguments", native.name, args.len());
        (native.call)(args, &self.env)
      }
      Object::Function(function) => self.call_function(&function, args),
      other => Err(RuntimeError::NotCallable {
        callee: callee.to_string(),
        type_name: other.type_name().to_owned(),
      }),
    }
  }

  // Missing arguments bind to null, extra ones are dropped.
  fn call_function(&self, function: &Function, args: Vec<Object>) -> Result<Object, RuntimeError> {
    if self.depth >= MAX_CALL_DEPTH {
      return Err(RuntimeError::CallDepthExceeded {
        name: function.name.clone(),
        limit: MAX_CALL_DEPTH,
      });
    }
    debug!("Calling {}() with {} arguments", function.name, args.len());

    let scope = Rc::new(RefCell::new(Env::new_with_parent(Rc::clone(&function.env))));

    let mut args = args.into_iter();
    for parameter in &function.parameters {
      let value = args.next().unwrap_or(Object::Null);
      scope.borrow_mut().declare_var(parameter, value, false)?;
    }

    Evaluator {
      env: scope,
      depth: self.depth + 1,
    }
    .eval_block(&function.body)
  }
}
