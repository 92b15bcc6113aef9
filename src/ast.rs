use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VarDeclaration {
        constant: bool,
        name: String,
        value: Option<Expression>,
    },
    FunctionDeclaration {
        name: String,
        parameters: Vec<String>,
        body: Vec<Statement>,
    },
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Assignment {
        target: Box<Expression>,
        value: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Member {
        object: Box<Expression>,
        property: Box<Expression>,
        computed: bool,
    },
    Identifier(String),
    Number(f64),
    Object(Vec<Property>),
}

/// An object literal entry; `value: None` is the shorthand `{ key }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Option<Expression>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Subtract),
            "*" => Some(BinaryOperator::Multiply),
            "/" => Some(BinaryOperator::Divide),
            "%" => Some(BinaryOperator::Modulo),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }

    pub fn is_additive(&self) -> bool {
        matches!(self, BinaryOperator::Add | BinaryOperator::Subtract)
    }
}

// The printed form is valid source: every compound sub-expression is
// parenthesized, so re-parsing it yields the same tree.

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, statement) in self.body.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", statement)?;
        }

        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::VarDeclaration { constant, name, value } => {
                let keyword = if *constant { "const" } else { "let" };
                match value {
                    Some(value) => write!(f, "{} {} = {};", keyword, name, value),
                    None => write!(f, "{} {};", keyword, name),
                }
            }
            Statement::FunctionDeclaration { name, parameters, body } => {
                write!(f, "fn {}({}) {{", name, parameters.join(", "))?;
                for statement in body {
                    write!(f, " {}", statement)?;
                }
                write!(f, " }}")
            }
            Statement::Expression(expression) => write!(f, "{};", expression),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Assignment { target, value } => write!(f, "({} = {})", target, value),
            Expression::Binary { left, operator, right } => {
                write!(f, "({} {} {})", left, operator.symbol(), right)
            }
            Expression::Call { callee, arguments } => {
                let arguments = arguments
                    .iter()
                    .map(|argument| argument.to_string())
                    .collect::<Vec<_>>();
                write!(f, "{}({})", callee, arguments.join(", "))
            }
            Expression::Member { object, property, computed: false } => write!(f, "{}.{}", object, property),
            Expression::Member { object, property, computed: true } => write!(f, "{}[{}]", object, property),
            Expression::Identifier(name) => f.write_str(name),
            Expression::Number(value) => write!(f, "{}", value),
            Expression::Object(properties) if properties.is_empty() => f.write_str("({})"),
            Expression::Object(properties) => {
                let properties = properties
                    .iter()
                    .map(|property| match &property.value {
                        Some(value) => format!("{}: {}", property.key, value),
                        None => property.key.clone(),
                    })
                    .collect::<Vec<_>>();
                write!(f, "({{ {} }})", properties.join(", "))
            }
        }
    }
}
