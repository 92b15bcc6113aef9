use log::debug;

use crate::ast::{BinaryOperator, Expression, Program, Property, Statement};
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Deepest nesting of expressions, object literals and function bodies a
/// single unit may contain.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Tokenizes and parses a whole evaluation unit.
pub fn produce_ast(source: &str) -> Result<Program, ParseError> {
    let tokens = Lexer::new(source).lex()?;
    debug!("Lexed {} tokens", tokens.len());

    Parser::new(tokens).parse()
}

/// Recursive-descent parser with one token of lookahead.
///
/// Expression tiers, loosest first: assignment, object literal, additive,
/// multiplicative, call/member, primary.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let terminated = tokens
            .last()
            .map_or(false, |token| token.kind == TokenKind::EndOfInput);

        if !terminated {
            let end = tokens.last().map_or(0, |token| token.span.1);
            tokens.push(Token::end_of_input(end));
        }

        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();

        while !self.at_end() {
            body.push(self.parse_statement()?);
        }

        Ok(Program { body })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfInput
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    // Never moves past the terminal EndOfInput token.
    fn consume(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if token.kind != TokenKind::EndOfInput {
            self.position += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            return Ok(self.consume());
        }

        let found = self.peek();
        Err(ParseError::UnexpectedToken {
            expected: kind,
            found: found.to_string(),
            position: found.position(),
        })
    }

    // Bounds recursion across nested expressions, object literals and bodies.
    fn nested<T>(&mut self, parse: fn(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                position: self.peek().position(),
            });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;

        result
    }

    fn peek_operator(&self, accept: fn(&BinaryOperator) -> bool) -> Option<BinaryOperator> {
        let token = self.peek();
        if token.kind != TokenKind::BinaryOperator {
            return None;
        }

        BinaryOperator::from_symbol(&token.value).filter(accept)
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek().kind {
            TokenKind::Let | TokenKind::Const => self.parse_var_declaration(),
            TokenKind::Fn => self.parse_function_declaration(),
            _ => {
                let expression = self.parse_expression()?;
                if self.check(TokenKind::Semicolon) {
                    self.consume();
                }
                Ok(Statement::Expression(expression))
            }
        }
    }

    // (let | const) IDENT ( = EXPR )? ;
    fn parse_var_declaration(&mut self) -> Result<Statement, ParseError> {
        let constant = self.consume().kind == TokenKind::Const;
        let name = self.expect(TokenKind::Identifier)?.value;

        if self.check(TokenKind::Semicolon) {
            self.consume();
            if constant {
                return Err(ParseError::UninitializedConstant { name });
            }

            return Ok(Statement::VarDeclaration {
                constant: false,
                name,
                value: None,
            });
        }

        self.expect(TokenKind::Equals)?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Statement::VarDeclaration {
            constant,
            name,
            value: Some(value),
        })
    }

    // fn IDENT ( IDENT, ... ) { STMT* }
    fn parse_function_declaration(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Fn)?;
        let name = self.expect(TokenKind::Identifier)?.value;

        self.expect(TokenKind::OpenParen)?;
        let mut parameters: Vec<String> = Vec::new();
        if !self.check(TokenKind::CloseParen) {
            loop {
                let parameter = self.expect(TokenKind::Identifier)?.value;
                if parameters.contains(&parameter) {
                    return Err(ParseError::DuplicateParameter {
                        function: name,
                        name: parameter,
                    });
                }
                parameters.push(parameter);

                if !self.check(TokenKind::Comma) {
                    break;
                }
                self.consume();
            }
        }
        self.expect(TokenKind::CloseParen)?;

        self.expect(TokenKind::OpenBrace)?;
        let mut body = Vec::new();
        while !self.check(TokenKind::CloseBrace) && !self.at_end() {
            body.push(self.nested(Self::parse_statement)?);
        }
        self.expect(TokenKind::CloseBrace)?;

        Ok(Statement::FunctionDeclaration {
            name,
            parameters,
            body,
        })
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_assignment_expression()
    }

    // Right-associative; the target is only checked at evaluation time.
    fn parse_assignment_expression(&mut self) -> Result<Expression, ParseError> {
        self.nested(Self::parse_assignment)
    }

    fn parse_assignment(&mut self) -> Result<Expression, ParseError> {
        let left = self.parse_object_expression()?;

        if self.check(TokenKind::Equals) {
            self.consume();
            let value = self.parse_assignment_expression()?;

            return Ok(Expression::Assignment {
                target: Box::new(left),
                value: Box::new(value),
            });
        }

        Ok(left)
    }

    fn parse_object_expression(&mut self) -> Result<Expression, ParseError> {
        if !self.check(TokenKind::OpenBrace) {
            return self.parse_additive_expression();
        }

        self.nested(Self::parse_object_literal)
    }

    fn parse_object_literal(&mut self) -> Result<Expression, ParseError> {
        self.expect(TokenKind::OpenBrace)?;

        let mut properties = Vec::new();

        while !self.check(TokenKind::CloseBrace) && !self.at_end() {
            let key = self.expect(TokenKind::Identifier)?.value;

            // { key, } and { key }
            if self.check(TokenKind::Comma) {
                self.consume();
                properties.push(Property { key, value: None });
                continue;
            } else if self.check(TokenKind::CloseBrace) {
                properties.push(Property { key, value: None });
                continue;
            }

            self.expect(TokenKind::Colon)?;
            let value = self.parse_object_expression()?;
            properties.push(Property {
                key,
                value: Some(value),
            });

            if !self.check(TokenKind::CloseBrace) {
                self.expect(TokenKind::Comma)?;
            }
        }

        self.expect(TokenKind::CloseBrace)?;

        Ok(Expression::Object(properties))
    }

    fn parse_additive_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_multiplicative_expression()?;

        while let Some(operator) = self.peek_operator(BinaryOperator::is_additive) {
            self.consume();
            let right = self.parse_multiplicative_expression()?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_call_member_expression()?;

        while let Some(operator) = self.peek_operator(|operator| !operator.is_additive()) {
            self.consume();
            let right = self.parse_call_member_expression()?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    // foo.bar, foo[bar], foo(), chained left to right: a.b()(), a[b].c
    fn parse_call_member_expression(&mut self) -> Result<Expression, ParseError> {
        let mut expression = self.parse_primary_expression()?;

        loop {
            match self.peek().kind {
                TokenKind::Dot => {
                    self.consume();
                    let position = self.peek().position();
                    let property = self.parse_primary_expression()?;

                    if !matches!(property, Expression::Identifier(_)) {
                        return Err(ParseError::InvalidDotProperty {
                            found: property.to_string(),
                            position,
                        });
                    }

                    expression = Expression::Member {
                        object: Box::new(expression),
                        property: Box::new(property),
                        computed: false,
                    };
                }
                TokenKind::OpenBracket => {
                    self.consume();
                    let property = self.parse_expression()?;
                    self.expect(TokenKind::CloseBracket)?;

                    expression = Expression::Member {
                        object: Box::new(expression),
                        property: Box::new(property),
                        computed: true,
                    };
                }
                TokenKind::OpenParen => {
                    let arguments = self.parse_arguments()?;

                    expression = Expression::Call {
                        callee: Box::new(expression),
                        arguments,
                    };
                }
                _ => break,
            }
        }

        Ok(expression)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
        self.expect(TokenKind::OpenParen)?;

        let mut arguments = Vec::new();
        if !self.check(TokenKind::CloseParen) {
            arguments.push(self.parse_assignment_expression()?);
            while self.check(TokenKind::Comma) {
                self.consume();
                arguments.push(self.parse_assignment_expression()?);
            }
        }

        self.expect(TokenKind::CloseParen)?;

        Ok(arguments)
    }

    fn parse_primary_expression(&mut self) -> Result<Expression, ParseError> {
        match self.peek().kind {
            TokenKind::Identifier => Ok(Expression::Identifier(self.consume().value)),
            TokenKind::Number => {
                let token = self.consume();
                match token.value.parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(Expression::Number(value)),
                    _ => Err(ParseError::InvalidNumber {
                        position: token.position(),
                        literal: token.value,
                    }),
                }
            }
            TokenKind::OpenParen => {
                self.consume();
                let expression = self.parse_expression()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(expression)
            }
            _ => {
                let found = self.peek();
                Err(ParseError::ExpectedExpression {
                    found: found.to_string(),
                    position: found.position(),
                })
            }
        }
    }
}
