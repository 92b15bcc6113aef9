use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Number,
  Identifier,

  Equals,
  Semicolon,
  Comma,
  Colon,
  Dot,

  OpenBracket,
  CloseBracket,
  OpenBrace,
  CloseBrace,
  OpenParen,
  CloseParen,

  BinaryOperator,

  Let,
  Const,
  Fn,

  EndOfInput,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      TokenKind::Number => "number",
      TokenKind::Identifier => "identifier",
      TokenKind::Equals => "'='",
      TokenKind::Semicolon => "';'",
      TokenKind::Comma => "','",
      TokenKind::Colon => "':'",
      TokenKind::Dot => "'.'",
      TokenKind::OpenBracket => "'['",
      TokenKind::CloseBracket => "']'",
      TokenKind::OpenBrace => "'{'",
      TokenKind::CloseBrace => "'}'",
      TokenKind::OpenParen => "'('",
      TokenKind::CloseParen => "')'",
      TokenKind::BinaryOperator => "binary operator",
      TokenKind::Let => "'let'",
      TokenKind::Const => "'const'",
      TokenKind::Fn => "'fn'",
      TokenKind::EndOfInput => "end of input",
    };

    f.write_str(name)
  }
}

/// Byte range of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span(pub usize, pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub kind: TokenKind,
  pub value: String,
  pub span: Span,
}

impl Token {
  pub fn new(kind: TokenKind, value: String, span: Span) -> Token {
    Token {
      kind,
      value,
      span,
    }
  }

  pub fn end_of_input(position: usize) -> Token {
    Token::new(TokenKind::EndOfInput, String::new(), Span(position, position))
  }

  pub fn position(&self) -> usize {
    self.span.0
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      TokenKind::Number | TokenKind::Identifier | TokenKind::BinaryOperator => {
        write!(f, "{} '{}'", self.kind, self.value)
      }
      kind => write!(f, "{}", kind),
    }
  }
}
