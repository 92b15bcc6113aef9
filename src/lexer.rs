use logos::Logos;

use crate::error::LexError;
use crate::token::{Span, Token, TokenKind};

#[derive(Logos, Clone, Copy, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Lexeme {
    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("=")]
    Equals,

    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    BinaryOperator,

    #[token("let")]
    Let,

    #[token("const")]
    Const,

    #[token("fn")]
    Fn,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"\p{Alphabetic}+")]
    Identifier,
}

impl From<Lexeme> for TokenKind {
    fn from(lexeme: Lexeme) -> Self {
        match lexeme {
            Lexeme::OpenParen => TokenKind::OpenParen,
            Lexeme::CloseParen => TokenKind::CloseParen,
            Lexeme::OpenBrace => TokenKind::OpenBrace,
            Lexeme::CloseBrace => TokenKind::CloseBrace,
            Lexeme::OpenBracket => TokenKind::OpenBracket,
            Lexeme::CloseBracket => TokenKind::CloseBracket,
            Lexeme::Semicolon => TokenKind::Semicolon,
            Lexeme::Colon => TokenKind::Colon,
            Lexeme::Comma => TokenKind::Comma,
            Lexeme::Dot => TokenKind::Dot,
            Lexeme::Equals => TokenKind::Equals,
            Lexeme::BinaryOperator => TokenKind::BinaryOperator,
            Lexeme::Let => TokenKind::Let,
            Lexeme::Const => TokenKind::Const,
            Lexeme::Fn => TokenKind::Fn,
            Lexeme::Number => TokenKind::Number,
            Lexeme::Identifier => TokenKind::Identifier,
        }
    }
}

pub struct Lexer<'source> {
    source: &'source str,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Lexer { source }
    }

    /// Scans the whole source, stopping at the first unrecognized character.
    /// The returned sequence always ends with an `EndOfInput` token.
    pub fn lex(&self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        for (lexeme, span) in Lexeme::lexer(self.source).spanned() {
            match lexeme {
                Ok(lexeme) => {
                    tokens.push(Token::new(
                        lexeme.into(),
                        self.source[span.clone()].to_owned(),
                        Span(span.start, span.end),
                    ));
                }
                Err(()) => {
                    let character = self.source[span.start..].chars().next().unwrap_or('\0');
                    return Err(LexError::UnrecognizedCharacter {
                        character,
                        position: span.start,
                    });
                }
            }
        }

        tokens.push(Token::end_of_input(self.source.len()));

        Ok(tokens)
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).lex()
}
