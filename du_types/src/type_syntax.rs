//! Parsing and canonical printing of C# type text.
//!
//! Manifests carry types exactly as a user wrote them (`List<int>`,
//! `global::System.String`, `(int x, string)`, `int[]?`). The generator needs
//! a structured view to qualify names, and a canonical printer so that the same
//! type always renders to the same bytes.

use std::fmt;
use thiserror::Error;

/// C# keywords that name built-in types.
pub const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "nint", "nuint",
    "long", "ulong", "short", "ushort", "object", "string", "dynamic", "void",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid type `{text}` at offset {offset}: {message}")]
pub struct TypeSyntaxError {
    pub text: String,
    pub offset: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameSegment {
    pub name: String,
    pub arguments: Vec<TypeSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleElement {
    pub ty: TypeSyntax,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSyntax {
    Predefined(String),
    Named {
        global: bool,
        segments: Vec<NameSegment>,
    },
    Array {
        element: Box<TypeSyntax>,
        rank: usize,
    },
    Nullable(Box<TypeSyntax>),
    Tuple(Vec<TupleElement>),
}

impl TypeSyntax {
    pub fn parse(text: &str) -> Result<Self, TypeSyntaxError> {
        let mut parser = Parser {
            text,
            tokens: tokenize(text)?,
            pos: 0,
        };
        let ty = parser.parse_type()?;
        if let Some(tok) = parser.peek() {
            return Err(parser.error_at(tok.offset, "unexpected trailing input"));
        }
        Ok(ty)
    }

    /// Simple name with no qualifier and no type arguments, e.g. `T`.
    pub fn as_simple_name(&self) -> Option<&str> {
        match self {
            TypeSyntax::Named { global: false, segments }
                if segments.len() == 1 && segments[0].arguments.is_empty() =>
            {
                Some(&segments[0].name)
            }
            _ => None,
        }
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntax::Predefined(name) => f.write_str(name),
            TypeSyntax::Named { global, segments } => {
                if *global {
                    f.write_str("global::")?;
                }
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "{}", segment)?;
                }
                Ok(())
            }
            TypeSyntax::Array { element, rank } => {
                write!(f, "{}[{}]", element, ",".repeat(rank.saturating_sub(1)))
            }
            TypeSyntax::Nullable(inner) => write!(f, "{}?", inner),
            TypeSyntax::Tuple(elements) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element.ty)?;
                    if let Some(name) = &element.name {
                        write!(f, " {}", name)?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for NameSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Ident(String),
    Punct(&'static str),
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

fn tokenize(text: &str) -> Result<Vec<Token>, TypeSyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '@' || c == '_' || c.is_alphabetic() {
            let mut ident = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if (c == '@' && ident.is_empty()) || c == '_' || c.is_alphanumeric() {
                    ident.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Ident(ident),
                offset,
            });
            continue;
        }
        chars.next();
        let punct = match c {
            ':' => match chars.next() {
                Some((_, ':')) => "::",
                _ => {
                    return Err(TypeSyntaxError {
                        text: text.to_string(),
                        offset,
                        message: "expected `::`".to_string(),
                    })
                }
            },
            '<' => "<",
            '>' => ">",
            ',' => ",",
            '.' => ".",
            '[' => "[",
            ']' => "]",
            '?' => "?",
            '(' => "(",
            ')' => ")",
            other => {
                return Err(TypeSyntaxError {
                    text: text.to_string(),
                    offset,
                    message: format!("unexpected character `{}`", other),
                })
            }
        };
        tokens.push(Token {
            kind: TokenKind::Punct(punct),
            offset,
        });
    }

    Ok(tokens)
}

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn at_punct(&self, punct: &str) -> bool {
        matches!(self.peek(), Some(Token { kind: TokenKind::Punct(p), .. }) if *p == punct)
    }

    fn eat_punct(&mut self, punct: &str) -> bool {
        if self.at_punct(punct) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn end_offset(&self) -> usize {
        self.text.len()
    }

    fn error_at(&self, offset: usize, message: &str) -> TypeSyntaxError {
        TypeSyntaxError {
            text: self.text.to_string(),
            offset,
            message: message.to_string(),
        }
    }

    fn expect_punct(&mut self, punct: &str) -> Result<(), TypeSyntaxError> {
        if self.eat_punct(punct) {
            return Ok(());
        }
        let offset = self.peek().map(|t| t.offset).unwrap_or(self.end_offset());
        Err(self.error_at(offset, &format!("expected `{}`", punct)))
    }

    fn expect_ident(&mut self) -> Result<String, TypeSyntaxError> {
        match self.peek().cloned() {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => {
                self.pos += 1;
                Ok(name)
            }
            Some(tok) => Err(self.error_at(tok.offset, "expected identifier")),
            None => Err(self.error_at(self.end_offset(), "expected identifier")),
        }
    }

    fn parse_type(&mut self) -> Result<TypeSyntax, TypeSyntaxError> {
        let mut ty = if self.eat_punct("(") {
            self.parse_tuple()?
        } else {
            self.parse_name()?
        };

        loop {
            if self.eat_punct("?") {
                ty = TypeSyntax::Nullable(Box::new(ty));
            } else if self.eat_punct("[") {
                let mut rank = 1;
                while self.eat_punct(",") {
                    rank += 1;
                }
                self.expect_punct("]")?;
                ty = TypeSyntax::Array {
                    element: Box::new(ty),
                    rank,
                };
            } else {
                return Ok(ty);
            }
        }
    }

    fn parse_tuple(&mut self) -> Result<TypeSyntax, TypeSyntaxError> {
        let mut elements = Vec::new();
        loop {
            let ty = self.parse_type()?;
            let name = match self.peek() {
                Some(Token {
                    kind: TokenKind::Ident(_),
                    ..
                }) => Some(self.expect_ident()?),
                _ => None,
            };
            elements.push(TupleElement { ty, name });
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(")")?;
        if elements.len() < 2 {
            let offset = self.peek().map(|t| t.offset).unwrap_or(self.end_offset());
            return Err(self.error_at(offset, "tuple types need at least two elements"));
        }
        Ok(TypeSyntax::Tuple(elements))
    }

    fn parse_name(&mut self) -> Result<TypeSyntax, TypeSyntaxError> {
        let first = self.expect_ident()?;
        let mut global = false;
        let mut segments = Vec::new();

        if self.eat_punct("::") {
            if first != "global" {
                let offset = self.peek().map(|t| t.offset).unwrap_or(self.end_offset());
                return Err(self.error_at(offset, "only the `global::` alias is supported"));
            }
            global = true;
            segments.push(self.parse_segment(None)?);
        } else {
            segments.push(self.parse_segment(Some(first))?);
        }

        while self.eat_punct(".") {
            segments.push(self.parse_segment(None)?);
        }

        if !global
            && segments.len() == 1
            && segments[0].arguments.is_empty()
            && PREDEFINED_TYPES.contains(&segments[0].name.as_str())
        {
            return Ok(TypeSyntax::Predefined(segments.remove(0).name));
        }

        Ok(TypeSyntax::Named { global, segments })
    }

    fn parse_segment(&mut self, name: Option<String>) -> Result<NameSegment, TypeSyntaxError> {
        let name = match name {
            Some(name) => name,
            None => self.expect_ident()?,
        };
        let mut arguments = Vec::new();
        if self.eat_punct("<") {
            loop {
                arguments.push(self.parse_type()?);
                if !self.eat_punct(",") {
                    break;
                }
            }
            self.expect_punct(">")?;
        }
        Ok(NameSegment { name, arguments })
    }
}
